/// Shader stage tags, stage masks and stage modules

use std::fmt;
use bitflags::bitflags;

/// Pipeline stage a shader module targets
///
/// Declaration order is the stage-enumeration order used everywhere a
/// deterministic stage order matters (sorting modules, walking masks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShaderStage {
    Vertex,
    TessellationControl,
    TessellationEvaluation,
    Geometry,
    Fragment,
    Compute,
    Task,
    Mesh,
    RayGeneration,
    AnyHit,
    ClosestHit,
    Miss,
    Intersection,
    Callable,
}

impl ShaderStage {
    /// Every stage, in stage-enumeration order
    pub const ALL: [ShaderStage; 14] = [
        ShaderStage::Vertex,
        ShaderStage::TessellationControl,
        ShaderStage::TessellationEvaluation,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
        ShaderStage::Compute,
        ShaderStage::Task,
        ShaderStage::Mesh,
        ShaderStage::RayGeneration,
        ShaderStage::AnyHit,
        ShaderStage::ClosestHit,
        ShaderStage::Miss,
        ShaderStage::Intersection,
        ShaderStage::Callable,
    ];

    /// Single-bit mask for this stage
    pub fn flag(self) -> ShaderStageFlags {
        match self {
            ShaderStage::Vertex => ShaderStageFlags::VERTEX,
            ShaderStage::TessellationControl => ShaderStageFlags::TESSELLATION_CONTROL,
            ShaderStage::TessellationEvaluation => ShaderStageFlags::TESSELLATION_EVALUATION,
            ShaderStage::Geometry => ShaderStageFlags::GEOMETRY,
            ShaderStage::Fragment => ShaderStageFlags::FRAGMENT,
            ShaderStage::Compute => ShaderStageFlags::COMPUTE,
            ShaderStage::Task => ShaderStageFlags::TASK,
            ShaderStage::Mesh => ShaderStageFlags::MESH,
            ShaderStage::RayGeneration => ShaderStageFlags::RAY_GENERATION,
            ShaderStage::AnyHit => ShaderStageFlags::ANY_HIT,
            ShaderStage::ClosestHit => ShaderStageFlags::CLOSEST_HIT,
            ShaderStage::Miss => ShaderStageFlags::MISS,
            ShaderStage::Intersection => ShaderStageFlags::INTERSECTION,
            ShaderStage::Callable => ShaderStageFlags::CALLABLE,
        }
    }

    /// Lowercase name used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessellationControl => "tessellation control",
            ShaderStage::TessellationEvaluation => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
            ShaderStage::Task => "task",
            ShaderStage::Mesh => "mesh",
            ShaderStage::RayGeneration => "ray generation",
            ShaderStage::AnyHit => "any hit",
            ShaderStage::ClosestHit => "closest hit",
            ShaderStage::Miss => "miss",
            ShaderStage::Intersection => "intersection",
            ShaderStage::Callable => "callable",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of stages referencing a binding or push constant range
    ///
    /// Bit values match `VkShaderStageFlagBits` where Vulkan defines them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX = 0x0000_0001;
        const TESSELLATION_CONTROL = 0x0000_0002;
        const TESSELLATION_EVALUATION = 0x0000_0004;
        const GEOMETRY = 0x0000_0008;
        const FRAGMENT = 0x0000_0010;
        const COMPUTE = 0x0000_0020;
        const TASK = 0x0000_0040;
        const MESH = 0x0000_0080;
        const RAY_GENERATION = 0x0000_0100;
        const ANY_HIT = 0x0000_0200;
        const CLOSEST_HIT = 0x0000_0400;
        const MISS = 0x0000_0800;
        const INTERSECTION = 0x0000_1000;
        const CALLABLE = 0x0000_2000;

        const ALL_GRAPHICS = 0x0000_001F;
    }
}

impl ShaderStageFlags {
    /// Stages contained in this mask, in stage-enumeration order
    pub fn stages(self) -> impl Iterator<Item = ShaderStage> {
        ShaderStage::ALL
            .into_iter()
            .filter(move |stage| self.contains(stage.flag()))
    }
}

impl From<ShaderStage> for ShaderStageFlags {
    fn from(stage: ShaderStage) -> Self {
        stage.flag()
    }
}

/// One compiled shader module of a pipeline
///
/// Borrows the SPIR-V words; the caller keeps ownership of the bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderStageModule<'a> {
    /// SPIR-V bytecode words
    pub code: &'a [u32],

    /// Stage the module is bound to
    pub stage: ShaderStage,

    /// Entry point name (usually "main")
    pub entry_point: String,
}

impl<'a> ShaderStageModule<'a> {
    pub fn new(code: &'a [u32], stage: ShaderStage, entry_point: impl Into<String>) -> Self {
        Self {
            code,
            stage,
            entry_point: entry_point.into(),
        }
    }
}

#[cfg(test)]
#[path = "shader_stage_tests.rs"]
mod tests;
