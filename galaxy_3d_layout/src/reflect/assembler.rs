/// Layout assembly: pipeline shape, per-stage reflection and merging

use crate::error::{Error, Result};
use crate::engine_debug;
use crate::layout::{
    DescriptorCountTotals, LayoutConfig, PipelineLayoutDescriptor, PipelineShape, ShaderStage,
    ShaderStageFlags, ShaderStageModule,
};
use crate::reflect::{
    extract_vertex_attributes, reflect_stage, BindingMerger, PushConstantMerger, ReflectedStage,
    ShaderIntrospector,
};

/// Assembled layout and the descriptor totals derived from it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssembledLayout {
    pub layout: PipelineLayoutDescriptor,
    pub descriptor_counts: DescriptorCountTotals,
}

/// Pipeline shape of a stage set
///
/// Compute must be alone. Anything else needs both vertex and fragment;
/// tessellation, geometry or ray tracing stages may ride along but never
/// make a valid shape on their own.
pub fn pipeline_shape(stages: &[ShaderStage]) -> Result<PipelineShape> {
    let mut mask = ShaderStageFlags::empty();
    for stage in stages {
        if mask.contains(stage.flag()) {
            return Err(Error::DuplicateStage(*stage));
        }
        mask |= stage.flag();
    }

    if mask.contains(ShaderStageFlags::COMPUTE) {
        if stages.len() == 1 {
            return Ok(PipelineShape::Compute);
        }
        return Err(Error::UnsupportedPipelineShape(mask));
    }

    if mask.contains(ShaderStageFlags::VERTEX | ShaderStageFlags::FRAGMENT) {
        Ok(PipelineShape::Graphics)
    } else {
        Err(Error::UnsupportedPipelineShape(mask))
    }
}

/// Turns a full stage set into a [`PipelineLayoutDescriptor`]
///
/// Stateless apart from its configuration; one assembler may serve any
/// number of threads.
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_layout::galaxy3d::layout::{ShaderStage, ShaderStageModule};
/// use galaxy_3d_layout::galaxy3d::reflect::{LayoutAssembler, ShaderIntrospector};
///
/// # fn build(introspector: &dyn ShaderIntrospector, vs: &[u32], fs: &[u32]) -> galaxy_3d_layout::galaxy3d::Result<()> {
/// let modules = [
///     ShaderStageModule::new(vs, ShaderStage::Vertex, "main"),
///     ShaderStageModule::new(fs, ShaderStage::Fragment, "main"),
/// ];
/// let assembled = LayoutAssembler::default().assemble(introspector, &modules)?;
/// println!("{} sets", assembled.layout.descriptor_sets.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutAssembler {
    config: LayoutConfig,
}

impl LayoutAssembler {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Reflect and merge a stage set
    ///
    /// The shape is validated before any bytecode is touched. Modules are
    /// processed in stage-enumeration order whatever order they come in.
    pub fn assemble(
        &self,
        introspector: &dyn ShaderIntrospector,
        modules: &[ShaderStageModule<'_>],
    ) -> Result<AssembledLayout> {
        self.reflect_and_merge(introspector, modules)
            .map_err(Self::log_and_return_error)
    }

    /// Merge stages that were already reflected
    pub fn assemble_reflected(&self, stages: Vec<ReflectedStage>) -> Result<AssembledLayout> {
        self.merge(stages).map_err(Self::log_and_return_error)
    }

    fn reflect_and_merge(
        &self,
        introspector: &dyn ShaderIntrospector,
        modules: &[ShaderStageModule<'_>],
    ) -> Result<AssembledLayout> {
        let stages: Vec<ShaderStage> = modules.iter().map(|m| m.stage).collect();
        pipeline_shape(&stages)?;

        let mut ordered: Vec<&ShaderStageModule<'_>> = modules.iter().collect();
        ordered.sort_by_key(|m| m.stage);

        let reflected = ordered
            .into_iter()
            .map(|module| reflect_stage(introspector, module))
            .collect::<Result<Vec<_>>>()?;

        self.merge(reflected)
    }

    fn merge(&self, mut stages: Vec<ReflectedStage>) -> Result<AssembledLayout> {
        let tags: Vec<ShaderStage> = stages.iter().map(|s| s.stage).collect();
        let shape = pipeline_shape(&tags)?;
        stages.sort_by_key(|s| s.stage);

        let vertex_attributes = match shape {
            PipelineShape::Graphics => {
                let inputs = stages
                    .iter()
                    .find(|s| s.stage == ShaderStage::Vertex)
                    .map(|s| s.stage_inputs.as_slice())
                    .unwrap_or(&[]);
                extract_vertex_attributes(inputs, &self.config)?
            }
            PipelineShape::Compute => Vec::new(),
        };

        let mut bindings = BindingMerger::new();
        let mut push_constants = PushConstantMerger::new();
        for stage in &stages {
            bindings.add_stage(stage)?;
            push_constants.add_stage(stage);
        }

        let layout = PipelineLayoutDescriptor {
            shape,
            descriptor_sets: bindings.finish(),
            push_constant_ranges: push_constants.finish()?,
            vertex_attributes,
        };
        let descriptor_counts = layout.descriptor_counts();

        engine_debug!(
            "galaxy3d::layout",
            "Assembled {:?} layout: {} sets, {} descriptors, {} push constant ranges, {} vertex attributes",
            layout.shape,
            layout.descriptor_sets.len(),
            descriptor_counts.total_descriptors(),
            layout.push_constant_ranges.len(),
            layout.vertex_attributes.len()
        );

        Ok(AssembledLayout {
            layout,
            descriptor_counts,
        })
    }

    /// Log a validation error at ERROR severity, then hand it back
    fn log_and_return_error(error: Error) -> Error {
        match &error {
            Error::ReflectionFailed(msg) => {
                crate::engine_error!("galaxy3d::layout", "Reflection failed: {}", msg);
            }
            Error::BackendError(msg) => {
                crate::engine_error!("galaxy3d::layout", "Backend error: {}", msg);
            }
            _ => {
                crate::engine_error!("galaxy3d::layout", "Layout assembly failed: {}", error);
            }
        }
        error
    }
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;
