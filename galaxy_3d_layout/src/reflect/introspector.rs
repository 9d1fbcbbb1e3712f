/// Bytecode introspector interface
///
/// The layout engine never parses SPIR-V itself. A backend (e.g. the spirq
/// based one in `galaxy_3d_layout_vulkan`) implements [`ShaderIntrospector`]
/// and hands back per-module [`StageReflection`] objects that answer the
/// queries below.

use crate::error::{Error, Result};
use crate::layout::{BaseKind, ShaderStage, ShaderStageModule};

/// Identifier of one resource inside a [`StageReflection`]
pub type ResourceId = u32;

/// Resource family as partitioned by the introspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFamily {
    UniformBuffer,
    StorageBuffer,
    /// Read/write image (storage image or storage texel buffer)
    StorageImage,
    /// Image without a sampler
    SeparateImage,
    /// Image with a sampler (combined image sampler or uniform texel buffer)
    SampledImage,
    SeparateSampler,
    SubpassInput,
    StageInput,
    PushConstantBuffer,
    AccelerationStructure,
}

/// Image dimensionality tag, as far as classification needs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimensionality {
    /// Not an image
    #[default]
    None,
    /// 1D/2D/3D/cube/rect image
    Image,
    /// Texel buffer
    Buffer,
    SubpassData,
}

/// Integer decoration kinds queried by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoration {
    DescriptorSet,
    Binding,
    Location,
}

/// Type metadata of a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeShape {
    /// Scalar component width in bits (0 for opaque types)
    pub bit_width: u32,
    pub base_kind: BaseKind,
    /// Components per column (1 for scalars)
    pub vector_size: u32,
    /// Matrix columns (1 for non-matrices)
    pub columns: u32,
    /// Array dimensions, outermost first; empty for non-arrays
    pub array_dims: Vec<u32>,
    pub dim: Dimensionality,
}

impl TypeShape {
    /// Scalar/vector shape without arrays
    pub fn vector(bit_width: u32, base_kind: BaseKind, vector_size: u32) -> Self {
        Self {
            bit_width,
            base_kind,
            vector_size,
            columns: 1,
            array_dims: Vec::new(),
            dim: Dimensionality::None,
        }
    }

    /// Opaque image/sampler shape
    pub fn opaque(dim: Dimensionality) -> Self {
        Self {
            bit_width: 0,
            base_kind: BaseKind::Opaque,
            vector_size: 1,
            columns: 1,
            array_dims: Vec::new(),
            dim,
        }
    }

    /// Product of all array dimensions (1 for non-arrays)
    pub fn element_count(&self) -> Result<u32> {
        self.array_dims
            .iter()
            .try_fold(1u32, |acc, dim| acc.checked_mul(*dim))
            .ok_or_else(|| {
                Error::ReflectionFailed(format!("array size {:?} overflows u32", self.array_dims))
            })
    }

    pub fn is_buffer_dim(&self) -> bool {
        self.dim == Dimensionality::Buffer
    }

    /// Bytes per element: `bit_width * vector_size * columns / 8`
    pub fn byte_stride(&self) -> Result<u32> {
        self.bit_width
            .checked_mul(self.vector_size)
            .and_then(|bits| bits.checked_mul(self.columns))
            .map(|bits| bits / 8)
            .ok_or_else(|| {
                Error::ReflectionFailed(format!(
                    "element of {} bits x{} x{} overflows u32",
                    self.bit_width, self.vector_size, self.columns
                ))
            })
    }
}

/// Byte range of a push constant block that the shader actually reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferRange {
    pub offset: u32,
    pub size: u32,
}

/// Entry point listed by a module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPointInfo {
    pub name: String,
    pub stage: ShaderStage,
}

/// One resource inside a family list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderResource {
    pub id: ResourceId,
    pub name: String,
}

impl ShaderResource {
    pub fn new(id: ResourceId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Resources of one entry point, partitioned by family
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderResources {
    pub uniform_buffers: Vec<ShaderResource>,
    pub storage_buffers: Vec<ShaderResource>,
    pub storage_images: Vec<ShaderResource>,
    pub separate_images: Vec<ShaderResource>,
    pub sampled_images: Vec<ShaderResource>,
    pub separate_samplers: Vec<ShaderResource>,
    pub subpass_inputs: Vec<ShaderResource>,
    pub stage_inputs: Vec<ShaderResource>,
    pub push_constant_buffers: Vec<ShaderResource>,
    pub acceleration_structures: Vec<ShaderResource>,
}

impl ShaderResources {
    /// Every descriptor-bound resource with its family, in family order
    ///
    /// Stage inputs and push constant buffers are not descriptors; acceleration
    /// structures are, and are reported so the classifier can reject them.
    pub fn descriptors(&self) -> impl Iterator<Item = (ResourceFamily, &ShaderResource)> {
        let families: [(ResourceFamily, &Vec<ShaderResource>); 8] = [
            (ResourceFamily::UniformBuffer, &self.uniform_buffers),
            (ResourceFamily::StorageBuffer, &self.storage_buffers),
            (ResourceFamily::StorageImage, &self.storage_images),
            (ResourceFamily::SeparateImage, &self.separate_images),
            (ResourceFamily::SampledImage, &self.sampled_images),
            (ResourceFamily::SeparateSampler, &self.separate_samplers),
            (ResourceFamily::SubpassInput, &self.subpass_inputs),
            (ResourceFamily::AccelerationStructure, &self.acceleration_structures),
        ];
        families
            .into_iter()
            .flat_map(|(family, list)| list.iter().map(move |r| (family, r)))
    }
}

/// Queries on one reflected entry point
pub trait StageReflection {
    /// Resources used by the entry point, partitioned by family
    fn resources(&self) -> &ShaderResources;

    /// Integer decoration of a resource; fails if the decoration is absent
    fn decoration(&self, id: ResourceId, decoration: Decoration) -> Result<u32>;

    fn type_shape(&self, id: ResourceId) -> Result<TypeShape>;

    /// Byte ranges of a push constant block that are actually read
    fn active_ranges(&self, id: ResourceId) -> Result<Vec<BufferRange>>;
}

/// Bytecode introspector (external collaborator)
pub trait ShaderIntrospector: Send + Sync {
    /// Entry points declared by a module
    fn entry_points(&self, code: &[u32]) -> Result<Vec<EntryPointInfo>>;

    /// Reflect one module's entry point
    fn reflect(&self, module: &ShaderStageModule<'_>) -> Result<Box<dyn StageReflection>>;
}
