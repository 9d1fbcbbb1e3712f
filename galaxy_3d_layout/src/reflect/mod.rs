/// Shader reflection and layout synthesis
///
/// Flow: [`ShaderIntrospector`] -> [`reflect_stage`] -> classifier, vertex
/// attribute extraction, binding and push constant merge -> [`LayoutAssembler`].

pub mod introspector;
pub mod reflected_stage;
pub mod classifier;
pub mod vertex_attributes;
pub mod binding_merger;
pub mod push_constant_merger;
pub mod assembler;

#[cfg(test)]
pub(crate) mod mock_introspector;

pub use introspector::{
    BufferRange, Decoration, Dimensionality, EntryPointInfo, ResourceFamily, ResourceId,
    ShaderIntrospector, ShaderResource, ShaderResources, StageReflection, TypeShape,
};
pub use reflected_stage::{
    reflect_stage, ReflectedPushConstant, ReflectedResource, ReflectedStage, ReflectedStageInput,
};
pub use classifier::classify_resource;
pub use vertex_attributes::extract_vertex_attributes;
pub use binding_merger::BindingMerger;
pub use push_constant_merger::PushConstantMerger;
pub use assembler::{pipeline_shape, AssembledLayout, LayoutAssembler};
