/// Layout data model: stage tags, formats, descriptors and totals

pub mod shader_stage;
pub mod format;
pub mod descriptor;
pub mod descriptor_count;
pub mod pipeline_layout;
pub mod config;

pub use shader_stage::{ShaderStage, ShaderStageFlags, ShaderStageModule};
pub use format::{resolve_vertex_format, BaseKind, VertexFormat};
pub use descriptor::{
    BindingShape, DescriptorBindingDescriptor, DescriptorCategory, DescriptorSetDescriptor,
    MAX_DESCRIPTOR_SETS,
};
pub use descriptor_count::DescriptorCountTotals;
pub use pipeline_layout::{
    PipelineLayoutDescriptor, PipelineShape, PushConstantRangeDescriptor,
    VertexAttributeDescriptor, VertexBinding, VertexInputLayout, VertexInputRate,
};
pub use config::LayoutConfig;
