/// Conversions from layout descriptors to Vulkan structures
///
/// Pure functions, no device needed. The realizer and callers building
/// pipelines or descriptor pools go through these.

use ash::vk;
use galaxy_3d_layout::galaxy3d::layout::{
    DescriptorCategory, DescriptorCountTotals, DescriptorSetDescriptor,
    PushConstantRangeDescriptor, ShaderStage, ShaderStageFlags, VertexFormat,
    VertexInputLayout, VertexInputRate,
};

/// Convert a vertex attribute format to its Vulkan format
pub fn vertex_format_to_vk(format: VertexFormat) -> vk::Format {
    match format {
        // 8-bit
        VertexFormat::R8_SINT => vk::Format::R8_SINT,
        VertexFormat::R8G8_SINT => vk::Format::R8G8_SINT,
        VertexFormat::R8G8B8_SINT => vk::Format::R8G8B8_SINT,
        VertexFormat::R8G8B8A8_SINT => vk::Format::R8G8B8A8_SINT,
        VertexFormat::R8_UINT => vk::Format::R8_UINT,
        VertexFormat::R8G8_UINT => vk::Format::R8G8_UINT,
        VertexFormat::R8G8B8_UINT => vk::Format::R8G8B8_UINT,
        VertexFormat::R8G8B8A8_UINT => vk::Format::R8G8B8A8_UINT,
        // 16-bit
        VertexFormat::R16_SINT => vk::Format::R16_SINT,
        VertexFormat::R16G16_SINT => vk::Format::R16G16_SINT,
        VertexFormat::R16G16B16_SINT => vk::Format::R16G16B16_SINT,
        VertexFormat::R16G16B16A16_SINT => vk::Format::R16G16B16A16_SINT,
        VertexFormat::R16_UINT => vk::Format::R16_UINT,
        VertexFormat::R16G16_UINT => vk::Format::R16G16_UINT,
        VertexFormat::R16G16B16_UINT => vk::Format::R16G16B16_UINT,
        VertexFormat::R16G16B16A16_UINT => vk::Format::R16G16B16A16_UINT,
        VertexFormat::R16_SFLOAT => vk::Format::R16_SFLOAT,
        VertexFormat::R16G16_SFLOAT => vk::Format::R16G16_SFLOAT,
        VertexFormat::R16G16B16_SFLOAT => vk::Format::R16G16B16_SFLOAT,
        VertexFormat::R16G16B16A16_SFLOAT => vk::Format::R16G16B16A16_SFLOAT,
        // 32-bit
        VertexFormat::R32_SINT => vk::Format::R32_SINT,
        VertexFormat::R32G32_SINT => vk::Format::R32G32_SINT,
        VertexFormat::R32G32B32_SINT => vk::Format::R32G32B32_SINT,
        VertexFormat::R32G32B32A32_SINT => vk::Format::R32G32B32A32_SINT,
        VertexFormat::R32_UINT => vk::Format::R32_UINT,
        VertexFormat::R32G32_UINT => vk::Format::R32G32_UINT,
        VertexFormat::R32G32B32_UINT => vk::Format::R32G32B32_UINT,
        VertexFormat::R32G32B32A32_UINT => vk::Format::R32G32B32A32_UINT,
        VertexFormat::R32_SFLOAT => vk::Format::R32_SFLOAT,
        VertexFormat::R32G32_SFLOAT => vk::Format::R32G32_SFLOAT,
        VertexFormat::R32G32B32_SFLOAT => vk::Format::R32G32B32_SFLOAT,
        VertexFormat::R32G32B32A32_SFLOAT => vk::Format::R32G32B32A32_SFLOAT,
        // 64-bit
        VertexFormat::R64_SINT => vk::Format::R64_SINT,
        VertexFormat::R64G64_SINT => vk::Format::R64G64_SINT,
        VertexFormat::R64G64B64_SINT => vk::Format::R64G64B64_SINT,
        VertexFormat::R64G64B64A64_SINT => vk::Format::R64G64B64A64_SINT,
        VertexFormat::R64_UINT => vk::Format::R64_UINT,
        VertexFormat::R64G64_UINT => vk::Format::R64G64_UINT,
        VertexFormat::R64G64B64_UINT => vk::Format::R64G64B64_UINT,
        VertexFormat::R64G64B64A64_UINT => vk::Format::R64G64B64A64_UINT,
        VertexFormat::R64_SFLOAT => vk::Format::R64_SFLOAT,
        VertexFormat::R64G64_SFLOAT => vk::Format::R64G64_SFLOAT,
        VertexFormat::R64G64B64_SFLOAT => vk::Format::R64G64B64_SFLOAT,
        VertexFormat::R64G64B64A64_SFLOAT => vk::Format::R64G64B64A64_SFLOAT,
    }
}

pub fn descriptor_category_to_vk(category: DescriptorCategory) -> vk::DescriptorType {
    match category {
        DescriptorCategory::Sampler => vk::DescriptorType::SAMPLER,
        DescriptorCategory::CombinedImageSampler => vk::DescriptorType::COMBINED_IMAGE_SAMPLER,
        DescriptorCategory::SampledImage => vk::DescriptorType::SAMPLED_IMAGE,
        DescriptorCategory::StorageImage => vk::DescriptorType::STORAGE_IMAGE,
        DescriptorCategory::UniformTexelBuffer => vk::DescriptorType::UNIFORM_TEXEL_BUFFER,
        DescriptorCategory::StorageTexelBuffer => vk::DescriptorType::STORAGE_TEXEL_BUFFER,
        DescriptorCategory::UniformBuffer => vk::DescriptorType::UNIFORM_BUFFER,
        DescriptorCategory::StorageBuffer => vk::DescriptorType::STORAGE_BUFFER,
        DescriptorCategory::InputAttachment => vk::DescriptorType::INPUT_ATTACHMENT,
    }
}

fn stage_to_vk(stage: ShaderStage) -> vk::ShaderStageFlags {
    match stage {
        ShaderStage::Vertex => vk::ShaderStageFlags::VERTEX,
        ShaderStage::TessellationControl => vk::ShaderStageFlags::TESSELLATION_CONTROL,
        ShaderStage::TessellationEvaluation => vk::ShaderStageFlags::TESSELLATION_EVALUATION,
        ShaderStage::Geometry => vk::ShaderStageFlags::GEOMETRY,
        ShaderStage::Fragment => vk::ShaderStageFlags::FRAGMENT,
        ShaderStage::Compute => vk::ShaderStageFlags::COMPUTE,
        ShaderStage::Task => vk::ShaderStageFlags::TASK_EXT,
        ShaderStage::Mesh => vk::ShaderStageFlags::MESH_EXT,
        ShaderStage::RayGeneration => vk::ShaderStageFlags::RAYGEN_KHR,
        ShaderStage::AnyHit => vk::ShaderStageFlags::ANY_HIT_KHR,
        ShaderStage::ClosestHit => vk::ShaderStageFlags::CLOSEST_HIT_KHR,
        ShaderStage::Miss => vk::ShaderStageFlags::MISS_KHR,
        ShaderStage::Intersection => vk::ShaderStageFlags::INTERSECTION_KHR,
        ShaderStage::Callable => vk::ShaderStageFlags::CALLABLE_KHR,
    }
}

pub fn stage_flags_to_vk(flags: ShaderStageFlags) -> vk::ShaderStageFlags {
    flags
        .stages()
        .fold(vk::ShaderStageFlags::empty(), |acc, stage| acc | stage_to_vk(stage))
}

pub fn input_rate_to_vk(rate: VertexInputRate) -> vk::VertexInputRate {
    match rate {
        VertexInputRate::Vertex => vk::VertexInputRate::VERTEX,
        VertexInputRate::Instance => vk::VertexInputRate::INSTANCE,
    }
}

/// Bindings of one descriptor set layout, in binding order
pub fn set_layout_bindings_to_vk(set: &DescriptorSetDescriptor) -> Vec<vk::DescriptorSetLayoutBinding<'static>> {
    set.bindings
        .iter()
        .map(|b| {
            vk::DescriptorSetLayoutBinding::default()
                .binding(b.binding)
                .descriptor_type(descriptor_category_to_vk(b.category))
                .descriptor_count(b.count)
                .stage_flags(stage_flags_to_vk(b.stages))
        })
        .collect()
}

pub fn push_constant_ranges_to_vk(ranges: &[PushConstantRangeDescriptor]) -> Vec<vk::PushConstantRange> {
    ranges
        .iter()
        .map(|r| vk::PushConstantRange {
            stage_flags: stage_flags_to_vk(r.stages),
            offset: r.offset,
            size: r.size,
        })
        .collect()
}

/// Vertex input state: (binding descriptions, attribute descriptions)
pub fn vertex_input_to_vk(
    input: &VertexInputLayout,
) -> (Vec<vk::VertexInputBindingDescription>, Vec<vk::VertexInputAttributeDescription>) {
    let bindings = input
        .bindings
        .iter()
        .map(|b| vk::VertexInputBindingDescription {
            binding: b.binding,
            stride: b.stride,
            input_rate: input_rate_to_vk(b.input_rate),
        })
        .collect();

    let attributes = input
        .attributes
        .iter()
        .map(|a| vk::VertexInputAttributeDescription {
            location: a.location,
            binding: a.binding,
            format: vertex_format_to_vk(a.format),
            offset: a.offset,
        })
        .collect();

    (bindings, attributes)
}

/// Pool sizes for a descriptor pool holding `totals`; zero categories are skipped
pub fn descriptor_pool_sizes_to_vk(totals: &DescriptorCountTotals) -> Vec<vk::DescriptorPoolSize> {
    totals
        .pool_sizes()
        .into_iter()
        .map(|(category, count)| vk::DescriptorPoolSize {
            ty: descriptor_category_to_vk(category),
            descriptor_count: count,
        })
        .collect()
}

#[cfg(test)]
#[path = "vulkan_format_tests.rs"]
mod tests;
