/// Resource classification: introspector family + dimensionality -> category

use crate::error::{Error, Result};
use crate::layout::{DescriptorCategory, ShaderStage};
use crate::reflect::{Dimensionality, ReflectedResource, ResourceFamily};

/// Descriptor category of one reflected resource
///
/// Texel buffers arrive in the image families; only the buffer
/// dimensionality tells them apart from images.
pub fn classify_resource(stage: ShaderStage, resource: &ReflectedResource) -> Result<DescriptorCategory> {
    let is_buffer_dim = resource.dim == Dimensionality::Buffer;

    match resource.family {
        ResourceFamily::UniformBuffer => Ok(DescriptorCategory::UniformBuffer),
        ResourceFamily::StorageBuffer => Ok(DescriptorCategory::StorageBuffer),
        ResourceFamily::StorageImage if is_buffer_dim => Ok(DescriptorCategory::StorageTexelBuffer),
        ResourceFamily::StorageImage => Ok(DescriptorCategory::StorageImage),
        ResourceFamily::SeparateImage => Ok(DescriptorCategory::SampledImage),
        ResourceFamily::SampledImage if is_buffer_dim => Ok(DescriptorCategory::UniformTexelBuffer),
        ResourceFamily::SampledImage => Ok(DescriptorCategory::CombinedImageSampler),
        ResourceFamily::SeparateSampler => Ok(DescriptorCategory::Sampler),
        ResourceFamily::SubpassInput => Ok(DescriptorCategory::InputAttachment),
        ResourceFamily::StageInput
        | ResourceFamily::PushConstantBuffer
        | ResourceFamily::AccelerationStructure => Err(Error::UnsupportedResourceKind {
            stage,
            name: resource.name.clone(),
            family: resource.family,
        }),
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
