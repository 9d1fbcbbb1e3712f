/// Descriptor categories, binding descriptors and set descriptors

use std::fmt;
use crate::layout::ShaderStageFlags;

/// Highest number of descriptor sets a pipeline layout may use
pub const MAX_DESCRIPTOR_SETS: u32 = 32;

/// Descriptor category a shader resource is bound through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DescriptorCategory {
    Sampler,
    CombinedImageSampler,
    SampledImage,
    StorageImage,
    UniformTexelBuffer,
    StorageTexelBuffer,
    UniformBuffer,
    StorageBuffer,
    InputAttachment,
}

impl DescriptorCategory {
    /// Every category, in pool-size order
    pub const ALL: [DescriptorCategory; 9] = [
        DescriptorCategory::Sampler,
        DescriptorCategory::CombinedImageSampler,
        DescriptorCategory::SampledImage,
        DescriptorCategory::StorageImage,
        DescriptorCategory::UniformTexelBuffer,
        DescriptorCategory::StorageTexelBuffer,
        DescriptorCategory::UniformBuffer,
        DescriptorCategory::StorageBuffer,
        DescriptorCategory::InputAttachment,
    ];
}

/// (category, element count) pair that must agree across stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingShape {
    pub category: DescriptorCategory,
    pub count: u32,
}

impl fmt::Display for BindingShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[{}]", self.category, self.count)
    }
}

/// One merged (set, binding) slot of a pipeline layout
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DescriptorBindingDescriptor {
    /// Descriptor set index
    pub set: u32,

    /// Binding index within the set
    pub binding: u32,

    /// Descriptor category
    pub category: DescriptorCategory,

    /// Array element count (1 for non-arrays)
    pub count: u32,

    /// Stages that declare this binding
    pub stages: ShaderStageFlags,
}

impl DescriptorBindingDescriptor {
    pub fn shape(&self) -> BindingShape {
        BindingShape {
            category: self.category,
            count: self.count,
        }
    }
}

/// Bindings of one descriptor set, strictly ascending by binding index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DescriptorSetDescriptor {
    pub set: u32,
    pub bindings: Vec<DescriptorBindingDescriptor>,
}

impl DescriptorSetDescriptor {
    pub fn new(set: u32) -> Self {
        Self {
            set,
            bindings: Vec::new(),
        }
    }

    /// Look up a binding by index
    pub fn binding(&self, binding: u32) -> Option<&DescriptorBindingDescriptor> {
        self.bindings
            .binary_search_by_key(&binding, |b| b.binding)
            .ok()
            .map(|index| &self.bindings[index])
    }

    /// Total descriptors (array elements) in this set
    pub fn descriptor_count(&self) -> u32 {
        self.bindings.iter().map(|b| b.count).sum()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True for sets that exist only to keep set indices dense
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
#[path = "descriptor_tests.rs"]
mod tests;
