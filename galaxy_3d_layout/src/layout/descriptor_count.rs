/// Aggregate descriptor counts used to size descriptor pools

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign};
use crate::layout::{DescriptorCategory, DescriptorSetDescriptor};

/// Per-category descriptor totals across one or more pipeline layouts
///
/// `sets` counts descriptor set layouts; every other field counts
/// descriptors (array elements) of one category. Totals of several layouts
/// are combined with `+`, and `* n` scales them (e.g. per frame in flight).
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_layout::galaxy3d::layout::DescriptorCountTotals;
///
/// # fn totals(a: DescriptorCountTotals, b: DescriptorCountTotals) {
/// let pool = (a + b) * 3;
/// for (category, count) in pool.pool_sizes() {
///     println!("{:?}: {}", category, count);
/// }
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DescriptorCountTotals {
    pub sets: u32,
    pub samplers: u32,
    pub combined_image_samplers: u32,
    pub sampled_images: u32,
    pub storage_images: u32,
    pub uniform_texel_buffers: u32,
    pub storage_texel_buffers: u32,
    pub uniform_buffers: u32,
    pub storage_buffers: u32,
    pub input_attachments: u32,
}

impl DescriptorCountTotals {
    /// Tally the given set descriptors
    pub fn from_sets(sets: &[DescriptorSetDescriptor]) -> Self {
        let mut totals = Self {
            sets: sets.len() as u32,
            ..Self::default()
        };
        for binding in sets.iter().flat_map(|set| set.bindings.iter()) {
            totals.add_descriptors(binding.category, binding.count);
        }
        totals
    }

    /// Add `count` descriptors of one category
    pub fn add_descriptors(&mut self, category: DescriptorCategory, count: u32) {
        *self.counter_mut(category) += count;
    }

    /// Descriptors of one category
    pub fn count(&self, category: DescriptorCategory) -> u32 {
        match category {
            DescriptorCategory::Sampler => self.samplers,
            DescriptorCategory::CombinedImageSampler => self.combined_image_samplers,
            DescriptorCategory::SampledImage => self.sampled_images,
            DescriptorCategory::StorageImage => self.storage_images,
            DescriptorCategory::UniformTexelBuffer => self.uniform_texel_buffers,
            DescriptorCategory::StorageTexelBuffer => self.storage_texel_buffers,
            DescriptorCategory::UniformBuffer => self.uniform_buffers,
            DescriptorCategory::StorageBuffer => self.storage_buffers,
            DescriptorCategory::InputAttachment => self.input_attachments,
        }
    }

    /// Sum of all descriptor counters (sets excluded)
    pub fn total_descriptors(&self) -> u32 {
        DescriptorCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// True when no set and no descriptor is counted
    pub fn is_empty(&self) -> bool {
        self.sets == 0 && self.total_descriptors() == 0
    }

    /// (category, count) for every non-zero category
    pub fn pool_sizes(&self) -> Vec<(DescriptorCategory, u32)> {
        DescriptorCategory::ALL
            .iter()
            .map(|category| (*category, self.count(*category)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    fn counter_mut(&mut self, category: DescriptorCategory) -> &mut u32 {
        match category {
            DescriptorCategory::Sampler => &mut self.samplers,
            DescriptorCategory::CombinedImageSampler => &mut self.combined_image_samplers,
            DescriptorCategory::SampledImage => &mut self.sampled_images,
            DescriptorCategory::StorageImage => &mut self.storage_images,
            DescriptorCategory::UniformTexelBuffer => &mut self.uniform_texel_buffers,
            DescriptorCategory::StorageTexelBuffer => &mut self.storage_texel_buffers,
            DescriptorCategory::UniformBuffer => &mut self.uniform_buffers,
            DescriptorCategory::StorageBuffer => &mut self.storage_buffers,
            DescriptorCategory::InputAttachment => &mut self.input_attachments,
        }
    }

    fn zip_with(self, other: Self, op: impl Fn(u32, u32) -> u32) -> Self {
        Self {
            sets: op(self.sets, other.sets),
            samplers: op(self.samplers, other.samplers),
            combined_image_samplers: op(self.combined_image_samplers, other.combined_image_samplers),
            sampled_images: op(self.sampled_images, other.sampled_images),
            storage_images: op(self.storage_images, other.storage_images),
            uniform_texel_buffers: op(self.uniform_texel_buffers, other.uniform_texel_buffers),
            storage_texel_buffers: op(self.storage_texel_buffers, other.storage_texel_buffers),
            uniform_buffers: op(self.uniform_buffers, other.uniform_buffers),
            storage_buffers: op(self.storage_buffers, other.storage_buffers),
            input_attachments: op(self.input_attachments, other.input_attachments),
        }
    }
}

impl Add for DescriptorCountTotals {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }
}

impl AddAssign for DescriptorCountTotals {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<u32> for DescriptorCountTotals {
    type Output = Self;

    fn mul(self, multiplier: u32) -> Self {
        self.zip_with(self, |a, _| a * multiplier)
    }
}

impl MulAssign<u32> for DescriptorCountTotals {
    fn mul_assign(&mut self, multiplier: u32) {
        *self = *self * multiplier;
    }
}

impl Sum for DescriptorCountTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a DescriptorCountTotals> for DescriptorCountTotals {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
#[path = "descriptor_count_tests.rs"]
mod tests;
