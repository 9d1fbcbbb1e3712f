/// Pipeline layout descriptors produced by the assembler

use crate::layout::{
    DescriptorBindingDescriptor, DescriptorCountTotals, DescriptorSetDescriptor,
    ShaderStageFlags, VertexFormat,
};

/// Kind of pipeline a stage set describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineShape {
    Graphics,
    Compute,
}

/// Step rate of a vertex binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexInputRate {
    #[default]
    Vertex,
    Instance,
}

/// Push constant byte range `[offset, offset + size)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PushConstantRangeDescriptor {
    pub offset: u32,
    pub size: u32,
    pub stages: ShaderStageFlags,
}

impl PushConstantRangeDescriptor {
    /// First byte past the range, widened so it cannot wrap
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }
}

/// One vertex shader input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttributeDescriptor {
    /// Shader input location
    pub location: u32,

    /// Vertex buffer binding the attribute is read from
    pub binding: u32,

    pub format: VertexFormat,

    /// Byte offset inside one element (always 0, attributes are not interleaved)
    pub offset: u32,

    /// Byte stride of one element
    pub stride: u32,

    pub input_rate: VertexInputRate,
}

/// One vertex buffer binding of the vertex input state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexBinding {
    pub binding: u32,
    pub stride: u32,
    pub input_rate: VertexInputRate,
}

/// Vertex input state: bindings ascending by index, attributes by location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VertexInputLayout {
    pub bindings: Vec<VertexBinding>,
    pub attributes: Vec<VertexAttributeDescriptor>,
}

/// Complete synthesized layout of one pipeline
///
/// Descriptor sets are dense (index `i` holds set `i`, possibly empty),
/// push constant ranges are sorted by offset and never overlap, vertex
/// attributes are empty for compute pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineLayoutDescriptor {
    pub shape: PipelineShape,
    pub descriptor_sets: Vec<DescriptorSetDescriptor>,
    pub push_constant_ranges: Vec<PushConstantRangeDescriptor>,
    pub vertex_attributes: Vec<VertexAttributeDescriptor>,
}

impl PipelineLayoutDescriptor {
    pub fn descriptor_set(&self, set: u32) -> Option<&DescriptorSetDescriptor> {
        self.descriptor_sets.get(set as usize)
    }

    /// Look up one (set, binding) slot
    pub fn binding(&self, set: u32, binding: u32) -> Option<&DescriptorBindingDescriptor> {
        self.descriptor_set(set).and_then(|s| s.binding(binding))
    }

    /// OR of every stage referenced by a binding or push constant range
    pub fn stage_mask(&self) -> ShaderStageFlags {
        let bindings = self
            .descriptor_sets
            .iter()
            .flat_map(|set| set.bindings.iter())
            .map(|b| b.stages);
        let ranges = self.push_constant_ranges.iter().map(|r| r.stages);
        bindings.chain(ranges).fold(ShaderStageFlags::empty(), |acc, s| acc | s)
    }

    pub fn descriptor_counts(&self) -> DescriptorCountTotals {
        DescriptorCountTotals::from_sets(&self.descriptor_sets)
    }

    /// Vertex input state for graphics pipelines
    ///
    /// One binding per distinct attribute binding index; when several
    /// attributes share a binding, the first one (lowest location) defines
    /// its stride and rate.
    pub fn vertex_input_layout(&self) -> VertexInputLayout {
        let mut bindings: Vec<VertexBinding> = Vec::new();
        for attribute in &self.vertex_attributes {
            if let Err(index) = bindings.binary_search_by_key(&attribute.binding, |b| b.binding) {
                bindings.insert(index, VertexBinding {
                    binding: attribute.binding,
                    stride: attribute.stride,
                    input_rate: attribute.input_rate,
                });
            }
        }

        VertexInputLayout {
            bindings,
            attributes: self.vertex_attributes.clone(),
        }
    }
}

#[cfg(test)]
#[path = "pipeline_layout_tests.rs"]
mod tests;
