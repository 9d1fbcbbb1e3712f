/// Vertex attribute extraction from vertex stage inputs

use crate::error::Result;
use crate::layout::{resolve_vertex_format, LayoutConfig, VertexAttributeDescriptor};
use crate::reflect::ReflectedStageInput;

/// One attribute per stage input, ordered by location
///
/// Attributes are not interleaved: each one starts at offset 0 of its
/// binding's element, and the element stride is the input's own size.
pub fn extract_vertex_attributes(
    inputs: &[ReflectedStageInput],
    config: &LayoutConfig,
) -> Result<Vec<VertexAttributeDescriptor>> {
    let mut attributes = inputs
        .iter()
        .map(|input| {
            let shape = &input.shape;
            let format = resolve_vertex_format(shape.bit_width, shape.base_kind, shape.vector_size)?;
            Ok(VertexAttributeDescriptor {
                location: input.location,
                binding: input.binding,
                format,
                offset: 0,
                stride: shape.byte_stride()?,
                input_rate: config.input_rate_for(input.binding),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    attributes.sort_by_key(|a| a.location);
    Ok(attributes)
}

#[cfg(test)]
#[path = "vertex_attributes_tests.rs"]
mod tests;
