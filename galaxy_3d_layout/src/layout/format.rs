/// Vertex attribute wire formats and the format resolution table

use crate::error::{Error, Result};

/// Scalar base kind of a reflected type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseKind {
    SignedInt,
    UnsignedInt,
    /// IEEE float (half, single or double width depending on `bit_width`)
    Float,
    /// SPIR-V 64-bit float reported as its own kind by some introspectors
    Double,
    Boolean,
    Struct,
    /// Images, samplers and anything else without a numeric layout
    Opaque,
}

/// Vertex attribute data format
///
/// One variant per (component width, numeric kind, component count) the
/// format table can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum VertexFormat {
    // 8-bit
    R8_SINT,
    R8G8_SINT,
    R8G8B8_SINT,
    R8G8B8A8_SINT,
    R8_UINT,
    R8G8_UINT,
    R8G8B8_UINT,
    R8G8B8A8_UINT,

    // 16-bit
    R16_SINT,
    R16G16_SINT,
    R16G16B16_SINT,
    R16G16B16A16_SINT,
    R16_UINT,
    R16G16_UINT,
    R16G16B16_UINT,
    R16G16B16A16_UINT,
    R16_SFLOAT,
    R16G16_SFLOAT,
    R16G16B16_SFLOAT,
    R16G16B16A16_SFLOAT,

    // 32-bit
    R32_SINT,
    R32G32_SINT,
    R32G32B32_SINT,
    R32G32B32A32_SINT,
    R32_UINT,
    R32G32_UINT,
    R32G32B32_UINT,
    R32G32B32A32_UINT,
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32_SFLOAT,
    R32G32B32A32_SFLOAT,

    // 64-bit
    R64_SINT,
    R64G64_SINT,
    R64G64B64_SINT,
    R64G64B64A64_SINT,
    R64_UINT,
    R64G64_UINT,
    R64G64B64_UINT,
    R64G64B64A64_UINT,
    R64_SFLOAT,
    R64G64_SFLOAT,
    R64G64B64_SFLOAT,
    R64G64B64A64_SFLOAT,
}

use VertexFormat::*;

/// One row per valid (width, kind) pair, indexed by `vector_size - 1`
const FORMAT_TABLE: [(u32, BaseKind, [VertexFormat; 4]); 12] = [
    (8, BaseKind::SignedInt, [R8_SINT, R8G8_SINT, R8G8B8_SINT, R8G8B8A8_SINT]),
    (8, BaseKind::UnsignedInt, [R8_UINT, R8G8_UINT, R8G8B8_UINT, R8G8B8A8_UINT]),
    (16, BaseKind::SignedInt, [R16_SINT, R16G16_SINT, R16G16B16_SINT, R16G16B16A16_SINT]),
    (16, BaseKind::UnsignedInt, [R16_UINT, R16G16_UINT, R16G16B16_UINT, R16G16B16A16_UINT]),
    (16, BaseKind::Float, [R16_SFLOAT, R16G16_SFLOAT, R16G16B16_SFLOAT, R16G16B16A16_SFLOAT]),
    (32, BaseKind::SignedInt, [R32_SINT, R32G32_SINT, R32G32B32_SINT, R32G32B32A32_SINT]),
    (32, BaseKind::UnsignedInt, [R32_UINT, R32G32_UINT, R32G32B32_UINT, R32G32B32A32_UINT]),
    (32, BaseKind::Float, [R32_SFLOAT, R32G32_SFLOAT, R32G32B32_SFLOAT, R32G32B32A32_SFLOAT]),
    (64, BaseKind::SignedInt, [R64_SINT, R64G64_SINT, R64G64B64_SINT, R64G64B64A64_SINT]),
    (64, BaseKind::UnsignedInt, [R64_UINT, R64G64_UINT, R64G64B64_UINT, R64G64B64A64_UINT]),
    (64, BaseKind::Float, [R64_SFLOAT, R64G64_SFLOAT, R64G64B64_SFLOAT, R64G64B64A64_SFLOAT]),
    (64, BaseKind::Double, [R64_SFLOAT, R64G64_SFLOAT, R64G64B64_SFLOAT, R64G64B64A64_SFLOAT]),
];

impl VertexFormat {
    /// Number of components (1 to 4)
    pub fn component_count(&self) -> u32 {
        match self {
            R8_SINT | R8_UINT | R16_SINT | R16_UINT | R16_SFLOAT | R32_SINT | R32_UINT
            | R32_SFLOAT | R64_SINT | R64_UINT | R64_SFLOAT => 1,
            R8G8_SINT | R8G8_UINT | R16G16_SINT | R16G16_UINT | R16G16_SFLOAT | R32G32_SINT
            | R32G32_UINT | R32G32_SFLOAT | R64G64_SINT | R64G64_UINT | R64G64_SFLOAT => 2,
            R8G8B8_SINT | R8G8B8_UINT | R16G16B16_SINT | R16G16B16_UINT | R16G16B16_SFLOAT
            | R32G32B32_SINT | R32G32B32_UINT | R32G32B32_SFLOAT | R64G64B64_SINT
            | R64G64B64_UINT | R64G64B64_SFLOAT => 3,
            _ => 4,
        }
    }

    /// Width of one component in bits
    pub fn component_bits(&self) -> u32 {
        FORMAT_TABLE
            .iter()
            .find(|(_, _, row)| row.contains(self))
            .map(|(width, _, _)| *width)
            .unwrap_or(0)
    }

    /// Returns size in bytes for this format
    pub fn size_bytes(&self) -> u32 {
        self.component_bits() / 8 * self.component_count()
    }
}

/// Resolve the wire format of a scalar/vector type
///
/// Total over the table above: widths 8/16/32/64, integer kinds at every
/// width, `Float` at 16/32/64, `Double` at 64 only, vector sizes 1 to 4.
/// Everything else fails with `UnsupportedFormat`; nothing is widened.
pub fn resolve_vertex_format(bit_width: u32, base_kind: BaseKind, vector_size: u32) -> Result<VertexFormat> {
    let unsupported = || Error::UnsupportedFormat {
        bit_width,
        base_kind,
        vector_size,
    };

    if !(1..=4).contains(&vector_size) {
        return Err(unsupported());
    }

    FORMAT_TABLE
        .iter()
        .find(|(width, kind, _)| *width == bit_width && *kind == base_kind)
        .map(|(_, _, row)| row[(vector_size - 1) as usize])
        .ok_or_else(unsupported)
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
