//! Unit tests for format.rs
//!
//! Covers every valid row of the format table and the rejected combinations.

use crate::error::Error;
use crate::layout::{resolve_vertex_format, BaseKind, VertexFormat};

const WIDTHS: [u32; 4] = [8, 16, 32, 64];
const NUMERIC_KINDS: [BaseKind; 4] = [
    BaseKind::SignedInt,
    BaseKind::UnsignedInt,
    BaseKind::Float,
    BaseKind::Double,
];

fn is_valid_pair(width: u32, kind: BaseKind) -> bool {
    match kind {
        BaseKind::SignedInt | BaseKind::UnsignedInt => true,
        BaseKind::Float => width >= 16,
        BaseKind::Double => width == 64,
        _ => false,
    }
}

// ============================================================================
// TABLE COMPLETENESS
// ============================================================================

#[test]
fn test_every_documented_combination_resolves() {
    for width in WIDTHS {
        for kind in NUMERIC_KINDS {
            for vector_size in 1..=4 {
                let result = resolve_vertex_format(width, kind, vector_size);
                if is_valid_pair(width, kind) {
                    let format = result.unwrap();
                    assert_eq!(format.component_count(), vector_size);
                    assert_eq!(format.component_bits(), width);
                } else {
                    assert!(
                        matches!(result, Err(Error::UnsupportedFormat { .. })),
                        "{}-bit {:?} x{} should be rejected",
                        width,
                        kind,
                        vector_size
                    );
                }
            }
        }
    }
}

#[test]
fn test_vector_size_out_of_range_rejected() {
    for vector_size in [0, 5, 16] {
        let err = resolve_vertex_format(32, BaseKind::Float, vector_size).unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedFormat {
                bit_width: 32,
                base_kind: BaseKind::Float,
                vector_size,
            }
        );
    }
}

#[test]
fn test_unlisted_widths_rejected() {
    assert!(resolve_vertex_format(24, BaseKind::SignedInt, 1).is_err());
    assert!(resolve_vertex_format(128, BaseKind::Float, 4).is_err());
    assert!(resolve_vertex_format(0, BaseKind::UnsignedInt, 2).is_err());
}

#[test]
fn test_non_numeric_kinds_rejected() {
    for kind in [BaseKind::Boolean, BaseKind::Struct, BaseKind::Opaque] {
        assert!(resolve_vertex_format(32, kind, 1).is_err());
    }
}

// ============================================================================
// SPECIFIC MAPPINGS
// ============================================================================

#[test]
fn test_common_attribute_formats() {
    assert_eq!(resolve_vertex_format(32, BaseKind::Float, 3).unwrap(), VertexFormat::R32G32B32_SFLOAT);
    assert_eq!(resolve_vertex_format(32, BaseKind::Float, 2).unwrap(), VertexFormat::R32G32_SFLOAT);
    assert_eq!(resolve_vertex_format(8, BaseKind::UnsignedInt, 4).unwrap(), VertexFormat::R8G8B8A8_UINT);
    assert_eq!(resolve_vertex_format(16, BaseKind::Float, 1).unwrap(), VertexFormat::R16_SFLOAT);
    assert_eq!(resolve_vertex_format(64, BaseKind::SignedInt, 2).unwrap(), VertexFormat::R64G64_SINT);
}

#[test]
fn test_double_and_float64_share_formats() {
    for vector_size in 1..=4 {
        assert_eq!(
            resolve_vertex_format(64, BaseKind::Double, vector_size).unwrap(),
            resolve_vertex_format(64, BaseKind::Float, vector_size).unwrap()
        );
    }
}

// ============================================================================
// FORMAT SIZE TESTS
// ============================================================================

#[test]
fn test_size_bytes() {
    assert_eq!(VertexFormat::R8_SINT.size_bytes(), 1);
    assert_eq!(VertexFormat::R16G16B16_UINT.size_bytes(), 6);
    assert_eq!(VertexFormat::R32G32B32A32_SFLOAT.size_bytes(), 16);
    assert_eq!(VertexFormat::R64G64B64_SFLOAT.size_bytes(), 24);
}
