//! Error types for the Galaxy3D layout engine
//!
//! Every error is a synchronous validation failure detected while reflecting
//! a shader set or assembling its layout. None of them are retried: they
//! describe an invalid shader combination that the caller has to fix.

use std::fmt;

use crate::layout::{BaseKind, BindingShape, ShaderStage, ShaderStageFlags};
use crate::reflect::ResourceFamily;

/// Result type for Galaxy3D layout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D layout errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The named entry point is absent from a stage module's bytecode
    EntryPointNotFound {
        entry_point: String,
        stage: ShaderStage,
    },

    /// Two stage modules declare the same stage tag
    DuplicateStage(ShaderStage),

    /// The stage set is neither "compute alone" nor "vertex and fragment present"
    UnsupportedPipelineShape(ShaderStageFlags),

    /// The introspector reported a resource outside the closed descriptor set
    UnsupportedResourceKind {
        stage: ShaderStage,
        name: String,
        family: ResourceFamily,
    },

    /// A resource decorates a set index at or above `MAX_DESCRIPTOR_SETS`
    SetIndexOutOfRange {
        stage: ShaderStage,
        name: String,
        set: u32,
    },

    /// Same (set, binding) redeclared with a different category or element count
    BindingConflict {
        set: u32,
        binding: u32,
        existing: BindingShape,
        incoming: BindingShape,
    },

    /// Two merged push constant ranges overlap in byte space (offset, size)
    PushConstantOverlap {
        first: (u32, u32),
        second: (u32, u32),
    },

    /// A vertex attribute type has no defined wire format
    UnsupportedFormat {
        bit_width: u32,
        base_kind: BaseKind,
        vector_size: u32,
    },

    /// The bytecode introspector could not read the module
    ReflectionFailed(String),

    /// Backend-specific error (realization failure, poisoned cache lock)
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EntryPointNotFound { entry_point, stage } => {
                write!(f, "Entry point '{}' not found for {} stage", entry_point, stage)
            }
            Error::DuplicateStage(stage) => {
                write!(f, "Duplicate stage: {} is declared by more than one module", stage)
            }
            Error::UnsupportedPipelineShape(stages) => {
                write!(f, "Unsupported pipeline shape: {:?}", stages)
            }
            Error::UnsupportedResourceKind { stage, name, family } => {
                write!(f, "Unsupported resource kind: '{}' ({:?}) in {} stage", name, family, stage)
            }
            Error::SetIndexOutOfRange { stage, name, set } => {
                write!(
                    f,
                    "Set index out of range: '{}' uses set={} in {} stage (limit {})",
                    name,
                    set,
                    stage,
                    crate::layout::MAX_DESCRIPTOR_SETS
                )
            }
            Error::BindingConflict { set, binding, existing, incoming } => {
                write!(
                    f,
                    "Binding conflict at set={}, binding={}: {} vs {}",
                    set, binding, existing, incoming
                )
            }
            Error::PushConstantOverlap { first, second } => {
                write!(
                    f,
                    "Push constant overlap: [{}, {}) overlaps [{}, {})",
                    first.0,
                    first.0 as u64 + first.1 as u64,
                    second.0,
                    second.0 as u64 + second.1 as u64
                )
            }
            Error::UnsupportedFormat { bit_width, base_kind, vector_size } => {
                write!(
                    f,
                    "Unsupported format: {}-bit {:?} x{}",
                    bit_width, base_kind, vector_size
                )
            }
            Error::ReflectionFailed(msg) => write!(f, "Reflection failed: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build a `BackendError`, logging it at ERROR severity with file:line
///
/// # Example
///
/// ```no_run
/// # use galaxy_3d_layout::engine_err;
/// let err = engine_err!("galaxy3d::vulkan", "Failed to create layout: {}", 42);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::BackendError(message)
    }};
}

/// Return early with a logged `BackendError`
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
