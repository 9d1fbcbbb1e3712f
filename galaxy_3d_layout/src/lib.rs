/*!
# Galaxy 3D Layout

Pipeline layout synthesis for the Galaxy 3D engine.

This crate reflects compiled shader stages and derives everything needed to
create a pipeline's resource interface: descriptor set layouts, push constant
ranges, vertex input state and descriptor pool totals. It never talks to a GPU:
bytecode parsing and object creation are delegated to a backend (see
`galaxy_3d_layout_vulkan`) through the `ShaderIntrospector` and
`LayoutRealizer` traits.

## Architecture

- **layout**: data model (stage tags, formats, descriptors, totals)
- **reflect**: per-stage reflection, classification, merging, assembly
- **cache**: per-device memoization of realized layouts
- **log**: replaceable engine logger
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod layout;
pub mod reflect;
pub mod cache;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Stage tags, formats, descriptors and totals
    pub mod layout {
        pub use crate::layout::*;
    }

    // Introspector interface and layout synthesis
    pub mod reflect {
        pub use crate::reflect::*;
    }

    // Layout cache and realizer interface
    pub mod cache {
        pub use crate::cache::*;
    }
}
