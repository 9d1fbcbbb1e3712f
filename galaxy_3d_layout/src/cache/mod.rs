/// Per-device memoization of realized pipeline layouts

pub mod realizer;
pub mod layout_cache;

#[cfg(test)]
pub(crate) mod mock_realizer;

pub use realizer::{DeviceKey, LayoutRealizer, RealizedLayout};
pub use layout_cache::{CachedLayout, LayoutCache, StageSetKey};
