/// GPU object creation interface used by the layout cache

use crate::error::Result;
use crate::layout::PipelineLayoutDescriptor;

/// Identity of the device a realizer creates objects on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceKey(pub u64);

/// Backend handles of a realized layout
///
/// Handles are raw 64-bit values (e.g. `vk::DescriptorSetLayout::as_raw()`),
/// one set layout per descriptor set in set-index order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RealizedLayout {
    pub set_layouts: Vec<u64>,
    pub pipeline_layout: u64,
}

/// Creates and destroys backend layout objects for one device
pub trait LayoutRealizer: Send + Sync {
    fn device_key(&self) -> DeviceKey;

    /// Create one set layout per descriptor set, then the pipeline layout
    ///
    /// On failure nothing created by this call may be left alive.
    fn realize(&self, layout: &PipelineLayoutDescriptor) -> Result<RealizedLayout>;

    /// Destroy objects returned by `realize`
    fn destroy(&self, realized: &RealizedLayout);
}
