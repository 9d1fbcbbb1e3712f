/// Layout synthesis configuration

use crate::layout::VertexInputRate;

/// Options applied while deriving vertex input state
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_layout::galaxy3d::layout::{LayoutConfig, VertexInputRate};
///
/// // Per-instance transforms live in binding 4
/// let config = LayoutConfig {
///     instance_rate_bindings: vec![4],
///     ..Default::default()
/// };
/// assert_eq!(config.input_rate_for(4), VertexInputRate::Instance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutConfig {
    /// Step rate of every vertex binding not listed below
    pub default_input_rate: VertexInputRate,

    /// Bindings stepped per instance
    pub instance_rate_bindings: Vec<u32>,
}

impl LayoutConfig {
    pub fn input_rate_for(&self, binding: u32) -> VertexInputRate {
        if self.instance_rate_bindings.contains(&binding) {
            VertexInputRate::Instance
        } else {
            self.default_input_rate
        }
    }
}
