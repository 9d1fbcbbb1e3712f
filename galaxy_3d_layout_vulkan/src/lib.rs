/*!
# Galaxy 3D Layout - Vulkan Backend

Vulkan side of the Galaxy 3D layout engine.

This crate provides a spirq based `ShaderIntrospector` for SPIR-V bytecode
and a `LayoutRealizer` that turns synthesized pipeline layouts into
`VkDescriptorSetLayout` / `VkPipelineLayout` objects using the Ash library.

# Example

```no_run
use std::sync::Arc;
use galaxy_3d_layout::galaxy3d::cache::LayoutCache;
use galaxy_3d_layout::galaxy3d::layout::{LayoutConfig, ShaderStage, ShaderStageModule};
use galaxy_3d_layout_vulkan::galaxy3d::{SpirqIntrospector, VulkanLayoutRealizer};

# fn run(device: ash::Device, vs: &[u32], fs: &[u32]) -> galaxy_3d_layout::galaxy3d::Result<()> {
let cache = LayoutCache::new(Arc::new(SpirqIntrospector::new()), LayoutConfig::default());
let realizer = VulkanLayoutRealizer::new(device);

let modules = [
    ShaderStageModule::new(vs, ShaderStage::Vertex, "main"),
    ShaderStageModule::new(fs, ShaderStage::Fragment, "main"),
];
let entry = cache.get_or_build(&realizer, &modules)?;
println!("pipeline layout handle: {:#x}", entry.realized.pipeline_layout);

cache.teardown_device(&realizer)?;
# Ok(())
# }
```
*/

mod vulkan_introspector;
mod vulkan_format;
mod vulkan_realizer;

pub mod galaxy3d {
    pub use crate::vulkan_introspector::{SpirqIntrospector, SpirqStageReflection};
    pub use crate::vulkan_realizer::VulkanLayoutRealizer;
    pub use crate::vulkan_format::{
        descriptor_category_to_vk, descriptor_pool_sizes_to_vk, input_rate_to_vk,
        push_constant_ranges_to_vk, set_layout_bindings_to_vk, stage_flags_to_vk,
        vertex_format_to_vk, vertex_input_to_vk,
    };
}
