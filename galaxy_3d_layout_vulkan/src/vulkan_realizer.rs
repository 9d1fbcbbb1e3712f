/// Vulkan realization of synthesized pipeline layouts
///
/// Creates one `VkDescriptorSetLayout` per descriptor set (empty sets
/// included, so set indices stay dense) and one `VkPipelineLayout` on top.
/// Handles are stored as raw `u64` in [`RealizedLayout`] and recovered with
/// `vk::Handle::from_raw` on destruction.

use ash::vk::{self, Handle};
use galaxy_3d_layout::galaxy3d::cache::{DeviceKey, LayoutRealizer, RealizedLayout};
use galaxy_3d_layout::galaxy3d::layout::PipelineLayoutDescriptor;
use galaxy_3d_layout::galaxy3d::Result;
use galaxy_3d_layout::{engine_debug, engine_err};

use crate::vulkan_format::{push_constant_ranges_to_vk, set_layout_bindings_to_vk};

/// Realizer bound to one logical device
pub struct VulkanLayoutRealizer {
    device: ash::Device,
}

impl VulkanLayoutRealizer {
    pub fn new(device: ash::Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &ash::Device {
        &self.device
    }

    fn destroy_set_layouts(&self, layouts: &[vk::DescriptorSetLayout]) {
        unsafe {
            for layout in layouts {
                self.device.destroy_descriptor_set_layout(*layout, None);
            }
        }
    }
}

impl LayoutRealizer for VulkanLayoutRealizer {
    fn device_key(&self) -> DeviceKey {
        DeviceKey(self.device.handle().as_raw())
    }

    fn realize(&self, layout: &PipelineLayoutDescriptor) -> Result<RealizedLayout> {
        let mut set_layouts = Vec::with_capacity(layout.descriptor_sets.len());

        for set in &layout.descriptor_sets {
            let bindings = set_layout_bindings_to_vk(set);
            let create_info = vk::DescriptorSetLayoutCreateInfo::default().bindings(&bindings);

            match unsafe { self.device.create_descriptor_set_layout(&create_info, None) } {
                Ok(set_layout) => set_layouts.push(set_layout),
                Err(e) => {
                    // Nothing partially created may outlive a failed realization
                    self.destroy_set_layouts(&set_layouts);
                    return Err(engine_err!(
                        "galaxy3d::vulkan",
                        "Failed to create descriptor set layout {}: {:?}",
                        set.set,
                        e
                    ));
                }
            }
        }

        let push_constant_ranges = push_constant_ranges_to_vk(&layout.push_constant_ranges);
        let mut create_info = vk::PipelineLayoutCreateInfo::default();
        if !set_layouts.is_empty() {
            create_info = create_info.set_layouts(&set_layouts);
        }
        if !push_constant_ranges.is_empty() {
            create_info = create_info.push_constant_ranges(&push_constant_ranges);
        }

        let pipeline_layout = match unsafe { self.device.create_pipeline_layout(&create_info, None) } {
            Ok(pipeline_layout) => pipeline_layout,
            Err(e) => {
                self.destroy_set_layouts(&set_layouts);
                return Err(engine_err!(
                    "galaxy3d::vulkan",
                    "Failed to create pipeline layout: {:?}",
                    e
                ));
            }
        };

        engine_debug!(
            "galaxy3d::vulkan",
            "Realized pipeline layout {:#x} with {} set layouts",
            pipeline_layout.as_raw(),
            set_layouts.len()
        );

        Ok(RealizedLayout {
            set_layouts: set_layouts.iter().map(|l| l.as_raw()).collect(),
            pipeline_layout: pipeline_layout.as_raw(),
        })
    }

    fn destroy(&self, realized: &RealizedLayout) {
        unsafe {
            self.device
                .destroy_pipeline_layout(vk::PipelineLayout::from_raw(realized.pipeline_layout), None);
        }
        let set_layouts: Vec<vk::DescriptorSetLayout> = realized
            .set_layouts
            .iter()
            .map(|raw| vk::DescriptorSetLayout::from_raw(*raw))
            .collect();
        self.destroy_set_layouts(&set_layouts);
    }
}
