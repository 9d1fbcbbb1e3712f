//! Unit tests for pipeline_layout.rs and config.rs

use crate::layout::{
    DescriptorBindingDescriptor, DescriptorCategory, DescriptorSetDescriptor, LayoutConfig,
    PipelineLayoutDescriptor, PipelineShape, PushConstantRangeDescriptor, ShaderStageFlags,
    VertexAttributeDescriptor, VertexBinding, VertexFormat, VertexInputRate,
};

fn attribute(location: u32, binding: u32, stride: u32, rate: VertexInputRate) -> VertexAttributeDescriptor {
    VertexAttributeDescriptor {
        location,
        binding,
        format: VertexFormat::R32G32B32_SFLOAT,
        offset: 0,
        stride,
        input_rate: rate,
    }
}

fn sample_layout() -> PipelineLayoutDescriptor {
    PipelineLayoutDescriptor {
        shape: PipelineShape::Graphics,
        descriptor_sets: vec![
            DescriptorSetDescriptor {
                set: 0,
                bindings: vec![DescriptorBindingDescriptor {
                    set: 0,
                    binding: 0,
                    category: DescriptorCategory::UniformBuffer,
                    count: 1,
                    stages: ShaderStageFlags::VERTEX,
                }],
            },
            DescriptorSetDescriptor::new(1),
            DescriptorSetDescriptor {
                set: 2,
                bindings: vec![DescriptorBindingDescriptor {
                    set: 2,
                    binding: 3,
                    category: DescriptorCategory::CombinedImageSampler,
                    count: 2,
                    stages: ShaderStageFlags::FRAGMENT,
                }],
            },
        ],
        push_constant_ranges: vec![PushConstantRangeDescriptor {
            offset: 0,
            size: 64,
            stages: ShaderStageFlags::GEOMETRY,
        }],
        vertex_attributes: vec![
            attribute(0, 0, 12, VertexInputRate::Vertex),
            attribute(1, 1, 12, VertexInputRate::Vertex),
            attribute(2, 1, 16, VertexInputRate::Instance),
        ],
    }
}

// ============================================================================
// LOOKUP TESTS
// ============================================================================

#[test]
fn test_descriptor_set_lookup() {
    let layout = sample_layout();
    assert_eq!(layout.descriptor_set(2).unwrap().set, 2);
    assert!(layout.descriptor_set(1).unwrap().is_empty());
    assert!(layout.descriptor_set(3).is_none());
}

#[test]
fn test_binding_lookup() {
    let layout = sample_layout();
    let binding = layout.binding(2, 3).unwrap();
    assert_eq!(binding.category, DescriptorCategory::CombinedImageSampler);
    assert!(layout.binding(2, 0).is_none());
    assert!(layout.binding(7, 0).is_none());
}

#[test]
fn test_stage_mask_covers_bindings_and_push_constants() {
    let layout = sample_layout();
    assert_eq!(
        layout.stage_mask(),
        ShaderStageFlags::VERTEX | ShaderStageFlags::FRAGMENT | ShaderStageFlags::GEOMETRY
    );
}

#[test]
fn test_descriptor_counts() {
    let counts = sample_layout().descriptor_counts();
    assert_eq!(counts.sets, 3);
    assert_eq!(counts.uniform_buffers, 1);
    assert_eq!(counts.combined_image_samplers, 2);
}

#[test]
fn test_push_constant_range_end() {
    let range = PushConstantRangeDescriptor {
        offset: 16,
        size: 8,
        stages: ShaderStageFlags::VERTEX,
    };
    assert_eq!(range.end(), 24);
}

// ============================================================================
// VERTEX INPUT LAYOUT TESTS
// ============================================================================

#[test]
fn test_vertex_input_layout_dedups_bindings_keeping_first() {
    let input = sample_layout().vertex_input_layout();

    assert_eq!(
        input.bindings,
        vec![
            VertexBinding { binding: 0, stride: 12, input_rate: VertexInputRate::Vertex },
            VertexBinding { binding: 1, stride: 12, input_rate: VertexInputRate::Vertex },
        ]
    );
    assert_eq!(input.attributes.len(), 3);
}

#[test]
fn test_vertex_input_layout_bindings_sorted() {
    let mut layout = sample_layout();
    layout.vertex_attributes = vec![
        attribute(0, 5, 8, VertexInputRate::Vertex),
        attribute(1, 2, 4, VertexInputRate::Vertex),
    ];

    let bindings: Vec<u32> = layout.vertex_input_layout().bindings.iter().map(|b| b.binding).collect();
    assert_eq!(bindings, vec![2, 5]);
}

#[test]
fn test_compute_layout_has_empty_vertex_input() {
    let mut layout = sample_layout();
    layout.shape = PipelineShape::Compute;
    layout.vertex_attributes.clear();
    assert_eq!(layout.vertex_input_layout(), Default::default());
}

// ============================================================================
// CONFIG TESTS
// ============================================================================

#[test]
fn test_config_default_rate_is_vertex() {
    let config = LayoutConfig::default();
    assert_eq!(config.input_rate_for(0), VertexInputRate::Vertex);
    assert_eq!(config.input_rate_for(7), VertexInputRate::Vertex);
}

#[test]
fn test_config_instance_bindings_override_default() {
    let config = LayoutConfig {
        default_input_rate: VertexInputRate::Vertex,
        instance_rate_bindings: vec![1, 3],
    };
    assert_eq!(config.input_rate_for(1), VertexInputRate::Instance);
    assert_eq!(config.input_rate_for(2), VertexInputRate::Vertex);

    let all_instanced = LayoutConfig {
        default_input_rate: VertexInputRate::Instance,
        instance_rate_bindings: Vec::new(),
    };
    assert_eq!(all_instanced.input_rate_for(0), VertexInputRate::Instance);
}
