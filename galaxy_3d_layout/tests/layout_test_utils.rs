#![allow(dead_code)]
//! Layout test utilities - in-memory introspector and counting realizer
//!
//! `TestIntrospector` serves stage facts registered up front; the bytecode
//! of a module is the one-word index returned by `TestIntrospector::add`.
//! `CountingRealizer` hands out sequential handles and counts calls, with an
//! optional delay so concurrent callers really overlap.

use galaxy_3d_layout::galaxy3d::cache::{DeviceKey, LayoutRealizer, RealizedLayout};
use galaxy_3d_layout::galaxy3d::layout::{BaseKind, PipelineLayoutDescriptor, ShaderStage, ShaderStageModule};
use galaxy_3d_layout::galaxy3d::reflect::{
    BufferRange, Decoration, Dimensionality, EntryPointInfo, ResourceFamily, ResourceId,
    ShaderIntrospector, ShaderResource, ShaderResources, StageReflection, TypeShape,
};
use galaxy_3d_layout::galaxy3d::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// TEST STAGE
// ============================================================================

#[derive(Debug, Clone)]
pub struct TestStage {
    pub stage: ShaderStage,
    pub entry_point: String,
    resources: ShaderResources,
    decorations: HashMap<(ResourceId, Decoration), u32>,
    shapes: HashMap<ResourceId, TypeShape>,
    ranges: HashMap<ResourceId, Vec<BufferRange>>,
}

impl TestStage {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            entry_point: "main".to_string(),
            resources: ShaderResources::default(),
            decorations: HashMap::new(),
            shapes: HashMap::new(),
            ranges: HashMap::new(),
        }
    }

    pub fn entry_point(mut self, name: &str) -> Self {
        self.entry_point = name.to_string();
        self
    }

    fn next_id(&self) -> ResourceId {
        (self.shapes.len() + self.ranges.len() + 1) as ResourceId
    }

    /// Descriptor resource of any family; `count` > 1 makes it an array
    pub fn descriptor(
        mut self,
        family: ResourceFamily,
        name: &str,
        set: u32,
        binding: u32,
        dim: Dimensionality,
        count: u32,
    ) -> Self {
        let id = self.next_id();
        let mut shape = TypeShape::opaque(dim);
        if count != 1 {
            shape.array_dims.push(count);
        }
        self.shapes.insert(id, shape);
        self.decorations.insert((id, Decoration::DescriptorSet), set);
        self.decorations.insert((id, Decoration::Binding), binding);

        let resource = ShaderResource::new(id, name);
        let list = match family {
            ResourceFamily::UniformBuffer => &mut self.resources.uniform_buffers,
            ResourceFamily::StorageBuffer => &mut self.resources.storage_buffers,
            ResourceFamily::StorageImage => &mut self.resources.storage_images,
            ResourceFamily::SeparateImage => &mut self.resources.separate_images,
            ResourceFamily::SampledImage => &mut self.resources.sampled_images,
            ResourceFamily::SeparateSampler => &mut self.resources.separate_samplers,
            ResourceFamily::SubpassInput => &mut self.resources.subpass_inputs,
            ResourceFamily::AccelerationStructure => &mut self.resources.acceleration_structures,
            ResourceFamily::StageInput => &mut self.resources.stage_inputs,
            ResourceFamily::PushConstantBuffer => &mut self.resources.push_constant_buffers,
        };
        list.push(resource);
        self
    }

    pub fn uniform_buffer(self, name: &str, set: u32, binding: u32) -> Self {
        self.descriptor(ResourceFamily::UniformBuffer, name, set, binding, Dimensionality::None, 1)
    }

    pub fn input(mut self, name: &str, location: u32, bit_width: u32, kind: BaseKind, vector_size: u32) -> Self {
        let id = self.next_id();
        self.shapes.insert(id, TypeShape::vector(bit_width, kind, vector_size));
        self.decorations.insert((id, Decoration::Location), location);
        self.decorations.insert((id, Decoration::Binding), location);
        self.resources.stage_inputs.push(ShaderResource::new(id, name));
        self
    }

    pub fn push_constants(mut self, name: &str, ranges: &[(u32, u32)]) -> Self {
        let id = self.next_id();
        self.ranges.insert(
            id,
            ranges.iter().map(|&(offset, size)| BufferRange { offset, size }).collect(),
        );
        self.resources.push_constant_buffers.push(ShaderResource::new(id, name));
        self
    }
}

impl StageReflection for TestStage {
    fn resources(&self) -> &ShaderResources {
        &self.resources
    }

    fn decoration(&self, id: ResourceId, decoration: Decoration) -> Result<u32> {
        self.decorations
            .get(&(id, decoration))
            .copied()
            .ok_or_else(|| Error::ReflectionFailed(format!("no {:?} on {}", decoration, id)))
    }

    fn type_shape(&self, id: ResourceId) -> Result<TypeShape> {
        self.shapes
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::ReflectionFailed(format!("no type for {}", id)))
    }

    fn active_ranges(&self, id: ResourceId) -> Result<Vec<BufferRange>> {
        Ok(self.ranges.get(&id).cloned().unwrap_or_default())
    }
}

// ============================================================================
// TEST INTROSPECTOR
// ============================================================================

#[derive(Debug, Default)]
pub struct TestIntrospector {
    stages: Vec<TestStage>,
}

impl TestIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stage: TestStage) -> Vec<u32> {
        self.stages.push(stage);
        vec![(self.stages.len() - 1) as u32]
    }

    fn lookup(&self, code: &[u32]) -> Result<&TestStage> {
        code.first()
            .and_then(|i| self.stages.get(*i as usize))
            .ok_or_else(|| Error::ReflectionFailed("unknown test module".to_string()))
    }
}

impl ShaderIntrospector for TestIntrospector {
    fn entry_points(&self, code: &[u32]) -> Result<Vec<EntryPointInfo>> {
        let stage = self.lookup(code)?;
        Ok(vec![EntryPointInfo {
            name: stage.entry_point.clone(),
            stage: stage.stage,
        }])
    }

    fn reflect(&self, module: &ShaderStageModule<'_>) -> Result<Box<dyn StageReflection>> {
        Ok(Box::new(self.lookup(module.code)?.clone()))
    }
}

// ============================================================================
// COUNTING REALIZER
// ============================================================================

pub struct CountingRealizer {
    device: DeviceKey,
    delay: Duration,
    next_handle: AtomicU64,
    realize_calls: AtomicUsize,
    pub destroyed: Mutex<Vec<RealizedLayout>>,
}

impl CountingRealizer {
    pub fn new(device: u64) -> Self {
        Self::with_delay(device, Duration::ZERO)
    }

    pub fn with_delay(device: u64, delay: Duration) -> Self {
        Self {
            device: DeviceKey(device),
            delay,
            next_handle: AtomicU64::new(0x1000),
            realize_calls: AtomicUsize::new(0),
            destroyed: Mutex::new(Vec::new()),
        }
    }

    pub fn realize_calls(&self) -> usize {
        self.realize_calls.load(Ordering::SeqCst)
    }
}

impl LayoutRealizer for CountingRealizer {
    fn device_key(&self) -> DeviceKey {
        self.device
    }

    fn realize(&self, layout: &PipelineLayoutDescriptor) -> Result<RealizedLayout> {
        self.realize_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let set_layouts = layout
            .descriptor_sets
            .iter()
            .map(|_| self.next_handle.fetch_add(1, Ordering::SeqCst))
            .collect();
        Ok(RealizedLayout {
            set_layouts,
            pipeline_layout: self.next_handle.fetch_add(1, Ordering::SeqCst),
        })
    }

    fn destroy(&self, realized: &RealizedLayout) {
        self.destroyed.lock().unwrap().push(realized.clone());
    }
}
