/// Mock introspector for unit tests
///
/// Serves hand-built stage facts. A module's bytecode is a single word: the
/// index of the [`MockStage`] registered with [`MockIntrospector::add`].

use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::layout::{BaseKind, ShaderStage, ShaderStageModule};
use crate::reflect::{
    BufferRange, Decoration, Dimensionality, EntryPointInfo, ResourceId, ShaderIntrospector,
    ShaderResource, ShaderResources, StageReflection, TypeShape,
};

/// Facts of one mock module
#[derive(Debug, Clone)]
pub struct MockStage {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub resources: ShaderResources,
    pub decorations: FxHashMap<(ResourceId, Decoration), u32>,
    pub shapes: FxHashMap<ResourceId, TypeShape>,
    pub ranges: FxHashMap<ResourceId, Vec<BufferRange>>,
    next_id: ResourceId,
}

impl MockStage {
    pub fn new(stage: ShaderStage) -> Self {
        Self {
            stage,
            entry_point: "main".to_string(),
            resources: ShaderResources::default(),
            decorations: FxHashMap::default(),
            shapes: FxHashMap::default(),
            ranges: FxHashMap::default(),
            next_id: 1,
        }
    }

    fn bound(&mut self, name: &str, set: u32, binding: u32, shape: TypeShape) -> ShaderResource {
        let id = self.next_id;
        self.next_id += 1;
        self.decorations.insert((id, Decoration::DescriptorSet), set);
        self.decorations.insert((id, Decoration::Binding), binding);
        self.shapes.insert(id, shape);
        ShaderResource::new(id, name)
    }

    fn arrayed(dim: Dimensionality, count: u32) -> TypeShape {
        let mut shape = TypeShape::opaque(dim);
        if count != 1 {
            shape.array_dims.push(count);
        }
        shape
    }

    pub fn uniform_buffer(mut self, name: &str, set: u32, binding: u32) -> Self {
        let r = self.bound(name, set, binding, TypeShape::opaque(Dimensionality::None));
        self.resources.uniform_buffers.push(r);
        self
    }

    pub fn storage_buffer(mut self, name: &str, set: u32, binding: u32) -> Self {
        let r = self.bound(name, set, binding, TypeShape::opaque(Dimensionality::None));
        self.resources.storage_buffers.push(r);
        self
    }

    pub fn storage_image(mut self, name: &str, set: u32, binding: u32, dim: Dimensionality) -> Self {
        let r = self.bound(name, set, binding, Self::arrayed(dim, 1));
        self.resources.storage_images.push(r);
        self
    }

    pub fn sampled_image(mut self, name: &str, set: u32, binding: u32, dim: Dimensionality, count: u32) -> Self {
        let r = self.bound(name, set, binding, Self::arrayed(dim, count));
        self.resources.sampled_images.push(r);
        self
    }

    /// Sampled image array with explicit dimensions, outermost first
    pub fn sampled_image_array(mut self, name: &str, set: u32, binding: u32, dims: &[u32]) -> Self {
        let mut shape = TypeShape::opaque(Dimensionality::Image);
        shape.array_dims.extend_from_slice(dims);
        let r = self.bound(name, set, binding, shape);
        self.resources.sampled_images.push(r);
        self
    }

    pub fn separate_image(mut self, name: &str, set: u32, binding: u32) -> Self {
        let r = self.bound(name, set, binding, Self::arrayed(Dimensionality::Image, 1));
        self.resources.separate_images.push(r);
        self
    }

    pub fn sampler(mut self, name: &str, set: u32, binding: u32) -> Self {
        let r = self.bound(name, set, binding, TypeShape::opaque(Dimensionality::None));
        self.resources.separate_samplers.push(r);
        self
    }

    pub fn subpass_input(mut self, name: &str, set: u32, binding: u32) -> Self {
        let r = self.bound(name, set, binding, TypeShape::opaque(Dimensionality::SubpassData));
        self.resources.subpass_inputs.push(r);
        self
    }

    pub fn acceleration_structure(mut self, name: &str, set: u32, binding: u32) -> Self {
        let r = self.bound(name, set, binding, TypeShape::opaque(Dimensionality::None));
        self.resources.acceleration_structures.push(r);
        self
    }

    /// Stage input whose binding equals its location
    pub fn input(mut self, name: &str, location: u32, bit_width: u32, kind: BaseKind, vector_size: u32) -> Self {
        let id = self.next_id;
        self.next_id += 1;
        self.decorations.insert((id, Decoration::Location), location);
        self.decorations.insert((id, Decoration::Binding), location);
        self.shapes.insert(id, TypeShape::vector(bit_width, kind, vector_size));
        self.resources.stage_inputs.push(ShaderResource::new(id, name));
        self
    }

    pub fn push_constants(mut self, name: &str, ranges: &[(u32, u32)]) -> Self {
        let id = self.next_id;
        self.next_id += 1;
        self.ranges.insert(
            id,
            ranges.iter().map(|(offset, size)| BufferRange { offset: *offset, size: *size }).collect(),
        );
        self.resources.push_constant_buffers.push(ShaderResource::new(id, name));
        self
    }
}

impl StageReflection for MockStage {
    fn resources(&self) -> &ShaderResources {
        &self.resources
    }

    fn decoration(&self, id: ResourceId, decoration: Decoration) -> Result<u32> {
        self.decorations
            .get(&(id, decoration))
            .copied()
            .ok_or_else(|| Error::ReflectionFailed(format!("resource {} has no {:?}", id, decoration)))
    }

    fn type_shape(&self, id: ResourceId) -> Result<TypeShape> {
        self.shapes
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::ReflectionFailed(format!("resource {} has no type", id)))
    }

    fn active_ranges(&self, id: ResourceId) -> Result<Vec<BufferRange>> {
        Ok(self.ranges.get(&id).cloned().unwrap_or_default())
    }
}

/// Introspector over registered [`MockStage`]s
#[derive(Debug, Default)]
pub struct MockIntrospector {
    stages: Vec<MockStage>,
    reflect_calls: AtomicUsize,
}

impl MockIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stage; returns the one-word bytecode that designates it
    pub fn add(&mut self, stage: MockStage) -> Vec<u32> {
        self.stages.push(stage);
        vec![(self.stages.len() - 1) as u32]
    }

    pub fn reflect_calls(&self) -> usize {
        self.reflect_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, code: &[u32]) -> Result<&MockStage> {
        code.first()
            .and_then(|index| self.stages.get(*index as usize))
            .ok_or_else(|| Error::ReflectionFailed("unknown mock module".to_string()))
    }
}

impl ShaderIntrospector for MockIntrospector {
    fn entry_points(&self, code: &[u32]) -> Result<Vec<EntryPointInfo>> {
        let stage = self.lookup(code)?;
        Ok(vec![EntryPointInfo {
            name: stage.entry_point.clone(),
            stage: stage.stage,
        }])
    }

    fn reflect(&self, module: &ShaderStageModule<'_>) -> Result<Box<dyn StageReflection>> {
        self.reflect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(self.lookup(module.code)?.clone()))
    }
}
