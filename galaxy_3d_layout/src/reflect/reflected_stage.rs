/// Per-stage reflection: everything the assembler needs from one module

use crate::error::{Error, Result};
use crate::layout::{ShaderStage, ShaderStageModule};
use crate::reflect::{
    BufferRange, Decoration, Dimensionality, ResourceFamily, ResourceId, ShaderIntrospector,
    StageReflection, TypeShape,
};
use crate::engine_debug;

/// One descriptor-bound resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReflectedResource {
    pub id: ResourceId,
    pub name: String,
    pub family: ResourceFamily,
    pub set: u32,
    pub binding: u32,
    /// Flattened array element count (1 for non-arrays)
    pub element_count: u32,
    pub dim: Dimensionality,
}

/// One vertex stage input
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReflectedStageInput {
    pub id: ResourceId,
    pub name: String,
    pub location: u32,
    pub binding: u32,
    pub shape: TypeShape,
}

/// One push constant block and the byte ranges the stage reads
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReflectedPushConstant {
    pub id: ResourceId,
    pub name: String,
    pub ranges: Vec<BufferRange>,
}

/// Reflected facts of one stage module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReflectedStage {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub resources: Vec<ReflectedResource>,
    /// Only gathered for the vertex stage
    pub stage_inputs: Vec<ReflectedStageInput>,
    pub push_constants: Vec<ReflectedPushConstant>,
}

impl ReflectedStage {
    pub fn new(stage: ShaderStage, entry_point: impl Into<String>) -> Self {
        Self {
            stage,
            entry_point: entry_point.into(),
            resources: Vec::new(),
            stage_inputs: Vec::new(),
            push_constants: Vec::new(),
        }
    }
}

/// Reflect one stage module through the introspector
///
/// The entry point is validated first: its name and stage must be listed by
/// `entry_points()`, otherwise `EntryPointNotFound` is returned before any
/// resource is queried.
pub fn reflect_stage(
    introspector: &dyn ShaderIntrospector,
    module: &ShaderStageModule<'_>,
) -> Result<ReflectedStage> {
    let entry_points = introspector.entry_points(module.code)?;
    let found = entry_points
        .iter()
        .any(|ep| ep.name == module.entry_point && ep.stage == module.stage);
    if !found {
        return Err(Error::EntryPointNotFound {
            entry_point: module.entry_point.clone(),
            stage: module.stage,
        });
    }

    let reflection = introspector.reflect(module)?;
    let mut reflected = ReflectedStage::new(module.stage, module.entry_point.clone());

    for (family, resource) in reflection.resources().descriptors() {
        let shape = reflection.type_shape(resource.id)?;
        reflected.resources.push(ReflectedResource {
            id: resource.id,
            name: resource.name.clone(),
            family,
            set: reflection.decoration(resource.id, Decoration::DescriptorSet)?,
            binding: reflection.decoration(resource.id, Decoration::Binding)?,
            element_count: shape.element_count()?,
            dim: shape.dim,
        });
    }

    if module.stage == ShaderStage::Vertex {
        reflected.stage_inputs = reflect_stage_inputs(reflection.as_ref())?;
    }

    for block in &reflection.resources().push_constant_buffers {
        reflected.push_constants.push(ReflectedPushConstant {
            id: block.id,
            name: block.name.clone(),
            ranges: reflection.active_ranges(block.id)?,
        });
    }

    engine_debug!(
        "galaxy3d::reflect",
        "Reflected {} stage '{}': {} resources, {} inputs, {} push constant blocks",
        reflected.stage,
        reflected.entry_point,
        reflected.resources.len(),
        reflected.stage_inputs.len(),
        reflected.push_constants.len()
    );

    Ok(reflected)
}

fn reflect_stage_inputs(reflection: &dyn StageReflection) -> Result<Vec<ReflectedStageInput>> {
    reflection
        .resources()
        .stage_inputs
        .iter()
        .map(|input| {
            Ok(ReflectedStageInput {
                id: input.id,
                name: input.name.clone(),
                location: reflection.decoration(input.id, Decoration::Location)?,
                binding: reflection.decoration(input.id, Decoration::Binding)?,
                shape: reflection.type_shape(input.id)?,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "reflected_stage_tests.rs"]
mod tests;
