/// Cross-stage descriptor binding merge

use crate::error::{Error, Result};
use crate::engine_trace;
use crate::layout::{
    BindingShape, DescriptorBindingDescriptor, DescriptorSetDescriptor, ShaderStage,
    MAX_DESCRIPTOR_SETS,
};
use crate::reflect::{classify_resource, ReflectedResource, ReflectedStage};

/// Accumulates descriptor bindings of every stage into dense, sorted sets
///
/// A (set, binding) slot declared by several stages keeps one entry whose
/// stage mask is the OR of the declaring stages. Redeclaring a slot with a
/// different category or element count is a `BindingConflict`.
#[derive(Debug, Default)]
pub struct BindingMerger {
    /// Index `i` holds the bindings of set `i`, ascending by binding index
    sets: Vec<Vec<DescriptorBindingDescriptor>>,
}

impl BindingMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one resource declared by `stage`
    pub fn add(&mut self, stage: ShaderStage, resource: &ReflectedResource) -> Result<()> {
        let category = classify_resource(stage, resource)?;
        let incoming = BindingShape {
            category,
            count: resource.element_count,
        };

        if resource.set >= MAX_DESCRIPTOR_SETS {
            return Err(Error::SetIndexOutOfRange {
                stage,
                name: resource.name.clone(),
                set: resource.set,
            });
        }

        let set_index = resource.set as usize;
        if self.sets.len() <= set_index {
            self.sets.resize_with(set_index + 1, Vec::new);
        }
        let bindings = &mut self.sets[set_index];

        match bindings.binary_search_by_key(&resource.binding, |b| b.binding) {
            Ok(index) => {
                let existing = &mut bindings[index];
                if existing.shape() != incoming {
                    return Err(Error::BindingConflict {
                        set: resource.set,
                        binding: resource.binding,
                        existing: existing.shape(),
                        incoming,
                    });
                }
                existing.stages |= stage.flag();
                engine_trace!(
                    "galaxy3d::reflect",
                    "Binding set={} binding={} shared with {} stage ({})",
                    resource.set,
                    resource.binding,
                    stage,
                    incoming
                );
            }
            Err(index) => {
                bindings.insert(index, DescriptorBindingDescriptor {
                    set: resource.set,
                    binding: resource.binding,
                    category,
                    count: resource.element_count,
                    stages: stage.flag(),
                });
                engine_trace!(
                    "galaxy3d::reflect",
                    "Binding set={} binding={} '{}' added by {} stage ({})",
                    resource.set,
                    resource.binding,
                    resource.name,
                    stage,
                    incoming
                );
            }
        }

        Ok(())
    }

    /// Merge every descriptor resource of a reflected stage
    pub fn add_stage(&mut self, reflected: &ReflectedStage) -> Result<()> {
        for resource in &reflected.resources {
            self.add(reflected.stage, resource)?;
        }
        Ok(())
    }

    /// Number of sets seen so far (highest set index + 1)
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    pub fn finish(self) -> Vec<DescriptorSetDescriptor> {
        self.sets
            .into_iter()
            .enumerate()
            .map(|(index, bindings)| DescriptorSetDescriptor {
                set: index as u32,
                bindings,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "binding_merger_tests.rs"]
mod tests;
