/// Cross-stage push constant range merge

use crate::error::{Error, Result};
use crate::engine_trace;
use crate::layout::{PushConstantRangeDescriptor, ShaderStage};
use crate::reflect::{BufferRange, ReflectedStage};

/// Accumulates push constant ranges sorted by offset
///
/// Ranges merge only on exact (offset, size) identity. Partially overlapping
/// ranges are kept apart and rejected by `finish()`. Empty ranges cover no
/// bytes and are dropped.
#[derive(Debug, Default)]
pub struct PushConstantMerger {
    ranges: Vec<PushConstantRangeDescriptor>,
}

impl PushConstantMerger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, stage: ShaderStage, range: BufferRange) {
        if range.size == 0 {
            engine_trace!(
                "galaxy3d::reflect",
                "Empty push constant range at {} ignored for {} stage",
                range.offset,
                stage
            );
            return;
        }

        if let Some(existing) = self
            .ranges
            .iter_mut()
            .find(|r| r.offset == range.offset && r.size == range.size)
        {
            existing.stages |= stage.flag();
            return;
        }

        let index = self.ranges.partition_point(|r| r.offset <= range.offset);
        self.ranges.insert(index, PushConstantRangeDescriptor {
            offset: range.offset,
            size: range.size,
            stages: stage.flag(),
        });
        engine_trace!(
            "galaxy3d::reflect",
            "Push constant range [{}, {}) added by {} stage",
            range.offset,
            range.offset as u64 + range.size as u64,
            stage
        );
    }

    /// Merge every active range of every push constant block of a stage
    pub fn add_stage(&mut self, reflected: &ReflectedStage) {
        for block in &reflected.push_constants {
            for range in &block.ranges {
                self.add(reflected.stage, *range);
            }
        }
    }

    /// Sorted ranges, or `PushConstantOverlap` for the first colliding pair
    pub fn finish(self) -> Result<Vec<PushConstantRangeDescriptor>> {
        for pair in self.ranges.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            if first.end() > second.offset as u64 {
                return Err(Error::PushConstantOverlap {
                    first: (first.offset, first.size),
                    second: (second.offset, second.size),
                });
            }
        }
        Ok(self.ranges)
    }
}

#[cfg(test)]
#[path = "push_constant_merger_tests.rs"]
mod tests;
