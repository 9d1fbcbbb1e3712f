/// Mock realizer for unit tests (no GPU required)
///
/// Hands out sequential fake handles, counts realizations and records
/// destroyed pipeline layouts.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::cache::{DeviceKey, LayoutRealizer, RealizedLayout};
use crate::engine_bail;
use crate::error::Result;
use crate::layout::PipelineLayoutDescriptor;

pub struct MockRealizer {
    device: DeviceKey,
    next_handle: AtomicU64,
    realize_calls: AtomicUsize,
    fail_next: AtomicUsize,
    pub destroyed: Mutex<Vec<u64>>,
}

impl MockRealizer {
    pub fn new(device: u64) -> Self {
        Self {
            device: DeviceKey(device),
            next_handle: AtomicU64::new(1),
            realize_calls: AtomicUsize::new(0),
            fail_next: AtomicUsize::new(0),
            destroyed: Mutex::new(Vec::new()),
        }
    }

    /// Make the next `count` realizations fail
    pub fn fail_next(&self, count: usize) {
        self.fail_next.store(count, Ordering::SeqCst);
    }

    pub fn realize_calls(&self) -> usize {
        self.realize_calls.load(Ordering::SeqCst)
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed.lock().unwrap().len()
    }

    fn handle(&self) -> u64 {
        self.next_handle.fetch_add(1, Ordering::SeqCst)
    }
}

impl LayoutRealizer for MockRealizer {
    fn device_key(&self) -> DeviceKey {
        self.device
    }

    fn realize(&self, layout: &PipelineLayoutDescriptor) -> Result<RealizedLayout> {
        self.realize_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            engine_bail!("galaxy3d::mock", "Mock realization failure");
        }

        let set_layouts = layout.descriptor_sets.iter().map(|_| self.handle()).collect();
        Ok(RealizedLayout {
            set_layouts,
            pipeline_layout: self.handle(),
        })
    }

    fn destroy(&self, realized: &RealizedLayout) {
        self.destroyed.lock().unwrap().push(realized.pipeline_layout);
    }
}
