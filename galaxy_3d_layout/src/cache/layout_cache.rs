/// Per-device layout cache
///
/// Memoizes assembled and realized layouts per (device, stage set). The
/// device map is guarded by an `RwLock`, each device table by a `Mutex`
/// held only for the slot lookup, and each slot by its own `Mutex` held
/// during assembly and realization. Concurrent first requests for one key
/// therefore realize exactly once, while other keys and cache hits are
/// never blocked behind a realization.
///
/// `StageSetKey` only buckets slots. Each slot keeps an owned copy of the
/// modules it was built from and a lookup must match them exactly, so two
/// stage sets whose hashes collide never share a layout.

use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, RwLock};
use rustc_hash::{FxHashMap, FxHasher};

use crate::cache::{DeviceKey, LayoutRealizer, RealizedLayout};
use crate::error::{Error, Result};
use crate::layout::{
    DescriptorCountTotals, LayoutConfig, PipelineLayoutDescriptor, ShaderStage, ShaderStageModule,
};
use crate::reflect::{LayoutAssembler, ShaderIntrospector};
use crate::{engine_err, engine_info, engine_trace, engine_warn};

fn stage_ordered<'m, 'a>(modules: &'m [ShaderStageModule<'a>]) -> Vec<&'m ShaderStageModule<'a>> {
    let mut ordered: Vec<&ShaderStageModule<'a>> = modules.iter().collect();
    ordered.sort_by_key(|m| m.stage);
    ordered
}

/// Identity of an exact stage set: stage tags, entry points and bytecode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageSetKey(pub u64);

impl StageSetKey {
    /// Hash a stage set; module order does not matter
    pub fn from_modules(modules: &[ShaderStageModule<'_>]) -> Self {
        let ordered = stage_ordered(modules);

        let mut hasher = FxHasher::default();
        ordered.len().hash(&mut hasher);
        for module in ordered {
            module.stage.hash(&mut hasher);
            module.entry_point.hash(&mut hasher);
            module.code.hash(&mut hasher);
        }
        StageSetKey(hasher.finish())
    }
}

/// One cache entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedLayout {
    pub key: StageSetKey,
    pub layout: PipelineLayoutDescriptor,
    pub descriptor_counts: DescriptorCountTotals,
    pub realized: RealizedLayout,
}

/// Owned copy of one module of a stage set
#[derive(Debug)]
struct ModuleIdentity {
    stage: ShaderStage,
    entry_point: String,
    code: Vec<u32>,
}

/// Entry of a device table, filled once realized
struct Slot {
    /// Stage-ordered modules the slot was created for
    identity: Vec<ModuleIdentity>,
    cached: Mutex<Option<Arc<CachedLayout>>>,
}

impl Slot {
    fn new(modules: &[ShaderStageModule<'_>]) -> Self {
        let identity = stage_ordered(modules)
            .into_iter()
            .map(|m| ModuleIdentity {
                stage: m.stage,
                entry_point: m.entry_point.clone(),
                code: m.code.to_vec(),
            })
            .collect();
        Self {
            identity,
            cached: Mutex::new(None),
        }
    }

    fn matches(&self, modules: &[ShaderStageModule<'_>]) -> bool {
        let ordered = stage_ordered(modules);
        self.identity.len() == ordered.len()
            && self.identity.iter().zip(ordered).all(|(id, m)| {
                id.stage == m.stage && id.entry_point == m.entry_point && id.code == m.code
            })
    }

    fn cached(&self) -> Option<Arc<CachedLayout>> {
        self.cached.lock().ok().and_then(|c| c.clone())
    }
}

#[derive(Default)]
struct DeviceTable {
    /// Slots bucketed by hash; a bucket holds more than one slot only on collision
    entries: Mutex<FxHashMap<StageSetKey, Vec<Arc<Slot>>>>,
}

impl DeviceTable {
    /// Slot holding exactly `modules`, created on first use
    fn slot(&self, key: StageSetKey, modules: &[ShaderStageModule<'_>]) -> Result<Arc<Slot>> {
        let mut entries = self.entries.lock().map_err(|_| poisoned("device table"))?;
        let bucket = entries.entry(key).or_default();
        if let Some(slot) = bucket.iter().find(|slot| slot.matches(modules)) {
            return Ok(Arc::clone(slot));
        }
        if !bucket.is_empty() {
            engine_warn!(
                "galaxy3d::cache",
                "Stage set hash collision on {:?}; keeping {} distinct entries",
                key,
                bucket.len() + 1
            );
        }
        let slot = Arc::new(Slot::new(modules));
        bucket.push(Arc::clone(&slot));
        Ok(slot)
    }

    fn filled(&self) -> Vec<Arc<CachedLayout>> {
        let Ok(entries) = self.entries.lock() else {
            return Vec::new();
        };
        entries.values().flatten().filter_map(|slot| slot.cached()).collect()
    }
}

fn poisoned(what: &str) -> Error {
    Error::BackendError(format!("Layout cache {} lock poisoned", what))
}

/// Layout cache shared by every pipeline builder of the application
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use galaxy_3d_layout::galaxy3d::cache::{LayoutCache, LayoutRealizer};
/// use galaxy_3d_layout::galaxy3d::layout::{LayoutConfig, ShaderStageModule};
/// use galaxy_3d_layout::galaxy3d::reflect::ShaderIntrospector;
///
/// # fn run(introspector: Arc<dyn ShaderIntrospector>, realizer: &dyn LayoutRealizer,
/// #        modules: &[ShaderStageModule<'_>]) -> galaxy_3d_layout::galaxy3d::Result<()> {
/// let cache = LayoutCache::new(introspector, LayoutConfig::default());
/// let entry = cache.get_or_build(realizer, modules)?;
/// println!("pipeline layout {:#x}", entry.realized.pipeline_layout);
/// cache.teardown_device(realizer)?;
/// # Ok(())
/// # }
/// ```
pub struct LayoutCache {
    assembler: LayoutAssembler,
    introspector: Arc<dyn ShaderIntrospector>,
    devices: RwLock<FxHashMap<DeviceKey, Arc<DeviceTable>>>,
}

impl LayoutCache {
    pub fn new(introspector: Arc<dyn ShaderIntrospector>, config: LayoutConfig) -> Self {
        Self {
            assembler: LayoutAssembler::new(config),
            introspector,
            devices: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn assembler(&self) -> &LayoutAssembler {
        &self.assembler
    }

    /// Return the cached layout of a stage set, assembling and realizing it
    /// on the realizer's device the first time
    ///
    /// A failed assembly or realization stores nothing; the next call for
    /// the same key tries again.
    pub fn get_or_build(
        &self,
        realizer: &dyn LayoutRealizer,
        modules: &[ShaderStageModule<'_>],
    ) -> Result<Arc<CachedLayout>> {
        let device_key = realizer.device_key();
        let key = StageSetKey::from_modules(modules);
        let table = self.table_for(device_key)?;

        let slot = table.slot(key, modules)?;

        let mut guard = slot.cached.lock().map_err(|_| poisoned("entry"))?;
        if let Some(cached) = guard.as_ref() {
            engine_trace!("galaxy3d::cache", "Cache hit for {:?} on {:?}", key, device_key);
            return Ok(Arc::clone(cached));
        }

        let assembled = self.assembler.assemble(self.introspector.as_ref(), modules)?;
        let realized = realizer.realize(&assembled.layout)?;

        // The table must still be registered when the entry is stored, or
        // teardown_device() has already drained it and would never see it
        let devices = match self.devices.read() {
            Ok(devices) => devices,
            Err(_) => {
                realizer.destroy(&realized);
                return Err(poisoned("device map"));
            }
        };
        let registered = devices
            .get(&device_key)
            .map_or(false, |current| Arc::ptr_eq(current, &table));
        if !registered {
            drop(devices);
            realizer.destroy(&realized);
            return Err(engine_err!(
                "galaxy3d::cache",
                "Device {:?} was torn down while realizing {:?}",
                device_key,
                key
            ));
        }

        engine_info!(
            "galaxy3d::cache",
            "Realized layout {:?} on {:?} ({} set layouts)",
            key,
            device_key,
            realized.set_layouts.len()
        );

        let cached = Arc::new(CachedLayout {
            key,
            layout: assembled.layout,
            descriptor_counts: assembled.descriptor_counts,
            realized,
        });
        *guard = Some(Arc::clone(&cached));
        drop(devices);
        Ok(cached)
    }

    /// Cached layout for (device, key) without building it
    ///
    /// Should `key` hold several colliding stage sets, the first realized
    /// one is returned.
    pub fn get(&self, device_key: DeviceKey, key: StageSetKey) -> Result<Option<Arc<CachedLayout>>> {
        let table = {
            let devices = self.devices.read().map_err(|_| poisoned("device map"))?;
            match devices.get(&device_key) {
                Some(table) => Arc::clone(table),
                None => return Ok(None),
            }
        };
        let bucket: Vec<Arc<Slot>> = {
            let entries = table.entries.lock().map_err(|_| poisoned("device table"))?;
            match entries.get(&key) {
                Some(bucket) => bucket.clone(),
                None => return Ok(None),
            }
        };
        for slot in bucket {
            let guard = slot.cached.lock().map_err(|_| poisoned("entry"))?;
            if let Some(cached) = guard.as_ref() {
                return Ok(Some(Arc::clone(cached)));
            }
        }
        Ok(None)
    }

    /// Number of realized entries across all devices
    pub fn len(&self) -> usize {
        // Slots are locked only after the device map is released
        let tables: Vec<Arc<DeviceTable>> = match self.devices.read() {
            Ok(devices) => devices.values().cloned().collect(),
            Err(_) => return 0,
        };
        tables.iter().map(|t| t.filled().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of devices with a table
    pub fn device_count(&self) -> usize {
        self.devices.read().map(|d| d.len()).unwrap_or(0)
    }

    /// Destroy every entry realized on the realizer's device and drop its table
    ///
    /// Returns the number of destroyed entries.
    pub fn teardown_device(&self, realizer: &dyn LayoutRealizer) -> Result<usize> {
        let device_key = realizer.device_key();
        let table = {
            let mut devices = self.devices.write().map_err(|_| poisoned("device map"))?;
            devices.remove(&device_key)
        };
        let Some(table) = table else {
            return Ok(0);
        };

        let slots: Vec<Arc<Slot>> = {
            let mut entries = table.entries.lock().map_err(|_| poisoned("device table"))?;
            entries.drain().flat_map(|(_, bucket)| bucket).collect()
        };

        let mut destroyed = 0;
        for slot in slots {
            let mut guard = slot.cached.lock().map_err(|_| poisoned("entry"))?;
            if let Some(cached) = guard.take() {
                realizer.destroy(&cached.realized);
                destroyed += 1;
            }
        }

        engine_info!(
            "galaxy3d::cache",
            "Tore down {:?}: {} layouts destroyed",
            device_key,
            destroyed
        );
        Ok(destroyed)
    }

    /// Tear down every listed device; returns the total destroyed
    pub fn clear(&self, realizers: &[&dyn LayoutRealizer]) -> Result<usize> {
        let mut destroyed = 0;
        for realizer in realizers {
            destroyed += self.teardown_device(*realizer)?;
        }
        Ok(destroyed)
    }

    fn table_for(&self, device_key: DeviceKey) -> Result<Arc<DeviceTable>> {
        {
            let devices = self.devices.read().map_err(|_| poisoned("device map"))?;
            if let Some(table) = devices.get(&device_key) {
                return Ok(Arc::clone(table));
            }
        }
        let mut devices = self.devices.write().map_err(|_| poisoned("device map"))?;
        Ok(Arc::clone(devices.entry(device_key).or_default()))
    }
}

impl Drop for LayoutCache {
    fn drop(&mut self) {
        let Ok(devices) = self.devices.get_mut() else {
            return;
        };
        for (device_key, table) in devices.iter() {
            let remaining = table.filled().len();
            if remaining > 0 {
                engine_warn!(
                    "galaxy3d::cache",
                    "Layout cache dropped with {} realized layouts on {:?}; call teardown_device() first",
                    remaining,
                    device_key
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "layout_cache_tests.rs"]
mod tests;
