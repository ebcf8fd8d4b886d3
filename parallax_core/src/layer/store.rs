// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation and property management.

use alloc::vec::Vec;

use kurbo::Vec2;
use understory_dirty::{CycleHandling, DirtyTracker};

use crate::backend::GeometrySource;
use crate::config::{ContainerConfig, LayerConfig};
use crate::dirty;
use crate::geometry::{GeometrySnapshot, LayerGeometry};
use crate::progress::ProgressState;

use super::id::LayerId;
use super::traverse::Layers;

/// Struct-of-arrays storage for the layers of one container.
///
/// Layers are addressed by [`LayerId`] handles. Internally, each layer occupies
/// a slot in parallel arrays. Destroyed layers are recycled via a free list,
/// and generation counters prevent stale handle access.
///
/// Inputs (configuration, layer geometry, the geometry snapshot) are set by
/// the caller; offsets are computed by
/// [`evaluate`](Self::evaluate). While the container is inactive, evaluation
/// leaves every stored offset untouched.
#[derive(Debug)]
pub struct ParallaxStore {
    // -- Container --
    pub(crate) container: ContainerConfig,
    pub(crate) snapshot: GeometrySnapshot,
    pub(crate) snapshot_dirty: bool,
    pub(crate) progress: ProgressState,
    pub(crate) evaluations: u64,

    // -- Layer inputs (set by callers) --
    pub(crate) config: Vec<LayerConfig>,
    pub(crate) geometry: Vec<LayerGeometry>,

    // -- Computed (written by evaluate) --
    pub(crate) offset: Vec<Vec2>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for ParallaxStore {
    fn default() -> Self {
        Self::new(ContainerConfig::default())
    }
}

impl ParallaxStore {
    /// Creates an empty store for a container with the given configuration.
    #[must_use]
    pub fn new(container: ContainerConfig) -> Self {
        Self {
            container,
            snapshot: GeometrySnapshot::default().with_top_threshold(container.top),
            snapshot_dirty: true,
            progress: ProgressState::default(),
            evaluations: 0,
            config: Vec::new(),
            geometry: Vec::new(),
            offset: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new layer and returns its handle.
    ///
    /// The layer starts with zero geometry and a zero offset.
    pub fn create_layer(&mut self, config: LayerConfig) -> LayerId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.config[idx as usize] = config;
            self.geometry[idx as usize] = LayerGeometry::default();
            self.offset[idx as usize] = Vec2::ZERO;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.config.push(config);
            self.geometry.push(LayerGeometry::default());
            self.offset.push(Vec2::ZERO);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::CONFIG);

        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of live layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    /// Returns `true` if the store holds no live layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over all live layers in slot order.
    #[must_use]
    pub fn layers(&self) -> Layers<'_> {
        Layers::new(self)
    }

    // -- Container API --

    /// Returns the container configuration.
    #[must_use]
    pub fn container_config(&self) -> ContainerConfig {
        self.container
    }

    /// Replaces the container configuration.
    ///
    /// Every layer is re-resolved on the next evaluation.
    pub fn set_container_config(&mut self, container: ContainerConfig) {
        if self.container == container {
            return;
        }
        self.container = container;
        self.snapshot = self.snapshot.with_top_threshold(container.top);
        self.snapshot_dirty = true;
    }

    /// Sets the geometry snapshot for the next evaluation.
    ///
    /// The snapshot's `top_threshold` is replaced by the container's
    /// configured threshold.
    pub fn set_snapshot(&mut self, snapshot: GeometrySnapshot) {
        let snapshot = snapshot.with_top_threshold(self.container.top);
        if self.snapshot != snapshot {
            self.snapshot = snapshot;
            self.snapshot_dirty = true;
        }
    }

    /// Returns the current geometry snapshot.
    #[must_use]
    pub fn snapshot(&self) -> GeometrySnapshot {
        self.snapshot
    }

    /// Returns the progress computed by the most recent evaluation.
    #[must_use]
    pub fn progress(&self) -> ProgressState {
        self.progress
    }

    /// Returns how many times [`evaluate`](Self::evaluate) has run.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Pulls a full measurement from `source`: the geometry snapshot plus the
    /// geometry of every live layer the source can measure.
    pub fn measure<S: GeometrySource + ?Sized>(&mut self, source: &S) {
        self.set_snapshot(source.snapshot());
        for idx in 0..self.len {
            if self.free_list.contains(&idx) {
                continue;
            }
            if let Some(geometry) = source.layer_geometry(idx) {
                self.set_geometry_at(idx, geometry);
            }
        }
    }

    // -- Layer property API (auto-marks dirty) --

    /// Sets the configuration of a layer.
    pub fn set_layer_config(&mut self, id: LayerId, config: LayerConfig) {
        self.validate(id);
        if self.config[id.idx as usize] != config {
            self.config[id.idx as usize] = config;
            self.dirty.mark(id.idx, dirty::CONFIG);
        }
    }

    /// Sets the measured geometry of a layer.
    pub fn set_layer_geometry(&mut self, id: LayerId, geometry: LayerGeometry) {
        self.validate(id);
        self.set_geometry_at(id.idx, geometry);
    }

    // -- Property getters --

    /// Returns the configuration of a layer.
    #[must_use]
    pub fn layer_config(&self, id: LayerId) -> LayerConfig {
        self.validate(id);
        self.config[id.idx as usize]
    }

    /// Returns the measured geometry of a layer.
    #[must_use]
    pub fn layer_geometry(&self, id: LayerId) -> LayerGeometry {
        self.validate(id);
        self.geometry[id.idx as usize]
    }

    /// Returns the resolved offset of a layer.
    ///
    /// Only meaningful after [`evaluate`](Self::evaluate); holds the last
    /// offset computed while the container was active.
    #[must_use]
    pub fn offset(&self, id: LayerId) -> Vec2 {
        self.validate(id);
        self.offset[id.idx as usize]
    }

    // -- Raw-index accessors for backends --
    //
    // These accept raw slot indices (as found in `FrameChanges`) rather than
    // `LayerId` handles, skipping generation validation.

    /// Returns the resolved offset at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn offset_at(&self, idx: u32) -> Vec2 {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.offset[idx as usize]
    }

    /// Returns the configuration at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn layer_config_at(&self, idx: u32) -> LayerConfig {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
        self.config[idx as usize]
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn set_geometry_at(&mut self, idx: u32, geometry: LayerGeometry) {
        if self.geometry[idx as usize] != geometry {
            self.geometry[idx as usize] = geometry;
            self.dirty.mark(idx, dirty::GEOMETRY);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::config::{Direction, Distance};

    #[test]
    fn create_and_destroy() {
        let mut store = ParallaxStore::default();
        let id = store.create_layer(LayerConfig::default());
        assert!(store.is_alive(id));
        assert_eq!(store.len(), 1);
        store.destroy_layer(id);
        assert!(!store.is_alive(id));
        assert!(store.is_empty());
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut store = ParallaxStore::default();
        let id1 = store.create_layer(LayerConfig::default());
        store.destroy_layer(id1);
        let id2 = store.create_layer(LayerConfig::default());
        // id2 reuses the same slot but has a different generation.
        assert!(!store.is_alive(id1));
        assert!(store.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn reused_slot_starts_fresh() {
        let mut store = ParallaxStore::default();
        let id1 = store.create_layer(LayerConfig::default());
        store.set_layer_geometry(id1, LayerGeometry::new(900.0));
        store.destroy_layer(id1);

        let config = LayerConfig::new(Distance::pixels(10.0).unwrap(), Direction::Up);
        let id2 = store.create_layer(config);
        assert_eq!(store.layer_config(id2), config);
        assert_eq!(store.layer_geometry(id2), LayerGeometry::default());
        assert_eq!(store.offset(id2), Vec2::ZERO);
    }

    #[test]
    fn layers_skips_destroyed() {
        let mut store = ParallaxStore::default();
        let a = store.create_layer(LayerConfig::default());
        let b = store.create_layer(LayerConfig::default());
        let c = store.create_layer(LayerConfig::default());
        store.destroy_layer(b);

        let live: Vec<_> = store.layers().collect();
        assert_eq!(live, vec![a, c]);
    }

    #[test]
    fn snapshot_takes_container_threshold() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(120.0));
        store.set_snapshot(GeometrySnapshot::new(10.0, 800.0, 0.0, 400.0));
        assert_eq!(store.snapshot().top_threshold, Some(120.0));

        store.set_container_config(ContainerConfig::viewport());
        assert_eq!(store.snapshot().top_threshold, None);
    }

    #[test]
    fn snapshot_scroll_is_clamped() {
        let mut store = ParallaxStore::default();
        store.set_snapshot(GeometrySnapshot::new(-12.0, 800.0, 0.0, 400.0));
        assert_eq!(store.snapshot().scroll_top(), 0.0);
    }

    #[test]
    fn config_round_trips() {
        let mut store = ParallaxStore::default();
        let id = store.create_layer(LayerConfig::default());
        let config = LayerConfig::new(Distance::percent(-30.0).unwrap(), Direction::Left);
        store.set_layer_config(id, config);
        assert_eq!(store.layer_config(id), config);
        assert_eq!(store.layer_config_at(id.index()), config);
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_offset() {
        let mut store = ParallaxStore::default();
        let id = store.create_layer(LayerConfig::default());
        store.destroy_layer(id);
        let _ = store.offset(id);
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_set_geometry() {
        let mut store = ParallaxStore::default();
        let id = store.create_layer(LayerConfig::default());
        store.destroy_layer(id);
        store.set_layer_geometry(id, LayerGeometry::new(10.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn offset_at_out_of_range_panics() {
        let store = ParallaxStore::default();
        let _ = store.offset_at(3);
    }
}
