// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Store evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern:
//!
//! 1. **GEOMETRY** / **CONFIG** — Drain the layers whose inputs changed.
//! 2. **Progress** — Recompute from the snapshot if it changed since the last
//!    evaluation; otherwise reuse the stored state.
//! 3. **Offsets** — If progress is active, re-resolve every layer (new
//!    snapshot) or only the drained layers (layer inputs changed). Layers
//!    whose offset actually differs are marked on the **OFFSET** channel.
//!    If progress is inactive, no offset is touched.
//! 4. **OFFSET** — Drain into [`FrameChanges`], alongside the layers created
//!    and destroyed since the previous evaluation.
//!
//! [`FrameChanges`] uses raw slot indices (`u32`) rather than [`LayerId`]
//! handles so that presenters can read offsets via
//! [`offset_at`](super::ParallaxStore::offset_at) without generation checks.
//!
//! [`LayerId`]: super::LayerId

use alloc::vec::Vec;

use super::store::ParallaxStore;
use crate::dirty;
use crate::offset::compute_offset;
use crate::progress::{ProgressState, compute_progress};
use crate::trace::{EvaluateSummary, LayerOffsetEvent, ProgressEvent, Tracer};

/// The set of changes produced by a single [`ParallaxStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Progress state after this evaluation.
    pub progress: ProgressState,
    /// Layers whose offset changed and must be re-applied.
    pub offsets: Vec<u32>,
    /// Layers added since the last evaluate.
    pub added: Vec<u32>,
    /// Layers removed since the last evaluate.
    pub removed: Vec<u32>,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.progress = ProgressState::default();
        self.offsets.clear();
        self.added.clear();
        self.removed.clear();
    }

    /// Returns `true` if nothing needs to be presented.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }
}

impl ParallaxStore {
    /// Evaluates the store, resolving progress and any stale offsets, and
    /// returns the set of changes.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        self.evaluate_with(changes, &mut Tracer::none());
    }

    /// Like [`evaluate`](Self::evaluate), emitting trace events to `tracer`.
    pub fn evaluate_traced(&mut self, tracer: &mut Tracer<'_>) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_with(&mut changes, tracer);
        changes
    }

    fn evaluate_with(&mut self, changes: &mut FrameChanges, tracer: &mut Tracer<'_>) {
        changes.clear();
        self.evaluations += 1;
        let evaluation = self.evaluations;

        // Drain input channels up front; they are consumed even while
        // inactive, since a later activation always comes with a new snapshot.
        let mut stale: Vec<u32> = self
            .dirty
            .drain(dirty::GEOMETRY)
            .deterministic()
            .run()
            .collect();
        stale.extend(self.dirty.drain(dirty::CONFIG).deterministic().run());

        let recomputed = self.snapshot_dirty;
        if recomputed {
            self.progress = compute_progress(&self.snapshot);
            self.snapshot_dirty = false;
        }
        changes.progress = self.progress;
        tracer.progress(&ProgressEvent {
            evaluation,
            scroll_top: self.snapshot.scroll_top(),
            recomputed,
            state: self.progress,
        });

        let mut layers_resolved = 0_u32;
        if let Some(progress) = self.progress.progress() {
            let targets: Vec<u32> = if recomputed {
                self.layers().map(|id| id.idx).collect()
            } else {
                stale.sort_unstable();
                stale.dedup();
                stale.retain(|idx| *idx < self.len && !self.free_list.contains(idx));
                stale
            };

            let container_height = self.snapshot.container_height;
            for idx in targets {
                let slot = idx as usize;
                let resolved =
                    compute_offset(progress, &self.config[slot], self.geometry[slot], container_height);
                layers_resolved += 1;
                let previous = self.offset[slot];
                if resolved != previous {
                    self.offset[slot] = resolved;
                    self.dirty.mark(idx, dirty::OFFSET);
                    tracer.layer_offset(&LayerOffsetEvent {
                        evaluation,
                        layer_index: idx,
                        previous,
                        offset: resolved,
                    });
                }
            }
        }

        changes.offsets = self
            .dirty
            .drain(dirty::OFFSET)
            .deterministic()
            .run()
            .collect();

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);

        tracer.evaluate_summary(&EvaluateSummary {
            evaluation,
            state: self.progress,
            layers_resolved,
            offsets_changed: count(&changes.offsets),
            added: count(&changes.added),
            removed: count(&changes.removed),
        });
    }
}

fn count(indices: &[u32]) -> u32 {
    u32::try_from(indices.len()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;

    use super::*;
    use crate::config::{ContainerConfig, Direction, Distance, LayerConfig};
    use crate::geometry::{GeometrySnapshot, LayerGeometry};
    use crate::progress::InactiveReason;

    /// Container at 1000..1400 in an 800px viewport.
    fn snapshot(scroll_top: f64) -> GeometrySnapshot {
        GeometrySnapshot::new(scroll_top, 800.0, 1000.0, 400.0)
    }

    fn pixels(px: f64, direction: Direction) -> LayerConfig {
        LayerConfig::new(Distance::pixels(px).unwrap(), direction)
    }

    #[test]
    fn evaluate_resolves_offsets_while_active() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let down = store.create_layer(pixels(-200.0, Direction::Down));
        let right = store.create_layer(pixels(80.0, Direction::Right));

        // scrolled = 100 of 400 -> 25%.
        store.set_snapshot(snapshot(1100.0));
        let changes = store.evaluate();

        assert!(changes.progress.is_active());
        assert_eq!(store.offset(down), Vec2::new(0.0, -50.0));
        assert_eq!(store.offset(right), Vec2::new(20.0, 0.0));
        assert_eq!(changes.offsets, &[down.idx, right.idx]);
        assert_eq!(changes.added, &[down.idx, right.idx]);
    }

    #[test]
    fn percentage_layer_uses_measured_height() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let id = store.create_layer(LayerConfig::new(Distance::percent(50.0).unwrap(), Direction::Up));
        store.set_layer_geometry(id, LayerGeometry::new(1000.0));

        // scrolled = 200 of 400 -> 50%.
        store.set_snapshot(snapshot(1200.0));
        let _ = store.evaluate();
        assert_eq!(store.offset(id), Vec2::new(0.0, -150.0));
    }

    #[test]
    fn inactive_leaves_offsets_untouched() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let id = store.create_layer(pixels(100.0, Direction::Down));

        store.set_snapshot(snapshot(1200.0));
        let _ = store.evaluate();
        assert_eq!(store.offset(id), Vec2::new(0.0, 50.0));

        // Scroll back above the container: below threshold.
        store.set_snapshot(snapshot(900.0));
        let changes = store.evaluate();
        assert_eq!(
            changes.progress,
            ProgressState::Inactive(InactiveReason::BelowThreshold)
        );
        assert!(changes.offsets.is_empty());
        assert_eq!(store.offset(id), Vec2::new(0.0, 50.0), "offset frozen");

        // Scroll far past: out of view, still frozen.
        store.set_snapshot(snapshot(5000.0));
        let changes = store.evaluate();
        assert_eq!(
            changes.progress,
            ProgressState::Inactive(InactiveReason::OutOfView)
        );
        assert_eq!(store.offset(id), Vec2::new(0.0, 50.0), "offset frozen");
    }

    #[test]
    fn geometry_change_while_inactive_is_not_applied() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let id = store.create_layer(LayerConfig::default());
        store.set_snapshot(snapshot(0.0));
        let _ = store.evaluate();

        store.set_layer_geometry(id, LayerGeometry::new(2000.0));
        let changes = store.evaluate();
        assert!(changes.offsets.is_empty());
        assert_eq!(store.offset(id), Vec2::ZERO);
    }

    #[test]
    fn layer_change_while_active_resolves_only_that_layer() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let a = store.create_layer(pixels(100.0, Direction::Down));
        let b = store.create_layer(pixels(100.0, Direction::Down));
        store.set_snapshot(snapshot(1200.0));
        let _ = store.evaluate();

        store.set_layer_config(b, pixels(100.0, Direction::Left));
        let changes = store.evaluate();
        assert_eq!(changes.offsets, &[b.idx]);
        assert_eq!(store.offset(a), Vec2::new(0.0, 50.0));
        assert_eq!(store.offset(b), Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn repeated_evaluate_is_idempotent() {
        let mut store = ParallaxStore::new(ContainerConfig::viewport());
        let id = store.create_layer(pixels(300.0, Direction::Up));
        store.set_snapshot(snapshot(1100.0));
        let first = store.evaluate();
        let offset = store.offset(id);

        // Same snapshot again: nothing to present, identical state.
        store.set_snapshot(snapshot(1100.0));
        let second = store.evaluate();
        assert_eq!(first.progress, second.progress);
        assert!(second.is_empty());
        assert_eq!(store.offset(id), offset);
    }

    #[test]
    fn viewport_mode_store() {
        let mut store = ParallaxStore::new(ContainerConfig::viewport());
        let id = store.create_layer(pixels(120.0, Direction::Down));
        // scrolled = 900 of 1200 -> 75%.
        store.set_snapshot(snapshot(1100.0));
        let _ = store.evaluate();
        assert_eq!(store.offset(id), Vec2::new(0.0, 90.0));
    }

    #[test]
    fn container_config_change_re_resolves() {
        let mut store = ParallaxStore::new(ContainerConfig::viewport());
        let id = store.create_layer(pixels(100.0, Direction::Down));
        store.set_snapshot(snapshot(1100.0));
        let _ = store.evaluate();
        assert_eq!(store.offset(id), Vec2::new(0.0, 75.0));

        store.set_container_config(ContainerConfig::threshold(0.0));
        let changes = store.evaluate();
        assert_eq!(changes.offsets, &[id.idx]);
        assert_eq!(store.offset(id), Vec2::new(0.0, 25.0));
    }

    #[test]
    fn added_and_removed_lifecycle() {
        let mut store = ParallaxStore::default();
        let id = store.create_layer(LayerConfig::default());

        let changes = store.evaluate();
        assert!(changes.added.contains(&id.idx));
        assert!(changes.removed.is_empty());

        let changes = store.evaluate();
        assert!(changes.added.is_empty());
        assert!(changes.removed.is_empty());

        store.destroy_layer(id);
        let changes = store.evaluate();
        assert!(changes.removed.contains(&id.idx));
        assert!(changes.added.is_empty());
    }

    #[test]
    fn layer_created_and_destroyed_in_one_cycle() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        store.set_snapshot(snapshot(1200.0));
        let id = store.create_layer(pixels(100.0, Direction::Down));
        store.destroy_layer(id);

        let changes = store.evaluate();
        assert_eq!(changes.added, &[id.idx]);
        assert_eq!(changes.removed, &[id.idx]);
        assert!(changes.offsets.is_empty());

        assert!(store.evaluate().is_empty());
    }

    #[test]
    fn identical_config_is_not_re_reported() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let config = LayerConfig::parse(Some("-200"), Some("down")).unwrap();
        let id = store.create_layer(config);
        store.set_snapshot(snapshot(1100.0));
        let _ = store.evaluate();
        assert_eq!(store.offset(id), Vec2::new(0.0, -50.0));

        for _ in 0..3 {
            store.set_layer_config(id, config);
            store.set_snapshot(snapshot(1100.0));
            assert!(store.evaluate().is_empty());
        }
    }

    #[test]
    fn destroyed_layer_is_not_resolved() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let keep = store.create_layer(pixels(100.0, Direction::Down));
        let gone = store.create_layer(pixels(100.0, Direction::Down));
        store.set_snapshot(snapshot(1200.0));
        store.destroy_layer(gone);

        let changes = store.evaluate();
        assert_eq!(changes.offsets, &[keep.idx]);
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let a = store.create_layer(pixels(100.0, Direction::Down));
        let b = store.create_layer(pixels(100.0, Direction::Down));
        store.set_snapshot(snapshot(1100.0));

        let mut changes = FrameChanges::default();
        store.evaluate_into(&mut changes);
        assert_eq!(changes.added.len(), 2);

        store.set_layer_config(a, pixels(40.0, Direction::Down));
        store.evaluate_into(&mut changes);

        assert!(changes.added.is_empty(), "added should be cleared");
        assert!(
            changes.offsets.contains(&a.idx),
            "offset change should be present"
        );
        assert!(
            !changes.offsets.contains(&b.idx),
            "unchanged layer should not appear"
        );
    }

    #[test]
    fn evaluations_are_counted() {
        let mut store = ParallaxStore::default();
        let _ = store.evaluate();
        let _ = store.evaluate_traced(&mut Tracer::none());
        assert_eq!(store.evaluations(), 2);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn traced_evaluate_reports_changed_layers() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Recording {
            offsets: Vec<u32>,
            summaries: Vec<(u32, u32)>,
        }
        impl TraceSink for Recording {
            fn on_layer_offset(&mut self, e: &LayerOffsetEvent) {
                self.offsets.push(e.layer_index);
            }
            fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
                self.summaries.push((s.layers_resolved, s.offsets_changed));
            }
        }

        let mut store = ParallaxStore::new(ContainerConfig::threshold(0.0));
        let id = store.create_layer(pixels(100.0, Direction::Down));
        store.set_snapshot(snapshot(1100.0));

        let mut sink = Recording::default();
        let mut tracer = Tracer::new(&mut sink);
        let _ = store.evaluate_traced(&mut tracer);
        drop(tracer);

        assert_eq!(sink.offsets, &[id.idx]);
        assert_eq!(sink.summaries, &[(1, 1)]);
    }
}
