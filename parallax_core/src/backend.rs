// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for host integrations.
//!
//! The core never reads layout or writes styles itself. A backend provides
//! two pieces:
//!
//! - **Measurement** — Implements [`GeometrySource`] to report the scroll
//!   offset, viewport, container, and per-layer geometry from one layout
//!   pass.
//! - **Presentation** — Implements [`Presenter`] to apply changed offsets to
//!   the host's elements (e.g. as CSS transforms on DOM nodes).
//!
//! Event wiring (which notifications trigger an update, and whether they are
//! throttled) is backend-specific and not abstracted by a trait.

use crate::geometry::{GeometrySnapshot, LayerGeometry};
use crate::layer::{FrameChanges, ParallaxStore};

/// Supplies geometry measured from the host's current layout.
///
/// Implementations must report the snapshot and every layer's geometry from
/// the same layout pass; the core does not check cross-consistency.
pub trait GeometrySource {
    /// Measures the scroll offset, viewport, and container.
    ///
    /// The top threshold of the returned snapshot is ignored by
    /// [`ParallaxStore::measure`], which applies the container's own
    /// configuration.
    fn snapshot(&self) -> GeometrySnapshot;

    /// Measures the layer at raw slot `idx`, or `None` if the host has no
    /// element for it.
    fn layer_geometry(&self, idx: u32) -> Option<LayerGeometry>;
}

/// Applies evaluated offsets to a host presentation tree.
///
/// DOM-based presenters and test doubles both implement this trait.
///
/// # Update pseudocode
///
/// A typical scroll or resize handler wires the pieces together like this:
///
/// ```rust,ignore
/// fn on_scroll() {
///     // Measure: read layout once for the container and all layers
///     store.measure(&source);
///
///     // Evaluate: resolve progress and stale offsets
///     let changes = store.evaluate();
///
///     // Present: write only the offsets that changed
///     presenter.apply(&store, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`FrameChanges`] to the backing presentation tree,
    /// reading current offsets from `store` as needed.
    fn apply(&mut self, store: &ParallaxStore, changes: &FrameChanges);
}
