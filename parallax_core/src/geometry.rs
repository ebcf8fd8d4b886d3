// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-cycle geometry inputs.
//!
//! A [`GeometrySnapshot`] captures the scroll position, the viewport, and the
//! container's placement as measured in one layout pass. [`LayerGeometry`]
//! carries the per-layer measurement that percentage distances depend on.
//! Neither type is retained between cycles by the pure functions in
//! [`progress`](crate::progress) and [`offset`](crate::offset).

/// Scroll, viewport, and container measurements for a single update.
///
/// All values share the same unit (typically CSS pixels). The scroll offset is
/// clamped to be non-negative on construction, since some platforms report
/// negative values while rubber-band overscrolling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometrySnapshot {
    /// Current vertical scroll offset of the viewport, always `>= 0`.
    pub(crate) scroll_top: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Offset of the container's top edge from the document origin.
    pub container_top: f64,
    /// Rendered height of the container.
    pub container_height: f64,
    /// Configured activation offset.
    ///
    /// `Some(0.0)` is a valid threshold and selects threshold mode; `None`
    /// selects viewport mode.
    pub top_threshold: Option<f64>,
}

impl GeometrySnapshot {
    /// Creates a snapshot in viewport mode (no top threshold).
    ///
    /// Negative `scroll_top` values are clamped to zero.
    #[must_use]
    pub fn new(
        scroll_top: f64,
        viewport_height: f64,
        container_top: f64,
        container_height: f64,
    ) -> Self {
        Self {
            scroll_top: clamp_scroll_top(scroll_top),
            viewport_height,
            container_top,
            container_height,
            top_threshold: None,
        }
    }

    /// Returns a copy with the given top threshold.
    #[inline]
    #[must_use]
    pub const fn with_top_threshold(mut self, top_threshold: Option<f64>) -> Self {
        self.top_threshold = top_threshold;
        self
    }

    /// Returns a copy with a new raw scroll offset (clamped to `>= 0`).
    #[inline]
    #[must_use]
    pub fn with_scroll_top(mut self, scroll_top: f64) -> Self {
        self.scroll_top = clamp_scroll_top(scroll_top);
        self
    }

    /// The resolved (clamped) scroll offset.
    #[inline]
    #[must_use]
    pub const fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Offset of the container's bottom edge from the document origin.
    #[inline]
    #[must_use]
    pub fn container_bottom(&self) -> f64 {
        self.container_top + self.container_height
    }
}

impl Default for GeometrySnapshot {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Per-layer measurements supplied alongside a [`GeometrySnapshot`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerGeometry {
    /// Rendered height of the layer element.
    ///
    /// Only read when the layer's distance is a percentage.
    pub layer_height: f64,
}

impl LayerGeometry {
    /// Creates layer geometry with the given rendered height.
    #[inline]
    #[must_use]
    pub const fn new(layer_height: f64) -> Self {
        Self { layer_height }
    }
}

/// Resolves a raw platform scroll offset to the value used in all
/// computations.
///
/// Negative values and NaN resolve to `0.0`.
#[inline]
#[must_use]
pub fn clamp_scroll_top(raw: f64) -> f64 {
    if raw >= 0.0 { raw } else { 0.0 }
}
