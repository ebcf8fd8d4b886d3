// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll progress through a container's active range.
//!
//! [`compute_progress`] runs the container through two gates and a range
//! computation:
//!
//! 1. **Visibility** — the container must overlap the band of scroll
//!    positions in which any part of it can be on screen.
//! 2. **Activation** — the scroll offset plus the top threshold must have
//!    passed the container's top edge.
//! 3. **Range** — threshold mode uses the container height as the range;
//!    viewport mode adds the viewport height so the effect starts as soon as
//!    the container enters from below.
//!
//! Progress outside `[0, 100]` is reported as [`InactiveReason::OutOfBounds`]
//! rather than clipped, so layers keep their last offset instead of snapping.

use core::fmt;

use crate::geometry::GeometrySnapshot;

/// Normalized progress through the active range, in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    /// No progress.
    pub const START: Self = Self(0.0);
    /// Full progress.
    pub const END: Self = Self(100.0);

    /// Creates a progress value, returning `None` if `percent` lies outside
    /// `[0, 100]` or is not finite.
    #[inline]
    #[must_use]
    pub fn new(percent: f64) -> Option<Self> {
        (0.0..=100.0).contains(&percent).then_some(Self(percent))
    }

    /// The progress as a percentage in `[0, 100]`.
    #[inline]
    #[must_use]
    pub const fn percent(self) -> f64 {
        self.0
    }

    /// The progress as a fraction in `[0, 1]`.
    #[inline]
    #[must_use]
    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// Why a snapshot produced no progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InactiveReason {
    /// The container is entirely above or below the viewport band.
    OutOfView,
    /// The scroll offset (plus threshold) has not passed the container top.
    BelowThreshold,
    /// The active range is zero, negative, or not finite.
    DegenerateRange,
    /// The computed progress fell outside `[0, 100]`.
    OutOfBounds,
}

impl InactiveReason {
    /// Returns a short label for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OutOfView => "out-of-view",
            Self::BelowThreshold => "below-threshold",
            Self::DegenerateRange => "degenerate-range",
            Self::OutOfBounds => "out-of-bounds",
        }
    }
}

/// Result of [`compute_progress`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressState {
    /// The container is active at the given progress.
    Active(Progress),
    /// No offsets should change this cycle.
    Inactive(InactiveReason),
}

impl ProgressState {
    /// Returns the progress if active.
    #[inline]
    #[must_use]
    pub const fn progress(self) -> Option<Progress> {
        match self {
            Self::Active(p) => Some(p),
            Self::Inactive(_) => None,
        }
    }

    /// Returns `true` if the state is [`Active`](Self::Active).
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active(_))
    }
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::Inactive(InactiveReason::OutOfView)
    }
}

/// Returns `true` if any part of the container can be on screen.
#[must_use]
pub fn is_in_visual_range(snapshot: &GeometrySnapshot) -> bool {
    let scroll_top = snapshot.scroll_top();
    snapshot.container_bottom() >= scroll_top
        && scroll_top >= snapshot.container_top - snapshot.viewport_height
}

/// Returns `true` if the scroll offset plus the top threshold has passed the
/// container's top edge.
///
/// An unset threshold counts as zero here.
#[must_use]
pub fn is_above_top(snapshot: &GeometrySnapshot) -> bool {
    snapshot.scroll_top() + snapshot.top_threshold.unwrap_or(0.0) > snapshot.container_top
}

/// Computes the container's progress for one geometry snapshot.
///
/// This is a pure function: identical snapshots always yield identical
/// results.
#[must_use]
pub fn compute_progress(snapshot: &GeometrySnapshot) -> ProgressState {
    if !is_in_visual_range(snapshot) {
        return ProgressState::Inactive(InactiveReason::OutOfView);
    }
    if !is_above_top(snapshot) {
        return ProgressState::Inactive(InactiveReason::BelowThreshold);
    }

    let offset_into = snapshot.scroll_top() - snapshot.container_top;
    let (range, scrolled) = match snapshot.top_threshold {
        Some(top) => (snapshot.container_height, offset_into + top),
        None => (
            snapshot.viewport_height + snapshot.container_height,
            offset_into + snapshot.viewport_height,
        ),
    };

    if !(range.is_finite() && range > 0.0) {
        return ProgressState::Inactive(InactiveReason::DegenerateRange);
    }

    match Progress::new(scrolled * 100.0 / range) {
        Some(p) => ProgressState::Active(p),
        None => ProgressState::Inactive(InactiveReason::OutOfBounds),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    const EPS: f64 = 1e-9;

    fn viewport_mode(scroll_top: f64) -> GeometrySnapshot {
        GeometrySnapshot::new(scroll_top, 800.0, 1000.0, 400.0)
    }

    fn active(state: ProgressState) -> f64 {
        match state {
            ProgressState::Active(p) => p.percent(),
            ProgressState::Inactive(reason) => panic!("expected active, got {reason:?}"),
        }
    }

    #[test]
    fn above_viewport_band_is_out_of_view() {
        // Container spans 1000..1400; scrolled past its bottom.
        assert_eq!(
            compute_progress(&viewport_mode(1401.0)),
            ProgressState::Inactive(InactiveReason::OutOfView)
        );
        // Container still below the fold: needs scroll >= 200.
        assert_eq!(
            compute_progress(&viewport_mode(199.0)),
            ProgressState::Inactive(InactiveReason::OutOfView)
        );
    }

    #[test]
    fn unset_threshold_gates_on_container_top() {
        // In view, but scroll_top + 0 <= container_top.
        assert_eq!(
            compute_progress(&viewport_mode(600.0)),
            ProgressState::Inactive(InactiveReason::BelowThreshold)
        );
        assert_eq!(
            compute_progress(&viewport_mode(1000.0)),
            ProgressState::Inactive(InactiveReason::BelowThreshold)
        );
    }

    #[test]
    fn viewport_mode_uses_viewport_plus_container_range() {
        // scrolled = 1100 - 1000 + 800 = 900; range = 1200.
        let p = active(compute_progress(&viewport_mode(1100.0)));
        assert!((p - 75.0).abs() < EPS, "got {p}");
    }

    #[test]
    fn zero_threshold_selects_threshold_mode() {
        let s = viewport_mode(1100.0).with_top_threshold(Some(0.0));
        // scrolled = 100; range = container height 400.
        let p = active(compute_progress(&s));
        assert!((p - 25.0).abs() < EPS, "got {p}");
    }

    #[test]
    fn positive_threshold_activates_early() {
        let s = viewport_mode(900.0).with_top_threshold(Some(200.0));
        // 900 + 200 > 1000; scrolled = -100 + 200 = 100; range = 400.
        let p = active(compute_progress(&s));
        assert!((p - 25.0).abs() < EPS, "got {p}");
    }

    #[test]
    fn progress_beyond_range_is_suppressed_not_clamped() {
        // Threshold larger than the container pushes progress past 100.
        let s = viewport_mode(1200.0).with_top_threshold(Some(300.0));
        // scrolled = 200 + 300 = 500 > 400.
        assert_eq!(
            compute_progress(&s),
            ProgressState::Inactive(InactiveReason::OutOfBounds)
        );
    }

    #[test]
    fn boundary_values_are_exact() {
        let s = viewport_mode(1400.0).with_top_threshold(Some(0.0));
        assert_eq!(compute_progress(&s), ProgressState::Active(Progress::END));
    }

    #[test]
    fn zero_height_container_is_degenerate() {
        let s = GeometrySnapshot::new(1000.0, 800.0, 1000.0, 0.0).with_top_threshold(Some(10.0));
        assert_eq!(
            compute_progress(&s),
            ProgressState::Inactive(InactiveReason::DegenerateRange)
        );
    }

    #[test]
    fn unbounded_container_is_degenerate() {
        let s = GeometrySnapshot::new(1000.0, 800.0, 1000.0, f64::INFINITY)
            .with_top_threshold(Some(10.0));
        assert_eq!(
            compute_progress(&s),
            ProgressState::Inactive(InactiveReason::DegenerateRange)
        );
    }

    #[test]
    fn negative_scroll_behaves_like_zero() {
        let geometry = GeometrySnapshot::new(-50.0, 800.0, 0.0, 400.0).with_top_threshold(Some(100.0));
        let at_zero = geometry.with_scroll_top(0.0);
        assert_eq!(compute_progress(&geometry), compute_progress(&at_zero));
        let p = active(compute_progress(&geometry));
        assert!((p - 25.0).abs() < EPS, "got {p}");
    }

    #[test]
    fn visual_range_is_one_closed_interval() {
        let base = viewport_mode(0.0);
        let visible: Vec<u32> = (0..=2000_u32)
            .filter(|&s| is_in_visual_range(&base.with_scroll_top(f64::from(s))))
            .collect();
        assert_eq!(visible.first(), Some(&200), "enters at top - viewport");
        assert_eq!(visible.last(), Some(&1400), "leaves at the bottom edge");
        assert_eq!(visible.len(), 1201, "no gaps inside the interval");

        for s in (0..200_u32).chain(1401..=2000) {
            let state = compute_progress(&base.with_scroll_top(f64::from(s)));
            assert!(!state.is_active(), "scroll {s} should be inactive");
        }
    }

    #[test]
    fn same_snapshot_same_result() {
        let s = viewport_mode(1234.5).with_top_threshold(Some(12.0));
        assert_eq!(compute_progress(&s), compute_progress(&s));
    }

    #[test]
    fn progress_new_rejects_out_of_range() {
        assert_eq!(Progress::new(-0.01), None);
        assert_eq!(Progress::new(100.01), None);
        assert_eq!(Progress::new(f64::NAN), None);
        assert_eq!(Progress::new(50.0).map(Progress::fraction), Some(0.5));
    }
}
