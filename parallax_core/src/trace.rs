// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for store evaluation.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`ParallaxStore::evaluate_traced`] calls while it resolves progress and
//! offsets. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! [`ParallaxStore::evaluate_traced`]: crate::layer::ParallaxStore::evaluate_traced

use kurbo::Vec2;

use crate::progress::ProgressState;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once per evaluation after progress has been resolved.
#[derive(Clone, Copy, Debug)]
pub struct ProgressEvent {
    /// Evaluation counter.
    pub evaluation: u64,
    /// Resolved scroll offset used for this evaluation.
    pub scroll_top: f64,
    /// Whether progress was recomputed from a new snapshot (as opposed to
    /// reused from the previous evaluation).
    pub recomputed: bool,
    /// The resulting progress state.
    pub state: ProgressState,
}

/// Emitted for each layer whose stored offset changed.
#[derive(Clone, Copy, Debug)]
pub struct LayerOffsetEvent {
    /// Evaluation counter.
    pub evaluation: u64,
    /// Slot index of the layer.
    pub layer_index: u32,
    /// Offset before this evaluation.
    pub previous: Vec2,
    /// Offset after this evaluation.
    pub offset: Vec2,
}

/// Per-evaluation summary.
#[derive(Clone, Copy, Debug)]
pub struct EvaluateSummary {
    /// Evaluation counter.
    pub evaluation: u64,
    /// The resulting progress state.
    pub state: ProgressState,
    /// Layers whose offset was re-resolved.
    pub layers_resolved: u32,
    /// Layers whose offset actually changed.
    pub offsets_changed: u32,
    /// Layers added since the previous evaluation.
    pub added: u32,
    /// Layers removed since the previous evaluation.
    pub removed: u32,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from store evaluation.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after progress is resolved.
    fn on_progress(&mut self, e: &ProgressEvent) {
        _ = e;
    }

    /// Called when a layer's offset changes.
    fn on_layer_offset(&mut self, e: &LayerOffsetEvent) {
        _ = e;
    }

    /// Called at the end of each evaluation.
    fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
        _ = s;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ProgressEvent`].
    #[inline]
    pub fn progress(&mut self, e: &ProgressEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_progress(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LayerOffsetEvent`].
    #[inline]
    pub fn layer_offset(&mut self, e: &LayerOffsetEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layer_offset(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`EvaluateSummary`].
    #[inline]
    pub fn evaluate_summary(&mut self, s: &EvaluateSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_evaluate_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
