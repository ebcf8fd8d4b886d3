// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON-lines export for parallax evaluation traces.
//!
//! This crate provides [`TraceSink`](parallax_core::trace::TraceSink)
//! implementations for development:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`json::JsonLinesSink`]: one JSON object per event, for tooling.

pub mod json;
pub mod pretty;

use parallax_core::progress::ProgressState;

/// Splits a progress state into `(active, percent, reason)` for display.
pub(crate) fn state_parts(state: ProgressState) -> (bool, Option<f64>, Option<&'static str>) {
    match state {
        ProgressState::Active(p) => (true, Some(p.percent()), None),
        ProgressState::Inactive(reason) => (false, None, Some(reason.as_str())),
    }
}
