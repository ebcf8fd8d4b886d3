// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use parallax_core::progress::ProgressState;
use parallax_core::trace::{EvaluateSummary, LayerOffsetEvent, ProgressEvent, TraceSink};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

struct State(ProgressState);

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            ProgressState::Active(p) => write!(f, "active({p})"),
            ProgressState::Inactive(reason) => write!(f, "inactive({})", reason.as_str()),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_progress(&mut self, e: &ProgressEvent) {
        let source = if e.recomputed { "new" } else { "cached" };
        let _ = writeln!(
            self.writer,
            "[progress] eval={} scroll={:.1}px {source} {}",
            e.evaluation,
            e.scroll_top,
            State(e.state),
        );
    }

    fn on_layer_offset(&mut self, e: &LayerOffsetEvent) {
        let _ = writeln!(
            self.writer,
            "[offset] eval={} layer={} ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            e.evaluation,
            e.layer_index,
            e.previous.x,
            e.previous.y,
            e.offset.x,
            e.offset.y,
        );
    }

    fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] eval={} {} resolved={} changed={} added={} removed={}",
            s.evaluation,
            State(s.state),
            s.layers_resolved,
            s.offsets_changed,
            s.added,
            s.removed,
        );
    }
}
