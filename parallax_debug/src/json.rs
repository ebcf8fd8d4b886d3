// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines trace export.
//!
//! [`JsonLinesSink`] writes each event as a single JSON object followed by a
//! newline. Every object carries an `"event"` field naming its kind
//! (`"progress"`, `"offset"`, or `"summary"`).

use std::io::Write;

use serde_json::{Value, json};

use parallax_core::trace::{EvaluateSummary, LayerOffsetEvent, ProgressEvent, TraceSink};

use crate::state_parts;

/// Writes one JSON object per trace event.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for JsonLinesSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, value: &Value) {
        if serde_json::to_writer(&mut self.writer, value).is_ok() {
            let _ = self.writer.write_all(b"\n");
        }
    }
}

impl<W: Write> TraceSink for JsonLinesSink<W> {
    fn on_progress(&mut self, e: &ProgressEvent) {
        let (active, progress, reason) = state_parts(e.state);
        self.emit(&json!({
            "event": "progress",
            "evaluation": e.evaluation,
            "scroll_top": e.scroll_top,
            "recomputed": e.recomputed,
            "active": active,
            "progress": progress,
            "reason": reason,
        }));
    }

    fn on_layer_offset(&mut self, e: &LayerOffsetEvent) {
        self.emit(&json!({
            "event": "offset",
            "evaluation": e.evaluation,
            "layer": e.layer_index,
            "previous": [e.previous.x, e.previous.y],
            "offset": [e.offset.x, e.offset.y],
        }));
    }

    fn on_evaluate_summary(&mut self, s: &EvaluateSummary) {
        let (active, progress, reason) = state_parts(s.state);
        self.emit(&json!({
            "event": "summary",
            "evaluation": s.evaluation,
            "active": active,
            "progress": progress,
            "reason": reason,
            "layers_resolved": s.layers_resolved,
            "offsets_changed": s.offsets_changed,
            "added": s.added,
            "removed": s.removed,
        }));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Vec2;
    use parallax_core::progress::{InactiveReason, Progress, ProgressState};

    use super::*;

    fn lines(sink: JsonLinesSink<Vec<u8>>) -> Vec<Value> {
        let text = String::from_utf8(sink.into_inner()).unwrap();
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn progress_event_is_one_line() {
        let mut sink = JsonLinesSink::new(Vec::<u8>::new());
        sink.on_progress(&ProgressEvent {
            evaluation: 1,
            scroll_top: 500.0,
            recomputed: true,
            state: ProgressState::Active(Progress::new(25.0).unwrap()),
        });
        let values = lines(sink);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0]["event"], "progress");
        assert_eq!(values[0]["active"], true);
        assert_eq!(values[0]["progress"], 25.0);
        assert!(values[0]["reason"].is_null());
    }

    #[test]
    fn inactive_summary_carries_reason() {
        let mut sink = JsonLinesSink::new(Vec::<u8>::new());
        sink.on_evaluate_summary(&EvaluateSummary {
            evaluation: 7,
            state: ProgressState::Inactive(InactiveReason::BelowThreshold),
            layers_resolved: 0,
            offsets_changed: 0,
            added: 0,
            removed: 1,
        });
        let values = lines(sink);
        assert_eq!(values[0]["event"], "summary");
        assert_eq!(values[0]["active"], false);
        assert_eq!(values[0]["reason"], "below-threshold");
        assert!(values[0]["progress"].is_null());
        assert_eq!(values[0]["removed"], 1);
    }

    #[test]
    fn events_append_in_order() {
        let mut sink = JsonLinesSink::new(Vec::<u8>::new());
        sink.on_layer_offset(&LayerOffsetEvent {
            evaluation: 2,
            layer_index: 0,
            previous: Vec2::ZERO,
            offset: Vec2::new(-50.0, 0.0),
        });
        sink.on_layer_offset(&LayerOffsetEvent {
            evaluation: 2,
            layer_index: 1,
            previous: Vec2::ZERO,
            offset: Vec2::new(0.0, 75.0),
        });
        let values = lines(sink);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["layer"], 0);
        assert_eq!(values[0]["offset"][0], -50.0);
        assert_eq!(values[1]["offset"][1], 75.0);
    }
}
