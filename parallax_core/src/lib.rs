// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-progress geometry and layer offsets for parallax effects.
//!
//! `parallax_core` computes how far a container has scrolled through the
//! viewport and turns that progress into per-layer translation offsets. It is
//! `no_std` compatible (with `alloc`), performs no I/O, and leaves event
//! wiring and style application to backends.
//!
//! # Architecture
//!
//! ```text
//!   Backend (GeometrySource)
//!       │
//!       ▼
//!   GeometrySnapshot ──► compute_progress() ──► ProgressState
//!                                                   │
//!                 ┌─────────────────────────────────┘
//!                 ▼
//!   compute_offset() per layer ──► FrameChanges ──► Presenter::apply()
//! ```
//!
//! **[`progress`]** and **[`offset`]** are pure functions of their inputs and
//! can be used on their own.
//!
//! **[`layer`]** — [`ParallaxStore`](layer::ParallaxStore) keeps one
//! container's layers in struct-of-arrays storage, re-resolves only stale
//! offsets, and leaves offsets untouched while the container is inactive.
//!
//! **[`dirty`]** — Dirty channels via `understory_dirty`.
//!
//! **[`config`]** — Layer distances, directions, and container thresholds,
//! validated at setup time.
//!
//! **[`geometry`]** — Per-cycle measurement inputs.
//!
//! **[`backend`]** — The [`GeometrySource`](backend::GeometrySource) and
//! [`Presenter`](backend::Presenter) traits that host integrations implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! evaluation instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod dirty;
pub mod geometry;
pub mod layer;
pub mod offset;
pub mod progress;
pub mod trace;
