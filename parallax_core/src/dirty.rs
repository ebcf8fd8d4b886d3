// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! [`ParallaxStore`](crate::layer::ParallaxStore) uses multi-channel dirty
//! tracking (via [`understory_dirty`]) keyed by layer slot index. None of the
//! channels propagate; layers are a flat list under one container.
//!
//! - **Inputs** — [`GEOMETRY`] and [`CONFIG`] mark layers whose offset must be
//!   re-resolved on the next evaluation. A new snapshot or container config
//!   re-resolves every layer without marking them individually.
//! - **Output** — [`OFFSET`] is marked during evaluation for layers whose
//!   stored offset actually changed, and drained into
//!   [`FrameChanges::offsets`](crate::layer::FrameChanges::offsets).
//!
//! Layer creation and destruction are not channels; the store records them in
//! its own added/removed lists.

use understory_dirty::Channel;

/// Layer geometry changed.
pub const GEOMETRY: Channel = Channel::new(0);

/// Layer configuration changed (or the layer is new).
pub const CONFIG: Channel = Channel::new(1);

/// Resolved offset changed.
pub const OFFSET: Channel = Channel::new(2);
