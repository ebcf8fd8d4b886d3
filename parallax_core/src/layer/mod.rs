// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer storage for one parallax container.
//!
//! A *layer* is an element inside the container that is translated as the
//! container scrolls through the viewport. Each layer has:
//!
//! - An identity ([`LayerId`]), a generational handle that becomes stale when
//!   the layer is destroyed.
//! - **Inputs** set by the caller: [`config`](ParallaxStore::set_layer_config)
//!   and measured [`geometry`](ParallaxStore::set_layer_geometry), plus the
//!   container-wide [`snapshot`](ParallaxStore::set_snapshot).
//! - **Computed** state produced by [`evaluate`](ParallaxStore::evaluate): the
//!   layer's translation offset.
//!
//! Layers are stored in struct-of-arrays layout with index-based handles.
//!
//! # Dirty tracking
//!
//! Input mutations mark the corresponding dirty channel (see
//! [`dirty`](crate::dirty)); evaluation re-resolves only what is stale and
//! reports only offsets that changed.

mod evaluate;
mod id;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use id::LayerId;
pub use store::ParallaxStore;
pub use traverse::Layers;
