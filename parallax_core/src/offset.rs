// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer offset resolution.

use kurbo::Vec2;

use crate::config::{Direction, Distance, DistanceUnit, LayerConfig};
use crate::geometry::LayerGeometry;
use crate::progress::Progress;

/// Resolves a layer's configured distance to a signed magnitude.
///
/// Percentages are taken of `layer_height - container_height`, which lets a
/// layer taller than its container travel exactly its overhang.
#[inline]
#[must_use]
pub fn resolve_magnitude(distance: Distance, layer: LayerGeometry, container_height: f64) -> f64 {
    match distance.unit() {
        DistanceUnit::Pixels => distance.value(),
        DistanceUnit::Percent => {
            distance.value() / 100.0 * (layer.layer_height - container_height)
        }
    }
}

/// Computes the translation for one layer at the given progress.
///
/// Vertical directions always produce `x == 0` and horizontal directions
/// `y == 0`; opposite directions produce exact negatives.
#[must_use]
pub fn compute_offset(
    progress: Progress,
    config: &LayerConfig,
    layer: LayerGeometry,
    container_height: f64,
) -> Vec2 {
    let travel = progress.fraction() * resolve_magnitude(config.distance, layer, container_height);
    match config.direction {
        Direction::Up => Vec2::new(0.0, -travel),
        Direction::Down => Vec2::new(0.0, travel),
        Direction::Left => Vec2::new(-travel, 0.0),
        Direction::Right => Vec2::new(travel, 0.0),
    }
}
