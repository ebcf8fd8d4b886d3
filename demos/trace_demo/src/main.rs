// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated scroll sequence that exercises the tracing pipeline.
//!
//! Scrolls a 400px container through an 800px viewport in 50px steps,
//! resizes one layer halfway, and removes another near the end, printing
//! every evaluation through a
//! [`PrettyPrintSink`](parallax_debug::pretty::PrettyPrintSink) on stderr.

use parallax_core::config::{ContainerConfig, LayerConfig};
use parallax_core::geometry::{GeometrySnapshot, LayerGeometry};
use parallax_core::layer::ParallaxStore;
use parallax_core::trace::Tracer;

use parallax_debug::pretty::PrettyPrintSink;

const VIEWPORT_HEIGHT: f64 = 800.0;
const CONTAINER_TOP: f64 = 1000.0;
const CONTAINER_HEIGHT: f64 = 400.0;
const SCROLL_STEP: f64 = 50.0;
const STEPS: u32 = 40;

fn main() {
    let mut pretty = PrettyPrintSink::stderr();
    let mut store = ParallaxStore::new(ContainerConfig::viewport());

    let layers = [("50%", "up"), ("-200", "down"), ("80px", "right")];
    let mut ids = Vec::new();
    for (distance, direction) in layers {
        let config = LayerConfig::parse(Some(distance), Some(direction))
            .expect("demo layer options are valid");
        ids.push(store.create_layer(config));
    }
    store.set_layer_geometry(ids[0], LayerGeometry::new(1000.0));

    let mut presented = 0_usize;
    for step in 0..STEPS {
        let scroll_top = f64::from(step) * SCROLL_STEP;
        store.set_snapshot(GeometrySnapshot::new(
            scroll_top,
            VIEWPORT_HEIGHT,
            CONTAINER_TOP,
            CONTAINER_HEIGHT,
        ));

        if step == STEPS / 2 {
            store.set_layer_geometry(ids[0], LayerGeometry::new(1200.0));
        }
        if step == STEPS - 5 {
            store.destroy_layer(ids[2]);
        }

        let mut tracer = Tracer::new(&mut pretty);
        let changes = store.evaluate_traced(&mut tracer);
        presented += changes.offsets.len();
    }

    println!(
        "{STEPS} evaluations, {presented} offset writes, final progress {:?}",
        store.progress()
    );
}
