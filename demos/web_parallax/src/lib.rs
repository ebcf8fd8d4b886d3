// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: scroll-driven parallax layers via `parallax_backend_web`.
//!
//! Every `.parallax` element on the page becomes a container. Its `.sky`,
//! `.hills`, and `.title` descendants are registered as layers with their own
//! distance and direction, and a coalescing [`ScrollDriver`] keeps them in
//! sync with scrolling and resizing.
//!
//! Build with: `wasm-pack build --target web demos/web_parallax`
//!
//! Then serve `demos/web_parallax/` and open `index.html` in a browser.
//!
//! [`ScrollDriver`]: parallax_backend_web::ScrollDriver

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::rc::Rc;
use alloc::string::ToString as _;
use alloc::vec::Vec;
use core::cell::RefCell;

use parallax_backend_web::{AttachError, DomParallax, DriverOptions, ScrollDriver};
use parallax_core::config::ContainerConfig;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

const CONTAINER_SELECTOR: &str = ".parallax";

/// Layer selectors with their `(distance, direction)` options.
const LAYERS: [(&str, &str, &str); 3] = [
    (".sky", "20%", "down"),
    (".hills", "50%", "up"),
    (".title", "-120", "right"),
];

fn js_error(err: &AttachError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Attaches one container and registers its layers.
fn build(container: HtmlElement) -> Result<DomParallax, AttachError> {
    let mut parallax = DomParallax::attach(container, ContainerConfig::default())?;
    for (selector, distance, direction) in LAYERS {
        parallax.add_layers_with(selector, Some(distance), Some(direction))?;
    }
    Ok(parallax)
}

/// Entry point — called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_error(&AttachError::NoWindow))?;
    let document = window
        .document()
        .ok_or_else(|| js_error(&AttachError::NoDocument))?;

    let nodes = document.query_selector_all(CONTAINER_SELECTOR)?;
    let mut drivers = Vec::new();
    for i in 0..nodes.length() {
        let Some(container) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };

        let parallax = build(container).map_err(|e| js_error(&e))?;
        let driver =
            ScrollDriver::for_parallax(Rc::new(RefCell::new(parallax)), DriverOptions::COALESCED)
                .map_err(|e| js_error(&e))?;
        driver.start().map_err(|e| js_error(&e))?;
        drivers.push(driver);
    }

    // Keep the drivers (and the containers they own) alive for the page's
    // lifetime.
    core::mem::forget(drivers);

    Ok(())
}
