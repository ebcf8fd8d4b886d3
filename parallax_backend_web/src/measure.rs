// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout measurement.

use parallax_core::backend::GeometrySource;
use parallax_core::geometry::{GeometrySnapshot, LayerGeometry};
use web_sys::Window;

use crate::presenter::DomPresenter;

/// Reads scroll, viewport, container, and layer geometry from the live DOM.
///
/// Borrows the presenter's element table so that measured layers are exactly
/// the presented ones. All reads happen against the current layout, so one
/// [`ParallaxStore::measure`] call sees a consistent pass.
///
/// [`ParallaxStore::measure`]: parallax_core::layer::ParallaxStore::measure
#[derive(Debug)]
pub struct DomGeometry<'a> {
    window: &'a Window,
    presenter: &'a DomPresenter,
}

impl<'a> DomGeometry<'a> {
    /// Creates a measurement view over `presenter`'s container and layers.
    #[must_use]
    pub fn new(window: &'a Window, presenter: &'a DomPresenter) -> Self {
        Self { window, presenter }
    }

    /// Raw document scroll offset; may be negative while overscrolling.
    fn raw_scroll_top(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        let client = self
            .window
            .document()
            .and_then(|doc| doc.document_element())
            .map(|root| root.client_height());
        let inner = self.window.inner_height().ok().and_then(|h| h.as_f64());
        pick_viewport_height(client, inner)
    }
}

/// Prefers the root element's `clientHeight`, which excludes a horizontal
/// scrollbar, over `innerHeight`, which includes it.
fn pick_viewport_height(client_height: Option<i32>, inner_height: Option<f64>) -> f64 {
    client_height
        .map(f64::from)
        .or(inner_height)
        .unwrap_or(0.0)
}

impl GeometrySource for DomGeometry<'_> {
    fn snapshot(&self) -> GeometrySnapshot {
        let raw_scroll = self.raw_scroll_top();
        let container = self.presenter.container();
        // Bounding rect is viewport-relative; shift it into document space.
        let container_top = container.get_bounding_client_rect().top() + raw_scroll;
        GeometrySnapshot::new(
            raw_scroll,
            self.viewport_height(),
            container_top,
            f64::from(container.offset_height()),
        )
    }

    fn layer_geometry(&self, idx: u32) -> Option<LayerGeometry> {
        self.presenter
            .get_element(idx)
            .map(|el| LayerGeometry::new(f64::from(el.offset_height())))
    }
}
