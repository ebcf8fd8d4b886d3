// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One parallax container bound to the DOM.

use alloc::vec::Vec;
use core::fmt;

use parallax_core::backend::Presenter as _;
use parallax_core::config::{ContainerConfig, DistanceParseError, LayerConfig};
use parallax_core::layer::{FrameChanges, LayerId, ParallaxStore};
use wasm_bindgen::JsCast as _;
use web_sys::{HtmlElement, Window};

use crate::measure::DomGeometry;
use crate::presenter::{CONTAINER_CLASS, DomPresenter};

/// Errors from binding a container or its layers to the DOM.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// No `document` on the window.
    NoDocument,
    /// The container already carries the container class.
    AlreadyAttached,
    /// The layer selector was rejected by `querySelectorAll`.
    InvalidSelector,
    /// A DOM call failed.
    Dom(&'static str),
    /// A layer distance option was malformed.
    Distance(DistanceParseError),
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => f.write_str("no global window"),
            Self::NoDocument => f.write_str("window has no document"),
            Self::AlreadyAttached => f.write_str("container is already attached"),
            Self::InvalidSelector => f.write_str("invalid layer selector"),
            Self::Dom(call) => write!(f, "DOM call failed: {call}"),
            Self::Distance(err) => write!(f, "invalid layer distance: {err}"),
        }
    }
}

impl core::error::Error for AttachError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Distance(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DistanceParseError> for AttachError {
    fn from(err: DistanceParseError) -> Self {
        Self::Distance(err)
    }
}

/// A container element, its layers, and the store that drives them.
///
/// Create with [`attach`](Self::attach), register layers, then call
/// [`update`](Self::update) from scroll, resize, and ready notifications
/// (see [`ScrollDriver`](crate::ScrollDriver)).
///
/// Dropping the instance untags the container and every layer, so the same
/// container can be attached again.
#[derive(Debug)]
pub struct DomParallax {
    window: Window,
    store: ParallaxStore,
    presenter: DomPresenter,
    changes: FrameChanges,
}

impl DomParallax {
    /// Tags `container` and prepares it for layer registration.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::AlreadyAttached`] if the container already
    /// carries the container class, or [`AttachError::NoWindow`] outside a
    /// browser window.
    pub fn attach(container: HtmlElement, config: ContainerConfig) -> Result<Self, AttachError> {
        let window = web_sys::window().ok_or(AttachError::NoWindow)?;
        let classes = container.class_list();
        if classes.contains(CONTAINER_CLASS) {
            return Err(AttachError::AlreadyAttached);
        }
        classes
            .add_1(CONTAINER_CLASS)
            .map_err(|_| AttachError::Dom("classList.add"))?;

        Ok(Self {
            window,
            store: ParallaxStore::new(config),
            presenter: DomPresenter::new(container),
            changes: FrameChanges::default(),
        })
    }

    /// Registers a single layer element.
    pub fn add_layer(&mut self, el: HtmlElement, config: LayerConfig) -> LayerId {
        let id = self.store.create_layer(config);
        self.presenter.insert_element(id.index(), el);
        id
    }

    /// Registers every element under the container matching `selector`.
    ///
    /// Non-HTML matches (e.g. SVG nodes) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::InvalidSelector`] if the selector is rejected.
    pub fn add_layers(
        &mut self,
        selector: &str,
        config: LayerConfig,
    ) -> Result<Vec<LayerId>, AttachError> {
        let nodes = self
            .presenter
            .container()
            .query_selector_all(selector)
            .map_err(|_| AttachError::InvalidSelector)?;
        let mut ids = Vec::new();
        for i in 0..nodes.length() {
            let Some(node) = nodes.get(i) else {
                continue;
            };
            if let Ok(el) = node.dyn_into::<HtmlElement>() {
                ids.push(self.add_layer(el, config));
            }
        }
        Ok(ids)
    }

    /// Like [`add_layers`](Self::add_layers), parsing string options first.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::Distance`] if `distance` is malformed; nothing
    /// is registered in that case.
    pub fn add_layers_with(
        &mut self,
        selector: &str,
        distance: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<LayerId>, AttachError> {
        let config = LayerConfig::parse(distance, direction)?;
        self.add_layers(selector, config)
    }

    /// Unregisters a layer and clears its class and transform.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<HtmlElement> {
        self.store.destroy_layer(id);
        self.presenter.release_element(id.index())
    }

    /// Measures the DOM, evaluates the store, and writes changed transforms.
    pub fn update(&mut self) {
        let geometry = DomGeometry::new(&self.window, &self.presenter);
        self.store.measure(&geometry);
        self.store.evaluate_into(&mut self.changes);
        self.presenter.apply(&self.store, &self.changes);
    }

    /// Unregisters every layer, removes the container class, and returns the
    /// container.
    pub fn detach(self) -> HtmlElement {
        // Cleanup happens in `Drop`.
        self.presenter.container().clone()
    }

    fn release_all(&mut self) {
        let ids: Vec<LayerId> = self.store.layers().collect();
        for id in ids {
            let _ = self.remove_layer(id);
        }
        let _ = self
            .presenter
            .container()
            .class_list()
            .remove_1(CONTAINER_CLASS);
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &ParallaxStore {
        &self.store
    }

    /// Returns the presenter.
    #[must_use]
    pub fn presenter(&self) -> &DomPresenter {
        &self.presenter
    }

    /// Returns the window this instance measures against.
    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Drop for DomParallax {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn distance_errors_convert() {
        let err = AttachError::from(DistanceParseError::Empty);
        assert_eq!(err, AttachError::Distance(DistanceParseError::Empty));
        assert_eq!(
            err.to_string(),
            "invalid layer distance: distance is empty"
        );
    }

    #[test]
    fn attach_error_messages() {
        assert_eq!(
            AttachError::AlreadyAttached.to_string(),
            "container is already attached"
        );
        assert_eq!(
            AttachError::Dom("classList.add").to_string(),
            "DOM call failed: classList.add"
        );
    }
}
