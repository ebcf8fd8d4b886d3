// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Applies offsets from a [`ParallaxStore`] to the layer elements of one
//! container as CSS `translate()` transforms, using the incremental updates in
//! [`FrameChanges`].
//!
//! [`ParallaxStore`]: parallax_core::layer::ParallaxStore
//! [`FrameChanges`]: parallax_core::layer::FrameChanges

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Vec2;
use parallax_core::backend::Presenter;
use parallax_core::layer::{FrameChanges, ParallaxStore};
use web_sys::HtmlElement;

/// CSS class added to every attached container.
pub const CONTAINER_CLASS: &str = "parallax-container";

/// CSS class added to every registered layer element.
pub const LAYER_CLASS: &str = "parallax-layer";

/// Maps store slots to live DOM elements, applying incremental updates from
/// [`FrameChanges`].
///
/// Layer elements are registered with [`insert_element`](Self::insert_element)
/// under the slot index of their [`LayerId`]; elements are never created or
/// reparented, only tagged and transformed.
///
/// [`LayerId`]: parallax_core::layer::LayerId
pub struct DomPresenter {
    container: HtmlElement,
    elements: Vec<Option<HtmlElement>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("container", &"HtmlElement")
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl DomPresenter {
    /// Creates a new presenter for the layers of `container`.
    #[must_use]
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            elements: Vec::new(),
        }
    }

    /// Returns a reference to the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Returns the DOM element for the given slot index, if it exists.
    #[must_use]
    pub fn get_element(&self, idx: u32) -> Option<&HtmlElement> {
        self.elements
            .get(idx as usize)
            .and_then(|slot| slot.as_ref())
    }

    /// Stores an element at the given slot index, growing the vec if needed.
    pub fn insert_element(&mut self, idx: u32, el: HtmlElement) {
        let slot = idx as usize;
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
        }
        self.elements[slot] = Some(el);
    }

    /// Takes an element out of the slot, removing the layer class and the
    /// transform written for it.
    pub fn release_element(&mut self, idx: u32) -> Option<HtmlElement> {
        let el = self.elements.get_mut(idx as usize)?.take()?;
        let _ = el.class_list().remove_1(LAYER_CLASS);
        let _ = el.style().remove_property("transform");
        Some(el)
    }
}

impl Presenter for DomPresenter {
    /// Applies incremental changes from a [`FrameChanges`] to the DOM.
    fn apply(&mut self, store: &ParallaxStore, changes: &FrameChanges) {
        // 1. Removals. A slot that was also re-added holds the new layer's
        //    element.
        for &idx in &changes.removed {
            if !changes.added.contains(&idx) {
                let _ = self.release_element(idx);
            }
        }

        // 2. Additions
        for &idx in &changes.added {
            if let Some(el) = self.get_element(idx) {
                let _ = el.class_list().add_1(LAYER_CLASS);
            }
        }

        // 3. Offsets
        for &idx in &changes.offsets {
            if let Some(el) = self.get_element(idx) {
                let css = css_translate(store.offset_at(idx));
                let _ = el.style().set_property("transform", &css);
            }
        }
    }
}

/// Formats an offset as a CSS `translate()` value in pixels.
#[must_use]
pub fn css_translate(offset: Vec2) -> String {
    // Adding zero folds -0.0 into 0.0 so the output never reads "-0px".
    format!("translate({}px, {}px)", offset.x + 0.0, offset.y + 0.0)
}
