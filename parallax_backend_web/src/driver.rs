// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll, resize, and ready wiring.
//!
//! [`ScrollDriver`] subscribes to document `scroll`, window `resize`, and,
//! while the document is still loading, `DOMContentLoaded`, and invokes an
//! update callback for each. With
//! [`DriverOptions::coalesce`] set, bursts of events between two animation
//! frames collapse into a single update inside `requestAnimationFrame`.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, Window};

use crate::instance::{AttachError, DomParallax};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

const SCROLL: &str = "scroll";
const RESIZE: &str = "resize";
const READY: &str = "DOMContentLoaded";

/// Options for a [`ScrollDriver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverOptions {
    /// Defer updates to the next animation frame, running at most one update
    /// per frame. When `false`, every event updates synchronously.
    pub coalesce: bool,
}

impl DriverOptions {
    /// Synchronous updates, one per event.
    pub const IMMEDIATE: Self = Self { coalesce: false };

    /// At most one update per animation frame.
    pub const COALESCED: Self = Self { coalesce: true };
}

/// Invokes an update callback on scroll, resize, and document ready.
///
/// Create with [`ScrollDriver::new`] (or [`for_parallax`](Self::for_parallax)),
/// then call [`start`](Self::start). Listeners are removed by
/// [`stop`](Self::stop) or when the driver is dropped.
pub struct ScrollDriver {
    inner: Rc<DriverInner>,
}

type EventClosure = Closure<dyn FnMut()>;
type FrameClosure = Closure<dyn FnMut(f64)>;

struct DriverInner {
    window: Window,
    document: Document,

    /// The user-supplied update, run once per (coalesced) notification.
    update: RefCell<Box<dyn FnMut()>>,

    /// Shared by all three event subscriptions.
    listener: RefCell<Option<EventClosure>>,

    /// Registered with `requestAnimationFrame` when coalescing.
    frame: RefCell<Option<FrameClosure>>,

    options: DriverOptions,
    running: Cell<bool>,

    /// A frame is requested and has not run yet.
    pending: Cell<bool>,
    raf_id: Cell<i32>,
}

impl DriverInner {
    fn run_update(&self) {
        // Skip a nested notification raised from inside the update itself.
        if let Ok(mut update) = self.update.try_borrow_mut() {
            update();
        }
    }

    fn notify(&self) {
        if !self.running.get() {
            return;
        }
        if !self.options.coalesce {
            self.run_update();
            return;
        }
        if self.pending.get() {
            return;
        }
        if let Some(ref frame) = *self.frame.borrow() {
            self.pending.set(true);
            let id = request_animation_frame(frame.as_ref().unchecked_ref());
            self.raf_id.set(id);
        }
    }

    fn targets(&self) -> [(&EventTarget, &'static str); 3] {
        [
            (self.document.as_ref(), SCROLL),
            (self.window.as_ref(), RESIZE),
            (self.document.as_ref(), READY),
        ]
    }
}

/// Whether a document in `ready_state` will still fire `DOMContentLoaded`.
fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

impl ScrollDriver {
    /// Creates a driver that is **not yet listening**.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::NoWindow`] or [`AttachError::NoDocument`]
    /// outside a browser document.
    pub fn new(
        update: impl FnMut() + 'static,
        options: DriverOptions,
    ) -> Result<Self, AttachError> {
        let window = web_sys::window().ok_or(AttachError::NoWindow)?;
        let document = window.document().ok_or(AttachError::NoDocument)?;
        Ok(Self {
            inner: Rc::new(DriverInner {
                window,
                document,
                update: RefCell::new(Box::new(update)),
                listener: RefCell::new(None),
                frame: RefCell::new(None),
                options,
                running: Cell::new(false),
                pending: Cell::new(false),
                raf_id: Cell::new(0),
            }),
        })
    }

    /// Creates a driver that calls [`DomParallax::update`] on `parallax`.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn for_parallax(
        parallax: Rc<RefCell<DomParallax>>,
        options: DriverOptions,
    ) -> Result<Self, AttachError> {
        Self::new(
            move || {
                if let Ok(mut parallax) = parallax.try_borrow_mut() {
                    parallax.update();
                }
            },
            options,
        )
    }

    /// Subscribes to scroll and resize notifications, and to
    /// `DOMContentLoaded` while the document is still loading.
    ///
    /// If the document has already finished parsing, the ready notification
    /// has been missed, so one update runs immediately instead. A no-op if
    /// already started.
    ///
    /// # Errors
    ///
    /// Returns [`AttachError::Dom`] if a listener could not be registered;
    /// any listeners already added are removed again.
    pub fn start(&self) -> Result<(), AttachError> {
        if self.inner.running.get() {
            return Ok(());
        }

        if self.inner.listener.borrow().is_none() {
            let inner = Rc::clone(&self.inner);
            let listener = Closure::wrap(Box::new(move || inner.notify()) as Box<dyn FnMut()>);
            *self.inner.listener.borrow_mut() = Some(listener);
        }
        if self.inner.options.coalesce && self.inner.frame.borrow().is_none() {
            let inner = Rc::clone(&self.inner);
            let frame = Closure::wrap(Box::new(move |_timestamp_ms: f64| {
                inner.pending.set(false);
                if inner.running.get() {
                    inner.run_update();
                }
            }) as Box<dyn FnMut(f64)>);
            *self.inner.frame.borrow_mut() = Some(frame);
        }

        let waits_for_ready = is_loading(&self.inner.document.ready_state());
        self.inner.running.set(true);
        if let Err(err) = self.subscribe(waits_for_ready) {
            self.stop();
            return Err(err);
        }

        if !waits_for_ready {
            self.inner.run_update();
        }
        Ok(())
    }

    fn subscribe(&self, waits_for_ready: bool) -> Result<(), AttachError> {
        let listener = self.inner.listener.borrow();
        let Some(listener) = listener.as_ref() else {
            return Ok(());
        };
        for (target, event) in self.inner.targets() {
            if event == READY && !waits_for_ready {
                continue;
            }
            target
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                .map_err(|_| AttachError::Dom("addEventListener"))?;
        }
        Ok(())
    }

    /// Removes all listeners and cancels a pending frame.
    ///
    /// Can be restarted by calling [`start`](Self::start) again.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);

        if let Some(ref listener) = *self.inner.listener.borrow() {
            for (target, event) in self.inner.targets() {
                let _ = target
                    .remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
            }
        }
        if self.inner.pending.replace(false) {
            cancel_animation_frame(self.inner.raf_id.get());
        }
    }

    /// Returns `true` while listeners are registered.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Returns the options this driver was created with.
    #[must_use]
    pub fn options(&self) -> DriverOptions {
        self.inner.options
    }
}

impl Drop for ScrollDriver {
    fn drop(&mut self) {
        self.stop();
        // Break the Rc cycle through the closures so they don't leak.
        self.inner.listener.borrow_mut().take();
        self.inner.frame.borrow_mut().take();
    }
}

impl core::fmt::Debug for ScrollDriver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollDriver")
            .field("running", &self.inner.running.get())
            .field("pending", &self.inner.pending.get())
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}
