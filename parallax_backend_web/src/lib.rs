// Copyright 2026 the Parallax Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for parallax.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`DomParallax`]: one container element and its layers
//! - [`ScrollDriver`]: scroll, resize, and ready notifications, optionally
//!   coalesced into `requestAnimationFrame`
//! - [`DomGeometry`]: layout measurement
//! - [`DomPresenter`]: CSS classes and `translate()` transforms
//!
//! ```no_run
//! use std::{cell::RefCell, rc::Rc};
//!
//! use parallax_backend_web::{DomParallax, DriverOptions, ScrollDriver};
//! use parallax_core::config::{ContainerConfig, LayerConfig};
//! use wasm_bindgen::JsCast;
//!
//! # fn main() -> Result<(), parallax_backend_web::AttachError> {
//! let document = web_sys::window().unwrap().document().unwrap();
//! let container = document
//!     .query_selector(".hero")
//!     .unwrap()
//!     .unwrap()
//!     .dyn_into::<web_sys::HtmlElement>()
//!     .unwrap();
//!
//! let mut parallax = DomParallax::attach(container, ContainerConfig::default())?;
//! parallax.add_layers_with(".layer", Some("50%"), Some("up"))?;
//!
//! let driver = ScrollDriver::for_parallax(Rc::new(RefCell::new(parallax)), DriverOptions::COALESCED)?;
//! driver.start()?;
//! # Ok(())
//! # }
//! ```

#![no_std]

extern crate alloc;

mod driver;
mod instance;
mod measure;
mod presenter;

pub use driver::{DriverOptions, ScrollDriver};
pub use instance::{AttachError, DomParallax};
pub use measure::DomGeometry;
pub use parallax_core::backend::{GeometrySource, Presenter};
pub use presenter::{CONTAINER_CLASS, DomPresenter, LAYER_CLASS, css_translate};
