//! Web Components implemented in Rust via WebAssembly.
//!
//! Browsers define custom elements by registering a JavaScript class with
//! `customElements.define`. Rust compiled to `wasm32-unknown-unknown` cannot
//! subclass `HTMLElement`, so this crate generates a small JavaScript shim
//! class at runtime whose instances hold a wasm-bindgen export of your struct
//! and forward every lifecycle callback to it. The
//! [`#[web_component]`](macro@web_component) attribute produces all of the
//! mechanical glue; you implement [`Lifecycle`] for the callbacks you care
//! about.
//!
//! ```ignore
//! use web_sys::{HtmlElement, Text};
//! use webcomponent::{Lifecycle, web_component};
//!
//! #[web_component(element_name = "greeting-card", observed_attrs = "name")]
//! pub struct GreetingCard {}
//!
//! impl Lifecycle for GreetingCard {
//!     fn connected(&self, element: &HtmlElement) {
//!         let node = Text::new().unwrap();
//!         node.set_text_content(Some("hello"));
//!         element.append_child(&node).unwrap();
//!     }
//! }
//!
//! pub fn register() {
//!     webcomponent::init();
//!     GreetingCard::define_once();
//! }
//! ```
//!
//! With the `template` feature enabled, the
//! [`#[template_element]`](macro@template_element) attribute installs
//! `<template>` elements the same way.

mod component;
mod dom;
mod error;
mod registry;
#[cfg(feature = "template")]
mod template;

pub use component::{ElementSpec, Lifecycle, WebComponent};
pub use error::ComponentError;
pub use registry::{ClassShim, ComponentHandle, define};
#[cfg(feature = "template")]
pub use template::{RenderTemplate, TemplateElement, install_template};

pub use webcomponent_macros::web_component;

#[cfg(feature = "template")]
pub use webcomponent_macros::template_element;

/// Installs the panic hook and the browser tracing subscriber. Safe to call
/// more than once; only the first call has an effect.
pub fn init() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    });
}

#[doc(hidden)]
pub fn __report_define_error(element: &str, err: &ComponentError) {
    tracing::warn!(element, error = %err, "failed to define custom element");
}
