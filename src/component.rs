use wasm_bindgen::convert::IntoWasmAbi;

use web_sys::{CustomEvent, Document, Element, ElementCreationOptions, Event, HtmlElement};

use crate::{dom, error::ComponentError};

/// Static metadata and construction helpers for a component. Implemented by
/// the [`#[web_component]`](macro@crate::web_component) expansion; not meant
/// to be written by hand.
pub trait ElementSpec: IntoWasmAbi + Default {
    /// The custom element tag the component registers under.
    fn element_name() -> &'static str;

    /// The name of the generated JavaScript class.
    fn class_name() -> &'static str;

    /// The tag of the built-in element this component customizes, if any
    /// (`Some("input")` for a class extending `HTMLInputElement`). `None`
    /// for autonomous elements.
    fn extends() -> Option<&'static str> {
        None
    }

    /// Constructs the Rust side of the component. The JavaScript shim calls
    /// this through the factory closure passed at definition time.
    fn new() -> Self {
        Self::default()
    }

    /// Creates an instance of this element in the current window's document.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM is unavailable or element creation fails.
    fn create() -> Result<Element, ComponentError> {
        Self::create_in(&dom::document()?)
    }

    /// Creates an instance of this element in the given document. Customized
    /// built-ins are created from their built-in tag with the `is` option
    /// set, which is what makes the browser run the customized constructor.
    ///
    /// # Errors
    ///
    /// Returns an error if element creation fails.
    fn create_in(document: &Document) -> Result<Element, ComponentError> {
        match Self::extends() {
            Some(tag) => {
                let options = ElementCreationOptions::new();
                options.set_is(Self::element_name());
                Ok(document.create_element_with_element_creation_options(tag, &options)?)
            }
            None => Ok(document.create_element(Self::element_name())?),
        }
    }

    /// Builds a [`CustomEvent`] suitable for dispatching from component code.
    ///
    /// # Errors
    ///
    /// Returns an error if the event type is rejected by the browser.
    fn custom_event(event_type: &str) -> Result<Event, ComponentError> {
        Ok(CustomEvent::new(event_type)?.into())
    }
}

/// Lifecycle callbacks for a custom element.
///
/// Every method is a noop by default; implement only the ones you want
/// behavior for. Each callback comes in a shared and a mutable variant, and
/// the generated shim invokes the shared variant first, every time the
/// browser fires the callback.
pub trait Lifecycle: ElementSpec {
    /// Called from the JavaScript constructor, before the element is
    /// connected. The element is still mid-upgrade here, so avoid mutating
    /// its children.
    fn init(&self, _element: &HtmlElement) {}

    /// Mutable variant of [`Lifecycle::init`].
    fn init_mut(&mut self, _element: &HtmlElement) {}

    /// Called when the element is connected to the DOM. This is the place
    /// for setup work such as attaching a shadow root or appending children.
    fn connected(&self, _element: &HtmlElement) {}

    /// Mutable variant of [`Lifecycle::connected`].
    fn connected_mut(&mut self, _element: &HtmlElement) {}

    /// Called when the element is disconnected from the DOM.
    fn disconnected(&self, _element: &HtmlElement) {}

    /// Mutable variant of [`Lifecycle::disconnected`].
    fn disconnected_mut(&mut self, _element: &HtmlElement) {}

    /// Called when the element is moved to a new document.
    fn adopted(&self, _element: &HtmlElement) {}

    /// Mutable variant of [`Lifecycle::adopted`].
    fn adopted_mut(&mut self, _element: &HtmlElement) {}

    /// Called when one of the observed attributes changes. The observed set
    /// is declared with the `observed_attrs` parameter of
    /// [`#[web_component]`](macro@crate::web_component). `old` is `None` the
    /// first time an attribute is set; `new` is `None` when it is removed.
    fn attribute_changed(
        &self,
        _element: &HtmlElement,
        _name: &str,
        _old: Option<String>,
        _new: Option<String>,
    ) {
    }

    /// Mutable variant of [`Lifecycle::attribute_changed`].
    fn attribute_changed_mut(
        &mut self,
        _element: &HtmlElement,
        _name: &str,
        _old: Option<String>,
        _new: Option<String>,
    ) {
    }

    /// Top-level handler for the event types declared with the
    /// `observed_events` parameter.
    fn handle_event(&self, _element: &HtmlElement, _event: &Event) {}

    /// Mutable variant of [`Lifecycle::handle_event`].
    fn handle_event_mut(&mut self, _element: &HtmlElement, _event: &Event) {}
}

/// Marker trait asserting that the Rust callbacks for a component exist.
/// Implemented by the macro expansion.
pub trait WebComponent: Lifecycle {}
