use js_sys::Function;

use wasm_bindgen::{JsCast, prelude::Closure};

use crate::{component::ElementSpec, dom, error::ComponentError};

/// Describes the JavaScript class generated for a component.
///
/// Custom elements must be JavaScript classes extending `HTMLElement`, which
/// Rust compiled to `wasm32` cannot produce directly. The shim class bridges
/// the gap: its instances hold the wasm-bindgen export of the Rust struct and
/// forward every lifecycle callback to it. [`define`] evaluates the rendered
/// source and registers the resulting class.
#[derive(Debug, Clone)]
pub struct ClassShim {
    class_name: String,
    element_name: String,
    base_class: String,
    extends: Option<String>,
    observed_attributes: Vec<String>,
    observed_events: Vec<String>,
}

impl ClassShim {
    /// Creates a shim description for the given class and element names.
    pub fn new(class_name: impl Into<String>, element_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            element_name: element_name.into(),
            base_class: "HTMLElement".to_owned(),
            extends: None,
            observed_attributes: Vec::new(),
            observed_events: Vec::new(),
        }
    }

    /// Sets the JavaScript class the element extends. Defaults to `HTMLElement`.
    /// A non-default base class describes a customized built-in and must be
    /// paired with [`ClassShim::extends`] naming the built-in tag, or the
    /// browser throws `TypeError` in `super()` on first construction.
    #[must_use]
    pub fn base_class(mut self, base_class: impl Into<String>) -> Self {
        self.base_class = base_class.into();
        self
    }

    /// Sets the tag of the built-in element a customized built-in extends
    /// (`"input"` for a class extending `HTMLInputElement`). Rendered as the
    /// `{ extends: ... }` option of `customElements.define`.
    #[must_use]
    pub fn extends(mut self, tag: impl Into<String>) -> Self {
        self.extends = Some(tag.into());
        self
    }

    /// Sets the attribute names reported through `attributeChangedCallback`.
    #[must_use]
    pub fn observed_attributes<I>(mut self, attributes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.observed_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the DOM event types the element listens for and routes to the
    /// component's event handler.
    #[must_use]
    pub fn observed_events<I>(mut self, events: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.observed_events = events.into_iter().map(Into::into).collect();
        self
    }

    /// The custom element tag this shim registers.
    #[must_use]
    pub fn element_name(&self) -> &str {
        &self.element_name
    }

    /// The name of the generated class.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Renders the JavaScript source of the shim class.
    ///
    /// The source expects a single `impl` parameter: a factory function
    /// producing the wasm-bindgen export that backs each element instance.
    /// Evaluating it defines the element and returns its constructor.
    #[must_use]
    pub fn source(&self) -> String {
        let define_options = self
            .extends
            .as_ref()
            .map_or_else(String::new, |tag| format!(", {{ extends: \"{tag}\" }}"));
        format!(
            "class {class} extends {base} {{
    constructor() {{
        super();
        this._impl = impl();
        this._impl.init_impl(this);
        const self = this;
        for (const type of {events}) {{
            this.addEventListener(type, function (event) {{
                self._impl.handle_event_impl(self, event);
            }});
        }}
    }}

    static get observedAttributes() {{
        return {attributes};
    }}

    connectedCallback() {{
        this._impl.connected_impl(this);
    }}

    disconnectedCallback() {{
        this._impl.disconnected_impl(this);
    }}

    adoptedCallback() {{
        this._impl.adopted_impl(this);
    }}

    attributeChangedCallback(name, oldValue, newValue) {{
        this._impl.attribute_changed_impl(this, name, oldValue, newValue);
    }}
}}
customElements.define(\"{element}\", {class}{options});
return customElements.get(\"{element}\");",
            class = self.class_name,
            base = self.base_class,
            element = self.element_name,
            options = define_options,
            attributes = json_array(&self.observed_attributes),
            events = json_array(&self.observed_events),
        )
    }
}

/// A defined component. Holds the JavaScript constructor returned by the
/// custom element registry.
#[derive(Debug, Clone)]
pub struct ComponentHandle {
    constructor: Function,
}

impl ComponentHandle {
    /// The JavaScript constructor function for the element.
    #[must_use]
    pub fn constructor(&self) -> &Function {
        &self.constructor
    }
}

/// Registers the component `T` under the name carried by `shim`.
///
/// The factory closure handed to the shim class is leaked into the JavaScript
/// heap: the registry keeps the class alive for the lifetime of the page, so
/// the closure can never be dropped from Rust again.
///
/// # Errors
///
/// Returns [`ComponentError::InvalidName`] for names the registry would
/// reject, [`ComponentError::AlreadyDefined`] if the name is taken, and
/// [`ComponentError::Js`] for exceptions raised while evaluating the shim.
pub fn define<T>(shim: &ClassShim) -> Result<ComponentHandle, ComponentError>
where
    T: ElementSpec + 'static,
{
    if !is_valid_element_name(shim.element_name()) {
        return Err(ComponentError::InvalidName(shim.element_name().to_owned()));
    }

    let window = dom::window()?;
    let registry = window.custom_elements();
    if registry.get(shim.element_name()).is_truthy() {
        return Err(ComponentError::AlreadyDefined(
            shim.element_name().to_owned(),
        ));
    }

    let class = Function::new_with_args("impl", &shim.source());
    let factory: Box<dyn FnMut() -> T> = Box::new(T::new);
    let factory = Closure::wrap(factory)
        .into_js_value()
        .unchecked_into::<Function>();
    let constructor = class.call1(&window, factory.as_ref())?.dyn_into::<Function>()?;

    tracing::debug!(
        element = shim.element_name(),
        class = shim.class_name(),
        "defined custom element"
    );

    Ok(ComponentHandle { constructor })
}

fn json_array(entries: &[String]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_owned())
}

/// A conservative subset of the custom element name rules: lowercase ASCII
/// start, at least one hyphen, no uppercase characters.
fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase()
        && name.contains('-')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_declares_the_class() {
        let source = ClassShim::new("MyElement", "my-element").source();
        assert!(source.contains("class MyElement extends HTMLElement {"));
        assert!(source.contains("customElements.define(\"my-element\", MyElement);"));
        assert!(source.contains("return customElements.get(\"my-element\");"));
    }

    #[test]
    fn source_renders_observed_lists() {
        let source = ClassShim::new("Card", "x-card")
            .observed_attributes(["class", "title"])
            .observed_events(["click"])
            .source();
        assert!(source.contains(r#"return ["class","title"];"#));
        assert!(source.contains(r#"for (const type of ["click"]) {"#));
    }

    #[test]
    fn source_defaults_to_empty_lists() {
        let source = ClassShim::new("Card", "x-card").source();
        assert!(source.contains("return [];"));
        assert!(source.contains("for (const type of []) {"));
    }

    #[test]
    fn source_honours_the_base_class() {
        let source = ClassShim::new("FancyInput", "fancy-input")
            .base_class("HTMLInputElement")
            .extends("input")
            .source();
        assert!(source.contains("class FancyInput extends HTMLInputElement {"));
    }

    #[test]
    fn customized_built_ins_define_with_the_extends_option() {
        let source = ClassShim::new("FancyInput", "fancy-input")
            .base_class("HTMLInputElement")
            .extends("input")
            .source();
        assert!(source.contains(
            r#"customElements.define("fancy-input", FancyInput, { extends: "input" });"#
        ));
    }

    #[test]
    fn autonomous_elements_define_without_options() {
        let source = ClassShim::new("Card", "x-card").source();
        assert!(source.contains(r#"customElements.define("x-card", Card);"#));
    }

    #[test]
    fn element_name_rules() {
        assert!(is_valid_element_name("my-element"));
        assert!(is_valid_element_name("x-a1.b_c"));
        assert!(!is_valid_element_name("widget"));
        assert!(!is_valid_element_name("My-Element"));
        assert!(!is_valid_element_name(""));
    }
}
