use wasm_bindgen::JsValue;

/// Error type produced when defining or instantiating components.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ComponentError {
    /// The DOM APIs are not accessible (e.g. when executed outside of a browser).
    #[error("DOM is not available")]
    DomUnavailable,
    /// The element name is already present in the custom element registry.
    #[error("custom element `{0}` has already been defined")]
    AlreadyDefined(String),
    /// The name is not a valid custom element name.
    #[error("`{0}` is not a valid custom element name")]
    InvalidName(String),
    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for ComponentError {
    fn from(value: JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<ComponentError> for JsValue {
    fn from(value: ComponentError) -> Self {
        Self::from(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_element() {
        let err = ComponentError::AlreadyDefined("my-element".into());
        assert_eq!(
            err.to_string(),
            "custom element `my-element` has already been defined"
        );
    }
}
