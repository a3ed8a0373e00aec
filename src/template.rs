use web_sys::HtmlTemplateElement;

use crate::{dom, error::ComponentError};

/// Produces the `<template>` element to install. Implement this for a struct
/// annotated with [`#[template_element]`](macro@crate::template_element).
pub trait RenderTemplate {
    /// Builds the template element. Called once, at installation time.
    fn render() -> HtmlTemplateElement;
}

/// Marker trait asserting that the rendering function for a template exists.
/// Implemented by the macro expansion.
pub trait TemplateElement: RenderTemplate {}

/// Renders the template and appends it to the document body, returning its
/// `id` attribute if it has one.
///
/// # Errors
///
/// Returns an error if the DOM is unavailable or the append fails.
pub fn install_template<T: RenderTemplate>() -> Result<Option<String>, ComponentError> {
    let template = T::render();
    let id = template.get_attribute("id");
    let document = dom::document()?;
    let body = document.body().ok_or(ComponentError::DomUnavailable)?;
    body.append_child(template.as_ref())?;

    tracing::debug!(id = id.as_deref(), "installed template element");

    Ok(id)
}
