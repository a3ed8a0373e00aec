use web_sys::{Document, Window};

use crate::error::ComponentError;

pub(crate) fn window() -> Result<Window, ComponentError> {
    web_sys::window().ok_or(ComponentError::DomUnavailable)
}

pub(crate) fn document() -> Result<Document, ComponentError> {
    window()?.document().ok_or(ComponentError::DomUnavailable)
}
