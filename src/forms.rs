//! Required-field checks on submit and the "Processing..." button state.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use crate::dom;
use crate::flash;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const ERROR_BORDER: &str = "var(--accent-error)";
pub const DEFAULT_BORDER: &str = "var(--border-color)";
pub const PROCESSING_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i> Processing..."#;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Current value of a form control, or `None` for elements that don't carry one.
fn field_value(field: &Element) -> Option<String> {
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        field.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }
}

/// Flags a blank required field until the user types into it again. A field
/// that is still flagged keeps its pending reset listener.
fn flag_field(field: &HtmlElement) -> Result<(), JsValue> {
    let style = field.style();
    if style.get_property_value("border-color")? == ERROR_BORDER {
        return Ok(());
    }
    style.set_property("border-color", ERROR_BORDER)?;
    let field_for_reset = field.clone();
    dom::listen_once(field, "input", move |_| {
        let _ = field_for_reset.style().set_property("border-color", DEFAULT_BORDER);
    })
}

/// Every `[required]` control in the form whose value is blank. Nothing is
/// styled here.
pub fn blank_required_fields(form: &Element) -> Result<Vec<HtmlElement>, JsValue> {
    Ok(dom::query_all(form, "[required]")?
        .into_iter()
        .filter(|field| field_value(field).is_some_and(|value| is_blank(&value)))
        .filter_map(|field| field.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Flags every blank `[required]` field in the form; returns how many there were.
pub fn flag_missing_fields(form: &Element) -> Result<usize, JsValue> {
    let blank = blank_required_fields(form)?;
    for field in &blank {
        flag_field(field)?;
    }
    Ok(blank.len())
}

pub fn setup_validation(document: &Document) -> Result<(), JsValue> {
    let forms = dom::query_all(document, "form")?;
    for form in &forms {
        let form_for_submit = form.clone();
        let document = document.clone();
        dom::listen(form, "submit", move |event| {
            let blank = match blank_required_fields(&form_for_submit) {
                Ok(blank) if blank.is_empty() => return,
                Ok(blank) => blank,
                Err(e) => {
                    // Unchecked forms don't go out
                    debug!("Required-field lookup failed: {:?}", e);
                    event.prevent_default();
                    let _ = flash::show(&document, MISSING_FIELDS_MESSAGE, "error");
                    return;
                }
            };

            // Blocked before any styling so a failed style write can't let it through
            event.prevent_default();
            for field in &blank {
                if let Err(e) = flag_field(field) {
                    debug!("Could not flag required field: {:?}", e);
                }
            }
            debug!("Blocked submit with {} empty required fields", blank.len());
            let _ = flash::show(&document, MISSING_FIELDS_MESSAGE, "error");
        })?;
    }
    debug!("Validation wired on {} forms", forms.len());
    Ok(())
}

/// Swaps the submit button for a spinner once the form is valid. The button
/// stays disabled for the rest of the page's life.
pub fn setup_loading_state(document: &Document) -> Result<(), JsValue> {
    for button in dom::query_all(document, "form button[type=\"submit\"]")? {
        let Ok(button) = button.dyn_into::<HtmlButtonElement>() else {
            continue;
        };
        let button_for_click = button.clone();
        dom::listen(&button, "click", move |_| {
            let form = button_for_click
                .closest("form")
                .ok()
                .flatten()
                .and_then(|form| form.dyn_into::<HtmlFormElement>().ok());
            if form.is_some_and(|form| form.check_validity()) {
                button_for_click.set_inner_html(PROCESSING_HTML);
                button_for_click.set_disabled(true);
            }
        })?;
    }
    Ok(())
}
