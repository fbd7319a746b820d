//! Small helpers over `web-sys` shared by the behaviour modules.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

/// Every element under `root` matching `selector`, in document order.
pub fn query_all(root: &impl AsRef<JsValue>, selector: &str) -> Result<Vec<Element>, JsValue> {
    let root = root.as_ref();
    let list = if let Some(document) = root.dyn_ref::<Document>() {
        document.query_selector_all(selector)?
    } else if let Some(element) = root.dyn_ref::<Element>() {
        element.query_selector_all(selector)?
    } else {
        return Err(JsValue::from_str("query root is neither a document nor an element"));
    };

    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn html_by_selector(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Sets several inline style properties at once, stopping at the first failure.
pub fn set_styles(element: &HtmlElement, properties: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (name, value) in properties {
        style.set_property(name, value)?;
    }
    Ok(())
}

/// Attaches a listener that lives as long as the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Attaches a listener the browser drops after its first dispatch.
pub fn listen_once<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnOnce(Event) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    // wasm-bindgen frees a once-closure after its first call
    callback.forget();
    Ok(())
}
