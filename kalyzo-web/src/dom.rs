use js_sys::{Function, Promise};
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement, Window};

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns an error outside of a browser context.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("`window` unavailable"))
}

/// Retrieve the document object for DOM interactions.
///
/// # Errors
/// Returns an error when no document is attached to the window.
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("`document` unavailable"))
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: u32) -> Result<(), JsValue> {
    if duration_ms == 0 {
        return Ok(());
    }
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve =
        resolve_slot.ok_or_else(|| JsValue::from_str("resolve function should be set"))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let timeout = i32::try_from(duration_ms).unwrap_or(i32::MAX);
    let _ = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        timeout,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// Wait `duration_ms`, logging a timer failure instead of returning it. The
/// caller's follow-up runs either way.
#[allow(clippy::future_not_send)]
pub async fn pause(duration_ms: u32, purpose: &str) {
    if let Err(err) = sleep_ms(duration_ms).await {
        log::warn!("{purpose} timer failed: {}", js_error_message(&err));
    }
}

/// All elements matching `selector`, in document order.
#[must_use]
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Elements matching `selector` anywhere in the document.
#[must_use]
pub fn query_document(selector: &str) -> Vec<Element> {
    document()
        .ok()
        .and_then(|doc| doc.document_element())
        .map(|root| query_all(&root, selector))
        .unwrap_or_default()
}

/// Snapshot of an element's `data-*` attributes keyed by their camelCase name.
#[must_use]
pub fn dataset(element: &Element) -> BTreeMap<String, String> {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return BTreeMap::new();
    };
    let map = html.dataset();
    js_sys::Object::keys(&map)
        .iter()
        .filter_map(|key| key.as_string())
        .filter_map(|key| map.get(&key).map(|value| (key, value)))
        .collect()
}

/// Nearest ancestor (or self) of the event target matching `selector`.
#[must_use]
pub fn closest_target(event: &web_sys::Event, selector: &str) -> Option<Element> {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
}

/// Register a listener on `target` for the lifetime of the page.
///
/// # Errors
/// Returns an error if the browser refuses the listener.
pub fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Current viewport width in CSS pixels.
#[must_use]
pub fn viewport_width() -> f64 {
    window()
        .ok()
        .and_then(|win| win.inner_width().ok())
        .and_then(|width| width.as_f64())
        .unwrap_or_default()
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}
