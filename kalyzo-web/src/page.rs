//! Applies dispatcher effects that touch server-rendered markup, then forwards
//! every effect to the islands through the bus.
use crate::bus::{self, PageEvent};
use crate::dom::{document, query_document, sleep_ms, window};
use js_sys::{Function, Reflect};
use kalyzo_storefront::{CardFeedback, Control, Effect, EffectSink, VariantId};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

pub const CART_PANEL_ID: &str = "carritoOffcanvas";
const PANEL_FLAG_KEY: &str = "offcanvas";
const PANEL_FLAG_VALUE: &str = "open";
const CARD_FEEDBACK_MS: u32 = 800;

/// `href` with `offcanvas=open` in its query string, fragment preserved.
#[must_use]
pub fn with_panel_flag(href: &str) -> String {
    let (base, fragment) = href.split_once('#').map_or((href, None), |(b, f)| (b, Some(f)));
    let (path, query) = base.split_once('?').map_or((base, ""), |(p, q)| (p, q));
    let flag = format!("{PANEL_FLAG_KEY}={PANEL_FLAG_VALUE}");
    let mut params: Vec<&str> = query
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with(&format!("{PANEL_FLAG_KEY}=")))
        .collect();
    params.push(&flag);
    let mut out = format!("{path}?{}", params.join("&"));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// True when a `location.search` string asks for the cart panel to reopen.
#[must_use]
pub fn has_panel_flag(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .any(|(key, value)| key == PANEL_FLAG_KEY && value == PANEL_FLAG_VALUE)
}

/// Whether the current address carries the reopen flag.
#[must_use]
pub fn panel_flag_present() -> bool {
    window()
        .and_then(|win| win.location().search())
        .is_ok_and(|search| has_panel_flag(&search))
}

#[must_use]
pub fn is_cart_panel_open() -> bool {
    document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(CART_PANEL_ID))
        .is_some_and(|panel| panel.class_list().contains("show"))
}

fn open_cart_panel() -> Result<(), JsValue> {
    let Some(panel) = document()?.get_element_by_id(CART_PANEL_ID) else {
        return Ok(());
    };
    let win = window()?;
    let bootstrap = Reflect::get(&win, &JsValue::from_str("bootstrap"))?;
    if bootstrap.is_undefined() {
        return panel.class_list().add_1("show");
    }
    let offcanvas = Reflect::get(&bootstrap, &JsValue::from_str("Offcanvas"))?;
    let get_or_create: Function =
        Reflect::get(&offcanvas, &JsValue::from_str("getOrCreateInstance"))?.dyn_into()?;
    let instance = get_or_create.call1(&offcanvas, &panel)?;
    let show: Function = Reflect::get(&instance, &JsValue::from_str("show"))?.dyn_into()?;
    show.call0(&instance)?;
    Ok(())
}

fn reload(reopen_cart_panel: bool) -> Result<(), JsValue> {
    let location = window()?.location();
    if reopen_cart_panel {
        location.set_href(&with_panel_flag(&location.href()?))
    } else {
        location.reload()
    }
}

fn strip_panel_flag() -> Result<(), JsValue> {
    let win = window()?;
    let location = win.location();
    let clean = format!("{}{}", location.pathname()?, location.hash()?);
    win.history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(&clean))
}

fn cart_line(variant: VariantId) -> Option<HtmlElement> {
    query_document(&format!("[data-cart-line=\"{variant}\"]"))
        .into_iter()
        .next()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

fn card_buttons(variant: VariantId) -> Vec<HtmlElement> {
    query_document(&format!("[data-card-add=\"{variant}\"]"))
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_card_busy(variant: VariantId, busy: bool) -> Result<(), JsValue> {
    for button in card_buttons(variant) {
        if busy {
            button.set_attribute("disabled", "")?;
            button.class_list().add_1("is-loading")?;
        } else {
            button.remove_attribute("disabled")?;
            button.class_list().remove_1("is-loading")?;
        }
    }
    Ok(())
}

fn show_card_feedback(variant: VariantId, feedback: CardFeedback) -> Result<(), JsValue> {
    let class = match feedback {
        CardFeedback::Done => "is-added",
        CardFeedback::Failed => "is-failed",
    };
    for button in card_buttons(variant) {
        button.class_list().add_1(class)?;
    }
    after(CARD_FEEDBACK_MS, move || {
        for button in card_buttons(variant) {
            button.class_list().remove_1(class)?;
        }
        Ok(())
    });
    Ok(())
}

fn clear_cart_panel() -> Result<(), JsValue> {
    for lines in query_document("[data-cart-lines]") {
        lines.set_inner_html("");
    }
    for total in query_document("[data-cart-total]") {
        total.set_text_content(Some(&kalyzo_storefront::format_price(0.0)));
    }
    Ok(())
}

fn open_external(url: &str) -> Result<(), JsValue> {
    window()?.open_with_url_and_target(url, "_blank")?;
    Ok(())
}

/// Run `task` after `delay_ms`, logging any DOM failure.
fn after(delay_ms: u32, task: impl FnOnce() -> Result<(), JsValue> + 'static) {
    spawn_local(async move {
        let outcome = match sleep_ms(delay_ms).await {
            Ok(()) => task(),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            log::error!("deferred page effect failed: {}", crate::dom::js_error_message(&err));
        }
    });
}

fn apply_to_markup(effect: &Effect) -> Result<(), JsValue> {
    match effect {
        Effect::Busy(Control::CardAdd(variant)) => set_card_busy(*variant, true),
        Effect::Idle(Control::CardAdd(variant)) => set_card_busy(*variant, false),
        Effect::CardFeedback(variant, feedback) => show_card_feedback(*variant, *feedback),
        Effect::DimLine(variant) => cart_line(*variant)
            .map_or(Ok(()), |line| line.style().set_property("opacity", "0.5")),
        Effect::RestoreLine(variant) => cart_line(*variant)
            .map_or(Ok(()), |line| line.style().set_property("opacity", "1")),
        Effect::Reload {
            delay_ms,
            reopen_cart_panel,
        } => {
            let reopen = *reopen_cart_panel;
            after(*delay_ms, move || reload(reopen));
            Ok(())
        }
        Effect::OpenCartPanel { delay_ms } => {
            after(*delay_ms, open_cart_panel);
            Ok(())
        }
        Effect::StripPanelFlag => strip_panel_flag(),
        Effect::ClearCartPanel => clear_cart_panel(),
        Effect::OpenExternal(url) => open_external(url),
        _ => Ok(()),
    }
}

/// Effect sink for the live page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSink;

impl EffectSink for PageSink {
    fn apply(&self, effect: Effect) {
        if let Err(err) = apply_to_markup(&effect) {
            log::error!(
                "could not apply {effect:?}: {}",
                crate::dom::js_error_message(&err)
            );
        }
        bus::publish(&PageEvent::Effect(effect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_flag_is_appended_once() {
        assert_eq!(
            with_panel_flag("https://kalyzo.co/carrito/"),
            "https://kalyzo.co/carrito/?offcanvas=open"
        );
        assert_eq!(
            with_panel_flag("/p/lampara/?color=rojo#reviews"),
            "/p/lampara/?color=rojo&offcanvas=open#reviews"
        );
        assert_eq!(
            with_panel_flag("/p/?offcanvas=open"),
            "/p/?offcanvas=open"
        );
    }

    #[test]
    fn panel_flag_detection() {
        assert!(has_panel_flag("?offcanvas=open"));
        assert!(has_panel_flag("?a=1&offcanvas=open"));
        assert!(!has_panel_flag("?offcanvas=closed"));
        assert!(!has_panel_flag(""));
    }
}
