//! Event delegation for the server-rendered cart markup: product card buttons,
//! cart panel lines and the panel's checkout button.
use crate::dom::{closest_target, document, listen};
use crate::page::is_cart_panel_open;
use crate::runtime;
use kalyzo_storefront::{UiAction, VariantId};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlInputElement};

pub const CARD_ADD_ATTR: &str = "data-card-add";
pub const CART_LINE_ATTR: &str = "data-cart-line";
pub const CART_ACTION_ATTR: &str = "data-cart-action";
pub const QTY_INPUT_SELECTOR: &str = ".cart-qty-input";
pub const CHECKOUT_OPEN_SELECTOR: &str = "[data-checkout-open]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Increase,
    Decrease,
    Remove,
    Clear,
}

impl LineAction {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "increase" => Some(Self::Increase),
            "decrease" => Some(Self::Decrease),
            "remove" => Some(Self::Remove),
            "clear" => Some(Self::Clear),
            _ => None,
        }
    }
}

/// Dispatcher action for a cart panel button. `current` is the quantity shown
/// in the line's input; decreasing below one is left to the dispatcher.
#[must_use]
pub fn line_action(
    action: LineAction,
    variant: Option<VariantId>,
    current: i64,
    cart_panel_open: bool,
) -> Option<UiAction> {
    match (action, variant) {
        (LineAction::Clear, _) => Some(UiAction::ClearCart),
        (LineAction::Increase, Some(variant)) => Some(UiAction::UpdateLine {
            variant,
            quantity: current + 1,
            cart_panel_open,
        }),
        (LineAction::Decrease, Some(variant)) => Some(UiAction::UpdateLine {
            variant,
            quantity: current - 1,
            cart_panel_open,
        }),
        (LineAction::Remove, Some(variant)) => Some(UiAction::RemoveLine {
            variant,
            cart_panel_open,
        }),
        (_, None) => None,
    }
}

/// Unparseable quantities count as zero so the minimum-quantity notice shows.
#[must_use]
pub fn parse_quantity(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn attr_variant(el: &Element, attr: &str) -> Option<VariantId> {
    el.get_attribute(attr)?.parse().ok()
}

fn line_of(el: &Element) -> Option<Element> {
    el.closest(&format!("[{CART_LINE_ATTR}]")).ok().flatten()
}

fn line_quantity(line: &Element) -> i64 {
    line.query_selector(QTY_INPUT_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map_or(1, |input| parse_quantity(&input.value()))
}

fn on_click(event: &Event) {
    if let Some(button) = closest_target(event, &format!("[{CARD_ADD_ATTR}]")) {
        event.prevent_default();
        let Some(variant) = attr_variant(&button, CARD_ADD_ATTR) else {
            log::warn!("card add button without a variant id");
            return;
        };
        let product_name = button
            .get_attribute("data-product-name")
            .unwrap_or_default();
        runtime::dispatch(UiAction::AddFromCard {
            variant,
            product_name,
        });
        return;
    }

    if let Some(button) = closest_target(event, &format!("[{CART_ACTION_ATTR}]")) {
        event.prevent_default();
        let Some(action) = button
            .get_attribute(CART_ACTION_ATTR)
            .as_deref()
            .and_then(LineAction::parse)
        else {
            return;
        };
        let line = line_of(&button);
        let variant = line
            .as_ref()
            .and_then(|line| attr_variant(line, CART_LINE_ATTR));
        let current = line.as_ref().map_or(1, line_quantity);
        if let Some(action) = line_action(action, variant, current, is_cart_panel_open()) {
            runtime::dispatch(action);
        }
        return;
    }

    if closest_target(event, CHECKOUT_OPEN_SELECTOR).is_some() {
        event.prevent_default();
        runtime::dispatch(UiAction::PayOnDelivery);
    }
}

fn on_change(event: &Event) {
    let Some(input) = closest_target(event, QTY_INPUT_SELECTOR) else {
        return;
    };
    let Some(variant) = line_of(&input).and_then(|line| attr_variant(&line, CART_LINE_ATTR))
    else {
        return;
    };
    let Some(value) = input.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value) else {
        return;
    };
    runtime::dispatch(UiAction::UpdateLine {
        variant,
        quantity: parse_quantity(&value),
        cart_panel_open: is_cart_panel_open(),
    });
}

/// Attach the document-level listeners.
///
/// # Errors
/// Returns an error if the document is unavailable.
pub fn bind() -> Result<(), JsValue> {
    let doc = document()?;
    listen(&doc, "click", |event| on_click(&event))?;
    listen(&doc, "change", |event| on_change(&event))?;
    Ok(())
}
