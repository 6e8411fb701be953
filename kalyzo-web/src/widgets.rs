//! DOM bindings for the featured carousel and the sticky sidebar.
use crate::config;
use crate::i18n;
use crate::dom::{js_error_message, listen, query_all, query_document, viewport_width, window};
use kalyzo_storefront::numbers::round_f64_to_i64;
use kalyzo_storefront::{Carousel, PanelMetrics, ScrollDirection, ScrollSync};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

pub const CAROUSEL_SELECTOR: &str = "[data-island=\"carousel\"]";
pub const STICKY_SELECTOR: &str = "[data-island=\"sticky-sync\"]";

fn first(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn card_width(track: &Element) -> f64 {
    track
        .first_element_child()
        .and_then(|card| card.dyn_into::<HtmlElement>().ok())
        .map_or(0.0, |card| f64::from(card.offset_width()))
}

const fn nav_label_key(direction: ScrollDirection) -> &'static str {
    match direction {
        ScrollDirection::Previous => "carousel.previous",
        ScrollDirection::Next => "carousel.next",
    }
}

fn bind_carousel(root: &Element) -> Result<(), JsValue> {
    let Some(track) = first(root, ".carousel-track") else {
        return Ok(());
    };
    let widgets = &config::storefront().widgets;
    let count = usize::try_from(track.child_element_count()).unwrap_or(0);
    let carousel = Carousel::new(count, widgets.carousel_gap_px, widgets.carousel_nav_threshold);

    for (selector, direction) in [
        ("[data-carousel-prev]", ScrollDirection::Previous),
        ("[data-carousel-next]", ScrollDirection::Next),
    ] {
        let Some(button) = first(root, selector) else {
            continue;
        };
        if !carousel.shows_navigation() {
            button.class_list().add_1("d-none")?;
            continue;
        }
        if !button.has_attribute("aria-label") {
            button.set_attribute("aria-label", &i18n::t(nav_label_key(direction)))?;
        }
        let track = track.clone();
        listen(&button, "click", move |_| {
            let options = ScrollToOptions::new();
            options.set_left(carousel.scroll_by(direction, card_width(&track)));
            options.set_behavior(ScrollBehavior::Smooth);
            track.scroll_by_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}

fn metrics(panel: &Element) -> PanelMetrics {
    PanelMetrics {
        scroll_top: f64::from(panel.scroll_top()),
        scroll_height: f64::from(panel.scroll_height()),
        client_height: f64::from(panel.client_height()),
    }
}

fn set_scroll_top(panel: &Element, value: f64) {
    let value = i32::try_from(round_f64_to_i64(value)).unwrap_or(0);
    panel.set_scroll_top(value);
}

fn bind_sticky(panel: Element) -> Result<(), JsValue> {
    let widgets = &config::storefront().widgets;
    let sync = Rc::new(RefCell::new(ScrollSync::new(
        widgets.scroll_multiplier,
        widgets.desktop_min_width,
    )));
    let win = window()?;

    {
        let sync = Rc::clone(&sync);
        let panel = panel.clone();
        listen(&win, "scroll", move |_| {
            let mut sync = sync.borrow_mut();
            if !sync.is_enabled(viewport_width()) {
                return;
            }
            let scroll_y = window().and_then(|w| w.scroll_y()).unwrap_or_default();
            let next = sync.on_scroll(scroll_y, metrics(&panel));
            set_scroll_top(&panel, next);
        })?;
    }

    listen(&win, "resize", move |_| {
        if let Some(top) = sync.borrow().on_resize(viewport_width()) {
            set_scroll_top(&panel, top);
        }
    })?;
    Ok(())
}

/// Bind every carousel and sticky panel on the page.
pub fn bind() {
    for root in query_document(CAROUSEL_SELECTOR) {
        if let Err(err) = bind_carousel(&root) {
            log::error!("carousel binding failed: {}", js_error_message(&err));
        }
    }
    for root in query_document(STICKY_SELECTOR) {
        let panel = query_all(&root, ".sticky-scroll")
            .into_iter()
            .next()
            .unwrap_or(root);
        if let Err(err) = bind_sticky(panel) {
            log::error!("sticky sync binding failed: {}", js_error_message(&err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_buttons_get_translated_labels() {
        i18n::set_lang("es");
        assert_eq!(i18n::t(nav_label_key(ScrollDirection::Previous)), "Anterior");
        assert_eq!(i18n::t(nav_label_key(ScrollDirection::Next)), "Siguiente");
    }
}
