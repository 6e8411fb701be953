#![cfg(target_arch = "wasm32")]

use kalyzo_storefront::{CardFeedback, Control, Effect, EffectSink, VariantId};
use kalyzo_web::{dom, mount};
use kalyzo_web::page::PageSink;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn fixture(markup: &str) -> web_sys::Element {
    let doc = dom::document().unwrap();
    let host = doc.create_element("div").unwrap();
    host.set_inner_html(markup);
    doc.body().unwrap().append_child(&host).unwrap();
    host
}

#[wasm_bindgen_test]
fn dim_and_restore_cart_line() {
    let host = fixture(r#"<div data-cart-line="41">Lámpara</div>"#);
    let line: HtmlElement = host
        .query_selector("[data-cart-line]")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();

    PageSink.apply(Effect::DimLine(VariantId(41)));
    assert_eq!(line.style().get_property_value("opacity").unwrap(), "0.5");
    PageSink.apply(Effect::RestoreLine(VariantId(41)));
    assert_eq!(line.style().get_property_value("opacity").unwrap(), "1");
    host.remove();
}

#[wasm_bindgen_test]
fn card_button_busy_and_feedback_classes() {
    let host = fixture(r#"<button data-card-add="9" data-product-name="Vela">+</button>"#);
    let button = host.query_selector("[data-card-add]").unwrap().unwrap();

    PageSink.apply(Effect::Busy(Control::CardAdd(VariantId(9))));
    assert!(button.has_attribute("disabled"));
    assert!(button.class_list().contains("is-loading"));

    PageSink.apply(Effect::CardFeedback(VariantId(9), CardFeedback::Done));
    PageSink.apply(Effect::Idle(Control::CardAdd(VariantId(9))));
    assert!(!button.has_attribute("disabled"));
    assert!(button.class_list().contains("is-added"));
    host.remove();
}

#[wasm_bindgen_test]
fn clear_cart_panel_empties_lines_and_total() {
    let host = fixture(
        r#"<ul data-cart-lines><li>uno</li></ul><strong data-cart-total>$90.000</strong>"#,
    );
    PageSink.apply(Effect::ClearCartPanel);
    let lines = host.query_selector("[data-cart-lines]").unwrap().unwrap();
    let total = host.query_selector("[data-cart-total]").unwrap().unwrap();
    assert_eq!(lines.child_element_count(), 0);
    assert_eq!(total.text_content().unwrap(), "$0");
    host.remove();
}

fn hidden_comments(host: &web_sys::Element) -> u32 {
    host.query_selector_all(".comment-item.d-none").unwrap().length()
}

#[wasm_bindgen_test]
async fn comments_island_keeps_server_rendered_comments() {
    let items: String = (1..=12)
        .map(|n| format!(r#"<div class="comment-item">Comentario {n}</div>"#))
        .collect();
    let host = fixture(&format!(r#"<div data-island="comments">{items}</div>"#));
    let island = host.query_selector("[data-island]").unwrap().unwrap();

    mount::mount_comments(&island).unwrap();
    dom::sleep_ms(50).await.unwrap();

    assert_eq!(island.query_selector_all(".comment-item").unwrap().length(), 12);
    assert_eq!(hidden_comments(&island), 7);

    let button: HtmlElement = island
        .query_selector("#load-more-comments")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    button.click();
    dom::sleep_ms(50).await.unwrap();

    assert_eq!(hidden_comments(&island), 0);
    assert!(island.query_selector("#load-more-comments").unwrap().is_none());
    host.remove();
}

#[wasm_bindgen_test]
async fn pause_waits_then_returns() {
    let started = js_sys::Date::now();
    dom::pause(20, "test").await;
    assert!(js_sys::Date::now() - started >= 15.0);
}
