//! Reads the server-rendered page and mounts the component islands.
use crate::components::{
    CartCounterIsland, CheckoutIsland, CommentsIsland, ProductIsland, StarRatingIsland, ToastHost,
};
use crate::dom::{dataset, document, js_error_message, query_all, query_document};
use crate::{cart_panel, config, page, runtime, widgets};
use kalyzo_storefront::{ImageRef, SelectorState, UiAction, Variant, VariantId};
use wasm_bindgen::prelude::*;
use web_sys::Element;
use yew::BaseComponent;

fn island_selector(name: &str) -> String {
    format!("[data-island=\"{name}\"]")
}

fn island(name: &str) -> Option<Element> {
    query_document(&island_selector(name)).into_iter().next()
}

/// Island host, appended to `<body>` when the page does not provide one.
fn island_or_create(name: &str) -> Result<Element, JsValue> {
    if let Some(host) = island(name) {
        return Ok(host);
    }
    let doc = document()?;
    let host = doc.create_element("div")?;
    host.set_attribute("data-island", name)?;
    doc.body()
        .ok_or_else(|| JsValue::from_str("`body` unavailable"))?
        .append_child(&host)?;
    Ok(host)
}

fn read_variants(host: &Element) -> Vec<Variant> {
    query_all(host, "[data-variant-id]")
        .iter()
        .filter_map(|el| match Variant::from_data_attrs(&dataset(el)) {
            Ok(variant) => Some(variant),
            Err(err) => {
                log::warn!("skipping variant markup: {err}");
                None
            }
        })
        .collect()
}

fn read_gallery(host: &Element) -> Vec<ImageRef> {
    query_all(host, "img[data-thumbnail]")
        .iter()
        .filter_map(|img| {
            let url = img
                .get_attribute("data-thumbnail")
                .filter(|url| !url.is_empty())
                .or_else(|| img.get_attribute("src"))?;
            Some(ImageRef {
                url,
                alt: img.get_attribute("alt").unwrap_or_default(),
            })
        })
        .collect()
}

/// Selector state captured from the product host, or an empty selector on
/// pages without one.
fn read_selector(host: Option<&Element>) -> SelectorState {
    let cap = config::storefront().max_quantity;
    let Some(host) = host else {
        return SelectorState::new(Vec::new(), Vec::new(), None, cap);
    };
    let initial = host
        .get_attribute("data-selected")
        .and_then(|raw| raw.parse::<VariantId>().ok());
    SelectorState::new(read_variants(host), read_gallery(host), initial, cap)
}

fn mount<C>(host: Element)
where
    C: BaseComponent<Properties = ()>,
{
    host.set_inner_html("");
    yew::Renderer::<C>::with_root(host).render();
}

/// Render `C` into a fresh child of `host`, leaving the server-rendered
/// content in place.
fn mount_appended<C>(host: &Element) -> Result<(), JsValue>
where
    C: BaseComponent<Properties = ()>,
{
    let slot = document()?.create_element("div")?;
    host.append_child(&slot)?;
    yew::Renderer::<C>::with_root(slot).render();
    Ok(())
}

/// Paginate the `.comment-item` children already rendered inside `host`.
///
/// # Errors
/// Returns an error if the pager slot cannot be created.
pub fn mount_comments(host: &Element) -> Result<(), JsValue> {
    mount_appended::<CommentsIsland>(host)
}

/// Mount every island present on the page and hydrate the cart counter.
///
/// # Errors
/// Returns an error if the document or body is unavailable.
pub fn mount_page() -> Result<(), JsValue> {
    let product_host = island("product");
    runtime::install(read_selector(product_host.as_ref()));

    mount::<ToastHost>(island_or_create("toasts")?);
    mount::<CheckoutIsland>(island_or_create("checkout")?);
    if let Some(host) = island("cart-counter") {
        mount::<CartCounterIsland>(host);
    }
    if let Some(host) = product_host {
        mount::<ProductIsland>(host);
    }
    for host in query_document(&island_selector("rating")) {
        mount::<StarRatingIsland>(host);
    }
    if let Some(host) = island("comments") {
        mount_comments(&host)?;
    }

    cart_panel::bind()?;
    widgets::bind();

    runtime::dispatch(UiAction::HydrateCounter {
        reopen_cart_panel: page::panel_flag_present(),
    });
    Ok(())
}

/// Log mount failures instead of panicking during start-up.
pub fn start() {
    if let Err(err) = mount_page() {
        log::error!("storefront mount failed: {}", js_error_message(&err));
        crate::dom::console_error("Kalyzo storefront could not start");
    }
}
