//! Browser implementations of the storefront's transport and token seams.
use crate::dom::{document, js_error_message, window};
use async_trait::async_trait;
use kalyzo_storefront::csrf::{CSRF_FIELD, TokenSource};
use kalyzo_storefront::transport::CSRF_HEADER;
use kalyzo_storefront::{Request, RequestBody, Response, Transport, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, HtmlDocument, HtmlInputElement, RequestCredentials, RequestInit};

/// `fetch`-backed transport sending same-origin credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[allow(clippy::future_not_send)]
async fn fetch(request: &Request) -> Result<Response, JsValue> {
    let headers = Headers::new()?;
    headers.set("X-Requested-With", "XMLHttpRequest")?;
    if let Some(content_type) = request.body.content_type() {
        headers.set("Content-Type", content_type)?;
    }
    if let Some(token) = &request.csrf_token {
        headers.set(CSRF_HEADER, token)?;
    }

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_credentials(RequestCredentials::SameOrigin);
    init.set_headers(&headers);
    if !matches!(request.body, RequestBody::Empty) {
        init.set_body(&JsValue::from_str(&request.body.encode()));
    }

    let browser_request = web_sys::Request::new_with_str_and_init(&request.path, &init)?;
    let response: web_sys::Response = JsFuture::from(window()?.fetch_with_request(&browser_request))
        .await?
        .dyn_into()?;
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .unwrap_or_default();
    Ok(Response {
        status: response.status(),
        body,
    })
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        fetch(&request)
            .await
            .map_err(|err| TransportError::Network(js_error_message(&err)))
    }
}

/// Reads the anti-forgery token from the rendered page at request time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomTokenSource;

impl TokenSource for DomTokenSource {
    fn hidden_field(&self) -> Option<String> {
        document()
            .ok()?
            .query_selector(&format!("[name={CSRF_FIELD}]"))
            .ok()
            .flatten()?
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(|input| input.value())
    }

    fn cookie_header(&self) -> Option<String> {
        document()
            .ok()?
            .dyn_into::<HtmlDocument>()
            .ok()?
            .cookie()
            .ok()
    }
}
