//! HTTP transport abstraction.
//!
//! The browser layer implements [`Transport`] over `fetch`; tests and the tester
//! CLI use [`crate::backend::MemoryBackend`].

use async_trait::async_trait;
use thiserror::Error;

pub const CSRF_HEADER: &str = "X-CSRFToken";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

impl RequestBody {
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Form(_) => Some(FORM_CONTENT_TYPE),
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }

    /// Encode the body as sent on the wire.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Form(pairs) => pairs
                .iter()
                .map(|(key, value)| {
                    format!(
                        "{}={}",
                        urlencoding::encode(key),
                        urlencoding::encode(value)
                    )
                })
                .collect::<Vec<_>>()
                .join("&"),
            Self::Json(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
    pub csrf_token: Option<String>,
}

impl Request {
    #[must_use]
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            body: RequestBody::Empty,
            csrf_token: None,
        }
    }

    #[must_use]
    pub fn post(path: &str, body: RequestBody, csrf_token: String) -> Self {
        Self {
            method: Method::Post,
            path: path.to_string(),
            body,
            csrf_token: Some(csrf_token),
        }
    }
}

/// Raw response: the body is returned for every status because the server
/// reports business failures as JSON on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} without a readable body")]
    Status { status: u16 },
}

#[async_trait(?Send)]
pub trait Transport {
    /// Perform one HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns an error when the request could not complete.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait(?Send)]
impl<T: Transport + ?Sized> Transport for std::rc::Rc<T> {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_body_is_url_encoded() {
        let body = RequestBody::Form(vec![
            ("variant_id".into(), "42".into()),
            ("quantity".into(), "2".into()),
            ("note".into(), "a&b c".into()),
        ]);
        assert_eq!(body.encode(), "variant_id=42&quantity=2&note=a%26b%20c");
        assert_eq!(body.content_type(), Some(FORM_CONTENT_TYPE));
    }

    #[test]
    fn json_and_empty_bodies() {
        let body = RequestBody::Json(serde_json::json!({"city": "Cali"}));
        assert_eq!(body.encode(), r#"{"city":"Cali"}"#);
        assert_eq!(body.content_type(), Some(JSON_CONTENT_TYPE));
        assert_eq!(RequestBody::Empty.encode(), "");
        assert_eq!(RequestBody::Empty.content_type(), None);
    }

    #[test]
    fn get_requests_carry_no_token() {
        let request = Request::get("/orders/carrito/count/");
        assert_eq!(request.method.as_str(), "GET");
        assert!(request.csrf_token.is_none());
    }
}
