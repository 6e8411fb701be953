//! Anti-forgery token lookup.

pub const CSRF_COOKIE: &str = "csrftoken";
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Where the client finds the anti-forgery token at request time.
pub trait TokenSource {
    /// Value of the hidden `csrfmiddlewaretoken` form field, if rendered.
    fn hidden_field(&self) -> Option<String>;
    /// The raw `document.cookie` string, if any.
    fn cookie_header(&self) -> Option<String>;

    /// Resolve the token: hidden field first, then the `csrftoken` cookie.
    fn token(&self) -> Option<String> {
        resolve_token(
            self.hidden_field().as_deref(),
            self.cookie_header().as_deref(),
        )
    }
}

/// Fixed token, used when the token is known up front (tests, tester CLI).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticToken(pub Option<String>);

impl StaticToken {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self(Some(token.to_string()))
    }

    #[must_use]
    pub const fn missing() -> Self {
        Self(None)
    }
}

impl TokenSource for StaticToken {
    fn hidden_field(&self) -> Option<String> {
        self.0.clone()
    }

    fn cookie_header(&self) -> Option<String> {
        None
    }
}

#[must_use]
pub fn resolve_token(hidden_field: Option<&str>, cookies: Option<&str>) -> Option<String> {
    if let Some(value) = hidden_field.filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }
    cookies.and_then(|header| cookie_value(header, CSRF_COOKIE))
}

/// Find a cookie by name in a `document.cookie` style header and percent-decode it.
#[must_use]
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            urlencoding::decode(raw)
                .map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_field_wins_over_cookie() {
        assert_eq!(
            resolve_token(Some("field-token"), Some("csrftoken=cookie-token")),
            Some("field-token".to_string())
        );
    }

    #[test]
    fn falls_back_to_cookie_and_decodes() {
        let header = "sessionid=abc; csrftoken=a%2Bb%3D; theme=dark";
        assert_eq!(resolve_token(None, Some(header)), Some("a+b=".to_string()));
        assert_eq!(resolve_token(Some(""), Some(header)), Some("a+b=".to_string()));
    }

    #[test]
    fn similar_cookie_names_do_not_match() {
        assert_eq!(cookie_value("xcsrftoken=nope", CSRF_COOKIE), None);
        assert_eq!(cookie_value("csrftokenx=nope", CSRF_COOKIE), None);
        assert_eq!(cookie_value("csrftoken=", CSRF_COOKIE), None);
    }

    #[test]
    fn missing_everywhere_is_none() {
        assert_eq!(resolve_token(None, None), None);
        assert_eq!(StaticToken::missing().token(), None);
        assert_eq!(StaticToken::new("t").token(), Some("t".to_string()));
    }
}
