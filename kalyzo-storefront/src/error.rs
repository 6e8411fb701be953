//! Error taxonomy shared by every storefront operation.

use crate::transport::TransportError;
use thiserror::Error;

/// Failure category as presented to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The anti-forgery token could not be located.
    MissingToken,
    /// Network failure or an unreadable response.
    Transport,
    /// The server answered `success: false`.
    Rejected,
    /// Rejected locally before any request was sent.
    Validation,
}

/// A single form field that failed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: FieldReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldReason {
    Required,
    TooShort,
    InvalidPhone,
    InvalidEmail,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            FieldReason::Required => "is required",
            FieldReason::TooShort => "is too short",
            FieldReason::InvalidPhone => "is not a valid mobile number",
            FieldReason::InvalidEmail => "is not a valid e-mail address",
        };
        write!(f, "{} {reason}", self.field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("quantity must be at least 1")]
    QuantityBelowMinimum,
    #[error("no variant selected")]
    NoVariantSelected,
    #[error("unknown variant {0}")]
    UnknownVariant(u64),
    #[error("invalid form: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    InvalidForm(Vec<FieldError>),
}

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("anti-forgery token not found")]
    MissingToken,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StorefrontError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingToken => ErrorKind::MissingToken,
            Self::Transport(_) | Self::Decode(_) => ErrorKind::Transport,
            Self::Rejected(_) => ErrorKind::Rejected,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Server-supplied message, when the failure came from the server.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(StorefrontError::MissingToken.kind(), ErrorKind::MissingToken);
        assert_eq!(
            StorefrontError::Transport(TransportError::Network("offline".into())).kind(),
            ErrorKind::Transport
        );
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(StorefrontError::Decode(decode).kind(), ErrorKind::Transport);
        assert_eq!(
            StorefrontError::Rejected("Sin stock".into()).kind(),
            ErrorKind::Rejected
        );
        assert_eq!(
            StorefrontError::from(ValidationError::NoVariantSelected).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn server_message_only_for_rejections() {
        let err = StorefrontError::Rejected("Producto no encontrado".into());
        assert_eq!(err.server_message(), Some("Producto no encontrado"));
        assert_eq!(err.to_string(), "Producto no encontrado");
        assert!(StorefrontError::MissingToken.server_message().is_none());
    }

    #[test]
    fn invalid_form_lists_fields() {
        let err = ValidationError::InvalidForm(vec![
            FieldError {
                field: "city",
                reason: FieldReason::Required,
            },
            FieldError {
                field: "customer_phone",
                reason: FieldReason::InvalidPhone,
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("city is required"));
        assert!(text.contains("customer_phone is not a valid mobile number"));
    }
}
