//! Toast notifications.
//!
//! Messages are either localisation keys resolved by the UI layer or
//! server-supplied text shown verbatim.

use crate::config::Timing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// Localisable message keys. The dotted key is looked up in the i18n bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    SecurityError,
    AddFailed,
    UpdateFailed,
    RemoveFailed,
    ClearFailed,
    CheckoutFailed,
    OrderFailed,
    QuantityMinimum,
    SelectVariant,
    InvalidForm,
    AddedToCart,
    ProductAdded,
    QuantityUpdated,
    ItemRemoved,
    CartCleared,
    OrderCreated,
}

impl MessageKey {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SecurityError => "cart.errors.security",
            Self::AddFailed => "cart.errors.add",
            Self::UpdateFailed => "cart.errors.update",
            Self::RemoveFailed => "cart.errors.remove",
            Self::ClearFailed => "cart.errors.clear",
            Self::CheckoutFailed => "checkout.errors.process",
            Self::OrderFailed => "checkout.errors.create",
            Self::QuantityMinimum => "cart.errors.quantity_min",
            Self::SelectVariant => "product.errors.select_variant",
            Self::InvalidForm => "checkout.errors.invalid_form",
            Self::AddedToCart => "cart.added",
            Self::ProductAdded => "cart.added_named",
            Self::QuantityUpdated => "cart.updated",
            Self::ItemRemoved => "cart.removed",
            Self::CartCleared => "cart.cleared",
            Self::OrderCreated => "checkout.order_created",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key(MessageKey),
    KeyWith(MessageKey, Vec<(&'static str, String)>),
    Server(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: Message,
    pub ttl_ms: u32,
}

impl Toast {
    #[must_use]
    pub const fn success(message: Message, timing: &Timing) -> Self {
        Self {
            kind: ToastKind::Success,
            message,
            ttl_ms: timing.toast_ms,
        }
    }

    #[must_use]
    pub const fn error(message: Message, timing: &Timing) -> Self {
        Self {
            kind: ToastKind::Error,
            message,
            ttl_ms: timing.error_toast_ms,
        }
    }

    #[must_use]
    pub const fn info(message: Message, timing: &Timing) -> Self {
        Self {
            kind: ToastKind::Info,
            message,
            ttl_ms: timing.toast_ms,
        }
    }
}
