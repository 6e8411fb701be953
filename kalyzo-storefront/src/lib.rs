//! Kalyzo Storefront Core
//!
//! Platform-agnostic client logic for the Kalyzo shop: cart calls, the variant
//! selector, the pay-on-delivery checkout and the small page widgets. The
//! browser crate renders this state and applies the [`Effect`]s it produces.

pub mod api;
pub mod backend;
pub mod checkout;
pub mod config;
pub mod csrf;
pub mod dispatch;
pub mod effect;
pub mod error;
pub mod format;
pub mod notice;
pub mod numbers;
pub mod selector;
pub mod transport;
pub mod variant;
pub mod widgets;

// Re-export commonly used types
pub use api::{AddReceipt, StoreApi};
pub use backend::{CatalogEntry, MemoryBackend, StoredOrder};
pub use checkout::{CustomerForm, OrderReceipt, OrderSummary, SummaryLine, whatsapp_url};
pub use config::{ConfigError, Endpoints, RevealMode, StorefrontConfig, Timing, WidgetConfig};
pub use csrf::{StaticToken, TokenSource};
pub use dispatch::{Dispatcher, EffectSink, UiAction, counter_label};
pub use effect::{CardFeedback, Control, Effect};
pub use error::{ErrorKind, FieldError, FieldReason, StorefrontError, ValidationError};
pub use format::{format_amount, format_price};
pub use notice::{Message, MessageKey, Toast, ToastKind};
pub use selector::{SelectorState, VariantView};
pub use transport::{Method, Request, RequestBody, Response, Transport, TransportError};
pub use variant::{
    ImageRef, OptionGroupKind, OptionRow, OptionRows, PriceBlock, PurchaseActions, Variant,
    VariantId, VariantOption, quantity_options,
};
pub use widgets::{Carousel, CommentPager, PanelMetrics, ScrollDirection, ScrollSync, StarRating};
