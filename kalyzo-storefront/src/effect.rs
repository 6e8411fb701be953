//! UI side effects produced by the dispatcher and applied by the page layer.
use crate::checkout::OrderSummary;
use crate::notice::Toast;
use crate::variant::VariantId;

/// Controls that are disabled while their own request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// The add button on a product card.
    CardAdd(VariantId),
    /// "Add to cart" on the product page.
    AddToCart,
    /// "Pay on delivery" on the product page.
    PayOnDelivery,
    /// Submit button inside the checkout modal.
    SubmitOrder,
}

/// Outcome shown on a card add button after its request settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFeedback {
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Toast(Toast),
    /// Set the header counter; hidden when zero.
    SetCounter(u32),
    Busy(Control),
    Idle(Control),
    CardFeedback(VariantId, CardFeedback),
    /// Dim a cart line while its request is in flight.
    DimLine(VariantId),
    RestoreLine(VariantId),
    /// Reload the page, optionally reopening the cart panel afterwards.
    Reload {
        delay_ms: u32,
        reopen_cart_panel: bool,
    },
    OpenCartPanel {
        delay_ms: u32,
    },
    /// Remove the `offcanvas=open` flag from the address bar.
    StripPanelFlag,
    OpenCheckout {
        delay_ms: u32,
    },
    CloseCheckout,
    SummaryLoading,
    ShowSummary(OrderSummary),
    SummaryFailed,
    /// Ask the browser to highlight invalid form fields.
    ReportFormValidity,
    ResetCheckoutForm,
    ClearCartPanel,
    /// Open an external URL in a new tab.
    OpenExternal(String),
}

impl Effect {
    #[must_use]
    pub const fn toast(&self) -> Option<&Toast> {
        match self {
            Self::Toast(toast) => Some(toast),
            _ => None,
        }
    }
}
