//! Command dispatcher: maps UI actions to handlers that talk to the server and
//! emit [`Effect`]s for the page layer.
use crate::api::StoreApi;
use crate::checkout::CustomerForm;
use crate::config::StorefrontConfig;
use crate::csrf::TokenSource;
use crate::effect::{CardFeedback, Control, Effect};
use crate::error::{StorefrontError, ValidationError};
use crate::notice::{Message, MessageKey, Toast};
use crate::selector::SelectorState;
use crate::transport::Transport;
use crate::variant::{OptionGroupKind, VariantId};
use std::cell::{Ref, RefCell};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Page load: fetch the count, optionally reopening the cart panel.
    HydrateCounter { reopen_cart_panel: bool },
    AddFromCard {
        variant: VariantId,
        product_name: String,
    },
    AddSelected,
    UpdateLine {
        variant: VariantId,
        quantity: i64,
        cart_panel_open: bool,
    },
    RemoveLine {
        variant: VariantId,
        cart_panel_open: bool,
    },
    ClearCart,
    SelectVariant(VariantId),
    SelectOption {
        kind: OptionGroupKind,
        index: usize,
    },
    SetQuantity(u32),
    PayOnDelivery,
    LoadSummary,
    SubmitOrder(CustomerForm),
}

/// Receives effects as soon as they are produced, so busy states show while
/// a request is still in flight.
pub trait EffectSink {
    fn apply(&self, effect: Effect);
}

impl EffectSink for RefCell<Vec<Effect>> {
    fn apply(&self, effect: Effect) {
        self.borrow_mut().push(effect);
    }
}

/// Text for the header counter; `None` means the badge is hidden.
#[must_use]
pub fn counter_label(count: u32) -> Option<String> {
    (count > 0).then(|| count.to_string())
}

pub struct Dispatcher<T, S> {
    api: StoreApi<T, S>,
    config: StorefrontConfig,
    selector: RefCell<SelectorState>,
}

impl<T, S> Dispatcher<T, S>
where
    T: Transport,
    S: TokenSource,
{
    pub const fn new(api: StoreApi<T, S>, config: StorefrontConfig, selector: SelectorState) -> Self {
        Self {
            api,
            config,
            selector: RefCell::new(selector),
        }
    }

    pub const fn api(&self) -> &StoreApi<T, S> {
        &self.api
    }

    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn selector(&self) -> Ref<'_, SelectorState> {
        self.selector.borrow()
    }

    /// Run an action and collect its effects.
    pub async fn dispatch(&self, action: UiAction) -> Vec<Effect> {
        let sink = RefCell::new(Vec::new());
        self.dispatch_into(action, &sink).await;
        sink.into_inner()
    }

    /// Run an action, streaming effects into `sink`.
    pub async fn dispatch_into(&self, action: UiAction, sink: &dyn EffectSink) {
        match action {
            UiAction::HydrateCounter { reopen_cart_panel } => {
                self.hydrate_counter(reopen_cart_panel, sink).await;
            }
            UiAction::AddFromCard {
                variant,
                product_name,
            } => self.add_from_card(variant, &product_name, sink).await,
            UiAction::AddSelected => self.add_selected(sink).await,
            UiAction::UpdateLine {
                variant,
                quantity,
                cart_panel_open,
            } => {
                self.update_line(variant, quantity, cart_panel_open, sink)
                    .await;
            }
            UiAction::RemoveLine {
                variant,
                cart_panel_open,
            } => self.remove_line(variant, cart_panel_open, sink).await,
            UiAction::ClearCart => self.clear_cart(sink).await,
            UiAction::SelectVariant(id) => self.select_variant(id),
            UiAction::SelectOption { kind, index } => {
                self.selector.borrow_mut().select_option(kind, index);
            }
            UiAction::SetQuantity(quantity) => self.selector.borrow_mut().set_quantity(quantity),
            UiAction::PayOnDelivery => self.pay_on_delivery(sink).await,
            UiAction::LoadSummary => self.load_summary(sink).await,
            UiAction::SubmitOrder(form) => self.submit_order(&form, sink).await,
        }
    }

    fn success(&self, message: Message) -> Effect {
        Effect::Toast(Toast::success(message, &self.config.timing))
    }

    fn failure(&self, err: &StorefrontError, fallback: MessageKey) -> Effect {
        let message = match err {
            StorefrontError::MissingToken => Message::Key(MessageKey::SecurityError),
            StorefrontError::Transport(_) | StorefrontError::Decode(_) => Message::Key(fallback),
            StorefrontError::Rejected(text) if text.trim().is_empty() => Message::Key(fallback),
            StorefrontError::Rejected(text) => Message::Server(text.clone()),
            StorefrontError::Validation(ValidationError::QuantityBelowMinimum) => {
                Message::Key(MessageKey::QuantityMinimum)
            }
            StorefrontError::Validation(
                ValidationError::NoVariantSelected | ValidationError::UnknownVariant(_),
            ) => Message::Key(MessageKey::SelectVariant),
            StorefrontError::Validation(ValidationError::InvalidForm(_)) => {
                Message::Key(MessageKey::InvalidForm)
            }
        };
        Effect::Toast(Toast::error(message, &self.config.timing))
    }

    async fn hydrate_counter(&self, reopen_cart_panel: bool, sink: &dyn EffectSink) {
        match self.api.count().await {
            Ok(count) => sink.apply(Effect::SetCounter(count)),
            Err(err) => log::error!("could not load cart counter: {err}"),
        }
        if reopen_cart_panel {
            sink.apply(Effect::OpenCartPanel { delay_ms: 0 });
            sink.apply(Effect::StripPanelFlag);
        }
    }

    async fn add_from_card(&self, variant: VariantId, product_name: &str, sink: &dyn EffectSink) {
        let control = Control::CardAdd(variant);
        sink.apply(Effect::Busy(control));
        match self.api.add(variant, 1).await {
            Ok(receipt) => {
                sink.apply(Effect::SetCounter(receipt.cart_count));
                sink.apply(Effect::CardFeedback(variant, CardFeedback::Done));
                sink.apply(self.success(Message::KeyWith(
                    MessageKey::ProductAdded,
                    vec![("name", product_name.to_string())],
                )));
                sink.apply(Effect::OpenCartPanel {
                    delay_ms: self.config.timing.cart_panel_delay_ms,
                });
            }
            Err(err) => {
                sink.apply(Effect::CardFeedback(variant, CardFeedback::Failed));
                sink.apply(self.failure(&err, MessageKey::AddFailed));
            }
        }
        sink.apply(Effect::Idle(control));
    }

    async fn add_selected(&self, sink: &dyn EffectSink) {
        let selected = {
            let selector = self.selector.borrow();
            selector.selected_id().map(|id| (id, selector.quantity()))
        };
        let Some((variant, quantity)) = selected else {
            sink.apply(self.failure(
                &ValidationError::NoVariantSelected.into(),
                MessageKey::AddFailed,
            ));
            return;
        };

        sink.apply(Effect::Busy(Control::AddToCart));
        match self.api.add(variant, quantity).await {
            Ok(receipt) => {
                sink.apply(Effect::SetCounter(receipt.cart_count));
                let message = if receipt.message.is_empty() {
                    Message::Key(MessageKey::AddedToCart)
                } else {
                    Message::Server(receipt.message)
                };
                sink.apply(self.success(message));
                sink.apply(Effect::OpenCartPanel {
                    delay_ms: self.config.timing.cart_panel_delay_ms,
                });
            }
            Err(err) => sink.apply(self.failure(&err, MessageKey::AddFailed)),
        }
        sink.apply(Effect::Idle(Control::AddToCart));
    }

    async fn update_line(
        &self,
        variant: VariantId,
        quantity: i64,
        cart_panel_open: bool,
        sink: &dyn EffectSink,
    ) {
        if quantity < 1 {
            sink.apply(self.failure(
                &ValidationError::QuantityBelowMinimum.into(),
                MessageKey::UpdateFailed,
            ));
            return;
        }
        sink.apply(Effect::DimLine(variant));
        match self.api.update(variant, quantity).await {
            Ok(_) => {
                sink.apply(self.success(Message::Key(MessageKey::QuantityUpdated)));
                sink.apply(Effect::Reload {
                    delay_ms: self.config.timing.reload_delay_ms,
                    reopen_cart_panel: cart_panel_open,
                });
            }
            Err(err) => {
                sink.apply(self.failure(&err, MessageKey::UpdateFailed));
                sink.apply(Effect::RestoreLine(variant));
            }
        }
    }

    async fn remove_line(&self, variant: VariantId, cart_panel_open: bool, sink: &dyn EffectSink) {
        sink.apply(Effect::DimLine(variant));
        match self.api.remove(variant).await {
            Ok(_) => {
                sink.apply(self.success(Message::Key(MessageKey::ItemRemoved)));
                sink.apply(Effect::Reload {
                    delay_ms: self.config.timing.reload_delay_ms,
                    reopen_cart_panel: cart_panel_open,
                });
            }
            Err(err) => {
                sink.apply(self.failure(&err, MessageKey::RemoveFailed));
                sink.apply(Effect::RestoreLine(variant));
            }
        }
    }

    async fn clear_cart(&self, sink: &dyn EffectSink) {
        match self.api.clear().await {
            Ok(_) => {
                sink.apply(self.success(Message::Key(MessageKey::CartCleared)));
                sink.apply(Effect::Reload {
                    delay_ms: self.config.timing.reload_delay_ms,
                    reopen_cart_panel: false,
                });
            }
            Err(err) => sink.apply(self.failure(&err, MessageKey::ClearFailed)),
        }
    }

    fn select_variant(&self, id: VariantId) {
        if let Err(err) = self.selector.borrow_mut().select(id) {
            log::warn!("ignoring selection: {err}");
        }
    }

    async fn pay_on_delivery(&self, sink: &dyn EffectSink) {
        sink.apply(Effect::Busy(Control::PayOnDelivery));
        let count = self.api.count().await.unwrap_or_else(|err| {
            log::error!("could not check cart before checkout: {err}");
            0
        });

        let mut open_delay = 0;
        if count == 0 {
            let selected = self.selector.borrow().selected_id();
            let Some(variant) = selected else {
                sink.apply(self.failure(
                    &ValidationError::NoVariantSelected.into(),
                    MessageKey::AddFailed,
                ));
                sink.apply(Effect::Idle(Control::PayOnDelivery));
                return;
            };
            match self.api.add(variant, 1).await {
                Ok(receipt) => {
                    sink.apply(Effect::SetCounter(receipt.cart_count));
                    sink.apply(self.success(Message::Key(MessageKey::AddedToCart)));
                    open_delay = self.config.timing.checkout_open_delay_ms;
                }
                Err(err) => {
                    sink.apply(self.failure(&err, MessageKey::AddFailed));
                    sink.apply(Effect::Idle(Control::PayOnDelivery));
                    return;
                }
            }
        }

        sink.apply(Effect::OpenCheckout {
            delay_ms: open_delay,
        });
        sink.apply(Effect::Idle(Control::PayOnDelivery));
        self.load_summary(sink).await;
    }

    async fn load_summary(&self, sink: &dyn EffectSink) {
        sink.apply(Effect::SummaryLoading);
        match self.api.items().await {
            Ok(summary) => sink.apply(Effect::ShowSummary(summary)),
            Err(err) => {
                log::error!("could not load order summary: {err}");
                sink.apply(Effect::SummaryFailed);
            }
        }
    }

    async fn submit_order(&self, form: &CustomerForm, sink: &dyn EffectSink) {
        if let Err(err) = form.validate() {
            log::debug!("checkout form rejected locally: {err}");
            sink.apply(Effect::ReportFormValidity);
            sink.apply(self.failure(
                &StorefrontError::from(err),
                MessageKey::InvalidForm,
            ));
            return;
        }

        sink.apply(Effect::Busy(Control::SubmitOrder));
        match self.api.create_order(form).await {
            Ok(receipt) => {
                sink.apply(Effect::OpenExternal(
                    receipt.whatsapp_url(&self.config.whatsapp_base),
                ));
                sink.apply(Effect::CloseCheckout);
                sink.apply(self.success(Message::KeyWith(
                    MessageKey::OrderCreated,
                    vec![("order", receipt.order_id)],
                )));
                sink.apply(Effect::ResetCheckoutForm);
                sink.apply(Effect::SetCounter(0));
                sink.apply(Effect::ClearCartPanel);
            }
            Err(err @ StorefrontError::Rejected(_)) => {
                sink.apply(self.failure(&err, MessageKey::OrderFailed));
            }
            Err(err) => sink.apply(self.failure(&err, MessageKey::CheckoutFailed)),
        }
        sink.apply(Effect::Idle(Control::SubmitOrder));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_hidden_iff_zero() {
        assert_eq!(counter_label(0), None);
        assert_eq!(counter_label(1), Some("1".to_string()));
        assert_eq!(counter_label(42), Some("42".to_string()));
    }
}
