//! Scripted shopper journeys driven through the dispatcher against the
//! in-memory server.
use anyhow::{Result, bail, ensure};
use kalyzo_storefront::{
    CardFeedback, CatalogEntry, CustomerForm, Dispatcher, Effect, ImageRef, Message, MessageKey,
    MemoryBackend, PurchaseActions, SelectorState, StaticToken, StoreApi, StorefrontConfig,
    ToastKind, UiAction, Variant, VariantId, VariantOption,
};
use std::rc::Rc;

const TOKEN: &str = "kalyzo-tester-token";
const LAMP: u64 = 11;
const CUSHION: u64 = 12;

type ShopDispatcher = Dispatcher<Rc<MemoryBackend>, StaticToken>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Smoke,
    Add,
    CardAdd,
    UpdateRemove,
    Clear,
    Checkout,
    CheckoutInvalidForm,
    SoldOut,
    MissingToken,
    NetworkFailure,
}

impl Scenario {
    pub const ALL: [Self; 10] = [
        Self::Smoke,
        Self::Add,
        Self::CardAdd,
        Self::UpdateRemove,
        Self::Clear,
        Self::Checkout,
        Self::CheckoutInvalidForm,
        Self::SoldOut,
        Self::MissingToken,
        Self::NetworkFailure,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::Add => "add",
            Self::CardAdd => "card-add",
            Self::UpdateRemove => "update-remove",
            Self::Clear => "clear",
            Self::Checkout => "checkout",
            Self::CheckoutInvalidForm => "checkout-invalid-form",
            Self::SoldOut => "sold-out",
            Self::MissingToken => "missing-token",
            Self::NetworkFailure => "network-failure",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Smoke => "Counter hydration on page load",
            Self::Add => "Add the selected variant from the product page",
            Self::CardAdd => "Quick add from a product card",
            Self::UpdateRemove => "Change a line quantity, then remove it",
            Self::Clear => "Empty the whole cart",
            Self::Checkout => "Pay on delivery from an empty cart through WhatsApp",
            Self::CheckoutInvalidForm => "Invalid buyer form never reaches the server",
            Self::SoldOut => "Out-of-stock variant cannot be bought",
            Self::MissingToken => "Mutations without an anti-forgery token",
            Self::NetworkFailure => "Transport failure restores the cart line",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub async fn run(self) -> Result<()> {
        match self {
            Self::Smoke => smoke().await,
            Self::Add => add_selected().await,
            Self::CardAdd => card_add().await,
            Self::UpdateRemove => update_remove().await,
            Self::Clear => clear().await,
            Self::Checkout => checkout().await,
            Self::CheckoutInvalidForm => checkout_invalid_form().await,
            Self::SoldOut => sold_out().await,
            Self::MissingToken => missing_token().await,
            Self::NetworkFailure => network_failure().await,
        }
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    Scenario::ALL
        .into_iter()
        .map(|s| (s.key(), s.description()))
        .collect()
}

fn variant(id: u64, stock: i64, color: &str) -> Variant {
    Variant {
        id: VariantId(id),
        main_image: ImageRef {
            url: format!("/media/productos/{id}.webp"),
            alt: String::new(),
        },
        images: Vec::new(),
        price: 129_900.0,
        discount_price: Some(99_900.0),
        discount_percentage: 23,
        stock,
        options: vec![VariantOption {
            option: "Color".to_string(),
            value: color.to_string(),
        }],
    }
}

struct Shop {
    backend: Rc<MemoryBackend>,
    dispatcher: ShopDispatcher,
}

impl Shop {
    fn new() -> Self {
        Self::with_token(StaticToken::new(TOKEN))
    }

    fn with_token(token: StaticToken) -> Self {
        let backend = Rc::new(
            MemoryBackend::new(TOKEN)
                .with_variant(LAMP, CatalogEntry::new("Lámpara Nórdica", 99_900.0, 6))
                .with_variant(CUSHION, CatalogEntry::new("Cojín Boho", 35_000.0, 0)),
        );
        let config = StorefrontConfig::default();
        let api = StoreApi::new(Rc::clone(&backend), token, config.endpoints.clone());
        let selector = SelectorState::new(
            vec![variant(LAMP, 6, "Arena"), variant(CUSHION, 0, "Terracota")],
            Vec::new(),
            Some(VariantId(LAMP)),
            config.max_quantity,
        );
        Self {
            backend,
            dispatcher: Dispatcher::new(api, config, selector),
        }
    }

    async fn run(&self, action: UiAction) -> Vec<Effect> {
        self.dispatcher.dispatch(action).await
    }
}

fn buyer() -> CustomerForm {
    CustomerForm {
        customer_name: "Valentina Gómez".into(),
        customer_phone: "310 555 1234".into(),
        customer_email: "valentina@example.com".into(),
        department: "Cundinamarca".into(),
        city: "Bogotá".into(),
        neighborhood: "Chapinero".into(),
        address: "Calle 63 # 9-20".into(),
        note: String::new(),
    }
}

fn last_counter(effects: &[Effect]) -> Option<u32> {
    effects.iter().rev().find_map(|e| match e {
        Effect::SetCounter(n) => Some(*n),
        _ => None,
    })
}

fn error_toast(effects: &[Effect]) -> Option<&Message> {
    effects
        .iter()
        .filter_map(Effect::toast)
        .find(|t| t.kind == ToastKind::Error)
        .map(|t| &t.message)
}

async fn smoke() -> Result<()> {
    let shop = Shop::new();
    shop.backend.put_in_cart(LAMP, 2);
    let effects = shop
        .run(UiAction::HydrateCounter {
            reopen_cart_panel: false,
        })
        .await;
    ensure!(
        last_counter(&effects) == Some(2),
        "counter not hydrated: {effects:?}"
    );
    ensure!(
        shop.backend.posted_paths().is_empty(),
        "hydration must not mutate the cart"
    );
    Ok(())
}

async fn add_selected() -> Result<()> {
    let shop = Shop::new();
    shop.run(UiAction::SetQuantity(3)).await;
    let effects = shop.run(UiAction::AddSelected).await;
    ensure!(
        shop.backend.cart_quantity(LAMP) == Some(3),
        "expected 3 lamps in cart, got {:?}",
        shop.backend.cart_quantity(LAMP)
    );
    ensure!(last_counter(&effects) == Some(3), "counter not refreshed");
    ensure!(
        effects
            .iter()
            .any(|e| matches!(e, Effect::OpenCartPanel { .. })),
        "cart panel did not open"
    );
    Ok(())
}

async fn card_add() -> Result<()> {
    let shop = Shop::new();
    let effects = shop
        .run(UiAction::AddFromCard {
            variant: VariantId(LAMP),
            product_name: "Lámpara Nórdica".into(),
        })
        .await;
    ensure!(
        shop.backend.posted_paths().len() == 1,
        "card add must post exactly once"
    );
    ensure!(
        effects.contains(&Effect::CardFeedback(VariantId(LAMP), CardFeedback::Done)),
        "card did not show success feedback"
    );
    ensure!(last_counter(&effects) == Some(1), "counter not refreshed");
    Ok(())
}

async fn update_remove() -> Result<()> {
    let shop = Shop::new();
    shop.backend.put_in_cart(LAMP, 1);

    let effects = shop
        .run(UiAction::UpdateLine {
            variant: VariantId(LAMP),
            quantity: 4,
            cart_panel_open: true,
        })
        .await;
    ensure!(shop.backend.cart_quantity(LAMP) == Some(4), "update not applied");
    ensure!(
        effects.iter().any(|e| matches!(
            e,
            Effect::Reload {
                reopen_cart_panel: true,
                ..
            }
        )),
        "reload must reopen the cart panel"
    );

    let before = shop.backend.requests().len();
    let effects = shop
        .run(UiAction::UpdateLine {
            variant: VariantId(LAMP),
            quantity: 0,
            cart_panel_open: true,
        })
        .await;
    ensure!(
        shop.backend.requests().len() == before,
        "quantity below one must be rejected locally"
    );
    ensure!(
        error_toast(&effects) == Some(&Message::Key(MessageKey::QuantityMinimum)),
        "missing minimum quantity notice"
    );

    shop.run(UiAction::RemoveLine {
        variant: VariantId(LAMP),
        cart_panel_open: false,
    })
    .await;
    ensure!(shop.backend.cart_quantity(LAMP).is_none(), "line not removed");
    Ok(())
}

async fn clear() -> Result<()> {
    let shop = Shop::new();
    shop.backend.put_in_cart(LAMP, 2);
    let effects = shop.run(UiAction::ClearCart).await;
    ensure!(shop.backend.cart_count() == 0, "cart not emptied");
    ensure!(
        effects.iter().any(|e| matches!(e, Effect::Reload { .. })),
        "clear must reload the page"
    );
    Ok(())
}

async fn checkout() -> Result<()> {
    let shop = Shop::new();
    let effects = shop.run(UiAction::PayOnDelivery).await;
    ensure!(
        shop.backend.cart_quantity(LAMP) == Some(1),
        "empty cart must receive the selected variant once"
    );
    ensure!(
        effects
            .iter()
            .any(|e| matches!(e, Effect::OpenCheckout { .. })),
        "checkout modal did not open"
    );
    ensure!(
        effects.iter().any(|e| matches!(e, Effect::ShowSummary(s) if !s.is_empty())),
        "summary not shown"
    );

    let effects = shop.run(UiAction::SubmitOrder(buyer())).await;
    let Some(url) = effects.iter().find_map(|e| match e {
        Effect::OpenExternal(url) => Some(url.clone()),
        _ => None,
    }) else {
        bail!("no WhatsApp handoff: {effects:?}");
    };
    ensure!(url.starts_with("https://wa.me/"), "unexpected handoff url {url}");
    ensure!(shop.backend.orders().len() == 1, "order not stored");
    ensure!(shop.backend.cart_count() == 0, "cart not cleared after order");
    ensure!(last_counter(&effects) == Some(0), "counter not reset");
    Ok(())
}

async fn checkout_invalid_form() -> Result<()> {
    let shop = Shop::new();
    shop.backend.put_in_cart(LAMP, 1);
    let form = CustomerForm {
        customer_phone: "12345".into(),
        ..buyer()
    };
    let effects = shop.run(UiAction::SubmitOrder(form)).await;
    ensure!(
        effects.first() == Some(&Effect::ReportFormValidity),
        "invalid form did not report validity: {effects:?}"
    );
    ensure!(
        error_toast(&effects) == Some(&Message::Key(MessageKey::InvalidForm)),
        "invalid form gave no feedback: {effects:?}"
    );
    ensure!(
        shop.backend.posted_paths().is_empty(),
        "invalid form reached the server"
    );
    Ok(())
}

async fn sold_out() -> Result<()> {
    let shop = Shop::new();
    shop.run(UiAction::SelectVariant(VariantId(CUSHION))).await;
    let Some(view) = shop.dispatcher.selector().view() else {
        bail!("no variant selected");
    };
    ensure!(view.actions == PurchaseActions::SoldOut, "variant not sold out");
    ensure!(view.quantities.is_empty(), "sold-out variant offers quantities");

    let effects = shop
        .run(UiAction::AddFromCard {
            variant: VariantId(CUSHION),
            product_name: "Cojín Boho".into(),
        })
        .await;
    match error_toast(&effects) {
        Some(Message::Server(text)) if text.starts_with("Stock insuficiente") => {}
        other => bail!("expected the server stock message, got {other:?}"),
    }
    ensure!(shop.backend.cart_count() == 0, "sold-out item entered the cart");
    Ok(())
}

async fn missing_token() -> Result<()> {
    let shop = Shop::with_token(StaticToken::missing());
    let effects = shop
        .run(UiAction::AddFromCard {
            variant: VariantId(LAMP),
            product_name: "Lámpara Nórdica".into(),
        })
        .await;
    ensure!(
        error_toast(&effects) == Some(&Message::Key(MessageKey::SecurityError)),
        "missing security notice"
    );
    ensure!(
        shop.backend.posted_paths().is_empty(),
        "request sent without a token"
    );
    Ok(())
}

async fn network_failure() -> Result<()> {
    let shop = Shop::new();
    shop.backend.put_in_cart(LAMP, 2);
    shop.backend.fail_next(1);
    let effects = shop
        .run(UiAction::UpdateLine {
            variant: VariantId(LAMP),
            quantity: 3,
            cart_panel_open: false,
        })
        .await;
    ensure!(
        effects.contains(&Effect::RestoreLine(VariantId(LAMP))),
        "line not restored"
    );
    ensure!(
        error_toast(&effects) == Some(&Message::Key(MessageKey::UpdateFailed)),
        "expected the generic update error"
    );
    ensure!(
        shop.backend.cart_quantity(LAMP) == Some(2),
        "failed update changed the cart"
    );
    Ok(())
}
