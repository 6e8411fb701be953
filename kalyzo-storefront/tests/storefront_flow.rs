use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use futures::executor::block_on;
use kalyzo_storefront::{
    CardFeedback, CatalogEntry, Control, CustomerForm, Dispatcher, Effect, EffectSink,
    MemoryBackend, Message, MessageKey, Method, SelectorState, StaticToken, StoreApi,
    StorefrontConfig, StorefrontError, ToastKind, UiAction, Variant, VariantId,
};

type TestDispatcher = Dispatcher<Rc<MemoryBackend>, StaticToken>;

fn variant(id: u64, stock: i64) -> Variant {
    let attrs: BTreeMap<String, String> = [
        ("variantId", id.to_string()),
        ("mainImage", format!("/media/{id}.jpg")),
        ("mainAlt", format!("Variante {id}")),
        ("price", "129900".to_string()),
        ("discountPrice", "99900".to_string()),
        ("discountPercentage", "23".to_string()),
        ("stock", stock.to_string()),
        ("images", "[]".to_string()),
        ("options", r#"[{"option": "Medida", "value": "40cm"}]"#.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();
    Variant::from_data_attrs(&attrs).unwrap()
}

fn backend() -> Rc<MemoryBackend> {
    Rc::new(
        MemoryBackend::new("csrf-abc")
            .with_variant(1, CatalogEntry::new("Lampara Nordica", 99_900.0, 5))
            .with_variant(2, CatalogEntry::new("Cojin Boho", 35_000.0, 0)),
    )
}

fn dispatcher_with(backend: &Rc<MemoryBackend>, token: StaticToken) -> TestDispatcher {
    let config = StorefrontConfig::default();
    let api = StoreApi::new(Rc::clone(backend), token, config.endpoints.clone());
    let selector = SelectorState::new(
        vec![variant(1, 5), variant(2, 0)],
        Vec::new(),
        None,
        config.max_quantity,
    );
    Dispatcher::new(api, config, selector)
}

fn dispatcher(backend: &Rc<MemoryBackend>) -> TestDispatcher {
    dispatcher_with(backend, StaticToken::new("csrf-abc"))
}

fn valid_form() -> CustomerForm {
    CustomerForm {
        customer_name: "Ana Restrepo".into(),
        customer_phone: "3001234567".into(),
        department: "Antioquia".into(),
        city: "Medellín".into(),
        address: "Cra 43A # 1-50".into(),
        ..CustomerForm::default()
    }
}

fn toasts(effects: &[Effect]) -> Vec<(ToastKind, Message)> {
    effects
        .iter()
        .filter_map(Effect::toast)
        .map(|t| (t.kind, t.message.clone()))
        .collect()
}

fn counters(effects: &[Effect]) -> Vec<u32> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::SetCounter(n) => Some(*n),
            _ => None,
        })
        .collect()
}

#[test]
fn card_add_sends_exactly_one_request_and_updates_counter() {
    let backend = backend();
    let dispatcher = dispatcher(&backend);
    let effects = block_on(dispatcher.dispatch(UiAction::AddFromCard {
        variant: VariantId(1),
        product_name: "Lampara Nordica".into(),
    }));

    assert_eq!(backend.posted_paths(), vec!["/orders/carrito/agregar/"]);
    assert_eq!(counters(&effects), vec![1]);
    assert_eq!(effects.first(), Some(&Effect::Busy(Control::CardAdd(VariantId(1)))));
    assert_eq!(effects.last(), Some(&Effect::Idle(Control::CardAdd(VariantId(1)))));
    assert!(effects.contains(&Effect::CardFeedback(VariantId(1), CardFeedback::Done)));
    assert!(effects.contains(&Effect::OpenCartPanel { delay_ms: 800 }));
    assert_eq!(
        toasts(&effects),
        vec![(
            ToastKind::Success,
            Message::KeyWith(
                MessageKey::ProductAdded,
                vec![("name", "Lampara Nordica".to_string())]
            )
        )]
    );
}

#[test]
fn card_add_form_body_carries_variant_and_quantity_one() {
    let backend = backend();
    block_on(dispatcher(&backend).dispatch(UiAction::AddFromCard {
        variant: VariantId(1),
        product_name: "Lampara Nordica".into(),
    }));
    let request = backend
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Post)
        .unwrap();
    assert_eq!(request.body.encode(), "variant_id=1&quantity=1");
    assert_eq!(request.csrf_token.as_deref(), Some("csrf-abc"));
}

#[test]
fn counter_reflects_server_count_after_repeated_adds() {
    let backend = backend();
    let dispatcher = dispatcher(&backend);
    block_on(dispatcher.dispatch(UiAction::SetQuantity(2)));
    let first = block_on(dispatcher.dispatch(UiAction::AddSelected));
    let second = block_on(dispatcher.dispatch(UiAction::AddSelected));
    assert_eq!(counters(&first), vec![2]);
    assert_eq!(counters(&second), vec![4]);
    assert_eq!(backend.cart_quantity(1), Some(4));
    assert_eq!(
        toasts(&second),
        vec![(
            ToastKind::Success,
            Message::Server("Producto agregado al carrito".into())
        )]
    );
}

#[test]
fn stock_rejection_shows_server_message_verbatim() {
    let backend = backend();
    let dispatcher = dispatcher(&backend);
    block_on(dispatcher.dispatch(UiAction::SetQuantity(5)));
    block_on(dispatcher.dispatch(UiAction::AddSelected));
    let effects = block_on(dispatcher.dispatch(UiAction::AddSelected));
    assert_eq!(
        toasts(&effects),
        vec![(
            ToastKind::Error,
            Message::Server("Stock insuficiente. Disponible: 5".into())
        )]
    );
    assert!(counters(&effects).is_empty());
}

#[test]
fn missing_token_fails_before_any_request() {
    let backend = backend();
    let dispatcher = dispatcher_with(&backend, StaticToken::missing());
    let effects = block_on(dispatcher.dispatch(UiAction::AddSelected));
    assert!(backend.posted_paths().is_empty());
    assert_eq!(
        toasts(&effects),
        vec![(ToastKind::Error, Message::Key(MessageKey::SecurityError))]
    );
    assert_eq!(effects.last(), Some(&Effect::Idle(Control::AddToCart)));
}

#[test]
fn network_failure_uses_generic_message_and_restores_line() {
    let backend = backend();
    backend.put_in_cart(1, 1);
    let dispatcher = dispatcher(&backend);
    backend.fail_next(1);
    let effects = block_on(dispatcher.dispatch(UiAction::RemoveLine {
        variant: VariantId(1),
        cart_panel_open: false,
    }));
    assert_eq!(
        effects,
        vec![
            Effect::DimLine(VariantId(1)),
            effects[1].clone(),
            Effect::RestoreLine(VariantId(1)),
        ]
    );
    assert_eq!(
        toasts(&effects),
        vec![(ToastKind::Error, Message::Key(MessageKey::RemoveFailed))]
    );
    assert_eq!(backend.cart_quantity(1), Some(1));
}

#[test]
fn update_below_one_is_rejected_locally() {
    let backend = backend();
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::UpdateLine {
        variant: VariantId(1),
        quantity: 0,
        cart_panel_open: true,
    }));
    assert!(backend.requests().is_empty());
    assert_eq!(
        toasts(&effects),
        vec![(ToastKind::Error, Message::Key(MessageKey::QuantityMinimum))]
    );
}

#[test]
fn update_reloads_and_keeps_cart_panel_open() {
    let backend = backend();
    backend.put_in_cart(1, 1);
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::UpdateLine {
        variant: VariantId(1),
        quantity: 3,
        cart_panel_open: true,
    }));
    assert_eq!(backend.cart_quantity(1), Some(3));
    assert!(effects.contains(&Effect::Reload {
        delay_ms: 500,
        reopen_cart_panel: true,
    }));
}

#[test]
fn clear_empties_the_cart_and_reloads() {
    let backend = backend();
    backend.put_in_cart(1, 2);
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::ClearCart));
    assert_eq!(backend.cart_count(), 0);
    assert!(effects.contains(&Effect::Reload {
        delay_ms: 500,
        reopen_cart_panel: false,
    }));
}

#[test]
fn hydrate_reopens_panel_and_strips_flag() {
    let backend = backend();
    backend.put_in_cart(1, 2);
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::HydrateCounter {
        reopen_cart_panel: true,
    }));
    assert_eq!(
        effects,
        vec![
            Effect::SetCounter(2),
            Effect::OpenCartPanel { delay_ms: 0 },
            Effect::StripPanelFlag,
        ]
    );
}

#[test]
fn checkout_on_empty_cart_adds_exactly_once_before_opening() {
    let backend = backend();
    let dispatcher = dispatcher(&backend);
    let effects = block_on(dispatcher.dispatch(UiAction::PayOnDelivery));

    assert_eq!(backend.posted_paths(), vec!["/orders/carrito/agregar/"]);
    assert_eq!(backend.cart_quantity(1), Some(1));
    let added = effects
        .iter()
        .position(|e| *e == Effect::SetCounter(1))
        .unwrap();
    let opened = effects
        .iter()
        .position(|e| matches!(e, Effect::OpenCheckout { delay_ms: 500 }))
        .unwrap();
    assert!(added < opened);
    assert!(matches!(effects.last(), Some(Effect::ShowSummary(summary)) if summary.lines.len() == 1));
}

#[test]
fn checkout_with_items_opens_without_adding() {
    let backend = backend();
    backend.put_in_cart(1, 2);
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::PayOnDelivery));
    assert!(backend.posted_paths().is_empty());
    assert!(effects.contains(&Effect::OpenCheckout { delay_ms: 0 }));
}

#[test]
fn checkout_count_failure_counts_as_empty() {
    let backend = backend();
    backend.put_in_cart(1, 1);
    backend.fail_next(1);
    block_on(dispatcher(&backend).dispatch(UiAction::PayOnDelivery));
    assert_eq!(backend.posted_paths(), vec!["/orders/carrito/agregar/"]);
    assert_eq!(backend.cart_quantity(1), Some(2));
}

#[test]
fn submit_order_hands_off_to_whatsapp() {
    let backend = backend();
    backend.put_in_cart(1, 2);
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::SubmitOrder(valid_form())));

    let url = effects
        .iter()
        .find_map(|e| match e {
            Effect::OpenExternal(url) => Some(url.clone()),
            _ => None,
        })
        .unwrap();
    assert!(url.starts_with("https://wa.me/573217618510?text="));
    assert!(url.contains("pedido%20%231"));
    assert!(effects.contains(&Effect::CloseCheckout));
    assert!(effects.contains(&Effect::SetCounter(0)));
    assert!(effects.contains(&Effect::ClearCartPanel));
    assert_eq!(backend.cart_count(), 0);
    assert_eq!(backend.orders().len(), 1);
    assert_eq!(backend.orders()[0].customer.city, "Medellín");
}

#[test]
fn invalid_form_never_reaches_the_server() {
    let backend = backend();
    backend.put_in_cart(1, 1);
    let form = CustomerForm {
        customer_phone: "12".into(),
        ..valid_form()
    };
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::SubmitOrder(form)));
    assert_eq!(effects[0], Effect::ReportFormValidity);
    assert_eq!(
        toasts(&effects),
        vec![(ToastKind::Error, Message::Key(MessageKey::InvalidForm))]
    );
    assert!(backend.requests().is_empty());
}

#[test]
fn blank_field_rejected_locally_still_tells_the_shopper() {
    let backend = backend();
    backend.put_in_cart(1, 1);
    let form = CustomerForm {
        department: "   ".into(),
        ..valid_form()
    };
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::SubmitOrder(form)));
    assert_eq!(
        toasts(&effects),
        vec![(ToastKind::Error, Message::Key(MessageKey::InvalidForm))]
    );
    assert!(!effects.contains(&Effect::Busy(Control::SubmitOrder)));
    assert!(backend.requests().is_empty());
}

#[test]
fn order_on_empty_cart_surfaces_server_message() {
    let backend = backend();
    let effects = block_on(dispatcher(&backend).dispatch(UiAction::SubmitOrder(valid_form())));
    assert_eq!(
        toasts(&effects),
        vec![(ToastKind::Error, Message::Server("El carrito está vacío".into()))]
    );
    assert_eq!(effects.last(), Some(&Effect::Idle(Control::SubmitOrder)));
}

#[test]
fn selecting_a_variant_is_local_only() {
    let backend = backend();
    let dispatcher = dispatcher(&backend);
    let effects = block_on(dispatcher.dispatch(UiAction::SelectVariant(VariantId(2))));
    assert!(effects.is_empty());
    assert!(backend.requests().is_empty());
    assert_eq!(dispatcher.selector().selected_id(), Some(VariantId(2)));
    assert!(dispatcher.selector().view().unwrap().quantities.is_empty());
}

#[test]
fn streaming_sink_sees_busy_before_the_request_settles() {
    struct Probe {
        backend: Rc<MemoryBackend>,
        seen: RefCell<Vec<(Effect, usize)>>,
    }
    impl EffectSink for Probe {
        fn apply(&self, effect: Effect) {
            let requests = self.backend.requests().len();
            self.seen.borrow_mut().push((effect, requests));
        }
    }

    let backend = backend();
    let probe = Probe {
        backend: Rc::clone(&backend),
        seen: RefCell::new(Vec::new()),
    };
    block_on(dispatcher(&backend).dispatch_into(UiAction::AddSelected, &probe));
    let seen = probe.seen.into_inner();
    assert_eq!(seen[0], (Effect::Busy(Control::AddToCart), 0));
    assert_eq!(seen.last().map(|(_, n)| *n), Some(1));
}

#[test]
fn api_errors_map_to_kinds() {
    let backend = backend();
    let api = StoreApi::new(
        Rc::clone(&backend),
        StaticToken::new("csrf-abc"),
        StorefrontConfig::default().endpoints,
    );
    let err = block_on(api.add(VariantId(99), 1)).unwrap_err();
    assert!(matches!(err, StorefrontError::Rejected(ref m) if m == "Producto no encontrado"));
    let err = block_on(api.add(VariantId(1), 0)).unwrap_err();
    assert_eq!(err.kind(), kalyzo_storefront::ErrorKind::Validation);
}
