use futures::executor::block_on;
use kalyzo_storefront::{
    ImageRef, OptionGroupKind, OptionRows, OrderSummary, PriceBlock, PurchaseActions,
    SelectorState, StarRating, SummaryLine, ToastKind, Variant, VariantId, VariantOption,
};
use kalyzo_web::components::cart_counter::{self, CartCounter};
use kalyzo_web::components::checkout::{self, CheckoutModal, OrderSummaryView, SummaryState};
use kalyzo_web::components::load_more::{self, LoadMoreButton};
use kalyzo_web::components::modal::{self, Modal};
use kalyzo_web::components::product::{
    self, OptionGroups, PanelProps, PriceTag, ProductPanel, PurchaseButtons, QuantitySelect,
};
use kalyzo_web::components::star_rating::{self, StarRatingInput};
use kalyzo_web::components::toast::{self, ToastEntry, ToastStack};
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, LocalServerRenderer, NodeRef};

fn variant(id: u64, stock: i64, options: &[(&str, &str)]) -> Variant {
    Variant {
        id: VariantId(id),
        main_image: ImageRef {
            url: format!("/media/lampara-{id}.jpg"),
            alt: String::new(),
        },
        images: Vec::new(),
        price: 129_900.0,
        discount_price: Some(99_900.0),
        discount_percentage: 23,
        stock,
        options: options
            .iter()
            .map(|(option, value)| VariantOption {
                option: (*option).to_string(),
                value: (*value).to_string(),
            })
            .collect(),
    }
}

#[test]
fn counter_is_hidden_at_zero_and_shows_count() {
    kalyzo_web::i18n::set_lang("es");
    let html = block_on(
        LocalServerRenderer::<CartCounter>::with_props(cart_counter::Props { count: 0 }).render(),
    );
    assert!(html.contains("id=\"cartCounter\""));
    assert!(html.contains("d-none"));

    let html = block_on(
        LocalServerRenderer::<CartCounter>::with_props(cart_counter::Props { count: 3 }).render(),
    );
    assert!(!html.contains("d-none"));
    assert!(html.contains(">3<"));
    assert!(html.contains("3 productos en el carrito"));
}

#[test]
fn price_tag_layouts() {
    kalyzo_web::i18n::set_lang("es");
    let single = block_on(
        LocalServerRenderer::<PriceTag>::with_props(product::price::Props {
            block: PriceBlock::Single { price: 45_000.0 },
        })
        .render(),
    );
    assert!(single.contains("$45.000"));
    assert!(!single.contains("<del>"));

    let discounted = block_on(
        LocalServerRenderer::<PriceTag>::with_props(product::price::Props {
            block: PriceBlock::BeforeNow {
                before: 129_900.0,
                now: 99_900.0,
                percent: Some(23),
            },
        })
        .render(),
    );
    assert!(discounted.contains("<del>$129.900</del>"));
    assert!(discounted.contains("$99.900"));
    assert!(discounted.contains("-23%"));

    let no_badge = block_on(
        LocalServerRenderer::<PriceTag>::with_props(product::price::Props {
            block: PriceBlock::BeforeNow {
                before: 100.0,
                now: 90.0,
                percent: None,
            },
        })
        .render(),
    );
    assert!(!no_badge.contains("discount-badge"));
}

#[test]
fn sold_out_variant_disables_quantity_and_purchase() {
    kalyzo_web::i18n::set_lang("es");
    let html = block_on(
        LocalServerRenderer::<QuantitySelect>::with_props(product::quantity::Props {
            options: Vec::new(),
            value: None,
            on_change: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("disabled"));
    assert!(!html.contains("<option"));

    let html = block_on(
        LocalServerRenderer::<PurchaseButtons>::with_props(product::actions::Props {
            actions: PurchaseActions::SoldOut,
            adding: false,
            paying: false,
            on_add: Callback::noop(),
            on_pay: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("Agotado"));
    assert!(!html.contains("btn-pagar-contraentrega"));
}

#[test]
fn quantity_options_mark_the_current_value() {
    let html = block_on(
        LocalServerRenderer::<QuantitySelect>::with_props(product::quantity::Props {
            options: vec![1, 2, 3],
            value: Some(2),
            on_change: Callback::noop(),
        })
        .render(),
    );
    assert_eq!(html.matches("<option").count(), 3);
    assert!(!html.contains("disabled"));
}

#[test]
fn available_variant_offers_both_buttons() {
    kalyzo_web::i18n::set_lang("es");
    let html = block_on(
        LocalServerRenderer::<PurchaseButtons>::with_props(product::actions::Props {
            actions: PurchaseActions::Available,
            adding: true,
            paying: false,
            on_add: Callback::noop(),
            on_pay: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("btn-pagar-contraentrega"));
    assert!(html.contains("btn-agregar-carrito"));
    assert!(html.contains("Agregando..."));
}

#[test]
fn option_groups_hide_empty_rows_and_mark_active() {
    let mut rows = OptionRows::from_options(&[
        VariantOption {
            option: "Medida".into(),
            value: "20 cm".into(),
        },
        VariantOption {
            option: "Medida".into(),
            value: "30 cm".into(),
        },
    ]);
    assert!(rows.activate(OptionGroupKind::Medida, 1));
    let html = block_on(
        LocalServerRenderer::<OptionGroups>::with_props(product::options::Props {
            rows,
            on_select: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("id=\"medida-options\""));
    assert!(html.contains("id=\"color-group\""));
    assert_eq!(html.matches("active").count(), 1);
    assert_eq!(html.matches("d-none").count(), 3);
}

#[test]
fn product_panel_renders_selected_variant() {
    kalyzo_web::i18n::set_lang("es");
    let selector = SelectorState::new(
        vec![
            variant(1, 4, &[("Color", "Rojo")]),
            variant(2, 0, &[("Color", "Azul")]),
        ],
        Vec::new(),
        Some(VariantId(2)),
        10,
    );
    let props = PanelProps {
        view: selector.view(),
        variants: selector.variants().to_vec(),
        gallery: Vec::new(),
        picked_thumbnail: None,
        adding: false,
        paying: false,
        on_variant: Callback::noop(),
        on_option: Callback::noop(),
        on_quantity: Callback::noop(),
        on_thumbnail: Callback::noop(),
        on_add: Callback::noop(),
        on_pay: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ProductPanel>::with_props(props).render());
    assert!(html.contains("data-selected=\"2\""));
    assert!(html.contains("/media/lampara-2.jpg"));
    assert!(html.contains("Agotado"));
    assert!(html.contains("out-of-stock"));
}

#[test]
fn modal_renders_when_open_and_skips_when_closed() {
    let open = modal::Props {
        open: true,
        title: AttrValue::from("Pago contra entrega"),
        on_close: Callback::noop(),
        description: Some(AttrValue::from("Completa tus datos")),
        close_label: None,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(open).render());
    assert!(html.contains("modal-backdrop"));
    assert!(html.contains("Completa tus datos"));

    let closed = modal::Props {
        open: false,
        title: AttrValue::from("Pago contra entrega"),
        on_close: Callback::noop(),
        description: None,
        close_label: None,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(closed).render());
    assert!(!html.contains("modal-backdrop"));
}

#[test]
fn summary_states() {
    kalyzo_web::i18n::set_lang("es");
    let render = |state| {
        block_on(
            LocalServerRenderer::<OrderSummaryView>::with_props(checkout::summary::Props { state })
                .render(),
        )
    };
    assert!(render(SummaryState::Loading).contains("Cargando resumen"));
    let failed = render(SummaryState::Failed);
    assert!(failed.contains("No se pudo cargar"));
    assert!(failed.contains("$0"));
    assert!(render(SummaryState::Ready(OrderSummary::default())).contains("No hay productos"));

    let ready = render(SummaryState::Ready(OrderSummary {
        lines: vec![SummaryLine {
            product_name: "Lámpara Luna".into(),
            unit_price: 45_000.0,
            quantity: 2,
            subtotal: 90_000.0,
        }],
        total: 90_000.0,
    }));
    assert!(ready.contains("Lámpara Luna"));
    assert!(ready.contains("x2"));
    assert_eq!(ready.matches("$90.000").count(), 2);
}

#[test]
fn checkout_modal_carries_form_constraints() {
    kalyzo_web::i18n::set_lang("es");
    let props = checkout::Props {
        open: true,
        summary: SummaryState::Loading,
        form_ref: NodeRef::default(),
        submitting: true,
        on_close: Callback::noop(),
        on_submit: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<CheckoutModal>::with_props(props).render());
    assert!(html.contains("id=\"checkout-form\""));
    assert!(html.contains("pattern=\"3[0-9]{9}\""));
    assert!(html.contains("minlength=\"3\""));
    assert!(html.contains("type=\"email\""));
    assert!(html.contains("Procesando..."));
}

#[test]
fn toast_stack_renders_each_kind() {
    kalyzo_web::i18n::set_lang("es");
    let toasts = vec![
        ToastEntry {
            id: 1,
            kind: ToastKind::Success,
            text: "Producto agregado al carrito".into(),
        },
        ToastEntry {
            id: 2,
            kind: ToastKind::Error,
            text: "Stock insuficiente. Disponible: 2".into(),
        },
    ];
    let html = block_on(
        LocalServerRenderer::<ToastStack>::with_props(toast::Props {
            toasts,
            on_dismiss: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("alert-success"));
    assert!(html.contains("alert-danger"));
    assert!(html.contains("Stock insuficiente. Disponible: 2"));
    assert_eq!(html.matches("btn-close").count(), 2);
}

#[test]
fn star_rating_draws_committed_value() {
    let mut rating = StarRating::default();
    rating.click(2);
    let html = block_on(
        LocalServerRenderer::<StarRatingInput>::with_props(star_rating::Props {
            rating,
            name: AttrValue::from("rating"),
            on_click: Callback::noop(),
            on_hover: Callback::noop(),
            on_leave: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("value=\"3\""));
    assert_eq!(html.matches("★").count(), 3);
    assert_eq!(html.matches("☆").count(), 2);
}

#[test]
fn load_more_disappears_when_nothing_is_left() {
    kalyzo_web::i18n::set_lang("es");
    let html = block_on(
        LocalServerRenderer::<LoadMoreButton>::with_props(load_more::Props {
            remaining: 12,
            on_click: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("(12 restantes)"));

    let html = block_on(
        LocalServerRenderer::<LoadMoreButton>::with_props(load_more::Props {
            remaining: 0,
            on_click: Callback::noop(),
        })
        .render(),
    );
    assert!(!html.contains("load-more-comments"));
}
