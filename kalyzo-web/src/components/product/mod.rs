//! Product page panel: gallery, variant picker, price, options, quantity and
//! the purchase buttons, all projected from the selector state.
pub mod actions;
pub mod gallery;
pub mod options;
pub mod price;
pub mod quantity;
pub mod variants;

pub use actions::PurchaseButtons;
pub use gallery::Gallery;
pub use options::OptionGroups;
pub use price::PriceTag;
pub use quantity::QuantitySelect;
pub use variants::VariantPicker;

use crate::bus::{PageEvent, use_page_events};
use crate::i18n;
use crate::runtime;
use kalyzo_storefront::{
    Control, Effect, ImageRef, OptionGroupKind, UiAction, Variant, VariantId, VariantView,
};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PanelProps {
    pub view: Option<VariantView>,
    #[prop_or_default]
    pub variants: Vec<Variant>,
    #[prop_or_default]
    pub gallery: Vec<ImageRef>,
    /// Thumbnail picked by the shopper, overriding the variant's own image.
    #[prop_or_default]
    pub picked_thumbnail: Option<usize>,
    #[prop_or_default]
    pub adding: bool,
    #[prop_or_default]
    pub paying: bool,
    #[prop_or_default]
    pub on_variant: Callback<VariantId>,
    #[prop_or_default]
    pub on_option: Callback<(OptionGroupKind, usize)>,
    #[prop_or_default]
    pub on_quantity: Callback<u32>,
    #[prop_or_default]
    pub on_thumbnail: Callback<usize>,
    #[prop_or_default]
    pub on_add: Callback<()>,
    #[prop_or_default]
    pub on_pay: Callback<()>,
}

#[function_component(ProductPanel)]
pub fn product_panel(props: &PanelProps) -> Html {
    let Some(view) = props.view.as_ref() else {
        return Html::default();
    };
    let stock = view.stock.max(0).to_string();
    let mut vars = BTreeMap::new();
    vars.insert("count", stock.as_str());
    let stock_label = i18n::tr("product.stock", Some(&vars));

    html! {
        <div class="product-panel row g-4" data-selected={view.variant_id.to_string()}>
            <div class="col-lg-6">
                <Gallery
                    main={view.main_image.clone()}
                    thumbnails={props.gallery.clone()}
                    active={props.picked_thumbnail.or(view.active_thumbnail)}
                    on_pick={props.on_thumbnail.clone()}
                />
            </div>
            <div class="col-lg-6">
                <VariantPicker
                    variants={props.variants.clone()}
                    selected={Some(view.variant_id)}
                    on_select={props.on_variant.clone()}
                />
                <PriceTag block={view.price} />
                if view.stock > 0 {
                    <p class="stock-label text-muted small">{ stock_label }</p>
                }
                <OptionGroups rows={view.option_rows.clone()} on_select={props.on_option.clone()} />
                <QuantitySelect
                    options={view.quantities.clone()}
                    value={view.quantity}
                    on_change={props.on_quantity.clone()}
                />
                <PurchaseButtons
                    actions={view.actions}
                    adding={props.adding}
                    paying={props.paying}
                    on_add={props.on_add.clone()}
                    on_pay={props.on_pay.clone()}
                />
            </div>
        </div>
    }
}

/// Product panel wired to the page dispatcher.
#[function_component(ProductIsland)]
pub fn product_island() -> Html {
    let view = use_state(|| runtime::with_selector(|s| s.view()).flatten());
    let variants = use_memo((), |()| {
        runtime::with_selector(|s| s.variants().to_vec()).unwrap_or_default()
    });
    let gallery = use_memo((), |()| {
        runtime::with_selector(|s| s.gallery().to_vec()).unwrap_or_default()
    });
    let picked = use_state(|| None::<usize>);
    let adding = use_state(|| false);
    let paying = use_state(|| false);

    {
        let view = view.clone();
        let picked = picked.clone();
        let adding = adding.clone();
        let paying = paying.clone();
        use_page_events(Callback::from(move |event: PageEvent| match event {
            PageEvent::SelectorChanged => {
                view.set(runtime::with_selector(|s| s.view()).flatten());
                picked.set(None);
            }
            PageEvent::Effect(Effect::Busy(Control::AddToCart)) => adding.set(true),
            PageEvent::Effect(Effect::Idle(Control::AddToCart)) => adding.set(false),
            PageEvent::Effect(Effect::Busy(Control::PayOnDelivery)) => paying.set(true),
            PageEvent::Effect(Effect::Idle(Control::PayOnDelivery)) => paying.set(false),
            PageEvent::Effect(_) => {}
        }));
    }

    let on_thumbnail = {
        let picked = picked.clone();
        Callback::from(move |idx| picked.set(Some(idx)))
    };

    html! {
        <ProductPanel
            view={(*view).clone()}
            variants={(*variants).clone()}
            gallery={(*gallery).clone()}
            picked_thumbnail={*picked}
            adding={*adding}
            paying={*paying}
            on_variant={Callback::from(|id| runtime::dispatch(UiAction::SelectVariant(id)))}
            on_option={Callback::from(|(kind, index)| runtime::dispatch(UiAction::SelectOption { kind, index }))}
            on_quantity={Callback::from(|qty| runtime::dispatch(UiAction::SetQuantity(qty)))}
            {on_thumbnail}
            on_add={Callback::from(|()| runtime::dispatch(UiAction::AddSelected))}
            on_pay={Callback::from(|()| runtime::dispatch(UiAction::PayOnDelivery))}
        />
    }
}
