use crate::i18n;
use kalyzo_storefront::{Variant, VariantId};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub variants: Vec<Variant>,
    #[prop_or_default]
    pub selected: Option<VariantId>,
    #[prop_or_default]
    pub on_select: Callback<VariantId>,
}

fn variant_label(variant: &Variant) -> String {
    let values: Vec<&str> = variant.options.iter().map(|o| o.value.as_str()).collect();
    if values.is_empty() {
        format!("#{}", variant.id)
    } else {
        values.join(" / ")
    }
}

/// Variant buttons; hidden entirely for single-variant products.
#[function_component(VariantPicker)]
pub fn variant_picker(props: &Props) -> Html {
    if props.variants.len() < 2 {
        return Html::default();
    }
    html! {
        <div class="variant-picker mb-3" role="radiogroup" aria-label={i18n::t("product.variants")}>
            { for props.variants.iter().map(|variant| {
                let id = variant.id;
                let selected = props.selected == Some(id);
                let onclick = {
                    let cb = props.on_select.clone();
                    Callback::from(move |_| cb.emit(id))
                };
                let class = classes!(
                    "btn", "btn-outline-dark", "btn-sm", "variant-btn",
                    selected.then_some("selected"),
                    (!variant.in_stock()).then_some("out-of-stock")
                );
                html! {
                    <button
                        type="button"
                        {class}
                        role="radio"
                        aria-checked={selected.to_string()}
                        data-variant-id={id.to_string()}
                        {onclick}
                    >
                        { variant_label(variant) }
                    </button>
                }
            }) }
        </div>
    }
}
