use crate::i18n;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub options: Vec<u32>,
    #[prop_or_default]
    pub value: Option<u32>,
    #[prop_or_default]
    pub on_change: Callback<u32>,
}

/// Quantity dropdown; disabled and empty when nothing can be bought.
#[function_component(QuantitySelect)]
pub fn quantity_select(props: &Props) -> Html {
    let onchange = {
        let cb = props.on_change.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            if let Ok(quantity) = select.value().parse::<u32>() {
                cb.emit(quantity);
            }
        })
    };
    let disabled = props.options.is_empty();
    html! {
        <div class="quantity-select mb-3">
            <label for="cantidad" class="form-label">{ i18n::t("product.quantity") }</label>
            <select id="cantidad" class="form-select" {disabled} {onchange}>
                { for props.options.iter().map(|qty| html! {
                    <option value={qty.to_string()} selected={props.value == Some(*qty)}>
                        { qty }
                    </option>
                }) }
            </select>
        </div>
    }
}
