use crate::bus::{PageEvent, use_page_events};
use crate::i18n;
use kalyzo_storefront::{Effect, counter_label};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub count: u32,
}

/// Header badge with the number of items in the cart; hidden at zero.
#[function_component(CartCounter)]
pub fn cart_counter(props: &Props) -> Html {
    let label = counter_label(props.count);
    let count = props.count.to_string();
    let mut vars = BTreeMap::new();
    vars.insert("count", count.as_str());
    let aria = i18n::tr("cart.counter_label", Some(&vars));
    let class = classes!(
        "badge",
        "rounded-pill",
        "bg-danger",
        "cart-counter",
        label.is_none().then_some("d-none")
    );
    html! {
        <span id="cartCounter" class={class} aria-live="polite" aria-label={aria}>
            { label.unwrap_or_default() }
        </span>
    }
}

#[function_component(CartCounterIsland)]
pub fn cart_counter_island() -> Html {
    let count = use_state(|| 0_u32);
    {
        let count = count.clone();
        use_page_events(Callback::from(move |event: PageEvent| {
            if let PageEvent::Effect(Effect::SetCounter(value)) = event {
                count.set(value);
            }
        }));
    }
    html! { <CartCounter count={*count} /> }
}
