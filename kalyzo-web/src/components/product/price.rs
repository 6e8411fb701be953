use crate::i18n;
use kalyzo_storefront::{PriceBlock, format_price};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub block: PriceBlock,
}

#[function_component(PriceTag)]
pub fn price_tag(props: &Props) -> Html {
    match props.block {
        PriceBlock::Single { price } => html! {
            <div class="price-block">
                <span class="price-current fs-3 fw-bold">{ format_price(price) }</span>
            </div>
        },
        PriceBlock::BeforeNow {
            before,
            now,
            percent,
        } => {
            let badge = percent.map(|percent| {
                let percent = percent.to_string();
                let mut vars = BTreeMap::new();
                vars.insert("percent", percent.as_str());
                i18n::tr("product.discount", Some(&vars))
            });
            html! {
                <div class="price-block price-block--discount">
                    <div class="price-before text-muted">
                        <small>{ i18n::t("product.before") }{": "}</small>
                        <del>{ format_price(before) }</del>
                    </div>
                    <div class="price-now">
                        <small>{ i18n::t("product.now") }{": "}</small>
                        <span class="price-current fs-3 fw-bold text-danger">{ format_price(now) }</span>
                        if let Some(badge) = badge {
                            <span class="badge bg-danger ms-2 discount-badge">{ badge }</span>
                        }
                    </div>
                </div>
            }
        }
    }
}
