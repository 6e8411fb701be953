use crate::i18n;
use kalyzo_storefront::{OrderSummary, format_price};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SummaryState {
    #[default]
    Loading,
    Ready(OrderSummary),
    Failed,
}

fn total_row(total: f64) -> Html {
    html! {
        <div class="d-flex justify-content-between fw-bold mt-2 summary-total">
            <span>{ i18n::t("checkout.total") }</span>
            <span>{ format_price(total) }</span>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub state: SummaryState,
}

#[function_component(OrderSummaryView)]
pub fn order_summary_view(props: &Props) -> Html {
    let body = match &props.state {
        SummaryState::Loading => html! {
            <p class="summary-loading text-muted">
                <span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>
                { i18n::t("checkout.summary_loading") }
            </p>
        },
        SummaryState::Failed => html! {
            <>
                <p class="summary-failed text-danger">{ i18n::t("checkout.summary_failed") }</p>
                { total_row(0.0) }
            </>
        },
        SummaryState::Ready(summary) if summary.is_empty() => html! {
            <p class="summary-empty text-muted">{ i18n::t("checkout.summary_empty") }</p>
        },
        SummaryState::Ready(summary) => html! {
            <>
                <ul class="list-group list-group-flush summary-lines">
                    { for summary.lines.iter().map(|line| {
                        let qty = line.quantity.to_string();
                        let mut vars = BTreeMap::new();
                        vars.insert("count", qty.as_str());
                        html! {
                            <li class="list-group-item d-flex justify-content-between">
                                <span>
                                    { line.product_name.clone() }{" "}
                                    <small class="text-muted">{ i18n::tr("checkout.quantity_short", Some(&vars)) }</small>
                                </span>
                                <span>{ format_price(line.subtotal) }</span>
                            </li>
                        }
                    }) }
                </ul>
                { total_row(summary.total) }
            </>
        },
    };
    html! {
        <section class="order-summary mb-3">
            <h6>{ i18n::t("checkout.summary_title") }</h6>
            { body }
        </section>
    }
}
