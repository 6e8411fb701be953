use crate::i18n;
use kalyzo_storefront::PurchaseActions;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub actions: PurchaseActions,
    #[prop_or_default]
    pub adding: bool,
    #[prop_or_default]
    pub paying: bool,
    #[prop_or_default]
    pub on_add: Callback<()>,
    #[prop_or_default]
    pub on_pay: Callback<()>,
}

#[function_component(PurchaseButtons)]
pub fn purchase_buttons(props: &Props) -> Html {
    if props.actions == PurchaseActions::SoldOut {
        return html! {
            <div class="purchase-buttons d-grid">
                <button type="button" class="btn btn-secondary btn-lg" disabled=true>
                    { i18n::t("product.sold_out") }
                </button>
            </div>
        };
    }

    let on_pay = {
        let cb = props.on_pay.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_add = {
        let cb = props.on_add.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let busy = props.adding || props.paying;
    html! {
        <div class="purchase-buttons d-grid gap-2">
            <button
                type="button"
                id="btn-pagar-contraentrega"
                class="btn btn-success btn-lg"
                disabled={busy}
                onclick={on_pay}
            >
                if props.paying {
                    <span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>
                }
                { i18n::t("product.pay_on_delivery") }
            </button>
            <button
                type="button"
                id="btn-agregar-carrito"
                class="btn btn-outline-dark btn-lg"
                disabled={busy}
                onclick={on_add}
            >
                if props.adding {
                    <span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>
                    { i18n::t("product.adding") }
                } else {
                    { i18n::t("product.add_to_cart") }
                }
            </button>
        </div>
    }
}
