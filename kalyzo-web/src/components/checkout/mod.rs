//! Pay-on-delivery modal: order summary plus the buyer form.
pub mod form;
pub mod summary;

pub use form::{CheckoutForm, read_form};
pub use summary::{OrderSummaryView, SummaryState};

use crate::bus::{PageEvent, use_page_events};
use crate::components::modal::Modal;
use crate::dom::pause;
use crate::i18n;
use crate::runtime;
use kalyzo_storefront::{Control, CustomerForm, Effect, UiAction};
use web_sys::HtmlFormElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub summary: SummaryState,
    pub form_ref: NodeRef,
    #[prop_or_default]
    pub submitting: bool,
    #[prop_or_default]
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_submit: Callback<CustomerForm>,
}

#[function_component(CheckoutModal)]
pub fn checkout_modal(props: &Props) -> Html {
    html! {
        <Modal
            open={props.open}
            title={AttrValue::from(i18n::t("checkout.title"))}
            description={Some(AttrValue::from(i18n::t("checkout.description")))}
            close_label={Some(AttrValue::from(i18n::t("checkout.close")))}
            on_close={props.on_close.clone()}
        >
            <OrderSummaryView state={props.summary.clone()} />
            <CheckoutForm
                form_ref={props.form_ref.clone()}
                submitting={props.submitting}
                on_submit={props.on_submit.clone()}
            />
        </Modal>
    }
}

#[function_component(CheckoutIsland)]
pub fn checkout_island() -> Html {
    let open = use_state(|| false);
    let summary = use_state(SummaryState::default);
    let submitting = use_state(|| false);
    let form_ref = use_node_ref();

    {
        let open = open.clone();
        let summary = summary.clone();
        let submitting = submitting.clone();
        let form_ref = form_ref.clone();
        use_page_events(Callback::from(move |event: PageEvent| {
            let PageEvent::Effect(effect) = event else {
                return;
            };
            match effect {
                Effect::OpenCheckout { delay_ms } => {
                    let open = open.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        pause(delay_ms, "checkout open").await;
                        open.set(true);
                    });
                }
                Effect::CloseCheckout => open.set(false),
                Effect::SummaryLoading => summary.set(SummaryState::Loading),
                Effect::ShowSummary(ready) => summary.set(SummaryState::Ready(ready)),
                Effect::SummaryFailed => summary.set(SummaryState::Failed),
                Effect::ReportFormValidity => {
                    if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                        let _ = form.report_validity();
                    }
                }
                Effect::ResetCheckoutForm => {
                    if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                        form.reset();
                    }
                }
                Effect::Busy(Control::SubmitOrder) => submitting.set(true),
                Effect::Idle(Control::SubmitOrder) => submitting.set(false),
                _ => {}
            }
        }));
    }

    let on_close = {
        let open = open.clone();
        Callback::from(move |()| open.set(false))
    };

    html! {
        <CheckoutModal
            open={*open}
            summary={(*summary).clone()}
            {form_ref}
            submitting={*submitting}
            {on_close}
            on_submit={Callback::from(|form| runtime::dispatch(UiAction::SubmitOrder(form)))}
        />
    }
}
