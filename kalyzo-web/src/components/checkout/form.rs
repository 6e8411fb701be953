use crate::i18n;
use kalyzo_storefront::CustomerForm;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

struct Field {
    name: &'static str,
    kind: &'static str,
    required: bool,
    minlength: Option<&'static str>,
    pattern: Option<&'static str>,
}

const FIELDS: [Field; 7] = [
    Field { name: "customer_name", kind: "text", required: true, minlength: Some("3"), pattern: None },
    Field { name: "customer_phone", kind: "tel", required: true, minlength: None, pattern: Some("3[0-9]{9}") },
    Field { name: "customer_email", kind: "email", required: false, minlength: None, pattern: None },
    Field { name: "department", kind: "text", required: true, minlength: None, pattern: None },
    Field { name: "city", kind: "text", required: true, minlength: None, pattern: None },
    Field { name: "neighborhood", kind: "text", required: false, minlength: None, pattern: None },
    Field { name: "address", kind: "text", required: true, minlength: None, pattern: None },
];

fn field_value(form: &Element, name: &str) -> String {
    let Ok(Some(el)) = form.query_selector(&format!("[name={name}]")) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    el.dyn_ref::<HtmlTextAreaElement>()
        .map(HtmlTextAreaElement::value)
        .unwrap_or_default()
}

/// Read the buyer fields out of a rendered checkout form.
#[must_use]
pub fn read_form(form: &Element) -> CustomerForm {
    CustomerForm {
        customer_name: field_value(form, "customer_name"),
        customer_phone: field_value(form, "customer_phone"),
        customer_email: field_value(form, "customer_email"),
        department: field_value(form, "department"),
        city: field_value(form, "city"),
        neighborhood: field_value(form, "neighborhood"),
        address: field_value(form, "address"),
        note: field_value(form, "note"),
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub form_ref: NodeRef,
    #[prop_or_default]
    pub submitting: bool,
    #[prop_or_default]
    pub on_submit: Callback<CustomerForm>,
}

#[function_component(CheckoutForm)]
pub fn checkout_form(props: &Props) -> Html {
    let onsubmit = {
        let cb = props.on_submit.clone();
        let form_ref = props.form_ref.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(form) = form_ref.cast::<Element>() {
                cb.emit(read_form(&form));
            }
        })
    };

    html! {
        <form id="checkout-form" ref={props.form_ref.clone()} {onsubmit} novalidate=true>
            { for FIELDS.iter().map(|field| {
                let id = format!("checkout-{}", field.name);
                html! {
                    <div class="mb-2">
                        <label for={id.clone()} class="form-label">
                            { i18n::t(&format!("checkout.fields.{}", field.name)) }
                        </label>
                        <input
                            {id}
                            class="form-control"
                            type={field.kind}
                            name={field.name}
                            required={field.required}
                            minlength={field.minlength}
                            pattern={field.pattern}
                        />
                    </div>
                }
            }) }
            <div class="mb-3">
                <label for="checkout-note" class="form-label">{ i18n::t("checkout.fields.note") }</label>
                <textarea id="checkout-note" class="form-control" name="note" rows="2"></textarea>
            </div>
            <div class="d-grid">
                <button type="submit" class="btn btn-success btn-lg" disabled={props.submitting}>
                    if props.submitting {
                        <span class="spinner-border spinner-border-sm me-2" role="status" aria-hidden="true"></span>
                        { i18n::t("checkout.submitting") }
                    } else {
                        { i18n::t("checkout.submit") }
                    }
                </button>
            </div>
        </form>
    }
}
