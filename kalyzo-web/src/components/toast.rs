use crate::bus::{PageEvent, use_page_events};
use crate::dom::pause;
use crate::i18n;
use kalyzo_storefront::{Effect, ToastKind};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ToastEntry {
    pub id: usize,
    pub kind: ToastKind,
    pub text: String,
}

const fn alert_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "alert-success",
        ToastKind::Error => "alert-danger",
        ToastKind::Info => "alert-info",
    }
}

const fn icon_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "bi-check-circle-fill",
        ToastKind::Error => "bi-exclamation-triangle-fill",
        ToastKind::Info => "bi-info-circle-fill",
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub toasts: Vec<ToastEntry>,
    #[prop_or_default]
    pub on_dismiss: Callback<usize>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &Props) -> Html {
    html! {
        <div class="toast-stack position-fixed top-0 start-50 translate-middle-x mt-3" role="status" aria-live="polite">
            { for props.toasts.iter().map(|toast| {
                let on_click = {
                    let cb = props.on_dismiss.clone();
                    let id = toast.id;
                    Callback::from(move |_| cb.emit(id))
                };
                let heading = i18n::t(&format!("toast.{}", toast.kind.as_str()));
                html! {
                    <div
                        key={toast.id}
                        class={classes!("alert", alert_class(toast.kind), "alert-dismissible", "fade", "show", "shadow-lg")}
                        role="alert"
                    >
                        <i class={classes!("bi", icon_class(toast.kind), "me-2")}></i>
                        <strong>{ heading }</strong>{" "}{ toast.text.clone() }
                        <button type="button" class="btn-close" aria-label={i18n::t("toast.dismiss")} onclick={on_click}></button>
                    </div>
                }
            }) }
        </div>
    }
}

pub enum ToastAction {
    Push(ToastEntry),
    Dismiss(usize),
}

#[derive(Default, PartialEq)]
struct ToastList {
    entries: Vec<ToastEntry>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut entries = self.entries.clone();
        match action {
            ToastAction::Push(entry) => entries.push(entry),
            ToastAction::Dismiss(id) => entries.retain(|entry| entry.id != id),
        }
        Rc::new(Self { entries })
    }
}

/// Shows every toast effect and drops it after its lifetime.
#[function_component(ToastHost)]
pub fn toast_host() -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0_usize);

    {
        let dispatcher = list.dispatcher();
        use_page_events(Callback::from(move |event: PageEvent| {
            let PageEvent::Effect(Effect::Toast(toast)) = event else {
                return;
            };
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            dispatcher.dispatch(ToastAction::Push(ToastEntry {
                id,
                kind: toast.kind,
                text: i18n::message(&toast.message),
            }));
            let dispatcher = dispatcher.clone();
            let ttl = toast.ttl_ms;
            wasm_bindgen_futures::spawn_local(async move {
                pause(ttl, "toast dismissal").await;
                dispatcher.dispatch(ToastAction::Dismiss(id));
            });
        }));
    }

    let on_dismiss = {
        let dispatcher = list.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(ToastAction::Dismiss(id)))
    };

    html! { <ToastStack toasts={list.entries.clone()} {on_dismiss} /> }
}
