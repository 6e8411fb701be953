use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    #[prop_or_default]
    pub close_label: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with(props.open, move |is_open| {
            if *is_open && let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.focus();
            }
            || {}
        });
    }

    if !props.open {
        return Html::default();
    }

    let title_id = format!("modal-title-{}", *modal_id);
    let desc_id = props
        .description
        .as_ref()
        .map(|_| format!("modal-desc-{}", *modal_id));

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };
    let close_label = props
        .close_label
        .clone()
        .unwrap_or_else(|| AttrValue::from("Close"));

    html! {
        <>
            <div class="modal-backdrop fade show" onclick={on_close.clone()}></div>
            <div
                class="modal fade show d-block"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                aria-describedby={desc_id.clone().unwrap_or_default()}
                tabindex="-1"
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <div class="modal-dialog modal-dialog-centered modal-dialog-scrollable">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 id={title_id} class="modal-title">{ props.title.clone() }</h5>
                            <button type="button" class="btn-close" aria-label={close_label} onclick={on_close}></button>
                        </div>
                        { desc_id.map(|id| html! {
                            <p id={id} class="modal-description px-3 pt-2 text-muted">
                                { props.description.clone().unwrap_or_default() }
                            </p>
                        }).unwrap_or_default() }
                        <div class="modal-body">
                            { for props.children.iter() }
                        </div>
                    </div>
                </div>
            </div>
        </>
    }
}
