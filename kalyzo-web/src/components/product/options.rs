use crate::i18n;
use kalyzo_storefront::{OptionGroupKind, OptionRows};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub rows: OptionRows,
    #[prop_or_default]
    pub on_select: Callback<(OptionGroupKind, usize)>,
}

/// One button row per option group; groups without values stay hidden.
#[function_component(OptionGroups)]
pub fn option_groups(props: &Props) -> Html {
    html! {
        <div class="option-groups">
            { for props.rows.rows().iter().map(|row| {
                let slug = row.kind.slug();
                let group_class = classes!("option-group", "mb-3", (!row.is_visible()).then_some("d-none"));
                html! {
                    <div id={format!("{slug}-group")} class={group_class}>
                        <span class="form-label d-block">{ i18n::t(&format!("product.options.{slug}")) }</span>
                        <div id={format!("{slug}-options")} class="btn-group flex-wrap" role="group">
                            { for row.values.iter().enumerate().map(|(idx, value)| {
                                let onclick = {
                                    let cb = props.on_select.clone();
                                    let kind = row.kind;
                                    Callback::from(move |_| cb.emit((kind, idx)))
                                };
                                let class = classes!(
                                    "btn", "btn-outline-secondary", "btn-sm", "option-btn",
                                    row.is_active(idx).then_some("active")
                                );
                                html! {
                                    <button type="button" {class} aria-pressed={row.is_active(idx).to_string()} {onclick}>
                                        { value.clone() }
                                    </button>
                                }
                            }) }
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
