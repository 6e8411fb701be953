use crate::config;
use crate::dom::query_document;
use crate::i18n;
use kalyzo_storefront::CommentPager;
use std::collections::BTreeMap;
use yew::prelude::*;

pub const COMMENT_SELECTOR: &str = ".comment-item";

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub remaining: usize,
    #[prop_or_default]
    pub on_click: Callback<()>,
}

/// "Load more" button; renders nothing once every comment is visible.
#[function_component(LoadMoreButton)]
pub fn load_more_button(props: &Props) -> Html {
    if props.remaining == 0 {
        return Html::default();
    }
    let count = props.remaining.to_string();
    let mut vars = BTreeMap::new();
    vars.insert("count", count.as_str());
    let onclick = {
        let cb = props.on_click.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="text-center mt-3">
            <button type="button" id="load-more-comments" class="btn btn-outline-secondary" {onclick}>
                { i18n::t("reviews.load_more") }{" "}
                <span class="remaining-count">{ i18n::tr("reviews.remaining", Some(&vars)) }</span>
            </button>
        </div>
    }
}

fn apply_visibility(pager: &CommentPager) {
    for (idx, item) in query_document(COMMENT_SELECTOR).into_iter().enumerate() {
        let outcome = if pager.is_visible(idx) {
            item.class_list().remove_1("d-none")
        } else {
            item.class_list().add_1("d-none")
        };
        if let Err(err) = outcome {
            log::warn!("comment visibility: {}", crate::dom::js_error_message(&err));
        }
    }
}

/// Paginates the server-rendered comment list in place.
#[function_component(CommentsIsland)]
pub fn comments_island() -> Html {
    let pager = use_state(|| {
        let widgets = &config::storefront().widgets;
        CommentPager::new(
            query_document(COMMENT_SELECTOR).len(),
            widgets.comments_initial,
            widgets.comments_reveal,
        )
    });

    use_effect_with(*pager, |pager| {
        apply_visibility(pager);
        || {}
    });

    let on_click = {
        let pager = pager.clone();
        Callback::from(move |()| {
            let mut next = *pager;
            next.load_more();
            pager.set(next);
        })
    };

    html! { <LoadMoreButton remaining={pager.remaining()} {on_click} /> }
}
