use crate::i18n;
use kalyzo_storefront::StarRating;
use kalyzo_storefront::widgets::rating::{EMPTY_STAR, FILLED_STAR};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub rating: StarRating,
    #[prop_or(AttrValue::Static("rating"))]
    pub name: AttrValue,
    #[prop_or_default]
    pub on_click: Callback<u8>,
    #[prop_or_default]
    pub on_hover: Callback<u8>,
    #[prop_or_default]
    pub on_leave: Callback<()>,
}

/// Review star picker backed by a hidden form field.
#[function_component(StarRatingInput)]
pub fn star_rating_input(props: &Props) -> Html {
    let value = props.rating.value().to_string();
    let mut vars = BTreeMap::new();
    vars.insert("value", value.as_str());
    let label = i18n::tr("reviews.rating_label", Some(&vars));
    let onmouseleave = {
        let cb = props.on_leave.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div class="star-rating" role="radiogroup" aria-label={label} {onmouseleave}>
            <input type="hidden" name={props.name.clone()} value={value.clone()} />
            { for props.rating.filled().into_iter().zip(0_u8..).map(|(on, idx)| {
                let onclick = {
                    let cb = props.on_click.clone();
                    Callback::from(move |_| cb.emit(idx))
                };
                let onmouseenter = {
                    let cb = props.on_hover.clone();
                    Callback::from(move |_| cb.emit(idx))
                };
                let stars = (idx + 1).to_string();
                let mut vars = BTreeMap::new();
                vars.insert("value", stars.as_str());
                html! {
                    <span
                        class={classes!("star", on.then_some("filled"))}
                        role="radio"
                        aria-checked={(props.rating.value() == idx + 1).to_string()}
                        aria-label={i18n::tr("reviews.star", Some(&vars))}
                        {onclick}
                        {onmouseenter}
                    >
                        { if on { FILLED_STAR } else { EMPTY_STAR }.to_string() }
                    </span>
                }
            }) }
        </div>
    }
}

#[function_component(StarRatingIsland)]
pub fn star_rating_island() -> Html {
    let rating = use_state(StarRating::default);
    let update = |apply: fn(&mut StarRating, u8)| {
        let rating = rating.clone();
        Callback::from(move |idx: u8| {
            let mut next = *rating;
            apply(&mut next, idx);
            rating.set(next);
        })
    };
    let on_leave = {
        let rating = rating.clone();
        Callback::from(move |()| {
            let mut next = *rating;
            next.leave();
            rating.set(next);
        })
    };
    html! {
        <StarRatingInput
            rating={*rating}
            on_click={update(StarRating::click)}
            on_hover={update(StarRating::hover)}
            {on_leave}
        />
    }
}
