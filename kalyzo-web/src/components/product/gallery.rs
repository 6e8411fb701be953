use crate::i18n;
use kalyzo_storefront::ImageRef;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub main: ImageRef,
    #[prop_or_default]
    pub thumbnails: Vec<ImageRef>,
    #[prop_or_default]
    pub active: Option<usize>,
    #[prop_or_default]
    pub on_pick: Callback<usize>,
}

#[function_component(Gallery)]
pub fn gallery(props: &Props) -> Html {
    let shown = props
        .active
        .and_then(|idx| props.thumbnails.get(idx))
        .unwrap_or(&props.main);
    let alt = if shown.alt.is_empty() {
        i18n::t("product.main_image")
    } else {
        shown.alt.clone()
    };
    html! {
        <section class="product-gallery" aria-label={i18n::t("product.gallery")}>
            <img id="main-image" class="img-fluid rounded main-image" src={shown.url.clone()} alt={alt} />
            if !props.thumbnails.is_empty() {
                <div class="thumbnails d-flex gap-2 mt-2">
                    { for props.thumbnails.iter().enumerate().map(|(idx, image)| {
                        let onclick = {
                            let cb = props.on_pick.clone();
                            Callback::from(move |_| cb.emit(idx))
                        };
                        let class = classes!("thumbnail", "img-thumbnail", (props.active == Some(idx)).then_some("active"));
                        html! {
                            <img {class} src={image.url.clone()} alt={image.alt.clone()} {onclick} />
                        }
                    }) }
                </div>
            }
        </section>
    }
}
