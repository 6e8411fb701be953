use crate::i18n::locales::{DEFAULT_LANG, is_supported, load_translations};
use serde_json::Value;
use std::cell::RefCell;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const STORAGE_KEY: &str = "kalyzo.locale";

pub struct I18nBundle {
    pub lang: String,
    pub translations: Value,
    pub fallback: Value,
}

fn build_bundle(lang: &str) -> Option<I18nBundle> {
    if !is_supported(lang) {
        return None;
    }
    let fallback = load_translations(DEFAULT_LANG)?;
    let translations = load_translations(lang)?;

    Some(I18nBundle {
        lang: lang.to_string(),
        translations,
        fallback,
    })
}

fn fallback_bundle() -> I18nBundle {
    let fallback =
        load_translations(DEFAULT_LANG).unwrap_or(Value::Object(serde_json::Map::new()));

    I18nBundle {
        lang: DEFAULT_LANG.to_string(),
        translations: fallback.clone(),
        fallback,
    }
}

/// Saved preference first, then the page's `<html lang>`.
fn initial_lang() -> String {
    #[cfg(all(not(test), target_arch = "wasm32"))]
    {
        let win = web_sys::window();
        let saved = win
            .as_ref()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());
        let page = win
            .and_then(|w| w.document())
            .and_then(|doc| doc.document_element())
            .and_then(|el| el.get_attribute("lang"))
            .map(|lang| lang.split('-').next().unwrap_or_default().to_lowercase());
        saved
            .or(page)
            .filter(|lang| is_supported(lang))
            .unwrap_or_else(|| DEFAULT_LANG.to_string())
    }

    #[cfg(any(test, not(target_arch = "wasm32")))]
    {
        DEFAULT_LANG.to_string()
    }
}

thread_local! {
    pub(super) static CURRENT: RefCell<I18nBundle> = RefCell::new({
        build_bundle(&initial_lang()).unwrap_or_else(fallback_bundle)
    });
}

pub(super) fn with_bundle<R>(f: impl FnOnce(&I18nBundle) -> R) -> R {
    CURRENT.with(|cell| f(&cell.borrow()))
}

/// Switch the active language and persist the choice.
///
/// Unknown codes are ignored.
pub fn set_lang(lang: &str) {
    let Some(bundle) = build_bundle(lang) else {
        log::warn!("unsupported locale {lang}");
        return;
    };
    CURRENT.with(|cell| cell.replace(bundle));
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(doc_el) = web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| doc.document_element())
        {
            let _ = doc_el.set_attribute("lang", lang);
        }
        if let Some(storage) = web_sys::window().and_then(|win| win.local_storage().ok().flatten())
        {
            let _ = storage.set_item(STORAGE_KEY, lang);
        }
    }
}

#[must_use]
pub fn current_lang() -> String {
    with_bundle(|bundle| bundle.lang.clone())
}
