use crate::i18n::bundle::with_bundle;
use kalyzo_storefront::Message;
use serde_json::Value;
use std::collections::BTreeMap;

#[cfg(target_arch = "wasm32")]
use js_sys::{Array, Intl, Object};

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn fallback_category(count: f64) -> &'static str {
    if (count - 1.0).abs() < f64::EPSILON {
        "one"
    } else {
        "other"
    }
}

fn plural_category(lang: &str, count: f64) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let locales = Array::new();
        locales.push(&wasm_bindgen::JsValue::from_str(lang));
        let rules = Intl::PluralRules::new(&locales, &Object::new());
        rules
            .select(count)
            .as_string()
            .unwrap_or_else(|| fallback_category(count).to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = lang;
        fallback_category(count).to_string()
    }
}

fn render_value(value: &Value, lang: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let count = args
                .and_then(|m| m.get("count"))
                .and_then(|raw| raw.parse::<f64>().ok());
            let category = count.map(|c| plural_category(lang, c));
            category
                .and_then(|cat| map.get(&cat))
                .or_else(|| map.get("other"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, &bundle.lang, args))
            .or_else(|| {
                get_nested_value(&bundle.fallback, key)
                    .and_then(|v| render_value(v, &bundle.lang, args))
            })
    })
}

/// Translate a key to the current language.
///
/// Falls back to Spanish, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key, replacing `{name}` placeholders from `args`.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Text for a notification message. Server text is shown verbatim.
#[must_use]
pub fn message(message: &Message) -> String {
    match message {
        Message::Key(key) => t(key.key()),
        Message::KeyWith(key, vars) => {
            let args: BTreeMap<&str, &str> =
                vars.iter().map(|(name, value)| (*name, value.as_str())).collect();
            tr(key.key(), Some(&args))
        }
        Message::Server(text) => text.clone(),
    }
}
