//! Configuration embedded in the bundle.
use crate::paths;
use kalyzo_storefront::StorefrontConfig;
use once_cell::sync::Lazy;

const CONFIG_JSON: &str = include_str!("../static/storefront.json");

static CONFIG: Lazy<StorefrontConfig> = Lazy::new(|| load(CONFIG_JSON));

fn load(json: &str) -> StorefrontConfig {
    let mut config = StorefrontConfig::from_json(json).unwrap_or_else(|err| {
        log::error!("invalid storefront.json, using defaults: {err}");
        StorefrontConfig::default()
    });
    config.endpoints = paths::endpoints(&config.endpoints);
    config
}

/// Configuration for this build, endpoints already prefixed with the base path.
#[must_use]
pub fn storefront() -> &'static StorefrontConfig {
    &CONFIG
}
