//! Storefront configuration: endpoints, timings and widget constants.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server endpoint paths consumed by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub cart_count: String,
    pub cart_add: String,
    pub cart_update: String,
    pub cart_remove: String,
    pub cart_clear: String,
    pub cart_items: String,
    pub order_create: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            cart_count: "/orders/carrito/count/".to_string(),
            cart_add: "/orders/carrito/agregar/".to_string(),
            cart_update: "/orders/carrito/actualizar/".to_string(),
            cart_remove: "/orders/carrito/eliminar/".to_string(),
            cart_clear: "/orders/carrito/vaciar/".to_string(),
            cart_items: "/orders/carrito/items/".to_string(),
            order_create: "/clientes/orden/crear/".to_string(),
        }
    }
}

impl Endpoints {
    /// Prefix every path with a deployment base path (e.g. `/shop`).
    #[must_use]
    pub fn with_base(&self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        if base.is_empty() {
            return self.clone();
        }
        let join = |path: &str| format!("{base}/{}", path.trim_start_matches('/'));
        Self {
            cart_count: join(&self.cart_count),
            cart_add: join(&self.cart_add),
            cart_update: join(&self.cart_update),
            cart_remove: join(&self.cart_remove),
            cart_clear: join(&self.cart_clear),
            cart_items: join(&self.cart_items),
            order_create: join(&self.order_create),
        }
    }
}

/// Delays and notification lifetimes, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub toast_ms: u32,
    pub error_toast_ms: u32,
    pub reload_delay_ms: u32,
    pub cart_panel_delay_ms: u32,
    pub checkout_open_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            toast_ms: 3000,
            error_toast_ms: 4000,
            reload_delay_ms: 500,
            cart_panel_delay_ms: 800,
            checkout_open_delay_ms: 500,
        }
    }
}

/// How hidden comments are revealed by "load more".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RevealMode {
    All,
    Batched { size: usize },
}

impl Default for RevealMode {
    fn default() -> Self {
        Self::Batched { size: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub comments_initial: usize,
    pub comments_reveal: RevealMode,
    pub carousel_gap_px: f64,
    pub carousel_nav_threshold: usize,
    pub desktop_min_width: f64,
    pub scroll_multiplier: f64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            comments_initial: 5,
            comments_reveal: RevealMode::default(),
            carousel_gap_px: 12.0,
            carousel_nav_threshold: 3,
            desktop_min_width: 992.0,
            scroll_multiplier: 50.0,
        }
    }
}

/// Complete client configuration. Every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub endpoints: Endpoints,
    pub whatsapp_base: String,
    pub timing: Timing,
    pub max_quantity: u32,
    pub widgets: WidgetConfig,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            whatsapp_base: "https://wa.me".to_string(),
            timing: Timing::default(),
            max_quantity: 10,
            widgets: WidgetConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_quantity must be at least 1")]
    ZeroQuantityCap,
}

impl StorefrontConfig {
    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the quantity cap is zero.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.max_quantity == 0 {
            return Err(ConfigError::ZeroQuantityCap);
        }
        Ok(config)
    }
}
