//! Deployment base path handling.
//!
//! When `PUBLIC_URL` is set at compile time (e.g. `/tienda` when the shop is
//! served under a prefix), every endpoint is prefixed accordingly. Builds
//! without it keep the root-anchored paths.
use kalyzo_storefront::Endpoints;

/// Endpoints for this build, prefixed with the compile-time base path.
#[must_use]
pub fn endpoints(configured: &Endpoints) -> Endpoints {
    endpoints_with_base(configured, option_env!("PUBLIC_URL").unwrap_or(""))
}

fn endpoints_with_base(configured: &Endpoints, base: &str) -> Endpoints {
    match public_base_with(base) {
        Some(base) => configured.with_base(&base),
        None => configured.clone(),
    }
}

fn public_base_with(base: &str) -> Option<String> {
    let base = base.trim().trim_end_matches('/');
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_build_keeps_default_paths() {
        let defaults = Endpoints::default();
        assert_eq!(endpoints_with_base(&defaults, ""), defaults);
        assert_eq!(endpoints_with_base(&defaults, "/"), defaults);
    }

    #[test]
    fn prefixed_build_rewrites_every_path() {
        let prefixed = endpoints_with_base(&Endpoints::default(), "/tienda/");
        assert_eq!(prefixed.cart_add, "/tienda/orders/carrito/agregar/");
        assert_eq!(prefixed.order_create, "/tienda/clientes/orden/crear/");
    }

    #[test]
    fn public_base_is_trimmed() {
        assert_eq!(public_base_with(" /tienda/ "), Some("/tienda".to_string()));
        assert_eq!(public_base_with(""), None);
    }
}
