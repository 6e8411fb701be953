//! In-memory storefront server.
//!
//! Answers the cart and order endpoints the way the shop backend does, so the
//! client can be exercised end to end without a browser or network.

use crate::checkout::CustomerForm;
use crate::config::Endpoints;
use crate::format::format_price;
use crate::numbers::u32_to_f64;
use crate::transport::{Method, Request, RequestBody, Response, Transport, TransportError};
use crate::variant::VariantId;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "573217618510";

/// A purchasable variant known to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub product_name: String,
    pub price: f64,
    pub stock: u32,
}

impl CatalogEntry {
    pub fn new(product_name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            product_name: product_name.into(),
            price,
            stock,
        }
    }
}

/// An order accepted by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredOrder {
    pub id: u64,
    pub customer: CustomerForm,
    pub lines: Vec<(VariantId, u32)>,
    pub total: f64,
}

#[derive(Debug, Default)]
struct BackendState {
    cart: BTreeMap<VariantId, u32>,
    orders: Vec<StoredOrder>,
    requests: Vec<Request>,
    pending_failures: u32,
}

pub struct MemoryBackend {
    endpoints: Endpoints,
    token: String,
    catalog: BTreeMap<VariantId, CatalogEntry>,
    state: RefCell<BackendState>,
}

fn reply(status: u16, body: &Value) -> Response {
    Response {
        status,
        body: body.to_string(),
    }
}

fn form_value<'a>(body: &'a RequestBody, key: &str) -> Option<&'a str> {
    match body {
        RequestBody::Form(pairs) => pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str()),
        _ => None,
    }
}

fn parse_variant(body: &RequestBody) -> Option<VariantId> {
    form_value(body, "variant_id").and_then(|raw| raw.parse().ok())
}

fn parse_quantity(body: &RequestBody) -> i64 {
    form_value(body, "quantity")
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(1)
}

impl MemoryBackend {
    /// Backend accepting `token` as its anti-forgery token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            endpoints: Endpoints::default(),
            token: token.into(),
            catalog: BTreeMap::new(),
            state: RefCell::new(BackendState::default()),
        }
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn with_variant(mut self, id: u64, entry: CatalogEntry) -> Self {
        self.catalog.insert(VariantId(id), entry);
        self
    }

    /// Seed a cart line without going through the endpoints.
    pub fn put_in_cart(&self, id: u64, quantity: u32) {
        self.state.borrow_mut().cart.insert(VariantId(id), quantity);
    }

    /// Make the next `count` requests fail at the network level.
    pub fn fail_next(&self, count: u32) {
        self.state.borrow_mut().pending_failures = count;
    }

    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.state.borrow().cart.values().sum()
    }

    #[must_use]
    pub fn cart_quantity(&self, id: u64) -> Option<u32> {
        self.state.borrow().cart.get(&VariantId(id)).copied()
    }

    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().requests.clone()
    }

    /// Paths of every POST received, in order.
    #[must_use]
    pub fn posted_paths(&self) -> Vec<String> {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|r| r.method == Method::Post)
            .map(|r| r.path.clone())
            .collect()
    }

    #[must_use]
    pub fn orders(&self) -> Vec<StoredOrder> {
        self.state.borrow().orders.clone()
    }

    fn cart_total(&self, cart: &BTreeMap<VariantId, u32>) -> f64 {
        cart.iter()
            .filter_map(|(id, qty)| self.catalog.get(id).map(|e| e.price * u32_to_f64(*qty)))
            .sum()
    }

    fn mutation(&self, success: bool, message: &str) -> Response {
        let state = self.state.borrow();
        let count: u32 = state.cart.values().sum();
        reply(
            200,
            &json!({
                "success": success,
                "message": message,
                "cart_count": count,
                "cart_total": self.cart_total(&state.cart),
            }),
        )
    }

    fn handle_count(&self) -> Response {
        let state = self.state.borrow();
        reply(
            200,
            &json!({
                "cart_count": state.cart.values().sum::<u32>(),
                "cart_total": self.cart_total(&state.cart),
            }),
        )
    }

    fn handle_items(&self) -> Response {
        let state = self.state.borrow();
        let items: Vec<Value> = state
            .cart
            .iter()
            .filter_map(|(id, qty)| {
                self.catalog.get(id).map(|entry| {
                    json!({
                        "variant_id": id.0,
                        "product_name": entry.product_name,
                        "price": entry.price,
                        "quantity": qty,
                    })
                })
            })
            .collect();
        reply(
            200,
            &json!({
                "items": items,
                "cart_count": state.cart.values().sum::<u32>(),
                "total": self.cart_total(&state.cart),
            }),
        )
    }

    fn handle_add(&self, body: &RequestBody) -> Response {
        let Some(id) = parse_variant(body) else {
            return reply(
                400,
                &json!({"success": false, "message": "Producto no especificado"}),
            );
        };
        let Some(entry) = self.catalog.get(&id) else {
            return self.mutation(false, "Producto no encontrado");
        };
        let requested = u32::try_from(parse_quantity(body)).unwrap_or(0);
        let current = self.cart_quantity(id.0).unwrap_or(0);
        let total = current.saturating_add(requested);
        if entry.stock < total {
            return self.mutation(
                false,
                &format!("Stock insuficiente. Disponible: {}", entry.stock),
            );
        }
        self.state.borrow_mut().cart.insert(id, total);
        self.mutation(true, "Producto agregado al carrito")
    }

    fn handle_update(&self, body: &RequestBody) -> Response {
        let quantity = parse_quantity(body);
        if quantity <= 0 {
            return self.handle_remove(body);
        }
        let entry = parse_variant(body).and_then(|id| {
            let current = self.cart_quantity(id.0)?;
            self.catalog.get(&id).map(|entry| (id, current, entry))
        });
        let Some((id, current, entry)) = entry else {
            return self.mutation(false, "Producto no encontrado en el carrito");
        };
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if quantity > current && entry.stock < quantity - current {
            return self.mutation(
                false,
                &format!("Stock insuficiente. Disponible: {}", entry.stock),
            );
        }
        self.state.borrow_mut().cart.insert(id, quantity);
        self.mutation(true, "Cantidad actualizada")
    }

    fn handle_remove(&self, body: &RequestBody) -> Response {
        let removed = parse_variant(body)
            .and_then(|id| self.state.borrow_mut().cart.remove(&id))
            .is_some();
        if removed {
            self.mutation(true, "Producto eliminado del carrito")
        } else {
            self.mutation(false, "Producto no encontrado")
        }
    }

    fn handle_clear(&self) -> Response {
        self.state.borrow_mut().cart.clear();
        self.mutation(true, "Carrito vaciado")
    }

    fn handle_order(&self, body: &RequestBody) -> Response {
        let RequestBody::Json(value) = body else {
            return reply(
                400,
                &json!({"success": false, "message": "Datos JSON inválidos"}),
            );
        };
        let customer = match serde_json::from_value::<CustomerForm>(value.clone()) {
            Ok(form) if form.validate().is_ok() => form,
            _ => {
                return reply(
                    400,
                    &json!({"success": false, "message": "Datos inválidos"}),
                );
            }
        };

        let mut state = self.state.borrow_mut();
        if state.cart.is_empty() {
            return reply(
                400,
                &json!({"success": false, "message": "El carrito está vacío"}),
            );
        }
        let id = u64::try_from(state.orders.len()).unwrap_or(u64::MAX).saturating_add(1);
        let total = self.cart_total(&state.cart);
        let mut message = format!("Hola, quiero confirmar mi pedido #{id}\n");
        for (variant, qty) in &state.cart {
            if let Some(entry) = self.catalog.get(variant) {
                let _ = writeln!(message, "- {} x{qty}", entry.product_name);
            }
        }
        let _ = write!(message, "Total: {}", format_price(total));

        let lines = std::mem::take(&mut state.cart).into_iter().collect();
        state.orders.push(StoredOrder {
            id,
            customer,
            lines,
            total,
        });
        reply(
            200,
            &json!({
                "success": true,
                "message": "Orden creada exitosamente",
                "data": {
                    "order_id": id,
                    "whatsapp_message": message,
                    "whatsapp_number": DEFAULT_WHATSAPP_NUMBER,
                    "total": total.to_string(),
                },
            }),
        )
    }

    fn route(&self, request: &Request) -> Response {
        let endpoints = &self.endpoints;
        let path = request.path.as_str();

        if request.method == Method::Post
            && request.csrf_token.as_deref() != Some(self.token.as_str())
        {
            return Response {
                status: 403,
                body: "<h1>403 Forbidden</h1><p>CSRF verification failed.</p>".to_string(),
            };
        }

        match request.method {
            Method::Get if path == endpoints.cart_count => self.handle_count(),
            Method::Get if path == endpoints.cart_items => self.handle_items(),
            Method::Post if path == endpoints.cart_add => self.handle_add(&request.body),
            Method::Post if path == endpoints.cart_update => self.handle_update(&request.body),
            Method::Post if path == endpoints.cart_remove => self.handle_remove(&request.body),
            Method::Post if path == endpoints.cart_clear => self.handle_clear(),
            Method::Post if path == endpoints.order_create => self.handle_order(&request.body),
            _ => Response {
                status: 404,
                body: "<h1>Not Found</h1>".to_string(),
            },
        }
    }
}

#[async_trait(?Send)]
impl Transport for MemoryBackend {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let failing = {
            let mut state = self.state.borrow_mut();
            state.requests.push(request.clone());
            if state.pending_failures > 0 {
                state.pending_failures -= 1;
                true
            } else {
                false
            }
        };
        if failing {
            log::debug!("simulated network failure for {}", request.path);
            return Err(TransportError::Network("connection reset".to_string()));
        }
        Ok(self.route(&request))
    }
}
