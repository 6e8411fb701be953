//! Typed client for the storefront's cart and order endpoints.
use crate::checkout::{CustomerForm, OrderReceipt, OrderSummary};
use crate::config::Endpoints;
use crate::csrf::TokenSource;
use crate::error::{StorefrontError, ValidationError};
use crate::transport::{Request, RequestBody, Transport};
use crate::variant::VariantId;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountResponse {
    #[serde(default)]
    pub cart_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub cart_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartItem {
    pub product_name: String,
    pub price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: f64,
}

/// Order ids arrive as numbers from the server but are displayed as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum OrderIdRepr {
    Number(u64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct OrderData {
    order_id: OrderIdRepr,
    whatsapp_message: String,
    whatsapp_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct OrderResponse {
    success: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<OrderData>,
}

/// Successful add: the message to show and the server's new cart count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReceipt {
    pub message: String,
    pub cart_count: u32,
}

pub struct StoreApi<T, S> {
    transport: T,
    tokens: S,
    endpoints: Endpoints,
}

impl<T, S> StoreApi<T, S>
where
    T: Transport,
    S: TokenSource,
{
    pub const fn new(transport: T, tokens: S, endpoints: Endpoints) -> Self {
        Self {
            transport,
            tokens,
            endpoints,
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn token(&self) -> Result<String, StorefrontError> {
        self.tokens.token().ok_or(StorefrontError::MissingToken)
    }

    async fn fetch<R: DeserializeOwned>(&self, request: Request) -> Result<R, StorefrontError> {
        log::debug!("{} {}", request.method.as_str(), request.path);
        let response = self.transport.send(request).await.inspect_err(|err| {
            log::error!("request failed: {err}");
        })?;
        serde_json::from_str(&response.body).map_err(|err| {
            log::error!("unreadable response (HTTP {}): {err}", response.status);
            StorefrontError::Decode(err)
        })
    }

    async fn mutate(
        &self,
        path: &str,
        body: RequestBody,
    ) -> Result<MutationResponse, StorefrontError> {
        let token = self.token()?;
        let response: MutationResponse = self.fetch(Request::post(path, body, token)).await?;
        if response.success {
            Ok(response)
        } else {
            log::warn!("{path} rejected: {}", response.message);
            Err(StorefrontError::Rejected(response.message))
        }
    }

    /// Current number of items in the server-side cart.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unreadable body.
    pub async fn count(&self) -> Result<u32, StorefrontError> {
        let response: CountResponse = self.fetch(Request::get(&self.endpoints.cart_count)).await?;
        Ok(response.cart_count)
    }

    /// Add `quantity` units of a variant.
    ///
    /// # Errors
    ///
    /// Fails locally when the quantity is zero or the token is missing;
    /// otherwise on transport failure or server rejection.
    pub async fn add(
        &self,
        variant: VariantId,
        quantity: u32,
    ) -> Result<AddReceipt, StorefrontError> {
        if quantity < 1 {
            return Err(ValidationError::QuantityBelowMinimum.into());
        }
        let body = RequestBody::Form(vec![
            ("variant_id".to_string(), variant.to_string()),
            ("quantity".to_string(), quantity.to_string()),
        ]);
        let response = self.mutate(&self.endpoints.cart_add, body).await?;
        Ok(AddReceipt {
            message: response.message,
            cart_count: response.cart_count.unwrap_or_default(),
        })
    }

    /// Replace the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Fails locally when `quantity < 1` or the token is missing; otherwise on
    /// transport failure or server rejection.
    pub async fn update(
        &self,
        variant: VariantId,
        quantity: i64,
    ) -> Result<String, StorefrontError> {
        if quantity < 1 {
            return Err(ValidationError::QuantityBelowMinimum.into());
        }
        let body = RequestBody::Form(vec![
            ("variant_id".to_string(), variant.to_string()),
            ("quantity".to_string(), quantity.to_string()),
        ]);
        Ok(self.mutate(&self.endpoints.cart_update, body).await?.message)
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Fails when the token is missing, on transport failure or server rejection.
    pub async fn remove(&self, variant: VariantId) -> Result<String, StorefrontError> {
        let body = RequestBody::Form(vec![("variant_id".to_string(), variant.to_string())]);
        Ok(self.mutate(&self.endpoints.cart_remove, body).await?.message)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Fails when the token is missing, on transport failure or server rejection.
    pub async fn clear(&self) -> Result<String, StorefrontError> {
        Ok(self
            .mutate(&self.endpoints.cart_clear, RequestBody::Empty)
            .await?
            .message)
    }

    /// Snapshot of the cart lines for the checkout summary.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unreadable body.
    pub async fn items(&self) -> Result<OrderSummary, StorefrontError> {
        let response: ItemsResponse = self.fetch(Request::get(&self.endpoints.cart_items)).await?;
        Ok(OrderSummary::from(response))
    }

    /// Create an order from the cart and the buyer's form.
    ///
    /// # Errors
    ///
    /// Fails locally when the form is invalid or the token is missing;
    /// otherwise on transport failure or server rejection.
    pub async fn create_order(&self, form: &CustomerForm) -> Result<OrderReceipt, StorefrontError> {
        form.validate()?;
        let token = self.token()?;
        let body = RequestBody::Json(serde_json::to_value(form)?);
        let response: OrderResponse = self
            .fetch(Request::post(&self.endpoints.order_create, body, token))
            .await?;
        match response.data {
            Some(data) if response.success => Ok(OrderReceipt {
                order_id: match data.order_id {
                    OrderIdRepr::Number(id) => id.to_string(),
                    OrderIdRepr::Text(id) => id,
                },
                whatsapp_message: data.whatsapp_message,
                whatsapp_number: data.whatsapp_number,
            }),
            _ => {
                log::warn!("order rejected: {}", response.message);
                Err(StorefrontError::Rejected(response.message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_response_accepts_numeric_and_text_ids() {
        let numeric: OrderResponse = serde_json::from_str(
            r#"{"success": true, "message": "ok",
                "data": {"order_id": 12, "whatsapp_message": "Hola", "whatsapp_number": "573001112233"}}"#,
        )
        .unwrap();
        assert_eq!(
            numeric.data.unwrap().order_id,
            OrderIdRepr::Number(12)
        );

        let text: OrderResponse = serde_json::from_str(
            r#"{"success": true,
                "data": {"order_id": "K-12", "whatsapp_message": "", "whatsapp_number": "1"}}"#,
        )
        .unwrap();
        assert_eq!(text.data.unwrap().order_id, OrderIdRepr::Text("K-12".into()));
    }

    #[test]
    fn mutation_response_defaults_optional_keys() {
        let response: MutationResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.message.is_empty());
        assert_eq!(response.cart_count, None);
    }

    #[test]
    fn items_response_tolerates_missing_lists() {
        let response: ItemsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
        assert!(response.total.abs() < f64::EPSILON);
    }
}
