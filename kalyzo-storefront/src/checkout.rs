//! Pay-on-delivery checkout: buyer form, order summary and WhatsApp handoff.
use crate::api::ItemsResponse;
use crate::error::{FieldError, FieldReason, ValidationError};
use crate::numbers::u32_to_f64;
use serde::{Deserialize, Serialize};

/// Buyer fields posted as JSON to the order endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default)]
    pub customer_email: String,
    pub department: String,
    pub city: String,
    #[serde(default)]
    pub neighborhood: String,
    pub address: String,
    #[serde(default)]
    pub note: String,
}

/// Keep only the digits of a phone number (`300 123-4567` -> `3001234567`).
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !value.chars().any(char::is_whitespace)
}

impl CustomerForm {
    /// Client-side validity check run before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field, reason| errors.push(FieldError { field, reason });

        let name = self.customer_name.trim();
        if name.is_empty() {
            fail("customer_name", FieldReason::Required);
        } else if name.chars().count() < 3 {
            fail("customer_name", FieldReason::TooShort);
        }

        let phone = normalize_phone(&self.customer_phone);
        if self.customer_phone.trim().is_empty() {
            fail("customer_phone", FieldReason::Required);
        } else if phone.len() != 10 || !phone.starts_with('3') {
            fail("customer_phone", FieldReason::InvalidPhone);
        }

        let email = self.customer_email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            fail("customer_email", FieldReason::InvalidEmail);
        }

        for (field, value) in [
            ("department", &self.department),
            ("city", &self.city),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                fail(field, FieldReason::Required);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidForm(errors))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub subtotal: f64,
}

/// Read-only order summary shown in the checkout modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total: f64,
}

impl OrderSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<ItemsResponse> for OrderSummary {
    fn from(response: ItemsResponse) -> Self {
        let lines = response
            .items
            .into_iter()
            .map(|item| SummaryLine {
                subtotal: item.price * u32_to_f64(item.quantity),
                product_name: item.product_name,
                unit_price: item.price,
                quantity: item.quantity,
            })
            .collect();
        Self {
            lines,
            total: response.total,
        }
    }
}

/// Result of a created order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order_id: String,
    pub whatsapp_message: String,
    pub whatsapp_number: String,
}

impl OrderReceipt {
    #[must_use]
    pub fn whatsapp_url(&self, base: &str) -> String {
        whatsapp_url(base, &self.whatsapp_number, &self.whatsapp_message)
    }
}

/// `https://wa.me/<number>?text=<url-encoded message>`
#[must_use]
pub fn whatsapp_url(base: &str, number: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base.trim_end_matches('/'),
        number.trim(),
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CartItem;

    fn valid_form() -> CustomerForm {
        CustomerForm {
            customer_name: "Ana Restrepo".into(),
            customer_phone: "300 123 4567".into(),
            customer_email: String::new(),
            department: "Antioquia".into(),
            city: "Medellín".into(),
            neighborhood: String::new(),
            address: "Cra 43A # 1-50".into(),
            note: String::new(),
        }
    }

    fn failing_fields(form: &CustomerForm) -> Vec<(&'static str, FieldReason)> {
        match form.validate() {
            Err(ValidationError::InvalidForm(errors)) => {
                errors.into_iter().map(|e| (e.field, e.reason)).collect()
            }
            other => panic!("expected invalid form, got {other:?}"),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(valid_form().validate(), Ok(()));
        let mut with_email = valid_form();
        with_email.customer_email = "ana@example.co".into();
        assert_eq!(with_email.validate(), Ok(()));
    }

    #[test]
    fn collects_every_failing_field() {
        let form = CustomerForm {
            customer_name: " Al ".into(),
            customer_phone: "2001234567".into(),
            customer_email: "ana@".into(),
            ..CustomerForm::default()
        };
        let failing = failing_fields(&form);
        assert!(failing.contains(&("customer_name", FieldReason::TooShort)));
        assert!(failing.contains(&("customer_phone", FieldReason::InvalidPhone)));
        assert!(failing.contains(&("customer_email", FieldReason::InvalidEmail)));
        assert!(failing.contains(&("department", FieldReason::Required)));
        assert!(failing.contains(&("city", FieldReason::Required)));
        assert!(failing.contains(&("address", FieldReason::Required)));
    }

    #[test]
    fn phone_rules_match_colombian_mobiles() {
        assert_eq!(normalize_phone("(300) 123-4567"), "3001234567");
        let mut form = valid_form();
        form.customer_phone = "30012345".into();
        assert_eq!(
            failing_fields(&form),
            vec![("customer_phone", FieldReason::InvalidPhone)]
        );
        form.customer_phone = "   ".into();
        assert_eq!(
            failing_fields(&form),
            vec![("customer_phone", FieldReason::Required)]
        );
    }

    #[test]
    fn form_serializes_with_server_field_names() {
        let value = serde_json::to_value(valid_form()).unwrap();
        assert_eq!(value["customer_name"], "Ana Restrepo");
        assert_eq!(value["city"], "Medellín");
        assert!(value.get("note").is_some());
    }

    #[test]
    fn summary_computes_line_subtotals() {
        let summary = OrderSummary::from(ItemsResponse {
            items: vec![
                CartItem {
                    product_name: "Lampara".into(),
                    price: 99_900.0,
                    quantity: 2,
                },
                CartItem {
                    product_name: "Cojin".into(),
                    price: 35_000.0,
                    quantity: 1,
                },
            ],
            total: 234_800.0,
        });
        assert_eq!(summary.lines.len(), 2);
        assert!((summary.lines[0].subtotal - 199_800.0).abs() < f64::EPSILON);
        assert!((summary.total - 234_800.0).abs() < f64::EPSILON);
        assert!(OrderSummary::default().is_empty());
    }

    #[test]
    fn whatsapp_url_encodes_message() {
        let url = whatsapp_url("https://wa.me/", "573001112233", "Pedido #7\nTotal: $99.900");
        assert_eq!(
            url,
            "https://wa.me/573001112233?text=Pedido%20%237%0ATotal%3A%20%2499.900"
        );
    }
}
