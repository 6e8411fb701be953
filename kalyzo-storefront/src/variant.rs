//! Product variants as embedded in the page, and their pure projections.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub u64);

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VariantId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub option: String,
    pub value: String,
}

/// Read-only snapshot of a variant, taken from the page at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub main_image: ImageRef,
    pub images: Vec<ImageRef>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub discount_percentage: u32,
    pub stock: i64,
    pub options: Vec<VariantOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantParseError {
    #[error("missing data attribute `{0}`")]
    Missing(&'static str),
    #[error("invalid value for `{attr}`: {value}")]
    Invalid { attr: &'static str, value: String },
}

/// `images` entries are either bare URLs or `{url, alt}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImageEntry {
    Url(String),
    Full(ImageRef),
}

impl From<ImageEntry> for ImageRef {
    fn from(entry: ImageEntry) -> Self {
        match entry {
            ImageEntry::Url(url) => Self {
                url,
                alt: String::new(),
            },
            ImageEntry::Full(image) => image,
        }
    }
}

fn is_blank(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("none") || value == "null"
}

/// Accepts `129900`, `129900.00` and the comma decimal form `129900,00`.
fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

impl Variant {
    /// Build a variant from an element's dataset (camelCase keys).
    ///
    /// # Errors
    ///
    /// Returns an error if the id, main image, price or stock is missing or
    /// malformed, or if the `images`/`options` JSON cannot be parsed.
    pub fn from_data_attrs(attrs: &BTreeMap<String, String>) -> Result<Self, VariantParseError> {
        let get = |key: &'static str| attrs.get(key).map(String::as_str);
        let require = |key: &'static str| get(key).ok_or(VariantParseError::Missing(key));
        let invalid = |attr: &'static str, value: &str| VariantParseError::Invalid {
            attr,
            value: value.to_string(),
        };

        let raw_id = require("variantId")?;
        let id = raw_id.parse().map_err(|_| invalid("variantId", raw_id))?;

        let raw_price = require("price")?;
        let price = parse_amount(raw_price).ok_or_else(|| invalid("price", raw_price))?;

        let discount_price = get("discountPrice")
            .filter(|v| !is_blank(v))
            .and_then(parse_amount);
        let discount_percentage = get("discountPercentage")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0);

        let raw_stock = require("stock")?;
        let stock = raw_stock
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid("stock", raw_stock))?;

        let images = match get("images").filter(|v| !is_blank(v)) {
            Some(raw) => serde_json::from_str::<Vec<ImageEntry>>(raw)
                .map_err(|_| invalid("images", raw))?
                .into_iter()
                .map(ImageRef::from)
                .collect(),
            None => Vec::new(),
        };
        let options = match get("options").filter(|v| !is_blank(v)) {
            Some(raw) => serde_json::from_str(raw).map_err(|_| invalid("options", raw))?,
            None => Vec::new(),
        };

        Ok(Self {
            id,
            main_image: ImageRef {
                url: require("mainImage")?.to_string(),
                alt: get("mainAlt").unwrap_or_default().to_string(),
            },
            images,
            price,
            discount_price,
            discount_percentage,
            stock,
            options,
        })
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    #[must_use]
    pub fn price_block(&self) -> PriceBlock {
        price_block(self.price, self.discount_price, self.discount_percentage)
    }

    /// Price actually charged: the discount price when it applies.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        match self.price_block() {
            PriceBlock::Single { price } => price,
            PriceBlock::BeforeNow { now, .. } => now,
        }
    }
}

/// Price layout for the variant panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceBlock {
    Single {
        price: f64,
    },
    BeforeNow {
        before: f64,
        now: f64,
        /// Badge percentage; `None` when the percentage is zero.
        percent: Option<u32>,
    },
}

/// Two-line layout iff a discount price is present and strictly below the list price.
#[must_use]
pub fn price_block(price: f64, discount_price: Option<f64>, discount_percentage: u32) -> PriceBlock {
    match discount_price {
        Some(now) if now < price => PriceBlock::BeforeNow {
            before: price,
            now,
            percent: (discount_percentage > 0).then_some(discount_percentage),
        },
        _ => PriceBlock::Single { price },
    }
}

/// Quantity choices `1..=min(stock, cap)`; empty when out of stock.
#[must_use]
pub fn quantity_options(stock: i64, cap: u32) -> Vec<u32> {
    let max = crate::numbers::stock_to_u32(stock).min(cap);
    (1..=max).collect()
}

/// Primary purchase buttons for the current stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseActions {
    /// "Pay on delivery" and "Add to cart" are both offered.
    Available,
    /// A single disabled "out of stock" button.
    SoldOut,
}

impl PurchaseActions {
    #[must_use]
    pub const fn for_stock(stock: i64) -> Self {
        if stock > 0 {
            Self::Available
        } else {
            Self::SoldOut
        }
    }
}

/// Option groups rendered as button rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionGroupKind {
    Medida,
    Peso,
    Material,
    Color,
}

impl OptionGroupKind {
    pub const ALL: [Self; 4] = [Self::Medida, Self::Peso, Self::Material, Self::Color];

    /// Match the option name used by the catalogue.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Medida => "Medida",
            Self::Peso => "Peso",
            Self::Material => "Material",
            Self::Color => "Color",
        }
    }

    /// DOM id prefix for the group's container and button row.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Medida => "medida",
            Self::Peso => "peso",
            Self::Material => "material",
            Self::Color => "color",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    pub kind: OptionGroupKind,
    pub values: Vec<String>,
    pub active: Option<usize>,
}

impl OptionRow {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.values.is_empty()
    }

    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }
}

/// One row per [`OptionGroupKind`], rebuilt from a variant's option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRows {
    rows: Vec<OptionRow>,
}

impl Default for OptionRows {
    fn default() -> Self {
        Self::from_options(&[])
    }
}

impl OptionRows {
    /// Group options by kind; names outside the fixed enumeration are ignored.
    #[must_use]
    pub fn from_options(options: &[VariantOption]) -> Self {
        let rows = OptionGroupKind::ALL
            .into_iter()
            .map(|kind| OptionRow {
                kind,
                values: options
                    .iter()
                    .filter(|opt| OptionGroupKind::from_label(&opt.option) == Some(kind))
                    .map(|opt| opt.value.clone())
                    .collect(),
                active: None,
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[OptionRow] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, kind: OptionGroupKind) -> Option<&OptionRow> {
        self.rows.iter().find(|row| row.kind == kind)
    }

    /// Make `index` the only active button of `kind`. Other groups are untouched.
    /// Returns `false` when the index is out of range.
    pub fn activate(&mut self, kind: OptionGroupKind, index: usize) -> bool {
        match self.rows.iter_mut().find(|row| row.kind == kind) {
            Some(row) if index < row.values.len() => {
                row.active = Some(index);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn active_value(&self, kind: OptionGroupKind) -> Option<&str> {
        let row = self.row(kind)?;
        row.active
            .and_then(|idx| row.values.get(idx))
            .map(String::as_str)
    }
}
