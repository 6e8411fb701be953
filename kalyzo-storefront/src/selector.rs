//! Variant selector state and its render projection.
//!
//! Selecting a variant never touches the network: the view is recomputed from
//! the variants captured at page load.

use crate::error::ValidationError;
use crate::variant::{
    ImageRef, OptionGroupKind, OptionRows, PriceBlock, PurchaseActions, Variant, VariantId,
    quantity_options,
};

/// Everything the product panel needs to draw the selected variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantView {
    pub variant_id: VariantId,
    pub main_image: ImageRef,
    pub active_thumbnail: Option<usize>,
    pub price: PriceBlock,
    pub stock: i64,
    pub quantities: Vec<u32>,
    pub quantity: Option<u32>,
    pub actions: PurchaseActions,
    pub option_rows: OptionRows,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorState {
    variants: Vec<Variant>,
    gallery: Vec<ImageRef>,
    selected: Option<VariantId>,
    option_rows: OptionRows,
    quantity: u32,
    quantity_cap: u32,
}

impl SelectorState {
    /// Build the selector. `initial` picks the pre-selected variant; when it is
    /// absent or unknown the first variant is selected.
    #[must_use]
    pub fn new(
        variants: Vec<Variant>,
        gallery: Vec<ImageRef>,
        initial: Option<VariantId>,
        quantity_cap: u32,
    ) -> Self {
        let selected = initial
            .filter(|id| variants.iter().any(|v| v.id == *id))
            .or_else(|| variants.first().map(|v| v.id));
        let option_rows = selected
            .and_then(|id| variants.iter().find(|v| v.id == id))
            .map(|v| OptionRows::from_options(&v.options))
            .unwrap_or_default();
        Self {
            variants,
            gallery,
            selected,
            option_rows,
            quantity: 1,
            quantity_cap,
        }
    }

    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    #[must_use]
    pub fn gallery(&self) -> &[ImageRef] {
        &self.gallery
    }

    #[must_use]
    pub const fn selected_id(&self) -> Option<VariantId> {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Variant> {
        let id = self.selected?;
        self.variants.iter().find(|v| v.id == id)
    }

    #[must_use]
    pub fn is_selected(&self, id: VariantId) -> bool {
        self.selected == Some(id)
    }

    /// Make `id` the single selected variant and rebuild its option rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not one of the page's variants.
    pub fn select(&mut self, id: VariantId) -> Result<&Variant, ValidationError> {
        let idx = self
            .variants
            .iter()
            .position(|v| v.id == id)
            .ok_or(ValidationError::UnknownVariant(id.0))?;
        let variant = &self.variants[idx];
        self.selected = Some(id);
        self.option_rows = OptionRows::from_options(&variant.options);
        self.quantity = 1;
        Ok(variant)
    }

    /// Activate an option button. Returns `false` when nothing changed.
    pub fn select_option(&mut self, kind: OptionGroupKind, index: usize) -> bool {
        self.option_rows.activate(kind, index)
    }

    /// Record the quantity picked in the selector, clamped to what is offered.
    pub fn set_quantity(&mut self, quantity: u32) {
        let max = self
            .selected()
            .map_or(0, |v| quantity_options(v.stock, self.quantity_cap).len());
        let max = u32::try_from(max).unwrap_or(u32::MAX);
        self.quantity = quantity.clamp(1, max.max(1));
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub const fn option_rows(&self) -> &OptionRows {
        &self.option_rows
    }

    #[must_use]
    pub fn view(&self) -> Option<VariantView> {
        let variant = self.selected()?;
        let quantities = quantity_options(variant.stock, self.quantity_cap);
        let quantity = (!quantities.is_empty()).then_some(self.quantity);
        Some(VariantView {
            variant_id: variant.id,
            main_image: variant.main_image.clone(),
            active_thumbnail: self
                .gallery
                .iter()
                .position(|img| img.url == variant.main_image.url),
            price: variant.price_block(),
            stock: variant.stock,
            quantities,
            quantity,
            actions: PurchaseActions::for_stock(variant.stock),
            option_rows: self.option_rows.clone(),
        })
    }
}
