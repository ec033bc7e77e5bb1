//! Product Model
//!
//! Catalog shapes the cart is fed from. Prices are whole currency units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::tag::Tag;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
}

impl Product {
    pub fn option(&self, option_id: i64) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn is_recommended(&self) -> bool {
        self.tags.iter().any(|t| t.is_recommended)
    }
}

/// A choice group on a product ("Size", "Extras")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: i64,
    pub name: String,
    /// At least one item must be picked
    #[serde(default)]
    pub required: bool,
    /// More than one item may be picked
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub items: Vec<OptionItem>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl ProductOption {
    pub fn item(&self, item_id: i64) -> Option<&OptionItem> {
        self.items.iter().find(|i| i.id == item_id)
    }
}

/// One pickable entry inside a [`ProductOption`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionItem {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float", default)]
    pub price_addition: Decimal,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl OptionItem {
    /// Items tagged with `disable_selection` are shown but cannot be picked
    pub fn is_selectable(&self) -> bool {
        !self.tags.iter().any(|t| t.disable_selection)
    }
}
