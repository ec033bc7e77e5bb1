//! Cart types

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One picked entry of an option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItem {
    pub item_id: i64,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_addition: Decimal,
}

/// The items picked for one product option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub option_id: i64,
    pub option_name: String,
    pub selected_items: Vec<SelectedItem>,
}

impl SelectedOption {
    /// Sum of additions over distinct item ids; `None` on overflow
    pub fn price_additions(&self) -> Option<Decimal> {
        let mut seen = BTreeSet::new();
        self.selected_items
            .iter()
            .filter(|i| seen.insert(i.item_id))
            .try_fold(Decimal::ZERO, |acc, i| acc.checked_add(i.price_addition))
    }
}

/// A product in the cart with its chosen options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product_id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

impl CartLineItem {
    /// Identity used for merge-on-add and line lookup
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, &self.selected_options)
    }

    /// Unit price plus the addition of every distinct selected item.
    ///
    /// An item picked twice under the same option id counts once, matching
    /// [`LineKey`]. `None` on overflow.
    pub fn unit_total(&self) -> Option<Decimal> {
        let mut seen = BTreeSet::new();
        self.selected_options
            .iter()
            .flat_map(|o| o.selected_items.iter().map(move |i| (o.option_id, i)))
            .filter(|(option_id, i)| seen.insert((*option_id, i.item_id)))
            .try_fold(self.unit_price, |acc, (_, i)| {
                acc.checked_add(i.price_addition)
            })
    }

    /// `quantity * unit_total`, unrounded; `None` on overflow
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_total()?.checked_mul(Decimal::from(self.quantity))
    }
}

/// Structural identity of a cart line.
///
/// Two lines are the same line iff they share the product and, for the same
/// set of option ids, pick the same set of item ids. Order and repeated
/// entries in the selection do not matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub product_id: i64,
    options: BTreeMap<i64, BTreeSet<i64>>,
}

impl LineKey {
    pub fn new(product_id: i64, selected_options: &[SelectedOption]) -> Self {
        let mut options: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
        for opt in selected_options {
            options
                .entry(opt.option_id)
                .or_default()
                .extend(opt.selected_items.iter().map(|i| i.item_id));
        }
        Self {
            product_id,
            options,
        }
    }

    /// Key for a product added without options
    pub fn plain(product_id: i64) -> Self {
        Self {
            product_id,
            options: BTreeMap::new(),
        }
    }
}

/// Totals for display and checkout, in whole currency units
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub line_totals: Vec<Decimal>,
    pub grand_total: Decimal,
    /// Sum of quantities (badge count)
    pub item_count: i64,
}

/// Collapse a selection to its identity-relevant shape.
///
/// Entries sharing an option id are merged into the first one and repeated
/// item ids keep their first occurrence. Option and item order is otherwise
/// preserved.
pub fn normalize_selection(options: Vec<SelectedOption>) -> Vec<SelectedOption> {
    let mut out: Vec<SelectedOption> = Vec::with_capacity(options.len());
    for opt in options {
        let idx = match out.iter().position(|o| o.option_id == opt.option_id) {
            Some(idx) => idx,
            None => {
                out.push(SelectedOption {
                    option_id: opt.option_id,
                    option_name: opt.option_name.clone(),
                    selected_items: Vec::with_capacity(opt.selected_items.len()),
                });
                out.len() - 1
            }
        };
        let target = &mut out[idx].selected_items;
        for item in opt.selected_items {
            if !target.iter().any(|i| i.item_id == item.item_id) {
                target.push(item);
            }
        }
    }
    out
}
