//! Cart aggregation
//!
//! - `add_item`: merge into the structurally matching line or append
//! - `update_quantity`: set a line's quantity, removing it at zero
//! - `compute_totals`: line totals, grand total and badge count

use rust_decimal::Decimal;
use tracing::debug;

use super::money::round_to_unit;
use super::types::{CartLineItem, CartTotals, LineKey, SelectedOption, normalize_selection};
use super::{MAX_PRICE, MAX_QUANTITY};
use crate::error::CartError;
use crate::models::Product;

/// A customer's cart.
///
/// Lines keep insertion order. No line ever holds a quantity below 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, rejecting anything `add_item` would
    pub fn from_lines(lines: Vec<CartLineItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for mut line in lines {
            line.selected_options = normalize_selection(line.selected_options);
            validate_price(line.unit_price)?;
            validate_options(&line.selected_options)?;
            validate_quantity(i64::from(line.quantity))?;
            cart.merge_or_push(line)?;
        }
        Ok(cart)
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLineItem> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.position(key).map(|i| &self.lines[i])
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines.iter().position(|l| &l.key() == key)
    }

    /// Add `quantity` of `product` with the given selection.
    ///
    /// Returns the key of the line that now holds the product.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: i32,
        selected_options: Vec<SelectedOption>,
    ) -> Result<LineKey, CartError> {
        validate_quantity(i64::from(quantity))?;
        validate_price(product.price)?;
        validate_options(&selected_options)?;

        self.merge_or_push(CartLineItem {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            selected_options: normalize_selection(selected_options),
        })
    }

    fn merge_or_push(&mut self, line: CartLineItem) -> Result<LineKey, CartError> {
        let key = line.key();
        match self.position(&key) {
            Some(idx) => {
                let existing = &mut self.lines[idx];
                let merged = i64::from(existing.quantity) + i64::from(line.quantity);
                validate_quantity(merged)?;
                debug!(
                    product_id = line.product_id,
                    from = existing.quantity,
                    to = merged,
                    "[Cart] merged into existing line"
                );
                existing.quantity = merged as i32;
            }
            None => {
                debug!(
                    product_id = line.product_id,
                    quantity = line.quantity,
                    options = line.selected_options.len(),
                    "[Cart] appended new line"
                );
                self.lines.push(line);
            }
        }
        Ok(key)
    }

    /// Set the quantity of the line identified by `key`.
    ///
    /// A quantity of zero or less removes the line.
    pub fn update_quantity(&mut self, key: &LineKey, new_quantity: i32) -> Result<(), CartError> {
        if new_quantity <= 0 {
            return self.remove_item(key).map(|_| ());
        }
        validate_quantity(i64::from(new_quantity))?;

        let idx = self.position(key).ok_or(CartError::LineNotFound)?;
        self.lines[idx].quantity = new_quantity;
        Ok(())
    }

    /// Remove the line identified by `key`, returning it
    pub fn remove_item(&mut self, key: &LineKey) -> Result<CartLineItem, CartError> {
        let idx = self.position(key).ok_or(CartError::LineNotFound)?;
        let line = self.lines.remove(idx);
        debug!(
            product_id = line.product_id,
            quantity = line.quantity,
            "[Cart] removed line"
        );
        Ok(line)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across lines
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    pub fn compute_totals(&self) -> Result<CartTotals, CartError> {
        compute_totals(&self.lines)
    }
}

/// Line totals, grand total and item count for a sequence of lines.
///
/// `line_total = quantity * (unit_price + sum of price additions)`, rounded
/// to whole units; the grand total is the sum of the rounded line totals.
/// Lines are taken as given, so arithmetic overflow is reported as
/// [`CartError::TotalOverflow`].
pub fn compute_totals(lines: &[CartLineItem]) -> Result<CartTotals, CartError> {
    let line_totals = lines
        .iter()
        .map(|l| {
            l.line_total()
                .map(round_to_unit)
                .ok_or(CartError::TotalOverflow {
                    product_id: Some(l.product_id),
                })
        })
        .collect::<Result<Vec<Decimal>, CartError>>()?;
    let grand_total = line_totals
        .iter()
        .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(*t))
        .ok_or(CartError::TotalOverflow { product_id: None })?;
    let item_count = lines.iter().map(|l| i64::from(l.quantity)).sum();

    Ok(CartTotals {
        line_totals,
        grand_total,
        item_count,
    })
}

fn validate_quantity(quantity: i64) -> Result<(), CartError> {
    if quantity < 1 || quantity > i64::from(MAX_QUANTITY) {
        return Err(CartError::InvalidQuantity {
            got: quantity,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), CartError> {
    if price < Decimal::ZERO || price > Decimal::from(MAX_PRICE) {
        return Err(CartError::InvalidPrice {
            got: price.to_string(),
            max: MAX_PRICE,
        });
    }
    Ok(())
}

fn validate_options(options: &[SelectedOption]) -> Result<(), CartError> {
    for item in options.iter().flat_map(|o| &o.selected_items) {
        if item.price_addition.abs() > Decimal::from(MAX_PRICE) {
            return Err(CartError::InvalidPriceAddition {
                item_id: item.item_id,
                max: MAX_PRICE,
            });
        }
    }
    Ok(())
}
