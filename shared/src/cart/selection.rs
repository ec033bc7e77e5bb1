//! Build cart selections from a product's options

use std::collections::BTreeSet;

use super::types::{SelectedItem, SelectedOption};
use crate::error::CartError;
use crate::models::{Product, ProductOption};

/// Resolve the customer's picks against `option`.
///
/// Repeated item ids collapse to one pick. Unknown items and items tagged
/// with `disable_selection` are rejected, as is more than one pick on a
/// single-choice option. An empty pick list yields `None`.
pub fn select_items(
    option: &ProductOption,
    item_ids: &[i64],
) -> Result<Option<SelectedOption>, CartError> {
    let mut seen = BTreeSet::new();
    let mut selected_items = Vec::new();

    for &item_id in item_ids {
        if !seen.insert(item_id) {
            continue;
        }
        let item = option.item(item_id).ok_or(CartError::UnknownItem {
            option_id: option.id,
            item_id,
        })?;
        if !item.is_selectable() {
            return Err(CartError::ItemNotSelectable { item_id });
        }
        selected_items.push(SelectedItem {
            item_id,
            item_name: item.name.clone(),
            price_addition: item.price_addition,
        });
    }

    if !option.multiple && selected_items.len() > 1 {
        return Err(CartError::SingleChoice {
            option_id: option.id,
            got: selected_items.len(),
        });
    }
    if selected_items.is_empty() {
        return Ok(None);
    }

    Ok(Some(SelectedOption {
        option_id: option.id,
        option_name: option.name.clone(),
        selected_items,
    }))
}

/// Resolve picks for every option of `product`, in the product's option order.
///
/// `picks` pairs an option id with the chosen item ids. Required options
/// without a pick fail with [`CartError::MissingRequiredOption`].
pub fn select_options(
    product: &Product,
    picks: &[(i64, Vec<i64>)],
) -> Result<Vec<SelectedOption>, CartError> {
    for (option_id, _) in picks {
        if product.option(*option_id).is_none() {
            return Err(CartError::UnknownOption {
                product_id: product.id,
                option_id: *option_id,
            });
        }
    }

    let mut out = Vec::new();
    for option in &product.options {
        let item_ids: Vec<i64> = picks
            .iter()
            .filter(|(id, _)| *id == option.id)
            .flat_map(|(_, items)| items.iter().copied())
            .collect();

        match select_items(option, &item_ids)? {
            Some(selected) => out.push(selected),
            None if option.required => {
                return Err(CartError::MissingRequiredOption {
                    option_id: option.id,
                });
            }
            None => {}
        }
    }
    Ok(out)
}
