//! Cart Module
//!
//! In-memory cart owned by the caller:
//! - `types`: line items, selected options, line identity
//! - `aggregator`: merge-on-add, quantity updates, totals
//! - `selection`: turn product option picks into selections
//! - `money`: rounding and display formatting

pub mod aggregator;
pub mod money;
pub mod selection;
pub mod types;


/// Maximum unit price or price addition (whole units)
pub const MAX_PRICE: i64 = 1_000_000;
/// Maximum quantity held by a single line
pub const MAX_QUANTITY: i32 = 9999;

// Re-exports
pub use aggregator::{Cart, compute_totals};
pub use money::{PriceFormat, format_price, round_to_unit};
pub use selection::{select_items, select_options};
pub use types::{
    CartLineItem, CartTotals, LineKey, SelectedItem, SelectedOption, normalize_selection,
};
