//! Error types for the shared crate

use thiserror::Error;

/// Cart input rejected before any state change
///
/// Every variant except [`CartError::LineNotFound`] is a validation failure:
/// the caller passed something the cart cannot hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("quantity must be between 1 and {max}, got {got}")]
    InvalidQuantity { got: i64, max: i32 },

    #[error("price must be between 0 and {max}, got {got}")]
    InvalidPrice { got: String, max: i64 },

    #[error("price addition for item {item_id} exceeds {max}")]
    InvalidPriceAddition { item_id: i64, max: i64 },

    #[error("line not found in cart")]
    LineNotFound,

    #[error("option {option_id} is not offered by product {product_id}")]
    UnknownOption { product_id: i64, option_id: i64 },

    #[error("item {item_id} is not offered by option {option_id}")]
    UnknownItem { option_id: i64, item_id: i64 },

    #[error("item {item_id} cannot be selected")]
    ItemNotSelectable { item_id: i64 },

    #[error("option {option_id} allows a single item, got {got}")]
    SingleChoice { option_id: i64, got: usize },

    #[error("option {option_id} requires a selection")]
    MissingRequiredOption { option_id: i64 },

    /// `product_id` is `None` when only the grand total overflowed
    #[error("cart total out of range (product {product_id:?})")]
    TotalOverflow { product_id: Option<i64> },
}

impl CartError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::LineNotFound)
    }
}

/// Tag wire payload could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unknown tag type: {0}")]
    UnknownType(String),
}
