//! Shared types for Carta
//!
//! Models, cart aggregation and tenant helpers used by the client crate
//! and by anything embedding the menu core.

pub mod cart;
pub mod error;
pub mod models;
pub mod tenant;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use cart::{Cart, CartLineItem, CartTotals, LineKey, SelectedItem, SelectedOption};
pub use error::{CartError, TagError};
pub use models::{OptionItem, Product, ProductOption, Tag, TagType, TagWire};
