//! Data models
//!
//! Client-side copies of backend entities. All IDs are `i64`.

pub mod product;
pub mod tag;

// Re-exports
pub use product::*;
pub use tag::*;
