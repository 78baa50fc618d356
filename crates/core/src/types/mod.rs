//! Core types for the Beez storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;
pub mod session;

pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use session::Session;
