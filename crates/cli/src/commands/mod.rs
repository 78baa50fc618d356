//! CLI command implementations.

pub mod cart;
pub mod products;
pub mod session;
pub mod signup;
