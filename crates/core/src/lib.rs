//! Beez Core - Shared types library.
//!
//! This crate provides common types used across all Beez components:
//! - `storefront` - Cart, session gate and page view models
//! - `cli` - Command-line driver over the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids and prices, plus the
//!   `Product` and `Session` records shared by every page

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
