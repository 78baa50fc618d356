//! Beez Storefront library.
//!
//! Client-side state for the Beez shop: a persisted shopping cart gated on a
//! signed-in session, plus the view models of the pages that drive it.
//!
//! # Architecture
//!
//! - [`storage`] - the only path to persisted keys (`cart`, `user`, `token`)
//! - [`cart`] - hydrate, deduplicate and persist the cart
//! - [`session`] - authentication gate and sign-out
//! - [`pages`] - product list, product detail and signup view models
//! - [`state`] - injects one store and policy set into every page
//!
//! Pages never render or navigate themselves; they return
//! [`presentation::Alert`]s and [`routes::Navigation`]s for the host.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pages;
pub mod presentation;
pub mod routes;
pub mod session;
pub mod signup;
pub mod state;
pub mod storage;
