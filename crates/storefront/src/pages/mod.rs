//! Page view models.
//!
//! Each page hydrates its own working copy of persisted state when it is
//! loaded and reports results as [`Alert`](crate::presentation::Alert)s and
//! [`Navigation`](crate::routes::Navigation)s. Rendering is left to the host.
//!
//! # Pages
//!
//! - [`ProductListPage`] - catalog grid
//! - [`ProductDetailsPage`] - single product, add to cart, user menu
//! - [`SignupPage`] - account creation form

mod product_details;
mod product_list;
mod signup;

pub use product_details::{AddToCart, CartAction, ProductDetailsPage, ProductView, UserMenu};
pub use product_list::{ProductCard, ProductListPage};
pub use signup::{SignupField, SignupOutcome, SignupPage};
