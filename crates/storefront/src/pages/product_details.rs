//! Product detail page.
//!
//! Shows one product with an "Add to Cart" action, the cart badge, the main
//! navigation menu and the user menu. Cart and session are hydrated once at
//! load; the page's copies only change through its own actions or a
//! [`ViewInvalidation`].

use beez_core::{Product, Session, session::DEFAULT_AVATAR_URL};
use tracing::instrument;

use crate::cart::{AddOutcome, Cart, CartStore};
use crate::presentation::Alert;
use crate::routes::{NavItem, Navigation, Route, navigation};
use crate::session::{Gated, Invalidate, LoginPrompt, SessionGate, SignedOut};
use crate::storage::{KeyValueStore, StorageError};

/// Shown in place of the page when no product was passed in.
pub const UNAVAILABLE_MESSAGE: &str = "Product details are not available";

/// What the product section displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductView {
    Unavailable { message: &'static str },
    Details {
        title: String,
        price: String,
        description: String,
        image_url: String,
    },
}

/// The avatar dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMenu {
    SignedIn {
        name: String,
        avatar_url: String,
        /// Profile page and log out.
        profile: Route,
    },
    SignedOut {
        avatar_url: &'static str,
        /// Log in.
        login: Route,
    },
}

/// What an add-to-cart click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Added,
    AlreadyPresent,
    Unauthenticated(LoginPrompt),
}

/// Result of [`ProductDetailsPage::add_to_cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCart {
    pub action: CartAction,
    pub alert: Alert,
}

/// Product detail page state.
#[derive(Debug)]
pub struct ProductDetailsPage<S> {
    carts: CartStore<S>,
    gate: SessionGate<S>,
    product: Option<Product>,
    cart: Cart,
    user: Option<Session>,
}

impl<S: KeyValueStore> ProductDetailsPage<S> {
    /// Load the page, hydrating cart and session from persistence.
    #[instrument(skip_all, fields(product = product.as_ref().map(|p| p.name.as_str())))]
    pub fn load(carts: CartStore<S>, gate: SessionGate<S>, product: Option<Product>) -> Self {
        let cart = carts.hydrate();
        let user = gate.current_session();
        tracing::debug!(cart_count = cart.len(), signed_in = user.is_some(), "Page loaded");
        Self {
            carts,
            gate,
            product,
            cart,
            user,
        }
    }

    /// Re-read cart and session from persistence.
    pub fn reload(&mut self) {
        self.cart = self.carts.hydrate();
        self.user = self.gate.current_session();
    }

    /// The product this page shows.
    #[must_use]
    pub const fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    /// This page's copy of the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// This page's copy of the session.
    #[must_use]
    pub const fn user(&self) -> Option<&Session> {
        self.user.as_ref()
    }

    /// Number shown on the cart badge.
    #[must_use]
    pub fn cart_count(&self) -> usize {
        CartStore::<S>::count(&self.cart)
    }

    /// Product section contents.
    #[must_use]
    pub fn view(&self) -> ProductView {
        self.product
            .as_ref()
            .map_or(ProductView::Unavailable { message: UNAVAILABLE_MESSAGE }, |p| {
                ProductView::Details {
                    title: p.name.clone(),
                    price: format!("Price: {}", p.price.display()),
                    description: p.description.clone(),
                    image_url: p.image_url.clone(),
                }
            })
    }

    /// Main navigation menu. No entry is current on this page.
    #[must_use]
    pub fn navigation(&self) -> Vec<NavItem> {
        navigation(Route::ProductDetails.path())
    }

    /// Avatar dropdown contents.
    #[must_use]
    pub fn user_menu(&self) -> UserMenu {
        match &self.user {
            Some(user) => UserMenu::SignedIn {
                name: user.name.clone(),
                avatar_url: user.avatar_url().to_owned(),
                profile: Route::Profile,
            },
            None => UserMenu::SignedOut {
                avatar_url: DEFAULT_AVATAR_URL,
                login: self.gate.sign_in(),
            },
        }
    }

    /// Add the shown product to the cart.
    ///
    /// Signed-out users get a login prompt and the cart is untouched. A
    /// product already in the cart (by the store's dedup key) is reported
    /// without writing.
    ///
    /// Returns `Ok(None)` when the page has no product.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated cart could not be persisted.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self) -> Result<Option<AddToCart>, StorageError> {
        let Some(product) = self.product.as_ref() else {
            return Ok(None);
        };

        let carts = &self.carts;
        let cart = &self.cart;
        let result = match self.gate.guard_mutation(|| carts.add(cart, product)) {
            Gated::Allowed(outcome) => match outcome? {
                AddOutcome::Added(updated) => {
                    let alert = Alert::success("Added to Cart!")
                        .with_text(format!("{} has been added to your cart.", product.name));
                    self.cart = updated;
                    AddToCart {
                        action: CartAction::Added,
                        alert,
                    }
                }
                AddOutcome::AlreadyPresent => AddToCart {
                    action: CartAction::AlreadyPresent,
                    alert: Alert::info("Product already in the cart!")
                        .with_text(format!("{} is already in your cart.", product.name)),
                },
            },
            Gated::Unauthenticated(prompt) => AddToCart {
                action: CartAction::Unauthenticated(prompt),
                alert: prompt.alert(),
            },
        };
        Ok(Some(result))
    }

    /// Open the cart page with this page's cart.
    #[must_use]
    pub fn go_to_cart(&self) -> Navigation {
        Navigation::Cart(self.cart.clone())
    }

    /// "Back to Store".
    #[must_use]
    pub const fn back_to_store(&self) -> Navigation {
        Navigation::To(Route::Store)
    }

    /// "Log in" from the user menu.
    #[must_use]
    pub const fn sign_in(&self) -> Navigation {
        Navigation::To(self.gate.sign_in())
    }

    /// "Log out" from the user menu.
    ///
    /// Clears persisted session, token and cart and resets this page. The
    /// returned [`SignedOut`] still carries the invalidation signal for any
    /// other live views.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence could not be cleared; the page is left
    /// unchanged in that case.
    pub fn sign_out(&mut self) -> Result<SignedOut, StorageError> {
        let signed_out = self.gate.sign_out()?;
        Ok(SignedOut {
            invalidation: signed_out.invalidation.apply(self),
        })
    }
}

impl<S> Invalidate for ProductDetailsPage<S> {
    fn invalidate(&mut self) {
        self.cart = Cart::new();
        self.user = None;
    }
}
