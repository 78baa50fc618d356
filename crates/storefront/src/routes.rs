//! Named routes and navigation intents.
//!
//! Pages never navigate themselves. They return a [`Navigation`] describing
//! where the router should go next and which state to carry along.

use beez_core::Product;

use crate::cart::Cart;

/// A named client-side route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Invoice,
    ContactUs,
    AboutUs,
    Store,
    ProductDetails,
    Cart,
    Login,
    Signup,
    Profile,
}

impl Route {
    /// All routes, in menu-then-utility order.
    pub const ALL: [Self; 10] = [
        Self::Home,
        Self::Invoice,
        Self::ContactUs,
        Self::AboutUs,
        Self::Store,
        Self::ProductDetails,
        Self::Cart,
        Self::Login,
        Self::Signup,
        Self::Profile,
    ];

    /// URL path for this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Invoice => "/invoice",
            Self::ContactUs => "/contactus",
            Self::AboutUs => "/aboutus",
            Self::Store => "/storepage",
            Self::ProductDetails => "/productdetails",
            Self::Cart => "/cart",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::Profile => "/profile",
        }
    }

    /// Look up a route by its exact path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.path() == path)
    }
}

/// An entry in the main navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub route: Route,
    /// Whether this entry is the page currently shown.
    pub current: bool,
}

const MENU: [(&str, Route); 5] = [
    ("Home", Route::Home),
    ("Invoice", Route::Invoice),
    ("Contact Us", Route::ContactUs),
    ("About Us", Route::AboutUs),
    ("Store", Route::Store),
];

/// Main navigation menu with the entry matching `current_path` marked.
#[must_use]
pub fn navigation(current_path: &str) -> Vec<NavItem> {
    MENU.iter()
        .map(|&(name, route)| NavItem {
            name,
            route,
            current: route.path() == current_path,
        })
        .collect()
}

/// Where to go next, with any state the target page needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Plain navigation.
    To(Route),
    /// Open the cart page with the caller's current cart.
    Cart(Cart),
    /// Open the detail page for a product.
    ProductDetails(Product),
}

impl Navigation {
    /// The destination route.
    #[must_use]
    pub const fn route(&self) -> Route {
        match self {
            Self::To(route) => *route,
            Self::Cart(_) => Route::Cart,
            Self::ProductDetails(_) => Route::ProductDetails,
        }
    }
}

impl From<Route> for Navigation {
    fn from(route: Route) -> Self {
        Self::To(route)
    }
}
