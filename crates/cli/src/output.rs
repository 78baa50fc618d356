//! Terminal rendering of page results.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use beez_storefront::cart::Cart;
use beez_storefront::error::AppError;
use beez_storefront::pages::{ProductCard, ProductView, UserMenu};
use beez_storefront::presentation::{Alert, AlertIcon, Confirm};

const fn icon_label(icon: AlertIcon) -> &'static str {
    match icon {
        AlertIcon::Info => "info",
        AlertIcon::Success => "success",
        AlertIcon::Warning => "warning",
        AlertIcon::Error => "error",
    }
}

/// Print an alert and what confirming it would do.
pub fn alert(alert: &Alert) {
    println!("[{}] {}", icon_label(alert.icon), alert.title);
    if let Some(text) = &alert.text {
        println!("    {text}");
    }
    if let Confirm::Navigate { label, route } = &alert.confirm {
        println!("    ({label} -> {})", route.path());
    }
}

pub fn failure(err: &AppError) {
    eprintln!("error: {err}");
}

pub fn product(view: &ProductView) {
    match view {
        ProductView::Unavailable { message } => println!("{message}"),
        ProductView::Details {
            title,
            price,
            description,
            image_url,
        } => {
            println!("{title}");
            println!("{price}");
            if !description.is_empty() {
                println!();
                println!("{description}");
            }
            if !image_url.is_empty() {
                println!("image: {image_url}");
            }
        }
    }
}

pub fn cards(cards: &[ProductCard]) {
    if cards.is_empty() {
        println!("No products.");
    }
    for card in cards {
        println!("{:>6}  {:<32} {}", card.id, card.name, card.price);
    }
}

pub fn cart(cart: &Cart) {
    println!("Cart ({})", cart.len());
    for (i, entry) in cart.iter().enumerate() {
        println!("{:>3}. {:<32} {}", i + 1, entry.name, entry.price);
    }
}

pub fn badge(count: usize) {
    println!("cart: {count}");
}

pub fn user_menu(menu: &UserMenu) {
    match menu {
        UserMenu::SignedIn {
            name, avatar_url, ..
        } => println!("Signed in as {name} ({avatar_url})"),
        UserMenu::SignedOut { login, .. } => {
            println!("Not signed in (log in at {})", login.path());
        }
    }
}
