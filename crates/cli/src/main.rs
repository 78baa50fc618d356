//! Beez CLI - Drive the storefront from a terminal.
//!
//! Every invocation is one "page view": it hydrates cart and session from the
//! storage file, performs one action, and writes back.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! beez products
//! beez product show 3
//!
//! # Sign in (stands in for the external login flow)
//! beez session login --name "Nimal" --email nimal@example.com
//!
//! # Cart
//! beez cart add 3
//! beez cart show
//!
//! # Sign out (clears session, token and cart)
//! beez session logout
//!
//! # Create an account
//! beez signup --name Nimal --email nimal@example.com --phone 0771234567 --password '...'
//! ```
//!
//! Configuration is read from the environment; see
//! [`beez_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use beez_core::ProductId;
use beez_storefront::config::StorefrontConfig;
use beez_storefront::error::AppError;
use beez_storefront::state::AppState;
use beez_storefront::storage::FileStore;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "beez")]
#[command(author, version, about = "Beez storefront CLI")]
struct Cli {
    /// Product catalog (JSON array of products)
    #[arg(long, global = true, default_value = "products.json")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    Products,
    /// Inspect a single product
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the signed-in session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Create an account through the signup API
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Show the product detail page
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a catalog product to the cart
    Add { id: ProductId },
    /// Show cart contents
    Show,
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store a session as the login flow would
    Login {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Access token (random if omitted)
        #[arg(short, long)]
        token: Option<String>,

        /// Profile picture URL
        #[arg(long)]
        picture: Option<String>,

        /// Account email
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Show the signed-in user
    Whoami,
    /// Sign out, clearing session, token and cart
    Logout,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration errors are reported after tracing is up
    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "beez_storefront=info,beez_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(AppError::from(e)),
    };

    if let Err(e) = result {
        e.report();
        output::failure(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), AppError> {
    let state = AppState::from_config(FileStore::new(&config.storage_path), config);

    match cli.command {
        Commands::Products => commands::products::list(&state, &cli.catalog)?,
        Commands::Product { action } => match action {
            ProductAction::Show { id } => commands::products::show(&state, &cli.catalog, &id)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&state, &cli.catalog, &id)?,
            CartAction::Show => commands::cart::show(&state),
        },
        Commands::Session { action } => match action {
            SessionAction::Login {
                name,
                token,
                picture,
                email,
            } => commands::session::login(&state, name, token, picture, email)?,
            SessionAction::Whoami => commands::session::whoami(&state),
            SessionAction::Logout => commands::session::logout(&state)?,
        },
        Commands::Signup {
            name,
            email,
            phone,
            password,
        } => commands::signup::run(&state, name, email, phone, password).await?,
    }
    Ok(())
}
