//! Integration tests for the Beez storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p beez-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Page views sharing one storage file
//! - `signup` - Signup page against an in-process API server
//!
//! Nothing here needs external services. The helpers below build state over
//! a temporary storage file and a local stand-in for the signup API.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use beez_core::{Price, Product, ProductId};
use beez_storefront::config::StorefrontConfig;
use beez_storefront::state::AppState;
use beez_storefront::storage::FileStore;
use serde::Deserialize;
use tempfile::TempDir;
use url::Url;

/// Email the fake signup API treats as already registered.
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// Storefront state over a storage file in a temporary directory.
///
/// The directory lives as long as the context.
pub struct StorageContext {
    pub dir: TempDir,
    pub config: StorefrontConfig,
}

impl StorageContext {
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = StorefrontConfig {
            storage_path: dir.path().join("storage.json"),
            ..StorefrontConfig::default()
        };
        Self { dir, config }
    }

    /// Fresh state over the same file, as a new process would see it.
    #[must_use]
    pub fn state(&self) -> AppState<FileStore> {
        AppState::from_config(FileStore::new(&self.config.storage_path), &self.config)
    }
}

impl Default for StorageContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Catalog fixture.
#[must_use]
pub fn product(id: i64, name: &str, cents: i64) -> Product {
    Product::new(
        ProductId::new(id),
        name,
        Price::from_cents(cents).expect("fixture price is non-negative"),
    )
}

/// A signup body as received by the fake API.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivedSignup {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// In-process signup API.
///
/// Answers `201 Created` (or the status given to [`SignupServer::answering`])
/// unless the email is [`TAKEN_EMAIL`], which gets `409 Conflict`. Records
/// every body it receives.
pub struct SignupServer {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedSignup>>>,
}

#[derive(Clone)]
struct ServerState {
    received: Arc<Mutex<Vec<ReceivedSignup>>>,
    accepted: StatusCode,
}

impl SignupServer {
    pub async fn start() -> Self {
        Self::answering(StatusCode::CREATED).await
    }

    /// Start a server that answers new signups with `accepted`.
    pub async fn answering(accepted: StatusCode) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/api/signup", post(signup))
            .with_state(ServerState {
                received: Arc::clone(&received),
                accepted,
            });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        Self { addr, received }
    }

    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/api/signup", self.addr)).expect("valid test URL")
    }

    /// Bodies received so far.
    #[must_use]
    pub fn received(&self) -> Vec<ReceivedSignup> {
        self.received.lock().expect("lock poisoned").clone()
    }
}

async fn signup(State(state): State<ServerState>, Json(body): Json<ReceivedSignup>) -> StatusCode {
    let taken = body.email == TAKEN_EMAIL;
    state.received.lock().expect("lock poisoned").push(body);
    if taken {
        StatusCode::CONFLICT
    } else {
        state.accepted
    }
}
