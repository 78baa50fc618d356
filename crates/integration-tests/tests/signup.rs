//! Signup page against an in-process signup API.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use beez_integration_tests::{SignupServer, StorageContext, TAKEN_EMAIL};
use beez_storefront::pages::{SignupField, SignupOutcome, SignupPage};
use beez_storefront::presentation::{AlertIcon, Confirm};
use beez_storefront::routes::{Navigation, Route};
use beez_storefront::signup::SignupError;

fn page_for(server: &SignupServer) -> SignupPage {
    let mut ctx = StorageContext::new();
    ctx.config.signup_url = server.url();
    ctx.state().signup().unwrap()
}

fn fill(page: &mut SignupPage, email: &str) {
    page.set_field(SignupField::Name, "Nimal");
    page.set_field(SignupField::Email, email);
    page.set_field(SignupField::Phone, "0771234567");
    page.set_field(SignupField::Password, "hunter22");
}

#[tokio::test]
async fn test_signup_success_navigates_to_login() {
    let server = SignupServer::start().await;
    let mut page = page_for(&server);
    fill(&mut page, "nimal@example.com");

    let outcome = page.submit().await;

    assert!(matches!(outcome, SignupOutcome::Created));
    assert_eq!(outcome.navigation(), Some(Navigation::To(Route::Login)));
    let alert = outcome.alert().unwrap();
    assert_eq!(alert.icon, AlertIcon::Success);
    assert!(matches!(alert.confirm, Confirm::AutoClose { .. }));

    let received = server.received();
    assert_eq!(received.len(), 1);
    let body = received.first().unwrap();
    assert_eq!(body.name, "Nimal");
    assert_eq!(body.phone, "0771234567");
    assert_eq!(body.password, "hunter22");
}

#[tokio::test]
async fn test_signup_rejection_stays_on_page() {
    let server = SignupServer::start().await;
    let mut page = page_for(&server);
    fill(&mut page, TAKEN_EMAIL);

    let outcome = page.submit().await;

    assert!(matches!(
        outcome,
        SignupOutcome::Failed(SignupError::Rejected { status: 409 })
    ));
    assert!(outcome.navigation().is_none());
    let alert = outcome.alert().unwrap();
    assert_eq!(alert.title, "Signup failed!");
    assert_eq!(alert.text.as_deref(), Some("Try again. Email already exists."));
    assert_eq!(server.received().len(), 1);
}

#[tokio::test]
async fn test_signup_other_success_status_is_failure() {
    for status in [StatusCode::OK, StatusCode::ACCEPTED, StatusCode::NO_CONTENT] {
        let server = SignupServer::answering(status).await;
        let mut page = page_for(&server);
        fill(&mut page, "nimal@example.com");

        let outcome = page.submit().await;

        assert!(
            matches!(
                outcome,
                SignupOutcome::Failed(SignupError::Rejected { status: s }) if s == status.as_u16()
            ),
            "{status} should be rejected"
        );
        assert!(outcome.navigation().is_none());
        assert_eq!(outcome.alert().unwrap().icon, AlertIcon::Error);
    }
}

#[tokio::test]
async fn test_incomplete_signup_sends_nothing() {
    let server = SignupServer::start().await;
    let mut page = page_for(&server);
    page.set_field(SignupField::Name, "Nimal");

    let outcome = page.submit().await;

    let SignupOutcome::Incomplete(missing) = outcome else {
        panic!("expected incomplete form");
    };
    assert_eq!(
        missing,
        [SignupField::Email, SignupField::Phone, SignupField::Password]
    );
    assert!(server.received().is_empty());
}
