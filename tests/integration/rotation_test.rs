//! Integration tests for credential rotation.

use http::StatusCode;

use crate::helpers::{TestApp, field, wait_for_access_expiry};

#[tokio::test]
async fn early_rotation_is_allowed() {
    let app = TestApp::new().await;
    let session = app.full_session("early", "password123").await;

    // The access credential is still valid; rotation proceeds anyway.
    let rotated = app
        .refresh(
            field(&session, "access_token"),
            field(&session, "renewal_token"),
        )
        .await;

    assert_eq!(rotated.status, StatusCode::OK);
    assert_ne!(
        rotated.body["data"]["access_token"],
        session["access_token"]
    );
    assert_ne!(
        rotated.body["data"]["renewal_token"],
        session["renewal_token"]
    );
}

#[tokio::test]
async fn rotation_works_with_an_expired_access_credential() {
    let app = TestApp::new().await;
    let session = app.full_session("expired", "password123").await;
    let access_token = field(&session, "access_token");

    wait_for_access_expiry().await;

    // The expired credential no longer passes the guard...
    let denied = app.resources(Some(access_token)).await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    // ...but still rotates together with its bound renewal credential.
    let rotated = app
        .refresh(access_token, field(&session, "renewal_token"))
        .await;
    assert_eq!(rotated.status, StatusCode::OK);

    // The replacement passes the guard.
    let fresh_access = rotated.body["data"]["access_token"].as_str().unwrap();
    let allowed = app.resources(Some(fresh_access)).await;
    assert_eq!(allowed.status, StatusCode::NO_CONTENT);

    // The superseded access credential stays dead.
    let still_denied = app.resources(Some(access_token)).await;
    assert_eq!(still_denied.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn renewal_credential_is_single_use() {
    let app = TestApp::new().await;
    let session = app.full_session("onceonly", "password123").await;
    let access_token = field(&session, "access_token");
    let renewal_token = field(&session, "renewal_token");

    let first = app.refresh(access_token, renewal_token).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.refresh(access_token, renewal_token).await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cross_session_swap_is_rejected_and_poisons_the_victim() {
    let app = TestApp::new().await;
    app.signup("swapped", "password123").await;

    let provisional = app.login("swapped", "password123").await;
    let session_one = app
        .register(
            field(&provisional, "access_token"),
            field(&provisional, "registration_token"),
        )
        .await;
    let session_two = app.login("swapped", "password123").await;

    // Session two's access credential with session one's renewal
    // credential: individually valid, jointly a binding violation.
    let swap = app
        .refresh(
            field(&session_two, "access_token"),
            field(&session_one, "renewal_token"),
        )
        .await;
    assert_eq!(swap.status, StatusCode::UNAUTHORIZED);

    // The violation revoked session one's family: its own well-bound
    // pair is permanently unusable.
    let legit = app
        .refresh(
            field(&session_one, "access_token"),
            field(&session_one, "renewal_token"),
        )
        .await;
    assert_eq!(legit.status, StatusCode::UNAUTHORIZED);

    // Session two is unaffected.
    let intact = app
        .refresh(
            field(&session_two, "access_token"),
            field(&session_two, "renewal_token"),
        )
        .await;
    assert_eq!(intact.status, StatusCode::OK);
}

#[tokio::test]
async fn rotation_rejects_a_malformed_access_credential() {
    let app = TestApp::new().await;
    let session = app.full_session("garbled", "password123").await;

    let response = app
        .refresh("garbage", field(&session, "renewal_token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // The failed attempt did not consume the renewal credential.
    let retry = app
        .refresh(
            field(&session, "access_token"),
            field(&session, "renewal_token"),
        )
        .await;
    assert_eq!(retry.status, StatusCode::OK);
}

#[tokio::test]
async fn rotation_rejects_an_unknown_renewal_credential() {
    let app = TestApp::new().await;
    let session = app.full_session("unknown", "password123").await;

    let response = app
        .refresh(field(&session, "access_token"), "never-issued")
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
