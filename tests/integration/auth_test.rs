//! Integration tests for signup, login, registration, and the access guard.

use http::StatusCode;

use crate::helpers::{TestApp, field};

#[tokio::test]
async fn signup_creates_an_account() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "firstuser",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["data"]["id"].is_string());
}

#[tokio::test]
async fn signup_rejects_duplicate_usernames() {
    let app = TestApp::new().await;
    app.signup("taken", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "taken",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn signup_rejects_short_passwords() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(serde_json::json!({
                "username": "shortpw",
                "password": "nope",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.signup("cautious", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "cautious",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_unknown_user_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn fresh_login_is_provisional_until_registered() {
    let app = TestApp::new().await;
    app.signup("newcomer", "password123").await;

    let session = app.login("newcomer", "password123").await;
    assert_eq!(session["scope"], "provisional");
    assert!(session["registration_token"].is_string());
    assert!(session["renewal_token"].is_null());

    // Provisional credentials are rejected at the resource endpoint.
    let response = app.resources(Some(field(&session, "access_token"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_upgrades_to_a_full_session() {
    let app = TestApp::new().await;
    app.signup("joiner", "password123").await;

    let provisional = app.login("joiner", "password123").await;
    let upgraded = app
        .register(
            field(&provisional, "access_token"),
            field(&provisional, "registration_token"),
        )
        .await;

    assert_eq!(upgraded["scope"], "full");
    assert!(upgraded["renewal_token"].is_string());

    let response = app.resources(Some(field(&upgraded, "access_token"))).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    // Subsequent logins land directly on a full session.
    let relogin = app.login("joiner", "password123").await;
    assert_eq!(relogin["scope"], "full");
    assert!(relogin["registration_token"].is_null());
}

#[tokio::test]
async fn registration_credential_is_single_use() {
    let app = TestApp::new().await;
    app.signup("repeat", "password123").await;

    let provisional = app.login("repeat", "password123").await;
    let access_token = field(&provisional, "access_token");
    let registration_token = field(&provisional, "registration_token");

    app.register(access_token, registration_token).await;

    let second = app.try_register(access_token, registration_token).await;
    assert_eq!(second.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn resources_require_a_credential() {
    let app = TestApp::new().await;

    let missing = app.resources(None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app.resources(Some("not-a-token")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn resources_list_when_catalog_is_populated() {
    let app = TestApp::new().await;
    let session = app.full_session("reader", "password123").await;
    app.seed_resource("quarterly-report").await;

    let response = app.resources(Some(field(&session, "access_token"))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"][0]["name"], "quarterly-report");
}

#[tokio::test]
async fn health_check_needs_no_credential() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
