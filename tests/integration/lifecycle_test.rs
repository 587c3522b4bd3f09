//! End-to-end lifecycle scenarios: the full journey from signup through
//! rotation to logout, and logout edge cases.

use http::StatusCode;

use crate::helpers::{TestApp, field, wait_for_access_expiry};

#[tokio::test]
async fn full_lifecycle_scenario() {
    let app = TestApp::new().await;

    // Signup, login, register.
    app.signup("traveler", "password123").await;
    let provisional = app.login("traveler", "password123").await;
    let session = app
        .register(
            field(&provisional, "access_token"),
            field(&provisional, "registration_token"),
        )
        .await;

    // Resource access with an empty catalog: no content.
    let empty = app.resources(Some(field(&session, "access_token"))).await;
    assert_eq!(empty.status, StatusCode::NO_CONTENT);

    app.seed_resource("manifest").await;
    let listed = app.resources(Some(field(&session, "access_token"))).await;
    assert_eq!(listed.status, StatusCode::OK);

    // Wait past the access TTL: the old credential stops working.
    wait_for_access_expiry().await;
    let denied = app.resources(Some(field(&session, "access_token"))).await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    // Rotate with the expired access credential and its renewal pair.
    let rotated = app
        .refresh(
            field(&session, "access_token"),
            field(&session, "renewal_token"),
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let new_session = rotated.body["data"].clone();

    // The old access credential stays dead; the new one works.
    let old = app.resources(Some(field(&session, "access_token"))).await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    let fresh = app
        .resources(Some(field(&new_session, "access_token")))
        .await;
    assert_eq!(fresh.status, StatusCode::OK);

    // Logout with the new credential.
    let logout = app.logout(field(&new_session, "access_token")).await;
    assert_eq!(logout.status, StatusCode::OK);

    // The family is terminal: rotation is no longer possible, so once the
    // access window lapses no credential from this family works again.
    let rotate_after_logout = app
        .refresh(
            field(&new_session, "access_token"),
            field(&new_session, "renewal_token"),
        )
        .await;
    assert_eq!(rotate_after_logout.status, StatusCode::UNAUTHORIZED);

    wait_for_access_expiry().await;
    let after_logout = app
        .resources(Some(field(&new_session, "access_token")))
        .await;
    assert_eq!(after_logout.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn two_independent_sessions_do_not_mix() {
    let app = TestApp::new().await;
    app.signup("parallel", "password123").await;

    let provisional = app.login("parallel", "password123").await;
    let session_one = app
        .register(
            field(&provisional, "access_token"),
            field(&provisional, "registration_token"),
        )
        .await;

    // Second login without logging out: an independent family.
    let session_two = app.login("parallel", "password123").await;
    assert_eq!(session_two["scope"], "full");

    // Rotating with session one's renewal credential and session two's
    // access credential is rejected.
    let mixed = app
        .refresh(
            field(&session_two, "access_token"),
            field(&session_one, "renewal_token"),
        )
        .await;
    assert_eq!(mixed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_succeeds_with_an_expired_credential() {
    let app = TestApp::new().await;
    let session = app.full_session("leaver", "password123").await;

    wait_for_access_expiry().await;

    let logout = app.logout(field(&session, "access_token")).await;
    assert_eq!(logout.status, StatusCode::OK);

    // The renewal credential died with the family.
    let rotate = app
        .refresh(
            field(&session, "access_token"),
            field(&session, "renewal_token"),
        )
        .await;
    assert_eq!(rotate.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = TestApp::new().await;
    let session = app.full_session("doubletap", "password123").await;

    let first = app.logout(field(&session, "access_token")).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.logout(field(&session, "access_token")).await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn logout_rejects_malformed_credentials() {
    let app = TestApp::new().await;

    let response = app.logout("garbage").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_whole_family_across_rotations() {
    let app = TestApp::new().await;
    let session = app.full_session("lineage", "password123").await;

    // Rotate once; the family stays the same.
    let rotated = app
        .refresh(
            field(&session, "access_token"),
            field(&session, "renewal_token"),
        )
        .await;
    assert_eq!(rotated.status, StatusCode::OK);
    let new_session = rotated.body["data"].clone();

    // Logging out with the ORIGINAL (pre-rotation) access credential
    // kills the current generation's renewal credential too.
    let logout = app.logout(field(&session, "access_token")).await;
    assert_eq!(logout.status, StatusCode::OK);

    let rotate = app
        .refresh(
            field(&new_session, "access_token"),
            field(&new_session, "renewal_token"),
        )
        .await;
    assert_eq!(rotate.status, StatusCode::UNAUTHORIZED);
}
