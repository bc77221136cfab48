//! Authentication test helpers
//!
//! Shortcuts for walking a user through signup, verification and signin.

use axum::http::StatusCode;
use contactbook::backend::auth::User;
use contactbook::backend::store::UserRepository;
use serde_json::json;

use super::app::{TestApp, TestResponse};
use super::assertions::assert_status;

pub const TEST_PASSWORD: &str = "pw123";

pub async fn signup(app: &TestApp, email: &str, password: &str) -> TestResponse {
    app.post(
        "/auth/signup",
        None,
        json!({ "email": email, "password": password }),
    )
    .await
}

pub async fn signin(app: &TestApp, email: &str, password: &str) -> TestResponse {
    app.post(
        "/auth/signin",
        None,
        json!({ "email": email, "password": password }),
    )
    .await
}

/// The stored user for `email`
pub async fn stored_user(app: &TestApp, email: &str) -> User {
    app.store
        .find_by_email(email)
        .await
        .unwrap()
        .expect("user exists")
}

/// Sign up and follow the verification link
pub async fn create_verified_user(app: &TestApp, email: &str) -> User {
    assert_status(&signup(app, email, TEST_PASSWORD).await, StatusCode::CREATED);
    let code = stored_user(app, email)
        .await
        .verification_code
        .expect("pending code");
    assert_status(
        &app.get(&format!("/auth/verify/{code}"), None).await,
        StatusCode::OK,
    );
    stored_user(app, email).await
}

/// Sign up, verify and sign in, returning the session token
pub async fn signed_in_user(app: &TestApp, email: &str) -> (User, String) {
    let user = create_verified_user(app, email).await;
    let response = signin(app, email, TEST_PASSWORD).await;
    assert_status(&response, StatusCode::OK);
    let token = response.json()["accessToken"]
        .as_str()
        .expect("accessToken")
        .to_string();
    (user, token)
}
