//! Authentication API integration tests

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use contactbook::backend::auth::gravatar::identicon_url;
use contactbook::backend::auth::SessionKeys;
use contactbook::backend::store::UserRepository;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_signup_creates_unverified_user() {
    let app = TestApp::new().await;

    let response = signup(&app, "a@x.com", "pw123").await;

    assert_status(&response, StatusCode::CREATED);
    assert_eq!(
        response.json(),
        json!({
            "user": {
                "email": "a@x.com",
                "subscription": "starter",
                "avatarURL": identicon_url("a@x.com"),
            }
        })
    );

    let user = stored_user(&app, "a@x.com").await;
    assert!(!user.verified);
    assert!(user.verification_code.is_some());
    assert!(user.access_token.is_none());
    assert_ne!(user.password_hash, "pw123");
}

#[tokio::test]
async fn test_signup_sends_exactly_one_verification_email() {
    let app = TestApp::new().await;

    signup(&app, "a@x.com", "pw123").await;

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
    let code = stored_user(&app, "a@x.com").await.verification_code.unwrap();
    assert!(sent[0]
        .html
        .contains(&format!("{TEST_BASE_URL}/auth/verify/{code}")));
}

#[tokio::test]
async fn test_signup_with_existing_email_conflicts() {
    let app = TestApp::new().await;
    signup(&app, "a@x.com", "pw123").await;

    let response = signup(&app, "a@x.com", "other").await;
    assert_error(&response, StatusCode::CONFLICT, "Email already in use");

    let response = signup(&app, " A@X.COM", "other").await;
    assert_error(&response, StatusCode::CONFLICT, "Email already in use");

    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_signup_with_subscription() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/auth/signup",
            None,
            json!({ "email": "a@x.com", "password": "pw123", "subscription": "business" }),
        )
        .await;

    assert_status(&response, StatusCode::CREATED);
    assert_eq!(response.json()["user"]["subscription"], "business");
}

#[tokio::test]
async fn test_signup_rejects_invalid_payloads() {
    let app = TestApp::new().await;

    for body in [
        json!({ "password": "pw123" }),
        json!({ "email": "a@x.com" }),
        json!({ "email": "not-an-email", "password": "pw123" }),
        json!({ "email": "a@x.com", "password": "" }),
        json!({ "email": "a@x.com", "password": "pw123", "subscription": "gold" }),
        json!({ "email": "a@x.com", "password": "pw123", "role": "admin" }),
    ] {
        let response = app.post("/auth/signup", None, body.clone()).await;
        assert_status(&response, StatusCode::BAD_REQUEST);
        assert_eq!(response.json()["status"], 400, "payload: {body}");
    }

    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_signup_survives_mail_failure() {
    let app = TestApp::new().await;
    app.mailer.fail(true);

    let response = signup(&app, "a@x.com", "pw123").await;

    assert_status(&response, StatusCode::CREATED);
    stored_user(&app, "a@x.com").await;
}

#[tokio::test]
async fn test_verify_email() {
    let app = TestApp::new().await;
    signup(&app, "a@x.com", "pw123").await;
    let code = code_from_email(&app.mailer.sent()[0]);

    let response = app.get("/auth/verify/wrong-code", None).await;
    assert_error(&response, StatusCode::NOT_FOUND, "User not found");

    let response = app.get(&format!("/auth/verify/{code}"), None).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json(), json!({ "message": "Verification successful" }));

    let user = stored_user(&app, "a@x.com").await;
    assert!(user.verified);
    assert!(user.verification_code.is_none());

    let response = app.get(&format!("/auth/verify/{code}"), None).await;
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resend_verification() {
    let app = TestApp::new().await;
    signup(&app, "a@x.com", "pw123").await;

    let response = app
        .post("/auth/verify", None, json!({ "email": "a@x.com" }))
        .await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json(), json!({ "message": "Verification email sent" }));

    let sent = app.mailer.sent_to("a@x.com");
    assert_eq!(sent.len(), 2);
    assert_eq!(code_from_email(&sent[0]), code_from_email(&sent[1]));
}

#[tokio::test]
async fn test_resend_verification_failures() {
    let app = TestApp::new().await;
    create_verified_user(&app, "a@x.com").await;

    let response = app.post("/auth/verify", None, json!({})).await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let response = app
        .post("/auth/verify", None, json!({ "email": "nobody@x.com" }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "User not found");

    let response = app
        .post("/auth/verify", None, json!({ "email": "a@x.com" }))
        .await;
    assert_error(
        &response,
        StatusCode::BAD_REQUEST,
        "Verification has already been passed",
    );
}

#[tokio::test]
async fn test_resend_verification_mail_failure() {
    let app = TestApp::new().await;
    signup(&app, "a@x.com", "pw123").await;
    app.mailer.fail(true);

    let response = app
        .post("/auth/verify", None, json!({ "email": "a@x.com" }))
        .await;
    assert_error(&response, StatusCode::INTERNAL_SERVER_ERROR, "Server error");
}

#[tokio::test]
async fn test_signin_before_verification() {
    let app = TestApp::new().await;
    signup(&app, "a@x.com", "pw123").await;

    let response = signin(&app, "a@x.com", "pw123").await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Email is not verified");

    let response = signin(&app, "a@x.com", "wrong").await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Email or password is wrong");

    assert!(stored_user(&app, "a@x.com").await.access_token.is_none());
}

#[tokio::test]
async fn test_signin_wrong_credentials() {
    let app = TestApp::new().await;
    create_verified_user(&app, "a@x.com").await;

    let response = signin(&app, "a@x.com", "pw1234").await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Email or password is wrong");

    let response = signin(&app, "b@x.com", "pw123").await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Email or password is wrong");
}

#[tokio::test]
async fn test_full_signup_verify_signin_flow() {
    let app = TestApp::new().await;
    signup(&app, "a@x.com", "pw123").await;
    let code = code_from_email(&app.mailer.sent()[0]);
    app.get(&format!("/auth/verify/{code}"), None).await;

    let response = signin(&app, "A@x.com", "pw123").await;
    assert_status(&response, StatusCode::OK);
    let body = response.json();
    let token = body["accessToken"].as_str().unwrap();
    assert_eq!(
        body["user"],
        json!({
            "email": "a@x.com",
            "subscription": "starter",
            "avatarURL": identicon_url("a@x.com"),
        })
    );

    let user = stored_user(&app, "a@x.com").await;
    assert_eq!(user.access_token.as_deref(), Some(token));
    assert_eq!(app.state.sessions.user_id_from_token(token), Some(user.id));
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;

    let response = app.get("/auth/current", Some(&token)).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "email": "a@x.com", "subscription": "starter" })
    );
}

#[tokio::test]
async fn test_protected_routes_reject_missing_or_malformed_tokens() {
    let app = TestApp::new().await;
    signed_in_user(&app, "a@x.com").await;

    let response = app.get("/auth/current", None).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");

    let response = app.get("/auth/current", Some("garbage")).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");

    let request = Request::builder()
        .method(Method::GET)
        .uri("/auth/current")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.request(request).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new().await;
    let (user, _) = signed_in_user(&app, "a@x.com").await;

    let forged = SessionKeys::new("another-secret", 15)
        .create_token(user.id)
        .unwrap();
    app.store.set_access_token(user.id, Some(&forged)).await.unwrap();

    let response = app.get("/auth/current", Some(&forged)).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let (user, _) = signed_in_user(&app, "a@x.com").await;

    let expired = SessionKeys::new(TEST_SECRET, -1)
        .create_token(user.id)
        .unwrap();
    app.store.set_access_token(user.id, Some(&expired)).await.unwrap();

    let response = app.get("/auth/current", Some(&expired)).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");
}

#[tokio::test]
async fn test_signout_revokes_token() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;

    let response = app.post("/auth/signout", Some(&token), json!({})).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json(), json!({ "message": "Signout success" }));
    assert!(stored_user(&app, "a@x.com").await.access_token.is_none());

    let response = app.get("/auth/current", Some(&token)).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");

    let response = app.post("/auth/signout", Some(&token), json!({})).await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");
}

#[tokio::test]
async fn test_new_signin_supersedes_old_token() {
    let app = TestApp::new().await;
    let (_, first) = signed_in_user(&app, "a@x.com").await;

    let second = signin(&app, "a@x.com", TEST_PASSWORD).await.json()["accessToken"]
        .as_str()
        .unwrap()
        .to_string();
    assert_ne!(first, second);

    let response = app.get("/auth/current", Some(&first)).await;
    assert_status(&response, StatusCode::UNAUTHORIZED);

    let response = app.get("/auth/current", Some(&second)).await;
    assert_status(&response, StatusCode::OK);
}

#[tokio::test]
async fn test_update_subscription_accepts_every_tier() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;

    for tier in ["pro", "business", "business", "starter"] {
        let response = app
            .patch("/auth/subscription", Some(&token), json!({ "subscription": tier }))
            .await;
        assert_status(&response, StatusCode::OK);
        assert_eq!(response.json()["user"]["subscription"], tier);
        assert_eq!(response.json()["user"]["email"], "a@x.com");
        assert_eq!(
            stored_user(&app, "a@x.com").await.subscription.as_str(),
            tier
        );
    }
}

#[tokio::test]
async fn test_update_subscription_rejects_unknown_tiers() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;

    for body in [
        json!({ "subscription": "gold" }),
        json!({ "subscription": "Pro" }),
        json!({ "subscription": "" }),
        json!({}),
    ] {
        let response = app.patch("/auth/subscription", Some(&token), body).await;
        assert_error(&response, StatusCode::BAD_REQUEST, "Invalid subscription value.");
    }

    assert_eq!(
        stored_user(&app, "a@x.com").await.subscription.as_str(),
        "starter"
    );
}

#[tokio::test]
async fn test_update_subscription_requires_auth() {
    let app = TestApp::new().await;

    let response = app
        .patch("/auth/subscription", None, json!({ "subscription": "pro" }))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;

    let response = app.get("/nowhere", None).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Not found");
}
