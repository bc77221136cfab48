//! Contacts API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::*;

fn ada() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phone": "(555) 010-1815",
        "favorite": false,
    })
}

async fn create(app: &TestApp, token: &str, body: Value) -> Value {
    let response = app.post("/contacts", Some(token), body).await;
    assert_status(&response, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_contacts_require_auth() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    for response in [
        app.get("/contacts", None).await,
        app.post("/contacts", None, ada()).await,
        app.get(&format!("/contacts/{id}"), None).await,
        app.put(&format!("/contacts/{id}"), None, json!({ "favorite": true })).await,
        app.patch(&format!("/contacts/{id}/favorite"), None, json!({ "favorite": true }))
            .await,
        app.delete(&format!("/contacts/{id}"), None).await,
    ] {
        assert_error(&response, StatusCode::UNAUTHORIZED, "Not authorized");
    }
}

#[tokio::test]
async fn test_create_and_fetch_contact() {
    let app = TestApp::new().await;
    let (user, token) = signed_in_user(&app, "a@x.com").await;

    let created = create(&app, &token, ada()).await;
    assert_eq!(created["name"], "Ada Lovelace");
    assert_eq!(created["email"], "ada@example.com");
    assert_eq!(created["phone"], "(555) 010-1815");
    assert_eq!(created["favorite"], false);
    assert_eq!(created["owner"], user.id.to_string());

    let id = created["id"].as_str().unwrap();
    let response = app.get(&format!("/contacts/{id}"), Some(&token)).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json(), created);

    let response = app.get("/contacts", Some(&token)).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json(), json!([created]));
}

#[tokio::test]
async fn test_contact_json_shape() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;

    let mut body = ada();
    body["email"] = json!("Ada.Lovelace@Example.com");
    let created = create(&app, &token, body).await;

    let mut keys: Vec<&str> = created.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["email", "favorite", "id", "name", "owner", "phone"]);
    assert_eq!(created["email"], "Ada.Lovelace@Example.com");
}

#[tokio::test]
async fn test_create_contact_validation() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;

    let mut missing_phone = ada();
    missing_phone.as_object_mut().unwrap().remove("phone");
    let response = app.post("/contacts", Some(&token), missing_phone).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "\"phone\" is required");

    let mut bad_email = ada();
    bad_email["email"] = json!("nope");
    let response = app.post("/contacts", Some(&token), bad_email).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "\"email\" must be a valid email");

    let mut extra = ada();
    extra["nickname"] = json!("Ada");
    let response = app.post("/contacts", Some(&token), extra).await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let mut wrong_type = ada();
    wrong_type["favorite"] = json!("yes");
    let response = app.post("/contacts", Some(&token), wrong_type).await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let response = app.get("/contacts", Some(&token)).await;
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_invalid_and_unknown_ids() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;

    let response = app.get("/contacts/123", Some(&token)).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "123 is not a valid id");

    let response = app.delete("/contacts/abc", Some(&token)).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "abc is not a valid id");

    let missing = Uuid::new_v4();
    let response = app.get(&format!("/contacts/{missing}"), Some(&token)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Contact not found");

    let response = app
        .put(&format!("/contacts/{missing}"), Some(&token), json!({ "favorite": true }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND, "Contact not found");
}

#[tokio::test]
async fn test_update_with_empty_body() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;
    let created = create(&app, &token, ada()).await;
    let id = created["id"].as_str().unwrap();

    let response = app.put(&format!("/contacts/{id}"), Some(&token), json!({})).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "missing fields");

    let response = app
        .put(&format!("/contacts/{id}"), Some(&token), json!({ "name": "Ada" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "\"favorite\" is required");
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;
    let created = create(&app, &token, ada()).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/contacts/{id}"),
            Some(&token),
            json!({ "phone": "555-0000", "favorite": true }),
        )
        .await;
    assert_status(&response, StatusCode::OK);

    let updated = response.json();
    assert_eq!(updated["phone"], "555-0000");
    assert_eq!(updated["favorite"], true);
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["owner"], created["owner"]);

    let fetched = app.get(&format!("/contacts/{id}"), Some(&token)).await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_favorite() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;
    let created = create(&app, &token, ada()).await;
    let uri = format!("/contacts/{}/favorite", created["id"].as_str().unwrap());

    let response = app.patch(&uri, Some(&token), json!({ "favorite": true })).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json()["favorite"], true);
    assert_eq!(response.json()["name"], "Ada Lovelace");

    let response = app.patch(&uri, Some(&token), json!({})).await;
    assert_error(&response, StatusCode::BAD_REQUEST, "\"favorite\" is required");

    let response = app
        .patch(&uri, Some(&token), json!({ "favorite": false, "name": "Ada" }))
        .await;
    assert_status(&response, StatusCode::BAD_REQUEST);

    let response = app
        .patch("/contacts/not-a-uuid/favorite", Some(&token), json!({ "favorite": true }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST, "not-a-uuid is not a valid id");
}

#[tokio::test]
async fn test_delete_contact() {
    let app = TestApp::new().await;
    let (_, token) = signed_in_user(&app, "a@x.com").await;
    let created = create(&app, &token, ada()).await;
    let uri = format!("/contacts/{}", created["id"].as_str().unwrap());

    let response = app.delete(&uri, Some(&token)).await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(response.json(), json!({ "message": "Contact deleted" }));

    let response = app.get(&uri, Some(&token)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Contact not found");

    let response = app.delete(&uri, Some(&token)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "Contact not found");
}

#[tokio::test]
async fn test_contacts_are_shared_by_default() {
    let app = TestApp::new().await;
    let (_, alice) = signed_in_user(&app, "alice@x.com").await;
    let (_, bob) = signed_in_user(&app, "bob@x.com").await;

    let created = create(&app, &alice, ada()).await;
    let uri = format!("/contacts/{}", created["id"].as_str().unwrap());

    assert_eq!(app.get("/contacts", Some(&bob)).await.json(), json!([created]));
    assert_status(&app.get(&uri, Some(&bob)).await, StatusCode::OK);
}

#[tokio::test]
async fn test_owner_scoped_contacts() {
    let app = TestApp::with_config(|config| config.contacts.owner_scoped = true).await;
    let (_, alice) = signed_in_user(&app, "alice@x.com").await;
    let (_, bob) = signed_in_user(&app, "bob@x.com").await;

    let created = create(&app, &alice, ada()).await;
    let uri = format!("/contacts/{}", created["id"].as_str().unwrap());

    assert_eq!(app.get("/contacts", Some(&bob)).await.json(), json!([]));
    assert_error(
        &app.get(&uri, Some(&bob)).await,
        StatusCode::NOT_FOUND,
        "Contact not found",
    );
    assert_error(
        &app.put(&uri, Some(&bob), json!({ "favorite": true })).await,
        StatusCode::NOT_FOUND,
        "Contact not found",
    );
    assert_error(
        &app.delete(&uri, Some(&bob)).await,
        StatusCode::NOT_FOUND,
        "Contact not found",
    );

    assert_eq!(app.get("/contacts", Some(&alice)).await.json(), json!([created]));
}
