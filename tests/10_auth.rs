mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn register_returns_token_and_projection() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({"email": "  User1@Example.com ", "password": "password123"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await?;
    assert_eq!(body["email"], "user1@example.com");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["userId"].is_string());
    assert!(body.get("passwordHash").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_conflicts() -> Result<()> {
    let server = common::TestServer::start().await?;
    server.register("user1@example.com").await?;

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({"email": "USER1@example.com", "password": "another-one"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body: Value = res.json().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "CONFLICT");
    Ok(())
}

#[tokio::test]
async fn register_validates_input() -> Result<()> {
    let server = common::TestServer::start().await?;

    for body in [
        json!({"email": "user1@example.com", "password": "12345"}),
        json!({"email": "", "password": "password123"}),
        json!({"password": "password123"}),
        json!({"email": "no-at-sign", "password": "password123"}),
    ] {
        let res = server.client.post(server.url("/api/auth/register")).json(&body).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", body);
    }
    Ok(())
}

#[tokio::test]
async fn login_succeeds_with_registered_credentials() -> Result<()> {
    let server = common::TestServer::start().await?;
    let (_, user_id) = server.register("user1@example.com").await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({"email": "user1@example.com", "password": common::PASSWORD}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(body["userId"], user_id.as_str());
    Ok(())
}

#[tokio::test]
async fn login_failures_share_one_message() -> Result<()> {
    let server = common::TestServer::start().await?;
    server.register("user1@example.com").await?;

    let mut messages = Vec::new();
    for body in [
        json!({"email": "user1@example.com", "password": "wrong-password"}),
        json!({"email": "nobody@example.com", "password": common::PASSWORD}),
    ] {
        let res = server.client.post(server.url("/api/auth/login")).json(&body).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = res.json().await?;
        messages.push(body["message"].clone());
    }

    assert_eq!(messages[0], "Invalid email or password");
    assert_eq!(messages[0], messages[1]);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_invalid_json() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"email\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn reset_password_flow() -> Result<()> {
    let server = common::TestServer::start().await?;
    server.register("user1@example.com").await?;

    let res = server
        .client
        .post(server.url("/api/auth/reset-password"))
        .json(&json!({"email": "user1@example.com", "newPassword": "brand-new-secret"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert!(body["message"].is_string());
    assert!(body.get("token").is_none());

    let old = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({"email": "user1@example.com", "password": common::PASSWORD}))
        .send()
        .await?;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({"email": "user1@example.com", "password": "brand-new-secret"}))
        .send()
        .await?;
    assert_eq!(new.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn reset_password_unknown_email_is_404() -> Result<()> {
    let server = common::TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/api/auth/reset-password"))
        .json(&json!({"email": "ghost@example.com", "newPassword": "brand-new-secret"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
