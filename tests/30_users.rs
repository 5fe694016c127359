mod common;

use anyhow::Result;
use library_api::auth::Claims;
use library_api::database::Table;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn list_users_returns_seeded_rows() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.seed_user().await?;

    let (status, body) = common::read(server.get("/users").send().await?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"][0]["name"], "Alta");
    Ok(())
}

#[tokio::test]
async fn list_users_empty_and_dropped() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (status, body) = common::read(server.get("/users").send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "failed");

    server.drop_table(Table::Users).await;
    let (status, body) = common::read(server.get("/users").send().await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "failed");
    Ok(())
}

#[tokio::test]
async fn create_user_never_echoes_password() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let payload = json!({ "name": "urnik", "email": "urnik@gmail.com", "password": "urnik123" });
    let (status, body) = common::read(server.post("/users").json(&payload).send().await?).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["name"], "urnik");
    assert_eq!(body["data"]["email"], "urnik@gmail.com");
    assert!(body["data"].get("password").is_none(), "password leaked: {}", body);
    Ok(())
}

#[tokio::test]
async fn create_user_on_dropped_table_fails() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    server.drop_table(Table::Users).await;

    let (status, body) = common::read(server.post("/users").send().await?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "failed");
    Ok(())
}

#[tokio::test]
async fn get_own_user_succeeds() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;

    for path in [format!("/jwt/users/{}", user.id), format!("/users/{}", user.id)] {
        let (status, body) = common::read(server.get(&path).bearer_auth(&token).send().await?).await?;
        assert_eq!(status, StatusCode::OK, "{}", path);
        assert_eq!(body["message"], "success");
        assert_eq!(body["data"]["name"], "Alta");
    }
    Ok(())
}

#[tokio::test]
async fn get_user_with_invalid_id() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;

    let (status, body) = common::read(server.get("/users/s").bearer_auth(&token).send().await?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "invalid user id" }));
    Ok(())
}

#[tokio::test]
async fn get_other_user_is_unauthorized() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;

    let (status, body) = common::read(server.get("/jwt/users/22").bearer_auth(&token).send().await?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "unauthorized" }));
    Ok(())
}

#[tokio::test]
async fn ownership_gate_runs_before_storage() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;
    server.drop_table(Table::Users).await;

    let (_, denied) = common::read(server.delete("/jwt/users/2").bearer_auth(&token).send().await?).await?;
    assert_eq!(denied["message"], "unauthorized");

    let (status, own) = common::read(
        server
            .get(&format!("/jwt/users/{}", user.id))
            .bearer_auth(&token)
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(own["message"], "failed");
    Ok(())
}

#[tokio::test]
async fn user_routes_reject_missing_and_forged_tokens() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let path = format!("/jwt/users/{}", user.id);

    let (status, body) = common::read(server.get(&path).send().await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "missing or malformed jwt");

    let mut forged = server.config.security.clone();
    forged.jwt_secret = "not-the-server-secret".to_string();
    let token = library_api::auth::generate_jwt(user.id, &forged)?;

    let (status, body) = common::read(server.get(&path).bearer_auth(&token).send().await?).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid or expired jwt");
    Ok(())
}

#[tokio::test]
async fn user_routes_reject_expired_tokens() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;

    // Well past the verifier's default leeway
    let now = chrono::Utc::now().timestamp();
    let mut claims = Claims::new(user.id, 1)?;
    claims.iat = now - 2 * 3600;
    claims.exp = now - 3600;
    let token = server.sign(&claims)?;

    let res = server
        .get(&format!("/jwt/users/{}", user.id))
        .bearer_auth(&token)
        .send()
        .await?;
    let (status, body) = common::read(res).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid or expired jwt");
    Ok(())
}

#[tokio::test]
async fn user_routes_reject_tokens_without_user_id() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;

    let mut claims = Claims::new(user.id, 1)?;
    claims.user_id = None;
    let token = server.sign(&claims)?;

    let res = server
        .put(&format!("/jwt/users/{}", user.id))
        .bearer_auth(&token)
        .json(&json!({ "name": "someone" }))
        .send()
        .await?;
    let (status, body) = common::read(res).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid or expired jwt");

    // Nothing was written
    let (_, body) = common::read(server.get("/users").send().await?).await?;
    assert_eq!(body["data"][0]["name"], "Alta");
    Ok(())
}

#[tokio::test]
async fn update_own_user() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;

    let payload = json!({ "name": "urnik rokhiyah", "email": "urnik456", "password": "669" });
    let res = server
        .put(&format!("/jwt/users/{}", user.id))
        .bearer_auth(&token)
        .json(&payload)
        .send()
        .await?;
    let (status, body) = common::read(res).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["name"], "urnik rokhiyah");
    assert_eq!(body["data"]["id"], user.id);

    // New password is live
    let login = json!({ "email": "urnik456", "password": "669" });
    let (status, _) = common::read(server.post("/login").json(&login).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn update_user_invalid_id_and_other_account() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;

    let (status, body) = common::read(server.put("/jwt/users/s").bearer_auth(&token).send().await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid user id");

    let (status, body) = common::read(server.put("/jwt/users/2").bearer_auth(&token).send().await?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "unauthorized");
    Ok(())
}

#[tokio::test]
async fn delete_own_user_twice() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;
    let path = format!("/jwt/users/{}", user.id);

    let (status, first) = common::read(server.delete(&path).bearer_auth(&token).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["message"], "success");

    let (status, second) = common::read(server.delete(&path).bearer_auth(&token).send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "failed");
    Ok(())
}

#[tokio::test]
async fn delete_other_user_is_unauthorized() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;

    let (status, body) = common::read(server.delete("/jwt/users/2").bearer_auth(&token).send().await?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "unauthorized");
    Ok(())
}

#[tokio::test]
async fn delete_user_invalid_id() -> Result<()> {
    let server = common::TestServer::spawn().await?;
    let user = server.seed_user().await?;
    let token = server.token_for(user.id)?;

    let (status, body) = common::read(server.delete("/jwt/users/s").bearer_auth(&token).send().await?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid user id");
    Ok(())
}
