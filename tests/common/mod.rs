#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use library_api::auth::{generate_jwt, Claims};
use library_api::config::AppConfig;
use library_api::database::models::{Book, BookInput, User, UserInput};
use library_api::database::{BookStore, MemoryStore, Table, UserStore};
use library_api::{app, AppState};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::Value;

/// One server per test so every test starts from empty tables
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.api.enable_request_logging = false;

        let store = Arc::new(MemoryStore::new());
        let router = app(AppState::in_memory(config.clone(), store.clone()));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url,
            store,
            config,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    pub fn token_for(&self, user_id: i64) -> Result<String> {
        Ok(generate_jwt(user_id, &self.config.security)?)
    }

    /// Sign arbitrary claims with the server secret
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        let key = jsonwebtoken::EncodingKey::from_secret(self.config.security.jwt_secret.as_bytes());
        Ok(jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &key)?)
    }

    /// Inserts the fixture user straight into storage
    pub async fn seed_user(&self) -> Result<User> {
        let input = UserInput {
            name: "Alta".to_string(),
            email: "alta@gmail.com".to_string(),
            password: "123".to_string(),
        };
        Ok(UserStore::create(&*self.store, input).await?)
    }

    /// Inserts the fixture book straight into storage
    pub async fn seed_book(&self) -> Result<Book> {
        let input = BookInput {
            title: "chemistry".to_string(),
            author: "urnik".to_string(),
            published_at: "2021".to_string(),
        };
        Ok(BookStore::create(&*self.store, input).await?)
    }

    pub async fn drop_table(&self, table: Table) {
        self.store.drop_table(table).await;
    }
}

/// Status plus parsed envelope
pub async fn read(res: Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await.context("response body is not JSON")?;
    Ok((status, body))
}
