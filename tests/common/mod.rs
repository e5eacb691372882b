#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use sparplan_api::config::AppConfig;
use sparplan_api::server::{self, AppState};

pub const PASSWORD: &str = "password123";

/// Real router over in-memory stores, served from the test's own runtime
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        let state = AppState::in_memory(AppConfig::test())?;
        tokio::spawn(async move {
            if let Err(e) = server::serve(listener, state).await {
                eprintln!("test server stopped: {e:?}");
            }
        });

        let server = Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/api/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register `email` with [`PASSWORD`]; returns `(token, user_id)`
    pub async fn register(&self, email: &str) -> Result<(String, String)> {
        let res = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({"email": email, "password": PASSWORD}))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register {} failed: {}", email, res.status());

        let body: Value = res.json().await?;
        let token = body["token"].as_str().context("token missing")?.to_string();
        let user_id = body["userId"].as_str().context("userId missing")?.to_string();
        Ok((token, user_id))
    }

    /// Create a plan as the token's owner; returns the response body
    pub async fn create_plan(&self, token: &str, body: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/api/sparplaene"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create plan failed: {}", res.status());
        Ok(res.json().await?)
    }
}
