//! Wire types and HTTP client for the registration backend.

use crate::core::Result;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

/// Registration endpoint path.
pub const REGISTER_PATH: &str = "/api/register";
/// Sign-out endpoint path.
pub const SIGN_OUT_PATH: &str = "/api/logout";

/// Payload of a registration attempt.
///
/// Built fresh on every submit from the current field contents; it has no
/// lifecycle beyond the single request that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// 12 characters, `[A-Z0-9]`
    pub register_no: String,
    pub name: String,
    pub department: String,
    pub system_no: String,
    /// `HH:MM:SS`, taken from the clock field
    pub in_time: String,
    /// `YYYY-MM-DD`, taken from the clock field
    pub in_date: String,
}

/// Server verdict on a registration attempt.
///
/// Only `success` is load-bearing; every other field may be absent and the
/// controller treats a missing flag as failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payload of a sign-out request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignOutRequest {
    pub session_id: String,
}

/// Server verdict on a sign-out request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignOutResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Async seam to the registration backend.
#[async_trait]
pub trait RegisterApi: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse>;
    async fn sign_out(&self, request: &SignOutRequest) -> Result<SignOutResponse>;
}

/// [`RegisterApi`] over HTTP, JSON-encoded bodies.
pub struct HttpRegisterApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRegisterApi {
    /// Client against `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RegisterApi for HttpRegisterApi {
    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        debug!("POST {} register_no={}", REGISTER_PATH, request.register_no);

        let response = self.client.post(self.url(REGISTER_PATH)).json(request).send().await?;

        // A 4xx/5xx still carries an application-level body with the success
        // flag and error text, so the status code is not consulted here. Only
        // an unreadable body is a transport failure.
        Ok(response.json::<RegisterResponse>().await?)
    }

    async fn sign_out(&self, request: &SignOutRequest) -> Result<SignOutResponse> {
        debug!("POST {}", SIGN_OUT_PATH);

        let response = self.client.post(self.url(SIGN_OUT_PATH)).json(request).send().await?;

        Ok(response.json::<SignOutResponse>().await?)
    }
}
