//!
//! Backend API client
//! ------------------
//! Thin reqwest wrapper over the school backend. Exactly three surfaces
//! matter to the session core: the token exchange, the current-user lookup
//! the bootstrapper validates against, and the generic authenticated GET
//! every guarded page uses to fetch the JSON it renders.

use reqwest::Url;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::session::UserProfile;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client bound to one backend base URL. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        use anyhow::Context;
        let base = Url::parse(base).context("invalid base URL")?;
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(ApiClient { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// POST /api/token with form-encoded credentials; returns the bearer
    /// token on success. A non-success status maps to an auth/request error
    /// carrying the backend's `detail` message when present.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let url = self
            .base
            .join("/api/token")
            .map_err(|e| AppError::internal("bad_url".into(), e.to_string()))?;
        let resp = self
            .client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        let body: TokenResponse = resp.json().await?;
        Ok(body.access_token)
    }

    /// GET /api/auth/user-info with the token as bearer credential.
    pub async fn current_user(&self, token: &str) -> AppResult<UserProfile> {
        let url = self
            .base
            .join("/api/auth/user-info")
            .map_err(|e| AppError::internal("bad_url".into(), e.to_string()))?;
        let resp = self.client.get(url).bearer_auth(token).send().await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    /// Authenticated GET for an arbitrary backend endpoint, returning the
    /// raw JSON a page would render.
    pub async fn get_with_auth(&self, token: &str, endpoint: &str) -> AppResult<serde_json::Value> {
        let url = self
            .base
            .join(endpoint)
            .map_err(|e| AppError::internal("bad_url".into(), e.to_string()))?;
        let resp = self
            .client
            .get(url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json().await?)
    }
}

/// Map a non-success response to an AppError, pulling the backend's
/// `detail` field out of the body when the body is JSON.
async fn error_from_response(resp: reqwest::Response) -> AppError {
    let status = resp.status().as_u16();
    let detail = resp
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(|s| s.to_string()));
    AppError::from_status(status, detail)
}
