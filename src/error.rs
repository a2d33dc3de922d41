//! Unified application error model for the portal client.
//! This module provides a common error enum used across the session core
//! (bootstrap, login/logout flows) and the backend API client, along with
//! helpers to classify HTTP responses from the backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// Credential rejected by the backend (login failure, expired token).
    #[error("{code}: {message}")]
    Auth { code: String, message: String },
    /// Transport-level failure reaching the backend.
    #[error("{code}: {message}")]
    Network { code: String, message: String },
    /// Response arrived but did not have the expected shape (missing fields,
    /// unrecognized role, non-JSON body).
    #[error("{code}: {message}")]
    Payload { code: String, message: String },
    /// Persisted session mirror could not be read or written.
    #[error("{code}: {message}")]
    Storage { code: String, message: String },
    /// Backend rejected the request for a non-auth reason (4xx/5xx).
    #[error("{code}: {message}")]
    Request { code: String, message: String },
    #[error("{code}: {message}")]
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Auth { code, .. }
            | AppError::Network { code, .. }
            | AppError::Payload { code, .. }
            | AppError::Storage { code, .. }
            | AppError::Request { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Auth { message, .. }
            | AppError::Network { message, .. }
            | AppError::Payload { message, .. }
            | AppError::Storage { message, .. }
            | AppError::Request { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn network<S: Into<String>>(code: S, msg: S) -> Self { AppError::Network { code: code.into(), message: msg.into() } }
    pub fn payload<S: Into<String>>(code: S, msg: S) -> Self { AppError::Payload { code: code.into(), message: msg.into() } }
    pub fn storage<S: Into<String>>(code: S, msg: S) -> Self { AppError::Storage { code: code.into(), message: msg.into() } }
    pub fn request<S: Into<String>>(code: S, msg: S) -> Self { AppError::Request { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Classify a non-success backend status into an error, keeping the
    /// backend-provided detail message when one was parsed out of the body.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        let message = detail.unwrap_or_else(|| format!("backend returned HTTP {}", status));
        match status {
            401 | 403 => AppError::Auth { code: "unauthorized".into(), message },
            400..=499 => AppError::Request { code: "rejected".into(), message },
            _ => AppError::Request { code: "server_error".into(), message },
        }
    }

    /// True when the error means the presented credential is not (or no
    /// longer) valid, as opposed to a transient or shape problem.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth { .. })
    }

    /// The line shown inline on the login form. Auth failures get the fixed
    /// wording the portal always used; everything else shows its detail.
    pub fn login_form_message(&self) -> String {
        match self {
            AppError::Auth { .. } => "Login failed. Please check your username and password.".to_string(),
            other => other.message().to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Payload { code: "bad_payload".into(), message: err.to_string() }
        } else {
            AppError::Network { code: "network".into(), message: err.to_string() }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
