//! Environment-driven configuration for the portal client.
//! All knobs are plain env vars with defaults, read once at startup.

use std::path::PathBuf;

use tracing::info;

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the school backend (scheme + host + port).
    pub api_url: String,
    /// Folder holding the persisted session mirror.
    pub state_dir: PathBuf,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults:
    /// CLASSPORT_API_URL (default http://127.0.0.1:8000) and
    /// CLASSPORT_STATE_DIR (default $HOME/.classport).
    pub fn from_env() -> Self {
        let api_url = std::env::var("CLASSPORT_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let state_dir = std::env::var("CLASSPORT_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_state_dir());
        Config { api_url, state_dir }
    }

    /// Log the resolved configuration at startup, including where the
    /// defaults came from.
    pub fn log_startup(&self) {
        let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
        info!(
            target: "startup",
            "classport starting: RUST_LOG='{}', api_url={}, state_dir={:?}, state_dir_exists={}",
            rust_log, self.api_url, self.state_dir, self.state_dir.exists()
        );
    }
}

fn default_state_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".classport")
}
