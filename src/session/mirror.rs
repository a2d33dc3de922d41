use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::model::Identity;
use crate::error::AppError;
use crate::tprintln;

/// Mirror blob format version. Bumping it invalidates older files: they read
/// as "nothing persisted" instead of being migrated.
pub const MIRROR_VERSION: u32 = 1;

const MIRROR_FILE: &str = "session.json";

#[derive(Debug, Serialize, Deserialize)]
struct MirrorBlob {
    version: u32,
    saved_at: DateTime<Utc>,
    identity: Identity,
}

/// Durable snapshot of the session, kept only to survive restarts until the
/// bootstrapper re-validates it against the backend. One structured JSON
/// blob per state dir; stale, corrupt, absent and version-mismatched files
/// all read as `None`; the bootstrapper is the sole authority reconciling
/// the mirror with the backend.
#[derive(Debug, Clone)]
pub struct SessionMirror {
    path: PathBuf,
}

impl SessionMirror {
    /// Mirror stored at `<state_dir>/session.json`.
    pub fn new<P: AsRef<Path>>(state_dir: P) -> Self {
        SessionMirror { path: state_dir.as_ref().join(MIRROR_FILE) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted identity, if any. Never fails: every unreadable
    /// shape degrades to `None`.
    pub fn read(&self) -> Option<Identity> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(_) => return None,
        };
        let blob: MirrorBlob = match serde_json::from_slice(&bytes) {
            Ok(b) => b,
            Err(e) => {
                tprintln!("mirror.read unparseable blob at {:?}: {}", self.path, e);
                debug!(target: "session", "discarding unparseable session mirror: {}", e);
                return None;
            }
        };
        if blob.version != MIRROR_VERSION {
            debug!(target: "session", "discarding session mirror with version {} (want {})", blob.version, MIRROR_VERSION);
            return None;
        }
        Some(blob.identity)
    }

    /// Persist the identity, replacing any previous blob. Creates the state
    /// dir on first use.
    pub fn write(&self, identity: &Identity) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| AppError::storage("mirror_io".into(), format!("creating {:?}: {}", dir, e)))?;
        }
        let blob = MirrorBlob {
            version: MIRROR_VERSION,
            saved_at: Utc::now(),
            identity: identity.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&blob)
            .map_err(|e| AppError::storage("mirror_io".into(), e.to_string()))?;
        fs::write(&self.path, bytes)
            .map_err(|e| AppError::storage("mirror_io".into(), format!("writing {:?}: {}", self.path, e)))
    }

    /// Remove the persisted blob. Missing file is fine; other I/O failures
    /// are logged and swallowed so logout stays infallible.
    pub fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(target: "session", "failed to clear session mirror at {:?}: {}", self.path, e),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
