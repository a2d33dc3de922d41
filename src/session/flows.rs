use tracing::{info, warn};

use super::mirror::SessionMirror;
use super::model::{Identity, Session};
use super::store::SessionStore;
use crate::api::ApiClient;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Explicit user-initiated login. Two backend calls behind one flow: exchange
/// credentials for a token, then fetch the profile that token identifies.
/// On success the store and mirror are both populated and the role's home
/// route is returned for navigation. On failure the session is left exactly
/// as it was and the error is returned for inline display on the login form.
pub async fn login(
    store: &SessionStore,
    mirror: &SessionMirror,
    api: &ApiClient,
    credentials: &Credentials,
) -> Result<&'static str, AppError> {
    let token = api.login(&credentials.username, &credentials.password).await?;
    let profile = api.current_user(&token).await?;
    let identity = Identity::from_profile(token, profile)?;

    // The in-memory session is the authority; a mirror write failure only
    // costs reload survival, so it downgrades to a warning.
    if let Err(e) = mirror.write(&identity) {
        warn!(target: "session", "session mirror write failed after login: {}", e);
    }

    let home = identity.role.home_route();
    info!(target: "session", "logged in as {} ({})", identity.username, identity.role);
    store.replace(Session::Authenticated(identity));
    Ok(home)
}

/// Explicit logout: wipe the mirror and reset the session, synchronously.
/// Idempotent: logging out twice observes the same result as once. The
/// caller then performs a full navigation to "/" so no stale state survives
/// anywhere outside the store.
pub fn logout(store: &SessionStore, mirror: &SessionMirror) {
    mirror.clear();
    store.clear();
    info!(target: "session", "logged out");
}
