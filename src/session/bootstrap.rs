use tracing::{debug, warn};

use super::mirror::SessionMirror;
use super::model::{Identity, Session};
use super::store::SessionStore;
use crate::api::ApiClient;

/// Reconcile a persisted-but-unverified credential with the backend, exactly
/// once at startup.
///
/// Resolves the store out of `Loading` no matter what happens: a missing
/// mirror means `Anonymous` without touching the network; a present token is
/// validated against the current-user endpoint, and any failure (network,
/// 401, malformed payload) silently degrades to `Anonymous` with the mirror
/// cleared; an expired token is indistinguishable from "never logged in".
/// Not retried; no timeout beyond the HTTP client's own.
pub async fn bootstrap(store: &SessionStore, mirror: &SessionMirror, api: &ApiClient) {
    if !store.snapshot().is_loading() {
        warn!(target: "session", "bootstrap called after the session already resolved; ignoring");
        return;
    }

    let Some(saved) = mirror.read() else {
        debug!(target: "session", "no persisted session; starting anonymous");
        store.replace(Session::Anonymous);
        return;
    };

    match api.current_user(&saved.token).await {
        Ok(profile) => match Identity::from_profile(saved.token, profile) {
            Ok(identity) => {
                // Re-persist: the backend's answer wins over whatever the
                // mirror carried for the non-token fields.
                if let Err(e) = mirror.write(&identity) {
                    warn!(target: "session", "failed to refresh session mirror: {}", e);
                }
                store.replace(Session::Authenticated(identity));
            }
            Err(e) => {
                debug!(target: "session", "current-user payload rejected: {}", e);
                mirror.clear();
                store.replace(Session::Anonymous);
            }
        },
        Err(e) => {
            debug!(target: "session", "persisted token validation failed: {}", e);
            mirror.clear();
            store.replace(Session::Anonymous);
        }
    }
}
