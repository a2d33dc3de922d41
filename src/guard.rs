//!
//! Route guard protocol
//! --------------------
//! Stateless access predicates that gate navigation to a guarded route. A
//! guard is re-evaluated on every render of the route it wraps, so a session
//! flip (logout, bootstrap resolution) takes effect on the next evaluation
//! with no state to invalidate.

use crate::routes::LOGIN_ROUTE;
use crate::session::{Role, Session};

/// The guard family: one capability, `can_access(session)`, with an
/// authenticated-only variant and one role-restricted variant per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Any authenticated session may pass.
    Authenticated,
    /// Authenticated and carrying exactly this role.
    Role(Role),
}

/// Where a denied navigation is sent, and where it came from. `from` is
/// carried only for login redirects so the login flow can return the user
/// to the page they were after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: String,
    pub from: Option<String>,
}

impl Redirect {
    fn to_login(attempted: &str) -> Self {
        Redirect { to: LOGIN_ROUTE.to_string(), from: Some(attempted.to_string()) }
    }

    fn to_home(role: Role) -> Self {
        Redirect { to: role.home_route().to_string(), from: None }
    }

    /// Render as a navigable location, with the origin as a `from` query
    /// parameter when one is carried: `/login?from=%2Fadmin-dashboard`.
    pub fn location(&self) -> String {
        match &self.from {
            Some(from) => format!("{}?from={}", self.to, urlencoding::encode(from)),
            None => self.to.clone(),
        }
    }
}

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Session not resolved yet: render neither the page nor a redirect.
    Pending,
    /// Render the wrapped page unchanged.
    Grant,
    Redirect(Redirect),
}

impl Guard {
    pub fn can_access(&self, session: &Session) -> bool {
        match self {
            Guard::Authenticated => session.token().is_some(),
            Guard::Role(required) => session.role() == Some(*required),
        }
    }

    /// Decide render-vs-redirect for a navigation to `attempted`.
    ///
    /// Unauthenticated access always redirects to the login route, for role
    /// guards too; every guard variant shares that one rule. An
    /// authenticated session with the wrong role is sent to its own
    /// dashboard instead.
    pub fn evaluate(&self, session: &Session, attempted: &str) -> Decision {
        if session.is_loading() {
            return Decision::Pending;
        }
        if self.can_access(session) {
            return Decision::Grant;
        }
        match (self, session.role()) {
            (Guard::Role(_), Some(actual)) => Decision::Redirect(Redirect::to_home(actual)),
            _ => Decision::Redirect(Redirect::to_login(attempted)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Guard::Authenticated => "any signed-in user".to_string(),
            Guard::Role(role) => format!("{} only", role),
        }
    }
}
