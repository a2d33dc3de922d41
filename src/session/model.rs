use serde::{Deserialize, Serialize};

use super::role::{is_senior_level, Role};
use crate::error::AppError;

/// User payload as the backend sends it (login user-info and the bootstrap
/// "who am I" lookup share this shape). Fields arrive unnormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Verified identity attached to an authenticated session. Always built
/// through [`Identity::from_profile`], so the role-dependent fields are
/// normalized by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub token: String,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl Identity {
    /// Normalize a backend profile into an identity:
    /// - role parsed into the closed enum (unrecognized/missing role is a
    ///   payload error, not a silent default);
    /// - level lower-cased, students only;
    /// - department lower-cased, students on a senior level only;
    /// - empty strings read as absent.
    pub fn from_profile(token: String, profile: UserProfile) -> Result<Self, AppError> {
        let role_str = profile
            .role
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::payload("bad_payload", "user payload has no role"))?;
        let role: Role = role_str
            .parse()
            .map_err(|e: String| AppError::payload("bad_payload".into(), e))?;

        let level = match role {
            Role::Student => normalize_lower(profile.level),
            _ => None,
        };
        let department = match (&role, level.as_deref()) {
            (Role::Student, Some(lvl)) if is_senior_level(lvl) => normalize_lower(profile.department),
            _ => None,
        };
        let full_name = profile
            .full_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Identity {
            token,
            username: profile.username,
            role,
            level,
            department,
            full_name,
        })
    }
}

fn normalize_lower(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_ascii_lowercase()).filter(|s| !s.is_empty())
}

/// Current authentication state of the application. `Loading` exists only
/// between store construction and the bootstrap resolution; once resolved,
/// the session is either `Anonymous` or `Authenticated` for the rest of the
/// process (logout goes back to `Anonymous`, never to `Loading`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Loading,
    Anonymous,
    Authenticated(Identity),
}

impl Session {
    pub fn is_loading(&self) -> bool {
        matches!(self, Session::Loading)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Session::Authenticated(id) => Some(id),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.identity().map(|id| id.token.as_str())
    }

    pub fn username(&self) -> Option<&str> {
        self.identity().map(|id| id.username.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.identity().map(|id| id.role)
    }

    pub fn level(&self) -> Option<&str> {
        self.identity().and_then(|id| id.level.as_deref())
    }

    pub fn department(&self) -> Option<&str> {
        self.identity().and_then(|id| id.department.as_deref())
    }

    pub fn full_name(&self) -> Option<&str> {
        self.identity().and_then(|id| id.full_name.as_deref())
    }

    // Derived flags are projections of `role`, computed on read, so exactly
    // one of them is true for an authenticated session and none otherwise.
    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_student(&self) -> bool {
        self.role() == Some(Role::Student)
    }

    pub fn is_teacher(&self) -> bool {
        self.role() == Some(Role::Teacher)
    }

    pub fn is_parent(&self) -> bool {
        self.role() == Some(Role::Parent)
    }
}
