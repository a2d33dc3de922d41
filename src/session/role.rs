use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of portal roles. The backend transports roles as strings; they
/// are parsed into this enum at the session boundary so an unrecognized role
/// can never fall through a guard unnoticed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Admin,
}

pub const ALL_ROLES: [Role; 4] = [Role::Student, Role::Teacher, Role::Parent, Role::Admin];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Admin => "admin",
        }
    }

    /// The dashboard route this role lands on after login and is sent back
    /// to when it trips a guard for another role.
    pub fn home_route(&self) -> &'static str {
        match self {
            Role::Student => "/student-dashboard",
            Role::Teacher => "/teacher-dashboard",
            Role::Parent => "/parent-dashboard",
            Role::Admin => "/admin-dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unrecognized role '{}'", other)),
        }
    }
}

/// Senior secondary levels ("ss1".."ss3") carry a department (science/art/
/// commercial); junior levels ("jss1".."jss3") do not.
pub fn is_senior_level(level: &str) -> bool {
    level.starts_with("ss")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_and_whitespace_insensitive() {
        assert_eq!(" Student ".parse::<Role>().unwrap(), Role::Student);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
        assert!("principal".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn home_routes_follow_role_names() {
        for role in ALL_ROLES {
            assert_eq!(role.home_route(), format!("/{}-dashboard", role));
        }
    }

    #[test]
    fn senior_level_detection() {
        assert!(is_senior_level("ss1"));
        assert!(is_senior_level("ss3"));
        assert!(!is_senior_level("jss1"));
        assert!(!is_senior_level("jss3"));
    }
}
