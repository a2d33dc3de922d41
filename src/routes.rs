//!
//! Guarded route registry
//! ----------------------
//! The portal's navigable surface: each route binds a path to the guard that
//! gates it and the backend endpoint whose JSON the page renders. Lookup is
//! by exact path; `/` and `/login` are unguarded well-known locations.

use once_cell::sync::Lazy;

use crate::guard::Guard;
use crate::session::Role;

pub const ROOT_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub path: &'static str,
    pub title: &'static str,
    pub guard: Guard,
    /// Backend endpoint the page fetches with the session's bearer token.
    pub endpoint: &'static str,
}

pub static ROUTES: Lazy<Vec<RouteSpec>> = Lazy::new(|| {
    vec![
        // Student-facing pages are gated on authentication only; the backend
        // scopes their contents by the caller's own identity.
        RouteSpec { path: "/student-dashboard", title: "Student dashboard", guard: Guard::Authenticated, endpoint: "/students/dashboard" },
        RouteSpec { path: "/timetable", title: "Today's timetable", guard: Guard::Authenticated, endpoint: "/timetable/today" },
        RouteSpec { path: "/attendance/me", title: "My attendance", guard: Guard::Authenticated, endpoint: "/attendance/me" },
        RouteSpec { path: "/assignments", title: "My assignments", guard: Guard::Authenticated, endpoint: "/assignments/my" },
        RouteSpec { path: "/achievements", title: "Achievements", guard: Guard::Authenticated, endpoint: "/achievements" },
        RouteSpec { path: "/student/progress", title: "My progress", guard: Guard::Authenticated, endpoint: "/progress/my-progress" },
        // Admin pages.
        RouteSpec { path: "/admin-dashboard", title: "Admin dashboard", guard: Guard::Role(Role::Admin), endpoint: "/admin-activity/dashboard" },
        RouteSpec { path: "/students", title: "Students", guard: Guard::Role(Role::Admin), endpoint: "/students/" },
        RouteSpec { path: "/admin/attendance", title: "Attendance records", guard: Guard::Role(Role::Admin), endpoint: "/attendance" },
        RouteSpec { path: "/admin/parent-children", title: "Parents and children", guard: Guard::Role(Role::Admin), endpoint: "/admin/parent-children" },
        // Teacher pages.
        RouteSpec { path: "/teacher-dashboard", title: "Teacher dashboard", guard: Guard::Role(Role::Teacher), endpoint: "/teacher/dashboard" },
        RouteSpec { path: "/teacher/subjects", title: "My subjects", guard: Guard::Role(Role::Teacher), endpoint: "/teacher/subjects" },
        RouteSpec { path: "/teacher/students/assigned", title: "Assigned students", guard: Guard::Role(Role::Teacher), endpoint: "/teacher/students/assigned" },
        RouteSpec { path: "/teacher/timetable", title: "Teaching timetable", guard: Guard::Role(Role::Teacher), endpoint: "/timetable/teacher" },
        // Parent pages.
        RouteSpec { path: "/parent-dashboard", title: "Parent dashboard", guard: Guard::Role(Role::Parent), endpoint: "/parent/dashboard" },
        RouteSpec { path: "/parent/children", title: "My children", guard: Guard::Role(Role::Parent), endpoint: "/parents/my-children" },
    ]
});

pub fn find(path: &str) -> Option<&'static RouteSpec> {
    ROUTES.iter().find(|r| r.path == path)
}
