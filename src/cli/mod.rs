//! Terminal-facing helpers: session display and page rendering.

pub mod outputformatter;

pub use outputformatter::print_page;

use crate::routes::ROUTES;
use crate::session::Session;

/// One-line summary of the current session for prompts and `status`.
pub fn session_summary(session: &Session) -> String {
    match session {
        Session::Loading => "session: resolving…".to_string(),
        Session::Anonymous => "session: not signed in".to_string(),
        Session::Authenticated(id) => format!("session: {} ({})", id.username, id.role),
    }
}

/// Full `whoami` printout.
pub fn print_session(session: &Session) {
    match session {
        Session::Loading => println!("session still resolving"),
        Session::Anonymous => println!("not signed in"),
        Session::Authenticated(id) => {
            println!("username:   {}", id.username);
            println!("role:       {}", id.role);
            if let Some(name) = &id.full_name {
                println!("full name:  {}", name);
            }
            if let Some(level) = &id.level {
                println!("level:      {}", level);
            }
            if let Some(dept) = &id.department {
                println!("department: {}", dept);
            }
        }
    }
}

/// List every registered route with its guard and backing endpoint.
pub fn print_routes() {
    for r in ROUTES.iter() {
        println!("{:<28} {:<20} -> GET {}", r.path, r.guard.describe(), r.endpoint);
    }
}
