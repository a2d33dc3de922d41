//! Central session and identity management for the portal client.
//! Keep the public surface thin and split implementation across sub-modules.

mod bootstrap;
mod flows;
mod mirror;
mod model;
mod role;
mod store;

pub use bootstrap::bootstrap;
pub use flows::{login, logout, Credentials};
pub use mirror::{SessionMirror, MIRROR_VERSION};
pub use model::{Identity, Session, UserProfile};
pub use role::{Role, ALL_ROLES};
pub use store::SessionStore;
