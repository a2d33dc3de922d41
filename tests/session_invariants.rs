//! Session data-model invariants: derived flags always agree with the role,
//! and anonymous sessions expose no identity at all.

use classport::session::{Identity, Role, Session, ALL_ROLES};

fn flags(session: &Session) -> [bool; 4] {
    [session.is_student(), session.is_teacher(), session.is_parent(), session.is_admin()]
}

fn authenticated(role: Role) -> Session {
    Session::Authenticated(Identity {
        token: "tok".into(),
        username: "someone".into(),
        role,
        level: None,
        department: None,
        full_name: None,
    })
}

#[test]
fn no_token_implies_no_identity_and_no_flags() {
    for session in [Session::Anonymous, Session::Loading] {
        assert_eq!(session.token(), None);
        assert_eq!(session.role(), None);
        assert_eq!(session.username(), None);
        assert_eq!(session.level(), None);
        assert_eq!(session.department(), None);
        assert_eq!(session.full_name(), None);
        assert_eq!(flags(&session), [false; 4], "flags must all be false for {:?}", session);
    }
}

#[test]
fn exactly_one_flag_true_and_it_matches_the_role() {
    for role in ALL_ROLES {
        let session = authenticated(role);
        let set = flags(&session);
        assert_eq!(set.iter().filter(|f| **f).count(), 1, "exactly one flag for {}", role);
        let matching = match role {
            Role::Student => session.is_student(),
            Role::Teacher => session.is_teacher(),
            Role::Parent => session.is_parent(),
            Role::Admin => session.is_admin(),
        };
        assert!(matching, "flag for {} must be the set one", role);
    }
}

#[test]
fn loading_is_only_the_initial_state() {
    let session = Session::default();
    assert!(session.is_loading());
    assert!(!Session::Anonymous.is_loading());
    assert!(!authenticated(Role::Admin).is_loading());
}
