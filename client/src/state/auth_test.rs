use super::*;
use crate::util::storage::MemoryStore;

fn doctor_user() -> User {
    User { id: 3, name: "Meera".to_owned(), email: "m@x.io".to_owned(), role: Role::Doctor }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_is_loading_without_user() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
    assert!(!state.authenticated);
}

// =============================================================
// Session persistence
// =============================================================

#[test]
fn restore_without_tokens_is_logged_out() {
    let store = MemoryStore::new();
    let state = AuthState::restore(&store);
    assert!(!state.loading);
    assert!(!state.authenticated);
}

#[test]
fn login_persists_and_restores() {
    let store = MemoryStore::new();
    let mut state = AuthState::default();
    state.login(
        &store,
        LoginResponse { access: "a1".to_owned(), refresh: "r1".to_owned(), user: Some(doctor_user()) },
    );
    assert!(state.authenticated);
    assert_eq!(state.role(), Some(Role::Doctor));
    assert_eq!(store.get("access").as_deref(), Some("a1"));
    assert_eq!(store.get("refresh").as_deref(), Some("r1"));

    let restored = AuthState::restore(&store);
    assert!(restored.authenticated);
    assert_eq!(restored.user, Some(doctor_user()));
}

#[test]
fn corrupt_user_is_dropped_but_tokens_kept() {
    let store = MemoryStore::new();
    store.set("access", "a1");
    store.set("user", "{not json");
    let session = Session::load(&store).unwrap();
    assert_eq!(session.access, "a1");
    assert!(session.user.is_none());
    assert!(store.get("user").is_none());
}

#[test]
fn logout_clears_every_key() {
    let store = MemoryStore::new();
    let mut state = AuthState::default();
    state.login(&store, LoginResponse { access: "a".to_owned(), refresh: "r".to_owned(), user: Some(doctor_user()) });
    state.logout(&store);
    assert!(store.is_empty());
    assert!(!state.authenticated);
    assert!(state.user.is_none());
}

#[test]
fn expire_flags_session_and_drops_user() {
    let mut state = AuthState { user: Some(doctor_user()), authenticated: true, loading: false, session_expired: false };
    state.expire();
    assert!(state.session_expired);
    assert!(!state.authenticated);
    assert!(state.user.is_none());
}

#[test]
fn save_without_refresh_removes_stale_refresh() {
    let store = MemoryStore::new();
    store.set("refresh", "old");
    Session { access: "a".to_owned(), refresh: None, user: None }.save(&store);
    assert!(store.get("refresh").is_none());
}
