use std::cell::Cell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::test_support::{ScriptedTransport, client, logged_in_store};
use crate::util::storage::MemoryStore;

#[test]
fn attaches_bearer_and_resolves_url() {
    let transport = ScriptedTransport::with(&[(200, "[]")]);
    let store = logged_in_store();
    let api = client(&transport, &store);

    let resp = block_on(api.send(ApiRequest::get("doctors/").query("page", 2))).unwrap();
    assert_eq!(resp.status, 200);

    let seen = transport.seen.borrow();
    assert_eq!(seen[0].url, "http://localhost:8000/api/doctors/");
    assert_eq!(seen[0].bearer.as_deref(), Some("a1"));
    assert_eq!(seen[0].query, vec![("page".to_owned(), "2".to_owned())]);
}

#[test]
fn refreshes_once_and_retries_on_401() {
    let transport =
        ScriptedTransport::with(&[(401, ""), (200, r#"{"access":"a2"}"#), (200, r#"{"ok":true}"#)]);
    let store = logged_in_store();
    let api = client(&transport, &store);

    let body: serde_json::Value = block_on(api.send_json(ApiRequest::get("appointments/"))).unwrap();
    assert_eq!(body, json!({"ok": true}));

    let seen = transport.seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[1].url, "http://localhost:8000/api/token/refresh/");
    assert_eq!(seen[1].body, Some(json!({"refresh": "r1"})));
    assert!(seen[1].bearer.is_none());
    assert_eq!(seen[2].bearer.as_deref(), Some("a2"));
    assert_eq!(store.get("access").as_deref(), Some("a2"));
    assert_eq!(store.get("refresh").as_deref(), Some("r1"));
}

#[test]
fn rotated_refresh_token_is_stored() {
    let transport =
        ScriptedTransport::with(&[(401, ""), (200, r#"{"access":"a2","refresh":"r2"}"#), (200, "{}")]);
    let store = logged_in_store();
    block_on(client(&transport, &store).send(ApiRequest::get("profile/me/"))).unwrap();
    assert_eq!(store.get("refresh").as_deref(), Some("r2"));
}

#[test]
fn second_401_after_retry_is_not_refreshed_again() {
    let transport = ScriptedTransport::with(&[(401, ""), (200, r#"{"access":"a2"}"#), (401, "")]);
    let store = logged_in_store();
    let err = block_on(client(&transport, &store).send(ApiRequest::get("appointments/"))).unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(transport.seen.borrow().len(), 3);
    assert_eq!(store.get("access").as_deref(), Some("a2"));
}

#[test]
fn failed_refresh_expires_session() {
    let transport = ScriptedTransport::with(&[(401, ""), (401, r#"{"detail":"token invalid"}"#)]);
    let store = logged_in_store();
    let fired = Rc::new(Cell::new(0));
    let hook_count = Rc::clone(&fired);
    let api = client(&transport, &store).with_session_expired_hook(move || hook_count.set(hook_count.get() + 1));

    let err = block_on(api.send(ApiRequest::get("appointments/"))).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(fired.get(), 1);
    assert!(store.is_empty());
}

#[test]
fn missing_refresh_token_expires_without_refresh_call() {
    let transport = ScriptedTransport::with(&[(401, "")]);
    let store = Rc::new(MemoryStore::new());
    store.set("access", "a1");
    let err = block_on(client(&transport, &store).send(ApiRequest::get("doctors/"))).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(transport.seen.borrow().len(), 1);
    assert!(store.get("access").is_none());
}

#[test]
fn token_replaced_while_waiting_is_reused() {
    // Simulates a parallel request that already refreshed: the stored token
    // no longer matches the one this request was sent with.
    let transport = ScriptedTransport::with(&[(200, "{}")]);
    let store = logged_in_store();
    let api = client(&transport, &store);
    store.set("access", "a-fresh");

    let fresh = block_on(api.refresh_access_token(Some("a1"))).unwrap();
    assert_eq!(fresh, "a-fresh");
    assert!(transport.seen.borrow().is_empty());
}

#[test]
fn session_expired_by_peer_fires_hook_once() {
    let transport = ScriptedTransport::with(&[(401, ""), (401, r#"{"detail":"token invalid"}"#)]);
    let store = logged_in_store();
    let fired = Rc::new(Cell::new(0));
    let hook_count = Rc::clone(&fired);
    let api = client(&transport, &store).with_session_expired_hook(move || hook_count.set(hook_count.get() + 1));

    block_on(api.send(ApiRequest::get("appointments/"))).unwrap_err();
    assert_eq!(fired.get(), 1);

    // A second request sent with the same token reaches refresh after the
    // first one has already cleared the store.
    let err = block_on(api.refresh_or_expire(Some("a1"))).unwrap_err();
    assert!(matches!(err, ApiError::SessionExpired));
    assert_eq!(fired.get(), 1);
    assert_eq!(transport.seen.borrow().len(), 2);
}

#[test]
fn anonymous_401_is_returned_without_refresh() {
    let transport = ScriptedTransport::with(&[(401, r#"{"detail":"Invalid credentials"}"#)]);
    let store = logged_in_store();
    let request = ApiRequest::post("login/", &json!({"email": "a@b.c", "password": "x"})).unwrap().anonymous();

    let err = block_on(client(&transport, &store).send(request)).unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(transport.seen.borrow()[0].bearer.is_none());
    assert_eq!(store.get("access").as_deref(), Some("a1"));
}

#[test]
fn non_auth_errors_pass_through() {
    let transport = ScriptedTransport::with(&[(500, "boom")]);
    let store = logged_in_store();
    let err = block_on(client(&transport, &store).send(ApiRequest::get("doctors/"))).unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(transport.seen.borrow().len(), 1);
}

#[test]
fn empty_body_decodes_as_null() {
    let resp = HttpResponse { status: 204, body: String::new() };
    let value: Option<serde_json::Value> = resp.json().unwrap();
    assert!(value.is_none());
}
