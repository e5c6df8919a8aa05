//! Scripted transport shared by the API-client tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::error::ApiError;
use super::http::{ApiClient, HttpRequest, HttpResponse, Transport};
use crate::config::ApiConfig;
use crate::util::storage::{MemoryStore, SessionStore};

/// Replays canned responses and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
    pub seen: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn with(responses: &[(u16, &str)]) -> Rc<Self> {
        Rc::new(Self {
            responses: RefCell::new(
                responses.iter().map(|(status, body)| HttpResponse { status: *status, body: (*body).to_owned() }).collect(),
            ),
            seen: RefCell::default(),
        })
    }

    pub fn request(&self, index: usize) -> HttpRequest {
        self.seen.borrow()[index].clone()
    }

    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Transport for Rc<ScriptedTransport> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.borrow_mut().push(request);
        self.responses.borrow_mut().pop_front().ok_or_else(|| ApiError::Network("script exhausted".to_owned()))
    }
}

pub type TestClient = ApiClient<Rc<ScriptedTransport>, Rc<MemoryStore>>;

pub fn client(transport: &Rc<ScriptedTransport>, store: &Rc<MemoryStore>) -> TestClient {
    ApiClient::new(Rc::clone(transport), Rc::clone(store), ApiConfig::default())
}

pub fn logged_in_store() -> Rc<MemoryStore> {
    let store = Rc::new(MemoryStore::new());
    store.set("access", "a1");
    store.set("refresh", "r1");
    store.set("user", r#"{"id":1,"name":"Neha","email":"n@x.io","role":"customer"}"#);
    store
}
