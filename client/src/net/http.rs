//! The single HTTP access path for every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages never build requests themselves. They describe an [`ApiRequest`]
//! and hand it to [`ApiClient`], which attaches the bearer token, applies the
//! refresh-on-401 policy, and maps non-2xx responses into [`ApiError`].
//!
//! TOKEN REFRESH
//! =============
//! A 401 on an authenticated request triggers at most one refresh through
//! `token/refresh/` followed by exactly one retry. Refresh is single-flight:
//! callers serialize on `refresh_lock`, and a caller that finds the stored
//! access token already replaced reuses it instead of refreshing again. If
//! refresh is impossible the stored session is cleared and the
//! session-expired hook fires; navigation is left to whoever installed it.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{TokenRefreshRequest, TokenRefreshResponse};
use crate::config::{ACCESS_TOKEN_KEY, ApiConfig, REFRESH_TOKEN_KEY};
use crate::state::auth::Session;
use crate::util::storage::SessionStore;

pub const TOKEN_REFRESH_PATH: &str = "token/refresh/";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

/// A fully resolved request handed to a [`Transport`].
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub bearer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body; an empty body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let body = if self.body.trim().is_empty() { "null" } else { self.body.as_str() };
        Ok(serde_json::from_str(body)?)
    }
}

/// Executes one request. Implementations report connection-level failures
/// as [`ApiError::Network`]/[`ApiError::Timeout`] and return every HTTP
/// status, including errors, as an `Ok` response.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Endpoint-relative request description.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Anonymous requests carry no bearer and never trigger a refresh.
    pub anonymous: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, anonymous: false }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `body` cannot be serialized.
    pub fn post<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self { body: Some(serde_json::to_value(body)?), ..Self::new(Method::Post, path) })
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if `body` cannot be serialized.
    pub fn patch<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Ok(Self { body: Some(serde_json::to_value(body)?), ..Self::new(Method::Patch, path) })
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

pub struct ApiClient<T, S> {
    transport: T,
    store: S,
    config: ApiConfig,
    refresh_lock: futures::lock::Mutex<()>,
    on_session_expired: Option<Rc<dyn Fn()>>,
}

impl<T: Transport, S: SessionStore> ApiClient<T, S> {
    pub fn new(transport: T, store: S, config: ApiConfig) -> Self {
        Self { transport, store, config, refresh_lock: futures::lock::Mutex::new(()), on_session_expired: None }
    }

    #[must_use]
    pub fn with_session_expired_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_session_expired = Some(Rc::new(hook));
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Send a request, applying bearer auth and the refresh-and-retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx responses (including a 401
    /// on the single retry), [`ApiError::SessionExpired`] when refresh is
    /// impossible, and transport errors unchanged.
    pub async fn send(&self, request: ApiRequest) -> Result<HttpResponse, ApiError> {
        if request.anonymous {
            let response = self.transport.execute(self.resolve(&request, None)).await?;
            return check_status(response);
        }

        let token = self.store.get(ACCESS_TOKEN_KEY);
        let response = self.transport.execute(self.resolve(&request, token.clone())).await?;
        if response.status != 401 {
            return check_status(response);
        }

        log::info!("{} {} returned 401, refreshing access token", request.method.as_str(), request.path);
        let fresh = self.refresh_or_expire(token.as_deref()).await?;
        let retry = self.transport.execute(self.resolve(&request, Some(fresh))).await?;
        check_status(retry)
    }

    /// [`Self::send`] and decode the body as `R`.
    ///
    /// # Errors
    ///
    /// See [`Self::send`]; additionally [`ApiError::Decode`].
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.send(request).await?.json()
    }

    fn resolve(&self, request: &ApiRequest, bearer: Option<String>) -> HttpRequest {
        HttpRequest {
            method: request.method,
            url: self.config.url(&request.path),
            query: request.query.clone(),
            body: request.body.clone(),
            bearer: bearer.filter(|t| !t.is_empty()),
        }
    }

    /// Refresh after a 401, expiring the session when that is impossible.
    /// The session-expired hook fires once even when several requests fail
    /// together.
    async fn refresh_or_expire(&self, stale: Option<&str>) -> Result<String, ApiError> {
        match self.refresh_access_token(stale).await {
            Ok(fresh) => Ok(fresh),
            Err(ApiError::SessionExpired) => Err(ApiError::SessionExpired),
            Err(e) => {
                log::warn!("token refresh failed: {e}");
                self.expire_session();
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;

        match self.store.get(ACCESS_TOKEN_KEY) {
            // Another request refreshed while this one waited on the lock.
            Some(current) if Some(current.as_str()) != stale => return Ok(current),
            // Another request already expired the session.
            None if stale.is_some() => return Err(ApiError::SessionExpired),
            _ => {}
        }

        let refresh = self
            .store
            .get(REFRESH_TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingRefreshToken)?;
        let request = HttpRequest {
            method: Method::Post,
            url: self.config.url(TOKEN_REFRESH_PATH),
            query: Vec::new(),
            body: Some(serde_json::to_value(TokenRefreshRequest { refresh })?),
            bearer: None,
        };
        let tokens: TokenRefreshResponse = check_status(self.transport.execute(request).await?)?.json()?;

        self.store.set(ACCESS_TOKEN_KEY, &tokens.access);
        if let Some(rotated) = &tokens.refresh {
            self.store.set(REFRESH_TOKEN_KEY, rotated);
        }
        log::debug!("access token refreshed");
        Ok(tokens.access)
    }

    fn expire_session(&self) {
        Session::clear(&self.store);
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }
}

fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status { status: response.status, body: response.body })
    }
}

#[cfg(feature = "hydrate")]
pub use browser::{BrowserClient, BrowserTransport, browser_client, install_browser_client};

#[cfg(feature = "hydrate")]
mod browser {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use futures::future::{Either, select};

    use super::{ApiClient, ApiError, HttpRequest, HttpResponse, Method, Transport};
    use crate::config::ApiConfig;
    use crate::util::storage::LocalStore;

    pub type BrowserClient = ApiClient<BrowserTransport, LocalStore>;

    thread_local! {
        static BROWSER_CLIENT: RefCell<Option<Rc<BrowserClient>>> = const { RefCell::new(None) };
    }

    /// `fetch`-backed transport with a per-request timeout.
    pub struct BrowserTransport {
        timeout: Duration,
    }

    impl BrowserTransport {
        pub fn new(timeout: Duration) -> Self {
            Self { timeout }
        }
    }

    impl Transport for BrowserTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let send = Box::pin(send_with_gloo(request));
            let timer = Box::pin(gloo_timers::future::sleep(self.timeout));
            match select(send, timer).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(ApiError::Timeout),
            }
        }
    }

    async fn send_with_gloo(request: HttpRequest) -> Result<HttpResponse, ApiError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Patch => Request::patch(&request.url),
        };
        if !request.query.is_empty() {
            builder = builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = prepared.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }

    fn build(on_session_expired: Option<Box<dyn Fn()>>) -> BrowserClient {
        let config = ApiConfig::from_build_env();
        let client = ApiClient::new(BrowserTransport::new(config.timeout), LocalStore, config);
        match on_session_expired {
            Some(hook) => client.with_session_expired_hook(hook),
            None => client,
        }
    }

    /// Install the app-wide client with its session-expired hook. Called once
    /// by the root component on hydrate.
    pub fn install_browser_client(on_session_expired: impl Fn() + 'static) {
        let client = Rc::new(build(Some(Box::new(on_session_expired))));
        BROWSER_CLIENT.with(|slot| *slot.borrow_mut() = Some(client));
    }

    /// The app-wide client; falls back to one without an expiry hook if the
    /// root component has not installed one yet.
    pub fn browser_client() -> Rc<BrowserClient> {
        BROWSER_CLIENT.with(|slot| {
            let mut slot = slot.borrow_mut();
            Rc::clone(slot.get_or_insert_with(|| Rc::new(build(None))))
        })
    }
}
