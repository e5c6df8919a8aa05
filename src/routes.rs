//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host renders the DocBook client with Leptos SSR and serves its
//! compiled WASM/CSS bundle from `/pkg`. All booking data lives behind the
//! external REST API the client calls directly, so the only native route
//! here is the health probe.

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use docbook_client::app::{App, shell};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

#[derive(Debug, thiserror::Error)]
#[error("leptos configuration: {0}")]
pub struct LeptosConfigError(String);

/// Probe routes that need no Leptos state.
pub fn health_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Full app: health probe, Leptos SSR pages, and the static bundle.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn app() -> Result<Router, LeptosConfigError> {
    let conf = get_configuration(None).map_err(|e| LeptosConfigError(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || shell(opts.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(health_routes()
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .merge(leptos_router)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
