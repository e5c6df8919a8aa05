//! Networking modules for the booking REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the one request path (bearer auth, refresh, timeouts), `api`
//! names the endpoints on top of it, `envelope` unwraps list/object
//! payloads, and `types` defines the wire schema.

pub mod api;
pub mod envelope;
pub mod error;
pub mod http;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
