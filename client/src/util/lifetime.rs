//! Page-lifetime guard for async continuations.
//!
//! A page creates one [`Liveness`] and clones it into each spawned task.
//! When the page's reactive owner is cleaned up (navigation away) the token
//! flips to dead, and continuations check it before writing any signal.

#[cfg(test)]
#[path = "lifetime_test.rs"]
mod lifetime_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }
}

impl Liveness {
    /// A token tied to the current reactive owner: it dies on cleanup.
    pub fn for_owner() -> Self {
        let token = Self::default();
        let on_drop = token.clone();
        leptos::prelude::on_cleanup(move || on_drop.kill());
        token
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn kill(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Run `write` only while the owning page is still mounted.
    pub fn run<F: FnOnce()>(&self, write: F) -> bool {
        let alive = self.is_alive();
        if alive {
            write();
        }
        alive
    }
}
