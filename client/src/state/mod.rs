//! Client-side state.
//!
//! DESIGN
//! ======
//! Each module holds plain structs that pages wrap in `RwSignal`s. Keeping
//! the transitions here, free of Leptos, lets them be unit tested directly.

pub mod appointments;
pub mod auth;
pub mod booking;
pub mod chat;
pub mod doctors;
pub mod profile;
