//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the header, cards, and modals. They read app-wide
//! signals from context and report user actions to their page through
//! callbacks.

pub mod appointment_card;
pub mod availability_modal;
pub mod book_modal;
pub mod chat_widget;
pub mod doctor_card;
pub mod form_field;
pub mod header;
pub mod profile_edit_modal;
