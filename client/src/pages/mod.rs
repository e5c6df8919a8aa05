//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped loading and guards and delegates rendering
//! details to `components`. Pure decisions live in `state`.

pub(crate) mod appointment_sync;
pub mod dashboard;
pub mod doctor_appointments;
pub mod doctor_details;
pub mod doctor_home;
pub mod doctors;
pub mod guest_home;
pub mod home;
pub mod login;
pub mod my_appointments;
pub mod patient_home;
pub mod profile;
pub mod register;
