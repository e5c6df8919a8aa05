//! Role-based navigation and home-page selection.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::net::types::Role;
use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const fn link(label: &'static str, href: &'static str) -> NavLink {
    NavLink { label, href }
}

static GUEST_LINKS: [NavLink; 3] = [link("Home", "/"), link("Login", "/login"), link("Register", "/register")];

static DOCTOR_LINKS: [NavLink; 3] =
    [link("Home", "/"), link("My Profile", "/profile"), link("My Appointments", "/my-appointment")];

static HOME_ONLY: [NavLink; 1] = [link("Home", "/")];

static CUSTOMER_LINKS: [NavLink; 5] = [
    link("Home", "/"),
    link("Doctors", "/doctors"),
    link("My Appointments", "/appointments"),
    link("Dashboard", "/dashboard"),
    link("Consult", "/book-appointment"),
];

/// Header links for the viewer. Signed-in users with a role the client does
/// not know still get Home only.
pub fn nav_links(auth: &AuthState) -> &'static [NavLink] {
    if !auth.authenticated {
        return &GUEST_LINKS;
    }
    match auth.role() {
        Some(Role::Doctor) => &DOCTOR_LINKS,
        Some(Role::Customer) => &CUSTOMER_LINKS,
        Some(Role::Admin | Role::Unknown) | None => &HOME_ONLY,
    }
}

/// Which landing page `/` renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeView {
    Loading,
    Guest,
    Doctor,
    Patient,
}

pub fn home_view(auth: &AuthState) -> HomeView {
    if auth.loading {
        return HomeView::Loading;
    }
    match auth.user.as_ref().map(|u| u.role) {
        Some(Role::Doctor) => HomeView::Doctor,
        Some(Role::Customer) => HomeView::Patient,
        Some(Role::Admin | Role::Unknown) | None => HomeView::Guest,
    }
}
