//! Root component, HTML shell, and route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` owns the app-wide signals (auth, chat, the doctor a list card
//! preloaded) and provides them as context. On hydrate it restores the
//! session from local storage and installs the shared API client, whose
//! session-expired hook flips `AuthState::session_expired`; the
//! [`SessionExpiryRedirect`] watcher turns that flag into a `/login`
//! navigation.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::{NavigateOptions, ParamSegment, StaticSegment};

use crate::components::chat_widget::ChatWidget;
use crate::components::header::Header;
use crate::net::types::Doctor;
use crate::pages::dashboard::DashboardPage;
use crate::pages::doctor_appointments::DoctorAppointmentsPage;
use crate::pages::doctor_details::DoctorDetailsPage;
use crate::pages::doctors::DoctorsPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::my_appointments::MyAppointmentsPage;
use crate::pages::profile::ProfilePage;
use crate::pages::register::RegisterPage;
use crate::state::auth::AuthState;
use crate::state::chat::ChatState;

/// Doctor handed from a list card to the details page so it can render
/// before its own fetch returns.
#[derive(Clone, Copy)]
pub struct SelectedDoctor(pub RwSignal<Option<Doctor>>);

/// HTML document wrapper used by SSR.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let chat = RwSignal::new(ChatState::default());
    let selected = SelectedDoctor(RwSignal::new(None));
    provide_context(auth);
    provide_context(chat);
    provide_context(selected);

    #[cfg(feature = "hydrate")]
    {
        crate::net::http::install_browser_client(move || auth.update(AuthState::expire));
        // Restore after hydration so the first client render matches SSR.
        Effect::new(move || {
            auth.set(AuthState::restore(&crate::util::storage::LocalStore));
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/docbook.css" />
        <Title text="DocBook" />
        <Router>
            <SessionExpiryRedirect />
            <Header />
            <main class="app-main">
                <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                    <Route path=StaticSegment("") view=HomePage />
                    <Route path=StaticSegment("login") view=LoginPage />
                    <Route path=StaticSegment("register") view=RegisterPage />
                    <Route path=StaticSegment("doctors") view=DoctorsPage />
                    <Route path=StaticSegment("book-appointment") view=DoctorsPage />
                    <Route path=(StaticSegment("doctors"), ParamSegment("id")) view=DoctorDetailsPage />
                    <Route path=StaticSegment("appointments") view=MyAppointmentsPage />
                    <Route path=StaticSegment("my-appointment") view=DoctorAppointmentsPage />
                    <Route path=StaticSegment("dashboard") view=DashboardPage />
                    <Route path=StaticSegment("profile") view=ProfilePage />
                </Routes>
            </main>
            <ChatWidget />
        </Router>
    }
}

/// Routes to `/login` when the API client reports an expired session.
#[component]
fn SessionExpiryRedirect() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    Effect::new(move || {
        if auth.with(|a| a.session_expired) {
            log::info!("session expired; redirecting to login");
            auth.update(|a| a.session_expired = false);
            navigate("/login", NavigateOptions::default());
        }
    });
}
