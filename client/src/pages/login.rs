//! Email + password sign-in.

use leptos::prelude::*;

use crate::components::form_field::TextField;
use crate::state::auth::AuthState;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();
    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifetime::Liveness::for_owner();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if email_value.trim().is_empty() || password_value.is_empty() {
            error.set(Some("Enter your email and password.".to_owned()));
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::http::browser_client();
                let result = crate::net::api::login(&*client, &email_value, &password_value).await;
                if !alive.is_alive() {
                    return;
                }
                busy.set(false);
                match result {
                    Ok(response) => {
                        auth.update(|a| a.login(client.store(), response));
                        log::info!("signed in");
                        navigate("/", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        log::warn!("login failed: {e}");
                        let message = if e.status().is_some() {
                            INVALID_CREDENTIALS_MESSAGE.to_owned()
                        } else {
                            e.user_message(INVALID_CREDENTIALS_MESSAGE)
                        };
                        error.set(Some(message));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (auth, email_value, password_value);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">"Welcome Back"</h1>
                <form class="auth-form" on:submit=on_submit>
                    <TextField label="Email Address" value=email kind="email" placeholder="you@example.com" required=true />
                    <TextField
                        label="Password"
                        value=password
                        kind="password"
                        placeholder="Enter your password"
                        required=true
                    />
                    {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                    <button class="btn btn--primary auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "Don't have an account? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
