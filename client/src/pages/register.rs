//! Account registration with per-field server errors.

use leptos::prelude::*;

use crate::components::form_field::TextField;
use crate::net::api::RegisterErrors;
use crate::net::types::Role;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Customer);
    let errors = RwSignal::new(RegisterErrors::default());
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
        let request = crate::net::types::RegisterRequest {
            name: name.get_untracked().trim().to_owned(),
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
            role: role.get_untracked(),
        };
        errors.set(RegisterErrors::default());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let navigate = navigate.clone();
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::http::browser_client();
                let result = crate::net::api::register(&*client, &request).await;
                if !alive.is_alive() {
                    return;
                }
                busy.set(false);
                match result {
                    Ok(response) if response.success => {
                        log::info!("registered {}", request.email);
                        navigate("/login", leptos_router::NavigateOptions::default());
                    }
                    Ok(response) => {
                        let message = response
                            .message
                            .unwrap_or_else(|| crate::net::api::REGISTER_FAILED_MESSAGE.to_owned());
                        errors.set(RegisterErrors { general: Some(message), ..RegisterErrors::default() });
                    }
                    Err(e) => {
                        log::warn!("registration failed: {e}");
                        errors.set(crate::net::api::register_errors(&e));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = request;
    };

    let field_error = move |field: &'static str| Signal::derive(move || errors.with(|e| e.field(field)));

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1 class="auth-card__title">"Create Account"</h1>
                {move || errors.with(|e| e.general.clone()).map(|message| view! { <p class="form-error form-error--banner">{message}</p> })}
                <form class="auth-form" on:submit=on_submit>
                    <TextField label="Full Name" value=name placeholder="Your name" required=true error=field_error("name") />
                    <TextField
                        label="Email Address"
                        value=email
                        kind="email"
                        placeholder="you@example.com"
                        required=true
                        error=field_error("email")
                    />
                    <TextField
                        label="Password"
                        value=password
                        kind="password"
                        placeholder="Choose a password"
                        required=true
                        error=field_error("password")
                    />
                    <label class="form-field">
                        <span class="form-field__label">"I am a"</span>
                        <select
                            prop:value=move || role.get().as_str()
                            on:change=move |ev| role.set(Role::from(event_target_value(&ev)))
                        >
                            <option value="customer">"Patient"</option>
                            <option value="doctor">"Doctor"</option>
                        </select>
                        {move || errors.with(|e| e.field("role")).map(|message| view! { <span class="form-field__error">{message}</span> })}
                    </label>
                    <button class="btn btn--primary auth-form__submit" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Registering..." } else { "Register" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "Already have an account? "
                    <a href="/login">"Login"</a>
                </p>
            </div>
        </div>
    }
}
