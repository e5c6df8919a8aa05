//! Doctor directory with name search and specialty filter.

use leptos::prelude::*;

use crate::components::doctor_card::DoctorCard;
use crate::state::auth::AuthState;
use crate::state::doctors::DoctorsState;

#[component]
pub fn DoctorsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let doctors = RwSignal::new(DoctorsState::default());
    crate::util::auth::install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifetime::Liveness::for_owner();
        leptos::task::spawn_local(async move {
            let client = crate::net::http::browser_client();
            let result = crate::net::api::list_doctors(&*client).await;
            alive.run(|| doctors.update(|s| s.apply_load(result)));
        });
    }

    let grid = move || {
        let state = doctors.get();
        if state.loading {
            return view! { <p class="page__status">"Loading doctors..."</p> }.into_any();
        }
        if let Some(error) = state.error.clone() {
            return view! { <p class="page__error">{error}</p> }.into_any();
        }
        let visible = state.visible();
        if visible.is_empty() {
            return view! { <p class="page__status">"No doctors found matching your search."</p> }.into_any();
        }
        view! {
            <div class="doctor-grid">
                {visible.into_iter().map(|doctor| view! { <DoctorCard doctor /> }).collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="page doctors-page">
            <header class="page__header">
                <h1>"Find a Doctor"</h1>
                <p class="page__subtitle">"Book a consultation with a verified specialist."</p>
            </header>
            <div class="doctors-page__filters">
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search by name..."
                    prop:value=move || doctors.with(|s| s.search.clone())
                    on:input=move |ev| doctors.update(|s| s.search = event_target_value(&ev))
                />
                <select
                    prop:value=move || doctors.with(|s| s.specialty.clone())
                    on:change=move |ev| doctors.update(|s| s.specialty = event_target_value(&ev))
                >
                    <option value="">"All Specialties"</option>
                    {move || {
                        doctors
                            .with(DoctorsState::specialties)
                            .into_iter()
                            .map(|name| view! { <option value={name.clone()}>{name.clone()}</option> })
                            .collect_view()
                    }}
                </select>
            </div>
            {grid}
        </div>
    }
}
