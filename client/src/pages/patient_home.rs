//! Patient landing: greeting, visit stats, next visit, and recent doctors.

use leptos::prelude::*;

use crate::components::appointment_card::when_label;
use crate::net::types::Appointment;
use crate::state::appointments::{PatientStats, next_upcoming, patient_stats, recent_doctors};
use crate::state::auth::AuthState;
use crate::util::slots::local_now;

#[component]
pub fn PatientHome() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let items = RwSignal::new(Vec::<Appointment>::new());
    let loading = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifetime::Liveness::for_owner();
        leptos::task::spawn_local(async move {
            let client = crate::net::http::browser_client();
            let result = crate::net::api::fetch_homepage(&*client).await;
            alive.run(|| {
                loading.set(false);
                match result {
                    Ok(list) => items.set(list),
                    Err(e) => log::warn!("homepage fetch failed: {e}"),
                }
            });
        });
    }

    let stats = Memo::new(move |_| items.with(|list| patient_stats(list)));
    let tile = move |title: &'static str, value: fn(PatientStats) -> usize| {
        view! {
            <div class="stat-tile">
                <span class="stat-tile__value">{move || value(stats.get())}</span>
                <span class="stat-tile__title">{title}</span>
            </div>
        }
    };

    let next_visit = move || {
        items.with(|list| next_upcoming(list, local_now().date())).map_or_else(
            || view! { <p class="page__status">"No upcoming appointments"</p> }.into_any(),
            |next| {
                view! {
                    <div class="next-up">
                        <span class="next-up__doctor">{next.doctor_name.clone().unwrap_or_default()}</span>
                        <span class="next-up__specialty">{next.specialty_or_default()}</span>
                        <span class="next-up__when">{when_label(&next)}</span>
                    </div>
                }
                .into_any()
            },
        )
    };

    let recent = move || {
        let doctors = items.with(|list| recent_doctors(list));
        if doctors.is_empty() {
            return view! { <p class="page__status">"You haven't consulted any doctors yet."</p> }.into_any();
        }
        doctors
            .into_iter()
            .map(|doctor| {
                let initial = doctor.name.chars().next().unwrap_or('D').to_string();
                view! {
                    <div class="recent-doctor">
                        {match doctor.image.filter(|src| !src.is_empty()) {
                            Some(src) => view! { <img class="recent-doctor__avatar" src=src alt="" /> }.into_any(),
                            None => view! { <span class="recent-doctor__avatar">{initial}</span> }.into_any(),
                        }}
                        <span class="recent-doctor__name">{doctor.name}</span>
                        <span class="recent-doctor__specialty">{doctor.specialty}</span>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page patient-home">
            <section class="patient-home__hero">
                <h1>{move || format!("Hello, {}", auth.with(AuthState::display_name))}</h1>
                <p class="page__subtitle">"How are you feeling today?"</p>
                <div class="hero__actions">
                    <a class="btn btn--primary" href="/doctors">"Book Appointment"</a>
                    <a class="btn" href="/appointments">"My Appointments"</a>
                </div>
            </section>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__status">"Loading..."</p> }>
                <section class="stat-tiles">
                    {tile("Upcoming", |s| s.upcoming)}
                    {tile("Consultations", |s| s.consultations)}
                    {tile("Doctors", |s| s.doctors)}
                </section>
                <section class="patient-home__next">
                    <h2>"Next Appointment"</h2>
                    {next_visit}
                </section>
                <section class="patient-home__recent">
                    <h2>"Recent Doctors"</h2>
                    <div class="recent-doctors">{recent}</div>
                </section>
            </Show>
        </div>
    }
}
