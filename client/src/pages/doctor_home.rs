//! Doctor landing: today's schedule and practice counts.
//!
//! Everything shown is derived from the doctor's own `appointments/` list.

use leptos::prelude::*;

use crate::net::types::Appointment;
use crate::state::appointments::{DoctorStats, doctor_stats, schedule_for};
use crate::state::auth::AuthState;
use crate::util::slots::{display_time, local_now};

#[component]
pub fn DoctorHome() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let items = RwSignal::new(Vec::<Appointment>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifetime::Liveness::for_owner();
        leptos::task::spawn_local(async move {
            let client = crate::net::http::browser_client();
            let result = crate::net::api::list_appointments(&*client).await;
            alive.run(|| {
                loading.set(false);
                match result {
                    Ok(list) => items.set(list),
                    Err(e) => {
                        log::warn!("doctor schedule fetch failed: {e}");
                        error.set(Some(e.user_message("Could not load today's schedule.")));
                    }
                }
            });
        });
    }

    let today = local_now().date();
    let stats = Memo::new(move |_| items.with(|list| doctor_stats(list, today)));
    let tile = move |title: &'static str, value: fn(DoctorStats) -> usize| {
        view! {
            <div class="stat-tile">
                <span class="stat-tile__value">{move || value(stats.get())}</span>
                <span class="stat-tile__title">{title}</span>
            </div>
        }
    };

    let schedule = move || {
        let visits = items.with(|list| schedule_for(list, today));
        if visits.is_empty() {
            return view! { <p class="page__status">"No appointments scheduled for today."</p> }.into_any();
        }
        view! {
            <ul class="schedule">
                {visits
                    .into_iter()
                    .map(|visit| {
                        let time = visit.time().map_or_else(|| visit.appointment_time.clone(), display_time);
                        view! {
                            <li class="schedule__item">
                                <span class="schedule__time">{time}</span>
                                <span class="schedule__patient">{visit.patient_name.clone().unwrap_or_default()}</span>
                                <span class="badge">{visit.status.as_str()}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="page doctor-home">
            <section class="doctor-home__hero">
                <h1>{move || format!("Welcome, Dr. {}", auth.with(AuthState::display_name))}</h1>
                <p class="page__subtitle">{today.format("%A, %-d %B %Y").to_string()}</p>
                <div class="hero__actions">
                    <a class="btn btn--primary" href="/my-appointment">"Manage Appointments"</a>
                    <a class="btn" href="/profile">"My Profile"</a>
                </div>
            </section>
            {move || error.get().map(|message| view! { <p class="page__error">{message}</p> })}
            <Show when=move || !loading.get() fallback=|| view! { <p class="page__status">"Loading..."</p> }>
                <section class="stat-tiles">
                    {tile("Today", |s| s.today)}
                    {tile("Pending", |s| s.pending)}
                    {tile("Patients", |s| s.patients)}
                    {tile("Completed", |s| s.completed)}
                </section>
                <section class="doctor-home__schedule">
                    <h2>"Today's Schedule"</h2>
                    {schedule}
                </section>
            </Show>
        </div>
    }
}
