//! Patient dashboard: profile summary, stat tiles, and the next visit.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads `profile/me/` and `appointments/` side by side on mount. The edit
//! modal PATCHes the profile and the returned record is merged in place, so
//! the page never refetches after a save.

use leptos::prelude::*;

use crate::components::appointment_card::when_label;
use crate::components::profile_edit_modal::ProfileEditModal;
use crate::net::types::{Appointment, Profile, ProfileResponse};
use crate::state::appointments::{next_upcoming, patient_stats};
use crate::state::auth::AuthState;
use crate::state::profile::{StatTile, display_name, merge_profile, stat_tiles};
use crate::util::slots::local_now;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    crate::util::auth::install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    let response = RwSignal::new(None::<ProfileResponse>);
    let appointments = RwSignal::new(Vec::<Appointment>::new());
    let loading = RwSignal::new(true);
    let editing = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let alive = crate::util::lifetime::Liveness::for_owner();
        leptos::task::spawn_local(async move {
            let client = crate::net::http::browser_client();
            let (profile, list) = futures::join!(
                crate::net::api::fetch_profile(&*client),
                crate::net::api::list_appointments(&*client),
            );
            alive.run(|| {
                loading.set(false);
                match profile {
                    Ok(profile) => response.set(Some(profile)),
                    Err(e) => log::warn!("dashboard profile fetch failed: {e}"),
                }
                match list {
                    Ok(list) => appointments.set(list),
                    Err(e) => log::warn!("dashboard appointments fetch failed: {e}"),
                }
            });
        });
    }

    let on_close = Callback::new(move |()| editing.set(false));
    let on_saved = Callback::new(move |update: Profile| {
        response.update(|current| {
            if let Some(current) = current {
                merge_profile(&mut current.profile, update);
            }
        });
        editing.set(false);
    });

    let tiles = move || {
        let upcoming = appointments.with(|list| patient_stats(list).upcoming);
        response.with(|r| r.as_ref().map(|r| stat_tiles(r.role, &r.profile, upcoming))).unwrap_or_default()
    };

    let next_visit = move || {
        appointments.with(|list| next_upcoming(list, local_now().date())).map_or_else(
            || view! { <p class="page__status">"No upcoming appointments"</p> }.into_any(),
            |next| {
                view! {
                    <div class="next-up">
                        <span class="next-up__doctor">{next.doctor_name.clone().unwrap_or_default()}</span>
                        <span class="next-up__specialty">{next.specialty_or_default()}</span>
                        <span class="next-up__when">{when_label(&next)}</span>
                        <span class="next-up__location">{next.location_or_default()}</span>
                    </div>
                }
                .into_any()
            },
        )
    };

    let body = move || {
        if loading.get() {
            return view! { <p class="page__status">"Loading your dashboard..."</p> }.into_any();
        }
        let Some(current) = response.get() else {
            return view! { <p class="page__error">"No user data found"</p> }.into_any();
        };
        let name = display_name(&current);
        let email = current.user.as_ref().map(|u| u.email.clone()).or_else(|| current.profile.user_email.clone());
        view! {
            <section class="dashboard__profile">
                <div class="avatar">{name.chars().next().unwrap_or('U').to_string()}</div>
                <div>
                    <h1>{format!("Welcome back, {name}")}</h1>
                    <p class="page__subtitle">{email.unwrap_or_default()}</p>
                </div>
                <button class="btn" on:click=move |_| editing.set(true)>
                    "Edit Profile"
                </button>
            </section>
            <section class="stat-tiles">
                {tiles()
                    .into_iter()
                    .map(|StatTile { title, value }| {
                        view! {
                            <div class="stat-tile">
                                <span class="stat-tile__value">{value}</span>
                                <span class="stat-tile__title">{title}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>
            <section class="dashboard__details">
                <h2>"Personal Information"</h2>
                {personal_info(&current.profile)}
            </section>
            <section class="dashboard__next">
                <h2>"Next Appointment"</h2>
                {next_visit}
            </section>
        }
        .into_any()
    };

    view! {
        <div class="page dashboard">
            {body}
            {move || {
                let current = response.get().filter(|_| editing.get())?;
                Some(view! { <ProfileEditModal response=current on_close on_saved /> })
            }}
        </div>
    }
}

fn personal_info(profile: &Profile) -> AnyView {
    let row = |label: &'static str, value: Option<String>| {
        let value = value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "Not provided".to_owned());
        view! {
            <div class="info-row">
                <dt>{label}</dt>
                <dd>{value}</dd>
            </div>
        }
    };
    view! {
        <dl class="info-list">
            {row("Gender", profile.gender.clone())}
            {row("Phone", profile.phone.clone())}
            {row("Address", profile.address.clone())}
            {row("Medical history", profile.medical_history.clone())}
        </dl>
    }
    .into_any()
}
