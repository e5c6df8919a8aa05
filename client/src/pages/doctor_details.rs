//! Doctor profile with similar-doctor suggestions and the booking modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! A list card stores the clicked doctor in [`SelectedDoctor`]; if it
//! matches the route key the page renders it straight away, otherwise it
//! fetches `doctors/:id/`. Recommendations load once the doctor id is known.
//! Navigating between doctors reuses this component, so every async reply
//! is checked against the current route key before it is applied.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::app::SelectedDoctor;
use crate::components::book_modal::BookModal;
use crate::components::doctor_card::DoctorCard;
use crate::net::types::Doctor;
use crate::state::auth::AuthState;
use crate::state::profile::{format_amount, group_by_day, window_label};

pub const BOOKED_MESSAGE: &str = "Appointment booked successfully!";

#[component]
pub fn DoctorDetailsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let selected = expect_context::<SelectedDoctor>();
    crate::util::auth::install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    let params = use_params_map();
    let route_key = Memo::new(move |_| params.with(|p| p.get("id").unwrap_or_default()));

    let doctor = RwSignal::new(None::<Doctor>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let recommended = RwSignal::new(Vec::<Doctor>::new());
    let recommended_loading = RwSignal::new(true);
    let booking_open = RwSignal::new(false);
    let booked = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifetime::Liveness::for_owner();

    Effect::new(move || {
        let key = route_key.get();
        let preloaded = selected.0.get_untracked().filter(|d| d.route_key() == key);
        booking_open.set(false);
        booked.set(false);
        error.set(None);
        recommended.set(Vec::new());
        recommended_loading.set(true);
        loading.set(preloaded.is_none());
        doctor.set(preloaded.clone());

        #[cfg(feature = "hydrate")]
        {
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::http::browser_client();
                let still_current = || alive.is_alive() && route_key.get_untracked() == key;

                let current = match preloaded {
                    Some(found) => found,
                    None => match crate::net::api::fetch_doctor(&*client, &key).await {
                        Ok(found) => found,
                        Err(e) => {
                            log::warn!("doctor {key} fetch failed: {e}");
                            if still_current() {
                                loading.set(false);
                                error.set(Some(e.user_message("Failed to load doctor profile.")));
                            }
                            return;
                        }
                    },
                };
                if !still_current() {
                    return;
                }
                let doctor_id = current.id;
                doctor.set(Some(current));
                loading.set(false);

                let result = crate::net::api::recommended_doctors(&*client, doctor_id).await;
                if !still_current() {
                    return;
                }
                recommended_loading.set(false);
                match result {
                    Ok(list) => recommended.set(list),
                    Err(e) => log::warn!("recommendations for {doctor_id} failed: {e}"),
                }
            });
        }
    });

    let on_close = Callback::new(move |()| booking_open.set(false));
    let on_booked = Callback::new(move |()| {
        booking_open.set(false);
        booked.set(true);
    });

    let profile = move || {
        if loading.get() {
            return view! { <p class="page__status">"Loading doctor profile..."</p> }.into_any();
        }
        if let Some(message) = error.get() {
            return view! { <p class="page__error">{message}</p> }.into_any();
        }
        let Some(found) = doctor.get() else {
            return view! { <p class="page__status">"Doctor not found."</p> }.into_any();
        };
        doctor_profile(&found, booking_open)
    };

    let suggestions = move || {
        if recommended_loading.get() {
            return view! { <p class="page__status">"Loading recommendations..."</p> }.into_any();
        }
        let list = recommended.get();
        if list.is_empty() {
            return view! { <p class="page__status">"No similar doctors found."</p> }.into_any();
        }
        view! {
            <div class="doctor-grid doctor-grid--compact">
                {list.into_iter().map(|doctor| view! { <DoctorCard doctor compact=true /> }).collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="page doctor-details">
            <Show when=move || booked.get()>
                <p class="page__success">{BOOKED_MESSAGE}</p>
            </Show>
            {profile}
            <section class="doctor-details__similar">
                <h2>"Similar Doctors"</h2>
                {suggestions}
            </section>
            {move || {
                booking_open
                    .get()
                    .then(|| doctor.get())
                    .flatten()
                    .map(|doctor| view! { <BookModal doctor on_close on_booked /> })
            }}
        </div>
    }
}

fn doctor_profile(doctor: &Doctor, booking_open: RwSignal<bool>) -> AnyView {
    let name = doctor.display_name();
    let picture = doctor.profile_picture.clone().filter(|p| !p.is_empty());
    let initial = name.chars().next().unwrap_or('D').to_string();
    let fee = doctor.consultation_fee.map_or_else(|| "\u{2014}".to_owned(), |fee| format!("\u{20b9}{}", format_amount(fee)));
    let rating = doctor.rating.map_or_else(|| "New".to_owned(), |rating| format!("{rating:.1}\u{2605}"));
    let experience = doctor.experience_years.map_or_else(|| "\u{2014}".to_owned(), |years| format!("{years} yrs"));
    let bio = doctor.bio.clone().filter(|b| !b.trim().is_empty()).unwrap_or_else(|| "No bio added yet.".to_owned());

    let schedule = group_by_day(&doctor.availabilities)
        .into_iter()
        .map(|(day, windows)| {
            let labels = windows.iter().map(window_label).collect::<Vec<_>>().join(", ");
            view! {
                <li class="schedule__day">
                    <span class="schedule__name">{day}</span>
                    <span class="schedule__windows">{labels}</span>
                </li>
            }
        })
        .collect_view();
    let has_schedule = !doctor.availabilities.is_empty();

    view! {
        <section class="doctor-details__profile">
            <div class="doctor-details__avatar">
                {match picture {
                    Some(src) => view! { <img src=src alt=name.clone() /> }.into_any(),
                    None => view! { <span>{initial}</span> }.into_any(),
                }}
            </div>
            <div class="doctor-details__info">
                <h1>{name.clone()}</h1>
                <p class="doctor-details__specialty">{doctor.specialization_or_default()}</p>
                <p class="doctor-details__clinic">{doctor.clinic_or_default()}</p>
                <div class="doctor-details__stats">
                    <span>"Experience: " {experience}</span>
                    <span>"Rating: " {rating}</span>
                    <span>"Fee: " {fee}</span>
                </div>
                <p class="doctor-details__bio">{bio}</p>
                <button class="btn btn--primary" on:click=move |_| booking_open.set(true)>
                    "Book Appointment"
                </button>
            </div>
            <div class="doctor-details__schedule">
                <h2>"Availability"</h2>
                {if has_schedule {
                    view! { <ul class="schedule">{schedule}</ul> }.into_any()
                } else {
                    view! { <p class="page__status">"No availability set"</p> }.into_any()
                }}
            </div>
        </section>
    }
    .into_any()
}
