//! Doctor summary card linking to the details page.

use leptos::prelude::*;

use crate::app::SelectedDoctor;
use crate::net::types::Doctor;
use crate::state::profile::format_amount;

/// A clickable doctor card. Clicking hands the doctor to the details page
/// through [`SelectedDoctor`] so it renders without waiting on a fetch.
#[component]
pub fn DoctorCard(doctor: Doctor, #[prop(optional)] compact: bool) -> impl IntoView {
    let selected = expect_context::<SelectedDoctor>();
    let href = format!("/doctors/{}", doctor.route_key());
    let name = doctor.display_name();
    let initial = name.chars().next().unwrap_or('D').to_string();
    let specialization = doctor.specialization_or_default();
    let clinic = doctor.clinic_or_default();
    let picture = doctor.profile_picture.clone().filter(|p| !p.is_empty());
    let fee = doctor.consultation_fee.map(|fee| format!("\u{20b9}{}", format_amount(fee)));
    let rating = doctor.rating.map(|rating| format!("{rating:.1}\u{2605}"));
    let experience = doctor.experience_years.map(|years| format!("{years} yrs exp"));

    view! {
        <a
            class="doctor-card"
            class:doctor-card--compact=compact
            href=href
            on:click=move |_| selected.0.set(Some(doctor.clone()))
        >
            <div class="doctor-card__avatar">
                {match picture {
                    Some(src) => view! { <img src=src alt=name.clone() /> }.into_any(),
                    None => view! { <span>{initial}</span> }.into_any(),
                }}
            </div>
            <div class="doctor-card__body">
                <h3 class="doctor-card__name">{name.clone()}</h3>
                <p class="doctor-card__specialty">{specialization}</p>
                <Show when=move || !compact>
                    <p class="doctor-card__clinic">{clinic.clone()}</p>
                </Show>
                <div class="doctor-card__meta">
                    {experience.map(|text| view! { <span>{text}</span> })}
                    {rating.map(|text| view! { <span class="doctor-card__rating">{text}</span> })}
                    {fee.map(|text| view! { <span class="doctor-card__fee">{text}</span> })}
                </div>
            </div>
        </a>
    }
}
