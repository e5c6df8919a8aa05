//! Appointment cards for the patient and doctor lists.

#[cfg(test)]
#[path = "appointment_card_test.rs"]
mod appointment_card_test;

use leptos::prelude::*;

use crate::net::types::{Appointment, AppointmentStatus};
use crate::state::appointments::{doctor_actions, patient_can_cancel};
use crate::util::slots;

fn badge_class(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Pending => "badge badge--pending",
        AppointmentStatus::Confirmed => "badge badge--confirmed",
        AppointmentStatus::Completed => "badge badge--completed",
        AppointmentStatus::Cancelled => "badge badge--cancelled",
    }
}

/// `Mon, 17 Nov 2025 · 9:30 AM`, falling back to the raw strings.
pub fn when_label(appointment: &Appointment) -> String {
    let date = appointment
        .date()
        .map_or_else(|| appointment.appointment_date.clone(), |d| d.format("%a, %-d %b %Y").to_string());
    let time = appointment.time().map_or_else(|| appointment.appointment_time.clone(), slots::display_time);
    format!("{date} \u{b7} {time}")
}

/// Patient-side card with a Cancel action while the visit is still open.
#[component]
pub fn PatientAppointmentCard(
    appointment: Appointment,
    updating: Signal<bool>,
    on_cancel: Callback<i64>,
) -> impl IntoView {
    let id = appointment.id;
    let status = appointment.status;
    let doctor = appointment.doctor_name.clone().unwrap_or_else(|| "Doctor".to_owned());

    view! {
        <article class="appointment-card">
            <div class="appointment-card__main">
                <h3 class="appointment-card__title">{doctor}</h3>
                <p class="appointment-card__subtitle">{appointment.specialty_or_default()}</p>
                <p class="appointment-card__when">{when_label(&appointment)}</p>
                <p class="appointment-card__where">{appointment.location_or_default()}</p>
                {appointment.notes.clone().filter(|n| !n.trim().is_empty()).map(|notes| {
                    view! { <p class="appointment-card__notes">{notes}</p> }
                })}
            </div>
            <div class="appointment-card__side">
                <span class={badge_class(status)}>{status.patient_label()}</span>
                <Show when=move || patient_can_cancel(status)>
                    <button
                        class="btn btn--danger"
                        disabled=move || updating.get()
                        on:click=move |_| on_cancel.run(id)
                    >
                        {move || if updating.get() { "Cancelling..." } else { "Cancel" }}
                    </button>
                </Show>
            </div>
        </article>
    }
}

/// Doctor-side card with the status transitions allowed from the current
/// status.
#[component]
pub fn DoctorAppointmentCard(
    appointment: Appointment,
    updating: Signal<bool>,
    on_action: Callback<(i64, AppointmentStatus)>,
) -> impl IntoView {
    let id = appointment.id;
    let status = appointment.status;
    let patient = appointment.patient_name.clone().unwrap_or_else(|| "Patient".to_owned());

    let actions = doctor_actions(status)
        .iter()
        .map(|action| {
            let target = action.target;
            view! {
                <button
                    class="btn"
                    class:btn--danger={target == AppointmentStatus::Cancelled}
                    disabled=move || updating.get()
                    on:click=move |_| on_action.run((id, target))
                >
                    {action.label}
                </button>
            }
        })
        .collect_view();

    view! {
        <article class="appointment-card appointment-card--doctor">
            <div class="appointment-card__main">
                <h3 class="appointment-card__title">{patient}</h3>
                <p class="appointment-card__when">{when_label(&appointment)}</p>
                {appointment.notes.clone().filter(|n| !n.trim().is_empty()).map(|notes| {
                    view! { <p class="appointment-card__notes">{notes}</p> }
                })}
            </div>
            <div class="appointment-card__side">
                <span class={badge_class(status)}>{status.as_str()}</span>
                <div class="appointment-card__actions">{actions}</div>
            </div>
        </article>
    }
}
