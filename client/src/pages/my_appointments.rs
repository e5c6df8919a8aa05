//! Patient appointment list with status filter and cancel.

use leptos::prelude::*;

use crate::components::appointment_card::{PatientAppointmentCard, when_label};
use crate::net::types::AppointmentStatus;
use crate::pages::appointment_sync;
use crate::state::appointments::{AppointmentsState, StatusFilter};
use crate::state::auth::AuthState;
use crate::util::lifetime::Liveness;
use crate::util::slots::local_now;

#[component]
pub fn MyAppointmentsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    crate::util::auth::install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    let appointments = RwSignal::new(AppointmentsState::default());
    let alive = Liveness::for_owner();
    appointment_sync::load(appointments, alive.clone());

    let on_cancel = Callback::new(move |id: i64| {
        appointment_sync::change_status(appointments, id, AppointmentStatus::Cancelled, alive.clone());
    });

    let filters = move || {
        StatusFilter::CHOICES
            .into_iter()
            .map(|choice| {
                view! {
                    <button
                        class="chip"
                        class:chip--active=move || appointments.with(|s| s.filter == choice)
                        on:click=move |_| appointments.update(|s| s.filter = choice)
                    >
                        {choice.patient_label()}
                    </button>
                }
            })
            .collect_view()
    };

    let next_up = move || {
        appointments.with(|s| s.next_upcoming(local_now().date())).map_or_else(
            || view! { <p class="page__status">"No upcoming appointments"</p> }.into_any(),
            |next| {
                view! {
                    <div class="next-up">
                        <span class="next-up__doctor">{next.doctor_name.clone().unwrap_or_default()}</span>
                        <span class="next-up__when">{when_label(&next)}</span>
                    </div>
                }
                .into_any()
            },
        )
    };

    let list = move || {
        let state = appointments.get();
        if state.loading {
            return view! { <p class="page__status">"Loading appointments..."</p> }.into_any();
        }
        let visible = state.visible();
        if visible.is_empty() {
            return view! { <p class="page__status">"No appointments found."</p> }.into_any();
        }
        visible
            .into_iter()
            .map(|appointment| {
                let id = appointment.id;
                let updating = Signal::derive(move || appointments.with(|s| s.is_updating(id)));
                view! { <PatientAppointmentCard appointment updating on_cancel /> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page appointments-page">
            <header class="page__header">
                <h1>"My Appointments"</h1>
                <span class="page__count">
                    {move || format!("{} Upcoming", appointments.with(AppointmentsState::upcoming_count))}
                </span>
            </header>
            <section class="appointments-page__next">
                <h2>"Next Appointment"</h2>
                {next_up}
            </section>
            <div class="chips">{filters}</div>
            {move || appointments.with(|s| s.error.clone()).map(|message| view! { <p class="page__error">{message}</p> })}
            <div class="appointments-page__list">{list}</div>
        </div>
    }
}
