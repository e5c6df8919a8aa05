//! Doctor-side appointment management.

use leptos::prelude::*;

use crate::components::appointment_card::DoctorAppointmentCard;
use crate::net::types::AppointmentStatus;
use crate::pages::appointment_sync;
use crate::state::appointments::{AppointmentsState, StatusFilter};
use crate::state::auth::AuthState;
use crate::util::lifetime::Liveness;

#[component]
pub fn DoctorAppointmentsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    crate::util::auth::install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    let appointments = RwSignal::new(AppointmentsState::default());
    let alive = Liveness::for_owner();
    appointment_sync::load(appointments, alive.clone());

    let on_refresh = {
        let alive = alive.clone();
        move |_| appointment_sync::load(appointments, alive.clone())
    };
    let on_action = Callback::new(move |(id, status): (i64, AppointmentStatus)| {
        appointment_sync::change_status(appointments, id, status, alive.clone());
    });

    let filters = move || {
        StatusFilter::CHOICES
            .into_iter()
            .map(|choice| {
                let count = move || match choice {
                    StatusFilter::All => appointments.with(|s| s.items.len()),
                    StatusFilter::Only(status) => appointments.with(|s| s.count(status)),
                };
                view! {
                    <button
                        class="chip"
                        class:chip--active=move || appointments.with(|s| s.filter == choice)
                        on:click=move |_| appointments.update(|s| s.filter = choice)
                    >
                        {choice.doctor_label()}
                        <span class="chip__count">{count}</span>
                    </button>
                }
            })
            .collect_view()
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
                view! { <DoctorAppointmentCard appointment updating on_action /> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page appointments-page appointments-page--doctor">
            <header class="page__header">
                <h1>"Appointments"</h1>
                <button class="btn" on:click=on_refresh disabled=move || appointments.with(|s| s.loading)>
                    "Refresh"
                </button>
            </header>
            <div class="appointments-page__toolbar">
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search patient..."
                    prop:value=move || appointments.with(|s| s.search.clone())
                    on:input=move |ev| appointments.update(|s| s.search = event_target_value(&ev))
                />
                <div class="chips">{filters}</div>
            </div>
            {move || appointments.with(|s| s.error.clone()).map(|message| view! { <p class="page__error">{message}</p> })}
            <div class="appointments-page__list">{list}</div>
        </div>
    }
}
