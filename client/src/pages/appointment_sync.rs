//! Appointment fetch and status-change calls shared by the list pages.

use leptos::prelude::*;

use crate::net::types::AppointmentStatus;
use crate::state::appointments::AppointmentsState;
use crate::util::lifetime::Liveness;

/// Fetch `appointments/` into `state`.
pub(crate) fn load(state: RwSignal<AppointmentsState>, alive: Liveness) {
    state.update(AppointmentsState::begin_load);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let client = crate::net::http::browser_client();
        let result = crate::net::api::list_appointments(&*client).await;
        alive.run(|| state.update(|s| s.apply_load(result)));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = alive;
}

/// `PATCH appointments/:id/` and patch the local copy once accepted. A
/// second request for an id already in flight is dropped.
pub(crate) fn change_status(state: RwSignal<AppointmentsState>, id: i64, status: AppointmentStatus, alive: Liveness) {
    let mut started = false;
    state.update(|s| started = s.begin_update(id));
    if !started {
        return;
    }

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let client = crate::net::http::browser_client();
        let result = crate::net::api::update_appointment_status(&*client, id, status).await;
        if result.is_ok() {
            log::info!("appointment {id} -> {}", status.as_str());
        }
        alive.run(|| state.update(|s| s.finish_update(id, status, result)));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (status, alive);
}
