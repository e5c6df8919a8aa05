//! `/`: picks the landing page for the viewer's role.

use leptos::prelude::*;

use crate::pages::doctor_home::DoctorHome;
use crate::pages::guest_home::GuestHome;
use crate::pages::patient_home::PatientHome;
use crate::state::auth::AuthState;
use crate::util::nav::{HomeView, home_view};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let view_kind = Memo::new(move |_| auth.with(home_view));

    move || match view_kind.get() {
        HomeView::Loading => view! { <p class="page__status page__status--full">"Loading..."</p> }.into_any(),
        HomeView::Guest => view! { <GuestHome /> }.into_any(),
        HomeView::Doctor => view! { <DoctorHome /> }.into_any(),
        HomeView::Patient => view! { <PatientHome /> }.into_any(),
    }
}
