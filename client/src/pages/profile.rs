//! Doctor profile: practice details, weekly availability, and edit flows.

use leptos::prelude::*;

use crate::components::availability_modal::AvailabilityModal;
use crate::components::profile_edit_modal::ProfileEditModal;
use crate::net::types::{Profile, ProfileResponse};
use crate::state::auth::AuthState;
use crate::state::profile::{display_name, group_by_day, merge_profile, stat_tiles, window_label};
use crate::util::lifetime::Liveness;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dialog {
    None,
    Edit,
    Availability,
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    crate::util::auth::install_unauth_redirect(auth, leptos_router::hooks::use_navigate());

    let response = RwSignal::new(None::<ProfileResponse>);
    let loading = RwSignal::new(true);
    let dialog = RwSignal::new(Dialog::None);
    let alive = Liveness::for_owner();

    let reload = move || load(response, loading, alive.clone());
    reload();

    let on_close = Callback::new(move |()| dialog.set(Dialog::None));
    let on_saved = Callback::new(move |update: Profile| {
        response.update(|current| {
            if let Some(current) = current {
                merge_profile(&mut current.profile, update);
            }
        });
        dialog.set(Dialog::None);
    });
    let on_availability_saved = Callback::new(move |()| {
        dialog.set(Dialog::None);
        reload();
    });

    let body = move || {
        if loading.get() && response.with(Option::is_none) {
            return view! { <p class="page__status">"Loading profile..."</p> }.into_any();
        }
        let Some(current) = response.get() else {
            return view! { <p class="page__error">"No profile found"</p> }.into_any();
        };
        let profile = &current.profile;
        let name = display_name(&current);
        let about = profile.description.clone().filter(|d| !d.trim().is_empty());
        view! {
            <section class="profile__header">
                <div class="avatar">{name.chars().next().unwrap_or('D').to_string()}</div>
                <div>
                    <h1>{format!("Dr. {name}")}</h1>
                    <p class="page__subtitle">{profile.specialization.clone().unwrap_or_default()}</p>
                    <p class="profile__clinic">
                        {[profile.clinic_name.clone(), profile.clinic_address.clone()]
                            .into_iter()
                            .flatten()
                            .filter(|part| !part.trim().is_empty())
                            .collect::<Vec<_>>()
                            .join(", ")}
                    </p>
                </div>
                <button class="btn" on:click=move |_| dialog.set(Dialog::Edit)>
                    "Edit Profile"
                </button>
            </section>
            <section class="stat-tiles">
                {stat_tiles(current.role, profile, 0)
                    .into_iter()
                    .map(|tile| {
                        view! {
                            <div class="stat-tile">
                                <span class="stat-tile__value">{tile.value}</span>
                                <span class="stat-tile__title">{tile.title}</span>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>
            <section class="profile__about">
                <h2>"About"</h2>
                <p>{about.unwrap_or_else(|| "No bio added yet.".to_owned())}</p>
            </section>
            <section class="profile__availability">
                <header class="section__header">
                    <h2>"Availability"</h2>
                    <button class="btn btn--primary" on:click=move |_| dialog.set(Dialog::Availability)>
                        "Add Availability"
                    </button>
                </header>
                {availability(&current.profile)}
            </section>
        }
        .into_any()
    };

    view! {
        <div class="page profile">
            {body}
            {move || match dialog.get() {
                Dialog::None => None,
                Dialog::Edit => response
                    .get()
                    .map(|current| view! { <ProfileEditModal response=current on_close on_saved /> }.into_any()),
                Dialog::Availability => {
                    Some(view! { <AvailabilityModal on_close on_saved=on_availability_saved /> }.into_any())
                }
            }}
        </div>
    }
}

fn availability(profile: &Profile) -> AnyView {
    let days = group_by_day(&profile.availabilities);
    if days.is_empty() {
        return view! { <p class="page__status">"No availability set"</p> }.into_any();
    }
    days.into_iter()
        .map(|(day, windows)| {
            view! {
                <div class="availability-day">
                    <span class="availability-day__name">{day}</span>
                    <div class="availability-day__windows">
                        {windows.iter().map(|w| view! { <span class="chip">{window_label(w)}</span> }).collect_view()}
                    </div>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

/// Fetches `profile/me/`. The current record stays visible during a reload.
fn load(response: RwSignal<Option<ProfileResponse>>, loading: RwSignal<bool>, alive: Liveness) {
    loading.set(true);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let client = crate::net::http::browser_client();
        let result = crate::net::api::fetch_profile(&*client).await;
        alive.run(|| {
            loading.set(false);
            match result {
                Ok(profile) => response.set(Some(profile)),
                Err(e) => log::warn!("profile fetch failed: {e}"),
            }
        });
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = (response, alive);
}
