//! Modal for adding a weekly availability window.

use leptos::prelude::*;

use crate::components::form_field::TextField;
use crate::state::profile::{WEEKDAYS, validate_availability};

const ADD_FAILED_MESSAGE: &str = "Error adding availability slot. Please try again.";

/// Validates locally, posts `availability/`, then calls `on_saved` so the
/// profile page can reload its windows.
#[component]
pub fn AvailabilityModal(on_close: Callback<()>, on_saved: Callback<()>) -> impl IntoView {
    let day = RwSignal::new(String::new());
    let start = RwSignal::new(String::new());
    let end = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifetime::Liveness::for_owner();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let request = match validate_availability(&day.get_untracked(), &start.get_untracked(), &end.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::http::browser_client();
                let result = crate::net::api::add_availability(&*client, &request).await;
                if !alive.is_alive() {
                    return;
                }
                saving.set(false);
                match result {
                    Ok(()) => on_saved.run(()),
                    Err(e) => {
                        log::warn!("add availability failed: {e}");
                        error.set(Some(e.user_message(ADD_FAILED_MESSAGE)));
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (request, on_saved);
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=on_submit>
                <h2>"Add Availability"</h2>
                <label class="form-field">
                    <span class="form-field__label">"Day"</span>
                    <select prop:value=move || day.get() on:change=move |ev| day.set(event_target_value(&ev))>
                        <option value="">"Select day"</option>
                        {WEEKDAYS.iter().map(|name| view! { <option value={*name}>{*name}</option> }).collect_view()}
                    </select>
                </label>
                <TextField label="Start time" value=start kind="time" />
                <TextField label="End time" value=end kind="time" />
                {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
                <div class="dialog__actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Add Slot" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
