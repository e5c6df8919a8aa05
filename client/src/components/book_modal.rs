//! Booking modal: pick a date, a free slot, and confirm.
//!
//! SYSTEM CONTEXT
//! ==============
//! Slot rules live in `util::slots` and the modal's transitions in
//! `state::booking`; this component wires them to the DOM and to two API
//! calls. Booked times are re-fetched on every date change, and
//! `BookingState::apply_booked` drops any reply issued before the latest
//! change.

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::net::types::Doctor;
use crate::state::booking::BookingState;
use crate::state::profile::format_amount;
use crate::util::slots::{self, display_time, format_date, local_now, parse_date};

#[component]
pub fn BookModal(doctor: Doctor, on_close: Callback<()>, on_booked: Callback<()>) -> impl IntoView {
    let doctor_id = doctor.id;
    let availabilities = StoredValue::new(doctor.availabilities.clone());
    let booking = RwSignal::new(BookingState::open(&doctor.availabilities, local_now()));
    let today = format_date(local_now().date());

    #[cfg(feature = "hydrate")]
    let alive = crate::util::lifetime::Liveness::for_owner();

    #[cfg(feature = "hydrate")]
    {
        let pending = Memo::new(move |_| booking.with(BookingState::booked_fetch));
        let alive = alive.clone();
        Effect::new(move || {
            let Some(fetch) = pending.get() else {
                return;
            };
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::http::browser_client();
                let result = crate::net::api::booked_times(&*client, doctor_id, fetch.date).await;
                alive.run(|| booking.update(|b| b.apply_booked(fetch, result)));
            });
        });
    }

    let set_date = move |date: Option<NaiveDate>| {
        availabilities.with_value(|avail| booking.update(|b| b.set_date(date, avail, local_now())));
    };
    let shift = move |days: i64| {
        availabilities.with_value(|avail| booking.update(|b| b.shift(days, avail, local_now())));
    };

    let on_confirm = move |_| {
        let mut started = None;
        booking.update(|b| started = b.begin_submit().ok());
        let Some((date, time)) = started else {
            return;
        };
        let notes = booking.with_untracked(|b| b.notes.clone());

        #[cfg(feature = "hydrate")]
        {
            let alive = alive.clone();
            leptos::task::spawn_local(async move {
                let client = crate::net::http::browser_client();
                let result = crate::net::api::create_appointment(&*client, doctor_id, date, time, &notes).await;
                let mut closed = false;
                alive.run(|| booking.update(|b| closed = b.finish_submit(result)));
                if closed {
                    log::info!("booked doctor {doctor_id} on {date} at {time}");
                    on_booked.run(());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = (date, time, notes, doctor_id, on_booked);
    };

    let slot_buttons = move || {
        let now = local_now();
        let state = booking.get();
        state
            .slots(now)
            .into_iter()
            .map(|slot| {
                let selected = state.selected == Some(slot.time);
                view! {
                    <button
                        class="slot"
                        class:slot--selected=selected
                        class:slot--booked=slot.booked
                        disabled=slot.disabled()
                        title={if slot.booked { "Already booked" } else { "" }}
                        on:click=move |_| {
                            booking.update(|b| {
                                b.select(slot.time, local_now());
                            });
                        }
                    >
                        {display_time(slot.time)}
                    </button>
                }
            })
            .collect_view()
    };

    let fee = doctor.consultation_fee.map(|fee| format!("\u{20b9}{}", format_amount(fee)));

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--booking"
                tabindex="0"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        on_close.run(());
                    }
                }
            >
                <header class="dialog__header">
                    <div>
                        <h2>{format!("Book with {}", doctor.display_name())}</h2>
                        <p class="dialog__subtitle">{doctor.specialization_or_default()}</p>
                    </div>
                    {fee.map(|fee| view! { <span class="dialog__fee">{fee}</span> })}
                </header>

                <div class="booking__dates">
                    <button class="btn" on:click=move |_| shift(-1)>"Prev"</button>
                    <input
                        type="date"
                        class="booking__date"
                        min=today
                        prop:value=move || booking.with(|b| b.date.map(format_date).unwrap_or_default())
                        on:input=move |ev| set_date(parse_date(&event_target_value(&ev)))
                    />
                    <button class="btn" on:click=move |_| shift(1)>"Next"</button>
                </div>
                <p class="booking__weekday">
                    {move || booking.with(|b| b.date.map(slots::weekday_name).unwrap_or_default())}
                    " \u{b7} "
                    {move || booking.with(BookingState::count_label)}
                </p>

                {move || booking.with(BookingState::notice).map(|notice| view! { <p class="booking__notice">{notice}</p> })}

                <div class="booking__slots">
                    {slot_buttons}
                    {move || booking.with(BookingState::empty_message).map(|message| view! { <p class="booking__empty">{message}</p> })}
                </div>

                <label class="form-field">
                    <span>"Notes"</span>
                    <textarea
                        rows="3"
                        placeholder="Symptoms or anything the doctor should know"
                        prop:value=move || booking.with(|b| b.notes.clone())
                        on:input=move |ev| booking.update(|b| b.notes = event_target_value(&ev))
                    ></textarea>
                </label>

                {move || booking.with(|b| b.error.clone()).map(|error| view! { <p class="form-error">{error}</p> })}

                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button
                        class="btn btn--primary"
                        disabled=move || booking.with(|b| b.submitting)
                        on:click=on_confirm
                    >
                        {move || booking.with(BookingState::confirm_label)}
                    </button>
                </div>
            </div>
        </div>
    }
}
