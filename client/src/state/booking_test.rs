use super::*;

fn t(raw: &str) -> NaiveTime {
    slots::parse_wall_time(raw).unwrap()
}

fn monday_at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 17).unwrap().and_hms_opt(h, m, 0).unwrap()
}

fn availability() -> Vec<Availability> {
    vec![Availability {
        id: Some(1),
        day: "Monday".to_owned(),
        start_time: "09:00:00".to_owned(),
        end_time: "10:30:00".to_owned(),
    }]
}

fn loaded_state(now: NaiveDateTime) -> BookingState {
    let mut state = BookingState::open(&availability(), now);
    let fetch = current(&state);
    state.apply_booked(fetch, Ok(BTreeSet::new()));
    state
}

fn current(state: &BookingState) -> BookedFetch {
    state.booked_fetch().unwrap()
}

fn booked(times: &[&str]) -> BTreeSet<NaiveTime> {
    times.iter().map(|raw| t(raw)).collect()
}

// =============================================================
// Date handling
// =============================================================

#[test]
fn opens_on_today_with_elapsed_slots_dropped() {
    let now = monday_at(9, 15);
    let state = BookingState::open(&availability(), now);
    assert_eq!(state.date, Some(now.date()));
    assert_eq!(state.offered, vec![t("09:30"), t("10:00")]);
    assert!(state.is_loading());
    assert_eq!(state.count_label(), "Loading...");
}

#[test]
fn changing_date_clears_selection() {
    let now = monday_at(8, 0);
    let mut state = loaded_state(now);
    assert!(state.select(t("09:00"), now));

    state.shift(1, &availability(), now);
    assert!(state.selected.is_none());
    assert!(state.offered.is_empty());
    assert_eq!(state.booked_status, BookedStatus::Loading);

    state.shift(6, &availability(), now);
    assert_eq!(state.offered.len(), 3);
}

#[test]
fn cleared_date_offers_nothing() {
    let now = monday_at(8, 0);
    let mut state = loaded_state(now);
    state.set_date(None, &availability(), now);
    assert!(state.slots(now).is_empty());
    assert_eq!(state.empty_message(), Some(slots::NO_SLOTS_MESSAGE));
}

// =============================================================
// Booked times
// =============================================================

#[test]
fn booked_slot_cannot_be_selected() {
    let now = monday_at(8, 0);
    let mut state = BookingState::open(&availability(), now);
    let fetch = current(&state);
    state.apply_booked(fetch, Ok(booked(&["09:30"])));

    assert!(!state.select(t("09:30"), now));
    assert!(state.selected.is_none());
    assert_eq!(state.slots(now).len(), 3);
    assert_eq!(state.count_label(), "3 slots");
}

#[test]
fn stale_booked_result_is_ignored() {
    let now = monday_at(8, 0);
    let mut state = BookingState::open(&availability(), now);
    let fetch = current(&state);
    state.shift(7, &availability(), now);
    state.apply_booked(fetch, Ok(booked(&["09:00"])));
    assert!(state.booked.is_empty());
    assert!(state.is_loading());
}

#[test]
fn older_reply_for_revisited_date_is_ignored() {
    let now = monday_at(8, 0);
    let monday = now.date();
    let mut state = BookingState::open(&availability(), now);
    let first = current(&state);
    state.shift(1, &availability(), now);
    state.set_date(Some(monday), &availability(), now);
    let second = current(&state);
    assert_eq!(second.date, first.date);
    assert_ne!(second.seq, first.seq);

    state.apply_booked(second, Ok(booked(&["09:00", "09:30"])));
    state.apply_booked(first, Ok(BTreeSet::new()));

    assert_eq!(state.booked, booked(&["09:00", "09:30"]));
    assert!(!state.select(t("09:00"), now));
    assert!(!state.select(t("09:30"), now));
    assert!(state.select(t("10:00"), now));
}

#[test]
fn failed_booked_fetch_is_fail_open_with_notice() {
    let now = monday_at(8, 0);
    let mut state = BookingState::open(&availability(), now);
    let fetch = current(&state);
    state.apply_booked(fetch, Err(ApiError::Timeout));

    assert_eq!(state.notice(), Some(BOOKED_UNVERIFIED_NOTICE));
    assert!(state.slots(now).iter().all(|slot| !slot.disabled()));
    assert!(state.select(t("09:00"), now));
}

#[test]
fn newly_booked_selection_is_dropped() {
    let now = monday_at(8, 0);
    let mut state = BookingState::open(&availability(), now);
    let fetch = current(&state);
    state.apply_booked(fetch, Err(ApiError::Timeout));
    state.select(t("10:00"), now);
    state.apply_booked(fetch, Ok(booked(&["10:00"])));
    assert!(state.selected.is_none());
    assert!(state.notice().is_none());
}

// =============================================================
// Submit
// =============================================================

#[test]
fn submit_without_time_is_rejected_inline() {
    let now = monday_at(8, 0);
    let mut state = loaded_state(now);
    assert_eq!(state.begin_submit(), Err(SubmitRejected::Invalid(slots::SELECT_DATE_TIME_MESSAGE)));
    assert_eq!(state.error.as_deref(), Some(slots::SELECT_DATE_TIME_MESSAGE));
    assert!(!state.submitting);
}

#[test]
fn duplicate_submit_is_refused_while_in_flight() {
    let now = monday_at(8, 0);
    let mut state = loaded_state(now);
    state.select(t("09:30"), now);

    assert_eq!(state.begin_submit(), Ok((now.date(), t("09:30"))));
    assert_eq!(state.confirm_label(), "Booking...");
    assert_eq!(state.begin_submit(), Err(SubmitRejected::InFlight));
}

#[test]
fn failed_submit_keeps_modal_open_with_error() {
    let now = monday_at(8, 0);
    let mut state = loaded_state(now);
    state.select(t("09:30"), now);
    state.begin_submit().unwrap();

    let closed = state.finish_submit(Err(ApiError::Status {
        status: 400,
        body: r#"{"detail":"Slot already booked"}"#.to_owned(),
    }));
    assert!(!closed);
    assert!(!state.submitting);
    assert_eq!(state.error.as_deref(), Some("Slot already booked"));
    assert_eq!(state.confirm_label(), "Confirm \u{2022} 9:30 AM");
}

#[test]
fn successful_submit_closes() {
    let now = monday_at(8, 0);
    let mut state = loaded_state(now);
    state.select(t("09:00"), now);
    state.begin_submit().unwrap();
    assert!(state.finish_submit(Ok(())));
}
