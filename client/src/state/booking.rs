//! Booking modal state.
//!
//! DESIGN
//! ======
//! The modal owns one `BookingState` in an `RwSignal`. Date changes
//! regenerate the offered slots synchronously and start a booked-times fetch;
//! the fetch result is applied only if no date change has happened since.
//! A failed booked-times fetch leaves every slot bookable and raises an
//! inline notice (the server still rejects a real double booking).

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::net::error::ApiError;
use crate::net::types::Availability;
use crate::util::slots::{self, Slot};

pub const BOOKED_UNVERIFIED_NOTICE: &str = "Booked times could not be verified. Some slots may already be taken.";
pub const BOOKING_FAILED_MESSAGE: &str = "Failed to book appointment.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookedStatus {
    Loading,
    Loaded,
    /// The fetch failed; slots are shown without booked marks.
    Unverified,
}

/// Identifies one booked-times request. A reply is applied only if no date
/// change has happened since it was issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookedFetch {
    pub seq: u64,
    pub date: NaiveDate,
}

/// Why a submit click did not start a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitRejected {
    InFlight,
    Invalid(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookingState {
    pub date: Option<NaiveDate>,
    pub offered: Vec<NaiveTime>,
    pub booked: BTreeSet<NaiveTime>,
    pub booked_status: BookedStatus,
    pub selected: Option<NaiveTime>,
    pub notes: String,
    pub submitting: bool,
    pub error: Option<String>,
    /// Bumped on every date change.
    pub fetch_seq: u64,
}

impl BookingState {
    /// Open on `now`'s date with slots already generated.
    pub fn open(availabilities: &[Availability], now: NaiveDateTime) -> Self {
        let mut state = Self {
            date: None,
            offered: Vec::new(),
            booked: BTreeSet::new(),
            booked_status: BookedStatus::Loading,
            selected: None,
            notes: String::new(),
            submitting: false,
            error: None,
            fetch_seq: 0,
        };
        state.set_date(Some(now.date()), availabilities, now);
        state
    }

    /// Switch dates: clears the selection and booked marks, regenerates the
    /// offered slots. A cleared date input offers nothing.
    pub fn set_date(&mut self, date: Option<NaiveDate>, availabilities: &[Availability], now: NaiveDateTime) {
        self.date = date;
        self.fetch_seq += 1;
        self.selected = None;
        self.booked.clear();
        self.error = None;
        match date {
            Some(date) => {
                self.offered = slots::offered_slots(availabilities, date, now);
                self.booked_status = BookedStatus::Loading;
            }
            None => {
                self.offered.clear();
                self.booked_status = BookedStatus::Loaded;
            }
        }
    }

    /// Move the selected date by `days` (Prev/Next).
    pub fn shift(&mut self, days: i64, availabilities: &[Availability], now: NaiveDateTime) {
        let base = self.date.unwrap_or_else(|| now.date());
        self.set_date(Some(slots::shift_date(base, days)), availabilities, now);
    }

    /// The request the current date needs, if any.
    pub fn booked_fetch(&self) -> Option<BookedFetch> {
        self.date.map(|date| BookedFetch { seq: self.fetch_seq, date })
    }

    /// Apply a booked-times result. Replies issued before the latest date
    /// change are dropped, even when the user has come back to their date.
    pub fn apply_booked(&mut self, fetch: BookedFetch, result: Result<BTreeSet<NaiveTime>, ApiError>) {
        if fetch.seq != self.fetch_seq || self.date != Some(fetch.date) {
            return;
        }
        let date = fetch.date;
        match result {
            Ok(booked) => {
                self.booked = booked;
                self.booked_status = BookedStatus::Loaded;
            }
            Err(e) => {
                log::warn!("booked-times fetch failed for {date}: {e}");
                self.booked.clear();
                self.booked_status = BookedStatus::Unverified;
            }
        }
        if self.selected.is_some_and(|t| self.booked.contains(&t)) {
            self.selected = None;
        }
    }

    pub fn slots(&self, now: NaiveDateTime) -> Vec<Slot> {
        match self.date {
            Some(date) => slots::mark_slots(&self.offered, &self.booked, date, now),
            None => Vec::new(),
        }
    }

    /// Select a slot; disabled or unknown slots are ignored.
    pub fn select(&mut self, time: NaiveTime, now: NaiveDateTime) -> bool {
        let enabled = self.slots(now).iter().any(|slot| slot.time == time && !slot.disabled());
        if enabled {
            self.selected = Some(time);
            self.error = None;
        }
        enabled
    }

    pub fn is_loading(&self) -> bool {
        self.booked_status == BookedStatus::Loading
    }

    pub fn notice(&self) -> Option<&'static str> {
        (self.booked_status == BookedStatus::Unverified).then_some(BOOKED_UNVERIFIED_NOTICE)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.is_loading() && self.offered.is_empty()).then_some(slots::NO_SLOTS_MESSAGE)
    }

    pub fn count_label(&self) -> String {
        if self.is_loading() { "Loading...".to_owned() } else { format!("{} slots", self.offered.len()) }
    }

    pub fn confirm_label(&self) -> String {
        if self.submitting {
            return "Booking...".to_owned();
        }
        match self.selected {
            Some(time) => format!("Confirm \u{2022} {}", slots::display_time(time)),
            None => "Confirm".to_owned(),
        }
    }

    /// Gate a submit click. On success the state is marked in flight and
    /// the validated date and time are returned.
    ///
    /// # Errors
    ///
    /// [`SubmitRejected::InFlight`] while a previous submit is pending;
    /// [`SubmitRejected::Invalid`] (also shown inline) when the date or time
    /// is missing.
    pub fn begin_submit(&mut self) -> Result<(NaiveDate, NaiveTime), SubmitRejected> {
        if self.submitting {
            return Err(SubmitRejected::InFlight);
        }
        match slots::validate_booking(self.date, self.selected) {
            Ok(picked) => {
                self.submitting = true;
                self.error = None;
                Ok(picked)
            }
            Err(message) => {
                self.error = Some(message.to_owned());
                Err(SubmitRejected::Invalid(message))
            }
        }
    }

    /// Record the submit outcome. Returns `true` when the modal should close.
    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> bool {
        self.submitting = false;
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("booking failed: {e}");
                self.error = Some(e.user_message(BOOKING_FAILED_MESSAGE));
                false
            }
        }
    }
}
