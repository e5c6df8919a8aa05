//! Bookable time-slot generation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The booking modal turns a doctor's weekly availability windows into a
//! list of 30-minute start times for one calendar date, then marks the ones
//! that are already booked or already in the past. Everything here is pure:
//! the current time is passed in, never read, so the rules are testable.
//!
//! RULES
//! =====
//! - Windows match the selected date by weekday name, case-insensitively.
//! - Each window yields starts from `start` (inclusive) to `end` (exclusive).
//! - Overlapping windows are unioned; output is sorted and deduplicated.
//! - On today's date, starts earlier than `now` are dropped outright.
//! - Marking never removes a slot; booked or past slots are only disabled.

#[cfg(test)]
#[path = "slots_test.rs"]
mod slots_test;

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Weekday};
use serde_json::Value;

use crate::net::envelope::list_items;
use crate::net::types::Availability;

pub const SLOT_MINUTES: u32 = 30;

pub const SELECT_DATE_TIME_MESSAGE: &str = "Please select date and time";
pub const NO_SLOTS_MESSAGE: &str = "No slots available for this day.";

/// Fields a booked-appointment record may carry its start time under, in
/// priority order.
const BOOKED_TIME_FIELDS: [&str; 5] = ["appointment_time", "time", "slot", "start_time", "appointment_time_display"];

/// Parse `H:MM`, `HH:MM`, or `HH:MM:SS`. Seconds are accepted and dropped.
pub fn parse_wall_time(raw: &str) -> Option<NaiveTime> {
    let mut parts = raw.trim().split(':');
    let hour = parse_component(parts.next()?)?;
    let minute = parse_component(parts.next()?)?;
    if let Some(seconds) = parts.next() {
        parse_component(seconds)?;
    }
    if parts.next().is_some() {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_component(raw: &str) -> Option<u32> {
    if raw.is_empty() || raw.len() > 2 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Canonical `HH:MM` rendering used on the wire and as the slot key.
pub fn hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn normalize_hhmm(raw: &str) -> Option<String> {
    parse_wall_time(raw).map(hhmm)
}

/// 12-hour label for a slot button, e.g. `9:30 AM`.
pub fn display_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// 30-minute starts in `[start, end)`. An inverted or empty window yields
/// nothing.
pub fn window_slots(start: NaiveTime, end: NaiveTime) -> Vec<NaiveTime> {
    let start_min = start.hour() * 60 + start.minute();
    let end_min = end.hour() * 60 + end.minute();
    (start_min..end_min)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
        .collect()
}

/// Every start time offered on `date`, with already-elapsed starts removed
/// when `date` is today.
pub fn offered_slots(availabilities: &[Availability], date: NaiveDate, now: NaiveDateTime) -> Vec<NaiveTime> {
    let day = weekday_name(date);
    let mut times = BTreeSet::new();
    for window in availabilities.iter().filter(|a| a.day.trim().eq_ignore_ascii_case(day)) {
        let (Some(start), Some(end)) = (parse_wall_time(&window.start_time), parse_wall_time(&window.end_time)) else {
            log::debug!("skipping unparseable availability window {window:?}");
            continue;
        };
        times.extend(window_slots(start, end));
    }

    let is_today = date == now.date();
    times.into_iter().filter(|t| !is_today || date.and_time(*t) >= now).collect()
}

/// Booked start times from a `GET appointments/?doctor&date` payload, in the
/// browser's local time.
pub fn booked_times(payload: Value) -> BTreeSet<NaiveTime> {
    booked_times_in(payload, &Local)
}

/// [`booked_times`] with an explicit zone for ISO timestamps.
pub fn booked_times_in<Tz: TimeZone>(payload: Value, zone: &Tz) -> BTreeSet<NaiveTime> {
    list_items(payload)
        .iter()
        .filter_map(|item| BOOKED_TIME_FIELDS.iter().find_map(|field| item.get(*field).and_then(Value::as_str)))
        .filter_map(|raw| booked_wall_time(raw, zone))
        .collect()
}

fn booked_wall_time<Tz: TimeZone>(raw: &str, zone: &Tz) -> Option<NaiveTime> {
    let raw = raw.trim();
    if !raw.contains('T') {
        return parse_wall_time(raw);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(zone).time().with_second(0)?.with_nanosecond(0)?);
    }
    // Zone-less timestamps are already wall-clock.
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .and_then(|stamp| NaiveTime::from_hms_opt(stamp.hour(), stamp.minute(), 0))
}

/// A rendered slot button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub time: NaiveTime,
    pub booked: bool,
    pub past: bool,
}

impl Slot {
    pub fn disabled(&self) -> bool {
        self.booked || self.past
    }

    pub fn key(&self) -> String {
        hhmm(self.time)
    }
}

/// Mark each offered time as booked and/or past. The output has exactly one
/// entry per offered time.
pub fn mark_slots(
    offered: &[NaiveTime],
    booked: &BTreeSet<NaiveTime>,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<Slot> {
    offered
        .iter()
        .map(|&time| Slot { time, booked: booked.contains(&time), past: date.and_time(time) < now })
        .collect()
}

/// Pre-flight check run before any network call.
///
/// # Errors
///
/// Returns [`SELECT_DATE_TIME_MESSAGE`] when either value is missing.
pub fn validate_booking(
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
) -> Result<(NaiveDate, NaiveTime), &'static str> {
    match (date, time) {
        (Some(date), Some(time)) => Ok((date, time)),
        _ => Err(SELECT_DATE_TIME_MESSAGE),
    }
}

/// Move `date` by `days` for the Prev/Next buttons, saturating at the
/// calendar bounds.
pub fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 { date.checked_add_days(step) } else { date.checked_sub_days(step) };
    shifted.unwrap_or(date)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Browser-local wall clock, the `now` every page passes into the pure
/// functions above.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
