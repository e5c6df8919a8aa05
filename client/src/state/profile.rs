//! Profile editing, availability management, and dashboard tiles.
//!
//! SYSTEM CONTEXT
//! ==============
//! Doctors and patients share `GET/PATCH profile/me/`. The edit forms keep
//! raw input strings; [`ProfileForm::fields`] turns them into the JSON
//! object for the PATCH, containing only the fields of the viewer's role.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use serde_json::{Map, Value, json};

use crate::net::types::{Availability, AvailabilityRequest, Profile, ProfileResponse, Role};
use crate::util::slots;

pub const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

pub const MISSING_AVAILABILITY_FIELDS: &str = "Please fill all fields (day, start time, and end time).";
pub const END_BEFORE_START: &str = "End time must be later than start time.";
pub const WINDOW_TOO_LONG: &str = "Availability slot cannot exceed 8 hours.";
pub const MAX_WINDOW_MINUTES: i64 = 8 * 60;

pub const INVALID_EXPERIENCE: &str = "Experience must be a whole number of years.";
pub const INVALID_FEE: &str = "Consultation fee must be a number.";

/// Check an availability form before it is posted.
///
/// # Errors
///
/// Returns the message to show inline when a field is missing, the window
/// is empty or inverted, or it is longer than eight hours.
pub fn validate_availability(day: &str, start: &str, end: &str) -> Result<AvailabilityRequest, &'static str> {
    let day = day.trim();
    if day.is_empty() || start.trim().is_empty() || end.trim().is_empty() {
        return Err(MISSING_AVAILABILITY_FIELDS);
    }
    let (Some(start), Some(end)) = (slots::parse_wall_time(start), slots::parse_wall_time(end)) else {
        return Err(MISSING_AVAILABILITY_FIELDS);
    };
    if end <= start {
        return Err(END_BEFORE_START);
    }
    if (end - start).num_minutes() > MAX_WINDOW_MINUTES {
        return Err(WINDOW_TOO_LONG);
    }
    Ok(AvailabilityRequest { day: day.to_owned(), start_time: slots::hhmm(start), end_time: slots::hhmm(end) })
}

/// Availability windows grouped by day, days in first-seen order.
pub fn group_by_day(availabilities: &[Availability]) -> Vec<(String, Vec<Availability>)> {
    let mut groups: Vec<(String, Vec<Availability>)> = Vec::new();
    for window in availabilities {
        match groups.iter_mut().find(|(day, _)| day.eq_ignore_ascii_case(window.day.trim())) {
            Some((_, list)) => list.push(window.clone()),
            None => groups.push((window.day.trim().to_owned(), vec![window.clone()])),
        }
    }
    groups
}

/// `HH:MM – HH:MM` label for one window; raw text if unparseable.
pub fn window_label(window: &Availability) -> String {
    let fmt = |raw: &str| slots::normalize_hhmm(raw).unwrap_or_else(|| raw.to_owned());
    format!("{} \u{2013} {}", fmt(&window.start_time), fmt(&window.end_time))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DoctorForm {
    pub clinic_name: String,
    pub clinic_address: String,
    pub experience_years: String,
    pub consultation_fee: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatientForm {
    pub name: String,
    pub gender: String,
    pub address: String,
    pub medical_history: String,
    pub blood_group: String,
    pub emergency_contact: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileForm {
    Doctor(DoctorForm),
    Patient(PatientForm),
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn number_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ProfileForm {
    /// Prefill from the loaded profile; admins and unknown roles edit as
    /// patients.
    pub fn from_response(response: &ProfileResponse) -> Self {
        let profile = &response.profile;
        match response.role {
            Role::Doctor => Self::Doctor(DoctorForm {
                clinic_name: text(profile.clinic_name.as_ref()),
                clinic_address: text(profile.clinic_address.as_ref()),
                experience_years: number_text(profile.experience_years),
                consultation_fee: number_text(profile.consultation_fee),
                description: text(profile.description.as_ref()),
            }),
            Role::Customer | Role::Admin | Role::Unknown => Self::Patient(PatientForm {
                name: display_name(response),
                gender: text(profile.gender.as_ref()),
                address: text(profile.address.as_ref()),
                medical_history: text(profile.medical_history.as_ref()),
                blood_group: text(profile.blood_group.as_ref()),
                emergency_contact: text(profile.emergency_contact.as_ref()),
            }),
        }
    }

    /// The PATCH body. Blank inputs are omitted.
    ///
    /// # Errors
    ///
    /// Returns an inline message when a numeric doctor field does not parse.
    pub fn fields(&self) -> Result<Map<String, Value>, &'static str> {
        let mut out = Map::new();
        match self {
            Self::Doctor(form) => {
                put_text(&mut out, "clinic_name", &form.clinic_name);
                put_text(&mut out, "clinic_address", &form.clinic_address);
                put_text(&mut out, "description", &form.description);
                if let Some(years) = parse_optional::<i64>(&form.experience_years, INVALID_EXPERIENCE)? {
                    out.insert("experience_years".to_owned(), json!(years));
                }
                if let Some(fee) = parse_optional::<f64>(&form.consultation_fee, INVALID_FEE)? {
                    out.insert("consultation_fee".to_owned(), json!(fee));
                }
            }
            Self::Patient(form) => {
                put_text(&mut out, "name", &form.name);
                put_text(&mut out, "gender", &form.gender);
                put_text(&mut out, "address", &form.address);
                put_text(&mut out, "medical_history", &form.medical_history);
                put_text(&mut out, "blood_group", &form.blood_group);
                put_text(&mut out, "emergency_contact", &form.emergency_contact);
            }
        }
        Ok(out)
    }
}

fn put_text(out: &mut Map<String, Value>, key: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        out.insert(key.to_owned(), json!(value));
    }
}

fn parse_optional<T: std::str::FromStr>(raw: &str, message: &'static str) -> Result<Option<T>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| message)
}

/// Overlay the fields the server echoed after a PATCH onto the shown
/// profile. Absent fields keep their current value.
pub fn merge_profile(current: &mut Profile, update: Profile) {
    macro_rules! overlay {
        ($($field:ident),* $(,)?) => {
            $(if update.$field.is_some() { current.$field = update.$field; })*
        };
    }
    overlay!(
        user_name,
        user_email,
        phone,
        specialization,
        clinic_name,
        clinic_address,
        experience_years,
        consultation_fee,
        description,
        rating,
        age,
        gender,
        address,
        medical_history,
        blood_group,
        emergency_contact,
    );
    if !update.availabilities.is_empty() {
        current.availabilities = update.availabilities;
    }
}

/// Name shown in headers: the user record first, then the profile.
pub fn display_name(response: &ProfileResponse) -> String {
    response
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .filter(|n| !n.trim().is_empty())
        .or_else(|| response.profile.user_name.clone())
        .unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTile {
    pub title: &'static str,
    pub value: String,
}

fn tile(title: &'static str, value: String) -> StatTile {
    StatTile { title, value }
}

/// Dashboard tiles. `upcoming` is the patient's confirmed-appointment count.
pub fn stat_tiles(role: Role, profile: &Profile, upcoming: usize) -> Vec<StatTile> {
    if role == Role::Doctor {
        return vec![
            tile("Experience", format!("{} yrs", profile.experience_years.unwrap_or(0))),
            tile("Fee", format!("\u{20b9}{}", format_amount(profile.consultation_fee.unwrap_or(0.0)))),
            tile("Rating", format!("{:.1}\u{2605}", profile.rating.unwrap_or(0.0))),
        ];
    }
    vec![
        tile("Age", profile.age.map_or_else(|| "Not Set".to_owned(), |age| age.to_string())),
        tile("Blood", profile.blood_group.clone().filter(|b| !b.is_empty()).unwrap_or_else(|| "Unknown".to_owned())),
        tile("Appointments", format!("{upcoming} Upcoming")),
        tile("Emergency", profile.emergency_contact.clone().filter(|c| !c.is_empty()).unwrap_or_else(|| "N/A".to_owned())),
    ]
}

/// Whole amounts print without decimals; others with two.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 { format!("{amount:.0}") } else { format!("{amount:.2}") }
}
