//! Wire DTOs for the booking REST API.
//!
//! DESIGN
//! ======
//! The backend is not consistent about field names or number encodings
//! (`user_name` vs `name`, decimal fees as strings, ids as numbers). These
//! types absorb that with serde aliases and lenient number deserializers so
//! pages can work with one shape per entity.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Account role as reported by the auth server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Doctor,
    Customer,
    Admin,
    #[default]
    Unknown,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "doctor",
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "doctor" => Self::Doctor,
            "customer" | "patient" => Self::Customer,
            "admin" => Self::Admin,
            _ => Self::Unknown,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

/// The authenticated user record stored alongside the token pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// A recurring weekly window during which a doctor accepts bookings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Day-of-week name, e.g. `"Monday"`. Compared case-insensitively.
    pub day: String,
    /// Wall-clock start, `HH:MM` or `HH:MM:SS`.
    #[serde(alias = "start")]
    pub start_time: String,
    /// Wall-clock end (exclusive), `HH:MM` or `HH:MM:SS`.
    #[serde(alias = "end")]
    pub end_time: String,
}

/// A doctor listing as returned by `doctors/` and `doctors/:id/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(default, rename = "user_name", alias = "name")]
    pub name: Option<String>,
    #[serde(default, rename = "user_email", alias = "email")]
    pub email: Option<String>,
    #[serde(default, alias = "specialty")]
    pub specialization: Option<String>,
    #[serde(default, alias = "image")]
    pub profile_picture: Option<String>,
    #[serde(default, alias = "location")]
    pub clinic_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_from_number")]
    pub consultation_fee: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_from_number")]
    pub rating: Option<f64>,
    #[serde(default, alias = "experience", deserialize_with = "deserialize_opt_i64_from_number")]
    pub experience_years: Option<i64>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub availabilities: Vec<Availability>,
}

impl Doctor {
    pub fn display_name(&self) -> String {
        self.name.clone().filter(|n| !n.trim().is_empty()).unwrap_or_else(|| "Unknown".to_owned())
    }

    pub fn specialization_or_default(&self) -> String {
        self.specialization
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "General Physician".to_owned())
    }

    pub fn clinic_or_default(&self) -> String {
        self.clinic_address.clone().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "Clinic".to_owned())
    }

    /// Path segment used for `/doctors/:id` links.
    pub fn route_key(&self) -> String {
        self.slug.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| self.id.to_string())
    }
}

/// Server-owned appointment lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Confirmed, Self::Completed, Self::Cancelled];

    /// Wire value, also used verbatim on doctor-facing pages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Patient-facing label; a confirmed visit reads as "Upcoming".
    pub fn patient_label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Upcoming",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "confirmed" | "upcoming" => Self::Confirmed,
            "completed" => Self::Completed,
            _ => Self::Cancelled,
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// An appointment as seen by either the patient or the doctor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default, alias = "customer_name")]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default, alias = "date")]
    pub appointment_date: String,
    #[serde(default, alias = "time")]
    pub appointment_time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Appointment {
    pub fn specialty_or_default(&self) -> String {
        self.specialty
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "General Physician".to_owned())
    }

    pub fn location_or_default(&self) -> String {
        self.location.clone().filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "Online".to_owned())
    }

    /// Calendar date, tolerating a full ISO timestamp in the date field.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.appointment_date.trim();
        let date_part = raw.split('T').next().unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    pub fn time(&self) -> Option<NaiveTime> {
        crate::util::slots::parse_wall_time(&self.appointment_time)
    }
}

/// `GET profile/me/` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub profile: Profile,
}

/// Role-specific profile fields; doctors and patients each fill a subset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,

    // Doctor fields.
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub clinic_address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub experience_years: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_from_number")]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_from_number")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub availabilities: Vec<Availability>,

    // Patient fields.
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub medical_history: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
    /// Present when the server rotates refresh tokens.
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST appointments/` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub doctor: i64,
    pub appointment_date: String,
    pub appointment_time: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
}

/// `POST availability/` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AvailabilityRequest {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// One prior turn sent as chat context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatTurn>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RecommendedResponse {
    #[serde(default)]
    pub recommended: Vec<Doctor>,
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    i64_from_value(&value).ok_or_else(|| D::Error::custom("expected integer-compatible number"))
}

fn deserialize_opt_i64_from_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(i64_from_value(&value))
}

fn deserialize_opt_f64_from_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn i64_from_value(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Some(int);
            }
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Some(float as i64);
            }
            None
        }
        serde_json::Value::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    }
}
