//! Typed endpoint calls for the booking REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page talks to the backend through these functions. They are generic
//! over the [`ApiClient`] transport and store so tests can drive them with a
//! scripted transport; in the browser they run against
//! [`super::http::browser_client`].
//!
//! ERROR HANDLING
//! ==============
//! All calls return `Result<_, ApiError>`. Pages map errors to text at the
//! boundary with [`ApiError::user_message`]; registration additionally
//! splits field errors out with [`register_errors`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use super::envelope::{parse_list, parse_object};
use super::error::{ApiError, server_message};
use super::http::{ApiClient, ApiRequest, Transport};
use super::types::{
    Appointment, AppointmentStatus, AvailabilityRequest, BookingRequest, ChatReply, ChatRequest, Doctor, LoginRequest,
    LoginResponse, Profile, ProfileResponse, RecommendedResponse, RegisterRequest, RegisterResponse, StatusUpdate,
};
use crate::util::slots;
use crate::util::storage::SessionStore;

pub const LOGIN_PATH: &str = "login/";
pub const REGISTER_PATH: &str = "user-register/";
pub const DOCTORS_PATH: &str = "doctors/";
pub const APPOINTMENTS_PATH: &str = "appointments/";
pub const HOMEPAGE_PATH: &str = "homepage";
pub const PROFILE_PATH: &str = "profile/me/";
pub const AVAILABILITY_PATH: &str = "availability/";
pub const CHAT_PATH: &str = "chat/";

pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed!";
pub const SERVER_UNREACHABLE_MESSAGE: &str = "Server not responding. Please try again later.";

fn doctor_path(key: &str) -> String {
    format!("{DOCTORS_PATH}{key}/")
}

fn recommended_path(doctor_id: i64) -> String {
    format!("recommend/from-doctor/{doctor_id}/")
}

fn appointment_path(id: i64) -> String {
    format!("{APPOINTMENTS_PATH}{id}/")
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST login/`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] for rejected credentials.
pub async fn login<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    email: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    let body = LoginRequest { email: email.trim().to_owned(), password: password.to_owned() };
    client.send_json(ApiRequest::post(LOGIN_PATH, &body)?.anonymous()).await
}

/// `POST user-register/`.
///
/// # Errors
///
/// Returns [`ApiError::Status`] with the validation body on rejection; see
/// [`register_errors`].
pub async fn register<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    request: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    let response = client.send(ApiRequest::post(REGISTER_PATH, request)?.anonymous()).await?;
    Ok(response.json::<Option<RegisterResponse>>()?.unwrap_or_default())
}

/// Registration failure split into per-field messages and a general line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterErrors {
    /// First message for each rejected field.
    pub fields: BTreeMap<String, String>,
    pub general: Option<String>,
}

impl RegisterErrors {
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_none()
    }
}

/// Interpret a failed registration. Field errors arrive as
/// `{errors: {field: [msg]}}` or as a bare `{field: [msg]}` map; `detail` or
/// `message` carries a general error.
pub fn register_errors(error: &ApiError) -> RegisterErrors {
    let ApiError::Status { body, .. } = error else {
        return RegisterErrors { general: Some(SERVER_UNREACHABLE_MESSAGE.to_owned()), ..RegisterErrors::default() };
    };
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
        return RegisterErrors { general: Some(REGISTER_FAILED_MESSAGE.to_owned()), ..RegisterErrors::default() };
    };

    let field_map = match map.get("errors") {
        Some(Value::Object(errors)) => errors,
        _ => &map,
    };
    let fields = field_map
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "detail" | "message" | "success" | "errors"))
        .filter_map(|(key, value)| first_message(value).map(|msg| (key.clone(), msg)))
        .collect::<BTreeMap<_, _>>();

    let mut general = server_message(body);
    if general.is_none() && fields.is_empty() {
        general = Some(REGISTER_FAILED_MESSAGE.to_owned());
    }
    RegisterErrors { fields, general }
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(msg) => Some(msg.clone()),
        Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

// =============================================================================
// DOCTORS
// =============================================================================

/// `GET doctors/`.
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn list_doctors<T: Transport, S: SessionStore>(client: &ApiClient<T, S>) -> Result<Vec<Doctor>, ApiError> {
    let payload: Value = client.send_json(ApiRequest::get(DOCTORS_PATH)).await?;
    Ok(parse_list(payload)?)
}

/// `GET doctors/:key/` where `key` is a slug or numeric id.
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn fetch_doctor<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    key: &str,
) -> Result<Doctor, ApiError> {
    let payload: Value = client.send_json(ApiRequest::get(doctor_path(key))).await?;
    Ok(parse_object(payload)?)
}

/// `GET recommend/from-doctor/:id/`.
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn recommended_doctors<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    doctor_id: i64,
) -> Result<Vec<Doctor>, ApiError> {
    let response: Option<RecommendedResponse> = client.send_json(ApiRequest::get(recommended_path(doctor_id))).await?;
    Ok(response.unwrap_or_default().recommended)
}

// =============================================================================
// APPOINTMENTS
// =============================================================================

/// `GET appointments/`: the caller's own appointments.
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn list_appointments<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
) -> Result<Vec<Appointment>, ApiError> {
    let payload: Value = client.send_json(ApiRequest::get(APPOINTMENTS_PATH)).await?;
    Ok(parse_list(payload)?)
}

/// `GET homepage`: the patient home feed (an appointment list).
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn fetch_homepage<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
) -> Result<Vec<Appointment>, ApiError> {
    let payload: Value = client.send_json(ApiRequest::get(HOMEPAGE_PATH)).await?;
    Ok(parse_list(payload)?)
}

/// `GET appointments/?doctor=:id&date=YYYY-MM-DD`, normalized to local
/// wall-clock start times.
///
/// # Errors
///
/// Returns transport or status errors; unreadable entries are skipped.
pub async fn booked_times<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    doctor_id: i64,
    date: NaiveDate,
) -> Result<BTreeSet<NaiveTime>, ApiError> {
    let request = ApiRequest::get(APPOINTMENTS_PATH).query("doctor", doctor_id).query("date", slots::format_date(date));
    let payload: Value = client.send_json(request).await?;
    Ok(slots::booked_times(payload))
}

/// `POST appointments/`.
///
/// # Errors
///
/// Returns transport or status errors.
pub async fn create_appointment<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    doctor_id: i64,
    date: NaiveDate,
    time: NaiveTime,
    notes: &str,
) -> Result<(), ApiError> {
    let body = BookingRequest {
        doctor: doctor_id,
        appointment_date: slots::format_date(date),
        appointment_time: slots::hhmm(time),
        notes: notes.trim().to_owned(),
    };
    client.send(ApiRequest::post(APPOINTMENTS_PATH, &body)?).await?;
    Ok(())
}

/// `PATCH appointments/:id/ {status}`.
///
/// # Errors
///
/// Returns transport or status errors.
pub async fn update_appointment_status<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    id: i64,
    status: AppointmentStatus,
) -> Result<(), ApiError> {
    client.send(ApiRequest::patch(appointment_path(id), &StatusUpdate { status })?).await?;
    Ok(())
}

// =============================================================================
// PROFILE
// =============================================================================

/// `GET profile/me/`.
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn fetch_profile<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
) -> Result<ProfileResponse, ApiError> {
    let payload: Value = client.send_json(ApiRequest::get(PROFILE_PATH)).await?;
    Ok(parse_object(payload)?)
}

/// `PATCH profile/me/` with only the changed role fields. Returns whatever
/// profile fields the server echoes back.
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn update_profile<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    fields: &serde_json::Map<String, Value>,
) -> Result<Profile, ApiError> {
    let payload: Value = client.send_json(ApiRequest::patch(PROFILE_PATH, fields)?).await?;
    if payload.is_null() {
        return Ok(Profile::default());
    }
    Ok(parse_object(payload)?)
}

/// `POST availability/`.
///
/// # Errors
///
/// Returns transport or status errors.
pub async fn add_availability<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    request: &AvailabilityRequest,
) -> Result<(), ApiError> {
    client.send(ApiRequest::post(AVAILABILITY_PATH, request)?).await?;
    Ok(())
}

// =============================================================================
// CHAT
// =============================================================================

/// `POST chat/`.
///
/// # Errors
///
/// Returns transport, status, or decode errors.
pub async fn send_chat<T: Transport, S: SessionStore>(
    client: &ApiClient<T, S>,
    request: &ChatRequest,
) -> Result<String, ApiError> {
    let reply: ChatReply = client.send_json(ApiRequest::post(CHAT_PATH, request)?).await?;
    Ok(reply.reply)
}
