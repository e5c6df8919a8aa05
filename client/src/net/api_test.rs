use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::http::Method;
use crate::net::test_support::{ScriptedTransport, client, logged_in_store};
use crate::net::types::{ChatTurn, Role};

fn date(raw: &str) -> NaiveDate {
    slots::parse_date(raw).unwrap()
}

// =============================================================
// Paths
// =============================================================

#[test]
fn endpoint_paths_end_with_slash() {
    assert_eq!(doctor_path("dr-meera"), "doctors/dr-meera/");
    assert_eq!(recommended_path(7), "recommend/from-doctor/7/");
    assert_eq!(appointment_path(12), "appointments/12/");
}

// =============================================================
// Auth
// =============================================================

#[test]
fn login_is_anonymous_and_decodes_tokens() {
    let transport = ScriptedTransport::with(&[(
        200,
        r#"{"access":"a9","refresh":"r9","user":{"id":"4","name":"Ravi","email":"r@x.io","role":"doctor"}}"#,
    )]);
    let store = logged_in_store();
    let api = client(&transport, &store);

    let response = block_on(login(&api, " r@x.io ", "pw")).unwrap();
    assert_eq!(response.access, "a9");
    assert_eq!(response.user.map(|u| (u.id, u.role)), Some((4, Role::Doctor)));

    let sent = transport.request(0);
    assert!(sent.bearer.is_none());
    assert_eq!(sent.body, Some(json!({"email": "r@x.io", "password": "pw"})));
}

#[test]
fn register_posts_role() {
    let transport = ScriptedTransport::with(&[(201, r#"{"success":true,"message":"ok"}"#)]);
    let store = logged_in_store();
    let request = RegisterRequest {
        name: "Asha".to_owned(),
        email: "a@x.io".to_owned(),
        password: "secret".to_owned(),
        role: Role::Customer,
    };
    let response = block_on(register(&client(&transport, &store), &request)).unwrap();
    assert!(response.success);
    assert_eq!(transport.request(0).body.unwrap()["role"], json!("customer"));
}

#[test]
fn register_errors_reads_nested_field_map() {
    let err = ApiError::Status {
        status: 400,
        body: r#"{"errors":{"email":["Email already registered.","other"],"password":["Too short."]}}"#.to_owned(),
    };
    let errors = register_errors(&err);
    assert_eq!(errors.field("email").as_deref(), Some("Email already registered."));
    assert_eq!(errors.field("password").as_deref(), Some("Too short."));
    assert!(errors.general.is_none());
}

#[test]
fn register_errors_reads_bare_field_map_and_detail() {
    let err = ApiError::Status {
        status: 400,
        body: r#"{"name":["This field is required."],"detail":"Fix the errors below."}"#.to_owned(),
    };
    let errors = register_errors(&err);
    assert_eq!(errors.field("name").as_deref(), Some("This field is required."));
    assert_eq!(errors.general.as_deref(), Some("Fix the errors below."));
    assert!(errors.field("detail").is_none());
}

#[test]
fn register_errors_without_response_reports_unreachable() {
    let errors = register_errors(&ApiError::Timeout);
    assert_eq!(errors.general.as_deref(), Some(SERVER_UNREACHABLE_MESSAGE));
    assert!(errors.fields.is_empty());
}

#[test]
fn register_errors_unreadable_body_is_generic() {
    let errors = register_errors(&ApiError::Status { status: 500, body: "<html>".to_owned() });
    assert_eq!(errors.general.as_deref(), Some(REGISTER_FAILED_MESSAGE));
}

// =============================================================
// Doctors
// =============================================================

#[test]
fn list_doctors_accepts_wrapped_list() {
    let transport = ScriptedTransport::with(&[(
        200,
        r#"{"results":[{"id":1,"user_name":"Meera","specialization":"Cardiology","consultation_fee":"500.00"}]}"#,
    )]);
    let store = logged_in_store();
    let doctors = block_on(list_doctors(&client(&transport, &store))).unwrap();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].consultation_fee, Some(500.0));
    assert_eq!(transport.request(0).bearer.as_deref(), Some("a1"));
}

#[test]
fn fetch_doctor_unwraps_data() {
    let transport = ScriptedTransport::with(&[(200, r#"{"data":{"id":3,"name":"Ravi","slug":"ravi"}}"#)]);
    let store = logged_in_store();
    let doctor = block_on(fetch_doctor(&client(&transport, &store), "ravi")).unwrap();
    assert_eq!(doctor.display_name(), "Ravi");
    assert!(transport.request(0).url.ends_with("/doctors/ravi/"));
}

#[test]
fn recommended_doctors_tolerates_missing_key() {
    let transport = ScriptedTransport::with(&[(200, "{}")]);
    let store = logged_in_store();
    assert!(block_on(recommended_doctors(&client(&transport, &store), 3)).unwrap().is_empty());
}

// =============================================================
// Appointments
// =============================================================

#[test]
fn booked_times_sends_doctor_and_date_query() {
    let transport = ScriptedTransport::with(&[(200, r#"[{"appointment_time":"10:00:00"}]"#)]);
    let store = logged_in_store();
    let booked = block_on(booked_times(&client(&transport, &store), 5, date("2025-11-17"))).unwrap();
    assert!(booked.contains(&slots::parse_wall_time("10:00").unwrap()));
    assert_eq!(
        transport.request(0).query,
        vec![("doctor".to_owned(), "5".to_owned()), ("date".to_owned(), "2025-11-17".to_owned())]
    );
}

#[test]
fn create_appointment_posts_wire_body() {
    let transport = ScriptedTransport::with(&[(201, r#"{"id":40}"#)]);
    let store = logged_in_store();
    let time = slots::parse_wall_time("9:30").unwrap();
    block_on(create_appointment(&client(&transport, &store), 5, date("2025-11-17"), time, "  cough ")).unwrap();

    let sent = transport.request(0);
    assert_eq!(sent.method, Method::Post);
    assert_eq!(
        sent.body,
        Some(json!({"doctor": 5, "appointment_date": "2025-11-17", "appointment_time": "09:30", "notes": "cough"}))
    );
}

#[test]
fn update_status_patches_appointment() {
    let transport = ScriptedTransport::with(&[(200, "")]);
    let store = logged_in_store();
    block_on(update_appointment_status(&client(&transport, &store), 12, AppointmentStatus::Cancelled)).unwrap();
    let sent = transport.request(0);
    assert_eq!(sent.method, Method::Patch);
    assert!(sent.url.ends_with("/appointments/12/"));
    assert_eq!(sent.body, Some(json!({"status": "cancelled"})));
}

#[test]
fn list_appointments_surfaces_status_errors() {
    let transport = ScriptedTransport::with(&[(403, r#"{"detail":"Forbidden"}"#)]);
    let store = logged_in_store();
    let err = block_on(list_appointments(&client(&transport, &store))).unwrap_err();
    assert_eq!(err.user_message("Could not load appointments."), "Forbidden");
}

#[test]
fn homepage_reads_appointment_envelope() {
    let transport = ScriptedTransport::with(&[(
        200,
        r#"{"appointments":[{"id":1,"doctor_name":"Meera","date":"2025-11-20","time":"10:00","status":"confirmed"}]}"#,
    )]);
    let store = logged_in_store();
    let list = block_on(fetch_homepage(&client(&transport, &store))).unwrap();
    assert_eq!(list[0].status, AppointmentStatus::Confirmed);
    assert!(transport.request(0).url.ends_with("/homepage"));
}

// =============================================================
// Profile and chat
// =============================================================

#[test]
fn update_profile_sends_only_given_fields() {
    let transport = ScriptedTransport::with(&[(200, r#"{"clinic_name":"City Clinic"}"#)]);
    let store = logged_in_store();
    let mut fields = serde_json::Map::new();
    fields.insert("clinic_name".to_owned(), json!("City Clinic"));

    let profile = block_on(update_profile(&client(&transport, &store), &fields)).unwrap();
    assert_eq!(profile.clinic_name.as_deref(), Some("City Clinic"));
    assert_eq!(transport.request(0).body, Some(json!({"clinic_name": "City Clinic"})));
}

#[test]
fn send_chat_returns_reply_text() {
    let transport = ScriptedTransport::with(&[(200, r#"{"reply":"Drink water."}"#)]);
    let store = logged_in_store();
    let request = ChatRequest {
        message: "headache".to_owned(),
        history: vec![ChatTurn { role: "assistant".to_owned(), content: "Hi!".to_owned() }],
    };
    assert_eq!(block_on(send_chat(&client(&transport, &store), &request)).unwrap(), "Drink water.");
    assert_eq!(transport.request(0).body.unwrap()["history"][0]["role"], json!("assistant"));
}
