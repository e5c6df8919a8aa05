use super::*;

#[test]
fn user_message_prefers_server_detail() {
    let err = ApiError::Status { status: 400, body: r#"{"detail":"Slot already taken"}"#.to_owned() };
    assert_eq!(err.user_message("Failed to book appointment."), "Slot already taken");
}

#[test]
fn user_message_falls_back_on_opaque_body() {
    let err = ApiError::Status { status: 500, body: "<html>oops</html>".to_owned() };
    assert_eq!(err.user_message("Failed to load doctors."), "Failed to load doctors.");
}

#[test]
fn session_expired_has_fixed_message() {
    assert_eq!(ApiError::SessionExpired.user_message("x"), "Session expired. Please log in again.");
}

#[test]
fn status_accessor_only_for_status_errors() {
    assert_eq!(ApiError::Status { status: 404, body: String::new() }.status(), Some(404));
    assert_eq!(ApiError::Timeout.status(), None);
}

#[test]
fn server_message_reads_message_key() {
    assert_eq!(server_message(r#"{"message":"Email taken"}"#), Some("Email taken".to_owned()));
    assert_eq!(server_message(r#"{"message":"  "}"#), None);
}
