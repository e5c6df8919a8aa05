use super::*;
use serde_json::json;

#[test]
fn user_accepts_numeric_or_string_id() {
    let a: User = serde_json::from_value(json!({"id": 7, "name": "Asha", "email": "a@x.io", "role": "doctor"})).unwrap();
    let b: User = serde_json::from_value(json!({"id": "7", "name": "Asha", "email": "a@x.io", "role": "doctor"})).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.role, Role::Doctor);
}

#[test]
fn unknown_role_maps_to_unknown() {
    let user: User = serde_json::from_value(json!({"id": 1, "name": "X", "role": "nurse"})).unwrap();
    assert_eq!(user.role, Role::Unknown);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Role::Customer).unwrap(), json!("customer"));
}

#[test]
fn doctor_accepts_detail_field_names() {
    let doctor: Doctor = serde_json::from_value(json!({
        "id": 3,
        "user_name": "Meera Rao",
        "specialization": "Cardiology",
        "profile_picture": "https://img/3.png",
        "clinic_address": "12 Park St",
        "consultation_fee": "750.00",
        "rating": 4.6,
        "availabilities": [{"day": "Monday", "start_time": "09:00:00", "end_time": "12:30:00"}]
    }))
    .unwrap();
    assert_eq!(doctor.name.as_deref(), Some("Meera Rao"));
    assert_eq!(doctor.consultation_fee, Some(750.0));
    assert_eq!(doctor.availabilities.len(), 1);
    assert_eq!(doctor.availabilities[0].start_time, "09:00:00");
}

#[test]
fn doctor_accepts_listing_field_names() {
    let doctor: Doctor = serde_json::from_value(json!({
        "id": 4,
        "name": "Kabir Shah",
        "specialty": "Dermatology",
        "experience": 9,
        "location": "Pune",
        "image": "https://img/4.png"
    }))
    .unwrap();
    assert_eq!(doctor.display_name(), "Kabir Shah");
    assert_eq!(doctor.specialization.as_deref(), Some("Dermatology"));
    assert_eq!(doctor.experience_years, Some(9));
    assert_eq!(doctor.clinic_address.as_deref(), Some("Pune"));
    assert_eq!(doctor.profile_picture.as_deref(), Some("https://img/4.png"));
}

#[test]
fn doctor_defaults_fill_missing_display_fields() {
    let doctor = Doctor { id: 9, ..Doctor::default() };
    assert_eq!(doctor.display_name(), "Unknown");
    assert_eq!(doctor.specialization_or_default(), "General Physician");
    assert_eq!(doctor.clinic_or_default(), "Clinic");
}

#[test]
fn doctor_route_key_prefers_slug() {
    let mut doctor = Doctor { id: 12, ..Doctor::default() };
    assert_eq!(doctor.route_key(), "12");
    doctor.slug = Some("dr-meera".to_owned());
    assert_eq!(doctor.route_key(), "dr-meera");
}

#[test]
fn availability_accepts_short_keys() {
    let a: Availability = serde_json::from_value(json!({"day": "friday", "start": "10:00", "end": "11:00"})).unwrap();
    assert_eq!(a.start_time, "10:00");
    assert_eq!(a.end_time, "11:00");
    assert!(a.id.is_none());
}

#[test]
fn appointment_status_maps_unknown_to_cancelled() {
    for (raw, expected) in [
        ("pending", AppointmentStatus::Pending),
        ("confirmed", AppointmentStatus::Confirmed),
        ("completed", AppointmentStatus::Completed),
        ("cancelled", AppointmentStatus::Cancelled),
        ("rejected", AppointmentStatus::Cancelled),
    ] {
        let status: AppointmentStatus = serde_json::from_value(json!(raw)).unwrap();
        assert_eq!(status, expected, "raw = {raw}");
    }
}

#[test]
fn confirmed_reads_as_upcoming_for_patients() {
    assert_eq!(AppointmentStatus::Confirmed.patient_label(), "Upcoming");
    assert_eq!(AppointmentStatus::Confirmed.as_str(), "confirmed");
}

#[test]
fn appointment_reads_customer_name_and_defaults() {
    let appt: Appointment = serde_json::from_value(json!({
        "id": 21,
        "customer_name": "Ravi Singh",
        "appointment_date": "2025-11-14",
        "appointment_time": "09:30:00",
        "status": "confirmed"
    }))
    .unwrap();
    assert_eq!(appt.patient_name.as_deref(), Some("Ravi Singh"));
    assert_eq!(appt.specialty_or_default(), "General Physician");
    assert_eq!(appt.location_or_default(), "Online");
    assert_eq!(appt.date(), NaiveDate::from_ymd_opt(2025, 11, 14));
    assert_eq!(appt.time(), NaiveTime::from_hms_opt(9, 30, 0));
}

#[test]
fn appointment_date_tolerates_timestamp() {
    let appt: Appointment = serde_json::from_value(json!({
        "id": 1,
        "appointment_date": "2025-11-14T00:00:00Z",
        "status": "pending"
    }))
    .unwrap();
    assert_eq!(appt.date(), NaiveDate::from_ymd_opt(2025, 11, 14));
}

#[test]
fn status_update_serializes_wire_value() {
    let body = serde_json::to_value(StatusUpdate { status: AppointmentStatus::Completed }).unwrap();
    assert_eq!(body, json!({"status": "completed"}));
}

#[test]
fn profile_response_tolerates_sparse_profile() {
    let resp: ProfileResponse = serde_json::from_value(json!({
        "role": "customer",
        "user": {"id": 5, "name": "Neha", "email": "n@x.io", "role": "customer"},
        "profile": {"age": "34", "blood_group": "O+"}
    }))
    .unwrap();
    assert_eq!(resp.role, Role::Customer);
    assert_eq!(resp.profile.age, Some(34));
    assert!(resp.profile.clinic_name.is_none());
}

#[test]
fn token_refresh_response_rotation_is_optional() {
    let resp: TokenRefreshResponse = serde_json::from_value(json!({"access": "a2"})).unwrap();
    assert!(resp.refresh.is_none());
}
