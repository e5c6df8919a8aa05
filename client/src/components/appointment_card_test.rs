use super::*;

fn appointment(date: &str, time: &str) -> Appointment {
    Appointment {
        id: 1,
        doctor_name: Some("Meera".to_owned()),
        patient_name: None,
        specialty: None,
        appointment_date: date.to_owned(),
        appointment_time: time.to_owned(),
        status: AppointmentStatus::Confirmed,
        notes: None,
        location: None,
        image: None,
    }
}

#[test]
fn when_label_formats_date_and_time() {
    assert_eq!(when_label(&appointment("2025-11-17", "14:30:00")), "Mon, 17 Nov 2025 \u{b7} 2:30 PM");
}

#[test]
fn when_label_keeps_unparseable_parts() {
    assert_eq!(when_label(&appointment("soon", "09:00")), "soon \u{b7} 9:00 AM");
}

#[test]
fn badge_class_tracks_status() {
    assert_eq!(badge_class(AppointmentStatus::Cancelled), "badge badge--cancelled");
}
