use super::*;

fn appt(id: i64, doctor: &str, patient: &str, date: &str, time: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        doctor_name: Some(doctor.to_owned()),
        patient_name: Some(patient.to_owned()),
        specialty: None,
        appointment_date: date.to_owned(),
        appointment_time: time.to_owned(),
        status,
        notes: None,
        location: None,
        image: None,
    }
}

fn day(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

fn sample() -> Vec<Appointment> {
    use AppointmentStatus::*;
    vec![
        appt(1, "Meera", "Asha Rao", "2025-11-20", "10:00", Confirmed),
        appt(2, "Ravi", "Vikram", "2025-11-18", "15:30:00", Confirmed),
        appt(3, "Meera", "asha rao", "2025-11-17", "09:00", Pending),
        appt(4, "Meera", "Kiran", "2025-11-10", "11:00", Completed),
        appt(5, "Ravi", "Kiran", "2025-11-17", "12:00", Cancelled),
    ]
}

fn loaded() -> AppointmentsState {
    let mut state = AppointmentsState::default();
    state.apply_load(Ok(sample()));
    state
}

// =============================================================
// Filters
// =============================================================

#[test]
fn upcoming_filter_shows_confirmed() {
    let mut state = loaded();
    state.filter = StatusFilter::Only(AppointmentStatus::Confirmed);
    let ids: Vec<_> = state.visible().iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(state.filter.patient_label(), "Upcoming");
    assert_eq!(state.filter.doctor_label(), "confirmed");
}

#[test]
fn search_is_case_insensitive_and_combines_with_filter() {
    let mut state = loaded();
    state.search = "ASHA".to_owned();
    assert_eq!(state.visible().len(), 2);
    state.filter = StatusFilter::Only(AppointmentStatus::Pending);
    assert_eq!(state.visible().iter().map(|a| a.id).collect::<Vec<_>>(), vec![3]);
}

#[test]
fn counts_by_status() {
    let state = loaded();
    assert_eq!(state.upcoming_count(), 2);
    assert_eq!(state.count(AppointmentStatus::Cancelled), 1);
}

#[test]
fn next_upcoming_is_earliest_future_confirmed() {
    let state = loaded();
    assert_eq!(state.next_upcoming(day("2025-11-17")).map(|a| a.id), Some(2));
    assert_eq!(state.next_upcoming(day("2025-11-19")).map(|a| a.id), Some(1));
    assert!(state.next_upcoming(day("2025-11-21")).is_none());
}

// =============================================================
// Actions
// =============================================================

#[test]
fn doctor_actions_follow_status() {
    let pending: Vec<_> = doctor_actions(AppointmentStatus::Pending).iter().map(|a| a.target).collect();
    assert_eq!(pending, vec![AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]);
    assert_eq!(doctor_actions(AppointmentStatus::Confirmed)[0].target, AppointmentStatus::Completed);
    assert!(doctor_actions(AppointmentStatus::Completed).is_empty());
    assert!(patient_can_cancel(AppointmentStatus::Confirmed));
    assert!(!patient_can_cancel(AppointmentStatus::Cancelled));
}

#[test]
fn successful_update_patches_local_status() {
    let mut state = loaded();
    assert!(state.begin_update(3));
    assert!(!state.begin_update(3));
    state.finish_update(3, AppointmentStatus::Confirmed, Ok(()));
    assert!(!state.is_updating(3));
    assert_eq!(state.items[2].status, AppointmentStatus::Confirmed);
}

#[test]
fn failed_update_keeps_status_and_reports() {
    let mut state = loaded();
    state.begin_update(1);
    state.finish_update(1, AppointmentStatus::Cancelled, Err(ApiError::Network("offline".to_owned())));
    assert_eq!(state.items[0].status, AppointmentStatus::Confirmed);
    assert_eq!(state.error.as_deref(), Some("Failed to update appointment."));
}

#[test]
fn failed_load_keeps_previous_items() {
    let mut state = loaded();
    state.begin_load();
    state.apply_load(Err(ApiError::Status { status: 500, body: String::new() }));
    assert!(!state.loading);
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.error.as_deref(), Some("Could not load appointments."));
}

// =============================================================
// Home page summaries
// =============================================================

#[test]
fn patient_stats_and_recent_doctors() {
    let items = sample();
    assert_eq!(patient_stats(&items), PatientStats { upcoming: 2, consultations: 5, doctors: 2 });
    let recent: Vec<_> = recent_doctors(&items).into_iter().map(|d| d.name).collect();
    assert_eq!(recent, vec!["Meera".to_owned(), "Ravi".to_owned()]);
    assert_eq!(recent_doctors(&items)[0].specialty, "General Physician");
}

#[test]
fn doctor_schedule_skips_cancelled_and_sorts() {
    let mut items = sample();
    items.push(appt(6, "Meera", "Zoya", "2025-11-17", "08:30", AppointmentStatus::Confirmed));
    let ids: Vec<_> = schedule_for(&items, day("2025-11-17")).iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![6, 3]);

    let stats = doctor_stats(&items, day("2025-11-17"));
    assert_eq!(stats, DoctorStats { today: 2, pending: 1, patients: 5, completed: 1 });
}
