use super::*;

fn doctor(id: i64, name: &str, specialty: Option<&str>) -> Doctor {
    Doctor {
        id,
        name: Some(name.to_owned()),
        specialization: specialty.map(str::to_owned),
        ..Doctor::default()
    }
}

fn loaded() -> DoctorsState {
    let mut state = DoctorsState::default();
    state.apply_load(Ok(vec![
        doctor(1, "Meera Iyer", Some("Cardiology")),
        doctor(2, "Ravi Kumar", Some("Dermatology")),
        doctor(3, "Meenal Shah", Some("cardiology")),
        doctor(4, "Arun Das", None),
    ]));
    state
}

fn ids(list: &[Doctor]) -> Vec<i64> {
    list.iter().map(|d| d.id).collect()
}

#[test]
fn search_matches_name_substring() {
    let mut state = loaded();
    state.search = "mee".to_owned();
    assert_eq!(ids(&state.visible()), vec![1, 3]);
}

#[test]
fn specialty_filter_is_case_insensitive() {
    let mut state = loaded();
    state.specialty = "CARDIOLOGY".to_owned();
    assert_eq!(ids(&state.visible()), vec![1, 3]);
    state.search = "ravi".to_owned();
    assert!(state.visible().is_empty());
}

#[test]
fn missing_specialty_matches_default_label() {
    let mut state = loaded();
    state.specialty = "General Physician".to_owned();
    assert_eq!(ids(&state.visible()), vec![4]);
}

#[test]
fn specialties_are_distinct_in_first_seen_order() {
    assert_eq!(loaded().specialties(), vec!["Cardiology".to_owned(), "Dermatology".to_owned()]);
}

#[test]
fn route_key_prefers_slug() {
    let mut d = doctor(9, "Asha", None);
    assert_eq!(d.route_key(), "9");
    d.slug = Some("dr-asha".to_owned());
    assert_eq!(d.route_key(), "dr-asha");
}

#[test]
fn load_failure_is_reported() {
    let mut state = DoctorsState::default();
    state.apply_load(Err(ApiError::Network("offline".to_owned())));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("Failed to load doctors. Please try again later."));
}
