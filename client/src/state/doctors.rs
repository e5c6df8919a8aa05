//! Doctor directory filtering.

#[cfg(test)]
#[path = "doctors_test.rs"]
mod doctors_test;

use crate::net::error::ApiError;
use crate::net::types::Doctor;

#[derive(Clone, Debug, PartialEq)]
pub struct DoctorsState {
    pub items: Vec<Doctor>,
    pub search: String,
    /// Empty means every specialty.
    pub specialty: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DoctorsState {
    fn default() -> Self {
        Self { items: Vec::new(), search: String::new(), specialty: String::new(), loading: true, error: None }
    }
}

impl DoctorsState {
    pub fn apply_load(&mut self, result: Result<Vec<Doctor>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                log::warn!("doctor list fetch failed: {e}");
                self.error = Some(e.user_message("Failed to load doctors. Please try again later."));
            }
        }
    }

    /// Doctors whose name contains the search text and whose specialty
    /// equals the selected one, both case-insensitively.
    pub fn visible(&self) -> Vec<Doctor> {
        let needle = self.search.trim().to_lowercase();
        let specialty = self.specialty.trim().to_lowercase();
        self.items
            .iter()
            .filter(|d| needle.is_empty() || d.display_name().to_lowercase().contains(&needle))
            .filter(|d| specialty.is_empty() || d.specialization_or_default().to_lowercase() == specialty)
            .cloned()
            .collect()
    }

    /// Distinct specialties in first-seen order, for the filter dropdown.
    pub fn specialties(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for doctor in &self.items {
            let Some(name) = doctor.specialization.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
                continue;
            };
            if !out.iter().any(|seen| seen.eq_ignore_ascii_case(name)) {
                out.push(name.to_owned());
            }
        }
        out
    }
}
