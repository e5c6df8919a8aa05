//! Appointment list state for the patient and doctor views.
//!
//! Both views hold the server list plus a filter. Status changes are sent as
//! `PATCH appointments/:id/` and patched into the local list once the server
//! accepts them; the list is re-fetched only on navigation or Refresh.

#[cfg(test)]
#[path = "appointments_test.rs"]
mod appointments_test;

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::net::error::ApiError;
use crate::net::types::{Appointment, AppointmentStatus};

/// Status filter shared by both views. Patients see `Confirmed` labelled
/// "Upcoming".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(AppointmentStatus),
}

impl StatusFilter {
    pub const CHOICES: [Self; 5] = [
        Self::All,
        Self::Only(AppointmentStatus::Pending),
        Self::Only(AppointmentStatus::Confirmed),
        Self::Only(AppointmentStatus::Completed),
        Self::Only(AppointmentStatus::Cancelled),
    ];

    pub fn matches(self, status: AppointmentStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    pub fn patient_label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(status) => status.patient_label(),
        }
    }

    pub fn doctor_label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

/// A status transition a doctor can trigger from a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoctorAction {
    pub label: &'static str,
    pub target: AppointmentStatus,
}

/// Pending visits can be confirmed or cancelled; confirmed ones completed.
pub fn doctor_actions(status: AppointmentStatus) -> &'static [DoctorAction] {
    static PENDING: [DoctorAction; 2] = [
        DoctorAction { label: "Confirm", target: AppointmentStatus::Confirmed },
        DoctorAction { label: "Cancel", target: AppointmentStatus::Cancelled },
    ];
    static CONFIRMED: [DoctorAction; 1] = [DoctorAction { label: "Mark Completed", target: AppointmentStatus::Completed }];
    match status {
        AppointmentStatus::Pending => &PENDING,
        AppointmentStatus::Confirmed => &CONFIRMED,
        AppointmentStatus::Completed | AppointmentStatus::Cancelled => &[],
    }
}

/// Patients may cancel anything that has not finished.
pub fn patient_can_cancel(status: AppointmentStatus) -> bool {
    matches!(status, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppointmentsState {
    pub items: Vec<Appointment>,
    pub filter: StatusFilter,
    /// Patient-name search; only the doctor view uses it.
    pub search: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Ids with a status update in flight.
    pub pending: HashSet<i64>,
}

impl Default for AppointmentsState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filter: StatusFilter::All,
            search: String::new(),
            loading: true,
            error: None,
            pending: HashSet::new(),
        }
    }
}

impl AppointmentsState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_load(&mut self, result: Result<Vec<Appointment>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(e) => {
                log::warn!("appointments fetch failed: {e}");
                self.error = Some(e.user_message("Could not load appointments."));
            }
        }
    }

    /// Items passing the status filter and, when non-empty, the
    /// case-insensitive patient-name search.
    pub fn visible(&self) -> Vec<Appointment> {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|a| self.filter.matches(a.status))
            .filter(|a| needle.is_empty() || a.patient_name.as_deref().unwrap_or("").to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn count(&self, status: AppointmentStatus) -> usize {
        self.items.iter().filter(|a| a.status == status).count()
    }

    pub fn upcoming_count(&self) -> usize {
        self.count(AppointmentStatus::Confirmed)
    }

    /// Earliest confirmed appointment on or after `today`.
    pub fn next_upcoming(&self, today: NaiveDate) -> Option<Appointment> {
        next_upcoming(&self.items, today)
    }

    /// Mark `id` as having an update in flight. Returns `false` if one is
    /// already running.
    pub fn begin_update(&mut self, id: i64) -> bool {
        self.pending.insert(id)
    }

    pub fn is_updating(&self, id: i64) -> bool {
        self.pending.contains(&id)
    }

    /// Patch the local copy once the server has accepted the change.
    pub fn finish_update(&mut self, id: i64, status: AppointmentStatus, result: Result<(), ApiError>) {
        self.pending.remove(&id);
        match result {
            Ok(()) => {
                if let Some(item) = self.items.iter_mut().find(|a| a.id == id) {
                    item.status = status;
                }
                self.error = None;
            }
            Err(e) => {
                log::warn!("status update for appointment {id} failed: {e}");
                self.error = Some(e.user_message("Failed to update appointment."));
            }
        }
    }
}

pub fn next_upcoming(items: &[Appointment], today: NaiveDate) -> Option<Appointment> {
    items
        .iter()
        .filter(|a| a.status == AppointmentStatus::Confirmed)
        .filter_map(|a| a.date().filter(|d| *d >= today).map(|d| (d, a.time(), a)))
        .min_by_key(|(date, time, _)| (*date, *time))
        .map(|(_, _, a)| a.clone())
}

/// Appointments on `date`, ordered by time.
pub fn schedule_for(items: &[Appointment], date: NaiveDate) -> Vec<Appointment> {
    let mut today: Vec<_> =
        items.iter().filter(|a| a.date() == Some(date) && a.status != AppointmentStatus::Cancelled).cloned().collect();
    today.sort_by_key(Appointment::time);
    today
}

/// Summary tiles on the patient home page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatientStats {
    pub upcoming: usize,
    pub consultations: usize,
    pub doctors: usize,
}

pub fn patient_stats(items: &[Appointment]) -> PatientStats {
    let doctors: HashSet<&str> = items.iter().filter_map(|a| a.doctor_name.as_deref()).collect();
    PatientStats {
        upcoming: items.iter().filter(|a| a.status == AppointmentStatus::Confirmed).count(),
        consultations: items.len(),
        doctors: doctors.len(),
    }
}

/// A doctor the patient has seen, derived from their appointment history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecentDoctor {
    pub name: String,
    pub specialty: String,
    pub image: Option<String>,
}

/// Distinct doctors in first-seen order.
pub fn recent_doctors(items: &[Appointment]) -> Vec<RecentDoctor> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|a| {
            let name = a.doctor_name.clone().filter(|n| !n.trim().is_empty())?;
            seen.insert(name.clone()).then(|| RecentDoctor {
                name,
                specialty: a.specialty_or_default(),
                image: a.image.clone(),
            })
        })
        .collect()
}

/// Counts on the doctor home page, computed from the doctor's own list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DoctorStats {
    pub today: usize,
    pub pending: usize,
    pub patients: usize,
    pub completed: usize,
}

pub fn doctor_stats(items: &[Appointment], today: NaiveDate) -> DoctorStats {
    let patients: HashSet<&str> = items.iter().filter_map(|a| a.patient_name.as_deref()).collect();
    DoctorStats {
        today: schedule_for(items, today).len(),
        pending: items.iter().filter(|a| a.status == AppointmentStatus::Pending).count(),
        patients: patients.len(),
        completed: items.iter().filter(|a| a.status == AppointmentStatus::Completed).count(),
    }
}
