// lib/src/views/filters.rs
use std::fmt;
use std::str::FromStr;

use crate::storage_engine::DataStore;
use models::{Appointment, AppointmentStatus, MedicalRecord, Role, ValidationError};

/// The All / Upcoming / Past toggle of the appointment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusBucket {
    #[default]
    All,
    /// Still scheduled.
    Upcoming,
    /// Completed or cancelled.
    Past,
}

impl StatusBucket {
    pub fn admits(&self, status: AppointmentStatus) -> bool {
        match self {
            StatusBucket::All => true,
            StatusBucket::Upcoming => status == AppointmentStatus::Scheduled,
            StatusBucket::Past => {
                matches!(status, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
            }
        }
    }
}

impl FromStr for StatusBucket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusBucket::All),
            "upcoming" => Ok(StatusBucket::Upcoming),
            "past" => Ok(StatusBucket::Past),
            _ => Err(ValidationError::InvalidValue(format!("unknown appointment filter: {}", s))),
        }
    }
}

impl fmt::Display for StatusBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusBucket::All => f.write_str("all"),
            StatusBucket::Upcoming => f.write_str("upcoming"),
            StatusBucket::Past => f.write_str("past"),
        }
    }
}

/// Extra toggle of the medical records page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFilter {
    #[default]
    None,
    HasAttachments,
}

/// Appointments owned by `user_id`: by doctor for doctors, by patient for
/// everyone else. Source order is kept.
pub fn select_by_role(appointments: &[Appointment], user_id: &str, role: Role) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| match role {
            Role::Doctor => appointment.doctor_id == user_id,
            Role::Patient | Role::Admin => appointment.patient_id == user_id,
        })
        .cloned()
        .collect()
}

pub fn filter_by_status_bucket(appointments: &[Appointment], bucket: StatusBucket) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| bucket.admits(appointment.status))
        .cloned()
        .collect()
}

/// Keeps the items where any extracted field contains `term`, ignoring case.
/// A blank term keeps everything.
pub fn filter_by_search_term<T, F>(items: &[T], term: &str, fields: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Vec<String>,
{
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| fields(*item).iter().any(|field| field.to_lowercase().contains(&needle)))
        .cloned()
        .collect()
}

/// Searchable text of an appointment: reason, date, time and the names of
/// both parties. A party that cannot be resolved contributes nothing.
pub fn appointment_search_fields(store: &dyn DataStore) -> impl Fn(&Appointment) -> Vec<String> + '_ {
    move |appointment: &Appointment| {
        let mut fields = vec![
            appointment.reason.clone(),
            appointment.date.to_string(),
            appointment.time_label(),
        ];
        if let Some(patient) = store.find_patient_by_id(&appointment.patient_id) {
            fields.push(patient.name.clone());
        }
        if let Some(doctor) = store.find_doctor_by_id(&appointment.doctor_id) {
            fields.push(doctor.name.clone());
        }
        fields
    }
}

/// Searchable text of a medical record: diagnosis, treatment and notes.
pub fn record_search_fields(record: &MedicalRecord) -> Vec<String> {
    let mut fields = vec![record.diagnosis.clone(), record.treatment.clone()];
    if let Some(notes) = &record.notes {
        fields.push(notes.clone());
    }
    fields
}

pub fn has_attachments(record: &MedicalRecord) -> bool {
    record.attachments.as_ref().is_some_and(|attachments| !attachments.is_empty())
}

/// Search and toggle of the records page; both must match.
pub fn filter_records(records: &[MedicalRecord], term: &str, filter: RecordFilter) -> Vec<MedicalRecord> {
    let matched = filter_by_search_term(records, term, record_search_fields);
    match filter {
        RecordFilter::None => matched,
        RecordFilter::HasAttachments => matched.into_iter().filter(has_attachments).collect(),
    }
}
