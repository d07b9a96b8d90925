// lib/src/views/mod.rs

//! Pure derivations from the data store to what the pages render. Nothing
//! here mutates the store or caches results; every call returns fresh
//! collections.

pub mod filters;
pub mod grouping;

pub use filters::{
    appointment_search_fields, filter_by_search_term, filter_by_status_bucket, filter_records,
    has_attachments, record_search_fields, select_by_role, RecordFilter, StatusBucket,
};
pub use grouping::{display_date, group_by_period, Dated, Granularity, Period, PeriodGroup};

use crate::storage_engine::DataStore;
use models::{Appointment, MedicalRecord, Role, UserProfile};

/// UI state of the appointments page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentQuery {
    pub bucket: StatusBucket,
    pub search: String,
}

/// UI state of the medical records page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub search: String,
    pub filter: RecordFilter,
}

/// The appointments page: the viewer's appointments, narrowed by the status
/// toggle and the search box together, grouped by month.
pub fn derive_appointment_view(
    store: &dyn DataStore,
    viewer: &UserProfile,
    query: &AppointmentQuery,
) -> Vec<PeriodGroup<Appointment>> {
    let owned = select_by_role(store.appointments(), viewer.id(), viewer.role());
    let bucketed = filter_by_status_bucket(&owned, query.bucket);
    let matched = filter_by_search_term(&bucketed, &query.search, appointment_search_fields(store));
    group_by_period(&matched, Granularity::Month)
}

/// The medical records page for one patient, grouped by year.
pub fn derive_record_view(
    store: &dyn DataStore,
    patient_id: &str,
    query: &RecordQuery,
) -> Vec<PeriodGroup<MedicalRecord>> {
    let records = store.list_medical_records_by_patient(patient_id);
    let matched = filter_records(&records, &query.search, query.filter);
    group_by_period(&matched, Granularity::Year)
}

/// Name of the other party shown on an appointment row: the doctor for a
/// patient, the patient for a doctor. `None` when it cannot be resolved or
/// the viewer is an admin.
pub fn counterpart_name<'a>(store: &'a dyn DataStore, appointment: &Appointment, viewer: Role) -> Option<&'a str> {
    match viewer {
        Role::Patient => store.find_doctor_by_id(&appointment.doctor_id).map(|d| d.name.as_str()),
        Role::Doctor => store.find_patient_by_id(&appointment.patient_id).map(|p| p.name.as_str()),
        Role::Admin => None,
    }
}
