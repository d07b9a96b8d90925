// lib/src/dashboards.rs

//! Summaries behind the three role dashboards. `today` is always passed in
//! so the results are reproducible.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::storage_engine::DataStore;
use crate::views::{filter_by_status_bucket, Dated, StatusBucket};
use models::{Appointment, AppointmentStatus, Doctor, MedicalRecord, Patient, Prescription, User};

const PATIENT_UPCOMING_LIMIT: usize = 3;
const PATIENT_RECENT_RECORDS_LIMIT: usize = 3;
const DOCTOR_UPCOMING_LIMIT: usize = 4;
const DOCTOR_RECENT_PATIENTS_LIMIT: usize = 3;
const ADMIN_RECENT_USERS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDashboard {
    pub upcoming_appointments: Vec<Appointment>,
    pub upcoming_total: usize,
    pub recent_records: Vec<MedicalRecord>,
    pub records_total: usize,
    pub prescriptions: Vec<Prescription>,
    /// Distinct doctors the patient has appointments with, first seen first.
    pub doctors: Vec<Doctor>,
}

pub fn patient_dashboard(store: &dyn DataStore, patient_id: &str) -> PatientDashboard {
    let appointments = store.list_appointments_by_patient(patient_id);
    let upcoming = filter_by_status_bucket(&appointments, StatusBucket::Upcoming);

    let mut records = store.list_medical_records_by_patient(patient_id);
    records.sort_by(|a, b| b.occurred_at().cmp(&a.occurred_at()));

    let mut seen = HashSet::new();
    let doctors = appointments
        .iter()
        .filter_map(|appointment| store.find_doctor_by_id(&appointment.doctor_id))
        .filter(|doctor| seen.insert(doctor.id.clone()))
        .cloned()
        .collect();

    PatientDashboard {
        upcoming_total: upcoming.len(),
        upcoming_appointments: upcoming.into_iter().take(PATIENT_UPCOMING_LIMIT).collect(),
        records_total: records.len(),
        recent_records: records.into_iter().take(PATIENT_RECENT_RECORDS_LIMIT).collect(),
        prescriptions: store.list_prescriptions_by_patient(patient_id),
        doctors,
    }
}

/// A patient row on the doctor dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientVisit {
    pub appointment: Appointment,
    pub patient: Patient,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDashboard {
    pub todays_appointments: Vec<Appointment>,
    pub upcoming_appointments: Vec<Appointment>,
    pub upcoming_total: usize,
    pub recent_patients: Vec<PatientVisit>,
}

pub fn doctor_dashboard(store: &dyn DataStore, doctor_id: &str, today: NaiveDate) -> DoctorDashboard {
    let appointments = store.list_appointments_by_doctor(doctor_id);
    let scheduled = |a: &&Appointment| a.status == AppointmentStatus::Scheduled;

    let todays_appointments: Vec<Appointment> = appointments
        .iter()
        .filter(scheduled)
        .filter(|a| a.date == today)
        .cloned()
        .collect();
    let upcoming: Vec<Appointment> = appointments
        .iter()
        .filter(scheduled)
        .filter(|a| a.date > today)
        .cloned()
        .collect();

    // Rows whose patient cannot be resolved are dropped, not reported.
    let recent_patients = appointments
        .iter()
        .take(DOCTOR_RECENT_PATIENTS_LIMIT)
        .filter_map(|appointment| {
            store.find_patient_by_id(&appointment.patient_id).map(|patient| PatientVisit {
                appointment: appointment.clone(),
                patient: patient.clone(),
                age: patient.age_on(today),
            })
        })
        .collect();

    DoctorDashboard {
        todays_appointments,
        upcoming_total: upcoming.len(),
        upcoming_appointments: upcoming.into_iter().take(DOCTOR_UPCOMING_LIMIT).collect(),
        recent_patients,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminDashboard {
    pub total_users: usize,
    pub active_patients: usize,
    pub doctors: usize,
    pub recent_users: Vec<User>,
}

pub fn admin_dashboard(store: &dyn DataStore) -> AdminDashboard {
    AdminDashboard {
        total_users: store.users().len(),
        active_patients: store.patients().len(),
        doctors: store.doctors().len(),
        recent_users: store.users().iter().take(ADMIN_RECENT_USERS_LIMIT).cloned().collect(),
    }
}
