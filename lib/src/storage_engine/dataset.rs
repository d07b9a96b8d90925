// lib/src/storage_engine/dataset.rs
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use models::{
    Admin, Appointment, CareError, CareResult, Doctor, MedicalRecord, Patient, Prescription,
    RecordId, User, ValidationError,
};

const DEMO_DATASET_JSON: &str = include_str!("../../fixtures/demo_dataset.json");

static DEMO_DATASET: Lazy<Result<Dataset, String>> =
    Lazy::new(|| serde_json::from_str(DEMO_DATASET_JSON).map_err(|e| e.to_string()));

/// Every collection the dashboard reads, as loaded at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub medical_records: Vec<MedicalRecord>,
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub prescriptions: Vec<Prescription>,
}

impl Dataset {
    /// The built-in demo clinic: two patients, two doctors and one admin.
    pub fn demo() -> CareResult<Self> {
        DEMO_DATASET
            .clone()
            .map_err(|e| CareError::Serialization(format!("built-in dataset is invalid: {}", e)))
    }

    pub fn from_json_str(json: &str) -> CareResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> CareResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CareError::Storage(format!("Failed to read dataset {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Rejects duplicate ids within a collection. Foreign keys that do not
    /// resolve are only reported: views skip such items.
    pub fn validate(&self) -> CareResult<()> {
        ensure_unique("users", self.users.iter().map(|u| &u.id))?;
        ensure_unique("patients", self.patients.iter().map(|p| &p.id))?;
        ensure_unique("doctors", self.doctors.iter().map(|d| &d.id))?;
        ensure_unique("admins", self.admins.iter().map(|a| &a.id))?;
        ensure_unique("medical records", self.medical_records.iter().map(|r| &r.id))?;
        ensure_unique("appointments", self.appointments.iter().map(|a| &a.id))?;
        ensure_unique("prescriptions", self.prescriptions.iter().map(|p| &p.id))?;

        let patients: HashSet<&RecordId> = self.patients.iter().map(|p| &p.id).collect();
        let doctors: HashSet<&RecordId> = self.doctors.iter().map(|d| &d.id).collect();
        let references = self
            .medical_records
            .iter()
            .map(|r| ("medical record", &r.id, &r.patient_id, &r.doctor_id))
            .chain(self.appointments.iter().map(|a| ("appointment", &a.id, &a.patient_id, &a.doctor_id)))
            .chain(self.prescriptions.iter().map(|p| ("prescription", &p.id, &p.patient_id, &p.doctor_id)));
        for (kind, id, patient_id, doctor_id) in references {
            if !patients.contains(patient_id) {
                warn!("{} {} references unknown patient {}", kind, id, patient_id);
            }
            if !doctors.contains(doctor_id) {
                warn!("{} {} references unknown doctor {}", kind, id, doctor_id);
            }
        }

        debug!(
            "Dataset validated: {} users, {} appointments, {} medical records, {} prescriptions",
            self.users.len(),
            self.appointments.len(),
            self.medical_records.len(),
            self.prescriptions.len()
        );
        Ok(())
    }
}

fn ensure_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a RecordId>,
) -> CareResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateIdentifier(collection, id.to_string()).into());
        }
    }
    Ok(())
}
