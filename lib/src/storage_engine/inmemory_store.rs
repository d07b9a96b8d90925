// lib/src/storage_engine/inmemory_store.rs
use log::info;

use super::data_store::DataStore;
use super::dataset::Dataset;
use models::{Admin, Appointment, CareResult, Doctor, MedicalRecord, Patient, Prescription, User};

/// `DataStore` over a validated dataset held in memory. Never mutated after
/// construction, so it can be shared freely behind an `Arc`.
#[derive(Debug, Clone)]
pub struct InMemoryDataStore {
    dataset: Dataset,
}

impl InMemoryDataStore {
    pub fn new(dataset: Dataset) -> CareResult<Self> {
        dataset.validate()?;
        info!(
            "In-memory data store ready with {} users and {} appointments",
            dataset.users.len(),
            dataset.appointments.len()
        );
        Ok(InMemoryDataStore { dataset })
    }

    pub fn demo() -> CareResult<Self> {
        Self::new(Dataset::demo()?)
    }
}

impl DataStore for InMemoryDataStore {
    fn users(&self) -> &[User] {
        &self.dataset.users
    }

    fn patients(&self) -> &[Patient] {
        &self.dataset.patients
    }

    fn doctors(&self) -> &[Doctor] {
        &self.dataset.doctors
    }

    fn admins(&self) -> &[Admin] {
        &self.dataset.admins
    }

    fn medical_records(&self) -> &[MedicalRecord] {
        &self.dataset.medical_records
    }

    fn appointments(&self) -> &[Appointment] {
        &self.dataset.appointments
    }

    fn prescriptions(&self) -> &[Prescription] {
        &self.dataset.prescriptions
    }
}
