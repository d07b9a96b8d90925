// lib/src/storage_engine/data_store.rs

use models::{
    Admin, Appointment, Doctor, MedicalRecord, Patient, Prescription, Role, User, UserProfile,
};

/// Read-only access to the clinic's records.
///
/// Implementors only expose the collections; every lookup is provided on top
/// of them. Email matching is case-insensitive, id matching is exact, and
/// `list_*` results keep the collection's insertion order.
pub trait DataStore: Send + Sync {
    fn users(&self) -> &[User];
    fn patients(&self) -> &[Patient];
    fn doctors(&self) -> &[Doctor];
    fn admins(&self) -> &[Admin];
    fn medical_records(&self) -> &[MedicalRecord];
    fn appointments(&self) -> &[Appointment];
    fn prescriptions(&self) -> &[Prescription];

    fn find_user_by_email(&self, email: &str) -> Option<&User> {
        self.users().iter().find(|user| user.has_email(email))
    }

    fn find_patient_by_id(&self, id: &str) -> Option<&Patient> {
        self.patients().iter().find(|patient| patient.id == id)
    }

    fn find_doctor_by_id(&self, id: &str) -> Option<&Doctor> {
        self.doctors().iter().find(|doctor| doctor.id == id)
    }

    fn find_admin_by_id(&self, id: &str) -> Option<&Admin> {
        self.admins().iter().find(|admin| admin.id == id)
    }

    /// Resolves the role-specific record behind a base identity.
    fn find_profile(&self, user: &User) -> Option<UserProfile> {
        match user.role {
            Role::Patient => self.find_patient_by_id(&user.id).cloned().map(UserProfile::Patient),
            Role::Doctor => self.find_doctor_by_id(&user.id).cloned().map(UserProfile::Doctor),
            Role::Admin => self.find_admin_by_id(&user.id).cloned().map(UserProfile::Admin),
        }
    }

    fn list_appointments_by_patient(&self, patient_id: &str) -> Vec<Appointment> {
        self.appointments()
            .iter()
            .filter(|appointment| appointment.patient_id == patient_id)
            .cloned()
            .collect()
    }

    fn list_appointments_by_doctor(&self, doctor_id: &str) -> Vec<Appointment> {
        self.appointments()
            .iter()
            .filter(|appointment| appointment.doctor_id == doctor_id)
            .cloned()
            .collect()
    }

    fn list_medical_records_by_patient(&self, patient_id: &str) -> Vec<MedicalRecord> {
        self.medical_records()
            .iter()
            .filter(|record| record.patient_id == patient_id)
            .cloned()
            .collect()
    }

    fn list_prescriptions_by_patient(&self, patient_id: &str) -> Vec<Prescription> {
        self.prescriptions()
            .iter()
            .filter(|prescription| prescription.patient_id == patient_id)
            .cloned()
            .collect()
    }
}
