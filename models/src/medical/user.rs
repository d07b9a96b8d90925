// models/src/medical/user.rs
use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;
use crate::medical::{Admin, Doctor, Patient, Role};

/// Base identity record. Every account has one, whatever its role; the
/// role-specific details live in the matching `Patient`, `Doctor` or
/// `Admin` record under the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Email comparison used by login. Case is folded with Unicode rules,
    /// so "Élise@…" and "élise@…" are the same address.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.trim().to_lowercase()
    }
}

/// The full record of a signed-in account. This is what the session holds
/// and what gets persisted; `role` is the discriminant on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserProfile {
    Patient(Patient),
    Doctor(Doctor),
    Admin(Admin),
}

impl UserProfile {
    pub fn id(&self) -> &RecordId {
        match self {
            UserProfile::Patient(p) => &p.id,
            UserProfile::Doctor(d) => &d.id,
            UserProfile::Admin(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            UserProfile::Patient(p) => &p.name,
            UserProfile::Doctor(d) => &d.name,
            UserProfile::Admin(a) => &a.name,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            UserProfile::Patient(p) => &p.email,
            UserProfile::Doctor(d) => &d.email,
            UserProfile::Admin(a) => &a.email,
        }
    }

    pub fn avatar(&self) -> Option<&str> {
        match self {
            UserProfile::Patient(p) => p.avatar.as_deref(),
            UserProfile::Doctor(d) => d.avatar.as_deref(),
            UserProfile::Admin(a) => a.avatar.as_deref(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            UserProfile::Patient(_) => Role::Patient,
            UserProfile::Doctor(_) => Role::Doctor,
            UserProfile::Admin(_) => Role::Admin,
        }
    }
}

impl From<Patient> for UserProfile {
    fn from(patient: Patient) -> Self {
        UserProfile::Patient(patient)
    }
}

impl From<Doctor> for UserProfile {
    fn from(doctor: Doctor) -> Self {
        UserProfile::Doctor(doctor)
    }
}

impl From<Admin> for UserProfile {
    fn from(admin: Admin) -> Self {
        UserProfile::Admin(admin)
    }
}
