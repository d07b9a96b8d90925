// models/src/lib.rs

//! Shared domain types for CareBase: identities of the three user roles,
//! the clinical records they look at, and the error taxonomy every other
//! crate in the workspace reports through.

pub mod errors;
pub mod identifiers;
pub mod medical;

pub use errors::{CareError, CareResult, ValidationError, ValidationResult};
pub use identifiers::RecordId;
pub use medical::{
    AccessLevel, Admin, Appointment, AppointmentStatus, Attachment, AttachmentKind, Availability,
    Credentials, Doctor, EmergencyContact, Gender, InsuranceDetails, MedicalRecord, Medication,
    Patient, Prescription, Role, User, UserProfile,
};
