// models/src/medical/mod.rs
pub mod admin;
pub mod appointment;
pub mod doctor;
pub mod login;
pub mod medical_record;
pub mod medication;
pub mod patient;
pub mod prescription;
pub mod role;
pub mod serializers;
pub mod user;

pub use admin::{AccessLevel, Admin};
pub use appointment::{Appointment, AppointmentStatus};
pub use doctor::{Availability, Doctor};
pub use login::Credentials;
pub use medical_record::{Attachment, AttachmentKind, MedicalRecord};
pub use medication::Medication;
pub use patient::{EmergencyContact, Gender, InsuranceDetails, Patient};
pub use prescription::Prescription;
pub use role::Role;
pub use user::{User, UserProfile};
