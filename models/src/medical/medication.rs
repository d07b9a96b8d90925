// models/src/medical/medication.rs
use serde::{Deserialize, Serialize};

/// One drug line on a prescription. Owned by its prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,    // e.g., "10mg"
    pub frequency: String, // e.g., "Once daily"
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
