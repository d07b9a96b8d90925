// models/src/medical/prescription.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;
use crate::medical::Medication;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    pub medications: Vec<Medication>,
    pub instructions: String,
    pub duration: String,
    pub is_refillable: bool,
}
