// models/src/medical/patient.rs
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String, // e.g., "Wife", "Husband"
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceDetails {
    pub provider: String,
    pub policy_number: String,
    pub expiry_date: NaiveDate,
}

/// Full profile of a patient account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>, // e.g., "O+", "A-"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_details: Option<InsuranceDetails>,
}

impl Patient {
    /// Age in completed years on `today`. A birthday later in the year has
    /// not been reached yet and does not count.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let born = self.date_of_birth;
        let mut age = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}
