// models/src/medical/doctor.rs
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;
use crate::medical::serializers::{hhmm, weekdays};

/// Weekly consulting hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(with = "weekdays")]
    pub days: Vec<Weekday>,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

/// Full profile of a doctor account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub specialization: String,
    pub license_number: String,
    pub years_of_experience: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}
