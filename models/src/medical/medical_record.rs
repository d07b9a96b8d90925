// models/src/medical/medical_record.rs
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Report,
    Image,
    Document,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Report => f.write_str("report"),
            AttachmentKind::Image => f.write_str("image"),
            AttachmentKind::Document => f.write_str("document"),
        }
    }
}

/// A file attached to a medical record. Owned by its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
    pub upload_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}
