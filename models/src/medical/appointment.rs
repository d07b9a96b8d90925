// models/src/medical/appointment.rs
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;
use crate::medical::serializers::hhmm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub doctor_id: RecordId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub status: AppointmentStatus,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Combined date and time, the key appointments are ordered by.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// The time as shown in lists and matched by search ("10:30").
    pub fn time_label(&self) -> String {
        hhmm::format(&self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_reads_short_time_and_status() {
        let json = r#"{"id":"app1","patientId":"p1","doctorId":"d1","date":"2023-07-20",
                       "time":"10:30","status":"scheduled","reason":"Follow-up for hypertension"}"#;
        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.time_label(), "10:30");
        assert_eq!(appointment.starts_at().to_string(), "2023-07-20 10:30:00");

        let back = serde_json::to_value(&appointment).unwrap();
        assert_eq!(back["time"], "10:30");
        assert!(back.get("notes").is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{"id":"app1","patientId":"p1","doctorId":"d1","date":"2023-07-20",
                       "time":"10:30","status":"pending","reason":"x"}"#;
        assert!(serde_json::from_str::<Appointment>(json).is_err());
    }
}
