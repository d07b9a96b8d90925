// models/src/medical/serializers.rs

// Appointment and availability times travel as "HH:MM". Seconds are accepted
// on input but never written.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::errors::ValidationError;

    const FORMAT: &str = "%H:%M";

    pub fn format(time: &NaiveTime) -> String {
        time.format(FORMAT).to_string()
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(|_| serde::de::Error::custom(ValidationError::InvalidTimeFormat(raw)))
    }
}

// Availability days are written as full English names ("Monday"), the same
// spelling the dataset uses. Short names are still accepted on input.
pub mod weekdays {
    use chrono::Weekday;
    use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    use crate::errors::ValidationError;

    pub fn name(day: Weekday) -> &'static str {
        match day {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }

    pub fn serialize<S>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(name(*day))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Weekday>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .into_iter()
            .map(|raw| {
                raw.parse::<Weekday>().map_err(|_| {
                    serde::de::Error::custom(ValidationError::InvalidValue(format!("unknown weekday '{}'", raw)))
                })
            })
            .collect()
    }
}
