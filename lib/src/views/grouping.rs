// lib/src/views/grouping.rs
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use models::{Appointment, MedicalRecord};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Anything placed on the timeline.
pub trait Dated {
    fn occurred_at(&self) -> NaiveDateTime;
}

impl Dated for Appointment {
    fn occurred_at(&self) -> NaiveDateTime {
        self.starts_at()
    }
}

impl Dated for MedicalRecord {
    fn occurred_at(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Month,
    Year,
}

/// A calendar bucket. Ordering is chronological: by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

impl Period {
    pub fn of(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Month => Period { year: date.year(), month: Some(date.month()) },
            Granularity::Year => Period { year: date.year(), month: None },
        }
    }

    /// "July 2023" for months, "2023" for years.
    pub fn label(&self) -> String {
        match self.month {
            Some(month) => format!("{} {:04}", MONTH_NAMES[(month - 1) as usize], self.year),
            None => format!("{:04}", self.year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodGroup<T> {
    pub period: Period,
    pub label: String,
    pub items: Vec<T>,
}

/// Buckets `items` by month or year.
///
/// Groups come newest period first. Inside a group items are newest first;
/// items with the same timestamp keep their input order. Every input item
/// lands in exactly one group.
pub fn group_by_period<T: Dated + Clone>(items: &[T], granularity: Granularity) -> Vec<PeriodGroup<T>> {
    let mut buckets: BTreeMap<Period, Vec<T>> = BTreeMap::new();
    for item in items {
        let period = Period::of(item.occurred_at().date(), granularity);
        buckets.entry(period).or_default().push(item.clone());
    }

    buckets
        .into_iter()
        .rev()
        .map(|(period, mut items)| {
            // sort_by is stable, ties stay in input order
            items.sort_by(|a, b| b.occurred_at().cmp(&a.occurred_at()));
            PeriodGroup { period, label: period.label(), items }
        })
        .collect()
}

/// Short display form used next to records: "Feb 15, 2023".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{AppointmentStatus, RecordId};

    fn appointment(id: &str, date: &str, time: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: RecordId::new(id).unwrap(),
            patient_id: RecordId::new("p1").unwrap(),
            doctor_id: RecordId::new("d1").unwrap(),
            date: date.parse().unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            status,
            reason: "Check-up".to_string(),
            notes: None,
        }
    }

    fn labels<T>(groups: &[PeriodGroup<T>]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    fn item_ids(group: &PeriodGroup<Appointment>) -> Vec<&str> {
        group.items.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn month_groups_are_labelled_and_ordered_newest_first() {
        let input = vec![
            appointment("a", "2023-07-20", "10:30", AppointmentStatus::Scheduled),
            appointment("b", "2023-06-15", "11:00", AppointmentStatus::Completed),
        ];
        let groups = group_by_period(&input, Granularity::Month);
        assert_eq!(labels(&groups), vec!["July 2023", "June 2023"]);
    }

    #[test]
    fn periods_sort_chronologically_not_alphabetically() {
        let input = vec![
            appointment("a", "2022-12-01", "09:00", AppointmentStatus::Completed),
            appointment("b", "2023-04-01", "09:00", AppointmentStatus::Completed),
            appointment("c", "2023-08-01", "09:00", AppointmentStatus::Scheduled),
            appointment("d", "2023-02-01", "09:00", AppointmentStatus::Completed),
        ];
        let groups = group_by_period(&input, Granularity::Month);
        assert_eq!(labels(&groups), vec!["August 2023", "April 2023", "February 2023", "December 2022"]);

        let years = group_by_period(&input, Granularity::Year);
        assert_eq!(labels(&years), vec!["2023", "2022"]);
        assert_eq!(years[0].items.len(), 3);
    }

    #[test]
    fn items_within_a_group_are_newest_first_with_stable_ties() {
        let input = vec![
            appointment("early", "2023-07-01", "08:00", AppointmentStatus::Completed),
            appointment("tie-1", "2023-07-20", "10:30", AppointmentStatus::Scheduled),
            appointment("late-time", "2023-07-01", "17:45", AppointmentStatus::Completed),
            appointment("tie-2", "2023-07-20", "10:30", AppointmentStatus::Scheduled),
        ];
        let groups = group_by_period(&input, Granularity::Month);
        assert_eq!(groups.len(), 1);
        assert_eq!(item_ids(&groups[0]), vec!["tie-1", "tie-2", "late-time", "early"]);
    }

    #[test]
    fn grouping_neither_loses_nor_duplicates_items() {
        let input: Vec<Appointment> = (1..=28)
            .map(|day| {
                let date = format!("2023-{:02}-{:02}", (day % 12) + 1, day);
                appointment(&format!("x{}", day), &date, "12:00", AppointmentStatus::Completed)
            })
            .collect();
        for granularity in [Granularity::Month, Granularity::Year] {
            let groups = group_by_period(&input, granularity);
            let mut seen: Vec<String> = groups
                .iter()
                .flat_map(|g| g.items.iter().map(|a| a.id.to_string()))
                .collect();
            let mut expected: Vec<String> = input.iter().map(|a| a.id.to_string()).collect();
            seen.sort();
            expected.sort();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = group_by_period::<Appointment>(&[], Granularity::Month);
        assert!(groups.is_empty());
    }

    #[test]
    fn display_dates_are_short_and_unpadded() {
        assert_eq!(display_date("2023-02-05".parse().unwrap()), "Feb 5, 2023");
    }
}
