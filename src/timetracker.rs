//! Time and pay tracking with a rolling current month and per-month archives.
//!
//! Everything here is pure over [`TimeTrackerState`]; the handlers own
//! loading and persisting it. "Today" is always passed in so month
//! boundaries can be exercised in tests.

use crate::errors::AppError;
use crate::models::{ArchivedMonth, NewTimeEntry, Summary, TimeEntry, TimeTrackerState, number_value};
use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

const OTHER_WORK_TYPE: &str = "Other";

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("Please complete the necessary fields for a time or flat-rate entry.")]
    MissingFields,
    #[error("Please enter a valid number for minutes.")]
    InvalidMinutes,
    #[error("Please enter a valid number for the flat rate.")]
    InvalidFlatRate,
    #[error("Entry date must look like YYYY-MM-DD, got {0:?}.")]
    InvalidDate(String),
    #[error("No entry id is left above {0}.")]
    IdsExhausted(i64),
}

impl From<EntryError> for AppError {
    fn from(err: EntryError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

/// `(year, zero-based month)`, ordered chronologically.
type MonthKey = (i32, u32);

fn month_key(date: NaiveDate) -> MonthKey {
    (date.year(), date.month0())
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}

fn entry_month(entry: &TimeEntry) -> Option<MonthKey> {
    parse_date(&entry.date).map(month_key)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Summary {
    /// Adds one entry to the running totals.
    pub fn absorb(&mut self, entry: &TimeEntry) {
        let minutes = entry.minutes.unwrap_or(0.0);
        let pay = entry.pay();
        let work_type = entry
            .work_type
            .as_deref()
            .filter(|work_type| !work_type.is_empty())
            .unwrap_or(OTHER_WORK_TYPE);

        self.total_entries += 1;
        self.total_minutes += minutes;
        self.total_pay = round_cents(self.total_pay + pay);

        let by_type = self.by_type.entry(work_type.to_string()).or_default();
        by_type.minutes += minutes;
        by_type.total = round_cents(by_type.total + pay);
    }
}

pub fn summarize(entries: &[TimeEntry]) -> Summary {
    entries.iter().fold(Summary::default(), |mut summary, entry| {
        summary.absorb(entry);
        summary
    })
}

fn archive_entry(archive: &mut Vec<ArchivedMonth>, (year, month): MonthKey, entry: TimeEntry) {
    let index = match archive
        .iter()
        .position(|bucket| bucket.year == year && bucket.month == month)
    {
        Some(index) => index,
        None => {
            archive.push(ArchivedMonth {
                month,
                year,
                summary: Summary::default(),
                entries: Vec::new(),
            });
            archive.len() - 1
        }
    };
    let bucket = &mut archive[index];
    bucket.summary.absorb(&entry);
    bucket.entries.push(entry);
}

/// Rebuilds every archive summary from its bucket's entries. Returns how
/// many summaries were wrong.
pub fn refresh_summaries(state: &mut TimeTrackerState) -> usize {
    let mut repaired = 0;
    for bucket in &mut state.archived_months {
        let summary = summarize(&bucket.entries);
        if bucket.summary != summary {
            bucket.summary = summary;
            repaired += 1;
        }
    }
    if repaired > 0 {
        warn!("rebuilt {repaired} archived month summaries");
    }
    repaired
}

/// Moves entries dated before the current month into their own month's
/// archive bucket. Returns whether the state changed.
pub fn reconcile(state: &mut TimeTrackerState, today: NaiveDate) -> bool {
    let now = month_key(today);
    let repaired = refresh_summaries(state);
    let mut keep = Vec::with_capacity(state.current_entries.len());
    let mut archived = 0usize;

    for entry in std::mem::take(&mut state.current_entries) {
        match entry_month(&entry) {
            Some(key) if key < now => {
                archive_entry(&mut state.archived_months, key, entry);
                archived += 1;
            }
            Some(_) => keep.push(entry),
            None => {
                warn!("time entry {} has unreadable date {:?}, leaving it current", entry.id, entry.date);
                keep.push(entry);
            }
        }
    }
    state.current_entries = keep;

    if archived > 0 {
        info!("archived {archived} time entries from previous months");
    }

    let markers_changed =
        state.last_month_checked != Some(now.1) || state.archive_year != Some(now.0);
    state.last_month_checked = Some(now.1);
    state.archive_year = Some(now.0);

    archived > 0 || repaired > 0 || markers_changed
}

/// Id for a new entry: the candidate timestamp unless it is already taken.
pub fn next_id(state: &TimeTrackerState, candidate: i64) -> Result<i64, EntryError> {
    let highest = state
        .current_entries
        .iter()
        .chain(state.archived_months.iter().flat_map(|bucket| &bucket.entries))
        .map(|entry| entry.id)
        .max();
    match highest {
        Some(highest) if highest >= candidate => {
            highest.checked_add(1).ok_or(EntryError::IdsExhausted(highest))
        }
        _ => Ok(candidate),
    }
}

fn present(value: &Option<Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.trim().is_empty(),
        Some(_) => true,
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Builds an entry from user input without touching any state.
pub fn build_entry(
    input: NewTimeEntry,
    today: NaiveDate,
    hourly_rate: f64,
    id: i64,
) -> Result<TimeEntry, EntryError> {
    let date = match non_blank(input.date) {
        Some(text) => parse_date(&text).ok_or(EntryError::InvalidDate(text))?,
        None => today,
    };
    let date = date.format("%Y-%m-%d").to_string();
    let service_name = non_blank(input.service_name);
    let work_type = non_blank(input.work_type);

    if let (Some(service_name), true) = (service_name, present(&input.flat_rate)) {
        let flat_rate = input
            .flat_rate
            .as_ref()
            .and_then(number_value)
            .ok_or(EntryError::InvalidFlatRate)?;
        return Ok(TimeEntry {
            id,
            date,
            work_type: Some(service_name),
            minutes: None,
            pay_rate: None,
            is_flat_rate: true,
            flat_rate: Some(flat_rate),
            total: format!("{flat_rate:.2}"),
        });
    }

    if let (Some(work_type), true) = (work_type, present(&input.minutes)) {
        let minutes = input
            .minutes
            .as_ref()
            .and_then(number_value)
            .ok_or(EntryError::InvalidMinutes)?;
        let pay_rate = input
            .pay_rate
            .as_ref()
            .and_then(number_value)
            .filter(|rate| *rate >= 0.0)
            .unwrap_or(hourly_rate);
        let total = (minutes / 60.0) * pay_rate;
        return Ok(TimeEntry {
            id,
            date,
            work_type: Some(work_type),
            minutes: Some(minutes),
            pay_rate: Some(pay_rate),
            is_flat_rate: false,
            flat_rate: None,
            total: format!("{total:.2}"),
        });
    }

    Err(EntryError::MissingFields)
}

/// Reconciles, then files the new entry under the current month or, when
/// it is dated in a past month, straight into that month's archive.
pub fn add_entry(
    state: &mut TimeTrackerState,
    input: NewTimeEntry,
    today: NaiveDate,
    hourly_rate: f64,
    candidate_id: i64,
) -> Result<TimeEntry, EntryError> {
    reconcile(state, today);
    let id = next_id(state, candidate_id)?;
    let entry = build_entry(input, today, hourly_rate, id)?;

    match entry_month(&entry) {
        Some(key) if key < month_key(today) => {
            info!("archiving back-dated time entry from {}", entry.date);
            archive_entry(&mut state.archived_months, key, entry.clone());
        }
        _ => state.current_entries.insert(0, entry.clone()),
    }
    Ok(entry)
}

/// Removes a current entry by id. Archived months are never touched.
pub fn delete_entry(state: &mut TimeTrackerState, id: i64) -> bool {
    let before = state.current_entries.len();
    state.current_entries.retain(|entry| entry.id != id);
    state.current_entries.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timed(id: i64, date: &str, work_type: &str, minutes: f64) -> TimeEntry {
        TimeEntry {
            id,
            date: date.into(),
            work_type: Some(work_type.into()),
            minutes: Some(minutes),
            pay_rate: Some(18.0),
            is_flat_rate: false,
            flat_rate: None,
            total: format!("{:.2}", minutes / 60.0 * 18.0),
        }
    }

    fn input(value: Value) -> NewTimeEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn cleaning_entry_pays_27() {
        let entry = build_entry(
            input(json!({ "date": "2025-01-15", "workType": "Cleaning", "minutes": 90 })),
            day(2025, 1, 20),
            18.0,
            1,
        )
        .unwrap();
        assert_eq!(entry.total, "27.00");

        let summary = summarize(std::slice::from_ref(&entry));
        let cleaning = &summary.by_type["Cleaning"];
        assert_eq!(cleaning.minutes, 90.0);
        assert_eq!(cleaning.total, 27.0);
    }

    #[test]
    fn summarize_counts_and_skips_non_numeric() {
        let mut odd = timed(3, "2025-03-02", "", 0.0);
        odd.minutes = None;
        odd.total = "n/a".into();
        odd.work_type = None;
        let entries = vec![
            timed(1, "2025-03-01", "Cleaning", 30.0),
            timed(2, "2025-03-01", "Cleaning", 45.5),
            odd,
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.total_minutes, 75.5);
        assert_eq!(summary.total_pay, round_cents(9.0 + 13.65));
        assert_eq!(summary.by_type["Other"].minutes, 0.0);
        assert_eq!(summary.by_type["Other"].total, 0.0);
        assert_eq!(summary.by_type["Cleaning"].minutes, 75.5);
    }

    #[test]
    fn summarize_empty_is_zeroed() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary::default());
        assert_eq!(serde_json::to_value(&summary).unwrap()["totalPay"], "0.00");
    }

    #[test]
    fn reconcile_moves_january_entry_in_march() {
        let mut state = TimeTrackerState {
            current_entries: vec![
                timed(1, "2025-01-10", "Cleaning", 60.0),
                timed(2, "2025-03-05", "Cleaning", 30.0),
            ],
            ..Default::default()
        };

        assert!(reconcile(&mut state, day(2025, 3, 12)));

        assert_eq!(state.current_entries.len(), 1);
        assert_eq!(state.current_entries[0].id, 2);
        assert_eq!(state.archived_months.len(), 1);
        let bucket = &state.archived_months[0];
        assert_eq!((bucket.month, bucket.year), (0, 2025));
        assert_eq!(bucket.entries[0].id, 1);
        assert_eq!(state.last_month_checked, Some(2));
        assert_eq!(state.archive_year, Some(2025));
    }

    #[test]
    fn reconcile_routes_each_entry_to_its_own_month() {
        let mut state = TimeTrackerState {
            current_entries: vec![
                timed(1, "2024-12-31", "Cleaning", 60.0),
                timed(2, "2025-01-02", "Tutoring", 30.0),
                timed(3, "2025-01-20", "Cleaning", 15.0),
            ],
            ..Default::default()
        };

        reconcile(&mut state, day(2025, 2, 1));

        assert!(state.current_entries.is_empty());
        let keys: Vec<_> = state
            .archived_months
            .iter()
            .map(|bucket| (bucket.month, bucket.year, bucket.entries.len()))
            .collect();
        assert_eq!(keys, vec![(11, 2024, 1), (0, 2025, 2)]);
        for bucket in &state.archived_months {
            assert_eq!(bucket.summary, summarize(&bucket.entries));
        }
    }

    #[test]
    fn reconcile_is_idempotent() {
        let mut state = TimeTrackerState {
            current_entries: vec![timed(1, "2025-01-10", "Cleaning", 60.0)],
            ..Default::default()
        };
        let today = day(2025, 3, 12);

        assert!(reconcile(&mut state, today));
        let once = state.clone();
        assert!(!reconcile(&mut state, today));

        assert_eq!(state, once);
        assert_eq!(state.archived_months.len(), 1);
        assert_eq!(state.archived_months[0].summary.total_entries, 1);
        assert_eq!(state.archived_months[0].summary.total_minutes, 60.0);
    }

    #[test]
    fn reconcile_keeps_unreadable_dates_current() {
        let mut state = TimeTrackerState {
            current_entries: vec![timed(1, "someday", "Cleaning", 60.0)],
            ..Default::default()
        };
        reconcile(&mut state, day(2025, 3, 12));
        assert_eq!(state.current_entries.len(), 1);
        assert!(state.archived_months.is_empty());
    }

    #[test]
    fn add_entry_prepends_current_month() {
        let mut state = TimeTrackerState::default();
        let today = day(2025, 3, 12);
        add_entry(
            &mut state,
            input(json!({ "date": "2025-03-01", "workType": "Cleaning", "minutes": 30 })),
            today,
            18.0,
            100,
        )
        .unwrap();
        let second = add_entry(
            &mut state,
            input(json!({ "workType": "Tutoring", "minutes": "45" })),
            today,
            18.0,
            100,
        )
        .unwrap();

        assert_eq!(second.id, 101);
        assert_eq!(second.date, "2025-03-12");
        assert_eq!(state.current_entries[0].id, 101);
        assert_eq!(state.current_entries[1].id, 100);
    }

    #[test]
    fn add_entry_archives_back_dated_entry() {
        let mut state = TimeTrackerState::default();
        let entry = add_entry(
            &mut state,
            input(json!({ "date": "2025-01-15", "workType": "Cleaning", "minutes": 90, "payRate": 18 })),
            day(2025, 3, 12),
            18.0,
            7,
        )
        .unwrap();

        assert_eq!(entry.total, "27.00");
        assert!(state.current_entries.is_empty());
        let bucket = &state.archived_months[0];
        assert_eq!((bucket.month, bucket.year), (0, 2025));
        assert_eq!(bucket.summary.total_pay, 27.0);
        assert_eq!(bucket.summary.by_type["Cleaning"].minutes, 90.0);
    }

    #[test]
    fn flat_rate_entry_uses_service_name() {
        let entry = build_entry(
            input(json!({ "serviceName": "Deep clean", "flatRate": "120.5" })),
            day(2025, 3, 12),
            18.0,
            1,
        )
        .unwrap();
        assert!(entry.is_flat_rate);
        assert_eq!(entry.work_type.as_deref(), Some("Deep clean"));
        assert_eq!(entry.total, "120.50");
        assert_eq!(entry.minutes, None);
    }

    #[test]
    fn invalid_input_is_rejected_without_changes() {
        let mut state = TimeTrackerState {
            last_month_checked: Some(2),
            archive_year: Some(2025),
            ..Default::default()
        };
        let today = day(2025, 3, 12);

        let missing = add_entry(&mut state, input(json!({ "workType": "Cleaning" })), today, 18.0, 1);
        assert_eq!(missing, Err(EntryError::MissingFields));

        let bad_minutes = add_entry(
            &mut state,
            input(json!({ "workType": "Cleaning", "minutes": "lots" })),
            today,
            18.0,
            1,
        );
        assert_eq!(bad_minutes, Err(EntryError::InvalidMinutes));

        let bad_date = add_entry(
            &mut state,
            input(json!({ "date": "15/01/2025", "workType": "Cleaning", "minutes": 5 })),
            today,
            18.0,
            1,
        );
        assert!(matches!(bad_date, Err(EntryError::InvalidDate(_))));

        assert!(state.current_entries.is_empty());
        assert!(state.archived_months.is_empty());
    }

    #[test]
    fn reconcile_rebuilds_missing_archive_summary() {
        let stored = json!({
            "currentEntries": [timed(2, "2025-01-20", "Cleaning", 30.0)],
            "archivedMonths": [{
                "month": 0,
                "year": 2025,
                "entries": [timed(1, "2025-01-10", "Cleaning", 60.0)]
            }],
            "lastMonthChecked": 2,
            "archiveYear": 2025
        });
        let mut state: TimeTrackerState = serde_json::from_value(stored).unwrap();

        assert!(reconcile(&mut state, day(2025, 3, 12)));

        let bucket = &state.archived_months[0];
        assert_eq!(bucket.entries.len(), 2);
        assert_eq!(bucket.summary, summarize(&bucket.entries));
        assert_eq!(bucket.summary.total_entries, 2);
        assert_eq!(bucket.summary.total_minutes, 90.0);
    }

    #[test]
    fn refresh_summaries_fixes_stale_totals_only() {
        let entries = vec![timed(1, "2025-01-10", "Cleaning", 60.0)];
        let mut stale = summarize(&entries);
        stale.total_minutes = 999.0;
        let mut state = TimeTrackerState {
            archived_months: vec![
                ArchivedMonth {
                    month: 0,
                    year: 2025,
                    summary: stale,
                    entries: entries.clone(),
                },
                ArchivedMonth {
                    month: 1,
                    year: 2025,
                    summary: summarize(&[timed(2, "2025-02-03", "Tutoring", 15.0)]),
                    entries: vec![timed(2, "2025-02-03", "Tutoring", 15.0)],
                },
            ],
            ..Default::default()
        };

        assert_eq!(refresh_summaries(&mut state), 1);
        assert_eq!(state.archived_months[0].summary, summarize(&entries));
        assert_eq!(refresh_summaries(&mut state), 0);
    }

    #[test]
    fn add_entry_rejects_when_ids_run_out() {
        let mut state = TimeTrackerState {
            current_entries: vec![timed(i64::MAX, "2025-03-01", "Cleaning", 10.0)],
            ..Default::default()
        };
        let today = day(2025, 3, 12);

        let result = add_entry(
            &mut state,
            input(json!({ "workType": "Cleaning", "minutes": 30 })),
            today,
            18.0,
            1_700_000_000_000,
        );

        assert_eq!(result, Err(EntryError::IdsExhausted(i64::MAX)));
        assert_eq!(state.current_entries.len(), 1);
        assert_eq!(next_id(&state, i64::MAX), Err(EntryError::IdsExhausted(i64::MAX)));
    }

    #[test]
    fn next_id_skips_past_taken_ids() {
        let state = TimeTrackerState {
            current_entries: vec![timed(50, "2025-03-01", "Cleaning", 10.0)],
            ..Default::default()
        };
        assert_eq!(next_id(&state, 50), Ok(51));
        assert_eq!(next_id(&state, 80), Ok(80));
    }

    #[test]
    fn delete_entry_only_touches_current() {
        let mut state = TimeTrackerState {
            current_entries: vec![timed(1, "2025-03-01", "Cleaning", 10.0)],
            archived_months: vec![ArchivedMonth {
                month: 0,
                year: 2025,
                summary: summarize(&[timed(2, "2025-01-01", "Cleaning", 10.0)]),
                entries: vec![timed(2, "2025-01-01", "Cleaning", 10.0)],
            }],
            ..Default::default()
        };

        assert!(!delete_entry(&mut state, 2));
        assert_eq!(state.archived_months[0].entries.len(), 1);
        assert!(delete_entry(&mut state, 1));
        assert!(state.current_entries.is_empty());
        assert!(!delete_entry(&mut state, 1));
    }
}
