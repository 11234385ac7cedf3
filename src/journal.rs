use crate::errors::AppError;
use crate::models::{JournalEntry, JournalStats};
use chrono::NaiveDate;

pub fn validate(entry: &JournalEntry) -> Result<(), AppError> {
    if entry.date.trim().is_empty() {
        return Err(AppError::bad_request("date is required"));
    }
    if entry.journal_text.trim().is_empty() {
        return Err(AppError::bad_request("Please write a journal entry before saving."));
    }
    Ok(())
}

/// Replace-or-insert keyed by date; the saved entry ends up last.
pub fn upsert_entry(entries: &mut Vec<JournalEntry>, entry: JournalEntry) {
    entries.retain(|existing| existing.date != entry.date);
    entries.push(entry);
}

/// In-place replacement. Returns `false` when no entry has that date.
pub fn edit_entry(entries: &mut [JournalEntry], date: &str, entry: JournalEntry) -> bool {
    match entries.iter_mut().find(|existing| existing.date == date) {
        Some(slot) => {
            *slot = entry;
            true
        }
        None => false,
    }
}

pub fn delete_entry(entries: &mut Vec<JournalEntry>, date: &str) -> bool {
    let before = entries.len();
    entries.retain(|entry| entry.date != date);
    entries.len() != before
}

pub fn stats(entries: &[JournalEntry]) -> JournalStats {
    if entries.is_empty() {
        return JournalStats {
            average_mood: None,
            days_tracking: 0,
            current_streak: 0,
        };
    }

    let total: u32 = entries.iter().map(|entry| entry.mood.score()).sum();
    let average = f64::from(total) / entries.len() as f64;

    JournalStats {
        average_mood: Some((average * 10.0).round() / 10.0),
        days_tracking: entries.len(),
        current_streak: current_streak(entries),
    }
}

/// Consecutive days ending at the most recent entry.
fn current_streak(entries: &[JournalEntry]) -> usize {
    let mut dates: Vec<NaiveDate> = entries
        .iter()
        .filter_map(|entry| NaiveDate::parse_from_str(entry.date.trim(), "%Y-%m-%d").ok())
        .collect();
    dates.sort();
    dates.dedup();

    let Some(mut latest) = dates.pop() else {
        return 0;
    };
    let mut streak = 1;
    while let Some(previous) = dates.pop() {
        if (latest - previous).num_days() != 1 {
            break;
        }
        streak += 1;
        latest = previous;
    }
    streak
}
