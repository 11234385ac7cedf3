//! Habit calendars: one set of tracked days per habit name.
//!
//! Day keys are stored as zero-padded `YYYY-MM-DD`. Older files used
//! unpadded `Y-M-D` keys; those are rewritten when read.

use crate::models::Habit;
use chrono::NaiveDate;

/// Canonical form of a day key, or `None` if it is not a calendar date.
pub fn normalize_date_key(key: &str) -> Option<String> {
    let mut parts = key.trim().splitn(3, '-');
    let year = parts.next()?.parse::<i32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|date| date.format("%Y-%m-%d").to_string())
}

/// Normalizes, sorts and de-duplicates a habit's days. Keys that are not
/// dates are kept verbatim rather than dropped.
pub fn normalize_habit(mut habit: Habit) -> Habit {
    let mut days: Vec<String> = habit
        .tracked_days
        .into_iter()
        .map(|key| normalize_date_key(&key).unwrap_or(key))
        .collect();
    days.sort();
    days.dedup();
    habit.tracked_days = days;
    habit
}

pub fn normalize_all(habits: Vec<Habit>) -> Vec<Habit> {
    habits.into_iter().map(normalize_habit).collect()
}

/// Replace-by-name: any habit with the same name is removed and the new
/// one appended.
pub fn upsert_habit(habits: &mut Vec<Habit>, habit: Habit) {
    let habit = normalize_habit(habit);
    habits.retain(|existing| existing.name != habit.name);
    habits.push(habit);
}

/// Returns whether anything was removed.
pub fn delete_habit(habits: &mut Vec<Habit>, name: &str) -> bool {
    let before = habits.len();
    habits.retain(|habit| habit.name != name);
    habits.len() != before
}

/// Flips one day for the named habit. Returns the new tracked state, or
/// `None` when no habit has that name.
pub fn toggle_day(habits: &mut Vec<Habit>, name: &str, date_key: &str) -> Option<bool> {
    let key = normalize_date_key(date_key).unwrap_or_else(|| date_key.trim().to_string());
    let mut habit = habits.iter().find(|habit| habit.name == name)?.clone();

    let tracked = if let Some(index) = habit.tracked_days.iter().position(|day| *day == key) {
        habit.tracked_days.remove(index);
        false
    } else {
        habit.tracked_days.push(key);
        true
    };

    upsert_habit(habits, habit);
    Some(tracked)
}
