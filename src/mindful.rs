//! Gratitude journal and affirmations.

use crate::errors::AppError;
use crate::models::{GratitudeEntry, MindfulData};
use chrono::{DateTime, Local};

pub const DEFAULT_AFFIRMATIONS: &[&str] = &[
    "I am worthy of all the good things in my life.",
    "My mind is clear and focused.",
    "I choose joy and positivity today.",
    "I am resilient and strong.",
    "I trust my intuition and inner guidance.",
    "I embrace change and welcome new opportunities.",
];

pub fn add_gratitude(
    data: &mut MindfulData,
    text: &str,
    now: DateTime<Local>,
) -> Result<GratitudeEntry, AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("Please write something you're grateful for!"));
    }
    let entry = GratitudeEntry {
        date: now.format("%B %-d, %Y").to_string(),
        entry: text.to_string(),
        timestamp: now.timestamp_millis(),
    };
    data.gratitude_history.push(entry.clone());
    Ok(entry)
}

pub fn add_affirmation(data: &mut MindfulData, text: &str) -> Result<(), AppError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::bad_request("Please enter your affirmation!"));
    }
    data.custom_affirmations.push(text.to_string());
    Ok(())
}

/// Defaults first, then the user's own. The merge is never persisted.
pub fn all_affirmations(data: &MindfulData) -> Vec<String> {
    DEFAULT_AFFIRMATIONS
        .iter()
        .map(|text| text.to_string())
        .chain(data.custom_affirmations.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn gratitude_gets_long_date_and_timestamp() {
        let mut data = MindfulData::default();
        let now = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

        let entry = add_gratitude(&mut data, "  sunshine  ", now).unwrap();

        assert_eq!(entry.date, "October 19, 2026");
        assert_eq!(entry.entry, "sunshine");
        assert_eq!(entry.timestamp, now.timestamp_millis());
        assert_eq!(data.gratitude_history.len(), 1);
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut data = MindfulData::default();
        assert!(add_gratitude(&mut data, " ", Local::now()).is_err());
        assert!(add_affirmation(&mut data, "").is_err());
        assert!(data.gratitude_history.is_empty());
        assert!(data.custom_affirmations.is_empty());
    }

    #[test]
    fn affirmations_merge_without_persisting_defaults() {
        let mut data = MindfulData::default();
        add_affirmation(&mut data, "I finish what I start.").unwrap();

        let all = all_affirmations(&data);
        assert_eq!(all.len(), DEFAULT_AFFIRMATIONS.len() + 1);
        assert_eq!(all.last().map(String::as_str), Some("I finish what I start."));
        assert_eq!(data.custom_affirmations, vec!["I finish what I start."]);
    }
}
