use crate::lists;
use crate::models::{DashboardResponse, Habit, JournalEntry, JournalSnippet, ListColumn, ListSnippet};
use chrono::{Datelike, NaiveDate};

const SNAPSHOT_LEN: usize = 3;
const PREVIEW_CHARS: usize = 50;

pub const DAILY_GOALS: &[&str] = &[
    "Take a 15-minute walk outside",
    "Organize one small drawer or shelf",
    "Drink a full glass of water right now",
    "Practice a new skill for 10 minutes.",
    "Spend 10 minutes stretching or doing yoga",
    "Send a positive text message to a friend or family member",
    "Read 3 pages of a book or article",
    "Declutter your desktop or phone home screen",
    "Practice deep breathing for 5 minutes",
    "Write down three things you are grateful for",
    "Clean a mirror or window until it shines",
    "Knit something",
    "Make some art.",
    "Work on Household project.",
    "Touch Grass.",
];

/// Stable for a whole day, different on the next.
pub fn goal_for(today: NaiveDate) -> &'static str {
    DAILY_GOALS[today.ordinal0() as usize % DAILY_GOALS.len()]
}

fn truncate(text: &str) -> String {
    let mut preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

pub fn build_dashboard(
    today: NaiveDate,
    entries: &[JournalEntry],
    habits: &[Habit],
    columns: &[ListColumn],
) -> DashboardResponse {
    let journal = entries
        .iter()
        .rev()
        .take(SNAPSHOT_LEN)
        .map(|entry| JournalSnippet {
            date: entry.date.clone(),
            preview: truncate(&entry.journal_text),
        })
        .collect();

    let lists = columns
        .iter()
        .rev()
        .take(SNAPSHOT_LEN)
        .map(|column| ListSnippet {
            name: if column.name.is_empty() {
                "Untitled".to_string()
            } else {
                column.name.clone()
            },
            preview: truncate(&lists::preview(column)),
        })
        .collect();

    DashboardResponse {
        goal: goal_for(today).to_string(),
        journal,
        habits: habits.iter().map(|habit| habit.name.clone()).collect(),
        lists,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;

    #[test]
    fn snapshot_takes_latest_three_newest_first() {
        let entries: Vec<JournalEntry> = (1..=5)
            .map(|day| JournalEntry {
                date: format!("2025-03-0{day}"),
                mood: Mood::Calm,
                journal_text: "x".repeat(60),
            })
            .collect();

        let dashboard = build_dashboard(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(), &entries, &[], &[]);

        let dates: Vec<_> = dashboard.journal.iter().map(|s| s.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-03-05", "2025-03-04", "2025-03-03"]);
        assert_eq!(dashboard.journal[0].preview.len(), PREVIEW_CHARS + 3);
        assert!(dashboard.habits.is_empty());
        assert!(dashboard.lists.is_empty());
    }

    #[test]
    fn goal_is_stable_within_a_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(goal_for(day), goal_for(day));
        assert_ne!(goal_for(day), goal_for(day.succ_opt().unwrap()));
    }
}
