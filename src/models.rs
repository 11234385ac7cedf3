use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

// ----- journal -----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Excited,
    Calm,
    Anxious,
    Sad,
    Angry,
}

impl Mood {
    pub fn score(self) -> u32 {
        match self {
            Mood::Happy | Mood::Excited => 5,
            Mood::Calm => 4,
            Mood::Anxious => 2,
            Mood::Sad | Mood::Angry => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub date: String,
    pub mood: Mood,
    #[serde(default)]
    pub journal_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub average_mood: Option<f64>,
    pub days_tracking: usize,
    pub current_streak: usize,
}

// ----- habits -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub name: String,
    #[serde(default)]
    pub tracked_days: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleDayRequest {
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleDayResponse {
    pub name: String,
    pub date: String,
    pub tracked: bool,
}

// ----- lists & tasks -----

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[default]
    Checklist,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListItem {
    Check(ChecklistItem),
    Note(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListColumn {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ListKind,
    #[serde(default)]
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ListKind,
    #[serde(default)]
    pub items: Vec<TaskItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reset_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskList>>,
}

#[derive(Debug, Serialize)]
pub struct TaskTemplate {
    pub name: &'static str,
    pub items: Vec<&'static str>,
}

// ----- time tracker -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_type: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_number"
    )]
    pub minutes: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_number"
    )]
    pub pay_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_flat_rate: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_number"
    )]
    pub flat_rate: Option<f64>,
    /// Pay for this entry, a 2-decimal string such as `"27.00"`.
    #[serde(default, deserialize_with = "amount_text")]
    pub total: String,
}

impl TimeEntry {
    /// Parsed `total`; anything unparsable counts as zero.
    pub fn pay(&self) -> f64 {
        self.total
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeTotals {
    #[serde(default, deserialize_with = "lenient_zero")]
    pub minutes: f64,
    #[serde(default, deserialize_with = "lenient_zero")]
    pub total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(default)]
    pub total_entries: usize,
    #[serde(default, deserialize_with = "lenient_zero")]
    pub total_minutes: f64,
    #[serde(
        default,
        serialize_with = "two_decimals",
        deserialize_with = "lenient_zero"
    )]
    pub total_pay: f64,
    #[serde(default)]
    pub by_type: BTreeMap<String, TypeTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedMonth {
    /// Zero-based month, 0 = January.
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub summary: Summary,
    #[serde(default)]
    pub entries: Vec<TimeEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackerState {
    #[serde(default)]
    pub current_entries: Vec<TimeEntry>,
    #[serde(default)]
    pub archived_months: Vec<ArchivedMonth>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_month"
    )]
    pub last_month_checked: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub work_type: Option<String>,
    #[serde(default)]
    pub minutes: Option<Value>,
    #[serde(default)]
    pub pay_rate: Option<Value>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub flat_rate: Option<Value>,
}

// ----- mindful -----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub date: String,
    pub entry: String,
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindfulData {
    #[serde(default)]
    pub gratitude_history: Vec<GratitudeEntry>,
    #[serde(default)]
    pub custom_affirmations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GratitudeRequest {
    #[serde(default)]
    pub entry: String,
}

#[derive(Debug, Deserialize)]
pub struct AffirmationRequest {
    #[serde(default)]
    pub affirmation: String,
}

// ----- dashboard -----

#[derive(Debug, Serialize, Deserialize)]
pub struct JournalSnippet {
    pub date: String,
    pub preview: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListSnippet {
    pub name: String,
    pub preview: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub goal: String,
    pub journal: Vec<JournalSnippet>,
    pub habits: Vec<String>,
    pub lists: Vec<ListSnippet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

// ----- lenient number handling -----

/// Reads a JSON number or numeric string; anything else becomes `None`.
pub fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        // Only real numbers count as minutes; numeric strings do not.
        Value::Number(number) => number.as_f64(),
        _ => None,
    })
}

fn lenient_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_value(&value).unwrap_or(0.0))
}

fn lenient_month<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_value(&value)
        .filter(|month| (0.0..12.0).contains(month))
        .map(|month| month as u32))
}

fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) => text,
        Value::Number(number) => number
            .as_f64()
            .map(|n| format!("{n:.2}"))
            .unwrap_or_default(),
        _ => String::new(),
    })
}

fn two_decimals<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{value:.2}"))
}
