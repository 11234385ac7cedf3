//! Daily task lists that reset to a fixed template on each new day.

use crate::models::{ListKind, TaskItem, TaskList, TaskState, TaskTemplate};
use chrono::NaiveDate;

/// The only copy of the default lists. Clients read it from
/// `GET /api/tasks/defaults`.
pub const DEFAULT_TASK_TEMPLATE: &[(&str, &[&str])] = &[
    (
        "Daily Tasks",
        &[
            "Sweep",
            "Dishes",
            "Organize",
            "Litter Box",
            "Wipe Counters",
            "Trash",
            "Make Bed",
        ],
    ),
    (
        "Self Care",
        &[
            "Brush Hair",
            "Brush Teeth",
            "Wash Face",
            "Vitamins",
            "Yoga",
            "Meds",
        ],
    ),
];

pub enum TaskDay {
    /// Stored lists are still valid for today.
    Current(Vec<TaskList>),
    /// A new day began (or nothing usable was stored); persist this state.
    Reset(TaskState),
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn default_task_names() -> impl Iterator<Item = &'static str> {
    DEFAULT_TASK_TEMPLATE
        .iter()
        .flat_map(|(_, items)| items.iter().copied())
}

pub fn is_default_task(text: &str) -> bool {
    default_task_names().any(|name| name == text)
}

pub fn template() -> Vec<TaskTemplate> {
    DEFAULT_TASK_TEMPLATE
        .iter()
        .map(|(name, items)| TaskTemplate {
            name: *name,
            items: items.to_vec(),
        })
        .collect()
}

pub fn default_tasks() -> Vec<TaskList> {
    DEFAULT_TASK_TEMPLATE
        .iter()
        .map(|(name, items)| TaskList {
            name: (*name).to_string(),
            kind: ListKind::Checklist,
            items: items
                .iter()
                .map(|text| TaskItem {
                    text: (*text).to_string(),
                    completed: false,
                    is_default: true,
                })
                .collect(),
        })
        .collect()
}

pub fn tasks_for_day(stored: TaskState, today: NaiveDate) -> TaskDay {
    let today = date_key(today);
    match stored {
        TaskState {
            last_reset_date: Some(date),
            tasks: Some(tasks),
        } if date == today => TaskDay::Current(tasks),
        _ => TaskDay::Reset(TaskState {
            last_reset_date: Some(today),
            tasks: Some(default_tasks()),
        }),
    }
}

/// State to persist for a client save. The stored reset date is kept so a
/// list loaded before midnight and saved after it still resets on the next
/// read; today is only stamped when no date was stored.
pub fn prepare_save(stored: TaskState, mut tasks: Vec<TaskList>, today: NaiveDate) -> TaskState {
    for item in tasks.iter_mut().flat_map(|list| list.items.iter_mut()) {
        item.is_default = is_default_task(&item.text);
    }
    TaskState {
        last_reset_date: Some(stored.last_reset_date.unwrap_or_else(|| date_key(today))),
        tasks: Some(tasks),
    }
}
