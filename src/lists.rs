use crate::models::{ChecklistItem, ListColumn, ListItem, ListKind};

/// Brings a saved column into its canonical shape: checklist items become
/// `{text, completed}` with blank ones dropped, and a notes column holds
/// exactly one note.
pub fn normalize_column(mut column: ListColumn) -> ListColumn {
    column.name = column.name.trim().to_string();
    column.items = match column.kind {
        ListKind::Checklist => column
            .items
            .into_iter()
            .map(|item| match item {
                ListItem::Check(check) => check,
                ListItem::Note(text) => ChecklistItem {
                    text,
                    completed: false,
                },
            })
            .map(|mut check| {
                check.text = check.text.trim().to_string();
                check
            })
            .filter(|check| !check.text.is_empty())
            .map(ListItem::Check)
            .collect(),
        ListKind::Notes => {
            let note = column
                .items
                .into_iter()
                .next()
                .map(|item| match item {
                    ListItem::Note(text) => text,
                    ListItem::Check(check) => check.text,
                })
                .unwrap_or_default();
            vec![ListItem::Note(note)]
        }
    };
    column
}

pub fn normalize_lists(lists: Vec<ListColumn>) -> Vec<ListColumn> {
    lists.into_iter().map(normalize_column).collect()
}

/// Short comma-joined view of a column's items.
pub fn preview(column: &ListColumn) -> String {
    if column.items.is_empty() {
        return "No items".to_string();
    }
    column
        .items
        .iter()
        .map(|item| match item {
            ListItem::Check(check) => check.text.as_str(),
            ListItem::Note(text) => text.as_str(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
