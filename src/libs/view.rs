use super::due::{days_until, due_label, DueBadge};
use super::task::{Task, TaskStatus};
use chrono::NaiveDate;
use prettytable::{row, Cell, Row, Table};

/// Longest notes excerpt shown in the list table.
const NOTES_PREVIEW_LEN: usize = 40;

pub struct View {}

impl View {
    /// Builds the task table. Tasks are rendered in the order given.
    pub fn tasks_table(tasks: &[Task], today: NaiveDate) -> Table {
        let mut table = Table::new();

        table.set_titles(row!["ID", "TITLE", "STATUS", "DUE", "DATE", "NOTES"]);
        for task in tasks {
            let days = days_until(task.date.as_deref(), today);
            table.add_row(Row::new(vec![
                Cell::new(&task.id),
                Cell::new(&task.title),
                Cell::new(&status_label(task.status)).style_spec(status_style(task.status)),
                Cell::new(&due_label(days)).style_spec(DueBadge::from_days(days).style()),
                Cell::new(task.date.as_deref().unwrap_or("-")),
                Cell::new(&preview(task.notes.as_deref())),
            ]));
        }

        table
    }

    pub fn tasks(tasks: &[Task], today: NaiveDate) {
        Self::tasks_table(tasks, today).printstd();
    }

    pub fn task(task: &Task, today: NaiveDate) {
        let days = days_until(task.date.as_deref(), today);
        let mut table = Table::new();
        table.add_row(row!["ID", task.id]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["STATUS", status_label(task.status)]);
        table.add_row(row!["DUE", due_label(days)]);
        table.add_row(row!["DATE", task.date.as_deref().unwrap_or("-")]);
        table.add_row(row!["NOTES", task.notes.as_deref().unwrap_or("-")]);
        table.printstd();
    }
}

/// `IN_PROGRESS` reads better as `IN PROGRESS` in a table.
fn status_label(status: TaskStatus) -> String {
    status.as_str().replace('_', " ")
}

fn status_style(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "",
        TaskStatus::InProgress => "Fy",
        TaskStatus::Done => "Fg",
    }
}

fn preview(notes: Option<&str>) -> String {
    let Some(notes) = notes else {
        return "-".to_string();
    };
    let first_line = notes.lines().next().unwrap_or_default();
    if first_line.chars().count() > NOTES_PREVIEW_LEN || notes.lines().count() > 1 {
        let cut: String = first_line.chars().take(NOTES_PREVIEW_LEN).collect();
        format!("{}…", cut)
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_notes() {
        assert_eq!(preview(None), "-");
        assert_eq!(preview(Some("short")), "short");
        assert_eq!(preview(Some("two\nlines")), "two…");
        let long = "a".repeat(NOTES_PREVIEW_LEN + 5);
        assert_eq!(preview(Some(&long)).chars().count(), NOTES_PREVIEW_LEN + 1);
    }

    #[test]
    fn test_table_has_row_per_task() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let tasks = vec![Task::new("1", "a").with_date("2024-03-10"), Task::new("2", "b")];
        let table = View::tasks_table(&tasks, today);
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Today"));
        assert!(rendered.contains("No date"));
    }
}
