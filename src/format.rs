//! Human-readable one-line renderings of API resources

use chrono::{DateTime, Days, Local, NaiveDate};

use crate::api::{CompletedTask, Label, Project, Task, format_priority};

/// Render a due date relative to today.
///
/// A datetime wins over a date and renders as local `YYYY-MM-DD HH:MM`.
/// A date renders as `Today`, `Tomorrow`, `Yesterday`, `<date> (overdue)`
/// or the plain date. Unparseable input is returned unchanged.
#[must_use]
pub fn format_due_date(date: &str, datetime: Option<&str>) -> String {
    format_due_date_on(date, datetime, Local::now().date_naive())
}

/// [`format_due_date`] against a fixed `today`
#[must_use]
pub fn format_due_date_on(date: &str, datetime: Option<&str>, today: NaiveDate) -> String {
    if let Some(parsed) = datetime.and_then(|dt| DateTime::parse_from_rfc3339(dt).ok()) {
        return parsed.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }

    if date.is_empty() {
        return String::new();
    }

    let Some(day) = parse_day(date) else {
        return date.to_string();
    };

    if day == today {
        "Today".to_string()
    } else if Some(day) == today.checked_add_days(Days::new(1)) {
        "Tomorrow".to_string()
    } else if Some(day) == today.checked_sub_days(Days::new(1)) {
        "Yesterday".to_string()
    } else if day < today {
        format!("{} (overdue)", day.format("%Y-%m-%d"))
    } else {
        day.format("%Y-%m-%d").to_string()
    }
}

/// Whether `date` (`YYYY-MM-DD`) is before today
#[must_use]
pub fn is_overdue(date: &str) -> bool {
    is_overdue_on(date, Local::now().date_naive())
}

/// [`is_overdue`] against a fixed `today`
#[must_use]
pub fn is_overdue_on(date: &str, today: NaiveDate) -> bool {
    parse_day(date).is_some_and(|day| day < today)
}

fn parse_day(date: &str) -> Option<NaiveDate> {
    // Floating due dates carry a time part ("2024-01-15T10:00:00"); only the
    // day matters here.
    let day = date.get(..10).unwrap_or(date);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Labels as ` @a @b`, or empty
#[must_use]
pub fn format_labels(labels: &[String]) -> String {
    if labels.is_empty() {
        return String::new();
    }
    format!(" @{}", labels.join(" @"))
}

/// `  <id> [P1] Content (due) @label`
#[must_use]
pub fn format_task_line(task: &Task) -> String {
    let due = task
        .due
        .as_ref()
        .map(|due| format_due_date(&due.date, due.datetime.as_deref()))
        .filter(|d| !d.is_empty())
        .map(|d| format!(" ({d})"))
        .unwrap_or_default();

    format!(
        "  {} [{}] {}{}{}",
        task.id,
        format_priority(task.priority),
        task.content,
        due,
        format_labels(&task.labels)
    )
}

/// `  * Name (id)` where `*` marks a favorite
#[must_use]
pub fn format_project_line(project: &Project) -> String {
    let marker = if project.is_favorite { "*" } else { " " };
    format!("  {marker} {} ({})", project.name, project.id)
}

/// `  * @name (id)` where `*` marks a favorite
#[must_use]
pub fn format_label_line(label: &Label) -> String {
    let marker = if label.is_favorite { "*" } else { " " };
    format!("  {marker} @{} ({})", label.name, label.id)
}

/// `  <task id> [done <completed at>] Content`
#[must_use]
pub fn format_completed_task_line(task: &CompletedTask) -> String {
    let completed = DateTime::parse_from_rfc3339(&task.completed_at).map_or_else(
        |_| task.completed_at.clone(),
        |at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    );
    let id = if task.task_id.is_empty() { &task.id } else { &task.task_id };
    format!("  {id} [done {completed}] {}", task.content)
}
