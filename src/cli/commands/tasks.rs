//! Task commands - list, add, close, delete, completed

use anyhow::{Context, bail};
use chrono::{NaiveDate, NaiveDateTime};

use todoist_cli::api::{CompletedQuery, CreateTaskRequest, parse_priority};
use todoist_cli::output::{CompletedListResult, OperationResult, OutputMode, TaskListResult, TaskResult};

use super::{api_client, resolve_project};

/// Arguments of `todoist add`
#[derive(Debug)]
pub struct AddOptions {
    pub content: String,
    pub date: Option<String>,
    pub priority: Option<String>,
    pub project: Option<String>,
    pub labels: Vec<String>,
    pub description: Option<String>,
}

/// List active tasks
pub fn list(filter: Option<&str>, project: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let client = api_client()?;
    let project_id = project.map(|name| resolve_project(&client, name)).transpose()?;

    let tasks = client.list_tasks(filter, project_id.as_deref())?;
    TaskListResult::new(tasks).render(mode);
    Ok(())
}

/// Create a task
pub fn add(options: AddOptions, mode: OutputMode) -> anyhow::Result<()> {
    if options.content.trim().is_empty() {
        bail!("task content must not be empty");
    }

    // Validate local input before any network round-trip
    let priority = options.priority.as_deref().map(parse_priority).transpose()?;

    let client = api_client()?;
    let project_id = options
        .project
        .as_deref()
        .map(|name| resolve_project(&client, name))
        .transpose()?;

    let request = CreateTaskRequest {
        description: options.description,
        project_id,
        labels: options
            .labels
            .into_iter()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect(),
        priority,
        due_string: options.date,
        ..CreateTaskRequest::new(options.content)
    };

    let task = client.create_task(&request)?;
    TaskResult { task }.render(mode);
    Ok(())
}

/// Complete a task
pub fn close(id: &str, mode: OutputMode) -> anyhow::Result<()> {
    let client = api_client()?;
    client.close_task(id)?;
    OperationResult::ok(id, "Task completed").render(mode);
    Ok(())
}

/// Delete a task
pub fn delete(id: &str, mode: OutputMode) -> anyhow::Result<()> {
    let client = api_client()?;
    client.delete_task(id)?;
    OperationResult::ok(id, "Task deleted").render(mode);
    Ok(())
}

/// List completed tasks
pub fn completed(
    project: Option<&str>,
    since: Option<&str>,
    limit: u32,
    mode: OutputMode,
) -> anyhow::Result<()> {
    if limit == 0 {
        bail!("--limit must be a positive integer");
    }
    let since = since.map(normalize_since).transpose()?;

    let client = api_client()?;
    let project_id = project.map(|name| resolve_project(&client, name)).transpose()?;

    let query = CompletedQuery {
        project_id,
        since,
        limit: Some(limit),
    };
    let completed = client.list_completed_tasks(&query)?;
    CompletedListResult { completed }.render(mode);
    Ok(())
}

/// Accept `YYYY-MM-DD` (start of day) or `YYYY-MM-DDTHH:MM:SS`
fn normalize_since(since: &str) -> anyhow::Result<String> {
    if let Ok(day) = NaiveDate::parse_from_str(since, "%Y-%m-%d") {
        return Ok(format!("{}T00:00:00", day.format("%Y-%m-%d")));
    }
    NaiveDateTime::parse_from_str(since, "%Y-%m-%dT%H:%M:%S")
        .map(|at| at.format("%Y-%m-%dT%H:%M:%S").to_string())
        .with_context(|| format!("--since must be a date (YYYY-MM-DD): {since}"))
}
