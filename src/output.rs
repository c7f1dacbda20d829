//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::api::{ApiError, CompletedTasks, Label, Project, Task};
use crate::format;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Result of listing active tasks
#[derive(Debug, Serialize)]
pub struct TaskListResult {
    /// Number of tasks
    pub total: usize,
    /// Tasks in API order
    pub tasks: Vec<Task>,
}

impl TaskListResult {
    /// Wrap a task list
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            total: tasks.len(),
            tasks,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.tasks.is_empty() {
            println!("No tasks found.");
            return;
        }
        for task in &self.tasks {
            println!("{}", format::format_task_line(task));
        }
    }
}

/// A single created task
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct TaskResult {
    /// The task
    pub task: Task,
}

impl TaskResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Created task: {} (ID: {})", self.task.content, self.task.id);
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of listing projects
#[derive(Debug, Serialize)]
pub struct ProjectListResult {
    /// Number of projects
    pub total: usize,
    /// Projects in API order
    pub projects: Vec<Project>,
}

impl ProjectListResult {
    /// Wrap a project list
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            total: projects.len(),
            projects,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.projects.is_empty() {
                    println!("No projects found.");
                }
                for project in &self.projects {
                    println!("{}", format::format_project_line(project));
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// A single created project
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ProjectResult {
    /// The project
    pub project: Project,
}

impl ProjectResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("Created project: {} (ID: {})", self.project.name, self.project.id);
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of listing labels
#[derive(Debug, Serialize)]
pub struct LabelListResult {
    /// Number of labels
    pub total: usize,
    /// Labels in API order
    pub labels: Vec<Label>,
}

impl LabelListResult {
    /// Wrap a label list
    #[must_use]
    pub fn new(labels: Vec<Label>) -> Self {
        Self {
            total: labels.len(),
            labels,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.labels.is_empty() {
                    println!("No labels found.");
                }
                for label in &self.labels {
                    println!("{}", format::format_label_line(label));
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of listing completed tasks
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CompletedListResult {
    /// Completed tasks and their projects
    pub completed: CompletedTasks,
}

impl CompletedListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.completed.items.is_empty() {
                    println!("No completed tasks found.");
                }
                for task in &self.completed.items {
                    println!("{}", format::format_completed_task_line(task));
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// ID of the affected resource
    pub id: String,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Successful operation on `id`
    #[must_use]
    pub fn ok(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            id: id.into(),
            message: message.into(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}: {}", self.message, self.id),
            OutputMode::Json => print_json(self),
        }
    }
}

/// Result of `configure show`
#[derive(Debug, Serialize)]
pub struct ConfigShowResult {
    /// Config file location
    pub config_path: String,
    /// Whether the file exists
    pub exists: bool,
    /// Masked token, empty when unset
    pub access_token: String,
}

impl ConfigShowResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if !self.exists {
                    println!("No configuration file found.");
                    println!("Run 'todoist configure' to set up.");
                    return;
                }
                println!("Config file: {}", self.config_path);
                println!("Access token: {}", self.access_token);
            },
            OutputMode::Json => print_json(self),
        }
    }
}

// =============================================================================
// DOCTOR
// =============================================================================

/// Outcome of a single doctor check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Works, but something should be fixed
    Warn,
    /// Check failed
    Fail,
}

/// A single doctor check
#[derive(Debug, Clone, Serialize)]
pub struct DoctorCheck {
    /// What was checked
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
    /// Detail or remedy
    pub message: String,
}

impl DoctorCheck {
    /// Build a check
    #[must_use]
    pub fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
        }
    }
}

/// Result of `doctor`
#[derive(Debug, Serialize)]
pub struct DoctorReport {
    /// Checks in the order they ran
    pub checks: Vec<DoctorCheck>,
    /// One-line summary
    pub summary: String,
    /// Whether no check failed
    pub all_ok: bool,
}

impl DoctorReport {
    /// Summarize a set of checks. Warnings do not fail the report.
    #[must_use]
    pub fn from_checks(checks: Vec<DoctorCheck>) -> Self {
        let failed = checks.iter().filter(|c| c.status == CheckStatus::Fail).count();
        let summary = if failed == 0 {
            "All checks passed!".to_string()
        } else {
            format!("{failed} check(s) failed. Run 'todoist configure' to fix.")
        };
        Self {
            checks,
            summary,
            all_ok: failed == 0,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("Todoist CLI Doctor");
        println!("==================\n");
        for check in &self.checks {
            let tag = match check.status {
                CheckStatus::Ok => "  OK".green(),
                CheckStatus::Warn => "WARN".yellow(),
                CheckStatus::Fail => "FAIL".red(),
            };
            println!("  [{tag}] {:<20} {}", format!("{}:", check.name), check.message);
        }
        println!("\n{}", self.summary);
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// A terminal error as shown to the user
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    /// Human-readable message
    pub error: String,
    /// Error category, when the error came from the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// HTTP status, 0 when no response was obtained
    pub status: u16,
}

impl ErrorOutput {
    /// Build from any error, extracting API details when present
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        let api = err.downcast_ref::<ApiError>();
        Self {
            error: format!("{err:#}"),
            kind: api.map(|api| api.kind().as_str().to_string()),
            status: api.map_or(0, ApiError::status),
        }
    }

    /// Print to stderr
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => eprintln!("Error: {}", self.error),
            OutputMode::Json => {
                eprintln!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
