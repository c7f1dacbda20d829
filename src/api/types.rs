//! Resource shapes exchanged with the Todoist API
//!
//! Field names follow the current API; aliases accept the older REST v2
//! spellings so either payload decodes into the same struct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// TASKS
// =============================================================================

/// An active task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task ID
    pub id: String,
    /// Owning project
    #[serde(default)]
    pub project_id: Option<String>,
    /// Section within the project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Task title
    pub content: String,
    /// Longer description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Whether the task is completed
    #[serde(default, rename = "checked", alias = "is_completed")]
    pub is_completed: bool,
    /// Label names
    #[serde(default)]
    pub labels: Vec<String>,
    /// Parent task for subtasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Position among siblings
    #[serde(default, rename = "child_order", alias = "order")]
    pub order: i64,
    /// API priority: 1 = normal, 4 = urgent
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<Due>,
    /// Hard deadline, separate from the due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Deadline>,
    /// Number of comments
    #[serde(default, alias = "comment_count")]
    pub note_count: u32,
    /// User who created the task
    #[serde(default, rename = "added_by_uid", alias = "creator_id")]
    pub creator_id: Option<String>,
    /// Creation timestamp
    #[serde(default, rename = "added_at", alias = "created_at")]
    pub created_at: Option<String>,
    /// Completion timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    /// Assignee
    #[serde(
        default,
        rename = "responsible_uid",
        alias = "assignee_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub assignee_id: Option<String>,
    /// User who assigned the task
    #[serde(
        default,
        rename = "assigned_by_uid",
        alias = "assigner_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigner_id: Option<String>,
    /// Estimated duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<TaskDuration>,
}

const fn default_priority() -> u8 {
    1
}

/// A task's due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Due {
    /// Human-entered due string ("every monday")
    #[serde(default)]
    pub string: String,
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`
    #[serde(default)]
    pub date: String,
    /// Whether the due date repeats
    #[serde(default)]
    pub is_recurring: bool,
    /// RFC 3339 timestamp when a time is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    /// IANA timezone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// IETF language tag of `string`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// A task's hard deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    /// `YYYY-MM-DD`
    pub date: String,
    /// IETF language tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

/// A task's estimated duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDuration {
    /// Amount of `unit`
    pub amount: u32,
    /// `minute` or `day`
    pub unit: String,
}

/// Payload for creating a task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title
    pub content: String,
    /// Longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Target section
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Parent task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Position among siblings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Label names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// API priority (already inverted, 4 = urgent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    /// Natural-language due date ("tomorrow")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// RFC 3339 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    /// Language of `due_string`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_lang: Option<String>,
    /// Assignee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<String>,
}

impl CreateTaskRequest {
    /// Request with only a title
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

// =============================================================================
// COMPLETED TASKS
// =============================================================================

/// A completed task. Different shape from [`Task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTask {
    /// Completion record ID
    #[serde(default)]
    pub id: String,
    /// ID of the task that was completed
    #[serde(default)]
    pub task_id: String,
    /// Owning project
    #[serde(default)]
    pub project_id: String,
    /// Section within the project
    #[serde(default)]
    pub section_id: Option<String>,
    /// Task title
    pub content: String,
    /// Completion timestamp
    #[serde(default)]
    pub completed_at: String,
    /// Number of comments
    #[serde(default)]
    pub note_count: u32,
}

/// Completed tasks plus the projects they belong to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTasks {
    /// Completed tasks, most recent first
    #[serde(default, alias = "results")]
    pub items: Vec<CompletedTask>,
    /// Projects referenced by `items`, keyed by project ID
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,
}

/// Filters for listing completed tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedQuery {
    /// Only tasks from this project
    pub project_id: Option<String>,
    /// Only tasks completed at or after this timestamp
    pub since: Option<String>,
    /// Maximum number of results
    pub limit: Option<u32>,
}

// =============================================================================
// PROJECTS AND LABELS
// =============================================================================

/// A project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project ID
    pub id: String,
    /// Project name
    pub name: String,
    /// Position among siblings
    #[serde(default, rename = "child_order", alias = "order")]
    pub order: i64,
    /// Color name
    #[serde(default)]
    pub color: String,
    /// Whether the project is shared
    #[serde(default)]
    pub is_shared: bool,
    /// Whether the project is a favorite
    #[serde(default)]
    pub is_favorite: bool,
    /// Whether this is the inbox
    #[serde(default, rename = "inbox_project", alias = "is_inbox_project")]
    pub is_inbox_project: bool,
    /// `list`, `board` or `calendar`
    #[serde(default)]
    pub view_style: String,
    /// Parent project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Creator
    #[serde(default, rename = "creator_uid", skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
}

/// Payload for creating a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name
    pub name: String,
}

/// A personal label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label ID
    pub id: String,
    /// Label name
    pub name: String,
    /// Color name
    #[serde(default)]
    pub color: String,
    /// Position in the label list
    #[serde(default)]
    pub order: i64,
    /// Whether the label is a favorite
    #[serde(default)]
    pub is_favorite: bool,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// A list response: either a bare array or a paginated envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    /// `{"results": [...], "next_cursor": ...}`
    Page {
        /// Items on this page
        results: Vec<T>,
        /// Cursor for the next page, if any
        #[serde(default)]
        next_cursor: Option<String>,
    },
    /// `[...]`
    Flat(Vec<T>),
}

impl<T> Listing<T> {
    /// Cursor for the next page, if the API sent one
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            Self::Page { next_cursor, .. } => next_cursor.as_deref(),
            Self::Flat(_) => None,
        }
    }

    /// Flat items, in API order
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page { results, .. } => results,
            Self::Flat(items) => items,
        }
    }
}
