//! Typed Todoist operations
//!
//! Each method builds a [`Request`], runs it through the [`Transport`] and
//! decodes the body. Transport errors pass through untouched.

use log::debug;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use super::error::ApiError;
use super::transport::{DEFAULT_BASE_URL, HttpMethod, Request, Response, RetryPolicy, Transport};
use super::types::{
    CompletedQuery, CompletedTasks, CreateProjectRequest, CreateTaskRequest, Label, Listing,
    Project, Task,
};

/// Todoist API client. Construct one per invocation.
#[derive(Debug)]
pub struct TodoistClient {
    transport: Transport,
}

impl TodoistClient {
    /// Client for the production API with the default retry policy
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_base_url(token, DEFAULT_BASE_URL, RetryPolicy::default())
    }

    /// Client for an arbitrary base URL
    pub fn with_base_url(
        token: &str,
        base_url: &str,
        policy: RetryPolicy,
    ) -> Result<Self, ApiError> {
        if token.trim().is_empty() {
            return Err(ApiError::MissingToken);
        }
        Ok(Self::from_transport(Transport::new(token, base_url, policy)?))
    }

    /// Client over an existing transport
    #[must_use]
    pub const fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// Underlying transport
    #[must_use]
    pub const fn transport(&self) -> &Transport {
        &self.transport
    }

    // =========================================================================
    // TASKS
    // =========================================================================

    /// Active tasks, optionally narrowed by a filter query and/or project
    pub fn list_tasks(
        &self,
        filter: Option<&str>,
        project_id: Option<&str>,
    ) -> Result<Vec<Task>, ApiError> {
        let path = with_query("/tasks", &[("filter", filter), ("project_id", project_id)]);
        let response = self.transport.execute(&Request::new(HttpMethod::Get, path))?;
        decode_list("tasks", &response.body)
    }

    /// Create a task
    pub fn create_task(&self, task: &CreateTaskRequest) -> Result<Task, ApiError> {
        let request = Request::with_json(HttpMethod::Post, "/tasks", task)?;
        let response = self.transport.execute(&request)?;
        decode("task", &response.body)
    }

    /// Mark a task complete
    pub fn close_task(&self, task_id: &str) -> Result<(), ApiError> {
        let path = format!("/tasks/{}/close", urlencoding::encode(task_id));
        let response = self.transport.execute(&Request::new(HttpMethod::Post, path))?;
        expect_no_content(&response)
    }

    /// Permanently delete a task
    pub fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
        let path = format!("/tasks/{}", urlencoding::encode(task_id));
        let response = self.transport.execute(&Request::new(HttpMethod::Delete, path))?;
        expect_no_content(&response)
    }

    /// Completed tasks, most recent first
    pub fn list_completed_tasks(&self, query: &CompletedQuery) -> Result<CompletedTasks, ApiError> {
        let limit = query.limit.map(|limit| limit.to_string());
        let path = with_query(
            "/tasks/completed",
            &[
                ("project_id", query.project_id.as_deref()),
                ("since", query.since.as_deref()),
                ("limit", limit.as_deref()),
            ],
        );
        let response = self.transport.execute(&Request::new(HttpMethod::Get, path))?;
        decode("completed tasks", &response.body)
    }

    // =========================================================================
    // PROJECTS
    // =========================================================================

    /// All projects
    pub fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let response = self.transport.execute(&Request::new(HttpMethod::Get, "/projects"))?;
        decode_list("projects", &response.body)
    }

    /// Create a project
    pub fn create_project(&self, project: &CreateProjectRequest) -> Result<Project, ApiError> {
        let request = Request::with_json(HttpMethod::Post, "/projects", project)?;
        let response = self.transport.execute(&request)?;
        decode("project", &response.body)
    }

    /// Permanently delete a project
    pub fn delete_project(&self, project_id: &str) -> Result<(), ApiError> {
        let path = format!("/projects/{}", urlencoding::encode(project_id));
        let response = self.transport.execute(&Request::new(HttpMethod::Delete, path))?;
        expect_no_content(&response)
    }

    /// Look up a project by name, ignoring case
    pub fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, ApiError> {
        let wanted = name.to_lowercase();
        Ok(self
            .list_projects()?
            .into_iter()
            .find(|project| project.name.to_lowercase() == wanted))
    }

    // =========================================================================
    // LABELS
    // =========================================================================

    /// All personal labels
    pub fn list_labels(&self) -> Result<Vec<Label>, ApiError> {
        let response = self.transport.execute(&Request::new(HttpMethod::Get, "/labels"))?;
        decode_list("labels", &response.body)
    }
}

/// Decode a single JSON value
pub fn decode<T: DeserializeOwned>(what: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::decode(what, e))
}

/// Decode a list response, unwrapping a paginated envelope if present
pub fn decode_list<T: DeserializeOwned>(what: &str, body: &[u8]) -> Result<Vec<T>, ApiError> {
    let listing: Listing<T> = decode(what, body)?;
    if let Some(cursor) = listing.next_cursor() {
        debug!("{what}: more results available (cursor {cursor}), returning first page");
    }
    Ok(listing.into_items())
}

fn expect_no_content(response: &Response) -> Result<(), ApiError> {
    if response.status == 204 {
        Ok(())
    } else {
        Err(ApiError::UnexpectedStatus {
            expected: 204,
            actual: response.status,
        })
    }
}

fn with_query(path: &str, pairs: &[(&str, Option<&str>)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            query.append_pair(key, value);
            any = true;
        }
    }
    if any { format!("{path}?{}", query.finish()) } else { path.to_string() }
}
