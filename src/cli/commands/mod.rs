//! Command implementations

mod configure;
mod doctor;
mod labels;
mod projects;
mod tasks;

pub use configure::{configure, configure_show};
pub use doctor::doctor;
pub use labels::labels;
pub use projects::projects;
pub use tasks::{AddOptions, add, close, completed, delete, list};

use anyhow::{Context, bail};
use todoist_cli::api::{DEFAULT_BASE_URL, RetryPolicy, TodoistClient};
use todoist_cli::config::{self, API_BASE_ENV};

/// API base URL, honouring the override environment variable
pub fn api_base_url() -> String {
    std::env::var(API_BASE_ENV)
        .ok()
        .filter(|base| !base.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Build a client from the resolved token
pub fn api_client() -> anyhow::Result<TodoistClient> {
    let token = config::resolve_token().context("failed to load config")?;
    if token.is_empty() {
        bail!(
            "no access token found\n\n\
             Run 'todoist configure' to set up, or set {}",
            config::TOKEN_ENV
        );
    }
    client_for(&token)
}

/// Build a client for an explicit token
pub fn client_for(token: &str) -> anyhow::Result<TodoistClient> {
    TodoistClient::with_base_url(token, &api_base_url(), RetryPolicy::default())
        .context("failed to create API client")
}

/// Resolve a project name to its ID
pub fn resolve_project(client: &TodoistClient, name: &str) -> anyhow::Result<String> {
    client
        .find_project_by_name(name)
        .context("failed to fetch projects")?
        .map(|project| project.id)
        .with_context(|| format!("project not found: {name}"))
}
