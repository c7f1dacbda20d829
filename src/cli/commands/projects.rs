//! Projects command - list, add, delete projects

use anyhow::bail;

use todoist_cli::api::CreateProjectRequest;
use todoist_cli::output::{OperationResult, OutputMode, ProjectListResult, ProjectResult};

use super::api_client;
use crate::cli::app::ProjectAction;

/// Handle project subcommands
pub fn projects(action: ProjectAction, mode: OutputMode) -> anyhow::Result<()> {
    match action {
        ProjectAction::List => list(mode),
        ProjectAction::Add { name } => add(&name, mode),
        ProjectAction::Delete { id } => delete(&id, mode),
    }
}

fn list(mode: OutputMode) -> anyhow::Result<()> {
    let projects = api_client()?.list_projects()?;
    ProjectListResult::new(projects).render(mode);
    Ok(())
}

fn add(name: &str, mode: OutputMode) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        bail!("project name must not be empty");
    }
    let request = CreateProjectRequest {
        name: name.to_string(),
    };
    let project = api_client()?.create_project(&request)?;
    ProjectResult { project }.render(mode);
    Ok(())
}

fn delete(id: &str, mode: OutputMode) -> anyhow::Result<()> {
    api_client()?.delete_project(id)?;
    OperationResult::ok(id, "Project deleted").render(mode);
    Ok(())
}
