//! Labels command - list personal labels

use todoist_cli::output::{LabelListResult, OutputMode};

use super::api_client;

/// List all labels
pub fn labels(mode: OutputMode) -> anyhow::Result<()> {
    let labels = api_client()?.list_labels()?;
    LabelListResult::new(labels).render(mode);
    Ok(())
}
