//! CLI definitions and entry point

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use super::commands;
use todoist_cli::output::{ErrorOutput, OutputMode};

/// todoist - Todoist from the command line
#[derive(Parser, Debug)]
#[command(
    name = "todoist",
    version,
    about = "Todoist from the command line",
    long_about = "Manage Todoist tasks, projects and labels from the terminal.\n\n\
                  The access token is read from ~/.todoist/config or the\n\
                  TODOIST_ACCESS_TOKEN environment variable."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List active tasks
    List {
        /// Filter query (today, overdue, p1, @label, #project)
        #[arg(short, long)]
        filter: Option<String>,

        /// Only tasks in this project (by name)
        #[arg(long)]
        project: Option<String>,
    },

    /// Add a new task
    Add {
        /// Task content
        content: String,

        /// Due date (today, tomorrow, YYYY-MM-DD, ...)
        #[arg(short, long)]
        date: Option<String>,

        /// Priority: 1 (urgent) to 4 (normal)
        #[arg(short, long)]
        priority: Option<String>,

        /// Target project (by name)
        #[arg(long)]
        project: Option<String>,

        /// Comma-separated labels
        #[arg(short, long, value_delimiter = ',')]
        labels: Vec<String>,

        /// Longer description
        #[arg(long)]
        description: Option<String>,
    },

    /// Complete a task
    Close {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// Manage projects (list, add, delete)
    Projects {
        #[command(subcommand)]
        action: Option<ProjectAction>,
    },

    /// List labels
    Labels,

    /// List completed tasks
    Completed {
        /// Only tasks from this project (by name)
        #[arg(long)]
        project: Option<String>,

        /// Only tasks completed since this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Maximum number of tasks
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },

    /// Set up the access token, or show the current configuration
    Configure {
        /// Token to store (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,

        #[command(subcommand)]
        action: Option<ConfigureAction>,
    },

    /// Validate installation and configuration
    Doctor,

    /// Show version
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// List projects
    List,

    /// Create a project
    Add {
        /// Project name
        name: String,
    },

    /// Delete a project
    Delete {
        /// Project ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigureAction {
    /// Show the current configuration (token masked)
    Show,
}

/// Run the CLI
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match dispatch(cli.command, output_mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ErrorOutput::from_error(&err).render(output_mode);
            ExitCode::FAILURE
        },
    }
}

fn dispatch(command: Option<Command>, output_mode: OutputMode) -> anyhow::Result<()> {
    match command {
        Some(Command::List { filter, project }) => {
            commands::list(filter.as_deref(), project.as_deref(), output_mode)
        },
        Some(Command::Add {
            content,
            date,
            priority,
            project,
            labels,
            description,
        }) => commands::add(
            commands::AddOptions {
                content,
                date,
                priority,
                project,
                labels,
                description,
            },
            output_mode,
        ),
        Some(Command::Close { id }) => commands::close(&id, output_mode),
        Some(Command::Delete { id }) => commands::delete(&id, output_mode),
        Some(Command::Projects { action }) => {
            commands::projects(action.unwrap_or(ProjectAction::List), output_mode)
        },
        Some(Command::Labels) => commands::labels(output_mode),
        Some(Command::Completed {
            project,
            since,
            limit,
        }) => commands::completed(project.as_deref(), since.as_deref(), limit, output_mode),
        Some(Command::Configure {
            action: Some(ConfigureAction::Show),
            ..
        }) => commands::configure_show(output_mode),
        Some(Command::Configure { token, action: None }) => {
            commands::configure(token.as_deref(), output_mode)
        },
        Some(Command::Doctor) => commands::doctor(output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("todoist v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("todoist v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'todoist --help' for usage");
                println!("Run 'todoist configure' to get started");
            }
            Ok(())
        },
    }
}
