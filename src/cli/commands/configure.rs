//! Configure command - store the access token, show current config

use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};

use todoist_cli::config::{Config, mask_token};
use todoist_cli::output::{ConfigShowResult, OperationResult, OutputMode};

/// Store an access token, prompting for it when not given
pub fn configure(token: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let path = Config::path();

    let token = if let Some(token) = token {
        token.trim().to_string()
    } else {
        let stdin = io::stdin();
        let mut input = stdin.lock();

        println!("Todoist CLI Configuration");
        println!("=========================\n");

        if Config::exists() {
            println!("Existing configuration found at {}", path.display());
            let reply = prompt(&mut input, "Overwrite? [y/N] ")?;
            if !reply.eq_ignore_ascii_case("y") {
                println!("Configuration cancelled.");
                return Ok(());
            }
            println!();
        }

        println!("Get your API token from:");
        println!("https://todoist.com/app/settings/integrations/developer\n");
        prompt(&mut input, "Todoist API Token: ")?
    };

    if token.is_empty() {
        bail!("access token is required");
    }

    Config {
        access_token: token,
    }
    .save()
    .context("failed to save configuration")?;

    if mode == OutputMode::Json {
        OperationResult::ok(path.display().to_string(), "Configuration saved").render(mode);
    } else {
        println!("\nConfiguration saved to {}\n", path.display());
        println!("Test your setup:");
        println!("  todoist list");
        println!("  todoist projects\n");
        println!("Troubleshoot:");
        println!("  todoist doctor");
    }
    Ok(())
}

/// Print the current configuration with the token masked
pub fn configure_show(mode: OutputMode) -> anyhow::Result<()> {
    let config = Config::load().context("failed to load config")?;
    let access_token = if config.access_token.is_empty() {
        String::new()
    } else {
        mask_token(&config.access_token)
    };

    ConfigShowResult {
        config_path: Config::path().display().to_string(),
        exists: Config::exists(),
        access_token,
    }
    .render(mode);
    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> anyhow::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}
