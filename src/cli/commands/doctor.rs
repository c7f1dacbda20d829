//! Doctor command - validate installation and configuration

use std::env;

use anyhow::bail;

use todoist_cli::config::{self, Config, mask_token};
use todoist_cli::output::{CheckStatus, DoctorCheck, DoctorReport, OutputMode};

use super::client_for;

const BINARY_NAME: &str = "todoist";

/// Run all checks and print the report. Fails when any check fails.
pub fn doctor(mode: OutputMode) -> anyhow::Result<()> {
    let mut checks = vec![check_binary()];
    checks.extend(check_config_file());
    checks.extend(check_token_and_api());

    let report = DoctorReport::from_checks(checks);
    report.render(mode);

    if !report.all_ok {
        bail!("doctor checks failed");
    }
    Ok(())
}

fn check_binary() -> DoctorCheck {
    which::which(BINARY_NAME).map_or_else(
        |_| {
            DoctorCheck::new(
                "Binary",
                CheckStatus::Warn,
                format!("{BINARY_NAME} not found in PATH (running from local build?)"),
            )
        },
        |path| DoctorCheck::new("Binary", CheckStatus::Ok, path.display().to_string()),
    )
}

fn check_config_file() -> Vec<DoctorCheck> {
    let path = Config::path();
    if !Config::exists() {
        return vec![DoctorCheck::new(
            "Config file",
            CheckStatus::Fail,
            format!("{} not found. Run 'todoist configure'", path.display()),
        )];
    }

    let permissions = match Config::permissions() {
        Ok(0o600) => DoctorCheck::new("Config permissions", CheckStatus::Ok, "600 (secure)"),
        Ok(mode) => DoctorCheck::new(
            "Config permissions",
            CheckStatus::Warn,
            format!("{mode:o} (should be 600). Fix: chmod 600 {}", path.display()),
        ),
        Err(e) => DoctorCheck::new(
            "Config permissions",
            CheckStatus::Fail,
            format!("Cannot read permissions: {e}"),
        ),
    };

    vec![
        DoctorCheck::new("Config file", CheckStatus::Ok, path.display().to_string()),
        permissions,
    ]
}

fn check_token_and_api() -> Vec<DoctorCheck> {
    let loaded = match Config::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            return vec![DoctorCheck::new(
                "Config format",
                CheckStatus::Fail,
                format!("Failed to parse config: {e}"),
            )];
        },
    };

    let token = config::resolve_token_from(Some(&loaded), env::var(config::TOKEN_ENV).ok());
    if token.is_empty() {
        return vec![DoctorCheck::new(
            "Access token",
            CheckStatus::Fail,
            format!("Not found in config or {} env var", config::TOKEN_ENV),
        )];
    }

    let token_check = DoctorCheck::new(
        "Access token",
        CheckStatus::Ok,
        format!("Present ({})", mask_token(&token)),
    );

    let api_check = match count_projects(&token) {
        Ok(count) => DoctorCheck::new(
            "API connection",
            CheckStatus::Ok,
            format!("Success ({count} project(s) found)"),
        ),
        Err(e) => DoctorCheck::new("API connection", CheckStatus::Fail, format!("Failed: {e:#}")),
    };

    vec![token_check, api_check]
}

fn count_projects(token: &str) -> anyhow::Result<usize> {
    Ok(client_for(token)?.list_projects()?.len())
}
