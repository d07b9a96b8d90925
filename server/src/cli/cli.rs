// server/src/cli/cli.rs

// Entry point for the CareBase CLI: parses arguments, loads the
// configuration, restores the persisted session and dispatches.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use carebase_lib::config::load_app_config;
use carebase_security::SessionManager;

use crate::cli::commands::{CliArgs, Commands};
use crate::cli::handlers::{
    handle_appointments, handle_dashboard, handle_hash_password, handle_login, handle_logout, handle_nav,
    handle_records, handle_whoami,
};

pub async fn start_cli() -> Result<()> {
    let args = CliArgs::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(args, &mut out).await?;
    out.flush()?;
    Ok(())
}

/// Runs one parsed invocation, writing its output to `out`.
pub async fn run_command(args: CliArgs, out: &mut dyn Write) -> Result<()> {
    // No session or data needed to hash a password.
    if let Commands::HashPassword { password } = &args.command {
        return handle_hash_password(password, out);
    }

    let config = load_app_config(args.config.clone()).context("Failed to load configuration")?;
    debug!("Using configuration: {:?}", config);
    let session = SessionManager::from_config(&config).context("Failed to initialize session")?;
    if let Some(profile) = session.restore_session()? {
        info!("Resuming session for {}", profile.email());
    }

    match args.command {
        Commands::Login(login) => handle_login(&session, &login, out).await,
        Commands::Logout => handle_logout(&session, out),
        Commands::Whoami => handle_whoami(&session, out),
        Commands::Nav => handle_nav(&session, out),
        Commands::Dashboard(dashboard) => {
            let today = dashboard.today.unwrap_or_else(|| chrono::Local::now().date_naive());
            handle_dashboard(&session, today, out)
        }
        Commands::Appointments(appointments) => handle_appointments(&session, &appointments, out),
        Commands::Records(records) => handle_records(&session, &records, out),
        Commands::HashPassword { password } => handle_hash_password(&password, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(config: &std::path::Path, rest: &[&str]) -> CliArgs {
        let config = config.to_string_lossy().to_string();
        let mut argv = vec!["carebase-cli", "--config", config.as_str()];
        argv.extend_from_slice(rest);
        CliArgs::try_parse_from(argv).unwrap()
    }

    async fn run(config: &std::path::Path, rest: &[&str]) -> Result<String> {
        let mut buffer = Vec::new();
        run_command(args(config, rest), &mut buffer).await?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    #[tokio::test]
    async fn session_persists_between_invocations() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("carebase.yaml");
        fs::write(&config, "data_directory: data\nsession:\n  store: sled\n  login_delay_ms: 0\n").unwrap();

        let greeting = run(&config, &["login", "--email", "john@example.com", "--password", "x"]).await.unwrap();
        assert!(greeting.contains("John Doe"));

        let whoami = run(&config, &["whoami"]).await.unwrap();
        assert!(whoami.starts_with("John Doe <john@example.com>"));

        run(&config, &["logout"]).await.unwrap();
        let whoami = run(&config, &["whoami"]).await.unwrap();
        assert_eq!(whoami, "Not signed in\n");
    }

    #[tokio::test]
    async fn failed_login_reports_the_generic_message() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("carebase.yaml");
        fs::write(&config, "session:\n  store: in_memory\n  login_delay_ms: 0\n").unwrap();

        let err = run(&config, &["login", "--email", "ghost@example.com", "--password", "x"])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(run(&dir.path().join("absent.yaml"), &["nav"]).await.is_err());
    }
}
