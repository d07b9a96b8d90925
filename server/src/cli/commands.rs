// server/src/cli/commands.rs

// Command-line arguments and subcommands for the CareBase CLI, built with
// clap's derive API.
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use carebase_lib::views::StatusBucket;

#[derive(Parser, Debug)]
#[command(name = "carebase-cli")]
#[command(version = "0.1.0")]
#[command(about = "CareBase patient, doctor and admin dashboards")]
pub struct CliArgs {
    /// Configuration file. Falls back to $CAREBASE_CONFIG, then ./carebase.yaml.
    #[arg(long, short = 'c', global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    /// Sign in and persist the session
    Login(LoginArgs),
    /// Sign out and forget the persisted session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List the menu entries for the signed-in role
    Nav,
    /// Render the dashboard of the signed-in role
    Dashboard(DashboardArgs),
    /// List appointments grouped by month
    Appointments(AppointmentsArgs),
    /// List medical records grouped by year
    Records(RecordsArgs),
    /// Print an Argon2 hash for a credentials file
    HashPassword {
        #[arg(long)]
        password: String,
    },
}

#[derive(Debug, Args, PartialEq)]
pub struct LoginArgs {
    #[arg(long, short = 'e')]
    pub email: String,
    #[arg(long, short = 'p', env = "CAREBASE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args, PartialEq)]
pub struct DashboardArgs {
    /// Reference date for "today", e.g. 2023-06-15. Defaults to the local date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args, PartialEq)]
pub struct AppointmentsArgs {
    /// all, upcoming or past
    #[arg(long, short = 'f', default_value_t = StatusBucket::All)]
    pub filter: StatusBucket,
    #[arg(long, short = 's', default_value = "")]
    pub search: String,
}

#[derive(Debug, Args, PartialEq)]
pub struct RecordsArgs {
    #[arg(long, short = 's', default_value = "")]
    pub search: String,
    /// Only records that carry attachments
    #[arg(long)]
    pub with_attachments: bool,
    /// Patient whose records to show. Required for doctors and admins.
    #[arg(long, value_name = "PATIENT_ID")]
    pub patient: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_appointment_filters() {
        let args = CliArgs::try_parse_from(["carebase-cli", "appointments", "--filter", "past", "-s", "Chen"]).unwrap();
        assert_eq!(
            args.command,
            Commands::Appointments(AppointmentsArgs {
                filter: StatusBucket::Past,
                search: "Chen".to_string(),
            })
        );
    }

    #[test]
    fn rejects_unknown_filter() {
        assert!(CliArgs::try_parse_from(["carebase-cli", "appointments", "--filter", "soon"]).is_err());
    }

    #[test]
    fn config_flag_is_global() {
        let args = CliArgs::try_parse_from(["carebase-cli", "whoami", "--config", "/tmp/c.yaml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.yaml")));
        assert_eq!(args.command, Commands::Whoami);
    }

    #[test]
    fn parses_dashboard_date() {
        let args = CliArgs::try_parse_from(["carebase-cli", "dashboard", "--today", "2023-06-15"]).unwrap();
        assert_eq!(
            args.command,
            Commands::Dashboard(DashboardArgs {
                today: NaiveDate::from_ymd_opt(2023, 6, 15),
            })
        );
    }
}
