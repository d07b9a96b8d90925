// server/src/cli/mod.rs

// Declares the CLI modules and re-exports the entry points.

pub mod cli;
pub mod commands;
pub mod handlers;

pub use cli::{run_command, start_cli};
pub use commands::{AppointmentsArgs, CliArgs, Commands, DashboardArgs, LoginArgs, RecordsArgs};
pub use handlers::{
    handle_appointments, handle_dashboard, handle_hash_password, handle_login, handle_logout, handle_nav,
    handle_records, handle_whoami,
};
