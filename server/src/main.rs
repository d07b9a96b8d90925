// server/src/main.rs

// Main entry point for the CareBase CLI. Initializes logging and hands off
// to the command dispatcher.

use anyhow::Result;
use carebase_server::cli::start_cli;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    start_cli().await
}
