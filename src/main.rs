// src/main.rs
mod app;
mod cli;
mod commands;
mod logging;

use bbb_club_discovery::error::AppError;
use clap::Parser;
use cli::Args;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard flushes buffered log lines when dropped at the end of main
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return commands::handle_list_config_command().await;
    }

    if cli::is_config_operation(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    app::run_discovery(&args).await
}
