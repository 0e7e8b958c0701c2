use crate::cli::Args;
use bbb_club_discovery::config::Config;
use bbb_club_discovery::config::user_prompts::prompt_for_api_domain;
use bbb_club_discovery::error::AppError;

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    println!("bbb_club_discovery {}", env!("CARGO_PKG_VERSION"));
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// Updates configuration based on the provided arguments and saves changes.
/// An empty --config value prompts for the new domain.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_default();

    if let Some(new_domain) = &args.new_api_domain {
        config.api_domain = if new_domain.trim().is_empty() {
            prompt_for_api_domain().await?
        } else {
            new_domain.trim().to_string()
        };
        if config.api_domain.is_empty() {
            return Err(AppError::config_error("API domain cannot be empty"));
        }
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}
