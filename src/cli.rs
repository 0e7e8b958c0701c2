use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use std::path::PathBuf;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Whether the run only touches configuration and never contacts the service.
pub fn is_config_operation(args: &Args) -> bool {
    args.new_api_domain.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
        || args.list_config
}

/// Basketball club discovery
///
/// Finds every club that fields teams in the leagues of a federation
/// subdivision, lets you pick one and prints a detailed analysis of its
/// teams, tables and upcoming games.
///
/// The home subdivision is asked for when --verband is not given. Clubs are
/// listed page by page:
/// - Type a number to pick a club
/// - Type 'v' for the next page and 'z' for the previous one
/// - Type 'q' to quit
#[derive(Parser, Debug)]
#[command(about, version, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Id of the home subdivision (Verband) to search, e.g. 2.
    #[arg(long = "verband", short = 'v', help_heading = "Discovery")]
    pub verband: Option<i64>,

    /// Analyze the club with this id directly instead of choosing interactively.
    #[arg(long = "club", help_heading = "Discovery")]
    pub club: Option<i64>,

    /// Only offer clubs whose name or team names contain this text.
    #[arg(long = "search", short = 's', help_heading = "Discovery", value_name = "TEXT")]
    pub search: Option<String>,

    /// Number of leagues fetched concurrently. Overrides the configured value.
    /// The request rate stays the same whatever the worker count.
    #[arg(long = "workers", short = 'w', help_heading = "Discovery")]
    pub workers: Option<usize>,

    /// Clubs shown per page in the club chooser.
    #[arg(
        long = "page-size",
        help_heading = "Discovery",
        default_value_t = bbb_club_discovery::constants::selection::DEFAULT_PAGE_SIZE
    )]
    pub page_size: usize,

    /// Write the club analysis as JSON to this file.
    #[arg(long = "export", short = 'e', help_heading = "Export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Write the club analysis as JSON to an automatically named file in the
    /// current directory.
    #[arg(long = "export-auto", help_heading = "Export", conflicts_with = "export")]
    pub export_auto: bool,

    /// Update API domain in config. Will prompt for new domain if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "API_DOMAIN",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_api_domain: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also print logs to the terminal. Logs always go to the log file.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_discovery_flags() {
        let args = Args::try_parse_from([
            "bbb_club_discovery",
            "--verband",
            "2",
            "--club",
            "4711",
            "--workers",
            "8",
            "--export-auto",
            "--search",
            "baskets",
        ])
        .unwrap();

        assert_eq!(args.verband, Some(2));
        assert_eq!(args.club, Some(4711));
        assert_eq!(args.workers, Some(8));
        assert!(args.export_auto);
        assert_eq!(args.search.as_deref(), Some("baskets"));
        assert_eq!(args.page_size, 30);
        assert!(!is_config_operation(&args));
    }

    #[test]
    fn test_export_flags_conflict() {
        let result = Args::try_parse_from([
            "bbb_club_discovery",
            "--export",
            "out.json",
            "--export-auto",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_without_value_prompts() {
        let args = Args::try_parse_from(["bbb_club_discovery", "--config"]).unwrap();
        assert_eq!(args.new_api_domain.as_deref(), Some(""));
        assert!(is_config_operation(&args));
    }
}
