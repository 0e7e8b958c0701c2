//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default base URL of the federation service
pub const DEFAULT_API_DOMAIN: &str = "https://www.basketball-bund.net";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 10;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("bbb_club_discovery/", env!("CARGO_PKG_VERSION"));

/// Request pacing shared by every worker
pub mod rate_limit {
    /// Minimum spacing between two outbound requests (milliseconds)
    pub const MIN_REQUEST_INTERVAL_MS: u64 = 100;

    /// Largest spacing accepted from config
    pub const MAX_REQUEST_INTERVAL_MS: u64 = 60_000;
}

/// Bounded worker pool sizing
pub mod workers {
    /// Default number of concurrent league fetches
    pub const DEFAULT_MAX_WORKERS: usize = 5;

    /// Upper bound accepted from config or CLI
    pub const MAX_WORKERS_LIMIT: usize = 64;
}

/// League listing pagination
pub mod pagination {
    /// Offset after which a subdivision listing is abandoned
    pub const DEFAULT_OFFSET_CEILING: u32 = 5000;

    /// Offset step used when a page reports no usable size and carries no leagues
    pub const FALLBACK_PAGE_STEP: u32 = 50;
}

/// Subdivision targeting
pub mod associations {
    /// Subdivisions with an id strictly between these bounds are special
    /// (regional leagues, wheelchair, ...) and are searched for every home subdivision.
    pub const SPECIAL_ID_LOWER_EXCLUSIVE: i64 = 20;
    pub const SPECIAL_ID_UPPER_EXCLUSIVE: i64 = 100;
}

/// Club name derivation
pub mod club_names {
    /// Derived names shorter than this fall back to the original team name
    pub const MIN_DERIVED_NAME_LENGTH: usize = 3;
}

/// Club report shaping
pub mod report {
    /// Upcoming fixtures listed per team
    pub const NEXT_FIXTURES_PER_TEAM: usize = 2;

    /// Teams listed in the best-teams ranking
    pub const BEST_TEAMS_LIMIT: usize = 5;

    /// District label for leagues run at subdivision level
    pub const SUBDIVISION_LEVEL_LABEL: &str = "Verbandsebene";

    /// League label for teams whose league is not among the club's leagues
    pub const UNKNOWN_LEAGUE_LABEL: &str = "Unbekannte Liga";
}

/// Interactive club chooser
pub mod selection {
    /// Clubs shown per page
    pub const DEFAULT_PAGE_SIZE: usize = 30;

    /// Example team names shown per club
    pub const EXAMPLE_TEAMS_PER_CLUB: usize = 3;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API domain override
    pub const API_DOMAIN: &str = "BBB_API_DOMAIN";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "BBB_LOG_FILE";

    /// Environment variable for HTTP timeout override in seconds
    pub const HTTP_TIMEOUT: &str = "BBB_HTTP_TIMEOUT";

    /// Environment variable for worker pool size override
    pub const MAX_WORKERS: &str = "BBB_MAX_WORKERS";
}

/// Retry configuration
pub mod retry {
    /// Maximum number of retry attempts for API calls
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;

    /// Jitter range applied to backoff (fraction of the current delay)
    pub const JITTER_FRACTION: f64 = 0.2;
}
