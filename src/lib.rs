//! Basketball federation club discovery library
//!
//! This library discovers every club of a federation subdivision from the
//! paginated league listings of the federation's web service, groups teams
//! into clubs by provider club id and builds detailed club reports.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bbb_club_discovery::config::Config;
//! use bbb_club_discovery::data_fetcher::DiscoverySession;
//! use bbb_club_discovery::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let session = DiscoverySession::from_config(&config)?;
//!
//!     // Discover the clubs of subdivision 2
//!     let clubs = session.discover_clubs(2).await;
//!
//!     if let Some(club) = clubs.first() {
//!         let now = chrono::Local::now().naive_local();
//!         let report = session.analyze_club(club, now).await;
//!         println!("{}", bbb_club_discovery::report::render_summary(&report));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod export;
pub mod report;
pub mod selection;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::DiscoverySession;
pub use data_fetcher::models::{Association, Fixture, League, TeamStanding};
pub use data_fetcher::processors::{Club, derive_club_name};
pub use error::AppError;
pub use report::{ClubReport, build_report};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
