pub mod club_aggregation;
pub mod club_names;
pub mod fixture_status;

// Re-export the pure processing steps
pub use club_aggregation::{Club, TeamIds, aggregate, find, search};
pub use club_names::derive_club_name;
pub use fixture_status::{FixtureSummary, HomeAwayCount, NextFixture, classify, is_played};
