pub mod associations;
pub mod fixtures;
pub mod leagues;
pub mod standings;

// Re-export all public types for convenience
pub use associations::{Association, AssociationOption, WamDataResponse};
pub use fixtures::{Fixture, FixtureResponse, TeamRef, Venue};
pub use leagues::{ApiLeague, League, LeagueListData, LeagueListRequest, LeagueListResponse};
pub use standings::{TableResponse, TeamStanding};
