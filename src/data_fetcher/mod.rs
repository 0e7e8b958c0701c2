pub mod api;
pub mod cache;
pub mod models;
pub mod processors;
pub mod worker_pool;

pub use api::DiscoverySession;
pub use models::{Association, Fixture, League, TeamStanding};
pub use processors::Club;
