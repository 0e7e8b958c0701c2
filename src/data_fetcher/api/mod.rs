pub mod associations;
pub mod fixtures;
pub mod gateway;
pub mod http_client;
pub mod leagues;
pub mod orchestrator;
pub mod standings;
pub mod urls;

// Re-export URL utilities
pub use urls::*;
// Re-export HTTP client utilities
pub use http_client::create_http_client_with_timeout;
// Re-export the fetch stages
pub use associations::{AssociationCatalog, name_of, target_ids};
pub use fixtures::{fetch_fixtures, load_for_leagues};
pub use gateway::{RateGate, RequestGateway};
pub use leagues::paginate;
pub use orchestrator::DiscoverySession;
pub use standings::TeamExtractor;
