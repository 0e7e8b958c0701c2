pub mod session_cache;

// Re-export the run-scoped cache
pub use session_cache::{CacheStats, SessionCache};
