//! Run-scoped caches owned by a discovery session

use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::data_fetcher::models::{Association, Fixture, TeamStanding};

/// Hit/miss counters for one cached map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Default)]
struct Counted<V> {
    entries: HashMap<i64, V>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> Counted<V> {
    fn lookup(&mut self, key: i64) -> Option<V> {
        match self.entries.get(&key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

/// In-memory caches for one discovery run.
///
/// Each map has its own lock and is only touched through the methods below;
/// no lock is held across network I/O. Entries never expire: the data is
/// only valid for the run that fetched it.
#[derive(Debug, Default)]
pub struct SessionCache {
    associations: Mutex<Option<Vec<Association>>>,
    standings: Mutex<Counted<Option<Vec<TeamStanding>>>>,
    fixtures: Mutex<Counted<Vec<Fixture>>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn associations(&self) -> Option<Vec<Association>> {
        self.associations.lock().await.clone()
    }

    pub async fn store_associations(&self, associations: Vec<Association>) {
        debug!("Caching {} associations", associations.len());
        *self.associations.lock().await = Some(associations);
    }

    /// Cached standings of a league. The outer `Option` is the cache lookup,
    /// the inner one records a league without a published table.
    pub async fn standings(&self, league_id: i64) -> Option<Option<Vec<TeamStanding>>> {
        self.standings.lock().await.lookup(league_id)
    }

    pub async fn store_standings(&self, league_id: i64, standings: Option<Vec<TeamStanding>>) {
        debug!(
            "Caching standings: league={}, teams={:?}",
            league_id,
            standings.as_ref().map(Vec::len)
        );
        self.standings
            .lock()
            .await
            .entries
            .insert(league_id, standings);
    }

    pub async fn fixtures(&self, league_id: i64) -> Option<Vec<Fixture>> {
        self.fixtures.lock().await.lookup(league_id)
    }

    pub async fn store_fixtures(&self, league_id: i64, fixtures: Vec<Fixture>) {
        debug!(
            "Caching fixtures: league={}, fixtures={}",
            league_id,
            fixtures.len()
        );
        self.fixtures.lock().await.entries.insert(league_id, fixtures);
    }

    pub async fn standings_stats(&self) -> CacheStats {
        self.standings.lock().await.stats()
    }

    pub async fn fixtures_stats(&self) -> CacheStats {
        self.fixtures.lock().await.stats()
    }
}
