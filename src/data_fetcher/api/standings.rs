//! League tables and the teams listed in them

use tracing::{debug, info, instrument, warn};

use crate::data_fetcher::cache::SessionCache;
use crate::data_fetcher::models::{League, TableResponse, TeamStanding};
use crate::data_fetcher::worker_pool::run_bounded;
use crate::error::AppError;

use super::gateway::RequestGateway;
use super::urls::build_table_url;

/// Reads team standings from league tables, once per league per session.
pub struct TeamExtractor<'a> {
    gateway: &'a RequestGateway,
    cache: &'a SessionCache,
}

impl<'a> TeamExtractor<'a> {
    pub fn new(gateway: &'a RequestGateway, cache: &'a SessionCache) -> Self {
        Self { gateway, cache }
    }

    /// Standings of one league.
    ///
    /// `Ok(None)` means the league has no published table; that answer is
    /// cached like any other. Failures are returned and not cached.
    #[instrument(skip(self))]
    pub async fn extract(&self, league_id: i64) -> Result<Option<Vec<TeamStanding>>, AppError> {
        if let Some(cached) = self.cache.standings(league_id).await {
            debug!("Using cached standings for league {league_id}");
            return Ok(cached);
        }

        let url = build_table_url(self.gateway.api_domain(), league_id);
        let standings = match self.gateway.get_json::<TableResponse>(&url).await {
            Ok(response) => response.into_standings(league_id),
            Err(e) if e.is_not_found() => {
                debug!("League {league_id} has no table: {e}");
                None
            }
            Err(e) => return Err(e),
        };

        self.cache.store_standings(league_id, standings.clone()).await;
        Ok(standings)
    }

    /// Standings of every league, fetched by at most `workers` concurrent calls.
    ///
    /// Leagues whose table could not be fetched are logged and left out. The
    /// result follows the order of `leagues`.
    pub async fn extract_all(
        &self,
        leagues: &[League],
        workers: usize,
    ) -> Vec<(League, Vec<TeamStanding>)> {
        info!(
            "Extracting teams from {} leagues with {} workers",
            leagues.len(),
            workers
        );

        let results = run_bounded(leagues.iter().cloned(), workers, |league| async move {
            self.extract(league.id).await
        })
        .await;

        let mut without_table = 0usize;
        let mut failed = 0usize;
        let mut extracted = Vec::with_capacity(results.len());
        for (league, result) in results {
            match result {
                Ok(Some(standings)) => extracted.push((league, standings)),
                Ok(None) => without_table += 1,
                Err(e) => {
                    failed += 1;
                    warn!("Skipping league {} ({}): {}", league.id, league.name, e);
                }
            }
        }

        info!(
            "Team extraction done: {} tables, {} without table, {} failed",
            extracted.len(),
            without_table,
            failed
        );
        extracted
    }
}
