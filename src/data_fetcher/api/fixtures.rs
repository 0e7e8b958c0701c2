//! League schedules

use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

use crate::data_fetcher::cache::SessionCache;
use crate::data_fetcher::models::{Fixture, FixtureResponse};
use crate::data_fetcher::worker_pool::run_bounded;
use crate::error::AppError;

use super::gateway::RequestGateway;
use super::urls::build_fixtures_url;

/// Fixture list of a league, fetched once per session.
///
/// A league without a schedule yields an empty list, which is cached too.
#[instrument(skip(gateway, cache))]
pub async fn fetch_fixtures(
    gateway: &RequestGateway,
    cache: &SessionCache,
    league_id: i64,
) -> Result<Vec<Fixture>, AppError> {
    if let Some(cached) = cache.fixtures(league_id).await {
        debug!("Using cached fixtures for league {league_id}");
        return Ok(cached);
    }

    let url = build_fixtures_url(gateway.api_domain(), league_id);
    let fixtures = match gateway.get_json::<FixtureResponse>(&url).await {
        Ok(response) => response.into_fixtures(),
        Err(e) if e.is_not_found() => Vec::new(),
        Err(e) => return Err(e),
    };

    cache.store_fixtures(league_id, fixtures.clone()).await;
    Ok(fixtures)
}

/// Fetches the fixtures of every league with at most `workers` concurrent calls.
///
/// Leagues whose schedule could not be fetched are logged and left out of the map.
pub async fn load_for_leagues(
    gateway: &RequestGateway,
    cache: &SessionCache,
    league_ids: &[i64],
    workers: usize,
) -> HashMap<i64, Vec<Fixture>> {
    info!("Loading fixtures for {} leagues", league_ids.len());

    let results = run_bounded(league_ids.iter().copied(), workers, |league_id| {
        fetch_fixtures(gateway, cache, league_id)
    })
    .await;

    results
        .into_iter()
        .filter_map(|(league_id, result)| match result {
            Ok(fixtures) => Some((league_id, fixtures)),
            Err(e) => {
                warn!("No fixtures for league {league_id}: {e}");
                None
            }
        })
        .collect()
}
