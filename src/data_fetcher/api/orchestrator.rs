// src/data_fetcher/api/orchestrator.rs - Discovery run that ties the fetch stages together

use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::Config;
use crate::constants::workers::MAX_WORKERS_LIMIT;
use crate::data_fetcher::cache::SessionCache;
use crate::data_fetcher::models::{Association, League};
use crate::data_fetcher::processors::{Club, aggregate};
use crate::error::AppError;
use crate::report::{ClubReport, build_report};

use super::associations::{AssociationCatalog, name_of, target_ids};
use super::fixtures::load_for_leagues;
use super::gateway::RequestGateway;
use super::leagues::paginate;
use super::standings::TeamExtractor;

/// One discovery run.
///
/// Owns the gateway (rate gate and request counter) and the run-scoped
/// caches, so everything fetched during the run is shared by later stages
/// and dropped with the session.
#[derive(Debug)]
pub struct DiscoverySession {
    gateway: RequestGateway,
    cache: SessionCache,
    workers: usize,
    pagination_ceiling: u32,
}

impl DiscoverySession {
    pub fn new(gateway: RequestGateway, workers: usize, pagination_ceiling: u32) -> Self {
        Self {
            gateway,
            cache: SessionCache::new(),
            workers: workers.clamp(1, MAX_WORKERS_LIMIT),
            pagination_ceiling,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let gateway = RequestGateway::from_config(config)?;
        Ok(Self::new(
            gateway,
            config.max_workers,
            config.pagination_ceiling,
        ))
    }

    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Lists the leagues of the home subdivision and of every special one.
    ///
    /// Subdivisions are paginated one after another. A league listed under
    /// several subdivisions is kept once, at its first position.
    #[instrument(skip(self))]
    pub async fn discover_leagues(&self, home_id: i64) -> (Vec<Association>, Vec<League>) {
        let associations = AssociationCatalog::new(&self.gateway, &self.cache)
            .load(home_id)
            .await;
        let targets = target_ids(&associations, home_id);
        info!(
            "Searching {} subdivisions: {:?}",
            targets.len(),
            targets
        );

        let mut seen = HashSet::new();
        let mut leagues = Vec::new();
        for association_id in targets {
            let listed = paginate(&self.gateway, association_id, self.pagination_ceiling).await;
            info!(
                "{}: {} leagues",
                name_of(&associations, association_id),
                listed.len()
            );
            leagues.extend(listed.into_iter().filter(|league| seen.insert(league.id)));
        }

        (associations, leagues)
    }

    /// Finds every club playing in the leagues reachable from `home_id`.
    ///
    /// Clubs are sorted by team count. The result depends only on what the
    /// service returns, not on the order in which league tables arrive.
    #[instrument(skip(self))]
    pub async fn discover_clubs(&self, home_id: i64) -> Vec<Club> {
        let started = Instant::now();

        let (_, leagues) = self.discover_leagues(home_id).await;
        info!(
            "League discovery finished: {} leagues in {:?} ({} requests so far)",
            leagues.len(),
            started.elapsed(),
            self.gateway.request_count()
        );

        let extracted = TeamExtractor::new(&self.gateway, &self.cache)
            .extract_all(&leagues, self.workers)
            .await;

        let records = extracted.into_iter().flat_map(|(league, standings)| {
            standings
                .into_iter()
                .map(move |standing| (standing, league.clone()))
        });
        let clubs = aggregate(records);

        info!(
            "Discovery finished: {} clubs in {:?} using {} requests",
            clubs.len(),
            started.elapsed(),
            self.gateway.request_count()
        );
        clubs
    }

    /// Loads the fixtures of a club's leagues and builds its report.
    #[instrument(skip(self, club), fields(club_id = club.id))]
    pub async fn analyze_club(&self, club: &Club, now: NaiveDateTime) -> ClubReport {
        let league_ids: Vec<i64> = club.leagues.iter().map(|l| l.id).collect();
        let fixtures =
            load_for_leagues(&self.gateway, &self.cache, &league_ids, self.workers).await;
        info!(
            "Loaded fixtures for {}/{} leagues of {}",
            fixtures.len(),
            league_ids.len(),
            club.name
        );
        build_report(club, &fixtures, now)
    }
}
