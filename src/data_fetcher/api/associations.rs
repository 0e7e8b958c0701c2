//! Subdivision catalog of the federation

use tracing::{info, instrument, warn};

use crate::constants::associations::{SPECIAL_ID_LOWER_EXCLUSIVE, SPECIAL_ID_UPPER_EXCLUSIVE};
use crate::data_fetcher::cache::SessionCache;
use crate::data_fetcher::models::{Association, WamDataResponse};
use crate::error::AppError;

use super::gateway::RequestGateway;
use super::urls::build_association_catalog_url;

/// Loads and interprets the list of subdivisions.
pub struct AssociationCatalog<'a> {
    gateway: &'a RequestGateway,
    cache: &'a SessionCache,
}

impl<'a> AssociationCatalog<'a> {
    pub fn new(gateway: &'a RequestGateway, cache: &'a SessionCache) -> Self {
        Self { gateway, cache }
    }

    /// Returns every known subdivision.
    ///
    /// Never fails: when the catalog cannot be fetched or is empty the result
    /// is just the home subdivision. Only a successful catalog is cached.
    #[instrument(skip(self))]
    pub async fn load(&self, home_id: i64) -> Vec<Association> {
        if let Some(cached) = self.cache.associations().await {
            info!("Using cached subdivision catalog ({} entries)", cached.len());
            return cached;
        }

        match self.fetch().await {
            Ok(associations) if !associations.is_empty() => {
                info!("Loaded {} subdivisions", associations.len());
                self.cache.store_associations(associations.clone()).await;
                associations
            }
            Ok(_) => {
                warn!("Subdivision catalog is empty, searching home subdivision {home_id} only");
                vec![Association::placeholder(home_id)]
            }
            Err(e) => {
                warn!(
                    "Failed to load subdivision catalog: {}. Searching home subdivision {} only",
                    e, home_id
                );
                vec![Association::placeholder(home_id)]
            }
        }
    }

    async fn fetch(&self) -> Result<Vec<Association>, AppError> {
        let url = build_association_catalog_url(self.gateway.api_domain());
        let response: WamDataResponse = self
            .gateway
            .post_json(&url, &serde_json::json!({}))
            .await?;

        let options = response.into_options().ok_or_else(|| {
            AppError::api_unexpected_structure("No subdivision list in response", &url)
        })?;

        Ok(options
            .into_iter()
            .filter_map(|option| option.into_association())
            .collect())
    }
}

/// Subdivisions searched for a home subdivision: the home one first, then every
/// special subdivision in catalog order, without duplicates.
pub fn target_ids(associations: &[Association], home_id: i64) -> Vec<i64> {
    let mut ids = vec![home_id];
    for association in associations {
        let special = association.id > SPECIAL_ID_LOWER_EXCLUSIVE
            && association.id < SPECIAL_ID_UPPER_EXCLUSIVE;
        if special && !ids.contains(&association.id) {
            ids.push(association.id);
        }
    }
    ids
}

/// Display name of a subdivision, with a placeholder for unknown ids.
pub fn name_of(associations: &[Association], id: i64) -> String {
    associations
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| Association::placeholder(id).name)
}
