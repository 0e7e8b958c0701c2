//! Paginated league listing of one subdivision

use tracing::{debug, info, instrument, warn};

use crate::constants::pagination::FALLBACK_PAGE_STEP;
use crate::data_fetcher::models::{League, LeagueListRequest, LeagueListResponse};
use crate::error::AppError;

use super::gateway::RequestGateway;
use super::urls::build_league_list_url;

/// Lists every league of a subdivision.
///
/// Pages are requested sequentially with an offset that advances by the page
/// size the server reports. Listing stops when the server reports no more
/// data, when a page cannot be fetched, or once the offset passes `ceiling`.
/// A page with the wrong shape is skipped and listing continues.
#[instrument(skip(gateway))]
pub async fn paginate(gateway: &RequestGateway, association_id: i64, ceiling: u32) -> Vec<League> {
    let request = LeagueListRequest::for_association(association_id);
    let mut leagues = Vec::new();
    let mut offset: u32 = 0;
    let mut last_step: Option<u32> = None;
    let mut pages = 0u32;

    loop {
        let url = build_league_list_url(gateway.api_domain(), offset);
        pages += 1;

        let (step, has_more) = match gateway.post_json::<LeagueListResponse, _>(&url, &request).await {
            Ok(LeagueListResponse { data: Some(data) }) => {
                let listed = data.ligen.len();
                let step = match data.size {
                    Some(size) if size > 0 => Some(size),
                    _ if listed > 0 => u32::try_from(listed).ok(),
                    _ => None,
                };
                let before = leagues.len();
                leagues.extend(
                    data.ligen
                        .into_iter()
                        .filter_map(|league| league.into_league(association_id)),
                );
                debug!(
                    "Subdivision {} offset {}: {} leagues listed, {} kept, more={}",
                    association_id,
                    offset,
                    listed,
                    leagues.len() - before,
                    data.has_more_data
                );
                (step, data.has_more_data)
            }
            Ok(LeagueListResponse { data: None }) => {
                warn!("Subdivision {association_id} offset {offset}: response without data, skipping page");
                (None, true)
            }
            Err(e) if is_page_schema_failure(&e) => {
                warn!("Subdivision {association_id} offset {offset}: unreadable page skipped: {e}");
                (None, true)
            }
            Err(e) => {
                warn!(
                    "Subdivision {}: listing aborted at offset {} after {} leagues: {}",
                    association_id,
                    offset,
                    leagues.len(),
                    e
                );
                break;
            }
        };

        if !has_more {
            break;
        }

        let step = step.or(last_step).unwrap_or(FALLBACK_PAGE_STEP);
        last_step = Some(step);
        offset = offset.saturating_add(step);

        if offset > ceiling {
            warn!(
                "Subdivision {}: offset {} passed the safety ceiling {}, stopping after {} pages",
                association_id, offset, ceiling, pages
            );
            break;
        }
    }

    info!(
        "Subdivision {}: {} leagues from {} pages",
        association_id,
        leagues.len(),
        pages
    );
    leagues
}

fn is_page_schema_failure(e: &AppError) -> bool {
    e.is_schema_error() || matches!(e, AppError::ApiNoData { .. })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use serde_json::{Value, json};
    use std::time::Duration;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn gateway(server: &MockServer) -> RequestGateway {
        RequestGateway::new(create_test_http_client(), server.uri(), Duration::ZERO)
            .with_max_retries(0)
    }

    fn page(first_id: i64, count: usize, has_more: bool, size: u32) -> Value {
        let ligen: Vec<Value> = (0..count as i64)
            .map(|i| json!({"ligaId": first_id + i, "liganame": format!("Liga {}", first_id + i)}))
            .collect();
        json!({"data": {"ligen": ligen, "hasMoreData": has_more, "size": size}})
    }

    async fn mount_page(server: &MockServer, offset: &str, body: Value) {
        Mock::given(method("POST"))
            .and(path("/rest/wam/liga/list"))
            .and(query_param("startAtIndex", offset))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_offset_advances_by_reported_size() {
        let server = MockServer::start().await;
        mount_page(&server, "0", page(1, 50, true, 50)).await;
        mount_page(&server, "50", page(51, 50, true, 50)).await;
        mount_page(&server, "100", page(101, 13, false, 13)).await;

        let gateway = gateway(&server);
        let leagues = paginate(&gateway, 2, 5000).await;

        assert_eq!(leagues.len(), 113);
        assert_eq!(gateway.request_count(), 3);
        assert_eq!(leagues[0].id, 1);
        assert_eq!(leagues[112].id, 113);
        assert!(leagues.iter().all(|l| l.association_id == 2));
    }

    #[tokio::test]
    async fn test_variable_page_sizes_are_followed() {
        let server = MockServer::start().await;
        mount_page(&server, "0", page(1, 20, true, 20)).await;
        mount_page(&server, "20", page(21, 35, true, 35)).await;
        mount_page(&server, "55", page(56, 1, false, 1)).await;

        let gateway = gateway(&server);
        assert_eq!(paginate(&gateway, 2, 5000).await.len(), 56);
    }

    #[tokio::test]
    async fn test_ceiling_stops_server_that_never_advances() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/wam/liga/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": {"ligen": [], "hasMoreData": true, "size": 0}}),
            ))
            .mount(&server)
            .await;

        let gateway = gateway(&server);
        let leagues = paginate(&gateway, 2, 200).await;

        assert!(leagues.is_empty());
        // offsets 0, 50, 100, 150, 200
        assert_eq!(gateway.request_count(), 5);
    }

    #[tokio::test]
    async fn test_misshaped_page_is_skipped() {
        let server = MockServer::start().await;
        mount_page(&server, "0", page(1, 10, true, 10)).await;
        mount_page(&server, "10", json!({"data": {"ligen": "broken"}})).await;
        mount_page(&server, "20", page(21, 5, false, 5)).await;

        let gateway = gateway(&server);
        let leagues = paginate(&gateway, 2, 5000).await;

        assert_eq!(leagues.len(), 15);
        assert_eq!(gateway.request_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_partial_list() {
        let server = MockServer::start().await;
        mount_page(&server, "0", page(1, 10, true, 10)).await;
        Mock::given(method("POST"))
            .and(path("/rest/wam/liga/list"))
            .and(query_param("startAtIndex", "10"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway(&server);
        let leagues = paginate(&gateway, 2, 5000).await;

        assert_eq!(leagues.len(), 10);
    }

    #[tokio::test]
    async fn test_missing_size_advances_by_listed_count() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "0",
            json!({"data": {"ligen": [{"ligaId": 1}, {"ligaId": 2}, {"liganame": "no id"}], "hasMoreData": true}}),
        )
        .await;
        mount_page(&server, "3", page(10, 1, false, 1)).await;

        let gateway = gateway(&server);
        let leagues = paginate(&gateway, 2, 5000).await;

        assert_eq!(leagues.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2, 10]);
    }
}
