//! Club discovery must not depend on the order in which league tables arrive.
//!
//! Every table response gets a random delay, so with several workers the
//! tables complete in a different order on every run. The grouped clubs must
//! still equal those of a strictly sequential run.

use bbb_club_discovery::data_fetcher::api::{
    DiscoverySession, RequestGateway, create_http_client_with_timeout,
};
use rand::Rng;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const LEAGUES: i64 = 24;

const TOWNS: [&str; 9] = [
    "Altstadt", "Bergheim", "Dorfen", "Eschau", "Feldkirch", "Grünwald", "Hausen", "Isen",
    "Kastl",
];

fn club_name(club_id: i64) -> String {
    format!("TSV {}", TOWNS[(club_id - 1) as usize])
}

fn session(server: &MockServer, workers: usize) -> DiscoverySession {
    let client = create_http_client_with_timeout(10).unwrap();
    let gateway = RequestGateway::new(client, server.uri(), Duration::ZERO);
    DiscoverySession::new(gateway, workers, 5000)
}

/// Team names for a league, spread over a handful of clubs so that clubs
/// collect teams from many leagues and name refinement matters.
fn table_for(league_id: i64) -> Value {
    let entries: Vec<Value> = (0..6)
        .map(|slot| {
            let club_id = (league_id + slot) % 9 + 1;
            let suffix = match (league_id + slot) % 4 {
                0 => String::new(),
                1 => " 2".to_string(),
                2 => " II".to_string(),
                _ => " Herren".to_string(),
            };
            json!({
                "team": {
                    "teamname": format!("{}{suffix}", club_name(club_id)),
                    "clubId": club_id,
                    "teamPermanentId": league_id * 100 + slot,
                    "seasonTeamId": league_id * 1000 + slot
                },
                "rang": slot + 1,
                "anzspiele": 5
            })
        })
        .collect();
    json!({"data": {"tabelle": {"entries": entries}}})
}

async fn mount_federation(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/rest/wam/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"verbaende": [{"id": 2, "label": "Bayern"}]}})),
        )
        .mount(server)
        .await;

    let ligen: Vec<Value> = (1..=LEAGUES)
        .map(|id| json!({"ligaId": id, "liganame": format!("Liga {id}"), "verbandId": 2}))
        .collect();
    Mock::given(method("POST"))
        .and(path("/rest/wam/liga/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {
            "ligen": ligen,
            "hasMoreData": false,
            "size": LEAGUES
        }})))
        .mount(server)
        .await;

    let mut rng = rand::rng();
    for league_id in 1..=LEAGUES {
        let delay = Duration::from_millis(rng.random_range(0..60));
        Mock::given(method("GET"))
            .and(path(format!("/rest/competition/table/id/{league_id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(table_for(league_id))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_clubs_do_not_depend_on_completion_order() {
    let server = MockServer::start().await;
    mount_federation(&server).await;

    let sequential = session(&server, 1).discover_clubs(2).await;
    assert_eq!(sequential.len(), 9);

    for workers in [2, 5, 8, 16] {
        let concurrent = session(&server, workers).discover_clubs(2).await;
        assert_eq!(
            concurrent, sequential,
            "club grouping changed with {workers} workers"
        );
    }
}

#[tokio::test]
async fn test_team_totals_are_preserved() {
    let server = MockServer::start().await;
    mount_federation(&server).await;

    let clubs = session(&server, 8).discover_clubs(2).await;

    let teams: usize = clubs.iter().map(|c| c.team_count()).sum();
    assert_eq!(teams, (LEAGUES * 6) as usize);
    assert!(clubs.windows(2).all(|w| w[0].team_count() >= w[1].team_count()));
    for club in &clubs {
        assert_eq!(club.name, club_name(club.id));
        assert!(club.teams.iter().all(|t| t.club_id == Some(club.id)));
    }
}
