//! Played/upcoming classification of a team's fixtures

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::constants::report::NEXT_FIXTURES_PER_TEAM;
use crate::data_fetcher::models::{Fixture, Venue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HomeAwayCount {
    pub total: u32,
    pub home: u32,
    pub away: u32,
}

impl HomeAwayCount {
    fn add(&mut self, at_home: bool) {
        self.total += 1;
        if at_home {
            self.home += 1;
        } else {
            self.away += 1;
        }
    }
}

/// An upcoming fixture seen from one team's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextFixture {
    pub match_id: Option<i64>,
    pub kickoff: NaiveDateTime,
    pub at_home: bool,
    pub opponent: String,
    pub venue: Venue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    pub played: HomeAwayCount,
    pub upcoming: HomeAwayCount,
    pub next_fixtures: Vec<NextFixture>,
}

/// Whether a fixture has been played: both scores known or marked finished.
pub fn is_played(fixture: &Fixture) -> bool {
    (fixture.home_score.is_some() && fixture.away_score.is_some())
        || fixture
            .status
            .as_deref()
            .is_some_and(|status| status.trim().eq_ignore_ascii_case("finished"))
}

/// Summarises the fixtures of the team with competition id `team_id`.
///
/// Fixtures the team does not take part in are ignored. Upcoming fixtures
/// without a readable kickoff count toward the totals but never appear in
/// `next_fixtures`, which holds the nearest ones after `now`.
pub fn classify(team_id: i64, fixtures: &[Fixture], now: NaiveDateTime) -> FixtureSummary {
    let mut summary = FixtureSummary::default();
    let mut upcoming = Vec::new();

    for fixture in fixtures {
        let at_home = if fixture.home_team.competition_team_id == Some(team_id) {
            true
        } else if fixture.away_team.competition_team_id == Some(team_id) {
            false
        } else {
            continue;
        };

        if is_played(fixture) {
            summary.played.add(at_home);
            continue;
        }

        summary.upcoming.add(at_home);
        if let Some(kickoff) = fixture.kickoff().filter(|k| *k > now) {
            let opponent = if at_home {
                &fixture.away_team
            } else {
                &fixture.home_team
            };
            upcoming.push(NextFixture {
                match_id: fixture.match_id,
                kickoff,
                at_home,
                opponent: opponent.team_name.clone().unwrap_or_default(),
                venue: fixture.venue.clone(),
            });
        }
    }

    upcoming.sort_by_key(|next| next.kickoff);
    upcoming.truncate(NEXT_FIXTURES_PER_TEAM);
    summary.next_fixtures = upcoming;
    summary
}
