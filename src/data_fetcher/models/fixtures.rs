use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Side of a fixture as referenced by the schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub competition_team_id: Option<i64>,
    pub team_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: Option<String>,
    pub address: Option<String>,
}

/// A scheduled or completed match within one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub match_id: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub venue: Venue,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub status: Option<String>,
}

impl Fixture {
    /// Kickoff as a naive local timestamp. A missing time means midnight.
    pub fn kickoff(&self) -> Option<NaiveDateTime> {
        let date = self.date.as_deref()?.trim();
        if date.is_empty() {
            return None;
        }
        let time = self
            .time
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("00:00");
        NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M").ok()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFixtureTeam {
    #[serde(default)]
    pub season_team_id: Option<i64>,
    #[serde(default)]
    pub team_competition_id: Option<i64>,
    #[serde(default)]
    pub teamname: Option<String>,
}

impl From<ApiFixtureTeam> for TeamRef {
    fn from(team: ApiFixtureTeam) -> Self {
        TeamRef {
            competition_team_id: team.season_team_id.or(team.team_competition_id),
            team_name: team.teamname,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGame {
    #[serde(default)]
    pub match_id: Option<i64>,
    #[serde(default)]
    pub home_team: Option<ApiFixtureTeam>,
    #[serde(default)]
    pub away_team: Option<ApiFixtureTeam>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub home_score: Option<i64>,
    #[serde(default)]
    pub away_score: Option<i64>,
    #[serde(default)]
    pub venue: Option<ApiVenue>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<ApiGame> for Fixture {
    fn from(game: ApiGame) -> Self {
        let venue = game.venue.unwrap_or_default();
        Fixture {
            match_id: game.match_id,
            date: game.date,
            time: game.time,
            home_team: game.home_team.unwrap_or_default().into(),
            away_team: game.away_team.unwrap_or_default().into(),
            venue: Venue {
                name: venue.name,
                address: venue.address,
            },
            home_score: game.home_score,
            away_score: game.away_score,
            status: game.status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NestedGames {
    #[serde(default)]
    pub games: Option<Vec<ApiGame>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureData {
    #[serde(default)]
    pub games: Option<Vec<ApiGame>>,
    #[serde(default)]
    pub spielplan: Option<NestedGames>,
}

/// Envelope of `GET /rest/competition/spielplan/id/{leagueId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureResponse {
    #[serde(default)]
    pub data: Option<FixtureData>,
}

impl FixtureResponse {
    /// All fixtures of the league; empty when the schedule is absent.
    pub fn into_fixtures(self) -> Vec<Fixture> {
        let Some(data) = self.data else {
            return Vec::new();
        };
        data.games
            .filter(|games| !games.is_empty())
            .or_else(|| data.spielplan.and_then(|s| s.games))
            .unwrap_or_default()
            .into_iter()
            .map(Fixture::from)
            .collect()
    }
}
