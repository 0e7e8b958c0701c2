use serde::{Deserialize, Serialize};

/// A team's row in a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub team_name: String,
    pub team_name_short: Option<String>,
    pub club_id: Option<i64>,
    pub permanent_team_id: Option<i64>,
    pub competition_team_id: Option<i64>,
    pub league_id: i64,
    pub rank: Option<u32>,
    pub total_teams_in_league: usize,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_points: Option<i64>,
    pub loss_points: Option<i64>,
    pub points_for: i64,
    pub points_against: i64,
    pub point_diff: i64,
}

impl TeamStanding {
    /// Position text such as "3/12", or "-/12" when unranked.
    pub fn position_text(&self) -> String {
        match self.rank {
            Some(rank) => format!("{rank}/{}", self.total_teams_in_league),
            None => format!("-/{}", self.total_teams_in_league),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTableTeam {
    #[serde(default)]
    pub teamname: Option<String>,
    #[serde(default)]
    pub teamname_small: Option<String>,
    #[serde(default)]
    pub club_id: Option<i64>,
    #[serde(default)]
    pub team_permanent_id: Option<i64>,
    #[serde(default)]
    pub season_team_id: Option<i64>,
    #[serde(default)]
    pub team_competition_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTableEntry {
    #[serde(default)]
    pub team: Option<ApiTableTeam>,
    #[serde(default)]
    pub rang: Option<u32>,
    #[serde(default)]
    pub anzspiele: Option<u32>,
    #[serde(default)]
    pub anz_gewinnpunkte: Option<i64>,
    #[serde(default)]
    pub anz_verlustpunkte: Option<i64>,
    #[serde(default)]
    pub s: Option<u32>,
    #[serde(default)]
    pub n: Option<u32>,
    #[serde(default)]
    pub koerbe: Option<i64>,
    #[serde(default)]
    pub gegen_koerbe: Option<i64>,
    #[serde(default)]
    pub korbdiff: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiTable {
    #[serde(default)]
    pub entries: Option<Vec<ApiTableEntry>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub tabelle: Option<ApiTable>,
}

/// Envelope of `GET /rest/competition/table/id/{leagueId}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableResponse {
    #[serde(default)]
    pub data: Option<TableData>,
}

impl TableResponse {
    /// Flattens the table into standings for `league_id`.
    ///
    /// Returns `None` when the league has no published table. Rows without a
    /// team object are skipped but still count toward the league size.
    pub fn into_standings(self, league_id: i64) -> Option<Vec<TeamStanding>> {
        let entries = self.data?.tabelle?.entries?;
        let total = entries.len();

        let standings = entries
            .into_iter()
            .filter_map(|entry| {
                let team = entry.team?;
                Some(TeamStanding {
                    team_name: team.teamname.unwrap_or_default().trim().to_string(),
                    team_name_short: team.teamname_small,
                    club_id: team.club_id,
                    permanent_team_id: team.team_permanent_id,
                    competition_team_id: team.season_team_id.or(team.team_competition_id),
                    league_id,
                    rank: entry.rang,
                    total_teams_in_league: total,
                    games_played: entry.anzspiele.unwrap_or(0),
                    wins: entry.s.unwrap_or(0),
                    losses: entry.n.unwrap_or(0),
                    win_points: entry.anz_gewinnpunkte,
                    loss_points: entry.anz_verlustpunkte,
                    points_for: entry.koerbe.unwrap_or(0),
                    points_against: entry.gegen_koerbe.unwrap_or(0),
                    point_diff: entry.korbdiff.unwrap_or(0),
                })
            })
            .collect();

        Some(standings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE_JSON: &str = r#"{
        "data": {
            "tabelle": {
                "entries": [
                    {
                        "team": {
                            "teamname": "TSV Musterstadt 2",
                            "teamnameSmall": "TSV M. 2",
                            "clubId": 4711,
                            "teamPermanentId": 900,
                            "seasonTeamId": 31001
                        },
                        "rang": 1, "anzspiele": 10, "anzGewinnpunkte": 18,
                        "s": 9, "n": 1, "koerbe": 812, "gegenKoerbe": 640, "korbdiff": 172
                    },
                    { "rang": 2 },
                    {
                        "team": { "teamname": " BC Example ", "teamCompetitionId": 31002 },
                        "rang": 3
                    }
                ]
            }
        }
    }"#;

    #[test]
    fn test_into_standings_flattens_rows() {
        let response: TableResponse = serde_json::from_str(TABLE_JSON).unwrap();
        let standings = response.into_standings(48123).unwrap();

        assert_eq!(standings.len(), 2);
        let first = &standings[0];
        assert_eq!(first.team_name, "TSV Musterstadt 2");
        assert_eq!(first.club_id, Some(4711));
        assert_eq!(first.competition_team_id, Some(31001));
        assert_eq!(first.total_teams_in_league, 3);
        assert_eq!(first.point_diff, 172);
        assert_eq!(first.position_text(), "1/3");

        let second = &standings[1];
        assert_eq!(second.team_name, "BC Example");
        assert_eq!(second.club_id, None);
        assert_eq!(second.competition_team_id, Some(31002));
        assert_eq!(second.games_played, 0);
    }

    #[test]
    fn test_missing_table_is_none() {
        for json in [r#"{}"#, r#"{"data": {}}"#, r#"{"data": {"tabelle": {}}}"#] {
            let response: TableResponse = serde_json::from_str(json).unwrap();
            assert!(response.into_standings(1).is_none(), "{json}");
        }
    }

    #[test]
    fn test_empty_table_is_some_empty() {
        let response: TableResponse =
            serde_json::from_str(r#"{"data": {"tabelle": {"entries": []}}}"#).unwrap();
        assert_eq!(response.into_standings(1), Some(vec![]));
    }
}
