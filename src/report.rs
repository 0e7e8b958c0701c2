//! Detailed analysis of one club

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::constants::report::{BEST_TEAMS_LIMIT, SUBDIVISION_LEVEL_LABEL, UNKNOWN_LEAGUE_LABEL};
use crate::data_fetcher::models::{Fixture, League, TeamStanding};
use crate::data_fetcher::processors::{Club, HomeAwayCount, NextFixture, classify};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamVariation {
    pub team_name: String,
    pub permanent_ids: Vec<i64>,
    pub competition_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueSummary {
    pub league_id: i64,
    pub league_name: String,
    pub tier: String,
    pub tier_level: String,
    pub association: String,
    pub district: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePosition {
    pub rank: Option<u32>,
    pub total_teams: usize,
    pub position_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCounts {
    pub played: HomeAwayCount,
    pub upcoming: HomeAwayCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingGame {
    #[serde(flatten)]
    pub fixture: NextFixture,
    pub league_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub win_points: Option<i64>,
    pub loss_points: Option<i64>,
    pub points_for: i64,
    pub points_against: i64,
    pub point_diff: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetail {
    pub team_name: String,
    pub team_name_short: Option<String>,
    pub permanent_team_id: Option<i64>,
    pub competition_team_id: Option<i64>,
    pub league_id: i64,
    pub league_name: Option<String>,
    pub table: TablePosition,
    pub games: GameCounts,
    pub next_games: Vec<UpcomingGame>,
    pub stats: TeamStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestTeam {
    pub team_name: String,
    pub league_name: String,
    pub rank: u32,
    pub total_teams: usize,
    pub win_points: Option<i64>,
    pub record: String,
    pub point_diff: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeographicDistribution {
    pub associations: BTreeMap<String, usize>,
    pub districts: BTreeMap<String, usize>,
    pub tier_levels: BTreeMap<String, usize>,
}

/// Everything known about one club, ready to print or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubReport {
    pub club_id: i64,
    pub club_name: String,
    pub generated_at: NaiveDateTime,
    pub total_teams: usize,
    pub total_leagues: usize,
    pub team_variations: Vec<TeamVariation>,
    pub leagues_by_category: BTreeMap<String, Vec<LeagueSummary>>,
    pub teams_detailed: Vec<TeamDetail>,
    pub best_teams: Vec<BestTeam>,
    pub geographic_distribution: GeographicDistribution,
}

/// Builds the report of `club` from the fixtures of its leagues.
///
/// Leagues missing from `fixtures_by_league` count as having no fixtures.
pub fn build_report(
    club: &Club,
    fixtures_by_league: &HashMap<i64, Vec<Fixture>>,
    now: NaiveDateTime,
) -> ClubReport {
    let leagues: HashMap<i64, &League> = club.leagues.iter().map(|l| (l.id, l)).collect();

    let team_variations = club
        .team_name_variants
        .iter()
        .map(|(name, ids)| TeamVariation {
            team_name: name.clone(),
            permanent_ids: ids.permanent_ids.iter().copied().collect(),
            competition_ids: ids.competition_ids.iter().copied().collect(),
        })
        .collect();

    let mut leagues_by_category: BTreeMap<String, Vec<LeagueSummary>> = BTreeMap::new();
    for league in &club.leagues {
        leagues_by_category
            .entry(league.category())
            .or_default()
            .push(LeagueSummary {
                league_id: league.id,
                league_name: league.name.clone(),
                tier: league.tier.clone(),
                tier_level: league.tier_level.clone(),
                association: league.association_name.clone(),
                district: league.district.clone(),
            });
    }

    let teams_detailed = club
        .teams
        .iter()
        .map(|team| team_detail(team, leagues.get(&team.league_id).copied(), fixtures_by_league, now))
        .collect();

    ClubReport {
        club_id: club.id,
        club_name: club.name.clone(),
        generated_at: now,
        total_teams: club.team_count(),
        total_leagues: club.league_count(),
        team_variations,
        leagues_by_category,
        teams_detailed,
        best_teams: best_teams(&club.teams, &leagues),
        geographic_distribution: geographic_distribution(&club.leagues),
    }
}

fn team_detail(
    team: &TeamStanding,
    league: Option<&League>,
    fixtures_by_league: &HashMap<i64, Vec<Fixture>>,
    now: NaiveDateTime,
) -> TeamDetail {
    let summary = match (team.competition_team_id, fixtures_by_league.get(&team.league_id)) {
        (Some(team_id), Some(fixtures)) => classify(team_id, fixtures, now),
        _ => Default::default(),
    };
    let league_name = league.map(|l| l.name.clone());

    TeamDetail {
        team_name: team.team_name.clone(),
        team_name_short: team.team_name_short.clone(),
        permanent_team_id: team.permanent_team_id,
        competition_team_id: team.competition_team_id,
        league_id: team.league_id,
        league_name: league_name.clone(),
        table: TablePosition {
            rank: team.rank,
            total_teams: team.total_teams_in_league,
            position_text: team.position_text(),
        },
        games: GameCounts {
            played: summary.played,
            upcoming: summary.upcoming,
        },
        next_games: summary
            .next_fixtures
            .into_iter()
            .map(|fixture| UpcomingGame {
                fixture,
                league_name: league_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_LEAGUE_LABEL.to_string()),
            })
            .collect(),
        stats: TeamStats {
            wins: team.wins,
            losses: team.losses,
            win_points: team.win_points,
            loss_points: team.loss_points,
            points_for: team.points_for,
            points_against: team.points_against,
            point_diff: team.point_diff,
        },
    }
}

fn best_teams(teams: &[TeamStanding], leagues: &HashMap<i64, &League>) -> Vec<BestTeam> {
    let mut ranked: Vec<(u32, &TeamStanding)> = teams
        .iter()
        .filter(|t| t.games_played > 0)
        .filter_map(|t| t.rank.map(|rank| (rank, t)))
        .collect();
    ranked.sort_by(|(rank_a, a), (rank_b, b)| {
        rank_a
            .cmp(rank_b)
            .then_with(|| b.win_points.unwrap_or(0).cmp(&a.win_points.unwrap_or(0)))
    });

    ranked
        .into_iter()
        .take(BEST_TEAMS_LIMIT)
        .map(|(rank, team)| BestTeam {
            team_name: team.team_name.clone(),
            league_name: leagues
                .get(&team.league_id)
                .map_or_else(|| UNKNOWN_LEAGUE_LABEL.to_string(), |l| l.name.clone()),
            rank,
            total_teams: team.total_teams_in_league,
            win_points: team.win_points,
            record: format!("{}:{}", team.wins, team.losses),
            point_diff: team.point_diff,
        })
        .collect()
}

fn geographic_distribution(leagues: &[League]) -> GeographicDistribution {
    let mut distribution = GeographicDistribution::default();
    for league in leagues {
        *distribution
            .associations
            .entry(league.association_name.clone())
            .or_default() += 1;
        let district = league
            .district
            .clone()
            .unwrap_or_else(|| SUBDIVISION_LEVEL_LABEL.to_string());
        *distribution.districts.entry(district).or_default() += 1;
        *distribution
            .tier_levels
            .entry(league.tier_level.clone())
            .or_default() += 1;
    }
    distribution
}

/// Human-readable summary of a report for the terminal.
pub fn render_summary(report: &ClubReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Club: {} (ClubID {})", report.club_name, report.club_id);
    let _ = writeln!(
        out,
        "  Teams: {}  Leagues: {}  Team names: {}",
        report.total_teams,
        report.total_leagues,
        report.team_variations.len()
    );

    if !report.best_teams.is_empty() {
        let _ = writeln!(out, "\nTop {} teams:", report.best_teams.len());
        for team in &report.best_teams {
            let _ = writeln!(
                out,
                "  {:>2}/{:<2} {} ({})  record {}  points {}  diff {:+}",
                team.rank,
                team.total_teams,
                team.team_name,
                team.league_name,
                team.record,
                team.win_points.map_or_else(|| "-".to_string(), |p| p.to_string()),
                team.point_diff
            );
        }
    }

    if !report.leagues_by_category.is_empty() {
        let _ = writeln!(out, "\nLeagues by category:");
        for (category, leagues) in &report.leagues_by_category {
            let _ = writeln!(out, "  {category}: {}", leagues.len());
        }
    }

    for team in &report.teams_detailed {
        let _ = writeln!(
            out,
            "\n{}  [{}]  table {}",
            team.team_name,
            team.league_name.as_deref().unwrap_or(UNKNOWN_LEAGUE_LABEL),
            team.table.position_text
        );
        let _ = writeln!(
            out,
            "  played {} (home {}, away {})  upcoming {} (home {}, away {})",
            team.games.played.total,
            team.games.played.home,
            team.games.played.away,
            team.games.upcoming.total,
            team.games.upcoming.home,
            team.games.upcoming.away
        );
        for game in &team.next_games {
            let _ = writeln!(
                out,
                "  next: {} {} {}  @ {}",
                game.fixture.kickoff.format("%Y-%m-%d %H:%M"),
                if game.fixture.at_home { "vs" } else { "at" },
                game.fixture.opponent,
                game.fixture.venue.name.as_deref().unwrap_or("-")
            );
        }
    }

    out
}
