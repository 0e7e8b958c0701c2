//! Grouping of team standings into clubs

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info};

use crate::data_fetcher::models::{League, TeamStanding};

use super::club_names::derive_club_name;

/// Ids seen under one raw team name, kept apart by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamIds {
    pub permanent_ids: BTreeSet<i64>,
    pub competition_ids: BTreeSet<i64>,
}

/// Every team of one provider club id found during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: i64,
    pub name: String,
    /// Raw team name to the team ids seen under that name.
    pub team_name_variants: BTreeMap<String, TeamIds>,
    pub league_ids: BTreeSet<i64>,
    pub teams: Vec<TeamStanding>,
    /// Leagues the club plays in, in first-seen order.
    pub leagues: Vec<League>,
}

impl Club {
    fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            team_name_variants: BTreeMap::new(),
            league_ids: BTreeSet::new(),
            teams: Vec::new(),
            leagues: Vec::new(),
        }
    }

    fn add(&mut self, team: TeamStanding, league: League) {
        let derived = derive_club_name(&team.team_name);
        if derived.chars().count() < self.name.chars().count() {
            self.name = derived;
        }

        let ids = self
            .team_name_variants
            .entry(team.team_name.clone())
            .or_default();
        ids.permanent_ids.extend(team.permanent_team_id);
        ids.competition_ids.extend(team.competition_team_id);

        if self.league_ids.insert(league.id) {
            self.leagues.push(league);
        }
        self.teams.push(team);
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn league_count(&self) -> usize {
        self.league_ids.len()
    }

    /// Up to `limit` team names in alphabetical order.
    pub fn example_team_names(&self, limit: usize) -> Vec<&str> {
        self.team_name_variants
            .keys()
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

/// Groups standings by club id.
///
/// Records without a club id or team name are dropped. Clubs are returned
/// with the most teams first; clubs with equal team counts keep the order
/// in which they were first seen.
pub fn aggregate(records: impl IntoIterator<Item = (TeamStanding, League)>) -> Vec<Club> {
    let mut clubs: Vec<Club> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut dropped = 0usize;

    for (team, league) in records {
        let Some(club_id) = team.club_id else {
            debug!("Dropping team {:?} in league {}: no club id", team.team_name, league.id);
            dropped += 1;
            continue;
        };
        if team.team_name.trim().is_empty() {
            debug!("Dropping unnamed team of club {} in league {}", club_id, league.id);
            dropped += 1;
            continue;
        }

        let slot = *index.entry(club_id).or_insert_with(|| {
            clubs.push(Club::new(club_id, derive_club_name(&team.team_name)));
            clubs.len() - 1
        });
        clubs[slot].add(team, league);
    }

    clubs.sort_by(|a, b| b.team_count().cmp(&a.team_count()));

    info!(
        "Grouped teams into {} clubs ({} records dropped)",
        clubs.len(),
        dropped
    );
    clubs
}

pub fn find(clubs: &[Club], club_id: i64) -> Option<&Club> {
    clubs.iter().find(|club| club.id == club_id)
}

/// Clubs whose name or any team name contains `query`, ignoring case.
pub fn search<'a>(clubs: &'a [Club], query: &str) -> Vec<&'a Club> {
    let needle = query.trim().to_lowercase();
    clubs
        .iter()
        .filter(|club| {
            club.name.to_lowercase().contains(&needle)
                || club
                    .team_name_variants
                    .keys()
                    .any(|variant| variant.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn league(id: i64) -> League {
        League {
            id,
            name: format!("Liga {id}"),
            association_id: 2,
            association_name: "Bayern".to_string(),
            district: None,
            circuit: None,
            age_group: "Senioren".to_string(),
            gender: "männlich".to_string(),
            tier: "Bezirksliga".to_string(),
            tier_level: "Bezirk".to_string(),
        }
    }

    fn team(name: &str, club_id: Option<i64>, league_id: i64, team_id: i64) -> TeamStanding {
        TeamStanding {
            team_name: name.to_string(),
            team_name_short: None,
            club_id,
            permanent_team_id: Some(team_id),
            competition_team_id: Some(team_id + 1000),
            league_id,
            rank: Some(1),
            total_teams_in_league: 8,
            games_played: 3,
            wins: 2,
            losses: 1,
            win_points: Some(4),
            loss_points: Some(2),
            points_for: 200,
            points_against: 180,
            point_diff: 20,
        }
    }

    fn record(name: &str, club_id: Option<i64>, league_id: i64, team_id: i64) -> (TeamStanding, League) {
        (team(name, club_id, league_id, team_id), league(league_id))
    }

    #[test]
    fn test_partition_by_club_id() {
        let clubs = aggregate(vec![
            record("TSV Musterstadt", Some(5), 10, 1),
            record("TSV Musterstadt 2", Some(5), 11, 2),
            record("BC Example", Some(7), 10, 3),
        ]);

        assert_eq!(clubs.len(), 2);
        let tsv = &clubs[0];
        assert_eq!(tsv.id, 5);
        assert_eq!(tsv.name, "TSV Musterstadt");
        assert_eq!(tsv.team_count(), 2);
        assert_eq!(tsv.league_ids, BTreeSet::from([10, 11]));
        assert_eq!(
            tsv.team_name_variants.keys().collect::<Vec<_>>(),
            vec!["TSV Musterstadt", "TSV Musterstadt 2"]
        );

        let bc = &clubs[1];
        assert_eq!(bc.id, 7);
        assert_eq!(bc.team_count(), 1);
        assert!(clubs.iter().all(|c| c.teams.iter().all(|t| t.club_id == Some(c.id))));
    }

    #[test]
    fn test_permanent_and_competition_ids_stay_apart() {
        let mut standing = team("TSV Musterstadt", Some(5), 10, 0);
        standing.permanent_team_id = Some(77);
        standing.competition_team_id = Some(5001);
        let mut without_competition_id = team("TSV Musterstadt", Some(5), 11, 0);
        without_competition_id.permanent_team_id = Some(78);
        without_competition_id.competition_team_id = None;

        let clubs = aggregate(vec![(standing, league(10)), (without_competition_id, league(11))]);

        let ids = &clubs[0].team_name_variants["TSV Musterstadt"];
        assert_eq!(ids.permanent_ids, BTreeSet::from([77, 78]));
        assert_eq!(ids.competition_ids, BTreeSet::from([5001]));
    }

    #[test]
    fn test_single_letter_clubs_keep_their_team_marker() {
        // "X 1" would derive to "X", which is too short, so the name stays as listed
        let clubs = aggregate(vec![
            record("X 1", Some(5), 10, 1),
            record("X 2", Some(5), 11, 2),
            record("Y", Some(7), 10, 3),
            record("Z 1", None, 10, 4),
        ]);

        assert_eq!(clubs.len(), 2);
        assert_eq!(clubs[0].id, 5);
        assert_eq!(clubs[0].team_count(), 2);
        assert_eq!(clubs[0].name, "X 1");
        assert_eq!(clubs[1].id, 7);
        assert_eq!(clubs[1].name, "Y");
        assert!(
            clubs
                .iter()
                .all(|c| !c.team_name_variants.contains_key("Z 1"))
        );
        assert_eq!(clubs.iter().map(Club::team_count).sum::<usize>(), 3);
    }

    #[test]
    fn test_records_without_club_id_or_name_are_dropped() {
        let clubs = aggregate(vec![
            record("Ghost", None, 10, 1),
            record("  ", Some(9), 10, 2),
            record("Real", Some(3), 10, 3),
        ]);
        assert_eq!(clubs.len(), 1);
        assert_eq!(clubs[0].id, 3);
    }

    #[test]
    fn test_name_only_gets_shorter() {
        let clubs = aggregate(vec![
            record("TSV Musterstadt Basketball 2", Some(5), 10, 1),
            record("TSV Musterstadt", Some(5), 11, 2),
            record("TSV Musterstadt Baskets", Some(5), 12, 3),
        ]);
        assert_eq!(clubs[0].name, "TSV Musterstadt");
    }

    #[test]
    fn test_variant_ids_are_unioned() {
        let clubs = aggregate(vec![
            record("TSV Musterstadt", Some(5), 10, 1),
            record("TSV Musterstadt", Some(5), 11, 2),
            record("TSV Musterstadt", Some(5), 12, 1),
        ]);
        let ids = &clubs[0].team_name_variants["TSV Musterstadt"];
        assert_eq!(ids.permanent_ids, BTreeSet::from([1, 2]));
        assert_eq!(ids.competition_ids, BTreeSet::from([1001, 1002]));
        assert_eq!(clubs[0].leagues.len(), 3);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let clubs = aggregate(vec![
            record("Alpha", Some(30), 10, 1),
            record("Beta", Some(20), 10, 2),
            record("Gamma", Some(10), 10, 3),
            record("Gamma 2", Some(10), 11, 4),
        ]);
        let ids: Vec<i64> = clubs.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![10, 30, 20]);
    }

    #[test]
    fn test_search_matches_names_and_variants() {
        let clubs = aggregate(vec![
            record("TSV Musterstadt", Some(5), 10, 1),
            record("Musterstadt Baskets 2", Some(5), 11, 2),
            record("BC Example", Some(7), 10, 3),
        ]);

        let by_variant: Vec<i64> = search(&clubs, "baskets").iter().map(|c| c.id).collect();
        assert_eq!(by_variant, vec![5]);
        assert_eq!(search(&clubs, "EXAMPLE").len(), 1);
        assert!(search(&clubs, "nowhere").is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let clubs = aggregate(vec![record("BC Example", Some(7), 10, 3)]);
        assert_eq!(find(&clubs, 7).map(|c| c.name.as_str()), Some("BC Example"));
        assert!(find(&clubs, 8).is_none());
    }

    #[test]
    fn test_example_team_names_are_sorted_and_limited() {
        let clubs = aggregate(vec![
            record("TSV C", Some(5), 10, 1),
            record("TSV A", Some(5), 11, 2),
            record("TSV B", Some(5), 12, 3),
            record("TSV D", Some(5), 13, 4),
        ]);
        assert_eq!(clubs[0].example_team_names(3), vec!["TSV A", "TSV B", "TSV C"]);
    }
}
