//! Club name derivation from raw team names

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::club_names::MIN_DERIVED_NAME_LENGTH;

/// Trailing team-instance markers, tried in this order: "2", "II", "2.", "B".
static TEAM_MARKERS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"\s+[1-9]\d*$",
        r"\s+[IVX]+$",
        r"\s+\d+\.$",
        r"\s+[A-Z]$",
    ]
    .map(|pattern| Regex::new(pattern).expect("team marker pattern is valid"))
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const DEMOGRAPHIC_QUALIFIERS: [&str; 8] = [
    " Damen", " Herren", " Ladies", " Men", " damen", " herren", " ladies", " men",
];

/// Derives the club name behind a team name.
///
/// Strips a trailing team marker and then a trailing demographic qualifier,
/// repeating until the name no longer changes. Sponsor words such as
/// "Baskets" and legal forms such as "e.V." are kept. When less than
/// three characters would remain, the trimmed input is returned unchanged.
///
/// # Examples
/// ```
/// use bbb_club_discovery::data_fetcher::processors::derive_club_name;
///
/// assert_eq!(derive_club_name("TSV Musterstadt 2"), "TSV Musterstadt");
/// assert_eq!(derive_club_name("Regensburg Baskets II"), "Regensburg Baskets");
/// assert_eq!(derive_club_name("BC Example e.V. Herren"), "BC Example e.V.");
/// ```
pub fn derive_club_name(team_name: &str) -> String {
    let original = team_name.trim();
    let mut name = collapse_whitespace(original);

    loop {
        let stripped = strip_qualifier(strip_team_marker(&name));
        let next = collapse_whitespace(stripped);
        if next == name {
            break;
        }
        name = next;
    }

    if name.chars().count() < MIN_DERIVED_NAME_LENGTH {
        original.to_string()
    } else {
        name
    }
}

fn strip_team_marker(name: &str) -> &str {
    TEAM_MARKERS
        .iter()
        .find_map(|marker| marker.find(name))
        .map_or(name, |m| name[..m.start()].trim_end())
}

fn strip_qualifier(name: &str) -> &str {
    DEMOGRAPHIC_QUALIFIERS
        .iter()
        .find_map(|qualifier| name.strip_suffix(qualifier))
        .map_or(name, str::trim_end)
}

fn collapse_whitespace(name: &str) -> String {
    WHITESPACE.replace_all(name.trim(), " ").into_owned()
}
