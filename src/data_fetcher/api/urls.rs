//! URL building utilities for API endpoints

/// Builds the URL of the subdivision catalog.
///
/// # Example
/// ```
/// use bbb_club_discovery::data_fetcher::api::build_association_catalog_url;
///
/// let url = build_association_catalog_url("https://api.example.com");
/// assert_eq!(url, "https://api.example.com/rest/wam/data");
/// ```
pub fn build_association_catalog_url(api_domain: &str) -> String {
    format!("{api_domain}/rest/wam/data")
}

/// Builds the URL of one league listing page starting at `offset`.
///
/// # Example
/// ```
/// use bbb_club_discovery::data_fetcher::api::build_league_list_url;
///
/// let url = build_league_list_url("https://api.example.com", 50);
/// assert_eq!(url, "https://api.example.com/rest/wam/liga/list?startAtIndex=50");
/// ```
pub fn build_league_list_url(api_domain: &str, offset: u32) -> String {
    format!("{api_domain}/rest/wam/liga/list?startAtIndex={offset}")
}

/// Builds the URL of a league's standings table.
///
/// # Example
/// ```
/// use bbb_club_discovery::data_fetcher::api::build_table_url;
///
/// let url = build_table_url("https://api.example.com", 48123);
/// assert_eq!(url, "https://api.example.com/rest/competition/table/id/48123");
/// ```
pub fn build_table_url(api_domain: &str, league_id: i64) -> String {
    format!("{api_domain}/rest/competition/table/id/{league_id}")
}

/// Builds the URL of a league's fixture list.
///
/// # Example
/// ```
/// use bbb_club_discovery::data_fetcher::api::build_fixtures_url;
///
/// let url = build_fixtures_url("https://api.example.com", 48123);
/// assert_eq!(url, "https://api.example.com/rest/competition/spielplan/id/48123");
/// ```
pub fn build_fixtures_url(api_domain: &str, league_id: i64) -> String {
    format!("{api_domain}/rest/competition/spielplan/id/{league_id}")
}
