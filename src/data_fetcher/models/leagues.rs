use serde::{Deserialize, Serialize};

/// A single competition with its own table and fixture list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    pub id: i64,
    pub name: String,
    pub association_id: i64,
    pub association_name: String,
    pub district: Option<String>,
    pub circuit: Option<String>,
    pub age_group: String,
    pub gender: String,
    pub tier: String,
    pub tier_level: String,
}

impl League {
    /// Category label used to group a club's leagues, e.g. "U14 männlich".
    pub fn category(&self) -> String {
        format!("{} {}", self.age_group, self.gender)
    }
}

/// Body of `POST /rest/wam/liga/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListRequest {
    pub token: i64,
    pub verband_ids: Vec<i64>,
    pub gebiet_ids: Vec<String>,
    pub ligatyp_ids: Vec<i64>,
    pub akg_geschlecht_ids: Vec<String>,
    pub altersklasse_ids: Vec<i64>,
    pub spielklasse_ids: Vec<i64>,
}

impl LeagueListRequest {
    /// Unfiltered listing of one subdivision.
    pub fn for_association(association_id: i64) -> Self {
        Self {
            token: 0,
            verband_ids: vec![association_id],
            gebiet_ids: Vec::new(),
            ligatyp_ids: Vec::new(),
            akg_geschlecht_ids: Vec::new(),
            altersklasse_ids: Vec::new(),
            spielklasse_ids: Vec::new(),
        }
    }
}

/// League entry as listed by the service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLeague {
    #[serde(default)]
    pub liga_id: Option<i64>,
    #[serde(default)]
    pub liganame: Option<String>,
    #[serde(default)]
    pub verband_id: Option<i64>,
    #[serde(default)]
    pub verband_name: Option<String>,
    #[serde(default)]
    pub bezirk_name: Option<String>,
    #[serde(default)]
    pub kreisname: Option<String>,
    #[serde(default)]
    pub ak_name: Option<String>,
    #[serde(default)]
    pub geschlecht: Option<String>,
    #[serde(default)]
    pub sk_name: Option<String>,
    #[serde(default)]
    pub sk_ebene_name: Option<String>,
}

impl ApiLeague {
    /// Converts a listed entry into a [`League`].
    ///
    /// `listed_under` is the subdivision that was paginated; it fills in a
    /// missing `verbandId`. Entries without a league id are unusable.
    pub fn into_league(self, listed_under: i64) -> Option<League> {
        Some(League {
            id: self.liga_id?,
            name: self.liganame.unwrap_or_default(),
            association_id: self.verband_id.unwrap_or(listed_under),
            association_name: self.verband_name.unwrap_or_default(),
            district: self.bezirk_name.filter(|s| !s.is_empty()),
            circuit: self.kreisname.filter(|s| !s.is_empty()),
            age_group: self.ak_name.unwrap_or_default(),
            gender: self.geschlecht.unwrap_or_default(),
            tier: self.sk_name.unwrap_or_default(),
            tier_level: self.sk_ebene_name.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueListData {
    #[serde(default)]
    pub ligen: Vec<ApiLeague>,
    #[serde(default)]
    pub has_more_data: bool,
    #[serde(default)]
    pub size: Option<u32>,
}

/// Envelope of `POST /rest/wam/liga/list`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeagueListResponse {
    #[serde(default)]
    pub data: Option<LeagueListData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let json = serde_json::to_value(LeagueListRequest::for_association(7)).unwrap();
        assert_eq!(json["token"], 0);
        assert_eq!(json["verbandIds"], serde_json::json!([7]));
        assert_eq!(json["gebietIds"], serde_json::json!([]));
        assert_eq!(json["akgGeschlechtIds"], serde_json::json!([]));
        assert_eq!(json["spielklasseIds"], serde_json::json!([]));
    }

    #[test]
    fn test_api_league_conversion() {
        let api: ApiLeague = serde_json::from_str(
            r#"{
                "ligaId": 48123,
                "liganame": "Bezirksliga Herren",
                "verbandId": 2,
                "verbandName": "Bayern",
                "bezirkName": "Oberpfalz",
                "kreisname": null,
                "akName": "Senioren",
                "geschlecht": "männlich",
                "skName": "Bezirksliga",
                "skEbeneName": "Bezirk",
                "tableExists": true
            }"#,
        )
        .unwrap();

        let league = api.into_league(99).unwrap();
        assert_eq!(league.id, 48123);
        assert_eq!(league.association_id, 2);
        assert_eq!(league.district.as_deref(), Some("Oberpfalz"));
        assert_eq!(league.circuit, None);
        assert_eq!(league.category(), "Senioren männlich");
        assert_eq!(league.tier_level, "Bezirk");
    }

    #[test]
    fn test_api_league_without_id_is_dropped() {
        let api: ApiLeague = serde_json::from_str(r#"{"liganame": "Ghost"}"#).unwrap();
        assert!(api.into_league(1).is_none());
    }

    #[test]
    fn test_missing_association_falls_back_to_listing() {
        let api: ApiLeague = serde_json::from_str(r#"{"ligaId": 5}"#).unwrap();
        let league = api.into_league(31).unwrap();
        assert_eq!(league.association_id, 31);
        assert_eq!(league.name, "");
    }

    #[test]
    fn test_list_data_defaults() {
        let response: LeagueListResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        let data = response.data.unwrap();
        assert!(data.ligen.is_empty());
        assert!(!data.has_more_data);
        assert_eq!(data.size, None);
    }
}
