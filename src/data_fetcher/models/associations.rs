use serde::{Deserialize, Serialize};

/// One federation subdivision ("Verband").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: i64,
    pub name: String,
}

impl Association {
    /// Placeholder used when the catalog could not be loaded.
    pub fn placeholder(id: i64) -> Self {
        Self {
            id,
            name: format!("Verband {id}"),
        }
    }
}

/// Subdivision option as returned by `POST /rest/wam/data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssociationOption {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hits: Option<i64>,
}

impl AssociationOption {
    /// Converts into an [`Association`]; options without an id are unusable.
    pub fn into_association(self) -> Option<Association> {
        let id = self.id?;
        let name = self
            .label
            .or(self.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Verband {id}"));
        Some(Association { id, name })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WamData {
    #[serde(default)]
    pub verbaende: Option<Vec<AssociationOption>>,
}

/// Envelope of `POST /rest/wam/data`. The list has been observed both inside
/// `data` and at the top level.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WamDataResponse {
    #[serde(default)]
    pub data: Option<WamData>,
    #[serde(default)]
    pub verbaende: Option<Vec<AssociationOption>>,
}

impl WamDataResponse {
    pub fn into_options(self) -> Option<Vec<AssociationOption>> {
        self.data.and_then(|d| d.verbaende).or(self.verbaende)
    }
}
