//! JSON export of club reports

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::error::AppError;
use crate::report::ClubReport;

/// File name for an automatic export, e.g. `club_analysis_TSV_Musterstadt_1730462400.json`.
pub fn auto_export_filename(club_name: &str, unix_timestamp: i64) -> String {
    let name: String = club_name
        .chars()
        .filter(|c| !matches!(c, '.' | '/' | '\\'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("club_analysis_{name}_{unix_timestamp}.json")
}

/// Writes `report` as pretty-printed UTF-8 JSON to `path`.
pub async fn export_report(report: &ClubReport, path: impl AsRef<Path>) -> Result<PathBuf, AppError> {
    let path = path.as_ref();
    if path.is_dir() {
        return Err(AppError::export_error(format!(
            "{} is a directory",
            path.display()
        )));
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).await?;

    info!("Exported report of club {} to {}", report.club_id, path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::GeographicDistribution;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn report() -> ClubReport {
        ClubReport {
            club_id: 5,
            club_name: "TSV Müsterstadt e.V.".to_string(),
            generated_at: NaiveDate::from_ymd_opt(2025, 11, 1)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .unwrap(),
            total_teams: 0,
            total_leagues: 0,
            team_variations: Vec::new(),
            leagues_by_category: BTreeMap::new(),
            teams_detailed: Vec::new(),
            best_teams: Vec::new(),
            geographic_distribution: GeographicDistribution::default(),
        }
    }

    #[test]
    fn test_auto_filename() {
        assert_eq!(
            auto_export_filename("TSV Musterstadt e.V.", 1730462400),
            "club_analysis_TSV_Musterstadt_eV_1730462400.json"
        );
        assert_eq!(
            auto_export_filename("A/B Club", 1),
            "club_analysis_AB_Club_1.json"
        );
    }

    #[tokio::test]
    async fn test_export_writes_utf8_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        let written = export_report(&report(), &path).await.unwrap();

        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("TSV Müsterstadt e.V."));
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["clubId"], 5);
    }

    #[tokio::test]
    async fn test_export_to_directory_fails() {
        let dir = tempdir().unwrap();
        let result = export_report(&report(), dir.path()).await;
        assert!(matches!(result, Err(AppError::Export(_))));
    }
}
