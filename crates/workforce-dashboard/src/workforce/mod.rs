mod display;
mod export;
mod metrics;
mod normalizer;
pub mod router;
mod source;
mod table;

pub use display::{format_amount, format_percent, EarningsTrend, RowView};
pub use export::{
    export_csv, read_exported, write_csv, CsvExport, EXPORT_FILE_NAME, EXPORT_HEADERS,
};
pub use metrics::{month_rate, parse_metric, parse_net_earnings};
pub use normalizer::{display_name, normalize, Normalizer, Row};
pub use source::{
    JobType, MonthlyUtilisation, PersonBlock, PersonPrecedence, RosterPerson, SourceRecord,
    UtilisationBlock,
};
pub use table::WorkforceTable;

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const BUNDLED_ROSTER: &str = include_str!("../../data/sample_roster.json");

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected export header '{found}'")]
    Header { found: String },
}

/// Where the roster comes from. The bundled dataset is only a default input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RosterSource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl RosterSource {
    pub fn load(&self) -> Result<Vec<SourceRecord>, RosterError> {
        match self {
            RosterSource::Bundled => RosterImporter::bundled(),
            RosterSource::File(path) => RosterImporter::from_path(path),
        }
    }
}

impl std::fmt::Display for RosterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterSource::Bundled => write!(f, "bundled sample roster"),
            RosterSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SourceRecord>, RosterError> {
        let file = std::fs::File::open(path.as_ref())?;
        let records = Self::from_reader(std::io::BufReader::new(file))?;
        info!(
            path = %path.as_ref().display(),
            records = records.len(),
            "loaded roster file"
        );
        Ok(records)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SourceRecord>, RosterError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn bundled() -> Result<Vec<SourceRecord>, RosterError> {
        Ok(serde_json::from_str(BUNDLED_ROSTER)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn bundled_roster_normalizes_active_people_only() {
        let records = RosterImporter::bundled().expect("bundled roster parses");
        assert_eq!(records.len(), 8);

        let names: Vec<String> = normalize(&records)
            .into_iter()
            .map(|row| row.person)
            .collect();
        assert_eq!(
            names,
            vec![
                "Ana Moreau",
                "External Jo Lin",
                "Mika ",
                "Carla Nowak",
                "External Dev Patel",
            ]
        );
    }

    #[test]
    fn importer_keeps_records_with_null_fields() {
        let records = RosterImporter::from_reader(Cursor::new(
            r#"[
                { "employees": { "status": "active", "firstname": null,
                  "workforceUtilisation": { "monthlyCostDifference": true,
                    "lastThreeMonthsIndividually": null } } },
                { "employees": { "status": "active", "firstname": "Ben" } }
            ]"#,
        ))
        .expect("roster imports");

        let rows = normalize(&records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].person, " ");
        assert_eq!(rows[0].net_earnings_prev_month, 0.0);
        assert_eq!(rows[1].person, "Ben ");
    }

    #[test]
    fn importer_rejects_non_array_documents() {
        let error = RosterImporter::from_reader(Cursor::new(r#"{"employees": {}}"#))
            .expect_err("object is not a roster");
        assert!(matches!(error, RosterError::Json(_)));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = RosterSource::File(PathBuf::from("./does-not-exist.json"))
            .load()
            .expect_err("expected io error");

        match error {
            RosterError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn roster_source_displays_origin() {
        assert_eq!(RosterSource::Bundled.to_string(), "bundled sample roster");
        assert_eq!(
            RosterSource::File(PathBuf::from("roster.json")).to_string(),
            "roster.json"
        );
    }
}
