use super::display::RowView;
use super::export::{export_csv, CsvExport};
use super::normalizer::{Normalizer, Row};
use super::source::SourceRecord;
use super::ExportError;
use tracing::info;

/// The most recent normalization pass. Rows are never edited in place; a new
/// roster replaces the whole sequence.
#[derive(Debug, Clone, Default)]
pub struct WorkforceTable {
    normalizer: Normalizer,
    rows: Vec<Row>,
}

impl WorkforceTable {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            rows: Vec::new(),
        }
    }

    pub fn from_records(normalizer: Normalizer, records: &[SourceRecord]) -> Self {
        let mut table = Self::new(normalizer);
        table.replace(records);
        table
    }

    /// Re-normalizes `records` and swaps in the result. Returns the new row count.
    pub fn replace(&mut self, records: &[SourceRecord]) -> usize {
        self.rows = self.normalizer.normalize(records);
        info!(
            records = records.len(),
            rows = self.rows.len(),
            "workforce table replaced"
        );
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn views(&self) -> Vec<RowView> {
        self.rows.iter().map(RowView::from).collect()
    }

    pub fn export(&self) -> Result<CsvExport, ExportError> {
        export_csv(&self.rows)
    }
}
