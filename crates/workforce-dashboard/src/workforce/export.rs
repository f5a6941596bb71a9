use super::normalizer::Row;
use super::ExportError;
use std::io::{Read, Write};

pub const EXPORT_FILE_NAME: &str = "workforce-dashboard.csv";

pub const EXPORT_HEADERS: [&str; 7] = [
    "person",
    "past12Months",
    "y2d",
    "may",
    "june",
    "july",
    "netEarningsPrevMonth",
];

/// A rendered CSV document ready to hand to whatever saves or serves it.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

pub fn export_csv(rows: &[Row]) -> Result<CsvExport, ExportError> {
    let mut bytes = Vec::new();
    write_csv(rows, &mut bytes)?;
    Ok(CsvExport {
        file_name: EXPORT_FILE_NAME,
        bytes,
    })
}

/// Streams rows as CSV. Metrics are written as raw decimals, absent values as
/// empty fields.
pub fn write_csv<W: Write>(rows: &[Row], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;

    for row in rows {
        csv_writer.write_record([
            row.person.clone(),
            decimal_field(row.past_12_months),
            decimal_field(row.y2d),
            decimal_field(row.may),
            decimal_field(row.june),
            decimal_field(row.july),
            row.net_earnings_prev_month.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Reads a previously exported CSV back into rows.
pub fn read_exported<R: Read>(reader: R) -> Result<Vec<Row>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?;
    if headers.iter().ne(EXPORT_HEADERS) {
        return Err(ExportError::Header {
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<Row>() {
        rows.push(record?);
    }
    Ok(rows)
}

fn decimal_field(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}
