use super::metrics::{month_rate, parse_metric, parse_net_earnings};
use super::source::{PersonBlock, PersonPrecedence, RosterPerson, SourceRecord};
use chrono::Month;
use serde::{Deserialize, Serialize};
use tracing::debug;

const EXTERNAL_PREFIX: &str = "External ";

/// Uniform per-person row consumed by rendering and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub person: String,
    #[serde(rename = "past12Months")]
    pub past_12_months: Option<f64>,
    pub y2d: Option<f64>,
    pub may: Option<f64>,
    pub june: Option<f64>,
    pub july: Option<f64>,
    #[serde(rename = "netEarningsPrevMonth")]
    pub net_earnings_prev_month: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    precedence: PersonPrecedence,
}

impl Normalizer {
    pub fn new(precedence: PersonPrecedence) -> Self {
        Self { precedence }
    }

    pub fn precedence(&self) -> PersonPrecedence {
        self.precedence
    }

    /// Filters active records and maps each to a row, keeping input order.
    pub fn normalize(&self, records: &[SourceRecord]) -> Vec<Row> {
        let rows: Vec<Row> = records
            .iter()
            .filter_map(|record| record.active_person(self.precedence))
            .map(row_for)
            .collect();

        debug!(
            records = records.len(),
            kept = rows.len(),
            dropped = records.len() - rows.len(),
            precedence = ?self.precedence,
            "normalized roster"
        );

        rows
    }
}

/// Normalizes with the default `employees`-first person selection.
pub fn normalize(records: &[SourceRecord]) -> Vec<Row> {
    Normalizer::default().normalize(records)
}

fn row_for(person: RosterPerson<'_>) -> Row {
    let block = person.block();
    let utilisation = block.workforce_utilisation.as_ref();
    let months = utilisation
        .map(|metrics| metrics.last_three_months_individually.as_slice())
        .unwrap_or_default();

    Row {
        person: display_name(block),
        past_12_months: parse_metric(
            utilisation.and_then(|metrics| metrics.utilisation_rate_last_twelve_months.as_deref()),
        ),
        y2d: parse_metric(
            utilisation.and_then(|metrics| metrics.utilisation_rate_year_to_date.as_deref()),
        ),
        may: month_rate(months, Month::May),
        june: month_rate(months, Month::June),
        july: month_rate(months, Month::July),
        net_earnings_prev_month: parse_net_earnings(
            utilisation.and_then(|metrics| metrics.monthly_cost_difference.as_deref()),
        ),
    }
}

/// `firstname lastname`, keeping the separating space when there is no
/// lastname. The prefix follows the person's own job type.
pub fn display_name(block: &PersonBlock) -> String {
    let prefix = if block.is_external() {
        EXTERNAL_PREFIX
    } else {
        ""
    };
    let lastname = block.lastname.as_deref().unwrap_or_default();
    format!("{prefix}{} {lastname}", block.firstname)
}
