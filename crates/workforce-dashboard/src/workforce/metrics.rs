use super::source::MonthlyUtilisation;
use chrono::Month;

/// Parses a text-encoded metric. Missing, non-numeric or non-finite text
/// yields `None`.
pub fn parse_metric(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Net earnings are always present on a row; anything unusable becomes zero.
pub fn parse_net_earnings(raw: Option<&str>) -> f64 {
    parse_metric(raw).unwrap_or(0.0)
}

/// Rate for `month` from the monthly series. Month names compare exactly and
/// the first matching entry decides, even when its rate is unparseable.
pub fn month_rate(entries: &[MonthlyUtilisation], month: Month) -> Option<f64> {
    entries
        .iter()
        .find(|entry| entry.month == month.name())
        .and_then(|entry| parse_metric(entry.utilisation_rate.as_deref()))
}
