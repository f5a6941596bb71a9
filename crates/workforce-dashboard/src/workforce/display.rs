use super::normalizer::Row;
use serde::Serialize;

const MISSING: &str = "-";

/// Direction of the previous month's net earnings, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EarningsTrend {
    Gain,
    Loss,
    Flat,
}

impl EarningsTrend {
    /// Judged on the amount rounded to cents, as `format_amount` shows it.
    pub fn of(amount: f64) -> Self {
        let amount = (amount * 100.0).round() / 100.0;
        if amount > 0.0 {
            Self::Gain
        } else if amount < 0.0 {
            Self::Loss
        } else {
            Self::Flat
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Gain => "gain",
            Self::Loss => "loss",
            Self::Flat => "flat",
        }
    }
}

/// Display strings for one row. Export never goes through this view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub person: String,
    pub past_12_months: String,
    pub y2d: String,
    pub may: String,
    pub june: String,
    pub july: String,
    pub net_earnings_prev_month: String,
    pub trend: EarningsTrend,
}

impl From<&Row> for RowView {
    fn from(row: &Row) -> Self {
        Self {
            person: row.person.clone(),
            past_12_months: format_percent(row.past_12_months),
            y2d: format_percent(row.y2d),
            may: format_percent(row.may),
            june: format_percent(row.june),
            july: format_percent(row.july),
            net_earnings_prev_month: format_amount(row.net_earnings_prev_month),
            trend: EarningsTrend::of(row.net_earnings_prev_month),
        }
    }
}

pub fn format_percent(rate: Option<f64>) -> String {
    match rate {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => MISSING.to_string(),
    }
}

/// Two decimals with `,` thousands separators, e.g. `-1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && formatted != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_uses_one_decimal() {
        assert_eq!(format_percent(Some(0.425)), "42.5%");
        assert_eq!(format_percent(Some(1.0)), "100.0%");
        assert_eq!(format_percent(None), "-");
    }

    #[test]
    fn amount_groups_thousands() {
        assert_eq!(format_amount(-1234.5), "-1,234.50");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(12.0), "12.00");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn view_formats_metrics_and_trend() {
        let row = Row {
            person: "Jo Lin".to_string(),
            past_12_months: Some(0.8),
            y2d: None,
            may: None,
            june: None,
            july: Some(0.333),
            net_earnings_prev_month: -50.0,
        };

        let view = RowView::from(&row);
        assert_eq!(view.past_12_months, "80.0%");
        assert_eq!(view.y2d, "-");
        assert_eq!(view.july, "33.3%");
        assert_eq!(view.net_earnings_prev_month, "-50.00");
        assert_eq!(view.trend, EarningsTrend::Loss);
        assert_eq!(EarningsTrend::of(0.0).label(), "flat");
    }

    #[test]
    fn trend_agrees_with_rounded_amount() {
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(EarningsTrend::of(-0.001), EarningsTrend::Flat);
        assert_eq!(EarningsTrend::of(0.004), EarningsTrend::Flat);
        assert_eq!(EarningsTrend::of(-0.006), EarningsTrend::Loss);
        assert_eq!(EarningsTrend::of(0.01), EarningsTrend::Gain);
    }
}
