use crate::cli::RosterArgs;
use crate::infra::{apply_roster_args, load_table};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};
use tracing::info;
use workforce_dashboard::config::AppConfig;
use workforce_dashboard::error::AppError;
use workforce_dashboard::telemetry;
use workforce_dashboard::workforce::{RowView, WorkforceTable, EXPORT_FILE_NAME};

#[derive(Args, Debug)]
pub(crate) struct RowsArgs {
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Print raw rows as JSON instead of a formatted table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Output file or directory (defaults to ./workforce-dashboard.csv)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn run_rows(args: RowsArgs) -> Result<(), AppError> {
    let table = prepare_table(args.roster)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, table.rows()).map_err(io::Error::from)?;
        writeln!(out)?;
    } else {
        write_table(&table.views(), &mut out)?;
    }

    Ok(())
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let table = prepare_table(args.roster)?;
    let export = table.export()?;
    let path = export_path(args.output);

    std::fs::write(&path, &export.bytes)?;
    info!(path = %path.display(), rows = table.rows().len(), "workforce export written");
    println!("Exported {} rows to {}", table.rows().len(), path.display());
    Ok(())
}

fn prepare_table(roster: RosterArgs) -> Result<WorkforceTable, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    load_table(&apply_roster_args(config.roster, roster))
}

fn export_path(output: Option<PathBuf>) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(EXPORT_FILE_NAME),
        Some(path) => path,
        None => PathBuf::from(EXPORT_FILE_NAME),
    }
}

/// Terminal row for the `rows` command; columns mirror the dashboard headings.
#[derive(Debug, Tabled)]
struct TableRow<'a> {
    #[tabled(rename = "Person")]
    person: &'a str,
    #[tabled(rename = "Past 12 months")]
    past_12_months: &'a str,
    #[tabled(rename = "YTD")]
    y2d: &'a str,
    #[tabled(rename = "May")]
    may: &'a str,
    #[tabled(rename = "June")]
    june: &'a str,
    #[tabled(rename = "July")]
    july: &'a str,
    #[tabled(rename = "Net prev. month")]
    net_earnings_prev_month: &'a str,
    #[tabled(rename = "Trend")]
    trend: &'static str,
}

impl<'a> From<&'a RowView> for TableRow<'a> {
    fn from(view: &'a RowView) -> Self {
        Self {
            person: &view.person,
            past_12_months: &view.past_12_months,
            y2d: &view.y2d,
            may: &view.may,
            june: &view.june,
            july: &view.july,
            net_earnings_prev_month: &view.net_earnings_prev_month,
            trend: view.trend.label(),
        }
    }
}

pub(crate) fn write_table<W: Write>(views: &[RowView], out: &mut W) -> io::Result<()> {
    if views.is_empty() {
        return writeln!(out, "(no active personnel)");
    }

    let mut table = Table::new(views.iter().map(TableRow::from));
    table
        .with(Style::psql())
        .with(Modify::new(Columns::new(1..7)).with(Alignment::right()));
    writeln!(out, "{table}")
}
