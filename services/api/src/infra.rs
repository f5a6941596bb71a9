use crate::cli::RosterArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use workforce_dashboard::config::RosterConfig;
use workforce_dashboard::error::AppError;
use workforce_dashboard::workforce::{
    Normalizer, PersonPrecedence, RosterSource, WorkforceTable,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Command line flags win over the environment-derived roster settings.
pub(crate) fn apply_roster_args(mut config: RosterConfig, args: RosterArgs) -> RosterConfig {
    if let Some(path) = args.roster {
        config.source = RosterSource::File(path);
    }
    if args.active_block {
        config.precedence = PersonPrecedence::ActiveBlock;
    }
    config
}

pub(crate) fn load_table(config: &RosterConfig) -> Result<WorkforceTable, AppError> {
    let records = config.source.load()?;
    info!(
        source = %config.source,
        precedence = ?config.precedence,
        records = records.len(),
        "roster loaded"
    );
    Ok(WorkforceTable::from_records(
        Normalizer::new(config.precedence),
        &records,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn roster_args_override_config() {
        let config = apply_roster_args(
            RosterConfig::default(),
            RosterArgs {
                roster: Some(PathBuf::from("team.json")),
                active_block: true,
            },
        );
        assert_eq!(config.source, RosterSource::File(PathBuf::from("team.json")));
        assert_eq!(config.precedence, PersonPrecedence::ActiveBlock);
    }

    #[test]
    fn absent_args_keep_config() {
        let config = apply_roster_args(RosterConfig::default(), RosterArgs::default());
        assert_eq!(config.source, RosterSource::Bundled);
        assert_eq!(config.precedence, PersonPrecedence::EmployeesFirst);
    }

    #[test]
    fn load_table_normalizes_bundled_roster() {
        let table = load_table(&RosterConfig::default()).expect("bundled roster loads");
        assert_eq!(table.rows().len(), 5);
    }

    #[test]
    fn load_table_surfaces_missing_files() {
        let config = RosterConfig {
            source: RosterSource::File(PathBuf::from("./missing-roster.json")),
            precedence: PersonPrecedence::default(),
        };
        assert!(matches!(load_table(&config), Err(AppError::Roster(_))));
    }
}
