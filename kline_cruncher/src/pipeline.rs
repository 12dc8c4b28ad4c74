//! The batch: for each (symbol, timeframe) unit, load the raw klines, compute
//! the indicator battery and save the augmented frame to the Processed tree.
//!
//! Units are independent. A unit whose kline artifact has not landed yet is
//! skipped; a unit that fails is recorded and the batch moves on.

use std::{fmt, path::PathBuf};

use chrono::NaiveDate;
use indicator_engine::{IndicatorEngine, spec::compute_all};
use partition_store::{
    Category, PartitionKey, PartitionStore, Timeframe, kline_file_name, partition::format_date,
    processed_file_name,
};
use tracing::{debug, info, warn};

use crate::config::{CruncherConfig, InputDateMode};
use crate::error::{UnitError, UnitFailure};
use crate::frame::{attach_indicators, check_ordering, price_series_from_frame};

/// One unit of work.
///
/// Displayed as its output partition followed by the kline bucket it reads,
/// e.g. `Processed/10-03-2024/BTCUSDT/15m (input Kline/Historical)`, which is
/// enough to re-run it alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitKey {
    /// Batch date, resolved once when the batch starts.
    pub date: NaiveDate,
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Bucket of the raw klines.
    pub input: InputDateMode,
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = format_date(self.date);
        write!(
            f,
            "{}/{date}/{}/{} (input {}/",
            Category::Processed,
            self.symbol,
            self.timeframe,
            Category::Kline
        )?;
        match self.input {
            InputDateMode::Date => write!(f, "Date/{date})"),
            InputDateMode::Historical => f.write_str("Historical)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Processed artifacts written, one per output encoding.
    Written(Vec<PathBuf>),
    /// No kline artifact for this unit.
    Skipped,
}

/// Process one unit end to end.
pub fn process_unit(
    store: &PartitionStore,
    config: &CruncherConfig,
    unit: &UnitKey,
) -> Result<UnitOutcome, UnitError> {
    run_unit(store, config, unit).map_err(|source| UnitError::new(unit.clone(), source))
}

fn run_unit(
    store: &PartitionStore,
    config: &CruncherConfig,
    unit: &UnitKey,
) -> Result<UnitOutcome, UnitFailure> {
    let input_key = PartitionKey::new(Category::Kline, unit.input.resolve(unit.date))?
        .with_symbol(unit.symbol.as_str())?
        .with_timeframe(unit.timeframe)?;
    let input_dir = store.resolve_partition(&input_key)?;
    let input_name = kline_file_name(&unit.symbol, unit.timeframe, config.input.encoding);

    let Some(mut df) = store.load(&input_name, &input_dir)? else {
        info!(%unit, file = %input_name, "no klines yet, skipping");
        return Ok(UnitOutcome::Skipped);
    };

    let series = price_series_from_frame(&df)?;
    if let Some(ts) = series.timestamps() {
        check_ordering(ts)?;
    }
    let engine = IndicatorEngine::new(&series)?;
    let indicators = compute_all(&engine, &config.indicators)?;
    debug!(%unit, rows = engine.len(), columns = indicators.len(), "indicators computed");
    attach_indicators(&mut df, &indicators)?;

    let output_key = PartitionKey::dated(Category::Processed, unit.date)
        .with_symbol(unit.symbol.as_str())?
        .with_timeframe(unit.timeframe)?;
    let output_dir = store.resolve_partition(&output_key)?;

    let mut written = Vec::with_capacity(config.output_encodings.len());
    for &encoding in &config.output_encodings {
        let name = processed_file_name(&unit.symbol, unit.timeframe, encoding);
        written.push(store.save(&mut df, &name, &output_dir)?);
    }
    Ok(UnitOutcome::Written(written))
}

/// What happened to every unit of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<(UnitKey, Vec<PathBuf>)>,
    pub skipped: Vec<UnitKey>,
    pub failed: Vec<UnitError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn units(&self) -> usize {
        self.written.len() + self.skipped.len() + self.failed.len()
    }
}

/// Units of a batch on `date`: every configured symbol × timeframe, symbols
/// outermost.
pub fn plan_units(config: &CruncherConfig, date: NaiveDate) -> Vec<UnitKey> {
    config
        .symbols
        .iter()
        .flat_map(|symbol| {
            config.timeframes.iter().map(move |&timeframe| UnitKey {
                date,
                symbol: symbol.clone(),
                timeframe,
                input: config.input.date_mode,
            })
        })
        .collect()
}

/// Run every unit sequentially. One failing unit never stops the others.
pub fn run_batch(store: &PartitionStore, config: &CruncherConfig, date: NaiveDate) -> BatchReport {
    let mut report = BatchReport::default();
    for unit in plan_units(config, date) {
        match process_unit(store, config, &unit) {
            Ok(UnitOutcome::Written(paths)) => report.written.push((unit, paths)),
            Ok(UnitOutcome::Skipped) => report.skipped.push(unit),
            Err(err) => {
                warn!(error = %err, "unit failed");
                report.failed.push(err);
            }
        }
    }
    info!(
        date = %format_date(date),
        written = report.written.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    report
}
