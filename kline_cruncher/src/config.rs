//! Batch configuration: parsing, normalization, and loading.
//!
//! A TOML file describes where the partitions live, which symbol/timeframe
//! units to process, how the raw klines are stored and which indicator
//! battery to append. Every field has a default, so an empty file (or no file
//! at all) reproduces the stock batch:
//!
//! ```toml
//! storage_root = "storage"
//! symbols = ["BTCUSDT", "ETHUSDT", "SOLUSDT", "ARBUSDT"]
//! timeframes = ["15m", "30m", "60m", "240m"]
//! output_encodings = ["csv"]
//!
//! [input]
//! date_mode = "date"
//! encoding = "parquet"
//!
//! [[indicators]]
//! kind = "rsi"
//! periods = 3
//! ```
//!
//! Entrypoints:
//! - Parse + normalize from a TOML string: [`load_config_str`]
//! - Parse + normalize from a file path (honours [`ROOT_ENV`]): [`load_config_path`]

use std::{collections::HashSet, ffi::OsString, mem, path::PathBuf};

use anyhow::{Context, bail};
use indicator_engine::IndicatorSpec;
use partition_store::{DateMode, Encoding, Timeframe, store::DEFAULT_ROOT};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable that overrides [`CruncherConfig::storage_root`].
pub const ROOT_ENV: &str = "KLINE_STORAGE_ROOT";

/// RSI periods of the stock battery.
pub const DEFAULT_RSI_PERIODS: [usize; 5] = [3, 5, 8, 13, 21];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CruncherConfig {
    /// Root directory of the partition tree.
    pub storage_root: PathBuf,
    /// Symbols to process. Normalized to trimmed uppercase, unique, in order.
    pub symbols: Vec<String>,
    /// Timeframes to process for every symbol.
    pub timeframes: Vec<Timeframe>,
    pub input: InputCfg,
    /// One processed artifact is written per encoding.
    pub output_encodings: Vec<Encoding>,
    /// Indicator battery, applied in order.
    pub indicators: Vec<IndicatorSpec>,
}

/// Where raw klines are read from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct InputCfg {
    pub date_mode: InputDateMode,
    pub encoding: Encoding,
}

/// Date bucket of the raw kline partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputDateMode {
    /// `Kline/Date/<batch date>/...`
    Date,
    /// `Kline/Historical/...`
    Historical,
}

impl InputDateMode {
    /// Concrete date mode for a batch running on `date`.
    pub fn resolve(self, date: chrono::NaiveDate) -> DateMode {
        match self {
            InputDateMode::Date => DateMode::Dated(date),
            InputDateMode::Historical => DateMode::Historical,
        }
    }
}

impl Default for InputCfg {
    fn default() -> Self {
        Self {
            date_mode: InputDateMode::Date,
            encoding: Encoding::Parquet,
        }
    }
}

impl Default for CruncherConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from(DEFAULT_ROOT),
            symbols: ["BTCUSDT", "ETHUSDT", "SOLUSDT", "ARBUSDT"]
                .map(String::from)
                .to_vec(),
            timeframes: [15, 30, 60, 240]
                .into_iter()
                .filter_map(Timeframe::minutes)
                .collect(),
            input: InputCfg::default(),
            output_encodings: vec![Encoding::Csv],
            indicators: DEFAULT_RSI_PERIODS
                .into_iter()
                .map(|periods| IndicatorSpec::Rsi { periods })
                .collect(),
        }
    }
}

impl CruncherConfig {
    /// Replace the storage root when `value` is set and non-empty.
    pub fn apply_root_override(&mut self, value: Option<OsString>) -> bool {
        match value {
            Some(root) if !root.is_empty() => {
                self.storage_root = PathBuf::from(root);
                true
            }
            _ => false,
        }
    }
}

/// Summary of changes performed during normalization.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Symbols whose spelling changed when trimming/uppercasing.
    pub symbols_renamed: usize,
    pub symbols_deduped: usize,
    pub timeframes_deduped: usize,
    pub encodings_deduped: usize,
    /// Indicators dropped because an earlier entry already produces their columns.
    pub indicators_deduped: usize,
}

/// Normalize a config in-place.
///
/// What normalization does:
/// - Trim + uppercase symbols; reject empty ones; deduplicate preserving order
/// - Deduplicate timeframes and output encodings preserving order
/// - Drop indicators whose column names are all produced by an earlier entry
///
/// Errors:
/// - Empty symbol after trimming, or a symbol that is not a single path segment
/// - Empty symbol, timeframe, output encoding or indicator list
pub fn normalize_config(cfg: &mut CruncherConfig) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();

    let mut seen = HashSet::new();
    let mut symbols = Vec::with_capacity(cfg.symbols.len());
    for raw in mem::take(&mut cfg.symbols) {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            bail!("symbol cannot be empty after trimming");
        }
        if symbol.contains(['/', '\\']) || symbol == "." || symbol == ".." {
            bail!("symbol '{symbol}' is not a valid directory name");
        }
        if symbol != raw {
            report.symbols_renamed += 1;
        }
        if seen.insert(symbol.clone()) {
            symbols.push(symbol);
        } else {
            report.symbols_deduped += 1;
        }
    }
    cfg.symbols = symbols;

    report.timeframes_deduped = dedupe(&mut cfg.timeframes);
    report.encodings_deduped = dedupe(&mut cfg.output_encodings);

    let mut columns = HashSet::new();
    let before = cfg.indicators.len();
    cfg.indicators.retain(|spec| {
        let names = spec.column_names();
        let fresh = names.iter().any(|n| !columns.contains(n));
        columns.extend(names);
        fresh
    });
    report.indicators_deduped = before - cfg.indicators.len();

    if cfg.symbols.is_empty() {
        bail!("at least one symbol is required");
    }
    if cfg.timeframes.is_empty() {
        bail!("at least one timeframe is required");
    }
    if cfg.output_encodings.is_empty() {
        bail!("at least one output encoding is required");
    }
    if cfg.indicators.is_empty() {
        bail!("the indicator battery is empty");
    }
    Ok(report)
}

fn dedupe<T: Copy + Eq + std::hash::Hash>(items: &mut Vec<T>) -> usize {
    let before = items.len();
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(*item));
    before - items.len()
}

/// Parse and normalize a config from a TOML string.
///
/// Errors:
/// - TOML parse failures (unknown keys included)
/// - Normalization errors (see [`normalize_config`])
pub fn load_config_str(toml_str: &str) -> anyhow::Result<CruncherConfig> {
    let mut cfg: CruncherConfig = toml::from_str(toml_str).context("failed to parse config TOML")?;
    let report = normalize_config(&mut cfg).context("normalize_config failed")?;
    info!(?report, "config normalized");
    Ok(cfg)
}

/// Read a config file from disk, parse, normalize, then apply [`ROOT_ENV`].
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<CruncherConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    let mut cfg = load_config_str(&text)?;
    cfg.apply_root_override(std::env::var_os(ROOT_ENV));
    Ok(cfg)
}

/// The default config with [`ROOT_ENV`] applied; used when no file is given.
pub fn default_config() -> CruncherConfig {
    let mut cfg = CruncherConfig::default();
    cfg.apply_root_override(std::env::var_os(ROOT_ENV));
    cfg
}
