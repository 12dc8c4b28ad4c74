//! Batch driver: raw kline partitions in, indicator-augmented partitions out.
//!
//! [`pipeline::run_batch`] walks the configured symbols × timeframes for one
//! batch date. Each unit loads `Kline/.../<SYMBOL>_<TF>.<ext>`, appends the
//! configured indicator columns and writes
//! `Processed/<date>/<SYMBOL>/<TF>/<SYMBOL>_<TF>_processed.<ext>`.

pub mod config;
pub mod error;
pub mod frame;
pub mod pipeline;

pub use config::{CruncherConfig, load_config_path, load_config_str};
pub use error::{UnitError, UnitFailure};
pub use pipeline::{BatchReport, UnitKey, UnitOutcome, process_unit, run_batch};
