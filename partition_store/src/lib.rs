//! Date/symbol/timeframe partitioned storage for kline frames.
//!
//! A partition is addressed by a [`PartitionKey`] (category, date mode,
//! optional symbol, optional timeframe) and maps to exactly one directory
//! under the store root. [`PartitionStore::resolve_partition`] is the only
//! place directories are created. Frames are polars [`DataFrame`]s saved as
//! CSV, Parquet or Arrow IPC depending on the file extension.
//!
//! [`DataFrame`]: polars::prelude::DataFrame

pub mod codec;
pub mod error;
pub mod partition;
pub mod store;
pub mod timeframe;

pub use codec::Encoding;
pub use error::StoreError;
pub use partition::{Category, DateMode, PartitionKey};
pub use store::{PartitionStore, kline_file_name, processed_file_name};
pub use timeframe::Timeframe;
