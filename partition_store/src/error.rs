use std::path::PathBuf;

use polars::prelude::PolarsError;
use snafu::{Backtrace, Snafu};

/// Errors raised while resolving partitions or moving frames in and out of them.
///
/// `InvalidArgument` and `UnsupportedEncoding` are caller mistakes and are
/// raised before anything touches the filesystem. The remaining variants are
/// storage failures: they abort the current unit of work only.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StoreError {
    /// A partition key component is malformed or not allowed for its category.
    #[snafu(display("Invalid argument: {message}"))]
    InvalidArgument {
        message: String,
        backtrace: Backtrace,
    },

    /// The file name does not map to a known encoding.
    #[snafu(display("Unsupported file encoding for '{name}'"))]
    UnsupportedEncoding { name: String, backtrace: Backtrace },

    /// The partition directory could not be created.
    #[snafu(display("Failed to create partition directory {}: {source}", path.display()))]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Opening or creating an artifact failed.
    #[snafu(display("I/O error on {}: {source}", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// Encoding or decoding a frame failed.
    #[snafu(display("Codec error on {}: {source}", path.display()))]
    Codec {
        path: PathBuf,
        source: PolarsError,
        backtrace: Backtrace,
    },
}

impl StoreError {
    /// Caller supplied a bad key, date mode or file name.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidArgument { .. } | StoreError::UnsupportedEncoding { .. }
        )
    }

    /// Filesystem or codec failure while touching the partition.
    pub fn is_storage_failure(&self) -> bool {
        !self.is_invalid_argument()
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
