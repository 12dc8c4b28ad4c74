//! Filesystem-backed partition store.

use std::{
    fs,
    path::{Path, PathBuf},
};

use polars::prelude::DataFrame;
use snafu::ResultExt;
use tracing::{debug, info, warn};

use crate::codec::{Encoding, write_atomic};
use crate::error::{CreateDirSnafu, Result};
use crate::partition::PartitionKey;
use crate::timeframe::Timeframe;

/// Default root directory name.
pub const DEFAULT_ROOT: &str = "storage";

/// Maps partition keys to directories under one root and moves frames in and
/// out of them.
///
/// The store holds no open handles and no locks; two stores over the same root
/// are interchangeable.
#[derive(Debug, Clone)]
pub struct PartitionStore {
    root: PathBuf,
}

impl PartitionStore {
    /// A store rooted at `root`. Nothing is created until a partition is resolved.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for `key`, without touching the filesystem.
    pub fn partition_path(&self, key: &PartitionKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    /// Directory for `key`, created (with all parents) if it does not exist.
    ///
    /// Idempotent: existing directories and their contents are left alone, and
    /// a directory created concurrently by another worker is not an error.
    pub fn resolve_partition(&self, key: &PartitionKey) -> Result<PathBuf> {
        let path = self.partition_path(key);
        fs::create_dir_all(&path).context(CreateDirSnafu { path: &path })?;
        debug!(partition = %key, path = %path.display(), "partition resolved");
        Ok(path)
    }

    /// Write `df` to `directory/name`, replacing any existing file in one step.
    ///
    /// The encoding comes from the extension of `name`. `directory` is expected
    /// to come from [`resolve_partition`](Self::resolve_partition).
    pub fn save(&self, df: &mut DataFrame, name: &str, directory: &Path) -> Result<PathBuf> {
        let encoding = Encoding::from_file_name(name)?;
        let path = directory.join(name);
        write_atomic(encoding.codec(), df, &path)?;
        info!(path = %path.display(), rows = df.height(), %encoding, "frame saved");
        Ok(path)
    }

    /// Read `directory/name`.
    ///
    /// `Ok(None)` when the file does not exist: an absent artifact simply means
    /// no data has landed in that partition yet.
    pub fn load(&self, name: &str, directory: &Path) -> Result<Option<DataFrame>> {
        let encoding = Encoding::from_file_name(name)?;
        let path = directory.join(name);
        if !path.is_file() {
            warn!(path = %path.display(), "file not found");
            return Ok(None);
        }
        let df = encoding.codec().read(&path)?;
        info!(path = %path.display(), rows = df.height(), %encoding, "frame loaded");
        Ok(Some(df))
    }
}

impl Default for PartitionStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

/// `<SYMBOL>_<TIMEFRAME>.<ext>`, the raw kline artifact name.
pub fn kline_file_name(symbol: &str, timeframe: Timeframe, encoding: Encoding) -> String {
    format!("{symbol}_{timeframe}.{}", encoding.extension())
}

/// `<SYMBOL>_<TIMEFRAME>_processed.<ext>`, the augmented artifact name.
pub fn processed_file_name(symbol: &str, timeframe: Timeframe, encoding: Encoding) -> String {
    format!("{symbol}_{timeframe}_processed.{}", encoding.extension())
}
