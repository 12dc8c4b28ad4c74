//! File encodings for stored frames.
//!
//! The encoding of an artifact is implied by its file extension:
//! - `.csv`: header plus comma-delimited rows. Numbers survive up to text
//!   formatting and timestamps are re-parsed on load.
//! - `.parquet`: columnar, dtypes preserved exactly.
//! - `.feather` / `.ipc` / `.arrow`: Arrow IPC, dtypes preserved exactly.

use std::{fmt, fs::File, path::Path, str::FromStr};

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use tempfile::NamedTempFile;

use crate::error::{
    CodecSnafu, InvalidArgumentSnafu, IoSnafu, Result, StoreError, UnsupportedEncodingSnafu,
};

/// Supported on-disk encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Csv,
    Parquet,
    Ipc,
}

impl Encoding {
    /// Extension written for new artifacts.
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Csv => "csv",
            Encoding::Parquet => "parquet",
            Encoding::Ipc => "feather",
        }
    }

    /// Encoding implied by a file name's extension (case-insensitive).
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .context(UnsupportedEncodingSnafu { name })?;
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(Encoding::Csv),
            "parquet" => Ok(Encoding::Parquet),
            "feather" | "ipc" | "arrow" => Ok(Encoding::Ipc),
            _ => UnsupportedEncodingSnafu { name }.fail(),
        }
    }

    /// `true` for the encodings that keep dtypes bit-for-bit.
    pub fn is_binary(self) -> bool {
        !matches!(self, Encoding::Csv)
    }

    pub fn codec(self) -> &'static dyn FrameCodec {
        match self {
            Encoding::Csv => &CsvCodec,
            Encoding::Parquet => &ParquetCodec,
            Encoding::Ipc => &IpcCodec,
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Encoding {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Encoding::Csv),
            "parquet" => Ok(Encoding::Parquet),
            "ipc" | "feather" | "arrow" => Ok(Encoding::Ipc),
            other => InvalidArgumentSnafu {
                message: format!("unknown encoding '{other}'"),
            }
            .fail(),
        }
    }
}

/// Reads and writes a [`DataFrame`] in one encoding.
///
/// Encoders only see an already-open file; [`write_atomic`] decides where that
/// file lives. Readers expect the file to exist; the not-found case is handled
/// by the store before a codec is involved.
pub trait FrameCodec: Sync {
    fn encode(&self, df: &mut DataFrame, out: &mut File) -> PolarsResult<()>;

    fn read(&self, path: &Path) -> Result<DataFrame>;
}

/// Encode `df` into a temporary sibling of `path`, then rename it over `path`.
///
/// A failed encode leaves any previous artifact at `path` untouched and
/// removes the temporary file.
pub fn write_atomic(codec: &dyn FrameCodec, df: &mut DataFrame, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).context(IoSnafu { path })?;
    codec
        .encode(df, tmp.as_file_mut())
        .context(CodecSnafu { path })?;
    tmp.as_file().sync_all().context(IoSnafu { path })?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .context(IoSnafu { path })?;
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).context(IoSnafu { path })
}

/// Row-oriented text.
pub struct CsvCodec;

impl FrameCodec for CsvCodec {
    fn encode(&self, df: &mut DataFrame, out: &mut File) -> PolarsResult<()> {
        CsvWriter::new(out).include_header(true).finish(df)
    }

    fn read(&self, path: &Path) -> Result<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .map_parse_options(|opts| opts.with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .context(CodecSnafu { path })
    }
}

/// Apache Parquet.
pub struct ParquetCodec;

impl FrameCodec for ParquetCodec {
    fn encode(&self, df: &mut DataFrame, out: &mut File) -> PolarsResult<()> {
        ParquetWriter::new(out).finish(df).map(|_bytes| ())
    }

    fn read(&self, path: &Path) -> Result<DataFrame> {
        let file = open(path)?;
        ParquetReader::new(file).finish().context(CodecSnafu { path })
    }
}

/// Arrow IPC (feather v2).
pub struct IpcCodec;

impl FrameCodec for IpcCodec {
    fn encode(&self, df: &mut DataFrame, out: &mut File) -> PolarsResult<()> {
        IpcWriter::new(out).finish(df)
    }

    fn read(&self, path: &Path) -> Result<DataFrame> {
        let file = open(path)?;
        IpcReader::new(file).finish().context(CodecSnafu { path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_follows_extension() {
        assert_eq!(Encoding::from_file_name("BTCUSDT_15m.csv").unwrap(), Encoding::Csv);
        assert_eq!(
            Encoding::from_file_name("BTCUSDT_15m.PARQUET").unwrap(),
            Encoding::Parquet
        );
        assert_eq!(Encoding::from_file_name("x.feather").unwrap(), Encoding::Ipc);
        assert!(Encoding::from_file_name("x.json").unwrap_err().is_invalid_argument());
        assert!(Encoding::from_file_name("noext").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn parse_names() {
        assert_eq!("Parquet".parse::<Encoding>().unwrap(), Encoding::Parquet);
        assert!("xlsx".parse::<Encoding>().is_err());
        assert!(Encoding::Ipc.is_binary() && !Encoding::Csv.is_binary());
    }
}
