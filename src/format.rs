//! Model file formats understood by the engine's reader and writer.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{Error, Result};

native_codes! {
    /// MPS flavour
    pub enum MpsFormat ("mps format") {
        /// Fixed-column MPS
        Fixed = 1 => "fixed",
        /// Free MPS
        Free = 2 => "free",
    }
}

impl Default for MpsFormat {
    fn default() -> Self {
        MpsFormat::Free
    }
}

/// A text format for reading and writing whole problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileFormat {
    /// CPLEX LP format
    Lp,
    /// MPS format
    Mps(MpsFormat),
}

impl FileFormat {
    /// Free MPS, the default MPS flavour
    pub const MPS: FileFormat = FileFormat::Mps(MpsFormat::Free);

    /// Guesses the format from a file extension: `.lp`, or `.mps` for free MPS.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("lp") => Ok(FileFormat::Lp),
            Some("mps") => Ok(FileFormat::MPS),
            _ => Err(Error::UnknownSymbol {
                field: "file extension",
                value: path.display().to_string(),
            }),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Lp => f.write_str("lp"),
            FileFormat::Mps(MpsFormat::Free) => f.write_str("mps"),
            FileFormat::Mps(MpsFormat::Fixed) => f.write_str("fixed_mps"),
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lp" => Ok(FileFormat::Lp),
            "mps" | "free_mps" => Ok(FileFormat::MPS),
            "fixed_mps" => Ok(FileFormat::Mps(MpsFormat::Fixed)),
            other => Err(Error::UnknownSymbol {
                field: "file format",
                value: other.to_string(),
            }),
        }
    }
}
