use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Where an unrecognised native status code was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusOrigin {
    /// A solution status (`glp_get_status`, `glp_mip_status`)
    SolutionStatus,
    /// A phase return code (`glp_simplex`, `glp_intopt`)
    ReturnCode,
}

impl fmt::Display for StatusOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusOrigin::SolutionStatus => "solution status",
            StatusOrigin::ReturnCode => "return code",
        })
    }
}

/// Every error surfaced by this crate.
///
/// None of these are recovered internally: validation errors are raised before the native
/// problem is touched, native failures are reported with the engine's own code.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two input arrays that must have the same length do not
    #[error("wrong size for {field} (given {actual}, expected {expected})")]
    SizeMismatch {
        /// Name of the offending input
        field: &'static str,
        /// Length implied by the other inputs
        expected: usize,
        /// Length that was given
        actual: usize,
    },
    /// A coordinate matrix index points outside the problem
    #[error("{field}[{position}] = {index} is out of range (must be less than {bound})")]
    IndexOutOfRange {
        /// `row_indices` or `col_indices`
        field: &'static str,
        /// Position of the entry in the coordinate arrays
        position: usize,
        /// The index found there
        index: usize,
        /// Number of rows or columns
        bound: usize,
    },
    /// The same (row, column) pair appears twice in the coordinate matrix
    #[error("duplicate matrix entry at row {row}, column {col}")]
    DuplicateEntry {
        /// 0-based row index
        row: usize,
        /// 0-based column index
        col: usize,
    },
    /// An objective coefficient or matrix value is NaN or infinite
    #[error("{field}[{index}] is not finite ({value})")]
    NonFiniteValue {
        /// `objective` or `values`
        field: &'static str,
        /// Position of the value
        index: usize,
        /// The value itself
        value: f64,
    },
    /// A row or column has a NaN bound or a lower bound above its upper bound
    #[error("invalid {field} bounds at {index}: lower {lower} is not below upper {upper}")]
    InvalidBounds {
        /// `column` or `row`
        field: &'static str,
        /// 0-based row or column index
        index: usize,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },
    /// A symbolic option name was not recognised
    #[error("unknown {field}: {value:?}")]
    UnknownSymbol {
        /// Kind of symbol that was expected
        field: &'static str,
        /// The text that was given
        value: String,
    },
    /// The problem was already freed
    #[error("can't use freed problem")]
    UseAfterFree,
    /// The engine failed to read or write a model file
    #[error("failed to {operation} model file (native code {code})")]
    Format {
        /// `read` or `write`
        operation: &'static str,
        /// Native diagnostic code
        code: i32,
    },
    /// The engine returned a status or return code outside the known tables
    #[error("unknown {origin} {code}")]
    UnknownStatusCode {
        /// The raw native code
        code: i32,
        /// Which table it was looked up in
        origin: StatusOrigin,
    },
    /// None of the candidate native libraries could be loaded
    #[error("could not load native library {candidate:?}: {reason}")]
    LibraryLoad {
        /// Last candidate tried
        candidate: String,
        /// Loader diagnostic for that candidate
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_mismatch_names_field() {
        let err = Error::SizeMismatch {
            field: "objective",
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "wrong size for objective (given 3, expected 2)"
        );
    }

    #[test]
    fn use_after_free_message_is_stable() {
        assert_eq!(Error::UseAfterFree.to_string(), "can't use freed problem");
    }
}
