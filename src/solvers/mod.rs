//! The contract between this crate and a native solver engine.
//!
//! An engine exposes an opaque problem object through [NativeProblem]. Everything crossing
//! this boundary is already validated and uses the engine's integer codes; the trait's
//! implementors translate indices and call into the engine, nothing more.
//! The [glpk] engine is always available; [highs] is behind the `highs` feature.
use std::path::Path;

use crate::FileFormat;

#[macro_use]
pub(crate) mod macros;

pub mod glpk;
#[cfg(feature = "highs")]
pub mod highs;

pub use self::glpk::{Glpk, GlpkProblem};
#[cfg(feature = "highs")]
pub use self::highs::HighsProblem;

/// Parameters shared by both solve phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseParams {
    /// Native message level code
    pub message_level: i32,
    /// Native time limit, in milliseconds. `None` keeps the engine default.
    pub time_limit_ms: Option<i32>,
}

/// An engine-owned problem object.
///
/// Dropping the value releases the native object. Rows and columns are addressed with
/// 0-based indices. Setters are only called with indices below the counts set through
/// [add_rows](NativeProblem::add_rows) and [add_cols](NativeProblem::add_cols), and with
/// matrix data that has no duplicate or out of range entries.
///
/// Nothing here requires `Send` or `Sync`: whether a problem may cross threads is up to the
/// engine, and every mutation goes through `&mut self`.
pub trait NativeProblem {
    /// Removes all rows, columns and matrix entries
    fn erase(&mut self);
    /// Appends `count` rows
    fn add_rows(&mut self, count: usize);
    /// Appends `count` columns
    fn add_cols(&mut self, count: usize);
    /// Sets the objective direction from its native code
    fn set_obj_dir(&mut self, direction: i32);
    /// Sets the objective coefficient of a column
    fn set_obj_coef(&mut self, col: usize, coef: f64);
    /// Replaces the constraint matrix by the given coordinate entries
    fn load_matrix(&mut self, rows: &[usize], cols: &[usize], values: &[f64]);
    /// Sets the kind of a column from its native code
    fn set_col_kind(&mut self, col: usize, kind: i32);
    /// Sets the bounds of a column with the native bound kind code
    fn set_col_bounds(&mut self, col: usize, kind: i32, lower: f64, upper: f64);
    /// Sets the bounds of a row with the native bound kind code
    fn set_row_bounds(&mut self, row: usize, kind: i32, lower: f64, upper: f64);

    /// Number of rows
    fn num_rows(&self) -> usize;
    /// Number of columns
    fn num_cols(&self) -> usize;
    /// Number of integer and binary columns
    fn num_int(&self) -> usize;

    /// Replaces the problem by the content of a file. Returns `0` on success.
    fn read(&mut self, path: &Path, format: FileFormat) -> i32;
    /// Writes the problem to a file. Returns `0` on success.
    fn write(&self, path: &Path, format: FileFormat) -> i32;

    /// Solves the continuous relaxation. Returns a native return code.
    fn simplex(&mut self, params: &PhaseParams) -> i32;
    /// Searches for an integer solution, starting from the relaxation's basis.
    /// Returns a native return code.
    fn intopt(&mut self, params: &PhaseParams) -> i32;

    /// Solution status of the relaxation
    fn lp_status(&self) -> i32;
    /// Objective value of the relaxation
    fn lp_obj_val(&self) -> f64;
    /// Primal value of a row in the relaxation
    fn row_prim(&self, row: usize) -> f64;
    /// Dual value of a row in the relaxation
    fn row_dual(&self, row: usize) -> f64;
    /// Primal value of a column in the relaxation
    fn col_prim(&self, col: usize) -> f64;
    /// Dual value (reduced cost) of a column in the relaxation
    fn col_dual(&self, col: usize) -> f64;

    /// Solution status of the integer search
    fn mip_status(&self) -> i32;
    /// Objective value of the integer solution
    fn mip_obj_val(&self) -> f64;
    /// Value of a row in the integer solution
    fn mip_row_val(&self, row: usize) -> f64;
    /// Value of a column in the integer solution
    fn mip_col_val(&self, col: usize) -> f64;
}
