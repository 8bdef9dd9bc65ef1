//! The caller's view of a problem: objective, coordinate-form constraint matrix,
//! bounds and column kinds, checked for consistency before anything reaches the engine.
use fnv::FnvHashSet;

use crate::solvers::NativeProblem;
use crate::{BoundKind, Error, Result};

native_codes! {
    /// Whether to search for the lowest or the highest objective value.
    pub enum Direction ("objective direction") {
        /// Minimize the objective
        Minimize = 1 => "minimize",
        /// Maximize the objective
        Maximize = 2 => "maximize",
    }
}

native_codes! {
    /// The kind of values a column may take.
    pub enum ColumnKind ("column kind") {
        /// Any real value within bounds
        Continuous = 1 => "continuous",
        /// Whole numbers only
        Integer = 2 => "integer",
        /// 0 or 1. The engine pins the column bounds to `[0, 1]`.
        Binary = 3 => "binary",
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Minimize
    }
}

impl Default for ColumnKind {
    fn default() -> Self {
        ColumnKind::Continuous
    }
}

/// A complete problem in coordinate form.
///
/// All indices are 0-based. Entry `k` of the constraint matrix is
/// `values[k]` at row `row_indices[k]` and column `col_indices[k]`.
///
/// ```
/// use glpk_core::{ColumnKind, Direction, ProblemData};
/// // minimize 8x + 10y
/// // subject to 2x + 2y >= 7, 3x + 4y >= 12, 2x + y >= 6
/// let data = ProblemData {
///     direction: Direction::Minimize,
///     objective: vec![8., 10.],
///     row_indices: vec![0, 1, 2, 0, 1, 2],
///     col_indices: vec![0, 0, 0, 1, 1, 1],
///     values: vec![2., 3., 2., 2., 4., 1.],
///     column_kinds: vec![ColumnKind::Integer; 2],
///     column_lower: vec![0., 0.],
///     column_upper: vec![f64::INFINITY; 2],
///     row_lower: vec![7., 12., 6.],
///     row_upper: vec![f64::INFINITY; 3],
/// };
/// assert!(data.validate().is_ok());
/// assert_eq!((data.num_rows(), data.num_cols(), data.num_entries()), (3, 2, 6));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemData {
    /// Objective direction
    pub direction: Direction,
    /// One objective coefficient per column
    pub objective: Vec<f64>,
    /// Row of each matrix entry
    pub row_indices: Vec<usize>,
    /// Column of each matrix entry
    pub col_indices: Vec<usize>,
    /// Value of each matrix entry
    pub values: Vec<f64>,
    /// One kind per column
    pub column_kinds: Vec<ColumnKind>,
    /// Column lower bounds, `f64::NEG_INFINITY` for none
    pub column_lower: Vec<f64>,
    /// Column upper bounds, `f64::INFINITY` for none
    pub column_upper: Vec<f64>,
    /// Row lower bounds, `f64::NEG_INFINITY` for none
    pub row_lower: Vec<f64>,
    /// Row upper bounds, `f64::INFINITY` for none
    pub row_upper: Vec<f64>,
}

impl ProblemData {
    /// Number of columns, as given by `column_lower`
    pub fn num_cols(&self) -> usize {
        self.column_lower.len()
    }

    /// Number of rows, as given by `row_lower`
    pub fn num_rows(&self) -> usize {
        self.row_lower.len()
    }

    /// Number of matrix entries, as given by `row_indices`
    pub fn num_entries(&self) -> usize {
        self.row_indices.len()
    }

    /// Number of integer or binary columns
    pub fn num_integer_cols(&self) -> usize {
        self.column_kinds
            .iter()
            .filter(|&&k| k != ColumnKind::Continuous)
            .count()
    }

    /// Checks that the problem can be handed to the engine as is.
    ///
    /// Array lengths are checked first ([Error::SizeMismatch]), then matrix indices
    /// ([Error::IndexOutOfRange], [Error::DuplicateEntry]), then values
    /// ([Error::NonFiniteValue]) and finally bounds ([Error::InvalidBounds]).
    pub fn validate(&self) -> Result<()> {
        self.check_sizes()?;
        self.check_indices()?;
        check_finite("objective", &self.objective)?;
        check_finite("values", &self.values)?;
        check_bounds("column", &self.column_lower, &self.column_upper)?;
        check_bounds("row", &self.row_lower, &self.row_upper)
    }

    fn check_sizes(&self) -> Result<()> {
        let num_cols = self.num_cols();
        let num_rows = self.num_rows();
        let ne = self.num_entries();
        check_size("objective", self.objective.len(), num_cols)?;
        check_size("col_indices", self.col_indices.len(), ne)?;
        check_size("values", self.values.len(), ne)?;
        check_size("column_kinds", self.column_kinds.len(), num_cols)?;
        check_size("column_upper", self.column_upper.len(), num_cols)?;
        check_size("row_upper", self.row_upper.len(), num_rows)
    }

    fn check_indices(&self) -> Result<()> {
        let num_rows = self.num_rows();
        let num_cols = self.num_cols();
        let mut seen = FnvHashSet::default();
        seen.reserve(self.num_entries());
        for (position, (&row, &col)) in self.row_indices.iter().zip(&self.col_indices).enumerate() {
            if row >= num_rows {
                return Err(Error::IndexOutOfRange {
                    field: "row_indices",
                    position,
                    index: row,
                    bound: num_rows,
                });
            }
            if col >= num_cols {
                return Err(Error::IndexOutOfRange {
                    field: "col_indices",
                    position,
                    index: col,
                    bound: num_cols,
                });
            }
            if !seen.insert((row, col)) {
                return Err(Error::DuplicateEntry { row, col });
            }
        }
        Ok(())
    }

    /// Replaces the content of `native` by this problem. Must only be called on validated data.
    pub(crate) fn load_into<N: NativeProblem>(&self, native: &mut N) {
        log::debug!(
            "Loading a problem with {} rows, {} columns and {} matrix entries",
            self.num_rows(),
            self.num_cols(),
            self.num_entries()
        );
        native.erase();
        native.add_rows(self.num_rows());
        native.add_cols(self.num_cols());
        native.set_obj_dir(self.direction.code());
        for (col, &coef) in self.objective.iter().enumerate() {
            native.set_obj_coef(col, coef);
        }
        native.load_matrix(&self.row_indices, &self.col_indices, &self.values);
        for (col, (&lower, &upper)) in self.column_lower.iter().zip(&self.column_upper).enumerate() {
            native.set_col_bounds(col, BoundKind::classify(lower, upper).code(), lower, upper);
        }
        // After the bounds, so that binary columns end up in [0, 1]
        for (col, kind) in self.column_kinds.iter().enumerate() {
            native.set_col_kind(col, kind.code());
        }
        for (row, (&lower, &upper)) in self.row_lower.iter().zip(&self.row_upper).enumerate() {
            native.set_row_bounds(row, BoundKind::classify(lower, upper).code(), lower, upper);
        }
    }
}

fn check_size(field: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::SizeMismatch {
            field,
            expected,
            actual,
        })
    }
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        None => Ok(()),
        Some(index) => Err(Error::NonFiniteValue {
            field,
            index,
            value: values[index],
        }),
    }
}

fn check_bounds(field: &'static str, lower: &[f64], upper: &[f64]) -> Result<()> {
    for (index, (&lower, &upper)) in lower.iter().zip(upper).enumerate() {
        // NaN fails the comparison, and an infinite bound on the wrong side is empty
        let valid = lower <= upper && lower != f64::INFINITY && upper != f64::NEG_INFINITY;
        if !valid {
            return Err(Error::InvalidBounds {
                field,
                index,
                lower,
                upper,
            });
        }
    }
    Ok(())
}
