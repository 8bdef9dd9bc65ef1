//! An engine that uses [highs](https://docs.rs/highs), a parallel C++ solver.
//!
//! HiGHS has no persistent problem object that can be edited in place the way GLPK's can,
//! so [HighsProblem] keeps the problem on the Rust side and builds a fresh
//! [highs::RowProblem] for each phase. Its results are translated to the GLPK code tables
//! so that status reconciliation works the same for both engines.
use std::path::Path;

use highs::HighsModelStatus;

use crate::solvers::{NativeProblem, PhaseParams};
use crate::{BoundKind, ColumnKind, Direction, FileFormat};

/// Returned by [NativeProblem::read] and [NativeProblem::write]: HiGHS models cannot be
/// read from or written to files through this engine.
pub const UNSUPPORTED: i32 = 1;

/// A problem solved with HiGHS.
///
/// ```
/// use glpk_core::{ColumnKind, Direction, Problem, ProblemData, SolveOptions, Status};
/// use glpk_core::solvers::HighsProblem;
///
/// let mut problem = Problem::from_native(HighsProblem::new());
/// problem.load_problem(&ProblemData {
///     direction: Direction::Maximize,
///     objective: vec![1., 1.],
///     row_indices: vec![0, 0],
///     col_indices: vec![0, 1],
///     values: vec![1., 2.],
///     column_kinds: vec![ColumnKind::Integer; 2],
///     column_lower: vec![0.; 2],
///     column_upper: vec![f64::INFINITY; 2],
///     row_lower: vec![f64::NEG_INFINITY],
///     row_upper: vec![3.5],
/// })?;
/// let result = problem.solve(&SolveOptions::default())?;
/// assert_eq!(result.status, Status::Optimal);
/// assert!((result.objective_value - 3.).abs() < 1e-6);
/// # Ok::<_, glpk_core::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HighsProblem {
    maximize: bool,
    objective: Vec<f64>,
    col_lower: Vec<f64>,
    col_upper: Vec<f64>,
    integer: Vec<bool>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    entries: Vec<(usize, usize, f64)>,
    relaxation: Option<Outcome>,
    integer_solution: Option<Outcome>,
}

/// What one phase left behind, already in GLPK codes
#[derive(Debug, Clone)]
struct Outcome {
    status: i32,
    objective: f64,
    rows: Vec<f64>,
    cols: Vec<f64>,
    row_duals: Vec<f64>,
    col_duals: Vec<f64>,
}

/// Reported before a phase has run
static NO_SOLUTION: Outcome = Outcome {
    status: 1,
    objective: 0.,
    rows: Vec::new(),
    cols: Vec::new(),
    row_duals: Vec::new(),
    col_duals: Vec::new(),
};

fn value(values: &[f64], index: usize) -> f64 {
    values.get(index).copied().unwrap_or(0.)
}

/// Bounds as HiGHS wants them, with infinities for the missing sides
fn effective_bounds(kind: i32, lower: f64, upper: f64) -> (f64, f64) {
    match BoundKind::from_code(kind) {
        Some(BoundKind::Free) | None => (f64::NEG_INFINITY, f64::INFINITY),
        Some(BoundKind::LowerBounded) => (lower, f64::INFINITY),
        Some(BoundKind::UpperBounded) => (f64::NEG_INFINITY, upper),
        Some(BoundKind::DoubleBounded) => (lower, upper),
        Some(BoundKind::Fixed) => (lower, lower),
    }
}

/// (return code, solution status) for a HiGHS model status
fn glpk_codes(status: HighsModelStatus) -> (i32, i32) {
    match status {
        HighsModelStatus::Optimal | HighsModelStatus::ModelEmpty => (0, 5),
        HighsModelStatus::Infeasible => (0, 4),
        HighsModelStatus::Unbounded => (0, 6),
        HighsModelStatus::UnboundedOrInfeasible => (0, 1),
        HighsModelStatus::ReachedTimeLimit => (9, 1),
        HighsModelStatus::ReachedIterationLimit => (8, 1),
        _ => (5, 1),
    }
}

impl HighsProblem {
    /// An empty problem
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves the stored problem once. Returns the phase's return code and its outcome.
    fn run(&self, params: &PhaseParams, with_integrality: bool) -> (i32, Outcome) {
        let mut problem = highs::RowProblem::default();
        let columns: Vec<highs::Col> = (0..self.objective.len())
            .map(|j| {
                problem.add_column_with_integrality(
                    self.objective[j],
                    self.col_lower[j]..=self.col_upper[j],
                    with_integrality && self.integer[j],
                )
            })
            .collect();
        let mut rows = vec![Vec::new(); self.row_lower.len()];
        for &(row, col, value) in &self.entries {
            rows[row].push((columns[col], value));
        }
        for (row, factors) in rows.into_iter().enumerate() {
            problem.add_row(self.row_lower[row]..=self.row_upper[row], factors);
        }

        let sense = if self.maximize {
            highs::Sense::Maximise
        } else {
            highs::Sense::Minimise
        };
        let mut model = problem.optimise(sense);
        if params.message_level > 0 {
            model.set_option(&b"output_flag"[..], true);
            model.set_option(&b"log_to_console"[..], true);
        } else {
            model.make_quiet();
        }
        if let Some(ms) = params.time_limit_ms {
            model.set_option(&b"time_limit"[..], f64::from(ms) / 1000.);
        }

        let solved = model.solve();
        let model_status = solved.status();
        let (code, status) = glpk_codes(model_status);
        log::debug!(
            "HiGHS {} phase ended with {:?}",
            if with_integrality { "integer" } else { "relaxation" },
            model_status
        );
        let solution = solved.get_solution();
        let cols = solution.columns().to_vec();
        let objective = self
            .objective
            .iter()
            .zip(&cols)
            .map(|(coef, x)| coef * x)
            .sum();
        let outcome = Outcome {
            status,
            objective,
            rows: solution.rows().to_vec(),
            cols,
            row_duals: solution.dual_rows().to_vec(),
            col_duals: solution.dual_columns().to_vec(),
        };
        (code, outcome)
    }

    fn relaxation(&self) -> &Outcome {
        self.relaxation.as_ref().unwrap_or(&NO_SOLUTION)
    }

    fn integer_solution(&self) -> &Outcome {
        self.integer_solution.as_ref().unwrap_or(&NO_SOLUTION)
    }

    fn forget_solutions(&mut self) {
        self.relaxation = None;
        self.integer_solution = None;
    }
}

impl NativeProblem for HighsProblem {
    fn erase(&mut self) {
        *self = HighsProblem::default();
    }

    fn add_rows(&mut self, count: usize) {
        let rows = self.row_lower.len() + count;
        self.row_lower.resize(rows, f64::NEG_INFINITY);
        self.row_upper.resize(rows, f64::INFINITY);
        self.forget_solutions();
    }

    fn add_cols(&mut self, count: usize) {
        let cols = self.objective.len() + count;
        self.objective.resize(cols, 0.);
        // GLPK columns start out fixed at zero
        self.col_lower.resize(cols, 0.);
        self.col_upper.resize(cols, 0.);
        self.integer.resize(cols, false);
        self.forget_solutions();
    }

    fn set_obj_dir(&mut self, direction: i32) {
        self.maximize = direction == Direction::Maximize.code();
    }

    fn set_obj_coef(&mut self, col: usize, coef: f64) {
        self.objective[col] = coef;
    }

    fn load_matrix(&mut self, rows: &[usize], cols: &[usize], values: &[f64]) {
        self.entries = rows
            .iter()
            .zip(cols)
            .zip(values)
            .map(|((&row, &col), &value)| (row, col, value))
            .collect();
        self.forget_solutions();
    }

    fn set_col_kind(&mut self, col: usize, kind: i32) {
        self.integer[col] = kind != ColumnKind::Continuous.code();
        if kind == ColumnKind::Binary.code() {
            self.col_lower[col] = 0.;
            self.col_upper[col] = 1.;
        }
    }

    fn set_col_bounds(&mut self, col: usize, kind: i32, lower: f64, upper: f64) {
        let (lower, upper) = effective_bounds(kind, lower, upper);
        self.col_lower[col] = lower;
        self.col_upper[col] = upper;
    }

    fn set_row_bounds(&mut self, row: usize, kind: i32, lower: f64, upper: f64) {
        let (lower, upper) = effective_bounds(kind, lower, upper);
        self.row_lower[row] = lower;
        self.row_upper[row] = upper;
    }

    fn num_rows(&self) -> usize {
        self.row_lower.len()
    }

    fn num_cols(&self) -> usize {
        self.objective.len()
    }

    fn num_int(&self) -> usize {
        self.integer.iter().filter(|&&i| i).count()
    }

    fn read(&mut self, path: &Path, format: FileFormat) -> i32 {
        log::warn!("HiGHS engine cannot read {} file {}", format, path.display());
        UNSUPPORTED
    }

    fn write(&self, path: &Path, format: FileFormat) -> i32 {
        log::warn!("HiGHS engine cannot write {} file {}", format, path.display());
        UNSUPPORTED
    }

    fn simplex(&mut self, params: &PhaseParams) -> i32 {
        let (code, outcome) = self.run(params, false);
        self.relaxation = Some(outcome);
        self.integer_solution = None;
        code
    }

    fn intopt(&mut self, params: &PhaseParams) -> i32 {
        let (code, outcome) = self.run(params, true);
        self.integer_solution = Some(outcome);
        code
    }

    fn lp_status(&self) -> i32 {
        self.relaxation().status
    }

    fn lp_obj_val(&self) -> f64 {
        self.relaxation().objective
    }

    fn row_prim(&self, row: usize) -> f64 {
        value(&self.relaxation().rows, row)
    }

    fn row_dual(&self, row: usize) -> f64 {
        value(&self.relaxation().row_duals, row)
    }

    fn col_prim(&self, col: usize) -> f64 {
        value(&self.relaxation().cols, col)
    }

    fn col_dual(&self, col: usize) -> f64 {
        value(&self.relaxation().col_duals, col)
    }

    fn mip_status(&self) -> i32 {
        self.integer_solution().status
    }

    fn mip_obj_val(&self) -> f64 {
        self.integer_solution().objective
    }

    fn mip_row_val(&self, row: usize) -> f64 {
        value(&self.integer_solution().rows, row)
    }

    fn mip_col_val(&self, col: usize) -> f64 {
        value(&self.integer_solution().cols, col)
    }
}
