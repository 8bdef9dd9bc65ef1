//! Define linear and mixed-integer problems in coordinate form and solve them with
//! [GLPK](https://www.gnu.org/software/glpk/): continuous relaxation first, then integer
//! search when the problem has integer columns, with a single reconciled status at the end.
//!
//! ```rust,no_run
//! use glpk_core::{ColumnKind, Direction, ProblemData, SolveOptions, Status};
//!
//! let data = ProblemData {
//!     direction: Direction::Minimize,
//!     objective: vec![8., 10.],
//!     row_indices: vec![0, 1, 2, 0, 1, 2],
//!     col_indices: vec![0, 0, 0, 1, 1, 1],
//!     values: vec![2., 3., 2., 2., 4., 1.],
//!     column_kinds: vec![ColumnKind::Integer; 2],
//!     column_lower: vec![0.; 2],
//!     column_upper: vec![f64::INFINITY; 2],
//!     row_lower: vec![7., 12., 6.],
//!     row_upper: vec![f64::INFINITY; 3],
//! };
//! let mut problem = glpk_core::load_problem(&data)?;
//! let result = problem.solve(&SolveOptions::default())?;
//! assert_eq!(result.status, Status::Optimal);
//! println!("objective={} columns={:?}", result.objective_value, result.col_primal);
//! # Ok::<_, glpk_core::Error>(())
//! ```

use std::path::Path;

pub use bounds::BoundKind;
pub use error::{Error, Result, StatusOrigin};
pub use format::{FileFormat, MpsFormat};
pub use options::{MessageLevel, SolveOptions};
pub use problem::Problem;
pub use problem_data::{ColumnKind, Direction, ProblemData};
pub use solve::{PhaseCodes, SolveResult, StatusSource};
pub use solvers::{Glpk, GlpkProblem, NativeProblem, PhaseParams};
pub use status::Status;

#[macro_use]
pub mod solvers;
mod bounds;
pub mod error;
mod format;
mod options;
mod problem;
mod problem_data;
pub mod solve;
pub mod status;

/// Creates a GLPK problem and loads `data` into it
pub fn load_problem(data: &ProblemData) -> Result<Problem> {
    let mut problem = Problem::new()?;
    problem.load_problem(data)?;
    Ok(problem)
}

/// Creates a GLPK problem from a CPLEX LP file
pub fn read_lp(path: impl AsRef<Path>) -> Result<Problem> {
    let mut problem = Problem::new()?;
    problem.read_from(path, FileFormat::Lp)?;
    Ok(problem)
}

/// Creates a GLPK problem from a free MPS file
pub fn read_mps(path: impl AsRef<Path>) -> Result<Problem> {
    let mut problem = Problem::new()?;
    problem.read_from(path, FileFormat::MPS)?;
    Ok(problem)
}

/// Version of the GLPK library in use
pub fn library_version() -> Result<String> {
    Ok(Glpk::load()?.version())
}
