//! Normalization of the engine's numeric status and return codes.
//!
//! The engine reports two families of codes: a *solution status* describing the basis or
//! the incumbent (`glp_get_status`, `glp_mip_status`), and a *return code* from each solve
//! phase (`glp_simplex`, `glp_intopt`) describing why the phase stopped. Both are folded
//! into the single [Status] enum. A code outside the tables is an error, never a default.
use std::fmt;
use std::str::FromStr;

use crate::error::StatusOrigin;
use crate::{Error, Result};

/// Outcome of a solve.
///
/// The first six variants come from the solution status table, the rest from the phase
/// return code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Status {
    /// The solution is undefined
    Undefined,
    /// A feasible, not necessarily optimal, solution was found
    Feasible,
    /// The current solution is infeasible
    Infeasible,
    /// The problem has no feasible solution
    NoFeasible,
    /// An optimal solution was found
    Optimal,
    /// The objective is unbounded
    Unbounded,
    /// The initial basis is invalid
    InvalidBasis,
    /// The basis matrix is singular
    SingularMatrix,
    /// The basis matrix is ill-conditioned
    IllConditioned,
    /// Some double-bounded variable has incorrect bounds
    InvalidBounds,
    /// The solver failed
    Failed,
    /// The objective lower limit was reached
    LowerLimitReached,
    /// The objective upper limit was reached
    UpperLimitReached,
    /// The iteration limit was reached
    IterationLimitReached,
    /// The time limit was reached
    TimeLimitReached,
    /// No primal feasible solution exists
    NoPrimalFeasible,
    /// No dual feasible solution exists
    NoDualFeasible,
    /// The integer phase did not run from an optimal root relaxation.
    /// The relaxation's own status applies.
    RootLpOptimum,
    /// The search was terminated by the application
    Terminated,
    /// The relative MIP gap tolerance was reached
    MipGapToleranceReached,
    /// Neither a primal nor a dual feasible solution exists
    NoPrimalDualFeasible,
    /// The solver did not converge
    NoConvergence,
    /// Numerical instability
    NumericalInstability,
    /// Invalid problem data
    InvalidData,
    /// A result is out of range
    OutOfRange,
}

/// Native solution status codes.
pub const SOLUTION_STATUS_CODES: [(i32, Status); 6] = [
    (1, Status::Undefined),
    (2, Status::Feasible),
    (3, Status::Infeasible),
    (4, Status::NoFeasible),
    (5, Status::Optimal),
    (6, Status::Unbounded),
];

/// Native phase return codes. `0` (success) is deliberately absent: it carries no status
/// of its own.
pub const RETURN_CODES: [(i32, Status); 19] = [
    (1, Status::InvalidBasis),
    (2, Status::SingularMatrix),
    (3, Status::IllConditioned),
    (4, Status::InvalidBounds),
    (5, Status::Failed),
    (6, Status::LowerLimitReached),
    (7, Status::UpperLimitReached),
    (8, Status::IterationLimitReached),
    (9, Status::TimeLimitReached),
    (10, Status::NoPrimalFeasible),
    (11, Status::NoDualFeasible),
    (12, Status::RootLpOptimum),
    (13, Status::Terminated),
    (14, Status::MipGapToleranceReached),
    (15, Status::NoPrimalDualFeasible),
    (16, Status::NoConvergence),
    (17, Status::NumericalInstability),
    (18, Status::InvalidData),
    (19, Status::OutOfRange),
];

/// Return code of a phase that completed.
pub const RETURN_SUCCESS: i32 = 0;

impl Status {
    /// Maps a solution status code.
    pub fn from_solution_code(code: i32) -> Result<Self> {
        lookup(&SOLUTION_STATUS_CODES, code).ok_or(Error::UnknownStatusCode {
            code,
            origin: StatusOrigin::SolutionStatus,
        })
    }

    /// Maps a phase return code. Success has no status of its own and yields `None`.
    pub fn from_return_code(code: i32) -> Result<Option<Self>> {
        if code == RETURN_SUCCESS {
            return Ok(None);
        }
        lookup(&RETURN_CODES, code)
            .map(Some)
            .ok_or(Error::UnknownStatusCode {
                code,
                origin: StatusOrigin::ReturnCode,
            })
    }

    /// Whether this status comes from the solution status table
    pub fn is_solution_status(self) -> bool {
        SOLUTION_STATUS_CODES.iter().any(|&(_, s)| s == self)
    }

    /// Optimal or merely feasible: the primal values describe a usable point.
    pub fn has_solution(self) -> bool {
        matches!(self, Status::Optimal | Status::Feasible)
    }

    /// Every status, solution statuses first.
    pub fn all() -> impl Iterator<Item = Status> {
        SOLUTION_STATUS_CODES
            .iter()
            .chain(RETURN_CODES.iter())
            .map(|&(_, s)| s)
    }

    /// The snake_case name of the status
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Undefined => "undefined",
            Status::Feasible => "feasible",
            Status::Infeasible => "infeasible",
            Status::NoFeasible => "no_feasible",
            Status::Optimal => "optimal",
            Status::Unbounded => "unbounded",
            Status::InvalidBasis => "invalid_basis",
            Status::SingularMatrix => "singular_matrix",
            Status::IllConditioned => "ill_conditioned",
            Status::InvalidBounds => "invalid_bounds",
            Status::Failed => "failed",
            Status::LowerLimitReached => "lower_limit_reached",
            Status::UpperLimitReached => "upper_limit_reached",
            Status::IterationLimitReached => "iteration_limit_reached",
            Status::TimeLimitReached => "time_limit_reached",
            Status::NoPrimalFeasible => "no_primal_feasible",
            Status::NoDualFeasible => "no_dual_feasible",
            Status::RootLpOptimum => "root_lp_optimum",
            Status::Terminated => "terminated",
            Status::MipGapToleranceReached => "mip_gap_tolerance_reached",
            Status::NoPrimalDualFeasible => "no_primal_dual_feasible",
            Status::NoConvergence => "no_convergence",
            Status::NumericalInstability => "numerical_instability",
            Status::InvalidData => "invalid_data",
            Status::OutOfRange => "out_of_range",
        }
    }
}

fn lookup(table: &[(i32, Status)], code: i32) -> Option<Status> {
    table.iter().find(|&&(c, _)| c == code).map(|&(_, s)| s)
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Status::all()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::UnknownSymbol {
                field: "status",
                value: s.to_string(),
            })
    }
}
