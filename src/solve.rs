//! Two-phase solve: continuous relaxation first, integer search only when the problem has
//! integer or binary columns, then one status out of the phases' codes.
use crate::solvers::{NativeProblem, PhaseParams};
use crate::{Result, SolveOptions, Status};

/// One place a status can be read from after solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusSource {
    /// Return code of the relaxation phase
    SimplexReturn,
    /// Solution status of the relaxation
    SimplexStatus,
    /// Return code of the integer phase
    IntoptReturn,
    /// Solution status of the integer search
    MipStatus,
}

/// Status lookup order for a problem without integer columns.
pub const CONTINUOUS_CHAIN: &[StatusSource] =
    &[StatusSource::SimplexReturn, StatusSource::SimplexStatus];

/// Status lookup order for a problem with integer columns.
pub const INTEGER_CHAIN: &[StatusSource] = &[StatusSource::IntoptReturn, StatusSource::MipStatus];

/// Statuses that are not reported as such but replaced by the first status of another chain.
/// A replacement is never replaced again.
pub const SUBSTITUTIONS: &[(Status, &[StatusSource])] = &[(Status::RootLpOptimum, CONTINUOUS_CHAIN)];

/// The raw codes collected during a solve. Integer phase codes are absent when it did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseCodes {
    /// `glp_simplex` return code
    pub simplex_return: i32,
    /// `glp_get_status` right after the relaxation
    pub simplex_status: i32,
    /// `glp_intopt` return code
    pub intopt_return: Option<i32>,
    /// `glp_mip_status` after the integer search
    pub mip_status: Option<i32>,
}

impl PhaseCodes {
    /// The status a single source maps to. `None` when the source has nothing to say:
    /// a successful return code, or a phase that did not run.
    pub fn resolve(&self, source: StatusSource) -> Result<Option<Status>> {
        match source {
            StatusSource::SimplexReturn => Status::from_return_code(self.simplex_return),
            StatusSource::SimplexStatus => Status::from_solution_code(self.simplex_status).map(Some),
            StatusSource::IntoptReturn => self
                .intopt_return
                .map_or(Ok(None), Status::from_return_code),
            StatusSource::MipStatus => self.mip_status.map(Status::from_solution_code).transpose(),
        }
    }

    fn first(&self, chain: &[StatusSource]) -> Result<Option<Status>> {
        for &source in chain {
            if let Some(status) = self.resolve(source)? {
                log::trace!("{:?} resolved to {}", source, status);
                return Ok(Some(status));
            }
        }
        Ok(None)
    }

    /// Walks `chain` and returns the first status found, applying [SUBSTITUTIONS] once.
    ///
    /// A chain that yields nothing reports [Status::Undefined]. Any code outside the native
    /// tables met on the way is an error.
    pub fn reconcile(&self, chain: &[StatusSource]) -> Result<Status> {
        let status = match self.first(chain)? {
            Some(status) => status,
            None => return Ok(Status::Undefined),
        };
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == status) {
            Some((_, fallback)) => Ok(self.first(fallback)?.unwrap_or(Status::Undefined)),
            None => Ok(status),
        }
    }
}

/// The outcome of one solve. Plain data, detached from the problem it came from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// Reconciled status
    pub status: Status,
    /// Objective value
    pub objective_value: f64,
    /// Value of each row
    pub row_primal: Vec<f64>,
    /// Value of each column
    pub col_primal: Vec<f64>,
    /// Row duals. Only for problems without integer columns.
    pub row_dual: Option<Vec<f64>>,
    /// Column reduced costs. Only for problems without integer columns.
    pub col_dual: Option<Vec<f64>>,
}

impl SolveResult {
    /// Whether this comes from the integer phase
    pub fn is_integer(&self) -> bool {
        self.row_dual.is_none()
    }
}

/// Runs the relaxation, then the integer search if `native` has integer columns.
///
/// Both phases receive the full time limit: the integer phase is not charged for the time
/// the relaxation took.
pub(crate) fn solve<N: NativeProblem>(native: &mut N, options: &SolveOptions) -> Result<SolveResult> {
    let params = PhaseParams {
        message_level: options.message_level.code(),
        time_limit_ms: options.time_limit_ms(),
    };
    let num_rows = native.num_rows();
    let num_cols = native.num_cols();

    log::debug!(
        "Solving relaxation ({} rows, {} columns, time limit {:?} ms)",
        num_rows,
        num_cols,
        params.time_limit_ms
    );
    let mut codes = PhaseCodes {
        simplex_return: native.simplex(&params),
        ..PhaseCodes::default()
    };
    codes.simplex_status = native.lp_status();

    let num_int = native.num_int();
    if num_int == 0 {
        let status = codes.reconcile(CONTINUOUS_CHAIN)?;
        log::debug!("Relaxation finished with {} ({:?})", status, codes);
        return Ok(SolveResult {
            status,
            objective_value: native.lp_obj_val(),
            row_primal: (0..num_rows).map(|i| native.row_prim(i)).collect(),
            col_primal: (0..num_cols).map(|j| native.col_prim(j)).collect(),
            row_dual: Some((0..num_rows).map(|i| native.row_dual(i)).collect()),
            col_dual: Some((0..num_cols).map(|j| native.col_dual(j)).collect()),
        });
    }

    log::debug!("Searching for an integer solution over {} integer columns", num_int);
    codes.intopt_return = Some(native.intopt(&params));
    codes.mip_status = Some(native.mip_status());
    let status = codes.reconcile(INTEGER_CHAIN)?;
    log::debug!("Integer search finished with {} ({:?})", status, codes);
    Ok(SolveResult {
        status,
        objective_value: native.mip_obj_val(),
        row_primal: (0..num_rows).map(|i| native.mip_row_val(i)).collect(),
        col_primal: (0..num_cols).map(|j| native.mip_col_val(j)).collect(),
        row_dual: None,
        col_dual: None,
    })
}
