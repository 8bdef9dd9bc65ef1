//! The problem handle: owns one native problem until it is freed.
use std::path::Path;

use crate::solvers::{Glpk, GlpkProblem, NativeProblem};
use crate::{solve, Error, FileFormat, ProblemData, Result, SolveOptions, SolveResult};

/// A problem owned by a native engine.
///
/// A handle is either live or freed. Every operation on a freed handle fails with
/// [Error::UseAfterFree]; [free](Problem::free) itself can be called any number of times.
/// Dropping a live handle releases the native problem as well.
///
/// Cloning a live handle deep-copies the native problem.
#[derive(Debug, Clone)]
pub struct Problem<N: NativeProblem = GlpkProblem> {
    native: Option<N>,
}

impl Problem<GlpkProblem> {
    /// An empty problem in the process-wide GLPK library
    pub fn new() -> Result<Self> {
        Ok(Self::with_glpk(&Glpk::load()?))
    }

    /// An empty problem in the given GLPK library
    pub fn with_glpk(glpk: &Glpk) -> Self {
        Self::from_native(glpk.create_problem())
    }
}

impl<N: NativeProblem> Problem<N> {
    /// Takes ownership of an existing native problem
    pub fn from_native(native: N) -> Self {
        Problem {
            native: Some(native),
        }
    }

    fn native(&self) -> Result<&N> {
        self.native.as_ref().ok_or(Error::UseAfterFree)
    }

    fn native_mut(&mut self) -> Result<&mut N> {
        self.native.as_mut().ok_or(Error::UseAfterFree)
    }

    /// The native problem, while the handle is live
    pub fn as_native(&self) -> Option<&N> {
        self.native.as_ref()
    }

    /// Replaces the content of this problem by `data`.
    ///
    /// `data` is validated first: on error the native problem is left untouched.
    pub fn load_problem(&mut self, data: &ProblemData) -> Result<()> {
        let native = self.native_mut()?;
        data.validate()?;
        data.load_into(native);
        Ok(())
    }

    /// Replaces the content of this problem by a model file.
    ///
    /// If the engine fails to read the file, the problem is left empty.
    pub fn read_from(&mut self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let path = path.as_ref();
        let native = self.native_mut()?;
        log::debug!("Reading {} model from {}", format, path.display());
        let code = native.read(path, format);
        if code != 0 {
            native.erase();
            return Err(Error::Format {
                operation: "read",
                code,
            });
        }
        Ok(())
    }

    /// Writes this problem to a model file
    pub fn write_to(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let path = path.as_ref();
        let native = self.native()?;
        log::debug!("Writing {} model to {}", format, path.display());
        match native.write(path, format) {
            0 => Ok(()),
            code => Err(Error::Format {
                operation: "write",
                code,
            }),
        }
    }

    /// Solves the relaxation, then searches for an integer solution if the problem has
    /// integer or binary columns.
    ///
    /// A problem that could not be solved to optimality is not an error: check
    /// [SolveResult::status].
    pub fn solve(&mut self, options: &SolveOptions) -> Result<SolveResult> {
        solve::solve(self.native_mut()?, options)
    }

    /// Releases the native problem. Does nothing if it was already released.
    pub fn free(&mut self) {
        if self.native.take().is_some() {
            log::trace!("Freed native problem");
        }
    }

    /// Whether [free](Problem::free) was called
    pub fn is_freed(&self) -> bool {
        self.native.is_none()
    }

    /// Number of rows in the native problem
    pub fn num_rows(&self) -> Result<usize> {
        Ok(self.native()?.num_rows())
    }

    /// Number of columns in the native problem
    pub fn num_cols(&self) -> Result<usize> {
        Ok(self.native()?.num_cols())
    }

    /// Number of integer and binary columns in the native problem
    pub fn num_integer_cols(&self) -> Result<usize> {
        Ok(self.native()?.num_int())
    }
}
