use super::{PiqpData, PiqpResult, PiqpSettings, PiqpStatus};
use crate::algebra::*;
use crate::solver::core::SolverError;

/// Entry point to a PIQP implementation.
///
/// The adapter only talks to PIQP through this trait, so that the
/// native library can be swapped for another binding or a test double.
pub trait PiqpLibrary<T: FloatT> {
    type Workspace: PiqpWorkspace<T>;

    /// Create a solver workspace for the given data.  The backend is
    /// determined by the layout of `data.matrices`.
    fn setup(
        &self,
        data: &PiqpData<T>,
        settings: &PiqpSettings<T>,
    ) -> Result<Self::Workspace, SolverError>;
}

/// A PIQP solver instance holding one problem
pub trait PiqpWorkspace<T: FloatT> {
    /// Run the solver to termination
    fn solve(&mut self) -> PiqpStatus;

    /// Iterates and solve information of the last call to `solve`
    fn result(&self) -> PiqpResult<T>;
}
