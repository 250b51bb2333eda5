//! QP solver adapters.
//!
//! A [`Problem`] is solved by one of the adapters in
//! [`implementations`], each of which normalizes the problem into the
//! layout its solver expects, forwards caller options onto the solver's
//! typed settings, and translates the solver's output back into a
//! [`Solution`].  The [`solve_problem`] entry point picks the adapter by
//! [`Solver`] name.

// internal module structure
pub mod core;
mod dispatch;
pub mod implementations;

//Here we expose the problem and solution records
//and the option types at the top level for a more
//user friendly API

pub use crate::solver::core::*;
pub use crate::solver::dispatch::*;

pub use crate::solver::implementations::clarabel::{clarabel_solve_problem, clarabel_solve_qp};
pub use crate::solver::implementations::piqp::{
    piqp_solve_problem_with, PiqpBackend, PiqpLibrary, PiqpSettings, PiqpSettingsBuilder,
    PiqpWorkspace,
};

#[cfg(feature = "piqp")]
pub use crate::solver::implementations::piqp::{piqp_solve_problem, piqp_solve_qp, NativePiqp};
