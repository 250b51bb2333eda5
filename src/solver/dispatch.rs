//! Solver selection by name.

use super::core::{ParamError, Problem, QpError, Solution, SolverOptions};
use super::implementations::clarabel::clarabel_solve_problem;
use derive_builder::Builder;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// QP solvers that this crate can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Solver {
    Clarabel,
    Piqp,
}

impl FromStr for Solver {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clarabel" => Ok(Solver::Clarabel),
            "piqp" => Ok(Solver::Piqp),
            _ => Err(ParamError::UnknownSolver(s.to_string())),
        }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Clarabel => write!(f, "clarabel"),
            Solver::Piqp => write!(f, "piqp"),
        }
    }
}

/// Solvers compiled into this build
pub fn available_solvers() -> Vec<Solver> {
    let mut solvers = vec![Solver::Clarabel];
    if cfg!(feature = "piqp") {
        solvers.push(Solver::Piqp);
    }
    solvers
}

/// Per-call parameters shared by all solvers.
///
/// __Example usage__ :
///
/// ```no_run
/// use qpbridge::solver::*;
///
/// let params = SolveParamsBuilder::default()
///     .verbose(true)
///     .backend("sparse")
///     .options(SolverOptions::new().set("eps_abs", 1e-9))
///     .build()
///     .unwrap();
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveParams {
    ///verbose printing by the solver
    #[builder(default = "false")]
    pub verbose: bool,

    ///warm start guess for x, ignored by solvers that cannot warm start
    #[builder(default, setter(strip_option))]
    pub initvals: Option<Vec<f64>>,

    ///linear algebra backend, for solvers that have several
    #[builder(default, setter(into, strip_option))]
    pub backend: Option<String>,

    ///options forwarded to the solver
    #[builder(default)]
    pub options: SolverOptions,
}

/// Solve a quadratic program with the named solver
pub fn solve_problem(
    problem: &Problem<f64>,
    solver: Solver,
    params: &SolveParams,
) -> Result<Solution<f64>, QpError> {
    let initvals = params.initvals.as_deref();
    if let Some(x0) = initvals {
        if x0.len() != problem.n() {
            return Err(ParamError::BadInitvals {
                expected: problem.n(),
                found: x0.len(),
            }
            .into());
        }
    }

    log::debug!("dispatching problem with n = {} to {}", problem.n(), solver);

    match solver {
        Solver::Clarabel => {
            if let Some(backend) = &params.backend {
                return Err(ParamError::UnknownBackend {
                    solver: "Clarabel",
                    value: backend.clone(),
                }
                .into());
            }
            clarabel_solve_problem(problem, initvals, params.verbose, &params.options)
        }
        Solver::Piqp => solve_piqp(problem, initvals, params),
    }
}

/// Solve a quadratic program with the named solver, returning only the
/// primal solution if one was found
pub fn solve_qp(
    problem: &Problem<f64>,
    solver: Solver,
    params: &SolveParams,
) -> Result<Option<Vec<f64>>, QpError> {
    let solution = solve_problem(problem, solver, params)?;
    Ok(solution.found.then_some(solution.x))
}

cfg_if::cfg_if! {
    if #[cfg(feature = "piqp")] {
        fn solve_piqp(
            problem: &Problem<f64>,
            initvals: Option<&[f64]>,
            params: &SolveParams,
        ) -> Result<Solution<f64>, QpError> {
            super::implementations::piqp::piqp_solve_problem(
                problem,
                initvals,
                params.verbose,
                params.backend.as_deref(),
                &params.options,
            )
        }
    } else {
        // input errors are reported ahead of the missing library
        fn solve_piqp(
            problem: &Problem<f64>,
            _initvals: Option<&[f64]>,
            params: &SolveParams,
        ) -> Result<Solution<f64>, QpError> {
            problem.check()?;
            super::implementations::piqp::select_backend(
                params.backend.as_deref(),
                problem.has_sparse(),
            )?;
            Err(super::core::SolverError::NotAvailable("PIQP").into())
        }
    }
}

#[test]
fn test_solver_names() {
    assert_eq!("clarabel".parse::<Solver>(), Ok(Solver::Clarabel));
    assert_eq!("PIQP".parse::<Solver>(), Ok(Solver::Piqp));
    assert!(matches!(
        "quadprog".parse::<Solver>(),
        Err(ParamError::UnknownSolver(ref s)) if s == "quadprog"
    ));
    assert_eq!(Solver::Piqp.to_string(), "piqp");
    assert!(available_solvers().contains(&Solver::Clarabel));
}
