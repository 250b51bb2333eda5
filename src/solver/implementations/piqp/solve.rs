use super::*;
use crate::algebra::*;
use crate::solver::core::{Problem, QpError, Solution, SolverOptions};
use itertools::izip;

/// Solve a quadratic program using a PIQP implementation.
///
/// The backend is `"dense"`, `"sparse"`, or `None` to pick the sparse
/// backend whenever one of `P`, `G`, `A` is stored sparse.  Box bounds
/// are passed to PIQP natively and `z_box` is recovered as the upper
/// bound dual minus the lower bound dual.  PIQP does not warm start, so
/// `initvals` is ignored.
///
/// Unknown keys in `options` are skipped with a warning unless the
/// options override the policy.  A solve that terminates with any status
/// other than `Solved` returns a solution with `found = false`, empty
/// vectors, and the solve information in `extras`.
pub fn piqp_solve_problem_with<T, L>(
    library: &L,
    problem: &Problem<T>,
    initvals: Option<&[T]>,
    verbose: bool,
    backend: Option<&str>,
    options: &SolverOptions,
) -> Result<Solution<T>, QpError>
where
    T: FloatT,
    L: PiqpLibrary<T>,
{
    problem.check()?;

    if initvals.is_some() && verbose {
        log::warn!("warm-start values are ignored by PIQP");
    }

    let backend = select_backend(backend, problem.has_sparse())?;
    let settings = piqp_settings(verbose, options)?;
    let data = PiqpData::new(problem, backend);

    let mut workspace = library.setup(&data, &settings)?;
    let status = workspace.solve();
    let result = workspace.result();

    Ok(translate_solution(problem, &data, status, result))
}

fn translate_solution<T: FloatT>(
    problem: &Problem<T>,
    data: &PiqpData<T>,
    status: PiqpStatus,
    result: PiqpResult<T>,
) -> Solution<T> {
    let mut solution = Solution::new();
    solution.extras = result.info.to_extras();
    solution.extras.insert("status".into(), status.to_string().into());
    solution.found = status == PiqpStatus::Solved;

    if !solution.found {
        log::info!("PIQP terminated with status {status}");
        return solution;
    }

    let PiqpResult {
        x, y, z, z_lb, z_ub, ..
    } = result;

    solution.x = x;
    if !data.padded_eq {
        solution.y = y;
    }
    if !data.padded_ineq {
        solution.z = z;
    }
    if problem.has_bounds() {
        solution.z_box = izip!(&z_ub, &z_lb).map(|(&u, &l)| u - l).collect();
    }
    solution
}

cfg_if::cfg_if! {
    if #[cfg(feature = "piqp")] {

        /// Solve a quadratic program using the native PIQP library.
        ///
        /// See [`piqp_solve_problem_with`] for details.
        pub fn piqp_solve_problem(
            problem: &Problem<f64>,
            initvals: Option<&[f64]>,
            verbose: bool,
            backend: Option<&str>,
            options: &SolverOptions,
        ) -> Result<Solution<f64>, QpError> {
            piqp_solve_problem_with(&NativePiqp, problem, initvals, verbose, backend, options)
        }

        /// Solve a quadratic program using the native PIQP library,
        /// returning only the primal solution if one was found.
        pub fn piqp_solve_qp(
            problem: &Problem<f64>,
            initvals: Option<&[f64]>,
            verbose: bool,
            backend: Option<&str>,
            options: &SolverOptions,
        ) -> Result<Option<Vec<f64>>, QpError> {
            let solution = piqp_solve_problem(problem, initvals, verbose, backend, options)?;
            Ok(solution.found.then_some(solution.x))
        }
    }
}
