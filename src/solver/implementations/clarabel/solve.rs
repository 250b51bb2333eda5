#![allow(non_snake_case)]

use super::settings::clarabel_settings;
use crate::algebra::*;
use crate::solver::core::conversions::*;
use crate::solver::core::{
    ConeTag, ExtraValue, Extras, Problem, QpError, Solution, SolverError, SolverOptions,
};
use ::clarabel::solver::{DefaultSolution, DefaultSolver, IPSolver, SolverStatus, SupportedConeT};

pub(crate) fn to_clarabel_cone<T: FloatT>(cone: &ConeTag) -> SupportedConeT<T> {
    match *cone {
        ConeTag::ZeroCone(dim) => SupportedConeT::ZeroConeT(dim),
        ConeTag::NonnegativeCone(dim) => SupportedConeT::NonnegativeConeT(dim),
    }
}

/// Solve a quadratic program using Clarabel.
///
/// Equality and inequality constraints are stacked into the single
/// conic system `Ax + s = b` that Clarabel expects, with the equality
/// rows first.  Finite box bounds are folded into the inequality block.
/// Clarabel does not warm start, so `initvals` is ignored.
///
/// Unknown keys in `options` are rejected unless the options override
/// the policy.  A solve that terminates with any status other than
/// `Solved` returns a solution with `found = false`, empty vectors, and
/// the raw status in `extras["status"]`.
pub fn clarabel_solve_problem<T: FloatT>(
    problem: &Problem<T>,
    initvals: Option<&[T]>,
    verbose: bool,
    options: &SolverOptions,
) -> Result<Solution<T>, QpError> {
    problem.check()?;

    if initvals.is_some() && verbose {
        log::warn!("warm-start values are ignored by Clarabel");
    }

    let n = problem.n();
    let SparseMatrices { P, G, A } = ensure_sparse_matrices(problem);
    let (G, h, folding) = linear_from_box_inequalities(
        G,
        problem.h.clone(),
        problem.lb.as_ref(),
        problem.ub.as_ref(),
        n,
    )?;
    let stacked = StackedConstraints::stack(
        n,
        A.as_ref().zip(problem.b.as_deref()),
        G.as_ref().zip(h.as_deref()),
    )?;

    let settings = clarabel_settings(verbose, options)?;

    let P = P.to_triu();
    let cones: Vec<SupportedConeT<T>> = stacked.cones.iter().map(to_clarabel_cone).collect();

    let mut solver = DefaultSolver::new(&P, &problem.q, &stacked.A, &stacked.b, &cones, settings)
        .map_err(|e| SolverError::Setup {
            solver: "Clarabel",
            reason: e.to_string(),
        })?;
    solver.solve();

    Ok(translate_solution(problem, &solver.solution, &stacked, folding.as_ref()))
}

/// Solve a quadratic program using Clarabel, returning only the primal
/// solution if one was found.
pub fn clarabel_solve_qp<T: FloatT>(
    problem: &Problem<T>,
    initvals: Option<&[T]>,
    verbose: bool,
    options: &SolverOptions,
) -> Result<Option<Vec<T>>, QpError> {
    let solution = clarabel_solve_problem(problem, initvals, verbose, options)?;
    Ok(solution.found.then_some(solution.x))
}

fn clarabel_extras<T: FloatT>(result: &DefaultSolution<T>) -> Extras {
    let mut extras = Extras::new();
    extras.insert("status".into(), format!("{:?}", result.status).into());
    extras.insert("solve_time".into(), result.solve_time.into());
    extras.insert("iterations".into(), result.iterations.into());
    extras.insert("obj_val".into(), ExtraValue::from_float(result.obj_val));
    extras.insert("obj_val_dual".into(), ExtraValue::from_float(result.obj_val_dual));
    extras.insert("r_prim".into(), ExtraValue::from_float(result.r_prim));
    extras.insert("r_dual".into(), ExtraValue::from_float(result.r_dual));
    extras
}

fn translate_solution<T: FloatT>(
    problem: &Problem<T>,
    result: &DefaultSolution<T>,
    stacked: &StackedConstraints<T>,
    folding: Option<&BoxFolding>,
) -> Solution<T> {
    let mut solution = Solution::new();
    solution.extras = clarabel_extras(result);
    solution.found = result.status == SolverStatus::Solved;

    if !solution.found {
        log::info!("Clarabel terminated with status {:?}", result.status);
        return solution;
    }

    solution.x = result.x.clone();
    let (y, z) = stacked.split_duals(&result.z);
    solution.y = y;
    match folding {
        Some(folding) => {
            let (z, z_box) = folding.split_duals(&z);
            solution.z = z;
            solution.z_box = z_box;
        }
        None => {
            solution.z = z;
            // bounds given but infinite everywhere
            if problem.has_bounds() {
                solution.z_box = vec![T::zero(); problem.n()];
            }
        }
    }
    solution
}
