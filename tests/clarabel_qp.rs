#![allow(non_snake_case)]

use qpbridge::{algebra::*, solver::*};

fn basic_qp_problem() -> Problem<f64> {
    // P = [4. 1;1 2]
    let P = CscMatrix::new(
        2,                    // m
        2,                    // n
        vec![0, 2, 4],        // colptr
        vec![0, 1, 0, 1],     // rowval
        vec![4., 1., 1., 2.], // nzval
    );

    // x1 + x2 = 1, 0 <= x <= 0.7
    let A = DenseMatrix::from_rows(&[[1., 1.]]);

    Problem::new(P, vec![1., 1.])
        .with_equalities(A, vec![1.])
        .with_bounds(Some(vec![0., 0.]), Some(vec![0.7, 0.7]))
}

fn eq_constrained_A1() -> CscMatrix<f64> {
    // A =
    //[ 0. 1.  1.;
    //  0. 1. -1.]
    CscMatrix::new(
        2,                     // m
        3,                     // n
        vec![0, 0, 2, 4],      //colptr
        vec![0, 1, 0, 1],      //rowval
        vec![1., 1., 1., -1.], //nzva;
    )
}

fn solve(problem: &Problem<f64>) -> Solution<f64> {
    let _ = env_logger::builder().is_test(true).try_init();
    clarabel_solve_problem(problem, None, false, &SolverOptions::new()).unwrap()
}

#[test]
fn test_qp_feasible() {
    let problem = basic_qp_problem();
    let solution = solve(&problem);

    assert!(solution.found);
    assert_eq!(solution.extras["status"].as_str(), Some("Solved"));

    let refsol = vec![0.3, 0.7];
    assert!(solution.x.dist(&refsol) <= 1e-6);

    let refobj = 1.88;
    assert!(f64::abs(solution.obj(&problem) - refobj) <= 1e-6);
    let obj_val = solution.extras["obj_val"].as_f64().unwrap();
    assert!(f64::abs(obj_val - refobj) <= 1e-6);

    // x2 sits at its upper bound, x1 is interior
    assert!(solution.y.dist(&[-2.9]) <= 1e-5);
    assert!(solution.z.is_empty());
    assert!(solution.z_box.dist(&[0., 0.2]) <= 1e-5);
    assert!(solution.is_optimal(&problem, 1e-5));
}

#[test]
fn test_qp_lower_bound_dual_sign() {
    // min ½|x|² + x₀ - x₁  with  0 <= x₀,  x₁ <= 0.5
    let problem = Problem::new(DenseMatrix::identity(2), vec![1., -1.])
        .with_bounds(Some(vec![0., f64::NEG_INFINITY]), Some(vec![f64::INFINITY, 0.5]));
    let solution = solve(&problem);

    assert!(solution.found);
    assert!(solution.x.dist(&[0., 0.5]) <= 1e-6);
    // lower bound active: negative, upper bound active: positive
    assert!(solution.z_box.dist(&[-1., 0.5]) <= 1e-5);
    assert!(solution.is_optimal(&problem, 1e-5));
}

#[test]
fn test_qp_dense_inequalities() {
    let P = DenseMatrix::from_rows(&[[4., 1.], [1., 2.]]);
    let G = DenseMatrix::from_rows(&[[-1., -1.]]);
    let problem = Problem::new(P, vec![1., 1.]).with_inequalities(G, vec![-1.]);
    let solution = solve(&problem);

    assert!(solution.found);
    assert!(solution.x.dist(&[0.25, 0.75]) <= 1e-6);
    assert!(solution.z.dist(&[2.75]) <= 1e-5);
    assert!(solution.y.is_empty());
    assert!(solution.z_box.is_empty());
}

#[test]
fn test_qp_inequalities_and_bounds() {
    // the folded bound rows must not leak into z
    let P = DenseMatrix::from_rows(&[[4., 1.], [1., 2.]]);
    let G = DenseMatrix::from_rows(&[[-1., -1.]]);
    let problem = Problem::new(P, vec![1., 1.])
        .with_inequalities(G, vec![-1.])
        .with_bounds(None, Some(vec![0.7, 0.7]));
    let solution = solve(&problem);

    assert!(solution.found);
    assert!(solution.x.dist(&[0.3, 0.7]) <= 1e-6);
    assert_eq!(solution.z.len(), 1);
    assert_eq!(solution.z_box.len(), 2);
    assert!(solution.is_optimal(&problem, 1e-5));
}

#[test]
fn test_qp_primal_infeasible() {
    let mut problem = basic_qp_problem();
    problem.b = Some(vec![2.]);

    let solution = solve(&problem);

    assert!(!solution.found);
    assert_eq!(solution.extras["status"].as_str(), Some("PrimalInfeasible"));
    assert!(solution.x.is_empty());
    assert!(solution.y.is_empty());
    assert!(solution.z_box.is_empty());
    assert_eq!(solution.primal(), None);
}

#[test]
fn test_qp_crossed_bounds() {
    // 0.8 <= x₂ <= 0.7 passes the structural checks and is
    // reported by the solver as an infeasible problem
    let mut problem = basic_qp_problem();
    problem.lb = Some(vec![0., 0.8]);
    assert!(problem.check().is_ok());

    let solution = solve(&problem);

    assert!(!solution.found);
    assert!(solution.extras.contains_key("status"));
    assert!(solution.x.is_empty());
    assert!(solution.z_box.is_empty());
}

#[test]
fn test_eq_constrained_feasible() {
    let problem = Problem::new(CscMatrix::identity(3), vec![0., 0., 0.])
        .with_equalities(eq_constrained_A1(), vec![2., 0.]);
    let solution = solve(&problem);

    let refsol = [0., 1., 1.];
    assert!(solution.found);
    assert!(solution.x.dist(&refsol) <= 1e-6);
    assert!(solution.y.dist(&[-1., 0.]) <= 1e-5);
}

#[test]
fn test_unconstrained_feasible() {
    let mut c = [1., 2., -3.];
    let problem = Problem::new(CscMatrix::identity(3), c.to_vec());
    let solution = solve(&problem);

    let refsol = c.negate();
    assert!(solution.found);
    assert!(solution.x.dist(refsol) <= 1e-6);
    assert!(solution.y.is_empty());
    assert!(solution.z.is_empty());
}

#[test]
fn test_unconstrained_dual_infeasible() {
    let problem = Problem::new(CscMatrix::zeros((3, 3)), vec![1., 0., 0.]);
    let solution = solve(&problem);

    assert!(!solution.found);
    assert_eq!(solution.extras["status"].as_str(), Some("DualInfeasible"));
}

#[test]
fn test_qp_solve_qp() {
    let x = clarabel_solve_qp(&basic_qp_problem(), None, false, &SolverOptions::new())
        .unwrap()
        .unwrap();
    assert!(x.dist(&[0.3, 0.7]) <= 1e-6);

    // warm start is accepted and ignored
    let x0 = [0.5, 0.5];
    let x = clarabel_solve_qp(&basic_qp_problem(), Some(&x0), true, &SolverOptions::new())
        .unwrap()
        .unwrap();
    assert!(x.dist(&[0.3, 0.7]) <= 1e-6);
}

#[test]
fn test_qp_forwarded_options() {
    let options = SolverOptions::new().set("max_iter", 1);
    let solution = clarabel_solve_problem(&basic_qp_problem(), None, false, &options).unwrap();

    assert!(!solution.found);
    assert_eq!(solution.extras["status"].as_str(), Some("MaxIterations"));
    assert!(matches!(solution.extras["iterations"], ExtraValue::Int(_)));
}

#[test]
fn test_qp_unknown_option_rejected() {
    let options = SolverOptions::new().set("not_a_setting", 1.0);
    let err = clarabel_solve_problem(&basic_qp_problem(), None, false, &options).unwrap_err();
    assert!(matches!(
        err,
        QpError::Param(ParamError::UnknownOption { ref key, .. }) if key == "not_a_setting"
    ));

    // lenient handling on request
    let options = options.unknown_keys(UnknownOptionPolicy::Warn);
    let solution = clarabel_solve_problem(&basic_qp_problem(), None, false, &options).unwrap();
    assert!(solution.found);
}
