#![allow(non_snake_case)]

use qpbridge::{algebra::*, solver::*};

// a collection of tests to ensure that data of
// incompatible dimension won't be accepted

fn dim_check_problem() -> Problem<f64> {
    let P = CscMatrix::<f64>::spalloc((4, 4), 0);
    let q = vec![0.; 4];
    let G = CscMatrix::<f64>::spalloc((6, 4), 0);
    let h = vec![0.; 6];
    let A = DenseMatrix::<f64>::zeros((1, 4));
    let b = vec![0.];
    Problem::new(P, q)
        .with_inequalities(G, h)
        .with_equalities(A, b)
        .with_bounds(Some(vec![-1.; 4]), Some(vec![1.; 4]))
}

fn assert_dimension_error(problem: &Problem<f64>, field: &str) {
    match problem.check() {
        Err(ProblemError::DimensionMismatch { field: f, .. }) => assert_eq!(f, field),
        other => panic!("expected a dimension error in {field}, got {other:?}"),
    }
    // adapters refuse the problem before solving
    let err = clarabel_solve_problem(problem, None, false, &SolverOptions::new()).unwrap_err();
    assert!(matches!(err, QpError::Problem(_)));
}

#[test]
fn dim_check_working() {
    assert!(dim_check_problem().check().is_ok());
}

#[test]
fn dim_check_bad_P() {
    let mut problem = dim_check_problem();
    problem.P = CscMatrix::<f64>::spalloc((3, 3), 0).into();
    assert_dimension_error(&problem, "P");
}

#[test]
fn dim_check_bad_G_rows() {
    let mut problem = dim_check_problem();
    problem.G = Some(CscMatrix::<f64>::spalloc((5, 4), 0).into());
    assert_dimension_error(&problem, "G");
}

#[test]
fn dim_check_bad_A_cols() {
    let mut problem = dim_check_problem();
    problem.A = Some(DenseMatrix::<f64>::zeros((1, 3)).into());
    assert_dimension_error(&problem, "A");
}

#[test]
fn dim_check_bad_bounds() {
    let mut problem = dim_check_problem();
    problem.ub = Some(vec![1.; 3]);
    assert_dimension_error(&problem, "ub");
}

#[test]
fn crossed_bounds_reach_the_solver() {
    // lb > ub is an infeasible problem, not malformed data
    let mut problem = dim_check_problem();
    problem.lb = Some(vec![-1., 2., -1., -1.]);
    assert!(problem.check().is_ok());
}

#[test]
fn bad_dense_length() {
    let mut problem = dim_check_problem();
    problem.A = Some(DenseMatrix { m: 1, n: 4, data: vec![0.; 3] }.into());
    assert_dimension_error(&problem, "A");

    let mut problem = dim_check_problem();
    problem.P = DenseMatrix { m: 4, n: 4, data: vec![1.] }.into();
    assert_dimension_error(&problem, "P");
}

#[test]
fn bad_sparse_format() {
    let mut problem = dim_check_problem();
    // rowval out of range
    problem.P = CscMatrix::new(4, 4, vec![0, 1, 1, 1, 1], vec![7], vec![1.]).into();
    assert!(matches!(
        problem.check(),
        Err(ProblemError::SparseFormat { field: "P", .. })
    ));
}

#[test]
fn unpaired_equalities() {
    let mut problem = dim_check_problem();
    problem.b = None;
    let err = problem.check().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Inconsistent equalities: A is set but b is not"
    );
}
