#![allow(non_snake_case)]

use qpbridge::{algebra::*, solver::*};

fn basic_qp_problem() -> Problem<f64> {
    let P = DenseMatrix::from_rows(&[[4., 1.], [1., 2.]]);
    let A = DenseMatrix::from_rows(&[[1., 1.]]);
    Problem::new(P, vec![1., 1.])
        .with_equalities(A, vec![1.])
        .with_bounds(Some(vec![0., 0.]), Some(vec![0.7, 0.7]))
}

#[test]
fn test_dispatch_clarabel() {
    let params = SolveParamsBuilder::default()
        .options(SolverOptions::new().set("tol_gap_abs", 1e-9))
        .build()
        .unwrap();

    let solver: Solver = "clarabel".parse().unwrap();
    let solution = solve_problem(&basic_qp_problem(), solver, &params).unwrap();
    assert!(solution.found);
    assert!(solution.x.dist(&[0.3, 0.7]) <= 1e-6);

    let x = solve_qp(&basic_qp_problem(), solver, &params).unwrap();
    assert!(x.is_some());
}

#[test]
fn test_dispatch_bad_initvals() {
    let params = SolveParamsBuilder::default()
        .initvals(vec![0.; 3])
        .build()
        .unwrap();
    let err = solve_problem(&basic_qp_problem(), Solver::Clarabel, &params).unwrap_err();
    assert_eq!(
        err,
        QpError::Param(ParamError::BadInitvals {
            expected: 2,
            found: 3
        })
    );
}

#[test]
fn test_dispatch_clarabel_has_no_backend() {
    let params = SolveParamsBuilder::default()
        .backend("dense")
        .build()
        .unwrap();
    let err = solve_problem(&basic_qp_problem(), Solver::Clarabel, &params).unwrap_err();
    assert!(err.to_string().contains("dense"));
}

#[cfg(not(feature = "piqp"))]
#[test]
fn test_dispatch_piqp_unavailable() {
    let params = SolveParams::default();
    let err = solve_problem(&basic_qp_problem(), Solver::Piqp, &params).unwrap_err();
    assert!(matches!(err, QpError::Solver(SolverError::NotAvailable("PIQP"))));
    assert_eq!(available_solvers(), vec![Solver::Clarabel]);
}

#[test]
fn test_dispatch_piqp_bad_backend() {
    let params = SolveParamsBuilder::default()
        .backend("unsupported_value")
        .build()
        .unwrap();
    let err = solve_problem(&basic_qp_problem(), Solver::Piqp, &params).unwrap_err();
    match err {
        QpError::Param(ParamError::UnknownBackend { solver, ref value }) => {
            assert_eq!(solver, "PIQP");
            assert_eq!(value, "unsupported_value");
        }
        other => panic!("expected a backend error, got {other:?}"),
    }
    assert!(err.to_string().contains("unsupported_value"));
}

#[cfg(feature = "piqp")]
#[test]
fn test_dispatch_piqp_native() {
    let problem = basic_qp_problem();

    for backend in ["dense", "sparse"] {
        let params = SolveParamsBuilder::default()
            .backend(backend)
            .build()
            .unwrap();
        let solution = solve_problem(&problem, Solver::Piqp, &params).unwrap();
        assert!(solution.found);
        assert!(solution.x.dist(&[0.3, 0.7]) <= 1e-6);
        assert!(solution.z_box.dist(&[0., 0.2]) <= 1e-5);
    }

    let params = SolveParamsBuilder::default()
        .backend("unsupported_value")
        .build()
        .unwrap();
    let err = solve_problem(&problem, Solver::Piqp, &params).unwrap_err();
    assert!(err.to_string().contains("unsupported_value"));
}
