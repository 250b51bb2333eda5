#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use qpbridge::io::*;
    use qpbridge::{algebra::*, solver::*};
    use std::io::{Seek, SeekFrom};

    let P = CscMatrix {
        m: 1,
        n: 1,
        colptr: vec![0, 1],
        rowval: vec![0],
        nzval: vec![2.0],
    };
    let G = CscMatrix {
        m: 1,
        n: 1,
        colptr: vec![0, 1],
        rowval: vec![0],
        nzval: vec![-1.0],
    };
    let problem = Problem::new(P, vec![1.0])
        .with_inequalities(G, vec![-2.0])
        .with_bounds(None, Some(vec![f64::INFINITY]));

    let solution = clarabel_solve_problem(&problem, None, false, &SolverOptions::new()).unwrap();

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    write_problem_json(&problem, &mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2: Problem<f64> = read_problem_json(&mut file).unwrap();
    assert_eq!(problem2.ub, Some(vec![f64::INFINITY]));

    let solution2 =
        clarabel_solve_problem(&problem2, None, false, &SolverOptions::new()).unwrap();
    assert_eq!(solution.x, solution2.x);

    // solutions are saved with their extras
    let mut file = tempfile::tempfile().unwrap();
    write_solution_json(&solution2, &mut file).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let solution3 = Solution::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(solution3.x, solution2.x);
    assert_eq!(solution3.extras["status"], solution2.extras["status"]);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_rejects_inconsistent_problem() {
    use qpbridge::io::*;
    use qpbridge::{algebra::*, solver::*};
    use std::io::{Seek, SeekFrom, Write};

    let mut problem = Problem::new(DenseMatrix::<f64>::identity(2), vec![0., 0.]);
    problem.h = Some(vec![1.]);
    let json = serde_json::to_string(&problem).unwrap();

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = read_problem_json::<f64>(&mut file).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_rejects_short_dense_data() {
    use qpbridge::io::*;
    use qpbridge::solver::*;
    use std::io::{Seek, SeekFrom, Write};

    // a 2x2 cost matrix carrying a single value
    let json = r#"{"P":{"Dense":{"m":2,"n":2,"data":[1.0]}},"q":[1.0,1.0],
                   "G":null,"h":null,"A":null,"b":null,"lb":null,"ub":null}"#;

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = read_problem_json::<f64>(&mut file).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("P"));

    // the same data built in memory is refused before any solve
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem: Problem<f64> = serde_json::from_reader(&mut file).unwrap();
    let err = clarabel_solve_problem(&problem, None, false, &SolverOptions::new()).unwrap_err();
    assert!(matches!(err, QpError::Problem(ProblemError::DimensionMismatch { field: "P", .. })));
}
