#![allow(non_snake_case)]

use crate::algebra::*;
use crate::solver::{ExtraValue, Problem, Solution};

use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// Types that can be saved to and restored from a JSON file
pub trait JsonReadWrite: Sized {
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error>;
    fn read_from_file(file: &mut File) -> Result<Self, io::Error>;
}

impl<T> JsonReadWrite for Problem<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        // sanitize bounds to remove values that
        // can't be serialized, i.e. infs
        let mut problem = self.clone();
        for bound in [&mut problem.lb, &mut problem.ub].into_iter().flatten() {
            sanitize_bounds(bound);
        }

        let json = serde_json::to_string(&problem)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let mut problem: Problem<T> = serde_json::from_str(&buffer)?;

        // restore sanitized bounds to their (likely) original values
        for bound in [&mut problem.lb, &mut problem.ub].into_iter().flatten() {
            desanitize_bounds(bound);
        }

        problem
            .check()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(problem)
    }
}

impl<T> JsonReadWrite for Solution<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let mut solution = self.clone();
        for value in solution.extras.values_mut() {
            if let ExtraValue::Float(v) = *value {
                if !v.is_finite() {
                    *value = ExtraValue::Text(v.to_string());
                }
            }
        }

        let json = serde_json::to_string(&solution)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let solution = serde_json::from_str(&buffer)?;
        Ok(solution)
    }
}

fn sanitize_bounds<T: FloatT>(v: &mut [T]) {
    for x in v.iter_mut() {
        if *x == T::infinity() {
            *x = T::max_value();
        } else if *x == T::neg_infinity() {
            *x = T::min_value();
        }
    }
}

fn desanitize_bounds<T: FloatT>(v: &mut [T]) {
    for x in v.iter_mut() {
        if *x == T::max_value() {
            *x = T::infinity();
        } else if *x == T::min_value() {
            *x = T::neg_infinity();
        }
    }
}

/// Write a problem to a JSON file
pub fn write_problem_json<T>(problem: &Problem<T>, file: &mut File) -> Result<(), io::Error>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    problem.write_to_file(file)
}

/// Read a problem from a JSON file.  The problem is checked for
/// consistency before it is returned.
pub fn read_problem_json<T>(file: &mut File) -> Result<Problem<T>, io::Error>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    Problem::read_from_file(file)
}

/// Write a solution, including its extras, to a JSON file
pub fn write_solution_json<T>(solution: &Solution<T>, file: &mut File) -> Result<(), io::Error>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    solution.write_to_file(file)
}

#[test]
fn test_json_io() {
    use std::io::{Seek, SeekFrom};

    let P = DenseMatrix::from_rows(&[[4., 1.], [1., 2.]]);
    let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    let problem = Problem::new(P, vec![1., 1.])
        .with_equalities(A, vec![1.])
        .with_bounds(Some(vec![0., f64::NEG_INFINITY]), Some(vec![f64::INFINITY, 0.7]));

    // write the problem to a file
    let mut file = tempfile::tempfile().unwrap();
    write_problem_json(&problem, &mut file).unwrap();

    // read the problem from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let problem2: Problem<f64> = read_problem_json(&mut file).unwrap();
    assert_eq!(problem, problem2);
}

#[test]
fn test_json_solution() {
    use std::io::{Seek, SeekFrom};

    let mut solution = Solution::<f64>::new();
    solution.x = vec![0.3, 0.7];
    solution.found = true;
    solution.extras.insert("status".into(), "Solved".into());
    solution.extras.insert("r_dual".into(), f64::INFINITY.into());

    let mut file = tempfile::tempfile().unwrap();
    write_solution_json(&solution, &mut file).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let solution2 = Solution::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(solution2.x, solution.x);
    assert!(solution2.found);
    assert_eq!(solution2.extras["status"].as_str(), Some("Solved"));
    assert_eq!(solution2.extras["r_dual"].as_str(), Some("inf"));
}
