#![allow(non_snake_case)]

use super::ProblemError;
use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Quadratic program in standard form:
///
/// $$
/// \begin{array}{rl}
/// \text{minimize} & \frac{1}{2}x^T P x + q^T x\\\\\[2ex\]
///  \text{subject to} & G x \leq h \\\\\[1ex\]
///         & A x = b \\\\\[1ex\]
///         & lb \leq x \leq ub
///  \end{array}
/// $$
///
/// `P` is symmetric and stored in full (both triangles), either dense or
/// sparse.  The constraint blocks are optional, but `G`/`h` and `A`/`b`
/// must be given in pairs.  Infinite entries in `lb` or `ub` mean the
/// variable is unbounded on that side.  Bounds with `lb[i] > ub[i]` are
/// not a structural error: the solver reports the problem infeasible.
///
/// The fields are public so that a problem can be assembled piece by
/// piece; call [`check_constraints`](Problem::check_constraints) (done
/// by every adapter) before relying on the pairing invariant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Problem<T = f64> {
    /// symmetric cost matrix
    pub P: Matrix<T>,
    /// cost vector
    pub q: Vec<T>,
    /// linear inequality matrix
    pub G: Option<Matrix<T>>,
    /// linear inequality vector
    pub h: Option<Vec<T>>,
    /// linear equality matrix
    pub A: Option<Matrix<T>>,
    /// linear equality vector
    pub b: Option<Vec<T>>,
    /// lower bounds on x
    pub lb: Option<Vec<T>>,
    /// upper bounds on x
    pub ub: Option<Vec<T>>,
}

impl<T> Problem<T>
where
    T: FloatT,
{
    /// Unconstrained problem with cost `½x'Px + q'x`
    pub fn new(P: impl Into<Matrix<T>>, q: Vec<T>) -> Self {
        Self {
            P: P.into(),
            q,
            G: None,
            h: None,
            A: None,
            b: None,
            lb: None,
            ub: None,
        }
    }

    /// Add the inequality block `Gx <= h`
    pub fn with_inequalities(mut self, G: impl Into<Matrix<T>>, h: Vec<T>) -> Self {
        self.G = Some(G.into());
        self.h = Some(h);
        self
    }

    /// Add the equality block `Ax = b`
    pub fn with_equalities(mut self, A: impl Into<Matrix<T>>, b: Vec<T>) -> Self {
        self.A = Some(A.into());
        self.b = Some(b);
        self
    }

    /// Add box bounds `lb <= x <= ub`.  Either side may be omitted.
    pub fn with_bounds(mut self, lb: Option<Vec<T>>, ub: Option<Vec<T>>) -> Self {
        self.lb = lb;
        self.ub = ub;
        self
    }

    /// number of decision variables
    pub fn n(&self) -> usize {
        self.q.len()
    }

    /// number of linear inequality rows (excluding box bounds)
    pub fn m_ineq(&self) -> usize {
        self.h.as_ref().map_or(0, |h| h.len())
    }

    /// number of linear equality rows
    pub fn m_eq(&self) -> usize {
        self.b.as_ref().map_or(0, |b| b.len())
    }

    /// true if any of P, G, A is stored sparse
    pub fn has_sparse(&self) -> bool {
        !self.P.is_dense()
            || self.G.as_ref().is_some_and(|G| !G.is_dense())
            || self.A.as_ref().is_some_and(|A| !A.is_dense())
    }

    /// true if either box bound is given
    pub fn has_bounds(&self) -> bool {
        self.lb.is_some() || self.ub.is_some()
    }

    /// Check that constraint blocks are given in complete pairs.
    pub fn check_constraints(&self) -> Result<(), ProblemError> {
        check_pair("inequalities", ("G", self.G.is_some()), ("h", self.h.is_some()))?;
        check_pair("equalities", ("A", self.A.is_some()), ("b", self.b.is_some()))?;
        Ok(())
    }

    /// Check that all problem data have compatible dimensions and that
    /// dense and sparse matrix data are well formed.
    pub fn check_dimensions(&self) -> Result<(), ProblemError> {
        let n = self.n();

        check_matrix("P", &self.P, (n, n))?;

        if let (Some(G), Some(h)) = (&self.G, &self.h) {
            check_matrix("G", G, (h.len(), n))?;
        }
        if let (Some(A), Some(b)) = (&self.A, &self.b) {
            check_matrix("A", A, (b.len(), n))?;
        }
        if let Some(lb) = &self.lb {
            check_length("lb", lb.len(), n)?;
        }
        if let Some(ub) = &self.ub {
            check_length("ub", ub.len(), n)?;
        }
        Ok(())
    }

    /// Run all structural checks
    pub fn check(&self) -> Result<(), ProblemError> {
        self.check_constraints()?;
        self.check_dimensions()
    }
}

fn check_pair(
    kind: &'static str,
    mat: (&'static str, bool),
    vec: (&'static str, bool),
) -> Result<(), ProblemError> {
    match (mat.1, vec.1) {
        (true, false) => Err(ProblemError::UnpairedConstraint {
            kind,
            present: mat.0,
            missing: vec.0,
        }),
        (false, true) => Err(ProblemError::UnpairedConstraint {
            kind,
            present: vec.0,
            missing: mat.0,
        }),
        _ => Ok(()),
    }
}

fn check_matrix<T: FloatT>(
    field: &'static str,
    M: &Matrix<T>,
    size: (usize, usize),
) -> Result<(), ProblemError> {
    match M {
        Matrix::Sparse(S) => S
            .check_format()
            .map_err(|source| ProblemError::SparseFormat { field, source })?,
        Matrix::Dense(D) if D.m.checked_mul(D.n) != Some(D.data.len()) => {
            return Err(ProblemError::DimensionMismatch {
                field,
                expected: format!("{} values for {}x{}", D.m.saturating_mul(D.n), D.m, D.n),
                found: format!("{} values", D.data.len()),
            });
        }
        Matrix::Dense(_) => {}
    }
    if M.size() != size {
        return Err(ProblemError::DimensionMismatch {
            field,
            expected: format!("{}x{}", size.0, size.1),
            found: format!("{}x{}", M.nrows(), M.ncols()),
        });
    }
    Ok(())
}

fn check_length(field: &'static str, found: usize, expected: usize) -> Result<(), ProblemError> {
    if found != expected {
        return Err(ProblemError::DimensionMismatch {
            field,
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

#[test]
fn test_problem_checks() {
    let P = DenseMatrix::identity(2);
    let G = DenseMatrix::from_rows(&[[1., 1.]]);

    let prob = Problem::new(P.clone(), vec![1., 1.]).with_inequalities(G.clone(), vec![1.]);
    assert!(prob.check().is_ok());
    assert_eq!(prob.m_ineq(), 1);
    assert!(!prob.has_sparse());

    let mut bad = prob.clone();
    bad.h = None;
    assert!(matches!(
        bad.check_constraints(),
        Err(ProblemError::UnpairedConstraint { present: "G", .. })
    ));

    let mut bad = prob.clone();
    bad.A = None;
    bad.b = Some(vec![0.]);
    assert!(matches!(
        bad.check_constraints(),
        Err(ProblemError::UnpairedConstraint { present: "b", .. })
    ));

    // crossed bounds are left for the solver to detect
    let crossed = prob.clone().with_bounds(Some(vec![0., 1.]), Some(vec![1., 0.]));
    assert!(crossed.check().is_ok());

    let mut bad = prob.clone();
    bad.P = DenseMatrix { m: 2, n: 2, data: vec![1.] }.into();
    assert!(matches!(
        bad.check_dimensions(),
        Err(ProblemError::DimensionMismatch { field: "P", .. })
    ));

    let bad = Problem::new(P, vec![1., 1., 1.]);
    assert!(matches!(
        bad.check_dimensions(),
        Err(ProblemError::DimensionMismatch { field: "P", .. })
    ));
}
