#![allow(non_snake_case)]

use super::Problem;
use crate::algebra::*;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Solver-specific diagnostic value attached to a [`Solution`].
///
/// Values are reported as returned by the solver and are never
/// interpreted by the adapters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ExtraValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ExtraValue {
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ExtraValue::Float(v) => Some(v),
            ExtraValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Float diagnostic from a solver float type
    pub fn from_float<T: FloatT>(v: T) -> Self {
        ExtraValue::Float(num_traits::ToPrimitive::to_f64(&v).unwrap_or(f64::NAN))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExtraValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! impl_extra_from {
    ($ty:ty, $variant:ident, $conv:ty) => {
        impl From<$ty> for ExtraValue {
            fn from(v: $ty) -> Self {
                ExtraValue::$variant(<$conv>::from(v))
            }
        }
    };
}
impl_extra_from!(bool, Bool, bool);
impl_extra_from!(i32, Int, i64);
impl_extra_from!(u32, Int, i64);
impl_extra_from!(i64, Int, i64);
impl_extra_from!(f32, Float, f64);
impl_extra_from!(f64, Float, f64);
impl_extra_from!(String, Text, String);
impl_extra_from!(&str, Text, String);

/// Opaque solver diagnostics, keyed by solver-specific field names.
pub type Extras = BTreeMap<String, ExtraValue>;

/// Solution returned by a QP adapter.
///
/// Dual multipliers follow the sign convention of the Lagrangian
///
/// $$
/// \mathcal{L}(x, z, y, z_{box}) = \frac{1}{2} x^T P x + q^T x
///     + z^T (G x - h) + y^T (A x - b) + z_{box}^T x
/// $$
///
/// with `z >= 0`.  The box dual `z_box` is the difference between the
/// upper and lower bound multipliers, so it is positive on variables at
/// their upper bound and negative on variables at their lower bound.
///
/// Vectors are empty when the corresponding block is absent from the
/// problem or when no solution was found.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Solution<T = f64> {
    /// primal solution
    pub x: Vec<T>,
    /// dual multipliers of the equality constraints
    pub y: Vec<T>,
    /// dual multipliers of the linear inequality constraints
    pub z: Vec<T>,
    /// dual multipliers of the box constraints
    pub z_box: Vec<T>,
    /// true if the solver reported success
    pub found: bool,
    /// solver-specific diagnostics
    pub extras: Extras,
}

impl<T> Solution<T>
where
    T: FloatT,
{
    /// Empty solution with `found = false`
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            z_box: Vec::new(),
            found: false,
            extras: Extras::new(),
        }
    }

    /// Primal solution, if one was found
    pub fn primal(&self) -> Option<&[T]> {
        self.found.then_some(self.x.as_slice())
    }

    /// Objective value `½x'Px + q'x` at the primal solution
    pub fn obj(&self, problem: &Problem<T>) -> T {
        let mut Px = vec![T::zero(); self.x.len()];
        problem.P.gemv(&mut Px, &self.x, T::one(), T::zero());
        let half: T = float_const(0.5);
        half * self.x.dot(&Px) + problem.q.dot(&self.x)
    }

    /// Maximum violation of the primal constraints at `x`:
    ///
    /// $$
    /// \max \{ \|Ax - b\|_\infty, [Gx - h]^+, [lb - x]^+, [x - ub]^+ \}
    /// $$
    ///
    /// Returns Inf if no primal solution is available.
    pub fn primal_residual(&self, problem: &Problem<T>) -> T {
        let n = problem.n();
        if self.x.len() != n {
            return T::infinity();
        }
        let x = &self.x;
        let mut res = T::zero();

        if let (Some(A), Some(b)) = (&problem.A, &problem.b) {
            let mut r = b.clone();
            A.gemv(&mut r, x, T::one(), -T::one());
            res = T::max(res, r.norm_inf());
        }
        if let (Some(G), Some(h)) = (&problem.G, &problem.h) {
            let mut r = h.clone();
            G.gemv(&mut r, x, T::one(), -T::one());
            res = T::max(res, r.maximum());
        }
        if let Some(lb) = &problem.lb {
            res = lb.iter().zip(x).fold(res, |acc, (&l, &x)| T::max(acc, l - x));
        }
        if let Some(ub) = &problem.ub {
            res = ub.iter().zip(x).fold(res, |acc, (&u, &x)| T::max(acc, x - u));
        }
        res
    }

    /// Stationarity residual of the Lagrangian at `(x, y, z, z_box)`:
    ///
    /// $$
    /// \| P x + q + G^T z + A^T y + z_{box} \|_\infty
    /// $$
    ///
    /// Returns Inf if the solution does not carry the duals of every
    /// constraint block in the problem.
    pub fn dual_residual(&self, problem: &Problem<T>) -> T {
        let n = problem.n();
        if self.x.len() != n {
            return T::infinity();
        }
        let mut r = problem.q.clone();
        problem.P.gemv(&mut r, &self.x, T::one(), T::one());

        if let Some(G) = &problem.G {
            if self.z.len() != G.nrows() {
                return T::infinity();
            }
            G.gemv_t(&mut r, &self.z, T::one(), T::one());
        }
        if let Some(A) = &problem.A {
            if self.y.len() != A.nrows() {
                return T::infinity();
            }
            A.gemv_t(&mut r, &self.y, T::one(), T::one());
        }
        if problem.has_bounds() {
            if self.z_box.len() != n {
                return T::infinity();
            }
            r.iter_mut().zip(&self.z_box).for_each(|(r, &zb)| *r += zb);
        }
        r.norm_inf()
    }

    /// Absolute duality gap:
    ///
    /// $$
    /// | x^T P x + q^T x + h^T z + b^T y + lb^T z_{box}^- + ub^T z_{box}^+ |
    /// $$
    ///
    /// where `z_box⁻ = min(z_box, 0)` and `z_box⁺ = max(z_box, 0)`.
    pub fn duality_gap(&self, problem: &Problem<T>) -> T {
        let n = problem.n();
        if self.x.len() != n {
            return T::infinity();
        }
        let mut Px = vec![T::zero(); n];
        problem.P.gemv(&mut Px, &self.x, T::one(), T::zero());
        let mut gap = self.x.dot(&Px) + problem.q.dot(&self.x);

        if let Some(h) = &problem.h {
            if self.z.len() != h.len() {
                return T::infinity();
            }
            gap += h.dot(&self.z);
        }
        if let Some(b) = &problem.b {
            if self.y.len() != b.len() {
                return T::infinity();
            }
            gap += b.dot(&self.y);
        }
        if problem.has_bounds() {
            if self.z_box.len() != n {
                return T::infinity();
            }
            for (i, &zb) in self.z_box.iter().enumerate() {
                let bound = if zb < T::zero() {
                    problem.lb.as_ref().map(|lb| lb[i])
                } else {
                    problem.ub.as_ref().map(|ub| ub[i])
                };
                if let Some(bound) = bound.filter(|v| v.is_finite()) {
                    gap += bound * zb;
                }
            }
        }
        T::abs(gap)
    }

    /// true if the solution was found and satisfies all optimality
    /// conditions up to the absolute tolerance `eps_abs`
    pub fn is_optimal(&self, problem: &Problem<T>, eps_abs: T) -> bool {
        self.found
            && self.primal_residual(problem) < eps_abs
            && self.dual_residual(problem) < eps_abs
            && self.duality_gap(problem) < eps_abs
    }
}

#[test]
fn test_solution_residuals() {
    // min ½|x|² - x₀  s.t.  x₀ <= 0.5,  x₁ = 0
    let problem = Problem::new(DenseMatrix::identity(2), vec![-1., 0.])
        .with_inequalities(DenseMatrix::from_rows(&[[1., 0.]]), vec![0.5])
        .with_equalities(DenseMatrix::from_rows(&[[0., 1.]]), vec![0.]);

    // x = (0.5, 0), z = 0.5, y = 0
    let solution = Solution {
        x: vec![0.5, 0.],
        y: vec![0.],
        z: vec![0.5],
        z_box: vec![],
        found: true,
        extras: Extras::new(),
    };
    assert!(solution.primal_residual(&problem) <= 1e-12);
    assert!(solution.dual_residual(&problem) <= 1e-12);
    assert!(solution.duality_gap(&problem) <= 1e-12);
    assert!(solution.is_optimal(&problem, 1e-8));
    assert!(f64::abs(solution.obj(&problem) + 0.375) <= 1e-12);

    // missing duals are reported as an infinite residual
    let partial = Solution {
        z: vec![],
        ..solution.clone()
    };
    assert_eq!(partial.dual_residual(&problem), f64::INFINITY);
    assert!(!partial.is_optimal(&problem, 1e-8));
    assert_eq!(Solution::<f64>::new().primal(), None);
}

#[test]
fn test_solution_box_gap() {
    // min ½x² - 2x  s.t.  x <= 1, via the box bound only
    let problem = Problem::new(DenseMatrix::identity(1), vec![-2.])
        .with_bounds(None, Some(vec![1.]));
    let solution = Solution {
        x: vec![1.],
        z_box: vec![1.],
        found: true,
        ..Solution::new()
    };
    assert!(solution.dual_residual(&problem) <= 1e-12);
    assert!(solution.duality_gap(&problem) <= 1e-12);
}

#[test]
fn test_solution_obj_generic_float() {
    let problem = Problem::<f32>::new(DenseMatrix::identity(2), vec![1., -1.]);
    let solution = Solution {
        x: vec![2., 1.],
        found: true,
        ..Solution::new()
    };
    // ½(4 + 1) + 2 - 1
    assert_eq!(solution.obj(&problem), 3.5);
}
