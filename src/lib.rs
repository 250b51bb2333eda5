//!  __qpbridge__ is a common front end to quadratic programming solvers.
//!  It solves problems of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & \frac{1}{2}x^T P x + q^T x\\\\\[2ex\]
//!  \text{subject to} & G x \leq h \\\\\[1ex\]
//!         & A x = b \\\\\[1ex\]
//!         & lb \leq x \leq ub
//!  \end{array}
//! $$
//!
//! with decision variables
//! $x \in \mathbb{R}^n$,
//! symmetric positive semidefinite $P$,
//! and data matrices given either dense or in compressed sparse column
//! format.  All constraint blocks are optional.
//!
//! Each supported solver is wrapped by an adapter that reshapes the
//! problem into the form the solver expects and maps the solver's output,
//! including dual multipliers, back onto the original constraint blocks:
//!
//! * __Clarabel__: an interior point conic solver, linked directly.
//!   Equality and inequality constraints are stacked into a single conic
//!   system and box bounds are folded into the inequalities.
//!
//! * __PIQP__: a proximal interior point QP solver with dense and sparse
//!   backends and native box bounds.  Available through the
//!   [`PiqpLibrary`](crate::solver::PiqpLibrary) trait, with a binding to
//!   the native C library behind the `piqp` feature.
//!
//! __Example usage__ :
//!
//! ```no_run
//! use qpbridge::algebra::*;
//! use qpbridge::solver::*;
//!
//! let P = DenseMatrix::from_rows(&[[4., 1.], [1., 2.]]);
//! let A = DenseMatrix::from_rows(&[[1., 1.]]);
//! let problem = Problem::new(P, vec![1., 1.])
//!     .with_equalities(A, vec![1.])
//!     .with_bounds(Some(vec![0., 0.]), Some(vec![0.7, 0.7]));
//!
//! let params = SolveParamsBuilder::default().build().unwrap();
//! let solution = solve_problem(&problem, Solver::Clarabel, &params).unwrap();
//! assert!(solution.found);
//! ```

pub mod algebra;
pub mod solver;

#[cfg(feature = "serde")]
pub mod io;
