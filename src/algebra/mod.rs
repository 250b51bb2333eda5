//! Algebra types used to describe problem data.
//!
//! Sparse matrices are the [`CscMatrix`] type of the `clarabel` crate,
//! re-exported here together with its public matrix and vector traits,
//! so sparse problem data reaches Clarabel without copying.  Problem
//! matrices are given as [`Matrix`] values, each holding either a
//! column-major [`DenseMatrix`] or a [`CscMatrix`].  The adapters in
//! [`solver`](crate::solver) coerce them into whichever storage format
//! the wrapped solver expects.

mod dense;
mod floats;
mod matrix;
mod matrix_traits;
mod sparse;

pub use clarabel::algebra::{
    BlockConcatenate, CscMatrix, MatrixConcatenationError, SparseFormatError,
    TriangularMatrixChecks, VectorMath,
};
pub use dense::*;
pub use floats::*;
pub use matrix::*;
pub use matrix_traits::*;
pub use sparse::*;
