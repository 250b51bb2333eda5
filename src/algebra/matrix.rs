#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, DenseMatrix, FloatT, MatrixVectorMultiply};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Problem matrix in either dense or sparse storage.
///
/// The storage format is part of the problem description: solvers with
/// both dense and sparse backends pick their backend from it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub enum Matrix<T = f64> {
    /// column-major dense matrix
    Dense(DenseMatrix<T>),
    /// compressed sparse column matrix
    Sparse(CscMatrix<T>),
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn nrows(&self) -> usize {
        match self {
            Matrix::Dense(M) => M.nrows(),
            Matrix::Sparse(M) => M.m,
        }
    }

    pub fn ncols(&self) -> usize {
        match self {
            Matrix::Dense(M) => M.ncols(),
            Matrix::Sparse(M) => M.n,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn is_dense(&self) -> bool {
        matches!(self, Matrix::Dense(_))
    }

    /// Sparse copy of the matrix, whatever the input storage
    pub fn to_csc(&self) -> CscMatrix<T> {
        match self {
            Matrix::Dense(M) => M.to_csc(),
            Matrix::Sparse(M) => M.clone(),
        }
    }

    /// Dense copy of the matrix, whatever the input storage
    pub fn to_dense(&self) -> DenseMatrix<T> {
        match self {
            Matrix::Dense(M) => M.clone(),
            Matrix::Sparse(M) => DenseMatrix::from(M),
        }
    }
}

impl<T: FloatT> MatrixVectorMultiply for Matrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        match self {
            Matrix::Dense(M) => M.gemv(y, x, a, b),
            Matrix::Sparse(M) => M.gemv(y, x, a, b),
        }
    }

    fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        match self {
            Matrix::Dense(M) => M.gemv_t(y, x, a, b),
            Matrix::Sparse(M) => M.gemv_t(y, x, a, b),
        }
    }
}

impl<T> From<DenseMatrix<T>> for Matrix<T> {
    fn from(M: DenseMatrix<T>) -> Self {
        Matrix::Dense(M)
    }
}

impl<T> From<CscMatrix<T>> for Matrix<T> {
    fn from(M: CscMatrix<T>) -> Self {
        Matrix::Sparse(M)
    }
}
