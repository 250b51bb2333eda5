#![allow(non_snake_case)]

use super::super::matrix_traits::scale_output;
use crate::algebra::{CscMatrix, FloatT, MatrixVectorMultiply, VectorMath};
use std::ops::{Index, IndexMut};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Dense matrix in column-major format
///
/// __Example usage__ : To construct the 2 x 2 matrix
/// ```text
/// P = [4.  1.]
///     [1.  2.]
/// ```
///
/// ```no_run
/// use qpbridge::algebra::DenseMatrix;
///
/// let P = DenseMatrix::from_rows(&[[4., 1.], [1., 2.]]);
/// assert_eq!(P[(0, 1)], 1.);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct DenseMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> DenseMatrix<T>
where
    T: FloatT,
{
    /// `DenseMatrix` constructor from column-major data
    ///
    /// # Panics
    /// Panics if `data` does not have `m*n` elements.
    pub fn new(size: (usize, usize), data: Vec<T>) -> Self {
        let (m, n) = size;
        assert_eq!(m * n, data.len());
        Self { m, n, data }
    }

    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        let mut mat = DenseMatrix::zeros((n, n));
        for i in 0..n {
            mat[(i, i)] = T::one();
        }
        mat
    }

    /// Construct from a row-major array of rows
    pub fn from_rows<const N: usize>(rows: &[[T; N]]) -> Self {
        let m = rows.len();
        let mut mat = DenseMatrix::zeros((m, N));
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                mat[(r, c)] = v;
            }
        }
        mat
    }

    pub fn nrows(&self) -> usize {
        self.m
    }

    pub fn ncols(&self) -> usize {
        self.n
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// Sparse copy, dropping exact zeros
    pub fn to_csc(&self) -> CscMatrix<T> {
        let mut colptr = vec![0usize; self.n + 1];
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        for c in 0..self.n {
            for (r, &v) in self.col_slice(c).iter().enumerate() {
                if v != T::zero() {
                    rowval.push(r);
                    nzval.push(v);
                }
            }
            colptr[c + 1] = rowval.len();
        }
        CscMatrix::new(self.m, self.n, colptr, rowval, nzval)
    }
}

impl<T> From<&CscMatrix<T>> for DenseMatrix<T>
where
    T: FloatT,
{
    fn from(A: &CscMatrix<T>) -> Self {
        let mut D = DenseMatrix::zeros((A.m, A.n));
        for col in 0..A.n {
            for ptr in A.colptr[col]..A.colptr[col + 1] {
                D[(A.rowval[ptr], col)] += A.nzval[ptr];
            }
        }
        D
    }
}

impl<T: FloatT> MatrixVectorMultiply for DenseMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);
        scale_output(y, b);
        for (c, &xc) in x.iter().enumerate() {
            for (yr, &v) in y.iter_mut().zip(self.col_slice(c)) {
                *yr += a * v * xc;
            }
        }
    }

    fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.m);
        assert_eq!(y.len(), self.n);
        scale_output(y, b);
        for (c, yc) in y.iter_mut().enumerate() {
            *yc += a * self.col_slice(c).dot(x);
        }
    }
}

impl<T> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[idx.0 + self.m * idx.1]
    }
}

impl<T> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        &mut self.data[idx.0 + self.m * idx.1]
    }
}

#[test]
fn test_dense_to_csc() {
    let A = DenseMatrix::from_rows(&[[1., 0., 5.], [2., 0., 6.], [0., 4., 7.]]);
    let S = A.to_csc();
    assert!(S.check_format().is_ok());
    assert_eq!(S.colptr, vec![0, 2, 3, 6]);
    assert_eq!(S.rowval, vec![0, 1, 2, 0, 1, 2]);
    assert_eq!(DenseMatrix::from(&S), A);
}

#[test]
fn test_dense_gemv() {
    let A = DenseMatrix::from_rows(&[[1., 3.], [2., 0.], [0., 4.]]);
    let mut y = vec![1., 1., 1.];
    A.gemv(&mut y, &[1., -1.], 2., 1.);
    assert_eq!(y, vec![-3., 5., -7.]);

    let mut z = vec![0., 0.];
    A.gemv_t(&mut z, &[1., 1., 1.], 1., 0.);
    assert_eq!(z, vec![3., 7.]);

}
