#![allow(non_snake_case)]

//! Helpers on [`CscMatrix`] that the `clarabel` crate keeps private or
//! does not provide.

use super::matrix_traits::scale_output;
use crate::algebra::{
    BlockConcatenate, CscMatrix, FloatT, MatrixConcatenationError, MatrixVectorMultiply,
};
use std::iter::zip;

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);
        scale_output(y, b);
        for (col, &xc) in x.iter().enumerate() {
            let rng = self.colptr[col]..self.colptr[col + 1];
            for (&row, &v) in zip(&self.rowval[rng.clone()], &self.nzval[rng]) {
                y[row] += a * v * xc;
            }
        }
    }

    fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.m);
        assert_eq!(y.len(), self.n);
        scale_output(y, b);
        for (col, yc) in y.iter_mut().enumerate() {
            let rng = self.colptr[col]..self.colptr[col + 1];
            let s = zip(&self.rowval[rng.clone()], &self.nzval[rng])
                .fold(T::zero(), |acc, (&row, &v)| acc + v * x[row]);
            *yc += a * s;
        }
    }
}

/// Matrix of size `cols.len()` x `n` whose row k holds the single
/// entry `val` at column `cols[k]`.
///
/// Used to express elementwise bounds `±x_i` as constraint rows.
///
/// # Panics
/// Panics if any column index is out of range.
pub fn csc_selector<T: FloatT>(n: usize, cols: &[usize], val: T) -> CscMatrix<T> {
    let mut colptr = vec![0usize; n + 1];
    for &c in cols {
        assert!(c < n);
        colptr[c + 1] += 1;
    }
    for j in 0..n {
        colptr[j + 1] += colptr[j];
    }

    // rows are visited in order, so they stay sorted within each column
    let mut next = colptr.clone();
    let mut rowval = vec![0usize; cols.len()];
    for (row, &c) in cols.iter().enumerate() {
        rowval[next[c]] = row;
        next[c] += 1;
    }
    let nzval = vec![val; cols.len()];
    CscMatrix::new(cols.len(), n, colptr, rowval, nzval)
}

/// Vertical concatenation of any number of blocks, `[A₁; A₂; ...]`.
///
/// Errors if the list is empty or the blocks disagree on column count.
pub fn csc_vstack<T: FloatT>(mats: &[&CscMatrix<T>]) -> Result<CscMatrix<T>, MatrixConcatenationError> {
    let (first, rest) = mats
        .split_first()
        .ok_or(MatrixConcatenationError::IncompatibleDimension)?;
    rest.iter()
        .try_fold((*first).clone(), |acc, M| CscMatrix::vcat(&acc, M))
}

#[test]
fn test_csc_selector() {
    // rows [e_2; e_0; e_2]
    let S = csc_selector::<f64>(3, &[2, 0, 2], -1.);
    assert!(S.check_format().is_ok());
    assert_eq!((S.m, S.n), (3, 3));
    assert_eq!(S.colptr, vec![0, 1, 1, 3]);
    assert_eq!(S.get_entry((0, 2)), Some(-1.));
    assert_eq!(S.get_entry((1, 0)), Some(-1.));
    assert_eq!(S.get_entry((2, 2)), Some(-1.));
    assert_eq!(S.get_entry((1, 1)), None);
}

#[test]
fn test_csc_vstack() {
    let A = CscMatrix::from(&[[1., 0.], [0., 2.]]);
    let B = csc_selector(2, &[1], 3.);
    let E = CscMatrix::<f64>::zeros((0, 2));

    let C = csc_vstack(&[&A, &E, &B]).unwrap();
    assert!(C.check_format().is_ok());
    assert_eq!((C.m, C.n), (3, 2));
    assert_eq!(C.get_entry((2, 1)), Some(3.));

    let D = CscMatrix::<f64>::identity(3);
    assert!(csc_vstack(&[&A, &D]).is_err());
    assert!(csc_vstack::<f64>(&[]).is_err());
}

#[test]
fn test_csc_gemv() {
    // A = [1 0 5; 2 0 6]
    let A = CscMatrix::from(&[[1., 0., 5.], [2., 0., 6.]]);
    let mut y = vec![1., 1.];
    A.gemv(&mut y, &[1., 7., -1.], 2., 1.);
    assert_eq!(y, vec![-7., -7.]);

    let mut z = vec![9., 9., 9.];
    A.gemv_t(&mut z, &[1., 1.], 1., 0.);
    assert_eq!(z, vec![3., 0., 11.]);
}
