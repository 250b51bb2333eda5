#![allow(non_snake_case)]

use super::PiqpBackend;
use crate::algebra::*;
use crate::solver::core::Problem;

/// Problem matrices in the layout of the selected backend.
///
/// `P` is stored as its upper triangle for the sparse backend and in
/// full for the dense backend.
#[derive(Debug, Clone, PartialEq)]
pub enum PiqpMatrices<T> {
    Dense {
        P: DenseMatrix<T>,
        A: DenseMatrix<T>,
        G: DenseMatrix<T>,
    },
    Sparse {
        P: CscMatrix<T>,
        A: CscMatrix<T>,
        G: CscMatrix<T>,
    },
}

/// Problem data handed to the native PIQP library:
///
/// $$
/// \begin{array}{rl}
/// \text{minimize} & \frac{1}{2}x^T P x + c^T x\\\\\[2ex\]
///  \text{subject to} & A x = b \\\\\[1ex\]
///         & G x \leq h \\\\\[1ex\]
///         & x_{lb} \leq x \leq x_{ub}
///  \end{array}
/// $$
///
/// The native library does not accept empty constraint blocks, so a
/// missing equality or inequality block is replaced by a single zero
/// row with zero right hand side.  Duals of padded rows are meaningless
/// and are dropped when the result is translated.
#[derive(Debug, Clone, PartialEq)]
pub struct PiqpData<T> {
    /// number of variables
    pub n: usize,
    pub matrices: PiqpMatrices<T>,
    pub c: Vec<T>,
    pub b: Vec<T>,
    pub h: Vec<T>,
    pub x_lb: Option<Vec<T>>,
    pub x_ub: Option<Vec<T>>,
    /// `A`/`b` is a single padding row
    pub padded_eq: bool,
    /// `G`/`h` is a single padding row
    pub padded_ineq: bool,
}

fn padded_block<T: FloatT>(
    M: Option<&Matrix<T>>,
    v: Option<&Vec<T>>,
    n: usize,
) -> (Matrix<T>, Vec<T>, bool) {
    match M.zip(v) {
        Some((M, v)) if M.nrows() > 0 => (M.clone(), v.clone(), false),
        _ => (DenseMatrix::zeros((1, n)).into(), vec![T::zero()], true),
    }
}

impl<T> PiqpData<T>
where
    T: FloatT,
{
    /// Lay out a checked problem for the given backend
    pub fn new(problem: &Problem<T>, backend: PiqpBackend) -> Self {
        let n = problem.n();
        let (A, b, padded_eq) = padded_block(problem.A.as_ref(), problem.b.as_ref(), n);
        let (G, h, padded_ineq) = padded_block(problem.G.as_ref(), problem.h.as_ref(), n);

        if padded_eq || padded_ineq {
            log::debug!(
                "PIQP: padding {}{}",
                if padded_eq { "equalities " } else { "" },
                if padded_ineq { "inequalities" } else { "" }
            );
        }

        let matrices = match backend {
            PiqpBackend::Dense => PiqpMatrices::Dense {
                P: problem.P.to_dense(),
                A: A.to_dense(),
                G: G.to_dense(),
            },
            PiqpBackend::Sparse => PiqpMatrices::Sparse {
                P: problem.P.to_csc().to_triu(),
                A: A.to_csc(),
                G: G.to_csc(),
            },
        };

        Self {
            n,
            matrices,
            c: problem.q.clone(),
            b,
            h,
            x_lb: problem.lb.clone(),
            x_ub: problem.ub.clone(),
            padded_eq,
            padded_ineq,
        }
    }

    pub fn backend(&self) -> PiqpBackend {
        match self.matrices {
            PiqpMatrices::Dense { .. } => PiqpBackend::Dense,
            PiqpMatrices::Sparse { .. } => PiqpBackend::Sparse,
        }
    }

    /// number of equality rows, padding included
    pub fn p(&self) -> usize {
        self.b.len()
    }

    /// number of inequality rows, padding included
    pub fn m(&self) -> usize {
        self.h.len()
    }
}

#[test]
fn test_piqp_data_padding() {
    let P = DenseMatrix::identity(2);
    let G = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    let problem = Problem::new(P, vec![1., 1.]).with_inequalities(G, vec![1.]);

    let data = PiqpData::new(&problem, PiqpBackend::Sparse);
    assert!(data.padded_eq);
    assert!(!data.padded_ineq);
    assert_eq!((data.p(), data.m()), (1, 1));
    assert_eq!(data.b, vec![0.]);
    match data.matrices {
        PiqpMatrices::Sparse { ref P, ref A, ref G } => {
            assert!(P.is_triu());
            assert_eq!((A.m, A.n, A.nnz()), (1, 2, 0));
            assert_eq!(G.nnz(), 2);
        }
        _ => panic!("expected sparse matrices"),
    }

    let data = PiqpData::new(&problem, PiqpBackend::Dense);
    assert_eq!(data.backend(), PiqpBackend::Dense);
    match data.matrices {
        PiqpMatrices::Dense { ref G, .. } => assert_eq!(G[(0, 1)], 1.),
        _ => panic!("expected dense matrices"),
    }
}
