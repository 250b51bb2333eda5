#![allow(non_snake_case)]

//! Problem normalization shared by the solver adapters.
//!
//! The functions here never touch a solver.  They produce the matrix
//! layouts that solvers expect and record enough about that layout to
//! map dual vectors back onto the original constraint blocks.

use super::{ConeTag, Problem, ProblemError};
use crate::algebra::*;

/// Problem matrices coerced to CSC format
#[derive(Debug, Clone)]
pub struct SparseMatrices<T> {
    pub P: CscMatrix<T>,
    pub G: Option<CscMatrix<T>>,
    pub A: Option<CscMatrix<T>>,
}

/// Coerce `P`, `G` and `A` to CSC format regardless of input density
pub fn ensure_sparse_matrices<T: FloatT>(problem: &Problem<T>) -> SparseMatrices<T> {
    SparseMatrices {
        P: problem.P.to_csc(),
        G: problem.G.as_ref().map(Matrix::to_csc),
        A: problem.A.as_ref().map(Matrix::to_csc),
    }
}

/// Row layout of box bounds folded into linear inequalities.
///
/// Folded rows are appended after the `m_linear` rows of the original
/// inequality block: one row `-x_i <= -lb_i` for every finite lower
/// bound, followed by one row `x_i <= ub_i` for every finite upper
/// bound, each group in increasing variable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxFolding {
    /// number of variables
    pub n: usize,
    /// number of inequality rows before folding
    pub m_linear: usize,
    /// indices of variables with a finite lower bound
    pub lower: Vec<usize>,
    /// indices of variables with a finite upper bound
    pub upper: Vec<usize>,
}

impl BoxFolding {
    /// number of folded rows
    pub fn nrows(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Split the dual vector of the folded inequality block into the
    /// dual of the original inequalities and the box dual
    /// `z_box = z_upper - z_lower`.
    ///
    /// # Panics
    /// Panics if `z` does not have `m_linear + nrows()` entries.
    pub fn split_duals<T: FloatT>(&self, z: &[T]) -> (Vec<T>, Vec<T>) {
        assert_eq!(z.len(), self.m_linear + self.nrows());

        let (z_linear, z_bounds) = z.split_at(self.m_linear);
        let (z_lower, z_upper) = z_bounds.split_at(self.lower.len());

        let mut z_box = vec![T::zero(); self.n];
        for (&i, &zl) in self.lower.iter().zip(z_lower) {
            z_box[i] -= zl;
        }
        for (&i, &zu) in self.upper.iter().zip(z_upper) {
            z_box[i] += zu;
        }
        (z_linear.to_vec(), z_box)
    }
}

fn finite_indices<T: FloatT>(bound: Option<&Vec<T>>) -> Vec<usize> {
    bound.map_or_else(Vec::new, |v| {
        v.iter()
            .enumerate()
            .filter(|(_, x)| x.is_finite())
            .map(|(i, _)| i)
            .collect()
    })
}

/// Append box bounds to a sparse inequality block `Gx <= h`.
///
/// Returns the (possibly newly created) inequality block and the row
/// layout of the folded bounds.  When neither bound is finite anywhere
/// the inequality block is returned unchanged and the layout is `None`.
#[allow(clippy::type_complexity)]
pub fn linear_from_box_inequalities<T: FloatT>(
    G: Option<CscMatrix<T>>,
    h: Option<Vec<T>>,
    lb: Option<&Vec<T>>,
    ub: Option<&Vec<T>>,
    n: usize,
) -> Result<(Option<CscMatrix<T>>, Option<Vec<T>>, Option<BoxFolding>), ProblemError> {
    let lower = finite_indices(lb);
    let upper = finite_indices(ub);
    if lower.is_empty() && upper.is_empty() {
        return Ok((G, h, None));
    }

    let G = G.unwrap_or_else(|| CscMatrix::zeros((0, n)));
    let mut h = h.unwrap_or_default();
    let folding = BoxFolding {
        n,
        m_linear: G.m,
        lower,
        upper,
    };

    let G_lower = csc_selector(n, &folding.lower, -T::one());
    let G_upper = csc_selector(n, &folding.upper, T::one());
    let G = csc_vstack(&[&G, &G_lower, &G_upper])?;

    if let Some(lb) = lb {
        h.extend(folding.lower.iter().map(|&i| -lb[i]));
    }
    if let Some(ub) = ub {
        h.extend(folding.upper.iter().map(|&i| ub[i]));
    }

    log::debug!(
        "folded {} lower and {} upper bounds into {} inequality rows",
        folding.lower.len(),
        folding.upper.len(),
        G.m
    );

    Ok((Some(G), Some(h), Some(folding)))
}

/// Single constraint system `Ax + s = b, s ∈ K` assembled from the
/// equality and inequality blocks of a problem.
///
/// Equality rows come first, tagged [`ConeTag::ZeroCone`], then
/// inequality rows tagged [`ConeTag::NonnegativeCone`].  Empty blocks
/// get no cone.
#[derive(Debug, Clone)]
pub struct StackedConstraints<T> {
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
    pub cones: Vec<ConeTag>,
    /// number of equality rows at the top of `A`
    pub m_eq: usize,
}

impl<T> StackedConstraints<T>
where
    T: FloatT,
{
    /// Stack `[A; G]` and `[b; h]`
    pub fn stack(
        n: usize,
        eq: Option<(&CscMatrix<T>, &[T])>,
        ineq: Option<(&CscMatrix<T>, &[T])>,
    ) -> Result<Self, ProblemError> {
        let mut blocks: Vec<&CscMatrix<T>> = Vec::with_capacity(2);
        let mut b = Vec::new();
        let mut cones = Vec::new();
        let mut m_eq = 0;

        if let Some((A, beq)) = eq.filter(|(A, _)| A.m > 0) {
            blocks.push(A);
            b.extend_from_slice(beq);
            cones.push(ConeTag::ZeroCone(beq.len()));
            m_eq = beq.len();
        }
        if let Some((G, h)) = ineq.filter(|(G, _)| G.m > 0) {
            blocks.push(G);
            b.extend_from_slice(h);
            cones.push(ConeTag::NonnegativeCone(h.len()));
        }

        let A = if blocks.is_empty() {
            CscMatrix::zeros((0, n))
        } else {
            csc_vstack(&blocks)?
        };

        Ok(Self { A, b, cones, m_eq })
    }

    /// total number of stacked rows
    pub fn nrows(&self) -> usize {
        self.b.len()
    }

    /// Split a dual vector over the stacked rows at the equality block
    /// boundary, returning `(y, z)`.
    ///
    /// # Panics
    /// Panics if `z` does not have one entry per stacked row.
    pub fn split_duals(&self, z: &[T]) -> (Vec<T>, Vec<T>) {
        assert_eq!(z.len(), self.nrows());
        let (y, z) = z.split_at(self.m_eq);
        (y.to_vec(), z.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_folding_rows() {
        let n = 3;
        let lb = vec![0., f64::NEG_INFINITY, -1.];
        let ub = vec![1., 2., f64::INFINITY];

        let (G, h, folding) =
            linear_from_box_inequalities(None, None, Some(&lb), Some(&ub), n).unwrap();
        let (G, h, folding) = (G.unwrap(), h.unwrap(), folding.unwrap());

        // x0 has both bounds, x1 and x2 one each
        assert_eq!(folding.nrows(), 4);
        assert_eq!(G.m, 4);
        assert!(G.check_format().is_ok());
        assert_eq!(h, vec![-0., 1., 1., 2.]);
        assert_eq!(G.get_entry((0, 0)), Some(-1.));
        assert_eq!(G.get_entry((1, 2)), Some(-1.));
        assert_eq!(G.get_entry((2, 0)), Some(1.));
        assert_eq!(G.get_entry((3, 1)), Some(1.));
    }

    #[test]
    fn test_box_folding_appends() {
        let G = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
        let h = vec![1.];
        let ub = vec![0.5, 0.5];

        let (G, h, folding) =
            linear_from_box_inequalities(Some(G), Some(h), None, Some(&ub), 2).unwrap();
        let (G, h, folding) = (G.unwrap(), h.unwrap(), folding.unwrap());
        assert_eq!(G.m, 3);
        assert_eq!(h, vec![1., 0.5, 0.5]);
        assert_eq!(folding.m_linear, 1);

        // upper minus lower
        let (z, z_box) = folding.split_duals(&[0.1, 0.2, 0.3]);
        assert_eq!(z, vec![0.1]);
        assert_eq!(z_box, vec![0.2, 0.3]);
    }

    #[test]
    fn test_box_split_sign() {
        let folding = BoxFolding {
            n: 2,
            m_linear: 0,
            lower: vec![0, 1],
            upper: vec![1],
        };
        let (z, z_box) = folding.split_duals(&[1., 2., 5.]);
        assert!(z.is_empty());
        assert_eq!(z_box, vec![-1., 3.]);
    }

    #[test]
    fn test_no_finite_bounds() {
        let lb = vec![f64::NEG_INFINITY];
        let (G, h, folding) = linear_from_box_inequalities(None, None, Some(&lb), None, 1).unwrap();
        assert!(G.is_none() && h.is_none() && folding.is_none());
    }

    #[test]
    fn test_stack_constraints() {
        let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
        let G = CscMatrix::<f64>::identity(2);
        let b = [1.];
        let h = [2., 3.];

        let stacked = StackedConstraints::stack(2, Some((&A, &b[..])), Some((&G, &h[..]))).unwrap();
        assert_eq!(stacked.cones, vec![ConeTag::ZeroCone(1), ConeTag::NonnegativeCone(2)]);
        assert_eq!(stacked.b, vec![1., 2., 3.]);
        assert_eq!(stacked.A.get_entry((0, 1)), Some(1.));
        assert_eq!(stacked.A.get_entry((2, 1)), Some(1.));

        let (y, z) = stacked.split_duals(&[4., 5., 6.]);
        assert_eq!(y, vec![4.]);
        assert_eq!(z, vec![5., 6.]);

        let empty = StackedConstraints::<f64>::stack(2, None, None).unwrap();
        assert_eq!(empty.A.m, 0);
        assert!(empty.cones.is_empty());
    }
}
