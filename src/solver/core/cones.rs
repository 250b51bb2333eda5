#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cone tag attached to a row range of a stacked constraint system
/// `Ax + s = b, s ∈ K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConeTag {
    /// equality rows, `s = 0`
    ZeroCone(usize),
    /// inequality rows, `s >= 0`
    NonnegativeCone(usize),
}

impl ConeTag {
    /// number of rows covered by the cone
    pub fn dim(&self) -> usize {
        match *self {
            ConeTag::ZeroCone(dim) | ConeTag::NonnegativeCone(dim) => dim,
        }
    }
}
