//! Solver adapters.

pub mod clarabel;
pub mod piqp;
