//! Adapter for the Clarabel interior point solver.

mod settings;
mod solve;

pub use settings::*;
pub use solve::*;
