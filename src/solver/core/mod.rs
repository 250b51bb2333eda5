// package together all of the following and re-export
// in a flattened structure :
// : error types
// : problem and solution records
// : option forwarding
// : problem normalization helpers

mod cones;
pub mod conversions;
mod errors;
pub mod options;
mod problem;
mod solution;

pub use cones::*;
pub use errors::*;
pub use options::{OptionValue, SettingsTarget, SolverOptions, UnknownOptionPolicy};
pub use problem::*;
pub use solution::*;
