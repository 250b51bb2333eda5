//! Reading and writing of problems and solutions as JSON files.

mod json;
pub use json::*;
