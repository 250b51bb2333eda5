use crate::algebra::{MatrixConcatenationError, SparseFormatError};
use thiserror::Error;

#[derive(Error, Debug)]
/// Error type for structurally inconsistent problem data.
///
/// Always raised before any solver is invoked.
pub enum ProblemError {
    /// One member of a paired constraint block is missing
    #[error("Inconsistent {kind}: {present} is set but {missing} is not")]
    UnpairedConstraint {
        kind: &'static str,
        present: &'static str,
        missing: &'static str,
    },
    /// A matrix or vector has the wrong size
    #[error("Dimension mismatch in {field}: expected {expected}, got {found}")]
    DimensionMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },
    /// Sparse matrix data is malformed
    #[error("Bad sparse matrix {field}: {source}")]
    SparseFormat {
        field: &'static str,
        #[source]
        source: SparseFormatError,
    },
    /// Constraint blocks could not be stacked
    #[error("Cannot stack constraint blocks: {0}")]
    Concatenation(#[from] MatrixConcatenationError),
}

#[derive(Error, Debug, Clone, PartialEq)]
/// Error type for invalid caller-supplied parameters.
pub enum ParamError {
    /// Backend name not supported by the solver
    #[error("Unknown {solver} backend \"{value}\"")]
    UnknownBackend { solver: &'static str, value: String },
    /// Solver name not recognized or not compiled in
    #[error("Unknown solver \"{0}\"")]
    UnknownSolver(String),
    /// Forwarded option key not recognized by a strict solver
    #[error("Unknown {solver} setting \"{key}\" with value {value}")]
    UnknownOption {
        solver: &'static str,
        key: String,
        value: String,
    },
    /// Forwarded option value has the wrong type or range
    #[error("Bad value for setting \"{key}\": expected {expected}, got {value}")]
    BadOptionValue {
        key: String,
        expected: &'static str,
        value: String,
    },
    /// Warm start vector has the wrong length
    #[error("Warm start vector has length {found}, expected {expected}")]
    BadInitvals { expected: usize, found: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
/// Error type returned when the wrapped solver refuses the problem.
pub enum SolverError {
    /// Solver construction or setup failed
    #[error("{solver} setup failed: {reason}")]
    Setup {
        solver: &'static str,
        reason: String,
    },
    /// Solver support not compiled into this build
    #[error("{0} support is not enabled in this build")]
    NotAvailable(&'static str),
}

#[derive(Error, Debug)]
/// Top level error type returned by all solve entry points.
pub enum QpError {
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error(transparent)]
    Solver(#[from] SolverError),
}

#[test]
fn test_error_messages() {
    let e = ParamError::UnknownBackend {
        solver: "PIQP",
        value: "unsupported_value".to_string(),
    };
    assert!(e.to_string().contains("unsupported_value"));

    let e: QpError = ProblemError::UnpairedConstraint {
        kind: "inequalities",
        present: "h",
        missing: "G",
    }
    .into();
    assert_eq!(e.to_string(), "Inconsistent inequalities: h is set but G is not");
}
