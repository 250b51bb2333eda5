use crate::solver::core::ParamError;
use std::fmt;
use std::str::FromStr;

/// Linear algebra backend of the PIQP solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiqpBackend {
    Dense,
    Sparse,
}

impl FromStr for PiqpBackend {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dense" => Ok(PiqpBackend::Dense),
            "sparse" => Ok(PiqpBackend::Sparse),
            _ => Err(ParamError::UnknownBackend {
                solver: "PIQP",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PiqpBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiqpBackend::Dense => write!(f, "dense"),
            PiqpBackend::Sparse => write!(f, "sparse"),
        }
    }
}

/// Resolve the backend selector.  With no explicit choice the sparse
/// backend is used whenever any problem matrix is stored sparse.
pub fn select_backend(backend: Option<&str>, use_sparse: bool) -> Result<PiqpBackend, ParamError> {
    let selected = match backend {
        None if use_sparse => PiqpBackend::Sparse,
        None => PiqpBackend::Dense,
        Some(name) => name.parse()?,
    };
    log::debug!("PIQP backend: {selected}");
    Ok(selected)
}

#[test]
fn test_select_backend() {
    assert_eq!(select_backend(None, false), Ok(PiqpBackend::Dense));
    assert_eq!(select_backend(None, true), Ok(PiqpBackend::Sparse));
    assert_eq!(select_backend(Some("dense"), true), Ok(PiqpBackend::Dense));
    assert_eq!(select_backend(Some("sparse"), false), Ok(PiqpBackend::Sparse));

    let err = select_backend(Some("unsupported_value"), false).unwrap_err();
    assert!(err.to_string().contains("unsupported_value"));
}
