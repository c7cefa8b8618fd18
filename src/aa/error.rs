use std::fmt;

/// Errors raised while building or querying an [`AAFramework`](super::AAFramework).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfError {
    /// An argument with this name was already present in the store.
    DuplicateArgument(String),
    /// An attack or enforcement referenced a name that was never added.
    UnknownArgument(String),
    /// The requested mode/semantics pair is not supported.
    InvalidCombination { mode: String, semantics: String },
    /// The hard-clause set has no model under strict enforcement.
    Infeasible,
    /// The underlying SAT/MaxSAT engine reported an internal fault.
    SolverError(String),
}

impl fmt::Display for AfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AfError::DuplicateArgument(name) => {
                write!(f, "duplicate argument: \"{}\"", name)
            }
            AfError::UnknownArgument(name) => {
                write!(f, "unknown argument: \"{}\"", name)
            }
            AfError::InvalidCombination { mode, semantics } => {
                write!(
                    f,
                    "mode \"{}\" is not compatible with semantics \"{}\"",
                    mode, semantics
                )
            }
            AfError::Infeasible => write!(f, "the enforcement request is infeasible"),
            AfError::SolverError(msg) => write!(f, "solver error: {}", msg),
        }
    }
}

impl std::error::Error for AfError {}
