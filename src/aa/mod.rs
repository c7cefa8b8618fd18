//! The argumentation framework data model: arguments, attacks, enforcement
//! requests, and the Boolean-variable tables built on top of them.

mod error;
mod framework;
mod semantics;
mod vars;

pub use error::AfError;
pub use framework::AAFramework;
pub use semantics::{Mode, Query, Semantics};
pub use vars::VariableTables;
