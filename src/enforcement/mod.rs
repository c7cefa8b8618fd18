//! The enforcement driver: dispatches a (mode, semantics) query to the matching direct
//! or CEGAR pipeline and reconstructs the output AF from the winning assignment.

mod cegar;
mod driver;

pub use driver::{build_clauses, enforce, EnforcementResult};
