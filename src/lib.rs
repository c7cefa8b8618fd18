//! Minimal-edit enforcement of argumentation semantics over abstract argumentation
//! frameworks: given an attack graph and a desired argument set, compute the smallest
//! edit to the attack relation that makes the request hold under a chosen semantics.

pub mod aa;
pub mod app;
pub mod encodings;
pub mod enforcement;
pub mod io;
pub mod sat;
pub mod utils;

pub use aa::{AAFramework, AfError, Mode, Query, Semantics};
pub use enforcement::{build_clauses, enforce, EnforcementResult};
