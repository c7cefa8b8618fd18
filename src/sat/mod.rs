//! The SAT/MaxSAT façade: newtype variable/literal types shared by every encoding, a
//! decision-SAT engine backed by CaDiCaL, and a hand-rolled weighted-MaxSAT layer built
//! on top of it. No vendored-engine type ever crosses out of this module.

mod cadical_solver;
mod maxsat_solver;
mod sat_solver;

pub use cadical_solver::{default_solver, CadicalSolver};
pub use maxsat_solver::MaxSatSolver;
pub use sat_solver::{Assignment, Clause, Literal, SatSolver, SolvingResult, Variable};
