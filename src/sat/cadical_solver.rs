use super::sat_solver::{Assignment, Clause, SatSolver, SolvingResult, Variable};

/// Decision SAT engine backed by the bundled CaDiCaL build. A fresh `cadical::Solver`
/// is created per [`CadicalSolver`] instance, matching the "rebuild-from-scratch per
/// `solve()`" contract at the adapter level (the enforcement driver creates a new
/// `CadicalSolver` for every call it makes through a solver factory).
pub struct CadicalSolver {
    engine: cadical::Solver,
    max_var: usize,
}

impl CadicalSolver {
    pub fn new() -> Self {
        CadicalSolver {
            engine: cadical::Solver::new(),
            max_var: 0,
        }
    }
}

impl Default for CadicalSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for CadicalSolver {
    fn add_clause(&mut self, clause: Clause) {
        for lit in &clause {
            self.max_var = self.max_var.max(lit.var().index());
        }
        let ints: Vec<i32> = clause.iter().map(|l| l.as_i64() as i32).collect();
        self.engine.add_clause(ints);
    }

    fn solve(&mut self) -> SolvingResult {
        match self.engine.solve() {
            Some(true) => {
                let mut values = Vec::with_capacity(self.max_var);
                for v in 1..=self.max_var {
                    values.push(self.engine.value(v as i32));
                }
                SolvingResult::Satisfiable(Assignment::new(values))
            }
            Some(false) => SolvingResult::Unsatisfiable,
            None => SolvingResult::Unknown,
        }
    }
}

/// The type alias used everywhere else in this crate to pick the decision SAT engine
/// without naming `CadicalSolver` directly.
pub fn default_solver() -> Box<dyn SatSolver> {
    Box::new(CadicalSolver::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;
    use crate::sat::sat_solver::Literal;

    #[test]
    fn test_unit_propagation_satisfiable() {
        let mut solver = CadicalSolver::new();
        let a = Variable::new(1);
        solver.add_clause(clause![a]);
        match solver.solve() {
            SolvingResult::Satisfiable(model) => {
                assert_eq!(Some(true), model.value_of(a));
            }
            other => panic!("expected SAT, got {:?}", other.is_satisfiable()),
        }
    }

    #[test]
    fn test_contradiction_is_unsat() {
        let mut solver = CadicalSolver::new();
        let a = Variable::new(1);
        solver.add_clause(clause![a]);
        solver.add_clause(vec![Literal::negative(a)]);
        assert!(matches!(solver.solve(), SolvingResult::Unsatisfiable));
    }
}
