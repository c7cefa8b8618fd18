use std::collections::HashMap;

use super::sat_solver::{Clause, Literal, SatSolver, SolvingResult, Variable};

/// Sequential-counter ("at most k") CNF encoding over `lits`, per Sinz (2005). Auxiliary
/// variables are minted through `fresh_var`, which must never reuse an id already used
/// by `lits` or by the surrounding formula.
fn at_most_k_clauses(lits: &[Literal], k: usize, fresh_var: &mut impl FnMut() -> Variable) -> Vec<Clause> {
    let n = lits.len();
    if n == 0 || k >= n {
        return Vec::new();
    }
    if k == 0 {
        return lits.iter().map(|l| vec![l.negate()]).collect();
    }

    let mut s: HashMap<(usize, usize), Variable> = HashMap::new();
    for i in 1..=n - 1 {
        for j in 1..=k {
            s.insert((i, j), fresh_var());
        }
    }
    let x = |i: usize| lits[i - 1];
    let slit = |i: usize, j: usize| Literal::positive(s[&(i, j)]);

    let mut clauses = Vec::new();
    clauses.push(vec![x(1).negate(), slit(1, 1)]);
    for j in 2..=k {
        clauses.push(vec![slit(1, j).negate()]);
    }
    for i in 2..=n - 1 {
        clauses.push(vec![x(i).negate(), slit(i, 1)]);
        clauses.push(vec![slit(i - 1, 1).negate(), slit(i, 1)]);
        for j in 2..=k {
            clauses.push(vec![x(i).negate(), slit(i - 1, j - 1).negate(), slit(i, j)]);
            clauses.push(vec![slit(i - 1, j).negate(), slit(i, j)]);
        }
        clauses.push(vec![x(i).negate(), slit(i - 1, k).negate()]);
    }
    clauses.push(vec![x(n).negate(), slit(n - 1, k).negate()]);
    clauses
}

/// The weighted-MaxSAT façade. Every soft clause in this system carries weight 1 (the
/// edit-distance objective counts edits, not weighted edits), so the optimizer reduces
/// to an unweighted-Boolean-optimization search: linear scan over the number of
/// violated soft clauses `k = 0, 1, 2, ...`, each iteration encoding "at most k of the
/// soft clauses may be relaxed" with a fresh sequential counter and asking a fresh
/// decision-SAT instance for a model. The first satisfiable `k` is the optimum, since
/// the scan is monotonically relaxing.
///
/// This linear-search-plus-cardinality-encoding strategy is one valid implementation of
/// the adapter contract ("returns an optimum"); a core-guided MSU3-style search over the
/// same cardinality family would also satisfy it.
pub struct MaxSatSolver {
    hard: Vec<Clause>,
    soft: Vec<Clause>,
    first_free_var: usize,
}

impl MaxSatSolver {
    /// `first_free_var` must be one past the highest variable id already allocated by
    /// the encoding (i.e. `VariableTables::n_vars() + 1`), so the relax and counter
    /// variables minted here never collide with semantic variables.
    pub fn new(first_free_var: usize) -> Self {
        MaxSatSolver {
            hard: Vec::new(),
            soft: Vec::new(),
            first_free_var,
        }
    }

    pub fn add_hard_clause(&mut self, clause: Clause) {
        self.hard.push(clause);
    }

    pub fn add_soft_clause(&mut self, clause: Clause) {
        self.soft.push(clause);
    }

    pub fn n_soft(&self) -> usize {
        self.soft.len()
    }

    /// Solves for an optimal model, using `make_solver` to construct a fresh decision
    /// SAT engine for every candidate value of `k`.
    pub fn solve(&self, make_solver: impl Fn() -> Box<dyn SatSolver>) -> (SolvingResult, usize) {
        for k in 0..=self.soft.len() {
            let mut solver = make_solver();
            for c in &self.hard {
                solver.add_clause(c.clone());
            }
            let mut next_var = self.first_free_var;
            let mut relax_lits = Vec::with_capacity(self.soft.len());
            for sc in &self.soft {
                let r = Variable::new(next_var);
                next_var += 1;
                let rlit = Literal::positive(r);
                let mut relaxed = sc.clone();
                relaxed.push(rlit);
                solver.add_clause(relaxed);
                relax_lits.push(rlit);
            }
            let mut fresh = move || {
                let v = Variable::new(next_var);
                next_var += 1;
                v
            };
            for c in at_most_k_clauses(&relax_lits, k, &mut fresh) {
                solver.add_clause(c);
            }
            match solver.solve() {
                SolvingResult::Satisfiable(model) => return (SolvingResult::Satisfiable(model), k),
                SolvingResult::Unsatisfiable => continue,
                SolvingResult::Unknown => return (SolvingResult::Unknown, k),
            }
        }
        (SolvingResult::Unsatisfiable, self.soft.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;
    use crate::sat::cadical_solver::default_solver;

    #[test]
    fn test_at_most_k_forbids_too_many_true() {
        let mut next = 10;
        let mut fresh = || {
            let v = Variable::new(next);
            next += 1;
            v
        };
        let lits: Vec<Literal> = (1..=3).map(|i| Literal::positive(Variable::new(i))).collect();
        let clauses = at_most_k_clauses(&lits, 1, &mut fresh);
        assert!(!clauses.is_empty());
    }

    #[test]
    fn test_at_most_k_zero_forces_all_negative() {
        let lits: Vec<Literal> = (1..=3).map(|i| Literal::positive(Variable::new(i))).collect();
        let mut fresh = || unreachable!();
        let clauses = at_most_k_clauses(&lits, 0, &mut fresh);
        assert_eq!(3, clauses.len());
    }

    #[test]
    fn test_maxsat_minimizes_violations() {
        let mut ms = MaxSatSolver::new(10);
        let a = Variable::new(1);
        let b = Variable::new(2);
        ms.add_hard_clause(clause![Literal::negative(a), Literal::negative(b)]);
        ms.add_soft_clause(clause![a]);
        ms.add_soft_clause(clause![b]);
        let (result, cost) = ms.solve(default_solver);
        assert!(result.is_satisfiable());
        assert_eq!(1, cost);
    }
}
