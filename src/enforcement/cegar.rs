use std::collections::{BTreeSet, HashSet};

use crate::aa::{AAFramework, AfError, Semantics};
use crate::encodings::{level, objective, semantic};
use crate::sat::{default_solver, Clause, Literal, MaxSatSolver, SatSolver, SolvingResult};
use crate::utils::{grounded_labeling, is_grounded, is_subset_of_grounded, Label};

use super::driver::rebuild;

/// Solves one weighted-MaxSAT relaxation and returns the candidate AF plus the
/// reported cost. A fresh [`MaxSatSolver`] is built every call, matching the
/// rebuild-from-scratch-per-`solve` adapter contract.
fn solve_relaxation(
    af: &AAFramework,
    hard: &[Clause],
    soft: &[Clause],
) -> Result<(AAFramework, crate::sat::Assignment, usize), AfError> {
    let mut ms = MaxSatSolver::new(af.vars.n_vars() + 1);
    for c in hard {
        ms.add_hard_clause(c.clone());
    }
    for c in soft {
        ms.add_soft_clause(c.clone());
    }
    let (result, cost) = ms.solve(default_solver);
    match result {
        SolvingResult::Satisfiable(model) => {
            let candidate = rebuild(af, &model);
            Ok((candidate, model, cost))
        }
        SolvingResult::Unsatisfiable => Err(AfError::Infeasible),
        SolvingResult::Unknown => Err(AfError::SolverError("MaxSAT engine returned unknown".to_string())),
    }
}

/// The exact refinement literal table from the grounded-CEGAR appendix: given the
/// candidate's grounded labeling, forbids the truth pattern on `attVar` that produced
/// it.
fn grounded_refinement_clause(af: &AAFramework, candidate: &AAFramework) -> Clause {
    let labeling = grounded_labeling(candidate);
    let label_of = |x: usize| labeling.get(&x).copied();

    let mut clause = Vec::new();
    let ids: Vec<usize> = af.arg_ids().collect();
    for &i in &ids {
        for &j in &ids {
            let Some(var) = af.vars.att_var((i, j)) else { continue };
            let lit = Literal::positive(var.into());
            let exists = candidate.att_exists(i, j);
            let li = label_of(i);
            let lj = label_of(j);
            let emitted = match (exists, li, lj) {
                (true, Some(Label::Accepted), Some(Label::Rejected)) => Some(lit.negate()),
                (true, None, None) => Some(lit.negate()),
                (false, Some(Label::Accepted), Some(Label::Accepted)) => Some(lit),
                (false, Some(Label::Accepted), None) => Some(lit),
                (false, Some(Label::Rejected), Some(Label::Accepted)) => Some(lit),
                (false, None, Some(Label::Accepted)) => Some(lit),
                _ => None,
            };
            if let Some(l) = emitted {
                clause.push(l);
            }
        }
    }
    clause
}

/// CEGAR loop for grounded enforcement: relaxation is complete-strict (strict mode) or
/// admissible-non-strict (non-strict mode) plus the level-one base, verified against
/// the true grounded fixpoint via [`is_grounded`]/[`is_subset_of_grounded`].
pub fn run_grounded_cegar(af: &mut AAFramework, strict: bool) -> Result<(AAFramework, usize, usize), AfError> {
    let targets: Vec<usize> = if strict {
        af.e_plus().iter().copied().collect()
    } else {
        af.arg_ids().collect()
    };
    af.initialize(
        if strict { crate::aa::Mode::Strict } else { crate::aa::Mode::NonStrict },
        Semantics::Complete,
        true,
    )?;

    let mut hard = if strict {
        semantic::complete_strict_clauses(af)
    } else {
        semantic::admissible_non_strict_clauses(af)
    };
    hard.extend(level::level_one_clauses(af, &targets));
    let soft = objective::soft_clauses(af);

    let desired: BTreeSet<usize> = af.e_plus().clone();
    let mut iterations = 0usize;
    loop {
        let (candidate, _model, cost) = solve_relaxation(af, &hard, &soft)?;
        let verified = if strict {
            is_grounded(&candidate, &desired.iter().copied().collect())
        } else {
            is_subset_of_grounded(&candidate, &desired.iter().copied().collect())
        };
        if verified {
            return Ok((candidate, cost, iterations));
        }
        let refinement = grounded_refinement_clause(af, &candidate);
        if refinement.is_empty() {
            return Err(AfError::SolverError(
                "grounded CEGAR could not derive a refinement clause for a failing candidate".to_string(),
            ));
        }
        hard.push(refinement);
        iterations += 1;
    }
}

/// Builds the standard "forbid this truth pattern" refinement clause: negate every
/// `attVar` literal according to its value in the failing candidate.
fn forbid_truth_pattern(af: &AAFramework, candidate: &AAFramework) -> Clause {
    let ids: Vec<usize> = af.arg_ids().collect();
    let mut clause = Vec::new();
    for &i in &ids {
        for &j in &ids {
            let Some(var) = af.vars.att_var((i, j)) else { continue };
            let lit = Literal::positive(var.into());
            clause.push(if candidate.att_exists(i, j) { lit.negate() } else { lit });
        }
    }
    clause
}

/// Checks, via a fresh decision-SAT call, whether `current` (a set of argument ids) can
/// be strictly extended while keeping `base_clauses` satisfied and every member of
/// `current` fixed to `true` in `var_of`. Returns `true` iff a strictly larger set
/// exists, i.e. `current` is *not* `⊆`-maximal.
fn exists_strictly_larger(
    base_clauses: &[Clause],
    all_ids: &[usize],
    current: &HashSet<usize>,
    var_of: impl Fn(usize) -> Option<Literal>,
) -> bool {
    let mut solver = default_solver();
    for c in base_clauses {
        solver.add_clause(c.clone());
    }
    let mut growth_disjunction = Vec::new();
    for &x in all_ids {
        let Some(lit) = var_of(x) else { continue };
        if current.contains(&x) {
            solver.add_clause(vec![lit]);
        } else {
            growth_disjunction.push(lit);
        }
    }
    if growth_disjunction.is_empty() {
        return false;
    }
    solver.add_clause(growth_disjunction);
    matches!(solver.solve(), SolvingResult::Satisfiable(_))
}

/// CEGAR loop shared by preferred, semi-stable, and stage non-strict enforcement: the
/// relaxation is admissible non-strict (the weakest property every one of the three
/// implies), and the verifier checks `⊆`-maximality of the candidate's witness — over
/// the extension itself for preferred, over its range for semi-stable/stage.
pub fn run_preferred_like_cegar(
    af: &mut AAFramework,
    semantics: Semantics,
) -> Result<(AAFramework, usize, usize), AfError> {
    af.initialize(crate::aa::Mode::NonStrict, semantics, true)?;
    let hard_base = semantic::admissible_non_strict_clauses(af);
    let soft = objective::soft_clauses(af);

    let mut hard = hard_base;
    let all_ids: Vec<usize> = af.arg_ids().collect();
    let mut iterations = 0usize;
    loop {
        let (candidate, model, cost) = solve_relaxation(af, &hard, &soft)?;

        // The witness extension the relaxation found, read off `af`'s own arg_var
        // table (E+ members are always in it but never get an arg_var).
        let extension: HashSet<usize> = all_ids
            .iter()
            .copied()
            .filter(|&x| {
                af.e_plus().contains(&x)
                    || af
                        .vars
                        .arg_var(x)
                        .is_some_and(|v| model.value_of(v.into()) == Some(true))
            })
            .collect();

        let mut candidate_clone = candidate.clone();
        let grown = match semantics {
            Semantics::Preferred => {
                candidate_clone.initialize(crate::aa::Mode::NonStrict, Semantics::Admissible, false)?;
                let base = semantic::admissible_non_strict_clauses(&candidate_clone);
                exists_strictly_larger(&base, &all_ids, &extension, |x| {
                    candidate_clone.vars.arg_var(x).map(|v| Literal::positive(v.into()))
                })
            }
            _ => {
                let range: HashSet<usize> = extension
                    .iter()
                    .copied()
                    .chain(extension.iter().flat_map(|&x| candidate.attacked(x).to_vec()))
                    .collect();
                candidate_clone.initialize(crate::aa::Mode::NonStrict, semantics, false)?;
                let mut base = if semantics == Semantics::Stage {
                    semantic::cf_non_strict_clauses(&candidate_clone)
                } else {
                    semantic::admissible_non_strict_clauses(&candidate_clone)
                };
                base.extend(semantic::range_clauses(&candidate_clone));
                exists_strictly_larger(&base, &all_ids, &range, |x| {
                    candidate_clone.vars.range_var(x).map(|v| Literal::positive(v.into()))
                })
            }
        };

        if !grown {
            return Ok((candidate, cost, iterations));
        }
        hard.push(forbid_truth_pattern(af, &candidate));
        iterations += 1;
    }
}

/// CEGAR loop for skeptical status enforcement with `E- ≠ ∅`. The relaxation's hard
/// clauses (`skeptical_relaxation_clauses`) already bake in a per-`E-`-member witness
/// guaranteeing skeptical rejection of every one of them, so each iteration's SAT oracle
/// call only has to search for a counterexample to skeptical *acceptance* of `E+`; if
/// found, the corresponding `attVar` truth pattern is forbidden.
pub fn run_skeptical_cegar(af: &mut AAFramework) -> Result<(AAFramework, usize, usize), AfError> {
    af.initialize_skeptical();
    let hard_base = crate::encodings::status::skeptical_relaxation_clauses(af);
    let soft = objective::soft_clauses(af);

    let mut hard = hard_base;
    let mut iterations = 0usize;
    loop {
        let (candidate, _model, cost) = solve_relaxation(af, &hard, &soft)?;
        if !counter_witness_exists(&candidate, af) {
            return Ok((candidate, cost, iterations));
        }
        hard.push(forbid_truth_pattern(af, &candidate));
        iterations += 1;
    }
}

/// Searches, via the decision SAT oracle, for a stable extension of `candidate` that
/// omits some member of `E+` — a counterexample to skeptical acceptance. Skeptical
/// rejection of every `E-` member does not need checking here: it is already guaranteed
/// by the per-negatively-enforced-argument witness baked into the relaxation's hard
/// clauses (`encodings::status::skeptical_relaxation_clauses`).
fn counter_witness_exists(candidate: &AAFramework, original: &AAFramework) -> bool {
    let mut candidate = candidate.clone();
    let _ = candidate.initialize(crate::aa::Mode::NonStrict, Semantics::Stable, false);
    let mut clauses = semantic::stable_non_strict_clauses(&candidate);
    let mut disjunction = Vec::new();
    for &t in original.e_plus() {
        if let Some(v) = candidate.vars.arg_var(t) {
            disjunction.push(Literal::negative(v.into()));
        }
    }
    if disjunction.is_empty() {
        return false;
    }
    clauses.push(disjunction);

    let mut solver = default_solver();
    for c in clauses {
        solver.add_clause(c);
    }
    matches!(solver.solve(), SolvingResult::Satisfiable(_))
}
