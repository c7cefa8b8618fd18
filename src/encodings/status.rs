use crate::aa::AAFramework;
use crate::clause;
use crate::sat::{Clause, Literal};

fn att(af: &AAFramework, k: usize, j: usize) -> Option<Literal> {
    af.vars.att_var((k, j)).map(|v| Literal::positive(v.into()))
}

fn status_arg(af: &AAFramework, t: usize, x: usize) -> Option<Literal> {
    af.vars
        .status_arg_var((t, x))
        .map(|v| Literal::positive(v.into()))
}

fn status_att(af: &AAFramework, t: usize, k: usize, j: usize) -> Option<Literal> {
    af.vars
        .status_att_var((t, (k, j)))
        .map(|v| Literal::positive(v.into()))
}

/// Credulous status-enforcement hard clauses: for each positive target `t`, force the
/// existence of a witness admissible extension containing `t` and avoiding `E-`.
pub fn credulous_status_clauses(af: &AAFramework, stable: bool) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let e_minus = af.e_minus().clone();
    for &t in af.e_plus() {
        // t must be a member of its own witness
        if let Some(tl) = status_arg(af, t, t) {
            clauses.push(clause![tl]);
        }
        let witnesses: Vec<usize> = af
            .arg_ids()
            .filter(|x| !e_minus.contains(x))
            .collect();

        // conflict-freeness within the witness
        for &j in &witnesses {
            for &k in &witnesses {
                if j == k {
                    continue;
                }
                let (Some(arg_j), Some(arg_k), Some(att_jk)) =
                    (status_arg(af, t, j), status_arg(af, t, k), att(af, j, k))
                else {
                    continue;
                };
                clauses.push(clause![arg_j.negate(), arg_k.negate(), att_jk.negate()]);
            }
        }

        // defense: every attacker of a witness member must itself be attacked by the
        // witness, expressed through the att_var relay's defining equivalence.
        for &j in &witnesses {
            let Some(arg_j) = status_arg(af, t, j) else { continue };
            for &k in af.attackers(j) {
                if e_minus.contains(&k) {
                    continue;
                }
                let Some(att_kj) = att(af, k, j) else { continue };
                let mut defenders = Vec::new();
                for &d in af.attackers(k) {
                    if e_minus.contains(&d) {
                        continue;
                    }
                    if let Some(rel) = status_att(af, t, d, k) {
                        defenders.push(rel);
                        // relay <-> arg_var(d) AND att(d,k)
                        if let Some(arg_d) = status_arg(af, t, d) {
                            clauses.push(clause![rel.negate(), arg_d]);
                        }
                        if let Some(att_dk) = att(af, d, k) {
                            clauses.push(clause![rel.negate(), att_dk]);
                        }
                    }
                }
                let mut defended = vec![arg_j.negate(), att_kj.negate()];
                defended.extend(defenders);
                clauses.push(defended);
            }
        }

        if stable {
            for &i in &witnesses {
                if let Some(arg_i) = status_arg(af, t, i) {
                    let mut disj = vec![arg_i];
                    for &j in af.attackers(i) {
                        if e_minus.contains(&j) {
                            continue;
                        }
                        if let Some(rel) = status_att(af, t, j, i) {
                            disj.push(rel);
                        }
                    }
                    clauses.push(disj);
                }
            }
        }
    }
    clauses
}

/// The per-negatively-enforced-argument witness baked into the skeptical CEGAR
/// relaxation's hard clauses for the `E- != ∅` case: for each `neg` in `E-`, forces the
/// existence of a stable extension of the eventual output AF that excludes `neg`. Unlike
/// `credulous_status_clauses`'s per-target witnesses, this witness never offers `neg`
/// itself the membership option in the covering clause below, which forces `neg` into
/// the "attacked by the witness" branch instead.
///
/// Because this is a hard constraint on every candidate the relaxation proposes,
/// skeptical rejection of every `E-` member is guaranteed by construction in whatever
/// the MaxSAT solver returns; only skeptical acceptance of `E+` still needs checking, by
/// the CEGAR verifier (`enforcement::cegar::counter_witness_exists`) searching for a
/// stable extension missing some `E+` member.
///
/// (`E- = ∅` does not need this function at all: the driver enforces skeptical
/// acceptance of `E+` directly as a single ordinary stable-extension search over the
/// output AF's own `arg_var`, via `stable_non_strict_clauses`, with no separate witness
/// table.)
pub fn skeptical_relaxation_clauses(af: &AAFramework) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let e_plus = af.e_plus().clone();
    for &neg in af.e_minus() {
        let candidates: Vec<usize> = af
            .arg_ids()
            .filter(|x| !e_plus.contains(x) && *x != neg)
            .collect();

        // conflict-freeness within the witness; `neg` is never a candidate member.
        for &j in &candidates {
            for &k in &candidates {
                if j == k {
                    continue;
                }
                let (Some(arg_j), Some(arg_k), Some(att_jk)) =
                    (status_arg(af, neg, j), status_arg(af, neg, k), att(af, j, k))
                else {
                    continue;
                };
                clauses.push(clause![arg_j.negate(), arg_k.negate(), att_jk.negate()]);
            }
        }

        // defense, through the att_var relay, for every candidate witness member.
        for &j in &candidates {
            let Some(arg_j) = status_arg(af, neg, j) else { continue };
            for &k in af.attackers(j) {
                if k == neg || e_plus.contains(&k) {
                    continue;
                }
                let Some(att_kj) = att(af, k, j) else { continue };
                let mut defenders = Vec::new();
                for &d in af.attackers(k) {
                    if d == neg || e_plus.contains(&d) {
                        continue;
                    }
                    if let Some(rel) = status_att(af, neg, d, k) {
                        defenders.push(rel);
                        if let Some(arg_d) = status_arg(af, neg, d) {
                            clauses.push(clause![rel.negate(), arg_d]);
                        }
                        if let Some(att_dk) = att(af, d, k) {
                            clauses.push(clause![rel.negate(), att_dk]);
                        }
                    }
                }
                let mut defended = vec![arg_j.negate(), att_kj.negate()];
                defended.extend(defenders);
                clauses.push(defended);
            }
        }

        // covering: every non-positively-enforced argument must be a witness member or
        // attacked by one. `neg` never gets the membership option, which is what forces
        // it out of the witness.
        for i in af.arg_ids() {
            if e_plus.contains(&i) {
                continue;
            }
            let mut disj = Vec::new();
            if i != neg {
                if let Some(arg_i) = status_arg(af, neg, i) {
                    disj.push(arg_i);
                }
            }
            for &k in af.attackers(i) {
                if k == neg || e_plus.contains(&k) {
                    continue;
                }
                if let Some(rel) = status_att(af, neg, k, i) {
                    disj.push(rel);
                }
            }
            for &k in &e_plus {
                if let Some(l) = att(af, k, i) {
                    disj.push(l);
                }
            }
            if !disj.is_empty() {
                clauses.push(disj);
            }
        }
    }
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeptical_relaxation_forces_attack_on_sole_defender() {
        // a, b; no attacks; E+ = {a}, E- = {b}: the only way to guarantee some stable
        // extension excludes b is for a to attack it.
        let mut af = AAFramework::new();
        af.add_argument("a").unwrap();
        af.add_argument("b").unwrap();
        af.add_enforcement(0);
        af.add_neg_enforcement(1);
        af.initialize_skeptical();

        let clauses = skeptical_relaxation_clauses(&af);
        let att_ab = att(&af, 0, 1).unwrap();
        assert!(clauses.iter().any(|c| c.len() == 1 && c[0] == att_ab));
    }

    #[test]
    fn test_credulous_status_clauses_unaffected_by_skeptical_targets() {
        let mut af = AAFramework::new();
        af.add_argument("a").unwrap();
        af.add_argument("b").unwrap();
        af.add_enforcement(0);
        af.initialize_credulous();
        let clauses = credulous_status_clauses(&af, true);
        assert!(!clauses.is_empty());
    }
}
