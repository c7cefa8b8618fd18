use crate::aa::AAFramework;
use crate::clause;
use crate::sat::{Clause, Literal};

fn att(af: &AAFramework, k: usize, j: usize) -> Option<Literal> {
    af.vars.att_var((k, j)).map(|v| Literal::positive(v.into()))
}

fn level(af: &AAFramework, n: usize, i: usize) -> Option<Literal> {
    af.vars.level_var((n, i)).map(|v| Literal::positive(v.into()))
}

fn level_attack(af: &AAFramework, n_minus_1: usize, k: usize, j: usize) -> Option<Literal> {
    af.vars
        .level_attack_var((n_minus_1, (k, j)))
        .map(|v| Literal::positive(v.into()))
}

fn not_defended(af: &AAFramework, n_minus_1: usize, j: usize, i: usize) -> Option<Literal> {
    af.vars
        .level_not_defended_var((n_minus_1, (j, i)))
        .map(|v| Literal::positive(v.into()))
}

/// Emits the standard CNF expansion of `a ↔ (b1 ∧ b2 ∧ ... )`.
fn iff_conjunction(a: Literal, bs: &[Literal], out: &mut Vec<Clause>) {
    for &b in bs {
        out.push(clause![a.negate(), b]);
    }
    let mut back = vec![a];
    back.extend(bs.iter().map(|b| b.negate()));
    out.push(back);
}

/// Strict grounded level-encoding, targets ranging over `E+`, levels `1..=|E+|`.
pub fn grounded_strict_clauses(af: &AAFramework) -> Vec<Clause> {
    let targets: Vec<usize> = af.e_plus().iter().copied().collect();
    level_clauses(af, &targets, targets.len().max(1))
}

/// Non-strict grounded level-encoding, targets ranging over every argument, levels
/// `1..=⌈|A|/2⌉`.
pub fn grounded_non_strict_clauses(af: &AAFramework) -> Vec<Clause> {
    let targets: Vec<usize> = af.arg_ids().collect();
    let levels = ((af.n_args() + 1) / 2).max(1);
    level_clauses(af, &targets, levels)
}

fn level_clauses(af: &AAFramework, targets: &[usize], levels: usize) -> Vec<Clause> {
    let mut clauses = Vec::new();

    // level(1,i) <-> NOT (OR_{j not in E+} att(j,i))  i.e. all current attackers already
    // eliminable. Expand via an auxiliary disjunction rather than introducing a further
    // variable: level(1,i) <-> AND_{j} not(att(j,i)).
    for &i in targets {
        let Some(l1) = level(af, 1, i) else { continue };
        let negated_attackers: Vec<Literal> = af
            .attackers(i)
            .iter()
            .filter(|j| !af.e_plus().contains(j))
            .filter_map(|&j| att(af, j, i).map(|l| l.negate()))
            .collect();
        iff_conjunction(l1, &negated_attackers, &mut clauses);
    }

    // at least one enforced argument on level 1
    if !af.e_plus().is_empty() {
        let disj: Vec<Literal> = af
            .e_plus()
            .iter()
            .filter_map(|&i| level(af, 1, i))
            .collect();
        if !disj.is_empty() {
            clauses.push(disj);
        }
    }

    for n in 2..=levels {
        for &i in targets {
            let Some(ln) = level(af, n, i) else { continue };

            let mut not_defended_negs = Vec::new();
            for &j in af.attackers(i) {
                if af.e_plus().contains(&j) {
                    continue;
                }
                let Some(nd) = not_defended(af, n - 1, j, i) else { continue };
                not_defended_negs.push(nd.negate());

                // not_defended(n-1,(j,i)) <-> att(j,i) AND AND_k (not level_attack(n-1,(k,j)))
                let Some(att_ji) = att(af, j, i) else { continue };
                let neg_level_attacks: Vec<Literal> = af
                    .attackers(j)
                    .iter()
                    .filter(|k| targets.contains(k))
                    .filter_map(|&k| level_attack(af, n - 1, k, j).map(|l| l.negate()))
                    .collect();
                let mut conj = vec![att_ji];
                conj.extend(neg_level_attacks.iter().copied());
                iff_conjunction(nd, &conj, &mut clauses);

                for &k in af.attackers(j) {
                    if !targets.contains(&k) {
                        continue;
                    }
                    let Some(la) = level_attack(af, n - 1, k, j) else { continue };
                    let Some(att_kj) = att(af, k, j) else { continue };
                    let Some(l_n1_k) = level(af, n - 1, k) else { continue };
                    // level_attack(n-1,(k,j)) <-> att(k,j) AND level(n-1,k)
                    iff_conjunction(la, &[att_kj, l_n1_k], &mut clauses);
                }
            }

            // level(n,i) <-> AND_j (not not_defended(n-1,(j,i)))
            iff_conjunction(ln, &not_defended_negs, &mut clauses);

            // level propagation
            if let Some(l_prev) = level(af, n - 1, i) {
                clauses.push(clause![l_prev.negate(), ln]);
            }
        }
    }

    // final hard unit: every target accepted at the final level
    for &i in targets {
        if let Some(l_final) = level(af, levels, i) {
            clauses.push(clause![l_final]);
        }
    }

    clauses
}

/// Level-1 clauses alone, used by the CEGAR relaxations (admissible non-strict, complete
/// strict) that only need the level-one base, not the full ladder.
pub fn level_one_clauses(af: &AAFramework, targets: &[usize]) -> Vec<Clause> {
    let mut clauses = Vec::new();
    for &i in targets {
        let Some(l1) = level(af, 1, i) else { continue };
        let negated_attackers: Vec<Literal> = af
            .attackers(i)
            .iter()
            .filter(|j| !af.e_plus().contains(j))
            .filter_map(|&j| att(af, j, i).map(|l| l.negate()))
            .collect();
        iff_conjunction(l1, &negated_attackers, &mut clauses);
    }
    clauses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aa::{Mode, Semantics};

    #[test]
    fn test_grounded_strict_on_enforced_chain() {
        let mut af = AAFramework::new();
        af.add_argument("a").unwrap();
        af.add_argument("b").unwrap();
        af.add_argument("c").unwrap();
        af.add_attack(0, 1);
        af.add_attack(1, 2);
        af.add_enforcement(0);
        af.add_enforcement(2);
        af.initialize(Mode::Strict, Semantics::Grounded, false).unwrap();
        let clauses = grounded_strict_clauses(&af);
        assert!(!clauses.is_empty());
    }
}
