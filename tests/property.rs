//! Brute-force property tests on small instances: independent enumeration oracles for
//! admissibility/stability/minimality, cross-checked against the library's encodings and
//! CEGAR pipelines. Subsets of the argument set are enumerated with `permutator`'s
//! `Combination` iterator.

use std::collections::HashSet;

use af_enforce::{enforce, AAFramework, Mode, Query, Semantics};
use permutator::Combination;

/// All subsets of `0..n`, smallest first. `permutator::Combination` only covers `r >= 1`;
/// the empty subset is handled separately so every subset of a small argument set is
/// still enumerated.
fn all_subsets(n: usize) -> Vec<HashSet<usize>> {
    let ids: Vec<usize> = (0..n).collect();
    let mut subsets = vec![HashSet::new()];
    for r in 1..=n {
        for combo in ids.combination(r) {
            subsets.push(combo.into_iter().copied().collect());
        }
    }
    subsets
}

fn is_conflict_free(af: &AAFramework, s: &HashSet<usize>) -> bool {
    s.iter().all(|&i| s.iter().all(|&j| !af.att_exists(i, j)))
}

fn defends(af: &AAFramework, s: &HashSet<usize>, x: usize) -> bool {
    af.attackers(x).iter().all(|&y| s.iter().any(|&z| af.att_exists(z, y)))
}

fn is_admissible(af: &AAFramework, s: &HashSet<usize>) -> bool {
    is_conflict_free(af, s) && s.iter().all(|&x| defends(af, s, x))
}

fn is_complete(af: &AAFramework, s: &HashSet<usize>) -> bool {
    is_admissible(af, s) && af.arg_ids().filter(|&x| defends(af, s, x)).all(|x| s.contains(&x))
}

fn is_stable(af: &AAFramework, s: &HashSet<usize>) -> bool {
    is_conflict_free(af, s)
        && af
            .arg_ids()
            .filter(|x| !s.contains(x))
            .all(|x| s.iter().any(|&y| af.att_exists(y, x)))
}

/// Any admissible/complete/stable set (of the candidate's own argument set) that
/// contains every member of `targets`, per the enumeration oracle.
fn exists_extension_containing(
    af: &AAFramework,
    targets: &HashSet<usize>,
    property: impl Fn(&AAFramework, &HashSet<usize>) -> bool,
) -> bool {
    all_subsets(af.n_args())
        .iter()
        .any(|s| targets.iter().all(|t| s.contains(t)) && property(af, s))
}

fn symmetric_difference_size(a: &AAFramework, b: &AAFramework) -> usize {
    let mut count = 0;
    for i in a.arg_ids() {
        for j in a.arg_ids() {
            if a.att_exists(i, j) != b.att_exists(i, j) {
                count += 1;
            }
        }
    }
    count
}

fn build(attacks: &[(usize, usize)], n: usize, e_plus: &[usize]) -> AAFramework {
    let mut af = AAFramework::new();
    for i in 0..n {
        af.add_argument(&format!("a{}", i)).unwrap();
    }
    for &(u, v) in attacks {
        af.add_attack(u, v);
    }
    for &e in e_plus {
        af.add_enforcement(e);
    }
    af
}

#[test]
fn test_strict_admissible_result_is_verified_by_oracle() {
    // a <-> b (mutual attack), c attacks a; enforce {b} strict-admissible.
    let af = build(&[(0, 1), (1, 0), (2, 0)], 3, &[1]);
    let query = Query::read_problem_string("strict", Some("adm")).unwrap();
    let mut af2 = af.clone();
    let result = enforce(&mut af2, query, false).unwrap();

    let target: HashSet<usize> = [1].into_iter().collect();
    assert!(exists_extension_containing(&result.af, &target, is_admissible));
    assert!(is_admissible(&result.af, &target));
}

#[test]
fn test_non_strict_admissible_result_is_verified_by_oracle() {
    let af = build(&[(0, 1), (1, 0), (0, 2)], 3, &[1]);
    let query = Query::read_problem_string("non-strict", Some("adm")).unwrap();
    let mut af2 = af.clone();
    let result = enforce(&mut af2, query, false).unwrap();

    let target: HashSet<usize> = [1].into_iter().collect();
    assert!(exists_extension_containing(&result.af, &target, is_admissible));
}

#[test]
fn test_non_strict_complete_result_is_verified_by_oracle() {
    let af = build(&[(1, 0), (2, 1)], 3, &[0, 2]);
    let query = Query::read_problem_string("non-strict", Some("com")).unwrap();
    let mut af2 = af.clone();
    let result = enforce(&mut af2, query, false).unwrap();

    let target: HashSet<usize> = [0, 2].into_iter().collect();
    assert!(exists_extension_containing(&result.af, &target, is_complete));
}

#[test]
fn test_non_strict_stable_result_is_verified_by_oracle() {
    let af = build(&[(0, 1)], 2, &[1]);
    let query = Query::read_problem_string("non-strict", Some("stb")).unwrap();
    let mut af2 = af.clone();
    let result = enforce(&mut af2, query, false).unwrap();

    let target: HashSet<usize> = [1].into_iter().collect();
    assert!(exists_extension_containing(&result.af, &target, is_stable));
}

/// Minimality: no admissible-preserving AF over the same argument set edits strictly
/// fewer mutable pairs than the solver's answer. Brute force over every possible subset
/// of the (small) mutable-pair edit space.
#[test]
fn test_minimality_no_smaller_edit_achieves_admissible_target() {
    let af = build(&[(0, 1), (1, 0), (0, 2)], 3, &[1]);
    let query = Query::read_problem_string("non-strict", Some("adm")).unwrap();
    let mut af2 = af.clone();
    let result = enforce(&mut af2, query, false).unwrap();
    let achieved_cost = symmetric_difference_size(&af, &result.af) + af.number_of_conflicts();

    let ids: Vec<usize> = af.arg_ids().collect();
    let mutable_pairs: Vec<(usize, usize)> = ids
        .iter()
        .flat_map(|&i| ids.iter().map(move |&j| (i, j)))
        .filter(|&(i, j)| af.is_mutable_pair(i, j))
        .collect();

    let target: HashSet<usize> = [1].into_iter().collect();
    let mut smaller_edit_found = exists_extension_containing(&af, &target, is_admissible) && achieved_cost > 0;
    'outer: for edit_count in 1..achieved_cost {
        for chosen in mutable_pairs.combination(edit_count) {
            let chosen: HashSet<(usize, usize)> = chosen.into_iter().copied().collect();
            let candidate = rebuild_without(&af, &chosen);
            if exists_extension_containing(&candidate, &target, is_admissible) {
                smaller_edit_found = true;
                break 'outer;
            }
        }
    }
    assert!(
        !smaller_edit_found,
        "found a strictly smaller edit achieving the enforcement target"
    );
}

fn rebuild_without(af: &AAFramework, flipped: &HashSet<(usize, usize)>) -> AAFramework {
    let mut out = AAFramework::new();
    for id in af.arg_ids() {
        out.add_argument(af.name(id)).unwrap();
    }
    for i in af.arg_ids() {
        for j in af.arg_ids() {
            let exists = af.att_exists(i, j) ^ flipped.contains(&(i, j));
            if exists {
                out.add_attack(i, j);
            }
        }
    }
    for &e in af.e_plus() {
        out.add_enforcement(e);
    }
    for &e in af.e_minus() {
        out.add_neg_enforcement(e);
    }
    out
}

#[test]
fn test_round_trip_already_enforced_strict_grounded() {
    let af = build(&[(0, 1), (1, 2)], 3, &[0, 2]);
    let query = Query::read_problem_string("strict", None).unwrap();
    let mut af2 = af.clone();
    let result = enforce(&mut af2, query, false).unwrap();
    assert_eq!(0, result.cost);
    assert_eq!(symmetric_difference_size(&af, &result.af), 0);
}

#[test]
fn test_grounded_is_complete_and_admissible_on_small_graphs() {
    // a->b->c->d, disconnected e
    let af = build(&[(0, 1), (1, 2), (2, 3)], 5, &[]);
    let grounded: HashSet<usize> = af_enforce::utils::grounded_extension(&af).into_iter().collect();
    assert!(is_admissible(&af, &grounded));
    assert!(is_complete(&af, &grounded));
}

#[test]
fn test_mode_strum_round_trip() {
    assert_eq!(Mode::Strict, Query::read_problem_string("strict", Some("adm")).unwrap().mode);
    assert_eq!(
        Semantics::Stable,
        Query::read_problem_string("non-strict", Some("stb")).unwrap().semantics.unwrap()
    );
}
