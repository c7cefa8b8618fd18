use std::collections::{BTreeSet, HashMap};

use super::semantics::{Mode, Semantics};
use super::vars::VariableTables;
use super::AfError;

/// The argumentation framework store: arguments, attacks, the enforced sets `E+`/`E-`,
/// and the Boolean-variable tables allocated on top of them once a (mode, semantics)
/// pair is known.
///
/// Arguments are identified internally by a dense `usize` id assigned in insertion
/// order, starting at 0. Everything else in this crate addresses arguments by id;
/// names only matter at the `.apx` parsing / output boundary.
#[derive(Debug, Clone)]
pub struct AAFramework {
    names: Vec<String>,
    name_to_id: HashMap<String, usize>,
    att_exists: Vec<Vec<bool>>,
    attackers: Vec<Vec<usize>>,
    attacked: Vec<Vec<usize>>,
    attacks: Vec<(usize, usize)>,
    e_plus: BTreeSet<usize>,
    e_minus: BTreeSet<usize>,
    in_range: Vec<bool>,
    pub vars: VariableTables,
}

impl AAFramework {
    pub fn new() -> Self {
        AAFramework {
            names: Vec::new(),
            name_to_id: HashMap::new(),
            att_exists: Vec::new(),
            attackers: Vec::new(),
            attacked: Vec::new(),
            attacks: Vec::new(),
            e_plus: BTreeSet::new(),
            e_minus: BTreeSet::new(),
            in_range: Vec::new(),
            vars: VariableTables::new(),
        }
    }

    pub fn n_args(&self) -> usize {
        self.names.len()
    }

    pub fn name(&self, id: usize) -> &str {
        &self.names[id]
    }

    pub fn id_of(&self, name: &str) -> Result<usize, AfError> {
        self.name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| AfError::UnknownArgument(name.to_string()))
    }

    pub fn arg_ids(&self) -> impl Iterator<Item = usize> {
        0..self.names.len()
    }

    pub fn attackers(&self, target: usize) -> &[usize] {
        &self.attackers[target]
    }

    pub fn attacked(&self, source: usize) -> &[usize] {
        &self.attacked[source]
    }

    pub fn attacks(&self) -> &[(usize, usize)] {
        &self.attacks
    }

    pub fn att_exists(&self, u: usize, v: usize) -> bool {
        self.att_exists[u][v]
    }

    pub fn e_plus(&self) -> &BTreeSet<usize> {
        &self.e_plus
    }

    pub fn e_minus(&self) -> &BTreeSet<usize> {
        &self.e_minus
    }

    pub fn in_range(&self, id: usize) -> bool {
        self.in_range[id]
    }

    /// Both endpoints enforced: no `attVar` is ever allocated for such a pair, in any
    /// mode, because an attack between two positively enforced arguments can never be
    /// edited away without contradicting the enforcement request.
    pub fn is_mutable_pair(&self, u: usize, v: usize) -> bool {
        !(self.e_plus.contains(&u) && self.e_plus.contains(&v))
    }

    /// Appends a fresh argument, growing every per-argument index. Rejects a name
    /// already present rather than silently overwriting the name/id map and leaving a
    /// dangling first id.
    pub fn add_argument(&mut self, name: &str) -> Result<usize, AfError> {
        if self.name_to_id.contains_key(name) {
            return Err(AfError::DuplicateArgument(name.to_string()));
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.name_to_id.insert(name.to_string(), id);
        self.attackers.push(Vec::new());
        self.attacked.push(Vec::new());
        self.in_range.push(false);
        for row in self.att_exists.iter_mut() {
            row.push(false);
        }
        self.att_exists.push(vec![false; self.names.len()]);
        Ok(id)
    }

    /// Duplicate attacks are silently idempotent.
    pub fn add_attack(&mut self, u: usize, v: usize) {
        if self.att_exists[u][v] {
            return;
        }
        self.att_exists[u][v] = true;
        self.attackers[v].push(u);
        self.attacked[u].push(v);
        self.attacks.push((u, v));
    }

    /// Adds `x` to `E+`, marking `x` and every argument `x` attacks as `in_range`.
    pub fn add_enforcement(&mut self, x: usize) {
        self.e_plus.insert(x);
        self.in_range[x] = true;
        for &y in self.attacked[x].clone().iter() {
            self.in_range[y] = true;
        }
    }

    pub fn add_neg_enforcement(&mut self, x: usize) {
        self.e_minus.insert(x);
    }

    /// Counts attacks whose endpoints both lie in `E+` — edits that are unavoidable
    /// under strict enforcement and that never get an `attVar`.
    pub fn number_of_conflicts(&self) -> usize {
        self.attacks
            .iter()
            .filter(|(u, v)| self.e_plus.contains(u) && self.e_plus.contains(v))
            .count()
    }

    /// Populates the variable tables for extension enforcement (strict / non-strict
    /// mode) per the allocation matrix. `cegar` selects the weaker, CEGAR-relaxation
    /// variable set for the modes where a direct encoding does not exist.
    pub fn initialize(&mut self, mode: Mode, semantics: Semantics, cegar: bool) -> Result<(), AfError> {
        match (mode, semantics, cegar) {
            (Mode::Strict, Semantics::Admissible | Semantics::Complete, false) => {
                self.alloc_att_var_all_mutable();
            }
            (Mode::NonStrict, Semantics::Stable, false) => {
                self.alloc_arg_var_non_enforced();
                self.alloc_att_var_all_mutable();
                self.alloc_attack_var_non_enforced();
            }
            (Mode::NonStrict, Semantics::Admissible | Semantics::Complete, false) => {
                self.alloc_arg_var_non_enforced();
                self.alloc_att_var_all_mutable();
                self.alloc_attack_var_non_enforced();
                self.alloc_attacked_var_non_enforced();
            }
            (Mode::NonStrict, Semantics::SemiStable, _) => {
                self.alloc_arg_var_non_enforced();
                self.alloc_att_var_all_mutable();
                self.alloc_attack_var_non_enforced();
                self.alloc_attacked_var_non_enforced();
                self.alloc_range_var_non_enforced();
            }
            (Mode::NonStrict, Semantics::Stage, _) => {
                self.alloc_arg_var_non_enforced();
                self.alloc_att_var_all_mutable();
                self.alloc_attack_var_non_enforced();
                self.alloc_range_var_non_enforced();
            }
            (Mode::Strict, Semantics::Grounded, false) => {
                self.alloc_att_var_all_mutable();
                let levels = self.e_plus.len().max(1);
                self.alloc_levels(self.e_plus.iter().copied().collect(), levels);
            }
            (Mode::NonStrict, Semantics::Grounded, false) => {
                self.alloc_att_var_all_mutable();
                let levels = (self.n_args() + 1) / 2;
                let all: Vec<usize> = self.arg_ids().collect();
                self.alloc_levels(all, levels.max(1));
            }
            (Mode::NonStrict, Semantics::Admissible | Semantics::Complete, true) => {
                self.alloc_arg_var_non_enforced();
                self.alloc_att_var_all_mutable();
                self.alloc_attacked_var_non_enforced();
                self.alloc_attack_var_non_enforced();
                let targets: Vec<usize> = self.e_plus.iter().copied().collect();
                self.alloc_levels(targets, 1);
            }
            (Mode::Strict, Semantics::Complete, true) => {
                self.alloc_att_var_all_mutable();
                self.alloc_attack_var_non_enforced();
                let targets: Vec<usize> = self.e_plus.iter().copied().collect();
                self.alloc_levels(targets, 1);
            }
            (Mode::NonStrict, Semantics::Preferred | Semantics::SemiStable | Semantics::Stage, _) => {
                // No direct encoding exists for these; the CEGAR relaxation reuses the
                // admissible non-strict variable set as its weaker abstraction.
                self.alloc_arg_var_non_enforced();
                self.alloc_att_var_all_mutable();
                self.alloc_attacked_var_non_enforced();
                self.alloc_attack_var_non_enforced();
                let targets: Vec<usize> = self.e_plus.iter().copied().collect();
                self.alloc_levels(targets, 1);
            }
            _ => {
                return Err(AfError::InvalidCombination {
                    mode: mode.as_ref().to_string(),
                    semantics: semantics.as_ref().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Populates the credulous status witness tables for each target in `E+`, plus the
    /// `attVar` table the rebuilt output AF and the edit-distance objective both read
    /// from.
    pub fn initialize_credulous(&mut self) {
        self.alloc_att_var_all_mutable();
        for &t in self.e_plus.clone().iter() {
            for x in self.arg_ids() {
                if !self.e_minus.contains(&x) {
                    self.vars.status_arg_var_or_insert((t, x));
                }
            }
            for &j in self.e_minus.iter() {
                for &k in self.attackers(j) {
                    self.vars.status_att_var_or_insert((t, (k, j)));
                }
            }
            for j in self.arg_ids() {
                if self.e_minus.contains(&j) {
                    continue;
                }
                for &k in self.attackers(j) {
                    if !self.e_minus.contains(&k) {
                        self.vars.status_att_var_or_insert((t, (k, j)));
                    }
                }
            }
        }
    }

    /// Populates the per-negatively-enforced-argument witness tables read by
    /// `encodings::status::skeptical_relaxation_clauses`, the CEGAR relaxation's hard
    /// clauses when `E-` is non-empty: one witness per member of `E-`, keyed by that
    /// argument, which the witness itself is never allowed to join (see that function's
    /// doc comment). Also allocates `attVar`, which the rebuilt output AF and the
    /// edit-distance objective both read from.
    pub fn initialize_skeptical(&mut self) {
        self.alloc_att_var_all_mutable();
        for &neg in self.e_minus.clone().iter() {
            for x in self.arg_ids() {
                if x != neg && !self.e_plus.contains(&x) {
                    self.vars.status_arg_var_or_insert((neg, x));
                }
            }
            for j in self.arg_ids() {
                if self.e_plus.contains(&j) {
                    continue;
                }
                for &k in self.attackers(j).to_vec().iter() {
                    if k == neg || self.e_plus.contains(&k) {
                        continue;
                    }
                    self.vars.status_att_var_or_insert((neg, (k, j)));
                }
            }
        }
    }

    fn alloc_att_var_all_mutable(&mut self) {
        let ids: Vec<usize> = self.arg_ids().collect();
        for &i in &ids {
            for &j in &ids {
                if self.is_mutable_pair(i, j) {
                    self.vars.att_var_or_insert((i, j));
                }
            }
        }
    }

    fn alloc_arg_var_non_enforced(&mut self) {
        for x in self.arg_ids() {
            if !self.e_plus.contains(&x) {
                self.vars.arg_var_or_insert(x);
            }
        }
    }

    fn alloc_attack_var_non_enforced(&mut self) {
        let ids: Vec<usize> = self.arg_ids().filter(|x| !self.e_plus.contains(x)).collect();
        for &i in &ids {
            for &j in &ids {
                self.vars.attack_var_or_insert((i, j));
            }
        }
    }

    fn alloc_attacked_var_non_enforced(&mut self) {
        let ids: Vec<usize> = self.arg_ids().filter(|x| !self.e_plus.contains(x)).collect();
        for &i in &ids {
            for &j in &ids {
                self.vars.attacked_var_or_insert((i, j));
            }
        }
    }

    fn alloc_range_var_non_enforced(&mut self) {
        for x in self.arg_ids() {
            if !self.e_plus.contains(&x) {
                self.vars.range_var_or_insert(x);
            }
        }
    }

    /// Allocates `level_var`/`level_attack_var`/`level_not_defended_var` for levels
    /// `1..=levels` over `targets`, walking real attacker lists so the table stays
    /// bounded by the actual graph rather than by `n^2` per level.
    fn alloc_levels(&mut self, targets: Vec<usize>, levels: usize) {
        for &i in &targets {
            self.vars.level_var_or_insert((1, i));
        }
        for n in 2..=levels {
            for &i in &targets {
                self.vars.level_var_or_insert((n, i));
                for &j in self.attackers(i).to_vec().iter() {
                    if self.e_plus.contains(&j) {
                        continue;
                    }
                    self.vars
                        .level_not_defended_var_or_insert((n - 1, (j, i)));
                    for &k in self.attackers(j).to_vec().iter() {
                        if targets.contains(&k) {
                            self.vars.level_attack_var_or_insert((n - 1, (k, j)));
                        }
                    }
                }
            }
        }
    }
}

impl Default for AAFramework {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aa::semantics::{Mode, Semantics};

    fn abc() -> AAFramework {
        let mut af = AAFramework::new();
        af.add_argument("a").unwrap();
        af.add_argument("b").unwrap();
        af.add_argument("c").unwrap();
        af
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let mut af = abc();
        assert!(matches!(
            af.add_argument("a"),
            Err(AfError::DuplicateArgument(_))
        ));
    }

    #[test]
    fn test_add_attack_builds_indices() {
        let mut af = abc();
        af.add_attack(0, 1);
        af.add_attack(0, 1);
        assert_eq!(vec![(0usize, 1usize)], af.attacks().to_vec());
        assert_eq!(&[0usize][..], af.attackers(1));
        assert_eq!(&[1usize][..], af.attacked(0));
        assert!(af.att_exists(0, 1));
        assert!(!af.att_exists(1, 0));
    }

    #[test]
    fn test_enforcement_marks_in_range() {
        let mut af = abc();
        af.add_attack(0, 1);
        af.add_enforcement(0);
        assert!(af.in_range(0));
        assert!(af.in_range(1));
        assert!(!af.in_range(2));
        assert!(af.e_plus().contains(&0));
    }

    #[test]
    fn test_number_of_conflicts() {
        let mut af = abc();
        af.add_attack(0, 1);
        af.add_enforcement(0);
        af.add_enforcement(1);
        assert_eq!(1, af.number_of_conflicts());
    }

    #[test]
    fn test_mutable_pair_excludes_both_enforced() {
        let mut af = abc();
        af.add_enforcement(0);
        af.add_enforcement(1);
        assert!(!af.is_mutable_pair(0, 1));
        assert!(af.is_mutable_pair(0, 2));
    }

    #[test]
    fn test_initialize_strict_admissible_allocates_att_var_only() {
        let mut af = abc();
        af.add_enforcement(0);
        af.add_enforcement(1);
        af.initialize(Mode::Strict, Semantics::Admissible, false).unwrap();
        assert!(af.vars.att_var((0, 2)).is_some());
        assert!(af.vars.att_var((2, 0)).is_some());
        // both endpoints enforced: never gets an attVar, by construction.
        assert!(af.vars.att_var((0, 1)).is_none());
        assert!(af.vars.arg_var(2).is_none());
    }

    #[test]
    fn test_initialize_non_strict_stage_allocates_range_var() {
        let mut af = abc();
        af.add_enforcement(0);
        af.initialize(Mode::NonStrict, Semantics::Stage, false).unwrap();
        assert!(af.vars.range_var(1).is_some());
        assert!(af.vars.arg_var(1).is_some());
    }
}
