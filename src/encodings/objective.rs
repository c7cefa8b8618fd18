use crate::aa::AAFramework;
use crate::clause;
use crate::sat::{Clause, Literal};

/// One unit soft clause per mutable attack pair, polarity chosen so that falsifying it
/// corresponds to an edit: `{+att(i,j)}` if the attack exists in the input (falsified by
/// deleting it), `{-att(i,j)}` otherwise (falsified by adding it). Intra-`E+` attacks
/// are excluded — they are pre-removed conflicts counted by
/// [`AAFramework::number_of_conflicts`](crate::aa::AAFramework::number_of_conflicts),
/// never represented as variables.
pub fn soft_clauses(af: &AAFramework) -> Vec<Clause> {
    let mut clauses = Vec::new();
    let ids: Vec<usize> = af.arg_ids().collect();
    for &i in &ids {
        for &j in &ids {
            if !af.is_mutable_pair(i, j) {
                continue;
            }
            let Some(var) = af.vars.att_var((i, j)) else {
                continue;
            };
            let lit = Literal::positive(var.into());
            if af.att_exists(i, j) {
                clauses.push(clause![lit]);
            } else {
                clauses.push(clause![lit.negate()]);
            }
        }
    }
    clauses
}

/// `top = n·n − |E+|·|E+| + 1`, the "effectively infinite" weight for a solver that
/// demands one, computed once the AF and its enforcement set are known.
pub fn top_weight(af: &AAFramework) -> i64 {
    let n = af.n_args() as i64;
    let e = af.e_plus().len() as i64;
    n * n - e * e + 1
}
