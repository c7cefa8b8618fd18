use std::io::{self, Write};

use crate::sat::Clause;

/// Writes the 0/1-ILP translation of a hard+soft clause pool: one binary variable `x_v`
/// per SAT variable, one slack variable `b_i` per clause (hard clauses first, then soft,
/// in that order), objective `minimize sum(b_i)`, and per-clause constraint
/// `sum(x_l) - sum(x_not_l) + b_i >= 1 - negated_count`. Plain LP has no separate notion
/// of "hard" — every clause gets the same slack-and-constraint treatment, matching the
/// spec's "one constraint per clause" translation.
pub fn write_lp(hard: &[Clause], soft: &[Clause], n_vars: usize, out: &mut dyn Write) -> io::Result<()> {
    let n_clauses = hard.len() + soft.len();
    writeln!(out, "Minimize")?;
    let obj: Vec<String> = (0..n_clauses).map(|i| format!("b{}", i)).collect();
    writeln!(out, "obj: {}", obj.join(" + "))?;

    writeln!(out, "Subject To")?;
    for (i, clause) in hard.iter().chain(soft.iter()).enumerate() {
        let mut negated_count = 0i64;
        let mut terms = Vec::new();
        for lit in clause {
            if lit.is_positive() {
                terms.push(format!("+ x{}", lit.var().index()));
            } else {
                terms.push(format!("- x{}", lit.var().index()));
                negated_count += 1;
            }
        }
        terms.push(format!("+ b{}", i));
        writeln!(out, "c{}: {} >= {}", i, terms.join(" "), 1 - negated_count)?;
    }

    writeln!(out, "Bounds")?;
    for v in 1..=n_vars {
        writeln!(out, "0 <= x{} <= 1", v)?;
    }
    for i in 0..n_clauses {
        writeln!(out, "0 <= b{} <= 1", i)?;
    }

    writeln!(out, "End")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;
    use crate::sat::{Literal, Variable};

    #[test]
    fn test_emits_objective_and_constraint() {
        let v1 = Variable::new(1);
        let v2 = Variable::new(2);
        let hard = vec![clause![v1, Literal::negative(v2)]];
        let soft: Vec<Clause> = Vec::new();
        let mut buf = Vec::new();
        write_lp(&hard, &soft, 2, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("obj: b0"));
        assert!(text.contains("c0: + x1 - x2 + b0 >= 0"));
        assert!(text.contains("0 <= x1 <= 1"));
        assert!(text.contains("0 <= b0 <= 1"));
    }
}
