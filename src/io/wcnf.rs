use std::io::{self, Write};

use crate::sat::Clause;

/// Writes the weighted-CNF translation of a hard/soft clause pool: a `p wcnf` header
/// followed by one line per clause, hard clauses carrying `top` as their weight and
/// soft clauses carrying weight 1.
pub fn write_wcnf(
    hard: &[Clause],
    soft: &[Clause],
    n_vars: usize,
    top: i64,
    out: &mut dyn Write,
) -> io::Result<()> {
    writeln!(out, "p wcnf {} {} {}", n_vars, hard.len() + soft.len(), top)?;
    for c in hard {
        write_clause_line(out, top, c)?;
    }
    for c in soft {
        write_clause_line(out, 1, c)?;
    }
    Ok(())
}

fn write_clause_line(out: &mut dyn Write, weight: i64, clause: &Clause) -> io::Result<()> {
    write!(out, "{}", weight)?;
    for lit in clause {
        write!(out, " {}", lit.as_i64())?;
    }
    writeln!(out, " 0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause;
    use crate::sat::{Literal, Variable};

    #[test]
    fn test_header_and_lines() {
        let v1 = Variable::new(1);
        let v2 = Variable::new(2);
        let hard = vec![clause![v1, Literal::negative(v2)]];
        let soft = vec![clause![v2]];
        let mut buf = Vec::new();
        write_wcnf(&hard, &soft, 2, 5, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!("p wcnf 2 2 5", lines.next().unwrap());
        assert_eq!("5 1 -2 0", lines.next().unwrap());
        assert_eq!("1 2 0", lines.next().unwrap());
    }
}
