use lazy_static::lazy_static;
use log::warn;
use regex::Regex;

use crate::aa::AAFramework;

lazy_static! {
    static ref ARG_RE: Regex = Regex::new(r"^arg\(([^()]+)\)\.$").unwrap();
    static ref ATT_RE: Regex = Regex::new(r"^att\(([^,()]+),([^,()]+)\)\.$").unwrap();
    static ref ENF_RE: Regex = Regex::new(r"^enf\(([^()]+)\)\.$").unwrap();
    static ref POS_RE: Regex = Regex::new(r"^pos\(([^()]+)\)\.$").unwrap();
    static ref NEG_RE: Regex = Regex::new(r"^neg\(([^()]+)\)\.$").unwrap();
}

fn is_comment(line: &str) -> bool {
    line.starts_with('/') || line.starts_with('%')
}

/// Parses an `.apx` document into an [`AAFramework`] with `E+`/`E-` already populated.
/// Whitespace is stripped before matching; an unparseable non-comment line produces a
/// warning and is skipped rather than aborting the parse.
pub fn parse_apx(text: &str) -> AAFramework {
    let mut af = AAFramework::new();

    // First pass: register every argument so attacks/enforcements can reference them
    // regardless of line order in the source document.
    for raw in text.lines() {
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if line.is_empty() || is_comment(&line) {
            continue;
        }
        if let Some(caps) = ARG_RE.captures(&line) {
            let name = &caps[1];
            if af.add_argument(name).is_err() {
                warn!("duplicate argument declaration ignored: {}", line);
            }
        }
    }

    for raw in text.lines() {
        let line: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if line.is_empty() || is_comment(&line) || ARG_RE.is_match(&line) {
            continue;
        }
        if let Some(caps) = ATT_RE.captures(&line) {
            match (af.id_of(&caps[1]), af.id_of(&caps[2])) {
                (Ok(u), Ok(v)) => af.add_attack(u, v),
                _ => warn!("attack references an unknown argument, skipped: {}", line),
            }
        } else if let Some(caps) = ENF_RE.captures(&line) {
            match af.id_of(&caps[1]) {
                Ok(id) => af.add_enforcement(id),
                Err(_) => warn!("enf() references an unknown argument, skipped: {}", line),
            }
        } else if let Some(caps) = POS_RE.captures(&line) {
            match af.id_of(&caps[1]) {
                Ok(id) => af.add_enforcement(id),
                Err(_) => warn!("pos() references an unknown argument, skipped: {}", line),
            }
        } else if let Some(caps) = NEG_RE.captures(&line) {
            match af.id_of(&caps[1]) {
                Ok(id) => af.add_neg_enforcement(id),
                Err(_) => warn!("neg() references an unknown argument, skipped: {}", line),
            }
        } else {
            warn!("unparseable line, skipped: {}", line);
        }
    }

    af
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_arguments_attacks_and_enforcement() {
        let text = "% comment\narg(a).\narg(b).\natt(a,b).\nenf(a).\n";
        let af = parse_apx(text);
        assert_eq!(2, af.n_args());
        assert_eq!(1, af.attacks().len());
        assert!(af.e_plus().contains(&af.id_of("a").unwrap()));
    }

    #[test]
    fn test_skips_unparseable_lines() {
        let text = "arg(a).\nthis is garbage\n";
        let af = parse_apx(text);
        assert_eq!(1, af.n_args());
    }

    #[test]
    fn test_pos_and_neg_targets() {
        let text = "arg(a).\narg(b).\npos(a).\nneg(b).\n";
        let af = parse_apx(text);
        assert!(af.e_plus().contains(&af.id_of("a").unwrap()));
        assert!(af.e_minus().contains(&af.id_of("b").unwrap()));
    }
}
