use std::str::FromStr;
use strum_macros::{AsRefStr, EnumString};

use super::AfError;

/// The acceptability semantics an enforcement request is stated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
pub enum Semantics {
    /// Admissible.
    #[strum(serialize = "adm")]
    Admissible,
    /// Complete.
    #[strum(serialize = "com")]
    Complete,
    /// Stable.
    #[strum(serialize = "stb")]
    Stable,
    /// Preferred.
    #[strum(serialize = "prf")]
    Preferred,
    /// Semi-stable.
    #[strum(serialize = "sem")]
    SemiStable,
    /// Stage.
    #[strum(serialize = "stg")]
    Stage,
    /// Grounded. Only meaningful together with [`Mode`] strict/non-strict extension
    /// enforcement; there is no credulous/skeptical status variant of it in this system.
    #[strum(serialize = "grd")]
    Grounded,
}

/// The flavor of enforcement being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString)]
pub enum Mode {
    /// The enforced set must equal the chosen extension exactly.
    #[strum(serialize = "strict")]
    Strict,
    /// The enforced set must be contained in some valid extension.
    #[strum(serialize = "non-strict")]
    NonStrict,
    /// Credulous status enforcement: `E+` must be credulously accepted.
    #[strum(serialize = "cred")]
    Credulous,
    /// Skeptical status enforcement: every member of `E+` must be skeptically accepted
    /// and every member of `E-` must not be.
    #[strum(serialize = "skept")]
    Skeptical,
}

/// A query combining a [`Mode`] and an optional [`Semantics`], as read from the CLI
/// positional arguments.
#[derive(Debug, Clone, Copy)]
pub struct Query {
    pub mode: Mode,
    pub semantics: Option<Semantics>,
}

impl Query {
    /// Parses `mode` and an optional `semantics` token, checking the combination against
    /// the rejection table from the external interface contract:
    /// `adm ∧ skept`, `{sem,stg} ∧ cred`, `{com,prf,sem,stg} ∧ skept`.
    pub fn read_problem_string(mode: &str, semantics: Option<&str>) -> Result<Self, AfError> {
        let mode = Mode::from_str(mode)
            .map_err(|_| AfError::InvalidCombination {
                mode: mode.to_string(),
                semantics: semantics.unwrap_or("").to_string(),
            })?;
        let semantics = semantics
            .map(Semantics::from_str)
            .transpose()
            .map_err(|_| AfError::InvalidCombination {
                mode: mode.as_ref().to_string(),
                semantics: semantics.unwrap_or("").to_string(),
            })?;
        let query = Query { mode, semantics };
        query.check_combination()?;
        Ok(query)
    }

    fn check_combination(&self) -> Result<(), AfError> {
        let invalid = match (self.mode, self.semantics) {
            (Mode::Skeptical, Some(Semantics::Admissible)) => true,
            (Mode::Credulous, Some(Semantics::SemiStable | Semantics::Stage)) => true,
            (
                Mode::Skeptical,
                Some(Semantics::Complete | Semantics::Preferred | Semantics::SemiStable | Semantics::Stage),
            ) => true,
            _ => false,
        };
        if invalid {
            return Err(AfError::InvalidCombination {
                mode: self.mode.as_ref().to_string(),
                semantics: self
                    .semantics
                    .map(|s| s.as_ref().to_string())
                    .unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_combination() {
        let q = Query::read_problem_string("strict", Some("adm")).unwrap();
        assert_eq!(Mode::Strict, q.mode);
        assert_eq!(Some(Semantics::Admissible), q.semantics);
    }

    #[test]
    fn test_reject_adm_skept() {
        assert!(Query::read_problem_string("skept", Some("adm")).is_err());
    }

    #[test]
    fn test_reject_stage_cred() {
        assert!(Query::read_problem_string("cred", Some("stg")).is_err());
    }

    #[test]
    fn test_reject_com_skept() {
        assert!(Query::read_problem_string("skept", Some("com")).is_err());
    }

    #[test]
    fn test_grounded_only_mode() {
        let q = Query::read_problem_string("strict", None).unwrap();
        assert!(q.semantics.is_none());
    }
}
