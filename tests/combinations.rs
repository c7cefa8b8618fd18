//! Exhaustive coverage of the mode/semantics compatibility matrix from the external
//! interface contract, generated with `paste` so each (mode, semantics) pair gets its
//! own named test function instead of one parameterized loop that reports only the
//! first failure.

use af_enforce::Query;
use paste::paste;

macro_rules! combination_test {
    ($name:ident, $mode:literal, $sem:literal, $expect_ok:expr) => {
        paste! {
            #[test]
            fn [<test_combination_ $name>]() {
                let result = Query::read_problem_string($mode, Some($sem));
                assert_eq!($expect_ok, result.is_ok(), "{} / {}: {:?}", $mode, $sem, result);
            }
        }
    };
}

// Rejected: adm ∧ skept
combination_test!(skept_adm_rejected, "skept", "adm", false);
// Rejected: {sem,stg} ∧ cred
combination_test!(cred_sem_rejected, "cred", "sem", false);
combination_test!(cred_stg_rejected, "cred", "stg", false);
// Rejected: {com,prf,sem,stg} ∧ skept
combination_test!(skept_com_rejected, "skept", "com", false);
combination_test!(skept_prf_rejected, "skept", "prf", false);
combination_test!(skept_sem_rejected, "skept", "sem", false);
combination_test!(skept_stg_rejected, "skept", "stg", false);

// Everything else in the cross product is accepted.
combination_test!(strict_adm_accepted, "strict", "adm", true);
combination_test!(strict_com_accepted, "strict", "com", true);
combination_test!(strict_stb_accepted, "strict", "stb", true);
combination_test!(non_strict_adm_accepted, "non-strict", "adm", true);
combination_test!(non_strict_com_accepted, "non-strict", "com", true);
combination_test!(non_strict_stb_accepted, "non-strict", "stb", true);
combination_test!(non_strict_prf_accepted, "non-strict", "prf", true);
combination_test!(non_strict_sem_accepted, "non-strict", "sem", true);
combination_test!(non_strict_stg_accepted, "non-strict", "stg", true);
combination_test!(cred_adm_accepted, "cred", "adm", true);
combination_test!(cred_com_accepted, "cred", "com", true);
combination_test!(cred_stb_accepted, "cred", "stb", true);
combination_test!(skept_stb_accepted, "skept", "stb", true);

#[test]
fn test_unknown_mode_token_rejected() {
    assert!(Query::read_problem_string("bogus", Some("adm")).is_err());
}

#[test]
fn test_unknown_semantics_token_rejected() {
    assert!(Query::read_problem_string("strict", Some("bogus")).is_err());
}

#[test]
fn test_grounded_only_omits_semantics_for_every_mode() {
    assert!(Query::read_problem_string("strict", None).is_ok());
    assert!(Query::read_problem_string("non-strict", None).is_ok());
}
