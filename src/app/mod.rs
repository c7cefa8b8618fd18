//! The command-line surface: argument parsing, logging setup, and the glue between a
//! parsed invocation and the library's [`enforce`](crate::enforce)/[`build_clauses`]
//! entry points. Kept thin and out of the library crate on purpose — everything here
//! is wiring, not enforcement logic.

mod logging;

use std::fs::File;
use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::{App, Arg, ArgMatches};

use crate::aa::Query;
use crate::io::{parse_apx, write_lp, write_normal, write_wcnf};
use crate::utils::grounded_extension;
use crate::{build_clauses, enforce};

const ARG_INPUT: &str = "INPUT";
const ARG_MODE: &str = "MODE";
const ARG_SEMANTICS: &str = "SEMANTICS";
const ARG_VERSION: &str = "VERSION";
const ARG_CEGAR: &str = "CEGAR";
const ARG_GROUNDED_ONLY: &str = "GROUNDED_ONLY";
const ARG_OUTPUT_FILE: &str = "OUTPUT_FILE";
const ARG_DUMP_STDOUT: &str = "DUMP_STDOUT";
const ARG_FORMAT: &str = "FORMAT";

pub fn build_cli() -> App<'static, 'static> {
    App::new("af-enforce")
        .about("Computes a minimally-edited argumentation framework satisfying an enforcement request")
        .setting(clap::AppSettings::DisableVersion)
        .arg(Arg::with_name(ARG_VERSION).short("v").long("version").help("print the version and exit"))
        .arg(Arg::with_name(ARG_CEGAR).short("c").help("force the CEGAR pipeline even where a direct encoding exists"))
        .arg(Arg::with_name(ARG_GROUNDED_ONLY).short("g").help("print the grounded extension of the input AF and exit"))
        .arg(
            Arg::with_name(ARG_OUTPUT_FILE)
                .short("o")
                .takes_value(true)
                .value_name("FILE")
                .help("emit the clause encoding to FILE and exit"),
        )
        .arg(Arg::with_name(ARG_DUMP_STDOUT).short("s").help("emit the clause encoding to stdout and exit"))
        .arg(
            Arg::with_name(ARG_FORMAT)
                .short("t")
                .takes_value(true)
                .possible_values(&["wcnf", "lp"])
                .default_value("wcnf")
                .help("clause encoding format"),
        )
        .arg(Arg::with_name(ARG_INPUT).required(true).index(1).help("path to an .apx input file"))
        .arg(
            Arg::with_name(ARG_MODE)
                .required(true)
                .index(2)
                .possible_values(&["strict", "non-strict", "cred", "skept"])
                .help("enforcement mode"),
        )
        .arg(
            Arg::with_name(ARG_SEMANTICS)
                .index(3)
                .possible_values(&["adm", "com", "stb", "prf", "sem", "stg"])
                .help("semantics (omit only with -g)"),
        )
}

/// Parses `args`, overriding the `-v`/`-V` handling with the exact contract from the
/// CLI surface: `-v` alone prints the version and exits before anything else runs.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = match build_cli().get_matches_from_safe(args) {
        Ok(m) => m,
        Err(e)
            if matches!(
                e.kind,
                clap::ErrorKind::HelpDisplayed | clap::ErrorKind::VersionDisplayed
            ) =>
        {
            print!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e).context("while parsing arguments"),
    };

    if matches.is_present(ARG_VERSION) {
        println!("af-enforce {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(0);

    execute(&matches)
}

fn execute(matches: &ArgMatches) -> Result<()> {
    let input_path = matches.value_of(ARG_INPUT).expect("required by clap");
    let text = std::fs::read_to_string(input_path)
        .with_context(|| format!("could not read input file \"{}\"", input_path))?;
    let mut af = parse_apx(&text);

    if matches.is_present(ARG_GROUNDED_ONLY) {
        let ext = grounded_extension(&af);
        let mut names: Vec<&str> = ext.iter().map(|&id| af.name(id)).collect();
        names.sort_unstable();
        println!("{{{}}}", names.join(","));
        return Ok(());
    }

    let mode = matches.value_of(ARG_MODE).expect("required by clap");
    let semantics = matches.value_of(ARG_SEMANTICS);
    let query = Query::read_problem_string(mode, semantics).context("invalid mode/semantics combination")?;
    let force_cegar = matches.is_present(ARG_CEGAR);

    if matches.is_present(ARG_OUTPUT_FILE) || matches.is_present(ARG_DUMP_STDOUT) {
        let (hard, soft) = build_clauses(&mut af, query, force_cegar)?;
        let format = matches.value_of(ARG_FORMAT).unwrap_or("wcnf");
        let mut buf: Vec<u8> = Vec::new();
        match format {
            "lp" => write_lp(&hard, &soft, af.vars.n_vars(), &mut buf)?,
            _ => {
                let top = crate::encodings::objective::top_weight(&af);
                write_wcnf(&hard, &soft, af.vars.n_vars(), top, &mut buf)?;
            }
        }
        if let Some(path) = matches.value_of(ARG_OUTPUT_FILE) {
            File::create(path)
                .with_context(|| format!("could not create output file \"{}\"", path))?
                .write_all(&buf)?;
        } else {
            std::io::stdout().write_all(&buf)?;
        }
        return Ok(());
    }

    match enforce(&mut af, query, force_cegar) {
        Ok(result) => {
            let cost = result.cost + af.number_of_conflicts();
            write_normal(&result.af, cost, &mut std::io::stdout())?;
            Ok(())
        }
        Err(crate::AfError::Infeasible) => {
            write_normal(&crate::AAFramework::new(), 0, &mut std::io::stdout())?;
            bail!("the enforcement request is infeasible");
        }
        Err(e) => bail!(e),
    }
}
