//! Thin CLI entry point: delegates argument parsing and the whole pipeline to
//! [`af_enforce::app`], translating a returned error into the exit-code contract from
//! the external interface (0 normal, 1 argument or IO error).

use af_enforce::app;

fn main() {
    if let Err(e) = app::run(std::env::args_os()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
