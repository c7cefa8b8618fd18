use std::io::{self, Write};

use crate::aa::AAFramework;

/// Writes the human-readable normal-mode output: a one-line change count followed by
/// every argument and every attack of the resulting framework, in insertion order.
pub fn write_normal(af: &AAFramework, cost: usize, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "% {} change(s)", cost)?;
    for id in af.arg_ids() {
        writeln!(out, "arg({}).", af.name(id))?;
    }
    for (u, v) in af.attacks() {
        writeln!(out, "att({},{}).", af.name(u), af.name(v))?;
    }
    Ok(())
}
