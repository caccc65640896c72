use crate::io::error::Error;
use crate::model::atom::Atom;
use std::io::Write;

/// Writes a standard XYZ block: count, comment, then one line per atom.
pub fn write<W: Write>(mut writer: W, atoms: &[Atom], comment: &str) -> Result<(), Error> {
    writeln!(writer, "{}", atoms.len())?;
    writeln!(writer, "{}", comment.lines().next().unwrap_or(""))?;
    for atom in atoms {
        writeln!(
            writer,
            "{:<3}{:>16.10}{:>16.10}{:>16.10}",
            atom.element.symbol(),
            atom.position[0],
            atom.position[1],
            atom.position[2]
        )?;
    }
    Ok(())
}
