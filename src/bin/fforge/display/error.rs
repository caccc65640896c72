use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = collect_hints(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// Hints for the first typed error found in the cause chain.
fn collect_hints(err: &Error) -> Vec<String> {
    for cause in err.chain() {
        if let Some(build_err) = cause.downcast_ref::<fermi_forge::Error>() {
            return build_hints(build_err);
        }
        if let Some(io_err) = cause.downcast_ref::<fermi_forge::io::Error>() {
            return io_hints(io_err);
        }
        if let Some(toml_err) = cause.downcast_ref::<toml::de::Error>() {
            let mut hints = Vec::new();
            if let Some(span) = toml_err.span() {
                hints.push(format!("Recipe is malformed near byte {}", span.start));
            }
            hints.push("Recipes need a [model] table with a 'kind' key".to_string());
            hints.push("Valid kinds: hubbard, dwave, jellium, ring, lattice, atom".to_string());
            return hints;
        }
        if let Some(std_err) = cause.downcast_ref::<std::io::Error>() {
            return std_io_hints(std_err);
        }
    }
    Vec::new()
}

fn build_hints(err: &fermi_forge::Error) -> Vec<String> {
    use fermi_forge::Error as E;

    let hints: Vec<String> = match err {
        E::InvalidLattice { .. } => vec![
            "Both -x and -y must be at least 1".into(),
        ],
        E::InvalidGrid(_) => vec![
            "Grids need --dimensions ≥ 1, --length ≥ 1 and a positive --scale".into(),
        ],
        E::InvalidDimension(_) => vec!["The Wigner-Seitz radius needs a positive dimension".into()],
        E::InvalidGeometry { expected, .. } => vec![
            format!("Each --nucleus needs exactly {expected} comma-separated coordinates"),
            "Coordinates match the grid dimensionality, e.g. H:0.1,0.2 in 2D".into(),
        ],
        E::ConstantWithGeometry => vec![
            "The Madelung constant only applies to uniform jellium".into(),
            "Drop --constant when placing nuclei".into(),
        ],
        E::UnsupportedElement(element) => vec![
            format!("No ground-state spin is tabulated for {element}"),
            "Single atoms are supported up to Kr".into(),
        ],
        E::InvalidMultiplicity(_) => vec!["Multiplicity must lie between 1 (singlet) and 12".into()],
        E::InvalidCharge { protons, .. } => vec![format!("The charge may be at most {protons}")],
        E::InvalidRing(_) => vec!["Rings need --atoms 2 or more".into()],
        E::InvalidLatticeShape => vec![
            "Give at least one of --nx, --ny, --nz a value above 1".into(),
            "Use 'fforge molecule atom' for a single atom".into(),
        ],
        E::CoincidentNuclei { .. } => vec![
            "Two atoms share a position".into(),
            "Check the spacing or the geometry file for duplicates".into(),
        ],
        E::MissingIntegrals | E::IntegralShape(_) | E::EmptyActiveSpace | E::OrbitalIndex { .. } => vec![
            "Molecular integrals must be supplied before building Hamiltonians".into(),
        ],
        E::Io(io_err) => return io_hints(io_err),
    };
    hints
}

fn io_hints(err: &fermi_forge::io::Error) -> Vec<String> {
    use fermi_forge::io::Error as E;

    match err {
        E::Io { source } => std_io_hints(source),
        E::Parse { format, line, .. } => vec![
            format!("{format} parser stopped near line {line}"),
            "Each atom line reads 'Symbol x y z' with coordinates in Å".into(),
            "Blank lines and lines starting with # are skipped".into(),
        ],
        E::Json { .. } => vec![
            "The JSON document does not describe molecular data".into(),
            "Regenerate the file with 'fforge molecule'".into(),
        ],
    }
}

fn std_io_hints(source: &std::io::Error) -> Vec<String> {
    use std::io::ErrorKind;

    let hints: &[&str] = match source.kind() {
        ErrorKind::NotFound => &[
            "File or directory not found",
            "Check the path spelling and ensure the file exists",
        ],
        ErrorKind::PermissionDenied => &[
            "Permission denied accessing the file",
            "Check file permissions with `ls -la`",
        ],
        ErrorKind::BrokenPipe => &[
            "Output consumer terminated early",
            "This may occur when piping to commands like `head`",
        ],
        ErrorKind::WriteZero => &["Failed to write data (disk full?)"],
        _ => &["Check file path, permissions, and disk space"],
    };
    hints.iter().map(|h| h.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn hints_follow_the_cause_chain() {
        let err = Err::<(), _>(fermi_forge::Error::InvalidRing(1))
            .context("Failed to build atomic ring")
            .unwrap_err();
        assert_eq!(collect_hints(&err), vec!["Rings need --atoms 2 or more".to_string()]);
    }

    #[test]
    fn wrapped_io_errors_get_io_hints() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::new(fermi_forge::Error::Io(source.into()));
        let hints = collect_hints(&err);
        assert_eq!(hints[0], "File or directory not found");
    }

    #[test]
    fn untyped_errors_have_no_hints() {
        assert!(collect_hints(&anyhow::anyhow!("something else")).is_empty());
    }
}
