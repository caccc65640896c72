mod jellium;
mod lattice;
mod molecule;
mod run;

use std::io::Write;

use anyhow::{Context, Result};

use fermi_forge::hamiltonians::MolecularData;
use fermi_forge::io::{Format, json, xyz};
use fermi_forge::{FermionOperator, QubitOperator, jordan_wigner};

use crate::cli::{Command, MoleculeFormat, OutputOptions};
use crate::config::Encoding;
use crate::display::{
    Context as DisplayContext, Progress, print_fermion_summary, print_molecule_summary,
    print_qubit_summary,
};
use crate::io::{create_output, infer_molecule_format};

pub fn dispatch(command: Command, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Hubbard(args) => lattice::run_hubbard(args, ctx),
        Command::Dwave(args) => lattice::run_dwave(args, ctx),
        Command::Jellium(args) => jellium::run_jellium(args, ctx),
        Command::Molecule(args) => molecule::run_molecule(args, ctx),
        Command::Run(args) => run::run_recipe(args, ctx),
    }
}

/// Result of a build, ready to be summarized and written.
pub enum Built {
    Fermion(FermionOperator),
    Qubit(QubitOperator),
    Molecule(MolecularData),
}

impl Built {
    fn describe(&self) -> String {
        match self {
            Built::Fermion(op) => format!("{} fermion terms", op.len()),
            Built::Qubit(op) => format!("{} Pauli strings", op.len()),
            Built::Molecule(molecule) => format!("molecule {}", molecule.name),
        }
    }
}

impl From<MoleculeFormat> for Format {
    fn from(format: MoleculeFormat) -> Self {
        match format {
            MoleculeFormat::Json => Format::Json,
            MoleculeFormat::Xyz => Format::Xyz,
        }
    }
}

/// Number of progress steps for a model build.
pub fn model_steps(encoding: Encoding) -> u8 {
    match encoding {
        Encoding::Fermion => 2,
        Encoding::Qubit => 3,
    }
}

/// Applies the requested encoding to a freshly built fermionic operator.
pub fn encode(operator: FermionOperator, encoding: Encoding, progress: &mut Progress) -> Built {
    match encoding {
        Encoding::Fermion => Built::Fermion(operator),
        Encoding::Qubit => {
            progress.step("Applying Jordan-Wigner transform");
            let n_terms = operator.len();
            let qubit = jordan_wigner(&operator);
            progress.complete_step(
                "Applying Jordan-Wigner transform",
                &[format!("{n_terms} fermion terms → {} Pauli strings", qubit.len())],
            );
            Built::Qubit(qubit)
        }
    }
}

/// Prints summaries when interactive, then writes the result.
pub fn finish(
    built: &Built,
    output: &OutputOptions,
    format: Option<MoleculeFormat>,
    ctx: DisplayContext,
    mut progress: Progress,
) -> Result<()> {
    if ctx.interactive {
        match built {
            Built::Fermion(op) => print_fermion_summary(op),
            Built::Qubit(op) => print_qubit_summary(op),
            Built::Molecule(molecule) => print_molecule_summary(molecule),
        }
    }

    progress.step("Writing output");
    let mut writer = create_output(output.output.as_deref())?;
    write_built(&mut writer, built, resolve_format(output, format))?;
    writer.flush().context("Failed to flush output")?;

    let target = output
        .output
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    progress.complete_step("Writing output", &[format!("Write {} → {target}", built.describe())]);
    progress.finish();

    Ok(())
}

fn resolve_format(output: &OutputOptions, format: Option<MoleculeFormat>) -> Format {
    format
        .map(Format::from)
        .or_else(|| output.output.as_deref().and_then(infer_molecule_format))
        .unwrap_or(Format::Json)
}

fn write_built(writer: &mut impl Write, built: &Built, format: Format) -> Result<()> {
    match built {
        Built::Fermion(op) => writeln!(writer, "{op}").context("Failed to write operator")?,
        Built::Qubit(op) => writeln!(writer, "{op}").context("Failed to write operator")?,
        Built::Molecule(molecule) => match format {
            Format::Json => json::write(writer, molecule).context("Failed to write molecular data")?,
            Format::Xyz => {
                xyz::write(writer, &molecule.geometry, &molecule.name).context("Failed to write geometry")?
            }
        },
    }
    Ok(())
}
