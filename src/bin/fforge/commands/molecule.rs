use anyhow::{Context, Result, bail};
use tracing::info;

use fermi_forge::hamiltonians::{MolecularData, make_atom, make_atomic_lattice, make_atomic_ring};
use fermi_forge::io::xyz;

use super::{Built, finish};
use crate::cli::{MoleculeArgs, MoleculeKind, XyzArgs};
use crate::display::{Context as DisplayContext, Progress};
use crate::io::{open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 2;

pub fn run_molecule(args: MoleculeArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    let (molecule, format) = match &args.kind {
        MoleculeKind::Ring(ring) => {
            progress.step("Building atomic ring");
            let species = &ring.species;
            let molecule = make_atomic_ring(
                ring.n_atoms,
                ring.spacing,
                &species.basis,
                species.element,
                species.charge,
            )
            .context("Failed to build atomic ring")?;
            progress.complete_step("Building atomic ring", &geometry_substeps(&molecule));
            (molecule, species.format)
        }
        MoleculeKind::Lattice(lattice) => {
            progress.step("Building atomic lattice");
            let species = &lattice.species;
            let molecule = make_atomic_lattice(
                lattice.nx,
                lattice.ny,
                lattice.nz,
                lattice.spacing,
                &species.basis,
                species.element,
                species.charge,
            )
            .context("Failed to build atomic lattice")?;
            progress.complete_step("Building atomic lattice", &geometry_substeps(&molecule));
            (molecule, species.format)
        }
        MoleculeKind::Atom(atom) => {
            progress.step("Building atom");
            let molecule = make_atom(atom.element, &atom.basis).context("Failed to build atom")?;
            progress.complete_step("Building atom", &geometry_substeps(&molecule));
            (molecule, atom.format)
        }
        MoleculeKind::Xyz(xyz_args) => {
            progress.step("Reading geometry");
            let molecule = read_molecule(xyz_args)?;
            progress.complete_step("Reading geometry", &geometry_substeps(&molecule));
            (molecule, xyz_args.format)
        }
    };

    info!(name = %molecule.name, atoms = molecule.n_atoms, "built molecular data");

    if let Some(directory) = &args.save_dir {
        let molecule = molecule.clone().with_data_directory(directory);
        molecule
            .save()
            .with_context(|| format!("Failed to save {}", molecule.data_path().display()))?;
        info!(path = %molecule.data_path().display(), "saved molecular data");
    }

    finish(&Built::Molecule(molecule), &args.output, format, ctx, progress)
}

fn read_molecule(args: &XyzArgs) -> Result<MolecularData> {
    if args.input.is_none() && stdin_is_tty() {
        bail!(
            "No geometry file specified and stdin is a terminal.\n\nUsage: fforge molecule xyz <FILE> or pipe data via stdin."
        );
    }

    let input = open_input(args.input.as_deref())?;
    let geometry = xyz::read(input).context("Failed to read geometry")?;
    if geometry.is_empty() {
        bail!("Geometry is empty");
    }
    MolecularData::new(
        geometry,
        args.basis.as_str(),
        args.multiplicity,
        args.charge,
        args.description.as_str(),
    )
    .context("Failed to build molecular data")
}

fn geometry_substeps(molecule: &MolecularData) -> Vec<String> {
    vec![
        format!("{} atoms, {} electrons", molecule.n_atoms, molecule.n_electrons),
        format!("Nuclear repulsion {:.6} Ha", molecule.nuclear_repulsion),
    ]
}
