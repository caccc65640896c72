use anyhow::{Context, Result};
use tracing::info;

use fermi_forge::hamiltonians::{fermi_hubbard, mean_field_dwave};
use fermi_forge::{DwaveConfig, HubbardConfig};

use super::{encode, finish, model_steps};
use crate::cli::{DwaveArgs, HubbardArgs, LatticeOptions};
use crate::config::Encoding;
use crate::display::{Context as DisplayContext, Progress};

pub fn run_hubbard(args: HubbardArgs, ctx: DisplayContext) -> Result<()> {
    let encoding = encoding_of(args.encoding.qubit);
    let config = hubbard_config(&args);
    let lattice = &args.lattice;
    let mut progress = Progress::new(ctx.interactive, model_steps(encoding));

    progress.step("Building Fermi-Hubbard model");
    let hamiltonian = fermi_hubbard(
        lattice.x_dimension,
        lattice.y_dimension,
        lattice.tunneling,
        args.interaction.coulomb,
        &config,
    )
    .context("Failed to build Fermi-Hubbard model")?;
    info!(terms = hamiltonian.len(), "built Fermi-Hubbard model");
    progress.complete_step("Building Fermi-Hubbard model", &lattice_substeps(lattice, config.spinless));

    let built = encode(hamiltonian, encoding, &mut progress);
    finish(&built, &args.output, None, ctx, progress)
}

pub fn run_dwave(args: DwaveArgs, ctx: DisplayContext) -> Result<()> {
    let encoding = encoding_of(args.encoding.qubit);
    let lattice = &args.lattice;
    let config = DwaveConfig {
        chemical_potential: lattice.chemical_potential,
        periodic: !lattice.open,
    };
    let mut progress = Progress::new(ctx.interactive, model_steps(encoding));

    progress.step("Building mean-field d-wave model");
    let hamiltonian = mean_field_dwave(
        lattice.x_dimension,
        lattice.y_dimension,
        lattice.tunneling,
        args.sc_gap,
        &config,
    )
    .context("Failed to build mean-field d-wave model")?;
    info!(terms = hamiltonian.len(), "built mean-field d-wave model");

    let mut substeps = lattice_substeps(lattice, false);
    substeps.push(format!("Pairing Δ = {}", args.sc_gap));
    progress.complete_step("Building mean-field d-wave model", &substeps);

    let built = encode(hamiltonian, encoding, &mut progress);
    finish(&built, &args.output, None, ctx, progress)
}

pub fn encoding_of(qubit: bool) -> Encoding {
    if qubit { Encoding::Qubit } else { Encoding::Fermion }
}

fn hubbard_config(args: &HubbardArgs) -> HubbardConfig {
    HubbardConfig {
        chemical_potential: args.lattice.chemical_potential,
        magnetic_field: args.interaction.magnetic_field,
        periodic: !args.lattice.open,
        spinless: args.interaction.spinless,
        particle_hole_symmetry: args.interaction.particle_hole_symmetry,
    }
}

fn lattice_substeps(lattice: &LatticeOptions, spinless: bool) -> Vec<String> {
    let sites = lattice.x_dimension * lattice.y_dimension;
    let modes = if spinless { sites } else { 2 * sites };
    vec![
        format!(
            "{} x {} {} lattice, {sites} sites",
            lattice.x_dimension,
            lattice.y_dimension,
            if lattice.open { "open" } else { "periodic" }
        ),
        format!("{modes} spin-orbitals, t = {}", lattice.tunneling),
    ]
}
