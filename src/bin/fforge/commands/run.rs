use anyhow::{Context, Result};
use tracing::info;

use fermi_forge::Grid;
use fermi_forge::hamiltonians::{
    fermi_hubbard, make_atom, make_atomic_lattice, make_atomic_ring, mean_field_dwave,
};

use super::jellium::build_plane_wave_model;
use super::{Built, encode, finish, model_steps};
use crate::cli::RunArgs;
use crate::config::{Model, Recipe, load_recipe};
use crate::display::{Context as DisplayContext, Progress};
use crate::io::read_to_string;

pub fn run_recipe(args: RunArgs, ctx: DisplayContext) -> Result<()> {
    let text = read_to_string(&args.recipe)?;
    let recipe = load_recipe(&text)
        .with_context(|| format!("Invalid recipe: {}", args.recipe.display()))?;
    info!(kind = recipe.model.describe(), "loaded recipe");

    let steps = match recipe.model {
        Model::Ring { .. } | Model::Lattice { .. } | Model::Atom { .. } => 2,
        _ => model_steps(recipe.encoding),
    };
    let mut progress = Progress::new(ctx.interactive, steps);
    let built = build(&recipe, &mut progress)?;
    finish(&built, &args.output, None, ctx, progress)
}

/// Builds whatever the recipe describes. Molecules ignore the encoding.
pub fn build(recipe: &Recipe, progress: &mut Progress) -> Result<Built> {
    let label = format!("Building {}", recipe.model.describe());
    let fermion = match &recipe.model {
        Model::Hubbard {
            x_dimension,
            y_dimension,
            tunneling,
            coulomb,
            config,
        } => {
            progress.step(&label);
            fermi_hubbard(*x_dimension, *y_dimension, *tunneling, *coulomb, config)
                .context("Failed to build Fermi-Hubbard model")?
        }
        Model::Dwave {
            x_dimension,
            y_dimension,
            tunneling,
            sc_gap,
            config,
        } => {
            progress.step(&label);
            mean_field_dwave(*x_dimension, *y_dimension, *tunneling, *sc_gap, config)
                .context("Failed to build mean-field d-wave model")?
        }
        Model::Jellium {
            dimensions,
            length,
            scale,
            config,
            geometry,
        } => {
            let grid = Grid::new(*dimensions, *length, *scale).context("Invalid plane-wave grid")?;
            return build_plane_wave_model(&grid, geometry, config, recipe.encoding, progress);
        }
        Model::Ring {
            n_atoms,
            spacing,
            element,
            basis,
            charge,
        } => {
            progress.step(&label);
            let molecule = make_atomic_ring(*n_atoms, *spacing, basis, *element, *charge)
                .context("Failed to build atomic ring")?;
            progress.complete_step(&label, &[molecule.name.clone()]);
            return Ok(Built::Molecule(molecule));
        }
        Model::Lattice {
            nx,
            ny,
            nz,
            spacing,
            element,
            basis,
            charge,
        } => {
            progress.step(&label);
            let molecule = make_atomic_lattice(*nx, *ny, *nz, *spacing, basis, *element, *charge)
                .context("Failed to build atomic lattice")?;
            progress.complete_step(&label, &[molecule.name.clone()]);
            return Ok(Built::Molecule(molecule));
        }
        Model::Atom { element, basis } => {
            progress.step(&label);
            let molecule = make_atom(*element, basis).context("Failed to build atom")?;
            progress.complete_step(&label, &[molecule.name.clone()]);
            return Ok(Built::Molecule(molecule));
        }
    };

    progress.complete_step(&label, &[format!("{} fermion terms", fermion.len())]);
    Ok(encode(fermion, recipe.encoding, progress))
}
