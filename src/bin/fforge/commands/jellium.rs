use anyhow::{Context, Result};
use tracing::info;

use fermi_forge::hamiltonians::{
    jordan_wigner_dual_basis_hamiltonian, jordan_wigner_dual_basis_jellium, plane_wave_hamiltonian,
    wigner_seitz_length_scale,
};
use fermi_forge::{Grid, JelliumConfig, Nucleus};

use super::{Built, encode, finish, model_steps};
use crate::cli::{GridOptions, JelliumArgs};
use crate::config::Encoding;
use crate::display::{Context as DisplayContext, Progress};

use super::lattice::encoding_of;

pub fn run_jellium(args: JelliumArgs, ctx: DisplayContext) -> Result<()> {
    let encoding = encoding_of(args.encoding.qubit);
    let grid = build_grid(&args.grid)?;
    let basis = &args.basis;
    let config = JelliumConfig {
        spinless: basis.spinless,
        plane_wave: !basis.dual,
        include_constant: basis.include_constant,
        e_cutoff: basis.e_cutoff,
        non_periodic: basis.non_periodic,
        period_cutoff: basis.period_cutoff,
    };

    let mut progress = Progress::new(ctx.interactive, model_steps(encoding));
    let built = build_plane_wave_model(&grid, &args.nuclei, &config, encoding, &mut progress)?;
    finish(&built, &args.output, None, ctx, progress)
}

fn build_grid(opts: &GridOptions) -> Result<Grid> {
    let scale = match (opts.scale, opts.wigner_seitz_radius, opts.particles) {
        (Some(scale), _, _) => scale,
        (None, Some(radius), Some(particles)) => {
            wigner_seitz_length_scale(radius, particles, opts.dimensions)
                .context("Failed to derive cell size from the Wigner-Seitz radius")?
        }
        _ => 1.0,
    };
    Grid::new(opts.dimensions, opts.length, scale).context("Invalid plane-wave grid")
}

/// Whether the closed-form qubit Hamiltonian matches what `config` asks for.
fn has_closed_form(config: &JelliumConfig) -> bool {
    !config.plane_wave && !config.non_periodic && config.e_cutoff.is_none()
}

/// Builds jellium or a plane-wave Hamiltonian with nuclei, using the
/// closed-form qubit encoding when one applies.
pub fn build_plane_wave_model(
    grid: &Grid,
    nuclei: &[Nucleus],
    config: &JelliumConfig,
    encoding: Encoding,
    progress: &mut Progress,
) -> Result<Built> {
    let geometry = (!nuclei.is_empty()).then_some(nuclei);
    let label = if geometry.is_some() {
        "Building plane-wave Hamiltonian"
    } else {
        "Building jellium model"
    };
    let substeps = vec![
        format!(
            "{}D grid, {} points per side, cell {:.4}",
            grid.dimensions, grid.length, grid.scale
        ),
        format!(
            "{} basis, {} modes",
            if config.plane_wave { "plane-wave" } else { "dual" },
            grid.num_modes(config.spinless)
        ),
        format!("{} nuclei", nuclei.len()),
    ];

    if encoding == Encoding::Qubit && has_closed_form(config) {
        progress.step(label);
        let qubit = match geometry {
            Some(nuclei) => jordan_wigner_dual_basis_hamiltonian(
                grid,
                Some(nuclei),
                config.spinless,
                config.include_constant,
            )
            .context("Failed to build plane-wave Hamiltonian")?,
            None => jordan_wigner_dual_basis_jellium(grid, config.spinless, config.include_constant),
        };
        info!(terms = qubit.len(), "built closed-form qubit Hamiltonian");
        progress.complete_step(label, &substeps);
        // The encoding step is already folded into the build.
        progress.step("Applying Jordan-Wigner transform");
        progress.complete_step("Applying Jordan-Wigner transform", &["Closed form in the dual basis".to_string()]);
        return Ok(Built::Qubit(qubit));
    }

    progress.step(label);
    let hamiltonian =
        plane_wave_hamiltonian(grid, geometry, config).context("Failed to build plane-wave Hamiltonian")?;
    info!(terms = hamiltonian.len(), "built plane-wave Hamiltonian");
    progress.complete_step(label, &substeps);

    Ok(encode(hamiltonian, encoding, progress))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fermi_forge::hamiltonians::dual_basis_jellium_model;
    use fermi_forge::{Element, jordan_wigner};

    fn dual_config() -> JelliumConfig {
        JelliumConfig {
            plane_wave: false,
            spinless: true,
            ..Default::default()
        }
    }

    #[test]
    fn closed_form_qubit_matches_generic_encoding() {
        let grid = Grid::new(1, 3, 1.0).unwrap();
        let config = dual_config();
        let Built::Qubit(closed) =
            build_plane_wave_model(&grid, &[], &config, Encoding::Qubit, &mut Progress::Silent).unwrap()
        else {
            panic!("expected a qubit operator");
        };
        let generic = jordan_wigner(&dual_basis_jellium_model(&grid, &config));
        assert!(closed.approx_eq(&generic, 1e-6));
    }

    #[test]
    fn nuclei_with_constant_are_rejected() {
        let grid = Grid::new(1, 3, 1.0).unwrap();
        let config = JelliumConfig {
            include_constant: true,
            ..dual_config()
        };
        let nuclei = [Nucleus::new(Element::H, vec![0.2])];
        let result = build_plane_wave_model(&grid, &nuclei, &config, Encoding::Fermion, &mut Progress::Silent);
        assert!(result.is_err());
    }

    #[test]
    fn truncated_interactions_skip_the_closed_form() {
        let config = JelliumConfig {
            non_periodic: true,
            ..dual_config()
        };
        assert!(!has_closed_form(&config));
        assert!(has_closed_form(&dual_config()));
    }

    #[test]
    fn grid_scale_comes_from_wigner_seitz_radius() {
        let opts = GridOptions {
            dimensions: 3,
            length: 2,
            scale: None,
            wigner_seitz_radius: Some(1.0),
            particles: Some(2),
        };
        let grid = build_grid(&opts).unwrap();
        let expected = wigner_seitz_length_scale(1.0, 2, 3).unwrap();
        assert_eq!(grid.scale, expected);
    }
}
