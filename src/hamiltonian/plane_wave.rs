//! Plane-wave Hamiltonians with nuclear external potentials, and the
//! Fourier transforms between plane-wave and dual bases.

use std::f64::consts::PI;

use tracing::debug;

use super::config::JelliumConfig;
use super::jellium::{above_cutoff, jellium_model, jordan_wigner_dual_basis_jellium, nonzero_momenta, truncation_factor};
use crate::error::Error;
use crate::model::atom::Nucleus;
use crate::model::grid::{Grid, Spin, dot, spins};
use crate::ops::{Coefficient, FermionOperator, Ladder, Pauli, QubitOperator, hopping, number_operator};

/// Side length of a cubic cell holding `n_particles` at Wigner-Seitz
/// radius `wigner_seitz_radius` in `dimension` dimensions.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] when `dimension` is zero.
pub fn wigner_seitz_length_scale(
    wigner_seitz_radius: f64,
    n_particles: usize,
    dimension: usize,
) -> Result<f64, Error> {
    if dimension == 0 {
        return Err(Error::InvalidDimension(dimension));
    }

    let half_dimension = dimension / 2;
    let radius_power = wigner_seitz_radius.powi(dimension as i32);
    let volume_per_particle = if dimension % 2 == 1 {
        2.0 * factorial(half_dimension) * (4.0 * PI).powi(half_dimension as i32) / factorial(dimension)
            * radius_power
    } else {
        PI.powi(half_dimension as i32) / factorial(half_dimension) * radius_power
    };
    let volume = volume_per_particle * n_particles as f64;
    Ok(volume.powf(1.0 / dimension as f64))
}

fn factorial(n: usize) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

fn validate_geometry(grid: &Grid, geometry: &[Nucleus]) -> Result<(), Error> {
    for (index, nucleus) in geometry.iter().enumerate() {
        if nucleus.position.len() != grid.dimensions {
            return Err(Error::invalid_geometry(index, grid.dimensions, nucleus.position.len()));
        }
    }
    Ok(())
}

/// Nuclear attraction in the plane-wave basis,
///
/// `Σ_{pq} Σ_j (−4π/Ω) ζ_j e^{i k_{p−q}·R_j} / k_{p−q}² a†_p a_q`
///
/// for `k_{p−q} ≠ 0`, honoring the energy cutoff and Coulomb truncation.
pub fn plane_wave_external_potential(
    grid: &Grid,
    geometry: &[Nucleus],
    config: &JelliumConfig,
) -> Result<FermionOperator, Error> {
    validate_geometry(grid, geometry)?;

    let prefactor = -4.0 * PI / grid.volume_scale();
    let shift = grid.length / 2;
    let mut operator = FermionOperator::zero();

    for indices_p in grid.all_points_indices() {
        for indices_q in grid.all_points_indices() {
            let difference: Vec<usize> = indices_p
                .iter()
                .zip(&indices_q)
                .map(|(&p, &q)| (p + shift + grid.length - q) % grid.length)
                .collect();
            let momentum = grid.momentum_vector(&difference);
            let momentum_squared = dot(&momentum, &momentum);
            if momentum_squared == 0.0 || above_cutoff(config.e_cutoff, momentum_squared) {
                continue;
            }
            let cutoff_factor = truncation_factor(grid, config, momentum_squared);

            for nucleus in geometry {
                let phase = Coefficient::new(0.0, dot(&momentum, &nucleus.position)).exp();
                let coefficient = phase
                    * (prefactor / momentum_squared * nucleus.element.nuclear_charge() * cutoff_factor);
                for &spin in spins(config.spinless) {
                    let orbital_p = grid.orbital_id(&indices_p, spin);
                    let orbital_q = grid.orbital_id(&indices_q, spin);
                    operator += hopping(orbital_p, orbital_q, coefficient);
                }
            }
        }
    }
    Ok(operator)
}

/// Nuclear attraction in the dual basis,
///
/// `Σ_p Σ_j Σ_{ν≠0} (−4π/Ω) ζ_j cos(k_ν·(R_j − r_p)) / k_ν² n_p`.
pub fn dual_basis_external_potential(
    grid: &Grid,
    geometry: &[Nucleus],
    config: &JelliumConfig,
) -> Result<FermionOperator, Error> {
    validate_geometry(grid, geometry)?;

    let prefactor = -4.0 * PI / grid.volume_scale();
    let momenta = nonzero_momenta(grid);
    let mut operator = FermionOperator::zero();

    for indices in grid.all_points_indices() {
        let position = grid.position_vector(&indices);
        for nucleus in geometry {
            let separation: Vec<f64> = nucleus.position.iter().zip(&position).map(|(r, p)| r - p).collect();
            for momentum in &momenta {
                let coefficient = prefactor / momentum.squared
                    * nucleus.element.nuclear_charge()
                    * dot(&momentum.vector, &separation).cos()
                    * truncation_factor(grid, config, momentum.squared);
                for &spin in spins(config.spinless) {
                    operator += number_operator(grid.orbital_id(&indices, spin), coefficient);
                }
            }
        }
    }
    Ok(operator)
}

/// Jellium plus, when a geometry is given, the nuclear external potential,
/// in the basis selected by `config.plane_wave`.
///
/// # Errors
///
/// - [`Error::ConstantWithGeometry`] if `include_constant` is set together
///   with a geometry.
/// - [`Error::InvalidGeometry`] if a nucleus has the wrong number of
///   coordinates for the grid.
pub fn plane_wave_hamiltonian(
    grid: &Grid,
    geometry: Option<&[Nucleus]>,
    config: &JelliumConfig,
) -> Result<FermionOperator, Error> {
    if geometry.is_some() && config.include_constant {
        return Err(Error::ConstantWithGeometry);
    }
    if let Some(geometry) = geometry {
        validate_geometry(grid, geometry)?;
    }

    let mut hamiltonian = jellium_model(grid, config);
    if let Some(geometry) = geometry {
        hamiltonian += if config.plane_wave {
            plane_wave_external_potential(grid, geometry, config)?
        } else {
            dual_basis_external_potential(grid, geometry, config)?
        };
        debug!(
            nuclei = geometry.len(),
            terms = hamiltonian.len(),
            "added external potential"
        );
    }
    Ok(hamiltonian)
}

/// Closed-form Jordan-Wigner encoding of the dual-basis Hamiltonian with an
/// optional nuclear external potential.
///
/// # Errors
///
/// Same conditions as [`plane_wave_hamiltonian`].
pub fn jordan_wigner_dual_basis_hamiltonian(
    grid: &Grid,
    geometry: Option<&[Nucleus]>,
    spinless: bool,
    include_constant: bool,
) -> Result<QubitOperator, Error> {
    if geometry.is_some() && include_constant {
        return Err(Error::ConstantWithGeometry);
    }
    if let Some(geometry) = geometry {
        validate_geometry(grid, geometry)?;
    }

    let mut hamiltonian = jordan_wigner_dual_basis_jellium(grid, spinless, include_constant);
    let Some(geometry) = geometry else {
        return Ok(hamiltonian);
    };

    let prefactor = -2.0 * PI / grid.volume_scale();
    let momenta = nonzero_momenta(grid);
    for qubit in 0..grid.num_modes(spinless) {
        let position = grid.position_vector(&grid.grid_indices(qubit, spinless));
        for nucleus in geometry {
            let separation: Vec<f64> = nucleus.position.iter().zip(&position).map(|(r, p)| r - p).collect();
            for momentum in &momenta {
                let coefficient = prefactor / momentum.squared
                    * nucleus.element.nuclear_charge()
                    * dot(&momentum.vector, &separation).cos();
                hamiltonian += QubitOperator::constant_term(coefficient);
                hamiltonian.add_term([(qubit, Pauli::Z)], -coefficient);
            }
        }
    }
    Ok(hamiltonian)
}

/// Plane-wave to dual basis: each ladder operator on mode `ν` becomes
/// `N^{-1/2} Σ_p e^{±i k_ν·r_p} a_p`, `+` for annihilation, `−` for creation.
pub fn fourier_transform(hamiltonian: &FermionOperator, grid: &Grid, spinless: bool) -> FermionOperator {
    transform_basis(hamiltonian, grid, spinless, BasisChange::ToDual)
}

/// Dual basis back to plane waves; inverse of [`fourier_transform`].
pub fn inverse_fourier_transform(hamiltonian: &FermionOperator, grid: &Grid, spinless: bool) -> FermionOperator {
    transform_basis(hamiltonian, grid, spinless, BasisChange::ToPlaneWave)
}

#[derive(Debug, Clone, Copy)]
enum BasisChange {
    ToDual,
    ToPlaneWave,
}

type VectorFn = fn(&Grid, &[usize]) -> Vec<f64>;

fn transform_basis(hamiltonian: &FermionOperator, grid: &Grid, spinless: bool, direction: BasisChange) -> FermionOperator {
    let normalization = (1.0 / grid.num_points() as f64).sqrt();
    let (phase_sign, source, target): (f64, VectorFn, VectorFn) = match direction {
        BasisChange::ToDual => (1.0, Grid::momentum_vector, Grid::position_vector),
        BasisChange::ToPlaneWave => (-1.0, Grid::position_vector, Grid::momentum_vector),
    };

    let mut transformed = FermionOperator::zero();
    for (term, &coefficient) in hamiltonian.terms() {
        let mut product = FermionOperator::constant_term(coefficient);
        for &(mode, action) in term {
            let vector_1 = source(grid, &grid.grid_indices(mode, spinless));
            let spin = (!spinless).then(|| Spin::of_mode(mode));

            let mut expansion = FermionOperator::zero();
            for indices in grid.all_points_indices() {
                let vector_2 = target(grid, &indices);
                let mut angle = phase_sign * dot(&vector_1, &vector_2);
                if action == Ladder::Create {
                    angle = -angle;
                }
                let weight = Coefficient::new(0.0, angle).exp() * normalization;
                expansion.add_term([(grid.orbital_id(&indices, spin), action)], weight);
            }
            product = &product * &expansion;
        }
        transformed += product;
    }
    transformed
}
