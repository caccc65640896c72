//! Uniform electron gas (jellium) in plane-wave and dual bases.
//!
//! Plane-wave orbitals and dual-basis orbitals share the grid indexing of
//! [`Grid`], so the two representations are related by a discrete Fourier
//! transform on each ladder operator (see
//! [`fourier_transform`](super::plane_wave::fourier_transform)).

use std::f64::consts::PI;

use tracing::debug;

use super::config::JelliumConfig;
use crate::model::grid::{Grid, dot, spins};
use crate::ops::{FermionOperator, Ladder, Pauli, QubitOperator, hopping, number_operator};

/// Madelung constant of the simple cubic lattice, in units of `1 / scale`.
const MADELUNG_CONSTANT: f64 = 2.8372;

/// A non-zero wave vector of the grid.
#[derive(Debug, Clone)]
pub(crate) struct Momentum {
    pub indices: Vec<usize>,
    pub vector: Vec<f64>,
    pub squared: f64,
}

/// All non-zero wave vectors, in grid order.
pub(crate) fn nonzero_momenta(grid: &Grid) -> Vec<Momentum> {
    grid.all_points_indices()
        .filter_map(|indices| {
            let vector = grid.momentum_vector(&indices);
            let squared = dot(&vector, &vector);
            (squared != 0.0).then_some(Momentum {
                indices,
                vector,
                squared,
            })
        })
        .collect()
}

/// Coulomb truncation factor `1 − cos(R_c |k|)`, or one when periodic.
pub(crate) fn truncation_factor(grid: &Grid, config: &JelliumConfig, momentum_squared: f64) -> f64 {
    if !config.non_periodic {
        return 1.0;
    }
    let cutoff = config
        .period_cutoff
        .unwrap_or_else(|| grid.volume_scale().powf(1.0 / grid.dimensions as f64));
    1.0 - (cutoff * momentum_squared.sqrt()).cos()
}

/// Whether a plane wave lies above the kinetic energy cutoff.
pub(crate) fn above_cutoff(e_cutoff: Option<f64>, momentum_squared: f64) -> bool {
    e_cutoff.is_some_and(|cutoff| momentum_squared / 2.0 > cutoff)
}

/// Madelung energy `2.8372 / Ω^(1/d)`.
pub(crate) fn madelung_energy(grid: &Grid) -> f64 {
    MADELUNG_CONSTANT / grid.volume_scale().powf(1.0 / grid.dimensions as f64)
}

/// Kinetic energy `Σ_νσ k_ν²/2 a†_νσ a_νσ` in the plane-wave basis.
pub fn plane_wave_kinetic(grid: &Grid, spinless: bool, e_cutoff: Option<f64>) -> FermionOperator {
    let mut operator = FermionOperator::zero();
    for indices in grid.all_points_indices() {
        let momentum = grid.momentum_vector(&indices);
        let coefficient = dot(&momentum, &momentum) / 2.0;
        if e_cutoff.is_some_and(|cutoff| coefficient > cutoff) {
            continue;
        }
        for &spin in spins(spinless) {
            operator += number_operator(grid.orbital_id(&indices, spin), coefficient);
        }
    }
    operator
}

/// Electron-electron repulsion in the plane-wave basis,
///
/// `Σ_{ν≠0} Σ_{pqστ} (2π/Ω) / k_ν² a†_{pσ} a†_{qτ} a_{q+ν,τ} a_{p−ν,σ}`.
pub fn plane_wave_potential(grid: &Grid, config: &JelliumConfig) -> FermionOperator {
    use Ladder::{Annihilate, Create};

    let prefactor = 2.0 * PI / grid.volume_scale();
    let shift = grid.length / 2;
    let mut operator = FermionOperator::zero();

    for omega in nonzero_momenta(grid) {
        if above_cutoff(config.e_cutoff, omega.squared) {
            continue;
        }
        let coefficient = prefactor / omega.squared * truncation_factor(grid, config, omega.squared);
        let offset: Vec<i64> = omega.indices.iter().map(|&i| i as i64 - shift as i64).collect();

        for indices_a in grid.all_points_indices() {
            let indices_d = shifted(grid, &indices_a, &offset, -1);
            for indices_b in grid.all_points_indices() {
                let indices_c = shifted(grid, &indices_b, &offset, 1);
                for &spin_a in spins(config.spinless) {
                    let orbital_a = grid.orbital_id(&indices_a, spin_a);
                    let orbital_d = grid.orbital_id(&indices_d, spin_a);
                    for &spin_b in spins(config.spinless) {
                        let orbital_b = grid.orbital_id(&indices_b, spin_b);
                        let orbital_c = grid.orbital_id(&indices_c, spin_b);
                        if orbital_a == orbital_b || orbital_c == orbital_d {
                            continue;
                        }
                        operator.add_term(
                            [
                                (orbital_a, Create),
                                (orbital_b, Create),
                                (orbital_c, Annihilate),
                                (orbital_d, Annihilate),
                            ],
                            coefficient,
                        );
                    }
                }
            }
        }
    }
    operator
}

fn shifted(grid: &Grid, indices: &[usize], offset: &[i64], sign: i64) -> Vec<usize> {
    indices
        .iter()
        .zip(offset)
        .map(|(&i, &o)| grid.wrap(i as i64 + sign * o))
        .collect()
}

/// Kinetic energy alone in the dual basis.
pub fn dual_basis_kinetic(grid: &Grid, spinless: bool) -> FermionOperator {
    let config = JelliumConfig {
        spinless,
        ..Default::default()
    };
    dual_basis_terms(grid, &config, true, false)
}

/// Electron-electron repulsion alone in the dual basis.
pub fn dual_basis_potential(grid: &Grid, config: &JelliumConfig) -> FermionOperator {
    dual_basis_terms(grid, config, false, true)
}

/// Jellium in the dual basis: translation-invariant hopping `T(r_b − r_a)`
/// and density-density repulsion `V(r_b − r_a)`, plus the Madelung constant
/// when requested.
pub fn dual_basis_jellium_model(grid: &Grid, config: &JelliumConfig) -> FermionOperator {
    let mut operator = dual_basis_terms(grid, config, true, true);
    if config.include_constant {
        operator += FermionOperator::constant_term(madelung_energy(grid));
    }
    operator
}

fn dual_basis_terms(grid: &Grid, config: &JelliumConfig, kinetic: bool, potential: bool) -> FermionOperator {
    use Ladder::{Annihilate, Create};

    let n_points = grid.num_points() as f64;
    let prefactor = 2.0 * PI / grid.volume_scale();
    let momenta = nonzero_momenta(grid);
    let origin = vec![0; grid.dimensions];
    let position_origin = grid.position_vector(&origin);
    let mut operator = FermionOperator::zero();

    for indices_b in grid.all_points_indices() {
        let position_b = grid.position_vector(&indices_b);
        let difference: Vec<f64> = position_b
            .iter()
            .zip(&position_origin)
            .map(|(b, o)| b - o)
            .collect();

        let mut kinetic_coefficient = 0.0;
        let mut potential_coefficient = 0.0;
        for momentum in &momenta {
            let cos_difference = dot(&momentum.vector, &difference).cos();
            if kinetic {
                kinetic_coefficient += cos_difference * momentum.squared / (2.0 * n_points);
            }
            if potential {
                potential_coefficient += prefactor * cos_difference / momentum.squared
                    * truncation_factor(grid, config, momentum.squared);
            }
        }

        for indices_a in grid.all_points_indices() {
            let indices_c: Vec<usize> = indices_b
                .iter()
                .zip(&indices_a)
                .map(|(&b, &s)| (b + s) % grid.length)
                .collect();

            if kinetic {
                for &spin in spins(config.spinless) {
                    let orbital_a = grid.orbital_id(&indices_a, spin);
                    let orbital_c = grid.orbital_id(&indices_c, spin);
                    operator += hopping(orbital_a, orbital_c, kinetic_coefficient);
                }
            }
            if potential {
                for &spin_a in spins(config.spinless) {
                    let orbital_a = grid.orbital_id(&indices_a, spin_a);
                    for &spin_c in spins(config.spinless) {
                        let orbital_c = grid.orbital_id(&indices_c, spin_c);
                        if orbital_a == orbital_c {
                            continue;
                        }
                        operator.add_term(
                            [
                                (orbital_a, Create),
                                (orbital_a, Annihilate),
                                (orbital_c, Create),
                                (orbital_c, Annihilate),
                            ],
                            potential_coefficient,
                        );
                    }
                }
            }
        }
    }
    operator
}

/// Jellium in either basis, with the Madelung constant added once when
/// `include_constant` is set.
pub fn jellium_model(grid: &Grid, config: &JelliumConfig) -> FermionOperator {
    let mut hamiltonian = if config.plane_wave {
        plane_wave_kinetic(grid, config.spinless, config.e_cutoff) + plane_wave_potential(grid, config)
    } else {
        dual_basis_terms(grid, config, true, true)
    };
    if config.include_constant {
        hamiltonian += FermionOperator::constant_term(madelung_energy(grid));
    }

    debug!(
        dimensions = grid.dimensions,
        length = grid.length,
        plane_wave = config.plane_wave,
        spinless = config.spinless,
        terms = hamiltonian.len(),
        "built jellium model"
    );
    hamiltonian
}

/// Closed-form Jordan-Wigner encoding of the dual-basis jellium model.
///
/// Equivalent to encoding [`dual_basis_jellium_model`] with
/// [`jordan_wigner`](crate::ops::jordan_wigner) but built directly from
/// identity, `Z_p`, `Z_p Z_q` and `X_p Z…Z X_q + Y_p Z…Z Y_q` terms.
pub fn jordan_wigner_dual_basis_jellium(grid: &Grid, spinless: bool, include_constant: bool) -> QubitOperator {
    let n_orbitals = grid.num_points() as f64;
    let n_qubits = grid.num_modes(spinless);
    let volume = grid.volume_scale();
    let momenta = nonzero_momenta(grid);

    let mut identity_coefficient = 0.0;
    let mut z_coefficient = 0.0;
    for momentum in &momenta {
        identity_coefficient += momentum.squared / 2.0;
        identity_coefficient -= PI * n_orbitals / (momentum.squared * volume);
        z_coefficient += PI / (momentum.squared * volume);
        z_coefficient -= momentum.squared / (4.0 * n_orbitals);
    }
    if spinless {
        identity_coefficient /= 2.0;
    }

    let mut hamiltonian = QubitOperator::constant_term(identity_coefficient);
    for qubit in 0..n_qubits {
        hamiltonian.add_term([(qubit, Pauli::Z)], z_coefficient);
    }

    let zz_prefactor = PI / volume;
    let hopping_prefactor = 0.25 / n_orbitals;
    for p in 0..n_qubits {
        let position_p = grid.position_vector(&grid.grid_indices(p, spinless));
        for q in p + 1..n_qubits {
            let position_q = grid.position_vector(&grid.grid_indices(q, spinless));
            let difference: Vec<f64> = position_p.iter().zip(&position_q).map(|(a, b)| a - b).collect();
            let opposite_spins = !spinless && (p + q) % 2 == 1;

            let mut zz_coefficient = 0.0;
            let mut hopping_coefficient = 0.0;
            for momentum in &momenta {
                let cos_difference = dot(&momentum.vector, &difference).cos();
                zz_coefficient += zz_prefactor * cos_difference / momentum.squared;
                if !opposite_spins {
                    hopping_coefficient += hopping_prefactor * cos_difference * momentum.squared;
                }
            }

            hamiltonian.add_term([(p, Pauli::Z), (q, Pauli::Z)], zz_coefficient);
            if opposite_spins {
                continue;
            }
            let z_string = (p + 1..q).map(|i| (i, Pauli::Z));
            let xzx = std::iter::once((p, Pauli::X))
                .chain(z_string.clone())
                .chain([(q, Pauli::X)]);
            let yzy = std::iter::once((p, Pauli::Y)).chain(z_string).chain([(q, Pauli::Y)]);
            hamiltonian.add_term(xzx, hopping_coefficient);
            hamiltonian.add_term(yzy, hopping_coefficient);
        }
    }

    if include_constant {
        hamiltonian += QubitOperator::constant_term(madelung_energy(grid));
    }
    hamiltonian
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{EQ_TOLERANCE, Ladder::Annihilate, Ladder::Create, is_hermitian, jordan_wigner};

    fn grid_1d() -> Grid {
        Grid::new(1, 3, 1.5).unwrap()
    }

    fn dual(spinless: bool) -> JelliumConfig {
        JelliumConfig {
            spinless,
            plane_wave: false,
            ..Default::default()
        }
    }

    #[test]
    fn kinetic_energy_is_diagonal_in_plane_waves() {
        let grid = grid_1d();
        let kinetic = plane_wave_kinetic(&grid, true, None);
        let k = 2.0 * PI / 1.5;
        assert_eq!(kinetic.len(), 3);
        assert!((kinetic.coefficient(&[(0, Create), (0, Annihilate)]).re - k * k / 2.0).abs() < 1e-12);
        assert_eq!(kinetic.coefficient(&[(1, Create), (1, Annihilate)]).re, 0.0);
    }

    #[test]
    fn energy_cutoff_drops_fast_plane_waves() {
        let grid = grid_1d();
        let kinetic = plane_wave_kinetic(&grid, false, Some(1.0));
        assert_eq!(kinetic.len(), 2);

        let config = JelliumConfig {
            e_cutoff: Some(1.0),
            ..Default::default()
        };
        assert!(plane_wave_potential(&grid, &config).is_empty());
    }

    #[test]
    fn plane_wave_potential_conserves_momentum() {
        let grid = grid_1d();
        let config = JelliumConfig {
            spinless: true,
            ..Default::default()
        };
        let potential = plane_wave_potential(&grid, &config);
        for (term, _) in potential.terms() {
            let momentum = |mode: usize| grid.momentum_int(mode);
            let created = momentum(term[0].0) + momentum(term[1].0);
            let annihilated = momentum(term[2].0) + momentum(term[3].0);
            assert_eq!((created - annihilated).rem_euclid(3), 0);
        }
        assert!(is_hermitian(&potential));
    }

    #[test]
    fn jellium_is_hermitian_in_both_bases() {
        let grid = Grid::new(2, 3, 1.0).unwrap();
        for plane_wave in [true, false] {
            let config = JelliumConfig {
                plane_wave,
                spinless: true,
                ..Default::default()
            };
            assert!(is_hermitian(&jellium_model(&grid, &config)));
        }
    }

    #[test]
    fn dual_basis_model_is_sum_of_parts() {
        let grid = grid_1d();
        let config = dual(false);
        let parts = dual_basis_kinetic(&grid, false) + dual_basis_potential(&grid, &config);
        assert!(dual_basis_jellium_model(&grid, &config).approx_eq(&parts, EQ_TOLERANCE));
    }

    #[test]
    fn madelung_constant_is_added_once() {
        let grid = grid_1d();
        let config = JelliumConfig {
            include_constant: true,
            ..dual(true)
        };
        let model = jellium_model(&grid, &config);
        assert!((model.constant().re - 2.8372 / 1.5).abs() < 1e-12);

        let plane = JelliumConfig {
            plane_wave: true,
            ..config
        };
        let model = jellium_model(&grid, &plane);
        assert!((model.constant().re - 2.8372 / 1.5).abs() < 1e-12);
    }

    #[test]
    fn truncation_scales_interaction() {
        let grid = grid_1d();
        let periodic = dual_basis_potential(&grid, &dual(true));
        let truncated = dual_basis_potential(
            &grid,
            &JelliumConfig {
                non_periodic: true,
                period_cutoff: Some(0.0),
                ..dual(true)
            },
        );
        assert!(periodic.max_coefficient() > 0.0);
        assert!(truncated.max_coefficient() < 1e-12);
    }

    #[test]
    fn plane_wave_truncation_scales_each_term() {
        let grid = grid_1d();
        let periodic_config = JelliumConfig {
            spinless: true,
            ..Default::default()
        };
        let periodic = plane_wave_potential(&grid, &periodic_config);
        // R_c |k| = π on the shortest wave vector
        let truncated = plane_wave_potential(
            &grid,
            &JelliumConfig {
                non_periodic: true,
                period_cutoff: Some(0.75),
                ..periodic_config.clone()
            },
        );
        assert!(!periodic.is_empty());
        assert_eq!(truncated.len(), periodic.len());
        for (term, coefficient) in periodic.terms() {
            assert!((truncated.coefficient(term) - *coefficient * 2.0).norm() < 1e-12);
        }

        // R_c defaults to the cell side, a whole number of wavelengths on a line
        let default_radius = plane_wave_potential(
            &grid,
            &JelliumConfig {
                non_periodic: true,
                ..periodic_config
            },
        );
        assert!(default_radius.max_coefficient() < 1e-12);
    }

    #[test]
    fn default_truncation_radius_is_cell_side() {
        let grid = Grid::new(2, 3, 1.0).unwrap();
        let periodic_config = JelliumConfig {
            spinless: true,
            ..Default::default()
        };
        let periodic = plane_wave_potential(&grid, &periodic_config);
        let truncated = plane_wave_potential(
            &grid,
            &JelliumConfig {
                non_periodic: true,
                ..periodic_config
            },
        );

        let diagonal = 1.0 - (2.0 * PI * 2f64.sqrt()).cos();
        let mut diagonal_terms = 0;
        for (term, coefficient) in periodic.terms() {
            let ratio = truncated.coefficient(term).re / coefficient.re;
            if ratio.abs() < 1e-9 {
                continue;
            }
            assert!((ratio - diagonal).abs() < 1e-9, "ratio {ratio}");
            diagonal_terms += 1;
        }
        assert!(diagonal_terms > 0);
    }

    #[test]
    fn closed_form_matches_encoded_dual_model() {
        for spinless in [true, false] {
            let grid = grid_1d();
            let config = JelliumConfig {
                include_constant: true,
                ..dual(spinless)
            };
            let encoded = jordan_wigner(&dual_basis_jellium_model(&grid, &config));
            let closed = jordan_wigner_dual_basis_jellium(&grid, spinless, true);
            assert!(encoded.approx_eq(&closed, 1e-7), "spinless = {spinless}");
        }
    }

    #[test]
    fn closed_form_matches_in_two_dimensions() {
        let grid = Grid::new(2, 2, 2.0).unwrap();
        let encoded = jordan_wigner(&dual_basis_jellium_model(&grid, &dual(true)));
        let closed = jordan_wigner_dual_basis_jellium(&grid, true, false);
        assert!(encoded.approx_eq(&closed, 1e-7));
    }
}
