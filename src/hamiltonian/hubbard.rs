//! The Fermi-Hubbard model on a rectangular lattice.
//!
//! Sites are numbered row by row, `site = y * x_dimension + x`. In the
//! spinful model site `i` owns spin-orbitals `2i` (up) and `2i + 1` (down).

use tracing::debug;

use super::config::HubbardConfig;
use crate::error::Error;
use crate::ops::{FermionOperator, hermitian_conjugated, hopping, number_operator};

/// Builds the Fermi-Hubbard Hamiltonian on an `x_dimension × y_dimension`
/// lattice.
///
/// Spinful:
/// `H = −t Σ_<ij>σ (a†_iσ a_jσ + h.c.) + U Σ_i (n_i↑ − δ)(n_i↓ − δ)
///      − μ Σ_iσ n_iσ − h Σ_i (n_i↑ − n_i↓)`
///
/// Spinless:
/// `H = −t Σ_<ij> (a†_i a_j + h.c.) + U Σ_<ij> (n_i − δ)(n_j − δ) − μ Σ_i n_i`
///
/// where `<ij>` runs over right and bottom neighbors and `δ` is ½ with
/// particle-hole symmetry, zero otherwise. Zero chemical potential and
/// field terms are left out.
pub fn fermi_hubbard(
    x_dimension: usize,
    y_dimension: usize,
    tunneling: f64,
    coulomb: f64,
    config: &HubbardConfig,
) -> Result<FermionOperator, Error> {
    if x_dimension == 0 || y_dimension == 0 {
        return Err(Error::InvalidLattice {
            x_dimension,
            y_dimension,
        });
    }

    let model = if config.spinless {
        spinless_model(x_dimension, y_dimension, tunneling, coulomb, config)
    } else {
        spinful_model(x_dimension, y_dimension, tunneling, coulomb, config)
    };

    debug!(
        x_dimension,
        y_dimension,
        spinless = config.spinless,
        terms = model.len(),
        "built Fermi-Hubbard model"
    );
    Ok(model)
}

fn spinful_model(
    x_dimension: usize,
    y_dimension: usize,
    tunneling: f64,
    coulomb: f64,
    config: &HubbardConfig,
) -> FermionOperator {
    let n_sites = x_dimension * y_dimension;
    let up = |site: usize| 2 * site;
    let down = |site: usize| 2 * site + 1;

    let mut model = FermionOperator::zero();
    for site in 0..n_sites {
        for neighbor in lattice_neighbors(site, x_dimension, y_dimension, config.periodic) {
            model += hopping_pair(up(site), up(neighbor), -tunneling);
            model += hopping_pair(down(site), down(neighbor), -tunneling);
        }

        model += coulomb_interaction(up(site), down(site), coulomb, config.particle_hole_symmetry);

        let up_shift = -config.chemical_potential - config.magnetic_field;
        let down_shift = -config.chemical_potential + config.magnetic_field;
        if up_shift != 0.0 {
            model += number_operator(up(site), up_shift);
        }
        if down_shift != 0.0 {
            model += number_operator(down(site), down_shift);
        }
    }
    model
}

fn spinless_model(
    x_dimension: usize,
    y_dimension: usize,
    tunneling: f64,
    coulomb: f64,
    config: &HubbardConfig,
) -> FermionOperator {
    let n_sites = x_dimension * y_dimension;

    let mut model = FermionOperator::zero();
    for site in 0..n_sites {
        for neighbor in lattice_neighbors(site, x_dimension, y_dimension, config.periodic) {
            model += hopping_pair(site, neighbor, -tunneling);
            model += coulomb_interaction(site, neighbor, coulomb, config.particle_hole_symmetry);
        }
        if config.chemical_potential != 0.0 {
            model += number_operator(site, -config.chemical_potential);
        }
    }
    model
}

/// Right and bottom neighbors of `site` that carry a bond.
///
/// On a periodic side of length two the wrapped bond would coincide with the
/// direct one, so it is dropped.
fn lattice_neighbors(
    site: usize,
    x_dimension: usize,
    y_dimension: usize,
    periodic: bool,
) -> impl Iterator<Item = usize> {
    let mut right = right_neighbor(site, x_dimension, periodic);
    let mut bottom = bottom_neighbor(site, x_dimension, y_dimension, periodic);
    if periodic && x_dimension == 2 && site % 2 == 1 {
        right = None;
    }
    if periodic && y_dimension == 2 && site >= x_dimension {
        bottom = None;
    }
    right.into_iter().chain(bottom)
}

pub(crate) fn right_neighbor(site: usize, x_dimension: usize, periodic: bool) -> Option<usize> {
    if x_dimension == 1 {
        return None;
    }
    if (site + 1) % x_dimension == 0 {
        return periodic.then_some(site + 1 - x_dimension);
    }
    Some(site + 1)
}

pub(crate) fn bottom_neighbor(
    site: usize,
    x_dimension: usize,
    y_dimension: usize,
    periodic: bool,
) -> Option<usize> {
    if y_dimension == 1 {
        return None;
    }
    let n_sites = x_dimension * y_dimension;
    if site + x_dimension >= n_sites {
        return periodic.then_some(site + x_dimension - n_sites);
    }
    Some(site + x_dimension)
}

/// `coefficient (a†_i a_j + a†_j a_i)`.
fn hopping_pair(i: usize, j: usize, coefficient: f64) -> FermionOperator {
    let term = hopping(i, j, coefficient);
    let adjoint = hermitian_conjugated(&term);
    term + adjoint
}

/// `coefficient (n_i − δ)(n_j − δ)`.
fn coulomb_interaction(i: usize, j: usize, coefficient: f64, particle_hole_symmetry: bool) -> FermionOperator {
    let mut n_i = number_operator(i, 1.0);
    let mut n_j = number_operator(j, 1.0);
    if particle_hole_symmetry {
        n_i -= FermionOperator::constant_term(0.5);
        n_j -= FermionOperator::constant_term(0.5);
    }
    (&n_i * &n_j) * coefficient
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{EQ_TOLERANCE, Ladder::Annihilate, Ladder::Create, is_hermitian};

    fn open() -> HubbardConfig {
        HubbardConfig {
            periodic: false,
            ..Default::default()
        }
    }

    #[test]
    fn rejects_empty_lattice() {
        assert!(matches!(
            fermi_hubbard(0, 2, 1.0, 1.0, &HubbardConfig::default()),
            Err(Error::InvalidLattice { x_dimension: 0, y_dimension: 2 })
        ));
    }

    #[test]
    fn neighbors_wrap_only_when_periodic() {
        assert_eq!(right_neighbor(2, 3, false), None);
        assert_eq!(right_neighbor(2, 3, true), Some(0));
        assert_eq!(right_neighbor(0, 1, true), None);
        assert_eq!(bottom_neighbor(4, 3, 2, false), None);
        assert_eq!(bottom_neighbor(4, 3, 2, true), Some(1));
        assert_eq!(bottom_neighbor(1, 3, 2, false), Some(4));
    }

    #[test]
    fn open_chain_term_count() {
        let model = fermi_hubbard(3, 1, 1.0, 4.0, &open()).unwrap();
        // two bonds × two spins × (term + h.c.), plus one interaction per site
        assert_eq!(model.len(), 8 + 3);
        assert_eq!(model.coefficient(&[(0, Create), (2, Annihilate)]).re, -1.0);
        assert_eq!(model.coefficient(&[(3, Create), (5, Annihilate)]).re, -1.0);
        assert_eq!(
            model
                .coefficient(&[(2, Create), (2, Annihilate), (3, Create), (3, Annihilate)])
                .re,
            4.0
        );
    }

    #[test]
    fn periodic_two_by_two_has_no_double_bonds() {
        let model = fermi_hubbard(2, 2, 1.0, 0.0, &HubbardConfig::default()).unwrap();
        let hopping_terms = model
            .terms()
            .filter(|(term, c)| term.len() == 2 && c.re != 0.0)
            .count();
        // four bonds, each with two spins and a conjugate
        assert_eq!(hopping_terms, 16);
        assert_eq!(model.coefficient(&[(0, Create), (2, Annihilate)]).re, -1.0);
    }

    #[test]
    fn periodic_ring_wraps_last_site() {
        let model = fermi_hubbard(3, 1, 1.0, 0.0, &HubbardConfig::default()).unwrap();
        assert_eq!(model.coefficient(&[(4, Create), (0, Annihilate)]).re, -1.0);
        assert_eq!(model.coefficient(&[(0, Create), (4, Annihilate)]).re, -1.0);
    }

    #[test]
    fn chemical_potential_and_field_split_spins() {
        let config = HubbardConfig {
            chemical_potential: 0.5,
            magnetic_field: 0.25,
            ..open()
        };
        let model = fermi_hubbard(1, 1, 1.0, 2.0, &config).unwrap();
        assert_eq!(model.coefficient(&[(0, Create), (0, Annihilate)]).re, -0.75);
        assert_eq!(model.coefficient(&[(1, Create), (1, Annihilate)]).re, -0.25);
    }

    #[test]
    fn particle_hole_symmetry_shifts_interaction() {
        let config = HubbardConfig {
            particle_hole_symmetry: true,
            ..open()
        };
        let model = fermi_hubbard(1, 1, 1.0, 2.0, &config).unwrap();
        assert!((model.constant().re - 0.5).abs() < EQ_TOLERANCE);
        assert_eq!(model.coefficient(&[(0, Create), (0, Annihilate)]).re, -1.0);
        assert_eq!(model.coefficient(&[(1, Create), (1, Annihilate)]).re, -1.0);
    }

    #[test]
    fn spinless_model_uses_bond_interaction() {
        let config = HubbardConfig {
            spinless: true,
            chemical_potential: 1.5,
            ..open()
        };
        let model = fermi_hubbard(2, 1, 1.0, 3.0, &config).unwrap();
        assert_eq!(model.coefficient(&[(0, Create), (1, Annihilate)]).re, -1.0);
        assert_eq!(
            model
                .coefficient(&[(0, Create), (0, Annihilate), (1, Create), (1, Annihilate)])
                .re,
            3.0
        );
        assert_eq!(model.coefficient(&[(1, Create), (1, Annihilate)]).re, -1.5);
    }

    #[test]
    fn model_is_hermitian() {
        let config = HubbardConfig {
            chemical_potential: 0.3,
            magnetic_field: 0.1,
            particle_hole_symmetry: true,
            ..Default::default()
        };
        let model = fermi_hubbard(3, 2, 1.0, 4.0, &config).unwrap();
        assert!(is_hermitian(&model));
    }
}
