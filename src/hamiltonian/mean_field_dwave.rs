//! Mean-field model of a d-wave superconductor on a rectangular lattice.

use tracing::debug;

use super::config::DwaveConfig;
use crate::error::Error;
use crate::ops::{FermionOperator, Ladder, hermitian_conjugated, hopping, number_operator};

/// Builds the mean-field d-wave Hamiltonian
///
/// `H = −t Σ_<ij>σ (a†_iσ a_jσ + h.c.) − μ Σ_iσ n_iσ
///      − ½ Σ_<ij> Δ_ij (a†_i↑ a†_j↓ − a†_i↓ a†_j↑ + h.c.)`
///
/// with `Δ_ij = Δ` on horizontal bonds and `−Δ` on vertical bonds. Sites
/// are numbered row by row and own spin-orbitals `2i` and `2i + 1`.
pub fn mean_field_dwave(
    x_dimension: usize,
    y_dimension: usize,
    tunneling: f64,
    sc_gap: f64,
    config: &DwaveConfig,
) -> Result<FermionOperator, Error> {
    if x_dimension == 0 || y_dimension == 0 {
        return Err(Error::InvalidLattice {
            x_dimension,
            y_dimension,
        });
    }

    let n_sites = x_dimension * y_dimension;
    let up = |site: usize| 2 * site;
    let down = |site: usize| 2 * site + 1;

    let mut model = FermionOperator::zero();
    for site in 0..n_sites {
        let right = if (site + 1) % x_dimension == 0 {
            site + 1 - x_dimension
        } else {
            site + 1
        };
        let bottom = (site + x_dimension) % n_sites;

        if config.chemical_potential != 0.0 {
            model += number_operator(up(site), -config.chemical_potential);
            model += number_operator(down(site), -config.chemical_potential);
        }

        let has_right = (site + 1) % x_dimension != 0 || (config.periodic && x_dimension > 2);
        if has_right {
            model += spin_hopping(up(site), up(right), -tunneling);
            model += spin_hopping(down(site), down(right), -tunneling);
            let pairing = singlet_pairing(site, right, sc_gap / 2.0);
            model -= &pairing;
            model -= hermitian_conjugated(&pairing);
        }

        let has_bottom = site + x_dimension < n_sites || (config.periodic && y_dimension > 2);
        if has_bottom {
            model += spin_hopping(up(site), up(bottom), -tunneling);
            model += spin_hopping(down(site), down(bottom), -tunneling);
            let pairing = singlet_pairing(site, bottom, sc_gap / 2.0);
            model += hermitian_conjugated(&pairing);
            model += pairing;
        }
    }

    debug!(x_dimension, y_dimension, terms = model.len(), "built mean-field d-wave model");
    Ok(model)
}

fn spin_hopping(i: usize, j: usize, coefficient: f64) -> FermionOperator {
    let term = hopping(i, j, coefficient);
    let adjoint = hermitian_conjugated(&term);
    term + adjoint
}

/// `coefficient (a†_i↑ a†_j↓ − a†_i↓ a†_j↑)`.
fn singlet_pairing(i: usize, j: usize, coefficient: f64) -> FermionOperator {
    use Ladder::Create;
    FermionOperator::from_term([(2 * i, Create), (2 * j + 1, Create)], coefficient)
        - FermionOperator::from_term([(2 * i + 1, Create), (2 * j, Create)], coefficient)
}
