//! Families of molecules built from a single element: rings, lattices and
//! isolated atoms.

use std::f64::consts::PI;

use super::molecular_data::MolecularData;
use crate::error::Error;
use crate::model::atom::Atom;
use crate::model::types::Element;

/// Multiplicity of the lowest spin state for a given electron count.
fn minimal_multiplicity(n_atoms: usize, atom_type: Element, charge: i32) -> u32 {
    let n_electrons = n_atoms as i64 * i64::from(atom_type.atomic_number()) - i64::from(charge);
    if n_electrons.rem_euclid(2) == 1 { 2 } else { 1 }
}

/// Places `n_atoms` atoms evenly on a circle in the xy-plane, neighbors
/// `spacing` Ångströms apart.
///
/// # Errors
///
/// Returns [`Error::InvalidRing`] for fewer than two atoms, and any error of
/// [`MolecularData::new`].
pub fn make_atomic_ring(
    n_atoms: usize,
    spacing: f64,
    basis: &str,
    atom_type: Element,
    charge: i32,
) -> Result<MolecularData, Error> {
    if n_atoms < 2 {
        return Err(Error::InvalidRing(n_atoms));
    }

    let theta = 2.0 * PI / n_atoms as f64;
    let radius = spacing / (2.0 * (PI / n_atoms as f64).sin());
    let geometry = (0..n_atoms)
        .map(|k| {
            let angle = k as f64 * theta;
            Atom::new(atom_type, [radius * angle.cos(), radius * angle.sin(), 0.0])
        })
        .collect();

    let multiplicity = minimal_multiplicity(n_atoms, atom_type, charge);
    MolecularData::new(geometry, basis, multiplicity, charge, format!("ring_{spacing:?}"))
}

/// Places atoms on a simple cubic lattice with `spacing` Ångströms between
/// neighbors.
///
/// The description records the lattice shape: `linear_`, `planar_` or
/// `cubic_` followed by the spacing.
///
/// # Errors
///
/// Returns [`Error::InvalidLatticeShape`] unless some side holds more than
/// one atom.
pub fn make_atomic_lattice(
    nx_atoms: usize,
    ny_atoms: usize,
    nz_atoms: usize,
    spacing: f64,
    basis: &str,
    atom_type: Element,
    charge: i32,
) -> Result<MolecularData, Error> {
    let extended_sides = [nx_atoms, ny_atoms, nz_atoms].iter().filter(|&&n| n > 1).count();
    let shape = match extended_sides {
        1 => "linear",
        2 => "planar",
        3 => "cubic",
        _ => return Err(Error::InvalidLatticeShape),
    };
    if nx_atoms == 0 || ny_atoms == 0 || nz_atoms == 0 {
        return Err(Error::InvalidLatticeShape);
    }

    let mut geometry = Vec::with_capacity(nx_atoms * ny_atoms * nz_atoms);
    for x in 0..nx_atoms {
        for y in 0..ny_atoms {
            for z in 0..nz_atoms {
                geometry.push(Atom::new(
                    atom_type,
                    [spacing * x as f64, spacing * y as f64, spacing * z as f64],
                ));
            }
        }
    }

    let multiplicity = minimal_multiplicity(geometry.len(), atom_type, charge);
    MolecularData::new(geometry, basis, multiplicity, charge, format!("{shape}_{spacing:?}"))
}

/// A single neutral atom at the origin in its ground spin state.
///
/// # Errors
///
/// Returns [`Error::UnsupportedElement`] past krypton, where no ground-state
/// polarization is tabulated.
pub fn make_atom(atom_type: Element, basis: &str) -> Result<MolecularData, Error> {
    let unpaired = atom_type
        .unpaired_electrons()
        .ok_or(Error::UnsupportedElement(atom_type))?;
    let geometry = vec![Atom::new(atom_type, [0.0; 3])];
    MolecularData::new(geometry, basis, unpaired + 1, 0, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_neighbors_are_spacing_apart() {
        let ring = make_atomic_ring(6, 1.2, "sto-3g", Element::H, 0).unwrap();
        assert_eq!(ring.n_atoms, 6);
        for k in 0..6 {
            let next = (k + 1) % 6;
            let distance = ring.geometry[k].distance(&ring.geometry[next]);
            assert!((distance - 1.2).abs() < 1e-12);
            assert_eq!(ring.geometry[k].position[2], 0.0);
        }
        assert_eq!(ring.multiplicity, 1);
        assert_eq!(ring.description, "ring_1.2");
        assert_eq!(ring.name, "H6_sto-3g_singlet_ring_1.2");
    }

    #[test]
    fn odd_electron_count_gives_doublet() {
        let ring = make_atomic_ring(5, 1.0, "sto-3g", Element::H, 0).unwrap();
        assert_eq!(ring.multiplicity, 2);
        assert_eq!(ring.description, "ring_1.0");

        let cation = make_atomic_ring(5, 1.0, "sto-3g", Element::H, 1).unwrap();
        assert_eq!(cation.multiplicity, 1);
        assert_eq!(cation.n_electrons, 4);
    }

    #[test]
    fn ring_needs_two_atoms() {
        assert!(matches!(
            make_atomic_ring(1, 1.0, "sto-3g", Element::H, 0),
            Err(Error::InvalidRing(1))
        ));
    }

    #[test]
    fn lattice_descriptions_follow_shape() {
        let chain = make_atomic_lattice(4, 1, 1, 0.74, "sto-3g", Element::H, 0).unwrap();
        assert_eq!(chain.description, "linear_0.74");
        assert!((chain.geometry[3].position[0] - 2.22).abs() < 1e-12);

        let plane = make_atomic_lattice(2, 2, 1, 1.0, "sto-3g", Element::H, 0).unwrap();
        assert_eq!(plane.description, "planar_1.0");

        let cube = make_atomic_lattice(2, 2, 2, 1.0, "sto-3g", Element::H, 0).unwrap();
        assert_eq!(cube.description, "cubic_1.0");
        assert_eq!(cube.n_atoms, 8);
        assert_eq!(cube.geometry[1].position, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn lattice_needs_an_extended_side() {
        assert!(matches!(
            make_atomic_lattice(1, 1, 1, 1.0, "sto-3g", Element::H, 0),
            Err(Error::InvalidLatticeShape)
        ));
        assert!(matches!(
            make_atomic_lattice(3, 0, 1, 1.0, "sto-3g", Element::H, 0),
            Err(Error::InvalidLatticeShape)
        ));
    }

    #[test]
    fn atoms_take_ground_state_multiplicity() {
        assert_eq!(make_atom(Element::H, "sto-3g").unwrap().multiplicity, 2);
        assert_eq!(make_atom(Element::C, "sto-3g").unwrap().multiplicity, 3);
        assert_eq!(make_atom(Element::N, "sto-3g").unwrap().multiplicity, 4);
        assert_eq!(make_atom(Element::Ne, "sto-3g").unwrap().multiplicity, 1);
        assert_eq!(make_atom(Element::Cr, "sto-3g").unwrap().multiplicity, 7);

        let oxygen = make_atom(Element::O, "6-31g").unwrap();
        assert_eq!(oxygen.name, "O1_6-31g_triplet");
    }

    #[test]
    fn heavy_atoms_are_unsupported() {
        assert!(matches!(
            make_atom(Element::Xe, "sto-3g"),
            Err(Error::UnsupportedElement(Element::Xe))
        ));
    }
}
