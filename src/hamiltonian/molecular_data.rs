//! Molecular geometry, bookkeeping and integrals.
//!
//! [`MolecularData`] records a molecule's geometry, basis, charge and spin,
//! derives its electron counts and nuclear repulsion, and stores results
//! supplied by an external electronic-structure calculation. Instances are
//! persisted as JSON under a name derived from the molecule itself.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::io::json;
use crate::model::atom::Atom;
use crate::model::interaction::{InteractionOperator, TwoBodyTensor, spinorb_from_spatial};
use crate::model::types::Element;

pub use crate::model::types::periodic_table;

/// Directory used for `filename` when none is given.
pub const DEFAULT_DATA_DIRECTORY: &str = "data";

const BOHR_RADIUS_ANGSTROM: f64 = 0.529177210903;

const MULTIPLICITY_NAMES: [&str; 12] = [
    "singlet",
    "doublet",
    "triplet",
    "quartet",
    "quintet",
    "sextet",
    "septet",
    "octet",
    "nonet",
    "dectet",
    "undectet",
    "duodectet",
];

/// Builds the canonical name of a molecule.
///
/// Atoms are grouped by element in order of atomic number, e.g.
/// `H2-O1_sto-3g_singlet`, followed by `_{q}+` or `_{q}-` for charged species
/// and `_{description}` when one is given.
pub fn name_molecule(
    geometry: &[Atom],
    basis: &str,
    multiplicity: u32,
    charge: i32,
    description: &str,
) -> Result<String, Error> {
    let spin_name = multiplicity
        .checked_sub(1)
        .and_then(|idx| MULTIPLICITY_NAMES.get(idx as usize))
        .ok_or(Error::InvalidMultiplicity(multiplicity))?;

    let mut counts: BTreeMap<Element, usize> = BTreeMap::new();
    for atom in geometry {
        *counts.entry(atom.element).or_default() += 1;
    }
    let formula: Vec<String> = counts
        .iter()
        .map(|(element, count)| format!("{element}{count}"))
        .collect();

    let mut name = format!("{}_{basis}_{spin_name}", formula.join("-"));
    if charge > 0 {
        name.push_str(&format!("_{charge}+"));
    } else if charge < 0 {
        name.push_str(&format!("_{}-", charge.unsigned_abs()));
    }
    if !description.is_empty() {
        name.push('_');
        name.push_str(description);
    }
    Ok(name)
}

/// A molecule and everything known about its electronic structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MolecularData {
    /// Atoms with positions in Ångströms.
    pub geometry: Vec<Atom>,
    pub basis: String,
    /// Spin multiplicity `2S + 1`.
    pub multiplicity: u32,
    pub charge: i32,
    pub description: String,
    pub name: String,
    /// Path of the data file without its `.json` extension.
    pub filename: PathBuf,

    pub n_atoms: usize,
    /// Elements sorted by atomic number.
    pub atoms: Vec<Element>,
    /// Atomic numbers, in the order of [`atoms`](Self::atoms).
    pub protons: Vec<u32>,
    pub n_electrons: u32,
    /// Nuclear repulsion energy in Hartree.
    pub nuclear_repulsion: f64,

    pub n_orbitals: Option<usize>,
    pub n_qubits: Option<usize>,

    pub hf_energy: Option<f64>,
    pub mp2_energy: Option<f64>,
    pub cisd_energy: Option<f64>,
    pub ccsd_energy: Option<f64>,
    pub fci_energy: Option<f64>,

    pub orbital_energies: Option<Vec<f64>>,
    pub canonical_orbitals: Option<DMatrix<f64>>,
    pub overlap_integrals: Option<DMatrix<f64>>,
    one_body_integrals: Option<DMatrix<f64>>,
    two_body_integrals: Option<TwoBodyTensor>,

    /// Named scalar results of additional calculations.
    pub general_calculations: BTreeMap<String, f64>,
}

impl MolecularData {
    /// Creates a molecule from its geometry and electronic state.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidMultiplicity`] outside `1..=12`.
    /// - [`Error::InvalidCharge`] if the charge removes more electrons than
    ///   the nuclei provide.
    /// - [`Error::CoincidentNuclei`] if two atoms share a position.
    pub fn new(
        geometry: Vec<Atom>,
        basis: impl Into<String>,
        multiplicity: u32,
        charge: i32,
        description: impl Into<String>,
    ) -> Result<Self, Error> {
        let basis = basis.into();
        let description = description.into();
        let name = name_molecule(&geometry, &basis, multiplicity, charge, &description)?;

        let mut atoms: Vec<Element> = geometry.iter().map(|atom| atom.element).collect();
        atoms.sort();
        let protons: Vec<u32> = atoms.iter().map(|e| u32::from(e.atomic_number())).collect();
        let total_protons: u32 = protons.iter().sum();
        let n_electrons = u32::try_from(i64::from(total_protons) - i64::from(charge)).map_err(|_| {
            Error::InvalidCharge {
                charge,
                protons: total_protons,
            }
        })?;

        let nuclear_repulsion = nuclear_repulsion(&geometry)?;
        let filename = Path::new(DEFAULT_DATA_DIRECTORY).join(&name);

        debug!(%name, n_electrons, nuclear_repulsion, "created molecular data");
        Ok(Self {
            n_atoms: geometry.len(),
            geometry,
            basis,
            multiplicity,
            charge,
            description,
            name,
            filename,
            atoms,
            protons,
            n_electrons,
            nuclear_repulsion,
            n_orbitals: None,
            n_qubits: None,
            hf_energy: None,
            mp2_energy: None,
            cisd_energy: None,
            ccsd_energy: None,
            fci_energy: None,
            orbital_energies: None,
            canonical_orbitals: None,
            overlap_integrals: None,
            one_body_integrals: None,
            two_body_integrals: None,
            general_calculations: BTreeMap::new(),
        })
    }

    /// Replaces the data file path; a trailing `.json` is dropped.
    pub fn with_filename(mut self, filename: impl AsRef<Path>) -> Self {
        self.filename = strip_json_extension(filename.as_ref());
        self
    }

    /// Keeps the molecule's name but stores it under another directory.
    pub fn with_data_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.filename = directory.as_ref().join(&self.name);
        self
    }

    /// Number of spin-up electrons.
    pub fn n_alpha_electrons(&self) -> u32 {
        self.n_electrons.saturating_add(self.multiplicity).saturating_sub(1) / 2
    }

    /// Number of spin-down electrons.
    pub fn n_beta_electrons(&self) -> u32 {
        self.n_electrons.saturating_add(1).saturating_sub(self.multiplicity) / 2
    }

    /// Attaches spatial-orbital integrals from an external calculation.
    ///
    /// The two-body tensor follows the `a†_p a†_q a_r a_s` ordering.
    pub fn set_integrals(&mut self, one_body: DMatrix<f64>, two_body: TwoBodyTensor) -> Result<(), Error> {
        check_integral_shapes(&one_body, &two_body)?;
        self.n_orbitals = Some(one_body.nrows());
        self.n_qubits = Some(2 * one_body.nrows());
        self.one_body_integrals = Some(one_body);
        self.two_body_integrals = Some(two_body);
        Ok(())
    }

    /// Spatial-orbital one- and two-body integrals.
    pub fn get_integrals(&self) -> Result<(&DMatrix<f64>, &TwoBodyTensor), Error> {
        match (&self.one_body_integrals, &self.two_body_integrals) {
            (Some(one_body), Some(two_body)) => Ok((one_body, two_body)),
            _ => Err(Error::MissingIntegrals),
        }
    }

    /// Freezes `occupied` orbitals into a core energy and restricts the
    /// integrals to `active` orbitals.
    ///
    /// Returns `(core_constant, one_body, two_body)` over the active space.
    pub fn get_active_space_integrals(
        &self,
        occupied: &[usize],
        active: &[usize],
    ) -> Result<(f64, DMatrix<f64>, TwoBodyTensor), Error> {
        let (one_body, two_body) = self.get_integrals()?;
        if active.is_empty() {
            return Err(Error::EmptyActiveSpace);
        }
        let n_orbitals = one_body.nrows();
        if let Some(&index) = occupied.iter().chain(active).find(|&&i| i >= n_orbitals) {
            return Err(Error::OrbitalIndex { index, n_orbitals });
        }

        let mut core_constant = 0.0;
        for &i in occupied {
            core_constant += 2.0 * one_body[(i, i)];
            for &j in occupied {
                core_constant += 2.0 * two_body[[i, j, j, i]] - two_body[[i, j, i, j]];
            }
        }

        let n_active = active.len();
        let mut active_one_body = DMatrix::zeros(n_active, n_active);
        for (a, &u) in active.iter().enumerate() {
            for (b, &v) in active.iter().enumerate() {
                let mut value = one_body[(u, v)];
                for &i in occupied {
                    value += 2.0 * two_body[[i, u, v, i]] - two_body[[i, u, i, v]];
                }
                active_one_body[(a, b)] = value;
            }
        }

        let mut active_two_body = TwoBodyTensor::zeros(n_active);
        for (a, &p) in active.iter().enumerate() {
            for (b, &q) in active.iter().enumerate() {
                for (c, &r) in active.iter().enumerate() {
                    for (d, &s) in active.iter().enumerate() {
                        active_two_body[[a, b, c, d]] = two_body[[p, q, r, s]];
                    }
                }
            }
        }

        Ok((core_constant, active_one_body, active_two_body))
    }

    /// Second-quantized molecular Hamiltonian over spin-orbitals.
    ///
    /// With no occupied orbitals and `active` unset, every orbital is kept.
    /// Otherwise `active` defaults to the orbitals not listed in `occupied`.
    pub fn get_molecular_hamiltonian(
        &self,
        occupied: &[usize],
        active: Option<&[usize]>,
    ) -> Result<InteractionOperator, Error> {
        let (one_body, two_body) = self.get_integrals()?;
        let mut constant = self.nuclear_repulsion;

        let (one_body, two_body) = if occupied.is_empty() && active.is_none() {
            spinorb_from_spatial(one_body, two_body)?
        } else {
            let remaining: Vec<usize>;
            let active = match active {
                Some(active) => active,
                None => {
                    remaining = (0..one_body.nrows()).filter(|i| !occupied.contains(i)).collect();
                    &remaining
                }
            };
            let (core, one_body, two_body) = self.get_active_space_integrals(occupied, active)?;
            constant += core;
            spinorb_from_spatial(&one_body, &two_body)?
        };

        InteractionOperator::new(constant, one_body, two_body.map(|g| 0.5 * g))
    }

    /// Path of the JSON data file.
    pub fn data_path(&self) -> PathBuf {
        with_json_extension(&self.filename)
    }

    /// Writes the molecule to `<filename>.json`.
    pub fn save(&self) -> Result<(), Error> {
        let path = self.data_path();
        json::write_file(&path, self)?;
        debug!(path = %path.display(), "saved molecular data");
        Ok(())
    }

    /// Reads a molecule saved with [`save`](Self::save). The `.json`
    /// extension is optional.
    ///
    /// # Errors
    ///
    /// Besides I/O and JSON failures, returns [`Error::InvalidMultiplicity`]
    /// or [`Error::IntegralShape`] when the stored fields contradict each
    /// other.
    pub fn load(filename: impl AsRef<Path>) -> Result<Self, Error> {
        let path = with_json_extension(&strip_json_extension(filename.as_ref()));
        let molecule: Self = json::read_file(&path)?;
        molecule.validate()?;
        debug!(path = %path.display(), name = %molecule.name, "loaded molecular data");
        Ok(molecule)
    }

    fn validate(&self) -> Result<(), Error> {
        if !(1..=MULTIPLICITY_NAMES.len() as u32).contains(&self.multiplicity) {
            return Err(Error::InvalidMultiplicity(self.multiplicity));
        }

        let n_orbitals = match (&self.one_body_integrals, &self.two_body_integrals) {
            (Some(one_body), Some(two_body)) => {
                check_integral_shapes(one_body, two_body)?;
                Some(one_body.nrows())
            }
            (None, None) => None,
            _ => {
                return Err(Error::integral_shape(
                    "one-body and two-body integrals must be stored together",
                ));
            }
        };
        let Some(n) = n_orbitals else {
            return Ok(());
        };
        if self.n_orbitals != Some(n) || self.n_qubits != Some(2 * n) {
            return Err(Error::integral_shape(format!(
                "integrals span {n} orbitals but n_orbitals is {:?} and n_qubits is {:?}",
                self.n_orbitals, self.n_qubits
            )));
        }
        Ok(())
    }
}

fn check_integral_shapes(one_body: &DMatrix<f64>, two_body: &TwoBodyTensor) -> Result<(), Error> {
    if !one_body.is_square() || one_body.nrows() != two_body.dim() {
        return Err(Error::integral_shape(format!(
            "one-body {}x{} and two-body side {} disagree",
            one_body.nrows(),
            one_body.ncols(),
            two_body.dim()
        )));
    }
    Ok(())
}

/// Appends `.json` without touching dots already in the name.
fn with_json_extension(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(".json");
    PathBuf::from(raw)
}

fn strip_json_extension(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == "json") {
        path.with_extension("")
    } else {
        path.to_path_buf()
    }
}

/// `Σ_{i<j} Z_i Z_j / |R_i − R_j|` with distances converted to Bohr.
fn nuclear_repulsion(geometry: &[Atom]) -> Result<f64, Error> {
    let mut energy = 0.0;
    for (i, first) in geometry.iter().enumerate() {
        for (j, second) in geometry.iter().enumerate().skip(i + 1) {
            let distance = first.distance(second) / BOHR_RADIUS_ANGSTROM;
            if distance == 0.0 {
                return Err(Error::CoincidentNuclei { i, j });
            }
            energy += first.element.nuclear_charge() * second.element.nuclear_charge() / distance;
        }
    }
    Ok(energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{EQ_TOLERANCE, Ladder::Annihilate, Ladder::Create};

    fn h2() -> MolecularData {
        let geometry = vec![
            Atom::new(Element::H, [0.0, 0.0, 0.0]),
            Atom::new(Element::H, [0.0, 0.0, 0.7414]),
        ];
        MolecularData::new(geometry, "sto-3g", 1, 0, "0.7414").unwrap()
    }

    fn water() -> Vec<Atom> {
        vec![
            Atom::new(Element::O, [0.0, 0.0, 0.0]),
            Atom::new(Element::H, [0.757, 0.586, 0.0]),
            Atom::new(Element::H, [-0.757, 0.586, 0.0]),
        ]
    }

    #[test]
    fn names_follow_formula_basis_spin_charge_and_tag() {
        assert_eq!(
            name_molecule(&water(), "6-31g", 1, 0, "").unwrap(),
            "H2-O1_6-31g_singlet"
        );
        assert_eq!(
            name_molecule(&water(), "sto-3g", 2, 1, "eq").unwrap(),
            "H2-O1_sto-3g_doublet_1+_eq"
        );
        assert_eq!(
            name_molecule(&water(), "sto-3g", 2, -1, "").unwrap(),
            "H2-O1_sto-3g_doublet_1-"
        );
        assert_eq!(h2().name, "H2_sto-3g_singlet_0.7414");
    }

    #[test]
    fn multiplicity_out_of_range_is_rejected() {
        assert!(matches!(
            name_molecule(&water(), "sto-3g", 0, 0, ""),
            Err(Error::InvalidMultiplicity(0))
        ));
        assert!(matches!(
            name_molecule(&water(), "sto-3g", 13, 0, ""),
            Err(Error::InvalidMultiplicity(13))
        ));
        assert_eq!(name_molecule(&water(), "b", 12, 0, "").unwrap(), "H2-O1_b_duodectet");
    }

    #[test]
    fn electron_bookkeeping() {
        let molecule = MolecularData::new(water(), "sto-3g", 2, 1, "").unwrap();
        assert_eq!(molecule.n_atoms, 3);
        assert_eq!(molecule.atoms, vec![Element::H, Element::H, Element::O]);
        assert_eq!(molecule.protons, vec![1, 1, 8]);
        assert_eq!(molecule.n_electrons, 9);
        assert_eq!(molecule.n_alpha_electrons(), 5);
        assert_eq!(molecule.n_beta_electrons(), 4);
        assert_eq!(molecule.filename, Path::new("data").join(&molecule.name));
    }

    #[test]
    fn excessive_charge_is_rejected() {
        let geometry = vec![Atom::new(Element::He, [0.0; 3])];
        assert!(matches!(
            MolecularData::new(geometry, "sto-3g", 1, 3, ""),
            Err(Error::InvalidCharge { charge: 3, protons: 2 })
        ));
    }

    #[test]
    fn nuclear_repulsion_uses_bohr() {
        let molecule = h2();
        let expected = BOHR_RADIUS_ANGSTROM / 0.7414;
        assert!((molecule.nuclear_repulsion - expected).abs() < 1e-12);
    }

    #[test]
    fn coincident_nuclei_are_rejected() {
        let geometry = vec![
            Atom::new(Element::H, [0.0; 3]),
            Atom::new(Element::Li, [1.0, 0.0, 0.0]),
            Atom::new(Element::H, [0.0; 3]),
        ];
        assert!(matches!(
            MolecularData::new(geometry, "sto-3g", 1, 0, ""),
            Err(Error::CoincidentNuclei { i: 0, j: 2 })
        ));
    }

    fn with_two_orbital_integrals() -> MolecularData {
        let mut molecule = h2();
        let one_body = DMatrix::from_row_slice(2, 2, &[-1.25, 0.0, 0.0, -0.47]);
        let mut two_body = TwoBodyTensor::zeros(2);
        two_body[[0, 0, 0, 0]] = 0.67;
        two_body[[1, 1, 1, 1]] = 0.70;
        two_body[[0, 1, 1, 0]] = 0.66;
        two_body[[1, 0, 0, 1]] = 0.66;
        two_body[[0, 1, 0, 1]] = 0.18;
        two_body[[1, 0, 1, 0]] = 0.18;
        molecule.set_integrals(one_body, two_body).unwrap();
        molecule
    }

    #[test]
    fn integrals_are_required() {
        assert!(matches!(h2().get_integrals(), Err(Error::MissingIntegrals)));
        assert!(matches!(
            h2().get_molecular_hamiltonian(&[], None),
            Err(Error::MissingIntegrals)
        ));
    }

    #[test]
    fn set_integrals_records_orbital_counts() {
        let molecule = with_two_orbital_integrals();
        assert_eq!(molecule.n_orbitals, Some(2));
        assert_eq!(molecule.n_qubits, Some(4));

        let mut bad = h2();
        assert!(matches!(
            bad.set_integrals(DMatrix::zeros(2, 2), TwoBodyTensor::zeros(3)),
            Err(Error::IntegralShape(_))
        ));
    }

    #[test]
    fn active_space_folds_core_into_constant() {
        let molecule = with_two_orbital_integrals();
        let (core, one_body, two_body) = molecule.get_active_space_integrals(&[0], &[1]).unwrap();
        // 2 h00 + 2 g0000 - g0000
        assert!((core - (2.0 * -1.25 + 0.67)).abs() < 1e-12);
        // h11 + 2 g0110 - g0101
        assert!((one_body[(0, 0)] - (-0.47 + 2.0 * 0.66 - 0.18)).abs() < 1e-12);
        assert_eq!(two_body[[0, 0, 0, 0]], 0.70);
    }

    #[test]
    fn active_space_validation() {
        let molecule = with_two_orbital_integrals();
        assert!(matches!(
            molecule.get_active_space_integrals(&[0], &[]),
            Err(Error::EmptyActiveSpace)
        ));
        assert!(matches!(
            molecule.get_active_space_integrals(&[0], &[2]),
            Err(Error::OrbitalIndex { index: 2, n_orbitals: 2 })
        ));
    }

    #[test]
    fn molecular_hamiltonian_halves_two_body_terms() {
        let molecule = with_two_orbital_integrals();
        let hamiltonian = molecule.get_molecular_hamiltonian(&[], None).unwrap();
        assert_eq!(hamiltonian.n_qubits(), 4);
        assert!((hamiltonian.constant - molecule.nuclear_repulsion).abs() < EQ_TOLERANCE);
        assert_eq!(hamiltonian.one_body[(3, 3)], -0.47);
        assert!((hamiltonian.two_body[[0, 1, 1, 0]] - 0.335).abs() < EQ_TOLERANCE);

        let fermion = hamiltonian.to_fermion_operator();
        assert_eq!(fermion.coefficient(&[(2, Create), (2, Annihilate)]).re, -0.47);
    }

    #[test]
    fn frozen_core_defaults_active_space_to_remaining_orbitals() {
        let molecule = with_two_orbital_integrals();
        let hamiltonian = molecule.get_molecular_hamiltonian(&[0], None).unwrap();
        assert_eq!(hamiltonian.n_qubits(), 2);
        let expected = molecule.nuclear_repulsion + 2.0 * -1.25 + 0.67;
        assert!((hamiltonian.constant - expected).abs() < 1e-12);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut molecule = with_two_orbital_integrals().with_data_directory(dir.path());
        molecule.hf_energy = Some(-1.1167);
        molecule.general_calculations.insert("dipole".into(), 0.0);
        molecule.save().expect("save");

        assert!(molecule.data_path().exists());
        let with_extension = dir.path().join(format!("{}.json", molecule.name));
        let restored = MolecularData::load(&with_extension).expect("load");
        assert_eq!(restored, molecule);
        let restored = MolecularData::load(&molecule.filename).expect("load without extension");
        assert_eq!(restored.hf_energy, Some(-1.1167));
    }

    fn save_edited(molecule: &MolecularData, edit: impl FnOnce(&mut serde_json::Value)) {
        let mut document = serde_json::to_value(molecule).unwrap();
        edit(&mut document);
        std::fs::write(molecule.data_path(), document.to_string()).unwrap();
    }

    #[test]
    fn load_rejects_truncated_two_body_buffer() {
        let dir = tempfile::tempdir().expect("temp dir");
        let molecule = with_two_orbital_integrals().with_data_directory(dir.path());
        save_edited(&molecule, |doc| {
            doc["two_body_integrals"] = serde_json::json!({ "n": 2, "data": [0.5] });
        });

        let err = MolecularData::load(&molecule.filename).unwrap_err();
        assert!(matches!(err, Error::Io(crate::io::Error::Json { .. })), "{err}");
    }

    #[test]
    fn load_rejects_disagreeing_integral_sizes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let molecule = with_two_orbital_integrals().with_data_directory(dir.path());
        save_edited(&molecule, |doc| {
            doc["two_body_integrals"] = serde_json::json!({ "n": 1, "data": [0.5] });
        });
        assert!(matches!(
            MolecularData::load(&molecule.filename),
            Err(Error::IntegralShape(_))
        ));

        save_edited(&molecule, |doc| doc["two_body_integrals"] = serde_json::Value::Null);
        assert!(matches!(
            MolecularData::load(&molecule.filename),
            Err(Error::IntegralShape(_))
        ));
    }

    #[test]
    fn load_rejects_stale_orbital_counts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let molecule = with_two_orbital_integrals().with_data_directory(dir.path());
        save_edited(&molecule, |doc| doc["n_qubits"] = serde_json::json!(6));
        assert!(matches!(
            MolecularData::load(&molecule.filename),
            Err(Error::IntegralShape(_))
        ));

        save_edited(&molecule, |doc| doc["multiplicity"] = serde_json::json!(0));
        assert!(matches!(
            MolecularData::load(&molecule.filename),
            Err(Error::InvalidMultiplicity(0))
        ));
    }

    #[test]
    fn with_filename_strips_json_extension() {
        let molecule = h2().with_filename("results/h2.json");
        assert_eq!(molecule.filename, PathBuf::from("results/h2"));
        assert_eq!(molecule.data_path(), PathBuf::from("results/h2.json"));
    }

    #[test]
    fn periodic_table_is_reexported() {
        assert_eq!(periodic_table()[0], Element::H);
    }
}
