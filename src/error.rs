//! Error types for Hamiltonian construction.
//!
//! Errors are grouped by where they originate: lattice and grid setup,
//! nuclear geometry, molecular bookkeeping, and integral handling.
//! File-format failures live in [`crate::io::Error`] and are wrapped here
//! when they surface through [`MolecularData`](crate::hamiltonians::MolecularData).

use thiserror::Error;

use crate::model::types::Element;

/// Errors that can occur while building Hamiltonians or molecular data.
#[derive(Debug, Error)]
pub enum Error {
    /// A lattice model was given a side of length zero.
    #[error("lattice dimensions must be positive (got {x_dimension} x {y_dimension})")]
    InvalidLattice {
        /// Number of sites along x.
        x_dimension: usize,
        /// Number of sites along y.
        y_dimension: usize,
    },

    /// A plane-wave grid was constructed with invalid parameters.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Spatial dimension must be a positive integer.
    #[error("dimension must be a positive integer (got {0})")]
    InvalidDimension(usize),

    /// A nucleus has the wrong number of coordinates for the grid.
    #[error("invalid geometry coordinate for nucleus {index}: expected {expected} components, found {found}")]
    InvalidGeometry {
        /// Position of the offending nucleus in the geometry list.
        index: usize,
        /// Grid dimensionality.
        expected: usize,
        /// Coordinate count actually supplied.
        found: usize,
    },

    /// The Madelung constant only applies to uniform (jellium) systems.
    #[error("constant term unsupported for non-uniform systems")]
    ConstantWithGeometry,

    /// No ground-state polarization is tabulated for this element.
    #[error("element '{0}' is not supported for atomic spin assignment")]
    UnsupportedElement(Element),

    /// Spin multiplicity outside the nameable range.
    #[error("invalid spin multiplicity {0} (expected 1 through 12)")]
    InvalidMultiplicity(u32),

    /// The requested charge would leave a negative number of electrons.
    #[error("charge {charge} exceeds the total nuclear charge {protons}")]
    InvalidCharge {
        /// Net molecular charge.
        charge: i32,
        /// Sum of atomic numbers.
        protons: u32,
    },

    /// A ring of atoms needs at least two members to have a radius.
    #[error("an atomic ring needs at least two atoms (got {0})")]
    InvalidRing(usize),

    /// An atomic lattice needs at least one side with more than one atom.
    #[error("invalid lattice dimensions: at least one side must hold more than one atom")]
    InvalidLatticeShape,

    /// Two nuclei sit on the same point, so the nuclear repulsion diverges.
    #[error("nuclei {i} and {j} coincide")]
    CoincidentNuclei {
        /// First atom index.
        i: usize,
        /// Second atom index.
        j: usize,
    },

    /// One- and two-body integrals have not been attached to the molecule.
    #[error("molecular integrals are not available")]
    MissingIntegrals,

    /// Integral arrays with inconsistent shapes.
    #[error("integral shape mismatch: {0}")]
    IntegralShape(String),

    /// Active-space reduction was requested without any active orbitals.
    #[error("some active indices are required for reduction")]
    EmptyActiveSpace,

    /// An orbital index lies outside the spatial orbital basis.
    #[error("orbital index {index} out of range for {n_orbitals} orbitals")]
    OrbitalIndex {
        /// Offending index.
        index: usize,
        /// Number of spatial orbitals.
        n_orbitals: usize,
    },

    /// Reading or writing molecular data failed.
    #[error(transparent)]
    Io(#[from] crate::io::Error),
}

impl Error {
    /// Creates an [`InvalidGeometry`](Error::InvalidGeometry) error.
    pub fn invalid_geometry(index: usize, expected: usize, found: usize) -> Self {
        Self::InvalidGeometry {
            index,
            expected,
            found,
        }
    }

    /// Creates an [`InvalidGrid`](Error::InvalidGrid) error.
    pub fn invalid_grid(details: impl Into<String>) -> Self {
        Self::InvalidGrid(details.into())
    }

    /// Creates an [`IntegralShape`](Error::IntegralShape) error.
    pub fn integral_shape(details: impl Into<String>) -> Self {
        Self::IntegralShape(details.into())
    }
}
