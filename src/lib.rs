//! Second-quantized Hamiltonians for lattice models, the uniform electron
//! gas, plane-wave systems and molecules, with the operator algebra needed to
//! manipulate them and map them onto qubits.
//!
//! # Features
//!
//! - **Lattice models** — Fermi-Hubbard (spinful or spinless) and mean-field
//!   d-wave Hamiltonians on rectangular lattices
//! - **Jellium and plane waves** — Kinetic, Coulomb and nuclear potential
//!   terms in plane-wave or dual bases, with Fourier transforms between them
//!   and closed-form Jordan-Wigner encodings
//! - **Molecules** — Geometry bookkeeping, naming, active-space reduction and
//!   JSON persistence through [`MolecularData`](hamiltonians::MolecularData)
//! - **Operator algebra** — Sparse fermionic and qubit operators with normal
//!   ordering, Hermitian conjugation and the Jordan-Wigner transform
//!
//! # Quick Start
//!
//! Every builder is available from the [`hamiltonians`] module:
//!
//! ```
//! use fermi_forge::hamiltonians::{fermi_hubbard, jellium_model};
//! use fermi_forge::{Error, Grid, HubbardConfig, JelliumConfig};
//! use fermi_forge::{count_qubits, is_hermitian, jordan_wigner};
//!
//! // 2x2 periodic Hubbard model with U/t = 4
//! let hubbard = fermi_hubbard(2, 2, 1.0, 4.0, &HubbardConfig::default())?;
//! assert!(is_hermitian(&hubbard));
//!
//! // Eight spin-orbitals map to eight qubits
//! let qubits = jordan_wigner(&hubbard);
//! assert_eq!(count_qubits(&qubits), 8);
//!
//! // Spinless jellium on a three-point line in the dual basis
//! let grid = Grid::new(1, 3, 1.0)?;
//! let config = JelliumConfig {
//!     plane_wave: false,
//!     spinless: true,
//!     ..Default::default()
//! };
//! let jellium = jellium_model(&grid, &config);
//! assert!(is_hermitian(&jellium));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`hamiltonians`] — All Hamiltonian builders and [`MolecularData`](hamiltonians::MolecularData)
//! - [`io`] — XYZ geometries and JSON documents
//!
//! # Data Types
//!
//! - [`FermionOperator`], [`QubitOperator`] — Sparse operator sums
//! - [`InteractionOperator`] — Dense one- and two-body Hamiltonians
//! - [`Grid`] — Plane-wave / real-space grid
//! - [`Atom`], [`Nucleus`], [`Element`] — Geometry building blocks
//!
//! ## Configuration
//!
//! - [`HubbardConfig`], [`DwaveConfig`], [`JelliumConfig`]

mod error;
mod hamiltonian;
mod model;
mod ops;

pub mod hamiltonians;
pub mod io;

pub use error::Error;

pub use model::atom::{Atom, Nucleus};
pub use model::grid::{Grid, PointIndices, Spin, spins};
pub use model::interaction::{InteractionOperator, TwoBodyTensor, spinorb_from_spatial};
pub use model::types::{Element, ParseElementError};

pub use ops::{
    Action, Coefficient, EQ_TOLERANCE, FermionOperator, Ladder, Pauli, QubitOperator,
    SymbolicOperator, Term, count_qubits, hermitian_conjugated, hopping, is_hermitian,
    jordan_wigner, normal_ordered, number_operator,
};

pub use hamiltonian::config::{DwaveConfig, HubbardConfig, JelliumConfig};
pub use hamiltonian::molecular_data::{DEFAULT_DATA_DIRECTORY, name_molecule};
