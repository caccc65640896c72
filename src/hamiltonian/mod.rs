//! Hamiltonian builders for model and molecular systems.
//!
//! - [`chemical_series`] – Rings, lattices and single atoms as [`MolecularData`].
//! - [`hubbard`] – Fermi-Hubbard model on rectangular lattices.
//! - [`jellium`] – Uniform electron gas in plane-wave and dual bases.
//! - [`mean_field_dwave`] – Mean-field d-wave superconductor.
//! - [`molecular_data`] – Molecular geometry, integrals and persistence.
//! - [`plane_wave`] – External potentials, Fourier transforms and Wigner-Seitz scaling.
//!
//! Optional switches for the model builders live in [`config`].
//!
//! [`MolecularData`]: molecular_data::MolecularData

pub mod chemical_series;
pub mod config;
pub mod hubbard;
pub mod jellium;
pub mod mean_field_dwave;
pub mod molecular_data;
pub mod plane_wave;
