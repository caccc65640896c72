//! Core data structures shared by the Hamiltonian builders.
//!
//! - [`atom`] – Atoms with Cartesian coordinates and nuclei placed on a grid.
//! - [`types`] – Periodic table elements and their ground-state properties.
//! - [`grid`] – Hypercubic plane-wave grids and spin-orbital numbering.
//! - [`interaction`] – Dense one- and two-body Hamiltonians.

pub mod atom;
pub mod grid;
pub mod interaction;
pub mod types;
