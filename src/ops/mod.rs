//! Second-quantized operator algebra.
//!
//! Fermionic and qubit operators share one sparse representation,
//! [`SymbolicOperator`], keyed by canonical products of single-mode factors.

mod fermion;
mod jordan_wigner;
mod qubit;
mod symbolic;

pub use fermion::{FermionOperator, Ladder, hopping, is_hermitian, normal_ordered, number_operator};
pub use jordan_wigner::jordan_wigner;
pub use qubit::{Pauli, QubitOperator};
pub use symbolic::{
    Action, Coefficient, EQ_TOLERANCE, SymbolicOperator, Term, count_qubits, hermitian_conjugated,
};
