use std::fmt;

use serde::{Deserialize, Serialize};

use super::symbolic::{Action, Coefficient, SymbolicOperator, Term};

/// Single-qubit Pauli matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    /// Product `self * rhs` as a phase and a Pauli, `None` being identity.
    pub fn product(self, rhs: Pauli) -> (Coefficient, Option<Pauli>) {
        let i = Coefficient::new(0.0, 1.0);
        match (self, rhs) {
            (Pauli::X, Pauli::X) | (Pauli::Y, Pauli::Y) | (Pauli::Z, Pauli::Z) => {
                (Coefficient::new(1.0, 0.0), None)
            }
            (Pauli::X, Pauli::Y) => (i, Some(Pauli::Z)),
            (Pauli::Y, Pauli::X) => (-i, Some(Pauli::Z)),
            (Pauli::Y, Pauli::Z) => (i, Some(Pauli::X)),
            (Pauli::Z, Pauli::Y) => (-i, Some(Pauli::X)),
            (Pauli::Z, Pauli::X) => (i, Some(Pauli::Y)),
            (Pauli::X, Pauli::Z) => (-i, Some(Pauli::Y)),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Pauli::X => "X",
            Pauli::Y => "Y",
            Pauli::Z => "Z",
        };
        f.write_str(symbol)
    }
}

impl Action for Pauli {
    fn canonicalize(mut term: Term<Self>) -> Option<(Coefficient, Term<Self>)> {
        // Paulis on different qubits commute; a stable sort keeps the order
        // of factors that share a qubit.
        term.sort_by_key(|&(qubit, _)| qubit);

        let mut phase = Coefficient::new(1.0, 0.0);
        let mut reduced: Term<Self> = Vec::with_capacity(term.len());
        for (qubit, pauli) in term {
            match reduced.last_mut() {
                Some(last) if last.0 == qubit => {
                    let (factor, product) = last.1.product(pauli);
                    phase *= factor;
                    match product {
                        Some(p) => last.1 = p,
                        None => {
                            reduced.pop();
                        }
                    }
                }
                _ => reduced.push((qubit, pauli)),
            }
        }
        Some((phase, reduced))
    }

    fn adjoint(term: &[(usize, Self)]) -> Term<Self> {
        term.to_vec()
    }

    fn fmt_factor(mode: usize, action: Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{action}{mode}")
    }
}

/// Sum of Pauli strings.
pub type QubitOperator = SymbolicOperator<Pauli>;
