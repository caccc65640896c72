use std::collections::HashMap;

use super::fermion::{FermionOperator, Ladder};
use super::qubit::{Pauli, QubitOperator};
use super::symbolic::Coefficient;

/// Maps a fermionic operator onto qubits with the Jordan-Wigner encoding.
///
/// `a†_j = ½ (X_j − iY_j) Z_{j−1} … Z_0` and
/// `a_j = ½ (X_j + iY_j) Z_{j−1} … Z_0`.
pub fn jordan_wigner(operator: &FermionOperator) -> QubitOperator {
    let mut images: HashMap<(usize, Ladder), QubitOperator> = HashMap::new();
    let mut transformed = QubitOperator::zero();
    for (term, &coefficient) in operator.terms() {
        let mut product = QubitOperator::constant_term(coefficient);
        for &factor in term {
            let image = images
                .entry(factor)
                .or_insert_with(|| ladder_image(factor.0, factor.1));
            product = &product * &*image;
        }
        transformed += product;
    }
    transformed
}

fn ladder_image(mode: usize, action: Ladder) -> QubitOperator {
    let parity = (0..mode).map(|qubit| (qubit, Pauli::Z));
    let x_term = parity.clone().chain([(mode, Pauli::X)]);
    let y_term = parity.chain([(mode, Pauli::Y)]);
    let y_coefficient = match action {
        Ladder::Create => Coefficient::new(0.0, -0.5),
        Ladder::Annihilate => Coefficient::new(0.0, 0.5),
    };
    QubitOperator::from_term(x_term, 0.5) + QubitOperator::from_term(y_term, y_coefficient)
}

#[cfg(test)]
mod tests {
    use super::Pauli::{X, Y, Z};
    use super::*;
    use crate::ops::fermion::{hopping, number_operator};
    use crate::ops::symbolic::{EQ_TOLERANCE, count_qubits};

    #[test]
    fn number_operator_maps_to_half_identity_minus_z() {
        let qubit = jordan_wigner(&number_operator(2, 1.0));
        let expected = QubitOperator::constant_term(0.5) - QubitOperator::from_term([(2, Z)], 0.5);
        assert!(qubit.approx_eq(&expected, EQ_TOLERANCE));
    }

    #[test]
    fn creation_operator_carries_parity_string() {
        let qubit = jordan_wigner(&FermionOperator::from_term([(2, Ladder::Create)], 1.0));
        assert_eq!(qubit.coefficient(&[(0, Z), (1, Z), (2, X)]).re, 0.5);
        assert_eq!(qubit.coefficient(&[(0, Z), (1, Z), (2, Y)]), Coefficient::new(0.0, -0.5));
        assert_eq!(count_qubits(&qubit), 3);
    }

    #[test]
    fn hopping_pair_maps_to_xzx_and_yzy() {
        let op = hopping(0, 2, 1.0) + hopping(2, 0, 1.0);
        let qubit = jordan_wigner(&op);
        let expected = QubitOperator::from_term([(0, X), (1, Z), (2, X)], 0.5)
            + QubitOperator::from_term([(0, Y), (1, Z), (2, Y)], 0.5);
        assert!(qubit.approx_eq(&expected, EQ_TOLERANCE));
    }

    #[test]
    fn identity_is_preserved() {
        let qubit = jordan_wigner(&FermionOperator::constant_term(1.5));
        assert_eq!(qubit.constant().re, 1.5);
        assert_eq!(count_qubits(&qubit), 0);
    }
}
