use std::fmt;

use serde::{Deserialize, Serialize};

use super::symbolic::{Action, Coefficient, EQ_TOLERANCE, SymbolicOperator, Term, hermitian_conjugated};

/// Fermionic ladder operator kind.
///
/// `Annihilate` orders before `Create`, matching the `0`/`1` action codes
/// used in the textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ladder {
    Annihilate,
    Create,
}

impl Ladder {
    #[inline]
    pub fn dagger(self) -> Self {
        match self {
            Ladder::Annihilate => Ladder::Create,
            Ladder::Create => Ladder::Annihilate,
        }
    }
}

impl Action for Ladder {
    fn canonicalize(term: Term<Self>) -> Option<(Coefficient, Term<Self>)> {
        Some((Coefficient::new(1.0, 0.0), term))
    }

    fn adjoint(term: &[(usize, Self)]) -> Term<Self> {
        term.iter()
            .rev()
            .map(|&(mode, action)| (mode, action.dagger()))
            .collect()
    }

    fn fmt_factor(mode: usize, action: Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match action {
            Ladder::Create => write!(f, "{mode}^"),
            Ladder::Annihilate => write!(f, "{mode}"),
        }
    }
}

/// Sum of products of fermionic creation and annihilation operators.
pub type FermionOperator = SymbolicOperator<Ladder>;

/// `coefficient * a†_mode a_mode`.
pub fn number_operator(mode: usize, coefficient: impl Into<Coefficient>) -> FermionOperator {
    FermionOperator::from_term([(mode, Ladder::Create), (mode, Ladder::Annihilate)], coefficient)
}

/// `coefficient * a†_p a_q`.
pub fn hopping(p: usize, q: usize, coefficient: impl Into<Coefficient>) -> FermionOperator {
    FermionOperator::from_term([(p, Ladder::Create), (q, Ladder::Annihilate)], coefficient)
}

/// Rewrites an operator with every term in normal order.
///
/// Creation operators are moved left of annihilation operators, and within
/// each group modes are sorted in descending order. Anticommutation signs
/// and contraction terms are tracked; products containing a repeated
/// creation or annihilation operator vanish.
pub fn normal_ordered(operator: &FermionOperator) -> FermionOperator {
    let mut ordered = FermionOperator::zero();
    for (term, &coefficient) in operator.terms() {
        normal_order_term(term.clone(), coefficient, &mut ordered);
    }
    ordered
}

fn normal_order_term(mut term: Term<Ladder>, mut coefficient: Coefficient, out: &mut FermionOperator) {
    for i in 1..term.len() {
        for j in (1..=i).rev() {
            let (left_mode, left_action) = term[j - 1];
            let (right_mode, right_action) = term[j];

            if right_action == Ladder::Create && left_action == Ladder::Annihilate {
                term.swap(j - 1, j);
                coefficient = -coefficient;
                if left_mode == right_mode {
                    let mut contracted = Vec::with_capacity(term.len() - 2);
                    contracted.extend_from_slice(&term[..j - 1]);
                    contracted.extend_from_slice(&term[j + 1..]);
                    normal_order_term(contracted, -coefficient, out);
                }
            } else if right_action == left_action {
                if left_mode == right_mode {
                    return;
                }
                if right_mode > left_mode {
                    term.swap(j - 1, j);
                    coefficient = -coefficient;
                }
            }
        }
    }
    out.add_term(term, coefficient);
}

/// Whether an operator equals its adjoint once both are normal ordered.
pub fn is_hermitian(operator: &FermionOperator) -> bool {
    let ordered = normal_ordered(operator);
    let adjoint = normal_ordered(&hermitian_conjugated(operator));
    ordered.approx_eq(&adjoint, EQ_TOLERANCE)
}
