//! Sparse sums of operator products with complex coefficients.
//!
//! [`SymbolicOperator`] is shared by fermionic and qubit operators. The two
//! differ only in their factor alphabet ([`Action`]): how a product of
//! factors is brought to canonical form, and how a term is adjointed.

use std::collections::BTreeMap;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::Complex;

/// Complex coefficient type used by all operators.
pub type Coefficient = Complex<f64>;

/// Tolerance used when comparing operators for equality.
pub const EQ_TOLERANCE: f64 = 1e-8;

/// A product of single-mode factors, read left to right.
pub type Term<A> = Vec<(usize, A)>;

/// Factor alphabet of a symbolic operator.
pub trait Action: Copy + Ord + fmt::Debug {
    /// Brings a product of factors into canonical form.
    ///
    /// Returns the phase picked up by reordering, or `None` when the
    /// product vanishes identically.
    fn canonicalize(term: Term<Self>) -> Option<(Coefficient, Term<Self>)>;

    /// Adjoint of a canonical term, itself canonical.
    fn adjoint(term: &[(usize, Self)]) -> Term<Self>;

    /// Writes a single factor, e.g. `3^` or `X3`.
    fn fmt_factor(mode: usize, action: Self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Linear combination of operator products.
///
/// Terms are stored in canonical form in an ordered map, so iteration and
/// display are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicOperator<A: Action> {
    terms: BTreeMap<Term<A>, Coefficient>,
}

impl<A: Action> Default for SymbolicOperator<A> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<A: Action> SymbolicOperator<A> {
    /// The empty sum.
    pub fn zero() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }

    /// The identity, a single empty product with unit coefficient.
    pub fn identity() -> Self {
        Self::constant_term(1.0)
    }

    /// A multiple of the identity.
    pub fn constant_term(coefficient: impl Into<Coefficient>) -> Self {
        Self::from_term(Vec::new(), coefficient)
    }

    /// A single product of factors.
    pub fn from_term(
        term: impl IntoIterator<Item = (usize, A)>,
        coefficient: impl Into<Coefficient>,
    ) -> Self {
        let mut operator = Self::zero();
        operator.add_term(term, coefficient);
        operator
    }

    /// Adds `coefficient * term`, canonicalizing the product first.
    pub fn add_term(
        &mut self,
        term: impl IntoIterator<Item = (usize, A)>,
        coefficient: impl Into<Coefficient>,
    ) {
        let coefficient = coefficient.into();
        if let Some((phase, term)) = A::canonicalize(term.into_iter().collect()) {
            self.accumulate(term, phase * coefficient);
        }
    }

    fn accumulate(&mut self, term: Term<A>, coefficient: Coefficient) {
        *self.terms.entry(term).or_insert(Complex::new(0.0, 0.0)) += coefficient;
    }

    /// Iterates over `(term, coefficient)` pairs in canonical order.
    pub fn terms(&self) -> impl Iterator<Item = (&Term<A>, &Coefficient)> {
        self.terms.iter()
    }

    /// Number of stored terms, including any with zero coefficient.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of a canonical term, zero if absent.
    pub fn coefficient(&self, term: &[(usize, A)]) -> Coefficient {
        self.terms
            .get(term)
            .copied()
            .unwrap_or(Complex::new(0.0, 0.0))
    }

    /// Coefficient of the identity term.
    pub fn constant(&self) -> Coefficient {
        self.coefficient(&[])
    }

    /// Highest mode index acted upon, if any.
    pub fn max_mode(&self) -> Option<usize> {
        self.terms
            .keys()
            .flat_map(|term| term.iter().map(|&(mode, _)| mode))
            .max()
    }

    /// Largest coefficient magnitude.
    pub fn max_coefficient(&self) -> f64 {
        self.terms.values().map(|c| c.norm()).fold(0.0, f64::max)
    }

    /// Zeroes real and imaginary parts with magnitude at most `abs_tol` and
    /// drops terms that become zero.
    pub fn compress(&mut self, abs_tol: f64) {
        self.terms.retain(|_, coefficient| {
            if coefficient.re.abs() <= abs_tol {
                coefficient.re = 0.0;
            }
            if coefficient.im.abs() <= abs_tol {
                coefficient.im = 0.0;
            }
            coefficient.re != 0.0 || coefficient.im != 0.0
        });
    }

    /// Term-wise comparison within `tol`; absent terms count as zero.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        let close = |a: &BTreeMap<Term<A>, Coefficient>, b: &BTreeMap<Term<A>, Coefficient>| {
            a.iter().all(|(term, &coefficient)| {
                let other = b.get(term).copied().unwrap_or(Complex::new(0.0, 0.0));
                (coefficient - other).norm() <= tol
            })
        };
        close(&self.terms, &other.terms) && close(&other.terms, &self.terms)
    }

    /// Multiplies every coefficient in place.
    pub fn scale(&mut self, factor: impl Into<Coefficient>) {
        let factor = factor.into();
        for coefficient in self.terms.values_mut() {
            *coefficient *= factor;
        }
    }

    fn product(&self, other: &Self) -> Self {
        let mut result = Self::zero();
        for (left, &left_coefficient) in &self.terms {
            for (right, &right_coefficient) in &other.terms {
                let mut term = Vec::with_capacity(left.len() + right.len());
                term.extend_from_slice(left);
                term.extend_from_slice(right);
                if let Some((phase, term)) = A::canonicalize(term) {
                    result.accumulate(term, phase * left_coefficient * right_coefficient);
                }
            }
        }
        result
    }
}

/// Adjoint of an operator: each term is adjointed and each coefficient
/// conjugated.
pub fn hermitian_conjugated<A: Action>(operator: &SymbolicOperator<A>) -> SymbolicOperator<A> {
    let mut conjugated = SymbolicOperator::zero();
    for (term, coefficient) in operator.terms() {
        conjugated.accumulate(A::adjoint(term), coefficient.conj());
    }
    conjugated
}

/// Number of modes touched by an operator, `max_mode + 1`.
pub fn count_qubits<A: Action>(operator: &SymbolicOperator<A>) -> usize {
    operator.max_mode().map_or(0, |mode| mode + 1)
}

impl<A: Action> AddAssign<&SymbolicOperator<A>> for SymbolicOperator<A> {
    fn add_assign(&mut self, rhs: &SymbolicOperator<A>) {
        for (term, &coefficient) in &rhs.terms {
            self.accumulate(term.clone(), coefficient);
        }
    }
}

impl<A: Action> AddAssign for SymbolicOperator<A> {
    fn add_assign(&mut self, rhs: SymbolicOperator<A>) {
        for (term, coefficient) in rhs.terms {
            self.accumulate(term, coefficient);
        }
    }
}

impl<A: Action> Add for SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn add(mut self, rhs: SymbolicOperator<A>) -> Self::Output {
        self += rhs;
        self
    }
}

impl<A: Action> SubAssign<&SymbolicOperator<A>> for SymbolicOperator<A> {
    fn sub_assign(&mut self, rhs: &SymbolicOperator<A>) {
        for (term, &coefficient) in &rhs.terms {
            self.accumulate(term.clone(), -coefficient);
        }
    }
}

impl<A: Action> SubAssign for SymbolicOperator<A> {
    fn sub_assign(&mut self, rhs: SymbolicOperator<A>) {
        *self -= &rhs;
    }
}

impl<A: Action> Sub for SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn sub(mut self, rhs: SymbolicOperator<A>) -> Self::Output {
        self -= &rhs;
        self
    }
}

impl<A: Action> Mul for &SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn mul(self, rhs: &SymbolicOperator<A>) -> Self::Output {
        self.product(rhs)
    }
}

impl<A: Action> Mul for SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn mul(self, rhs: SymbolicOperator<A>) -> Self::Output {
        self.product(&rhs)
    }
}

impl<A: Action> MulAssign<&SymbolicOperator<A>> for SymbolicOperator<A> {
    fn mul_assign(&mut self, rhs: &SymbolicOperator<A>) {
        *self = self.product(rhs);
    }
}

impl<A: Action> Mul<f64> for SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn mul(mut self, rhs: f64) -> Self::Output {
        self.scale(rhs);
        self
    }
}

impl<A: Action> Mul<Coefficient> for SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn mul(mut self, rhs: Coefficient) -> Self::Output {
        self.scale(rhs);
        self
    }
}

impl<A: Action> Neg for SymbolicOperator<A> {
    type Output = SymbolicOperator<A>;

    fn neg(mut self) -> Self::Output {
        self.scale(-1.0);
        self
    }
}

impl<A: Action> Sum for SymbolicOperator<A> {
    fn sum<I: Iterator<Item = SymbolicOperator<A>>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, operator| acc + operator)
    }
}

fn fmt_coefficient(coefficient: &Coefficient, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if coefficient.im == 0.0 {
        write!(f, "{}", coefficient.re)
    } else if coefficient.im < 0.0 {
        write!(f, "({}-{}j)", coefficient.re, -coefficient.im)
    } else {
        write!(f, "({}+{}j)", coefficient.re, coefficient.im)
    }
}

impl<A: Action> fmt::Display for SymbolicOperator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (idx, (term, coefficient)) in self.terms.iter().enumerate() {
            if idx > 0 {
                f.write_str(" +\n")?;
            }
            fmt_coefficient(coefficient, f)?;
            f.write_str(" [")?;
            for (pos, &(mode, action)) in term.iter().enumerate() {
                if pos > 0 {
                    f.write_str(" ")?;
                }
                A::fmt_factor(mode, action, f)?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
