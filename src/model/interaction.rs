//! Dense one- and two-body coefficient arrays and the operator they define.
//!
//! An [`InteractionOperator`] represents
//! `H = c + Σ_pq h_pq a†_p a_q + Σ_pqrs g_pqrs a†_p a†_q a_r a_s`
//! with `h` and `g` stored densely over spin-orbitals.

use std::ops::{Index, IndexMut};

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ops::{EQ_TOLERANCE, FermionOperator, Ladder};

/// Dense rank-4 tensor of side `n`, indexed `[p, q, r, s]` with `s` fastest.
///
/// Deserialization goes through [`from_vec`](Self::from_vec), so a buffer
/// that does not hold `n⁴` entries is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTwoBodyTensor")]
pub struct TwoBodyTensor {
    n: usize,
    data: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTwoBodyTensor {
    n: usize,
    data: Vec<f64>,
}

impl TryFrom<RawTwoBodyTensor> for TwoBodyTensor {
    type Error = Error;

    fn try_from(raw: RawTwoBodyTensor) -> Result<Self, Error> {
        Self::from_vec(raw.n, raw.data)
    }
}

impl TwoBodyTensor {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n.pow(4)],
        }
    }

    /// Wraps a row-major buffer of length `n⁴`.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self, Error> {
        if n.checked_pow(4) != Some(data.len()) {
            return Err(Error::integral_shape(format!(
                "two-body buffer of length {} does not match {n}^4",
                data.len()
            )));
        }
        Ok(Self { n, data })
    }

    /// Side length of the tensor.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, [p, q, r, s]: [usize; 4]) -> usize {
        ((p * self.n + q) * self.n + r) * self.n + s
    }

    /// Applies `f` to every element.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            n: self.n,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Non-zero entries as `([p, q, r, s], value)` pairs.
    pub fn nonzero(&self) -> impl Iterator<Item = ([usize; 4], f64)> + '_ {
        let n = self.n;
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(move |(idx, &v)| ([idx / n.pow(3), (idx / n.pow(2)) % n, (idx / n) % n, idx % n], v))
    }
}

impl Index<[usize; 4]> for TwoBodyTensor {
    type Output = f64;

    fn index(&self, index: [usize; 4]) -> &f64 {
        &self.data[self.offset(index)]
    }
}

impl IndexMut<[usize; 4]> for TwoBodyTensor {
    fn index_mut(&mut self, index: [usize; 4]) -> &mut f64 {
        let offset = self.offset(index);
        &mut self.data[offset]
    }
}

/// A number-conserving Hamiltonian with at most two-body terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionOperator {
    pub constant: f64,
    pub one_body: DMatrix<f64>,
    pub two_body: TwoBodyTensor,
}

impl InteractionOperator {
    /// Creates an operator after checking that both arrays span the same
    /// spin-orbitals.
    pub fn new(constant: f64, one_body: DMatrix<f64>, two_body: TwoBodyTensor) -> Result<Self, Error> {
        if !one_body.is_square() || one_body.nrows() != two_body.dim() {
            return Err(Error::integral_shape(format!(
                "one-body {}x{} and two-body side {} disagree",
                one_body.nrows(),
                one_body.ncols(),
                two_body.dim()
            )));
        }
        Ok(Self {
            constant,
            one_body,
            two_body,
        })
    }

    pub fn n_qubits(&self) -> usize {
        self.one_body.nrows()
    }

    /// Expands the dense arrays into a sparse fermionic operator, skipping
    /// zero coefficients.
    pub fn to_fermion_operator(&self) -> FermionOperator {
        use Ladder::{Annihilate, Create};

        let mut operator = FermionOperator::constant_term(self.constant);
        let n = self.n_qubits();
        for p in 0..n {
            for q in 0..n {
                let h = self.one_body[(p, q)];
                if h != 0.0 {
                    operator.add_term([(p, Create), (q, Annihilate)], h);
                }
            }
        }
        for ([p, q, r, s], g) in self.two_body.nonzero() {
            operator.add_term([(p, Create), (q, Create), (r, Annihilate), (s, Annihilate)], g);
        }
        operator
    }
}

/// Expands spatial-orbital integrals to spin-orbitals.
///
/// Spatial orbital `p` becomes spin-orbitals `2p` (up) and `2p + 1` (down).
/// The two-body array is expected in the `a†_p a†_q a_r a_s` ordering, so
/// mixed-spin blocks pair the outer and inner indices. Entries smaller than
/// [`EQ_TOLERANCE`] are zeroed.
pub fn spinorb_from_spatial(
    one_body: &DMatrix<f64>,
    two_body: &TwoBodyTensor,
) -> Result<(DMatrix<f64>, TwoBodyTensor), Error> {
    let n = one_body.nrows();
    if !one_body.is_square() || two_body.dim() != n {
        return Err(Error::integral_shape(format!(
            "spatial one-body {}x{} and two-body side {} disagree",
            one_body.nrows(),
            one_body.ncols(),
            two_body.dim()
        )));
    }

    let n_qubits = 2 * n;
    let mut h = DMatrix::zeros(n_qubits, n_qubits);
    let mut g = TwoBodyTensor::zeros(n_qubits);
    for p in 0..n {
        for q in 0..n {
            h[(2 * p, 2 * q)] = one_body[(p, q)];
            h[(2 * p + 1, 2 * q + 1)] = one_body[(p, q)];
            for r in 0..n {
                for s in 0..n {
                    let value = two_body[[p, q, r, s]];
                    g[[2 * p, 2 * q + 1, 2 * r + 1, 2 * s]] = value;
                    g[[2 * p + 1, 2 * q, 2 * r, 2 * s + 1]] = value;
                    g[[2 * p, 2 * q, 2 * r, 2 * s]] = value;
                    g[[2 * p + 1, 2 * q + 1, 2 * r + 1, 2 * s + 1]] = value;
                }
            }
        }
    }

    h.apply(|v| {
        if v.abs() < EQ_TOLERANCE {
            *v = 0.0;
        }
    });
    let g = g.map(|v| if v.abs() < EQ_TOLERANCE { 0.0 } else { v });
    Ok((h, g))
}
