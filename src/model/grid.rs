//! Real-space and reciprocal-space grids for plane-wave bases.
//!
//! A [`Grid`] is a hypercubic cell of side `scale` sampled by `length` points
//! per dimension. Plane-wave orbitals are labelled by the same index tuples
//! as the real-space (dual basis) orbitals, so one indexing scheme serves
//! both representations.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Spin projection of a spin-orbital.
///
/// Spin-orbitals are interleaved: spatial orbital `i` maps to modes `2i`
/// (up) and `2i + 1` (down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spin {
    Up = 0,
    Down = 1,
}

impl Spin {
    #[inline]
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Spin of an interleaved spin-orbital index.
    #[inline]
    pub fn of_mode(mode: usize) -> Self {
        if mode % 2 == 0 { Spin::Up } else { Spin::Down }
    }
}

/// Spin labels to iterate over: a single `None` for spinless models,
/// otherwise both projections.
pub fn spins(spinless: bool) -> &'static [Option<Spin>] {
    if spinless {
        &[None]
    } else {
        &[Some(Spin::Up), Some(Spin::Down)]
    }
}

/// A `dimensions`-dimensional hypercubic grid of `length` points per side
/// spanning a cell of side `scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub dimensions: usize,
    pub length: usize,
    pub scale: f64,
}

impl Grid {
    /// Creates a grid, rejecting empty or degenerate cells.
    pub fn new(dimensions: usize, length: usize, scale: f64) -> Result<Self, Error> {
        if dimensions == 0 {
            return Err(Error::invalid_grid("dimensions must be at least 1"));
        }
        if length == 0 {
            return Err(Error::invalid_grid("length must be at least 1"));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::invalid_grid(format!(
                "scale must be a positive finite number (got {scale})"
            )));
        }
        Ok(Self {
            dimensions,
            length,
            scale,
        })
    }

    /// Cell volume, `scale^dimensions`.
    pub fn volume_scale(&self) -> f64 {
        self.scale.powi(self.dimensions as i32)
    }

    /// Number of grid points, `length^dimensions`.
    pub fn num_points(&self) -> usize {
        self.length.pow(self.dimensions as u32)
    }

    /// Number of modes for a model with or without spin.
    pub fn num_modes(&self, spinless: bool) -> usize {
        if spinless {
            self.num_points()
        } else {
            2 * self.num_points()
        }
    }

    /// Iterates over every index tuple in lexicographic order, first
    /// coordinate slowest.
    pub fn all_points_indices(&self) -> PointIndices {
        PointIndices {
            length: self.length,
            next: Some(vec![0; self.dimensions]),
        }
    }

    /// Real-space position of a grid point.
    pub fn position_vector(&self, indices: &[usize]) -> Vec<f64> {
        indices
            .iter()
            .map(|&i| i as f64 * self.scale / self.length as f64)
            .collect()
    }

    /// Wave vector of a plane wave, with index `length / 2` at the origin.
    pub fn momentum_vector(&self, indices: &[usize]) -> Vec<f64> {
        indices
            .iter()
            .map(|&i| 2.0 * PI * self.momentum_int(i) as f64 / self.scale)
            .collect()
    }

    /// Integer momentum of a single index, shifted so the zero mode sits at
    /// `length / 2`.
    #[inline]
    pub fn momentum_int(&self, index: usize) -> i64 {
        index as i64 - (self.length / 2) as i64
    }

    /// Wraps a signed offset back onto the grid.
    #[inline]
    pub fn wrap(&self, index: i64) -> usize {
        index.rem_euclid(self.length as i64) as usize
    }

    /// Flattens an index tuple into an orbital number, interleaving spin
    /// when one is given.
    pub fn orbital_id(&self, indices: &[usize], spin: Option<Spin>) -> usize {
        let mut tensor_factor = 1;
        let mut orbital = 0;
        for &index in indices.iter().take(self.dimensions) {
            orbital += index * tensor_factor;
            tensor_factor *= self.length;
        }
        match spin {
            Some(spin) => 2 * orbital + spin.offset(),
            None => orbital,
        }
    }

    /// Inverse of [`orbital_id`](Self::orbital_id): recovers the grid
    /// indices of a mode.
    pub fn grid_indices(&self, mode: usize, spinless: bool) -> Vec<usize> {
        let mut orbital = if spinless { mode } else { mode / 2 };
        let mut indices = Vec::with_capacity(self.dimensions);
        for _ in 0..self.dimensions {
            indices.push(orbital % self.length);
            orbital /= self.length;
        }
        indices
    }
}

/// Iterator over grid index tuples; see [`Grid::all_points_indices`].
#[derive(Debug, Clone)]
pub struct PointIndices {
    length: usize,
    next: Option<Vec<usize>>,
}

impl Iterator for PointIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        for slot in successor.iter_mut().rev() {
            *slot += 1;
            if *slot < self.length {
                self.next = Some(successor);
                return Some(current);
            }
            *slot = 0;
        }
        Some(current)
    }
}

/// Dot product of two equally sized vectors.
#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
