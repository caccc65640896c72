use serde::{Deserialize, Serialize};

use super::types::Element;

/// An atom of a molecular geometry, positioned in Ångströms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub element: Element,
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self { element, position }
    }

    /// Euclidean distance to another atom, in the same units as the positions.
    pub fn distance(&self, other: &Atom) -> f64 {
        self.position
            .iter()
            .zip(other.position.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

/// A point nucleus inside a periodic cell.
///
/// Unlike [`Atom`], the coordinate count follows the dimensionality of the
/// [`Grid`](super::grid::Grid) it is placed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nucleus {
    pub element: Element,
    pub position: Vec<f64>,
}

impl Nucleus {
    pub fn new(element: Element, position: impl Into<Vec<f64>>) -> Self {
        Self {
            element,
            position: position.into(),
        }
    }
}
