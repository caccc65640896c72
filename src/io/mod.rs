//! Reading and writing molecular geometries and serialized data.
//!
//! Two formats are supported: plain XYZ-style geometry listings and JSON
//! documents for anything that implements `serde`.

use std::fmt;

pub mod error;
pub mod json;
pub mod xyz;

pub use error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xyz,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Xyz => write!(f, "XYZ"),
        }
    }
}
