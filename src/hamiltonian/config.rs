//! Configuration types for the model Hamiltonian builders.
//!
//! Each builder takes its required physical parameters as arguments and the
//! optional switches through one of these structs. All of them deserialize
//! from TOML with missing fields falling back to [`Default`].
//!
//! # Overview
//!
//! - [`HubbardConfig`] — Fermi-Hubbard boundary conditions and fields
//! - [`DwaveConfig`] — Mean-field d-wave boundary conditions
//! - [`JelliumConfig`] — Basis choice and cutoffs for jellium and plane-wave models

use serde::{Deserialize, Serialize};

/// Optional settings for [`fermi_hubbard`](super::hubbard::fermi_hubbard).
///
/// # Examples
///
/// ```
/// use fermi_forge::HubbardConfig;
///
/// // Open chain with a chemical potential
/// let config = HubbardConfig {
///     chemical_potential: 0.5,
///     periodic: false,
///     ..Default::default()
/// };
/// assert!(!config.spinless);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubbardConfig {
    /// Chemical potential `μ`, entering as `−μ n` on every orbital.
    pub chemical_potential: f64,

    /// Magnetic field `h`, entering as `−h n↑ + h n↓`. Ignored when spinless.
    pub magnetic_field: f64,

    /// Wrap hopping around the lattice edges.
    pub periodic: bool,

    /// Use one orbital per site with nearest-neighbor interaction instead of
    /// two spin-orbitals with on-site interaction.
    pub spinless: bool,

    /// Shift interaction number operators by one half.
    pub particle_hole_symmetry: bool,
}

impl Default for HubbardConfig {
    fn default() -> Self {
        Self {
            chemical_potential: 0.0,
            magnetic_field: 0.0,
            periodic: true,
            spinless: false,
            particle_hole_symmetry: false,
        }
    }
}

/// Optional settings for
/// [`mean_field_dwave`](super::mean_field_dwave::mean_field_dwave).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwaveConfig {
    /// Chemical potential `μ`.
    pub chemical_potential: f64,

    /// Wrap bonds around the lattice edges.
    pub periodic: bool,
}

impl Default for DwaveConfig {
    fn default() -> Self {
        Self {
            chemical_potential: 0.0,
            periodic: true,
        }
    }
}

/// Optional settings shared by the jellium and plane-wave builders.
///
/// # Examples
///
/// ```
/// use fermi_forge::JelliumConfig;
///
/// let dual = JelliumConfig {
///     plane_wave: false,
///     spinless: true,
///     ..Default::default()
/// };
/// assert!(dual.e_cutoff.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JelliumConfig {
    /// One orbital per grid point instead of two.
    pub spinless: bool,

    /// Build in the plane-wave basis; otherwise in the dual (real-space) basis.
    pub plane_wave: bool,

    /// Add the Madelung constant `2.8372 / scale`.
    pub include_constant: bool,

    /// Discard plane waves with kinetic energy `k²/2` above this value.
    pub e_cutoff: Option<f64>,

    /// Truncate the Coulomb interaction at `period_cutoff`.
    pub non_periodic: bool,

    /// Truncation radius for non-periodic interactions. Defaults to
    /// `volume^(1/dimensions)`.
    pub period_cutoff: Option<f64>,
}

impl Default for JelliumConfig {
    fn default() -> Self {
        Self {
            spinless: false,
            plane_wave: true,
            include_constant: false,
            e_cutoff: None,
            non_periodic: false,
            period_cutoff: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let hubbard = HubbardConfig::default();
        assert_eq!(hubbard.chemical_potential, 0.0);
        assert_eq!(hubbard.magnetic_field, 0.0);
        assert!(hubbard.periodic);
        assert!(!hubbard.spinless);
        assert!(!hubbard.particle_hole_symmetry);

        let dwave = DwaveConfig::default();
        assert!(dwave.periodic);

        let jellium = JelliumConfig::default();
        assert!(jellium.plane_wave);
        assert!(!jellium.include_constant);
        assert!(!jellium.non_periodic);
        assert!(jellium.period_cutoff.is_none());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: HubbardConfig = toml::from_str("spinless = true\nchemical_potential = 0.25").unwrap();
        assert!(config.spinless);
        assert!(config.periodic);
        assert_eq!(config.chemical_potential, 0.25);

        let config: JelliumConfig = toml::from_str("e_cutoff = 10.0").unwrap();
        assert_eq!(config.e_cutoff, Some(10.0));
        assert!(config.plane_wave);
    }
}
