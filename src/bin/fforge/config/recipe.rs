use serde::Deserialize;

use fermi_forge::{DwaveConfig, Element, HubbardConfig, JelliumConfig, Nucleus};

/// A model to build and how to encode it, as read from a TOML recipe.
///
/// ```toml
/// encoding = "qubit"
///
/// [model]
/// kind = "hubbard"
/// x_dimension = 2
/// y_dimension = 2
/// tunneling = 1.0
/// coulomb = 4.0
///
/// [model.config]
/// periodic = false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Recipe {
    #[serde(default)]
    pub encoding: Encoding,
    pub model: Model,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Fermion,
    Qubit,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum Model {
    Hubbard {
        x_dimension: usize,
        y_dimension: usize,
        tunneling: f64,
        coulomb: f64,
        #[serde(default)]
        config: HubbardConfig,
    },
    Dwave {
        x_dimension: usize,
        y_dimension: usize,
        tunneling: f64,
        sc_gap: f64,
        #[serde(default)]
        config: DwaveConfig,
    },
    Jellium {
        dimensions: usize,
        length: usize,
        scale: f64,
        #[serde(default)]
        config: JelliumConfig,
        #[serde(default)]
        geometry: Vec<Nucleus>,
    },
    Ring {
        n_atoms: usize,
        spacing: f64,
        element: Element,
        #[serde(default = "default_basis")]
        basis: String,
        #[serde(default)]
        charge: i32,
    },
    Lattice {
        nx: usize,
        ny: usize,
        nz: usize,
        spacing: f64,
        element: Element,
        #[serde(default = "default_basis")]
        basis: String,
        #[serde(default)]
        charge: i32,
    },
    Atom {
        element: Element,
        #[serde(default = "default_basis")]
        basis: String,
    },
}

impl Model {
    pub fn describe(&self) -> &'static str {
        match self {
            Model::Hubbard { .. } => "Fermi-Hubbard model",
            Model::Dwave { .. } => "mean-field d-wave model",
            Model::Jellium { .. } => "plane-wave Hamiltonian",
            Model::Ring { .. } => "atomic ring",
            Model::Lattice { .. } => "atomic lattice",
            Model::Atom { .. } => "single atom",
        }
    }
}

fn default_basis() -> String {
    "sto-3g".to_string()
}

/// Parses a recipe from TOML text.
pub fn load_recipe(toml_str: &str) -> Result<Recipe, toml::de::Error> {
    toml::from_str(toml_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hubbard_recipe_with_partial_config() {
        let recipe = load_recipe(
            r#"
            encoding = "qubit"

            [model]
            kind = "hubbard"
            x_dimension = 2
            y_dimension = 1
            tunneling = 1.0
            coulomb = 4.0

            [model.config]
            periodic = false
            "#,
        )
        .unwrap();

        assert_eq!(recipe.encoding, Encoding::Qubit);
        let Model::Hubbard { x_dimension, config, .. } = recipe.model else {
            panic!("expected a hubbard model");
        };
        assert_eq!(x_dimension, 2);
        assert!(!config.periodic);
        assert!(!config.spinless);
    }

    #[test]
    fn jellium_recipe_with_geometry() {
        let recipe = load_recipe(
            r#"
            [model]
            kind = "jellium"
            dimensions = 1
            length = 3
            scale = 1.5
            geometry = [{ element = "H", position = [0.1] }]

            [model.config]
            plane_wave = false
            "#,
        )
        .unwrap();

        assert_eq!(recipe.encoding, Encoding::Fermion);
        let Model::Jellium { geometry, config, .. } = recipe.model else {
            panic!("expected a jellium model");
        };
        assert_eq!(geometry, vec![Nucleus::new(Element::H, vec![0.1])]);
        assert!(!config.plane_wave);
    }

    #[test]
    fn molecule_recipe_defaults_basis_and_charge() {
        let recipe = load_recipe(
            r#"
            [model]
            kind = "ring"
            n_atoms = 4
            spacing = 0.74
            element = "H"
            "#,
        )
        .unwrap();

        assert_eq!(
            recipe.model,
            Model::Ring {
                n_atoms: 4,
                spacing: 0.74,
                element: Element::H,
                basis: "sto-3g".to_string(),
                charge: 0,
            }
        );
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(load_recipe("[model]\nkind = \"ising\"\n").is_err());
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        assert!(load_recipe("encoding = \"bravyi\"\n[model]\nkind = \"atom\"\nelement = \"He\"\n").is_err());
    }
}
