//! Flat access to every Hamiltonian builder.
//!
//! Each name here is the item defined in its builder module, re-exported
//! without wrapping.

pub use crate::hamiltonian::chemical_series::{make_atom, make_atomic_lattice, make_atomic_ring};
pub use crate::hamiltonian::hubbard::fermi_hubbard;
pub use crate::hamiltonian::jellium::{
    dual_basis_jellium_model, dual_basis_kinetic, dual_basis_potential, jellium_model,
    jordan_wigner_dual_basis_jellium, plane_wave_kinetic, plane_wave_potential,
};
pub use crate::hamiltonian::mean_field_dwave::mean_field_dwave;
pub use crate::hamiltonian::molecular_data::{MolecularData, periodic_table};
pub use crate::hamiltonian::plane_wave::{
    dual_basis_external_potential, fourier_transform, inverse_fourier_transform,
    jordan_wigner_dual_basis_hamiltonian, plane_wave_external_potential, plane_wave_hamiltonian,
    wigner_seitz_length_scale,
};

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use crate::error::Error;
    use crate::hamiltonian::{
        chemical_series, config::*, hubbard, jellium, mean_field_dwave, molecular_data, plane_wave,
    };
    use crate::model::{atom::Nucleus, grid::Grid, types::Element};
    use crate::ops::{FermionOperator, QubitOperator};

    #[test]
    fn every_builder_resolves_with_its_signature() {
        let _: fn(usize, f64, &str, Element, i32) -> Result<super::MolecularData, Error> = super::make_atomic_ring;
        let _: fn(usize, usize, usize, f64, &str, Element, i32) -> Result<super::MolecularData, Error> =
            super::make_atomic_lattice;
        let _: fn(Element, &str) -> Result<super::MolecularData, Error> = super::make_atom;
        let _: fn(usize, usize, f64, f64, &HubbardConfig) -> Result<FermionOperator, Error> = super::fermi_hubbard;
        let _: fn(&Grid, bool) -> FermionOperator = super::dual_basis_kinetic;
        let _: fn(&Grid, &JelliumConfig) -> FermionOperator = super::dual_basis_potential;
        let _: fn(&Grid, &JelliumConfig) -> FermionOperator = super::dual_basis_jellium_model;
        let _: fn(&Grid, &JelliumConfig) -> FermionOperator = super::jellium_model;
        let _: fn(&Grid, bool, bool) -> QubitOperator = super::jordan_wigner_dual_basis_jellium;
        let _: fn(&Grid, bool, Option<f64>) -> FermionOperator = super::plane_wave_kinetic;
        let _: fn(&Grid, &JelliumConfig) -> FermionOperator = super::plane_wave_potential;
        let _: fn(usize, usize, f64, f64, &DwaveConfig) -> Result<FermionOperator, Error> = super::mean_field_dwave;
        let _: fn() -> &'static [Element] = super::periodic_table;
        let _: fn(&Grid, &[Nucleus], &JelliumConfig) -> Result<FermionOperator, Error> =
            super::dual_basis_external_potential;
        let _: fn(&FermionOperator, &Grid, bool) -> FermionOperator = super::fourier_transform;
        let _: fn(&FermionOperator, &Grid, bool) -> FermionOperator = super::inverse_fourier_transform;
        let _: fn(&Grid, &[Nucleus], &JelliumConfig) -> Result<FermionOperator, Error> =
            super::plane_wave_external_potential;
        let _: fn(&Grid, Option<&[Nucleus]>, &JelliumConfig) -> Result<FermionOperator, Error> =
            super::plane_wave_hamiltonian;
        let _: fn(&Grid, Option<&[Nucleus]>, bool, bool) -> Result<QubitOperator, Error> =
            super::jordan_wigner_dual_basis_hamiltonian;
        let _: fn(f64, usize, usize) -> Result<f64, Error> = super::wigner_seitz_length_scale;
    }

    #[test]
    fn reexports_are_the_builder_items() {
        macro_rules! assert_same_fn {
            ($module:ident :: $name:ident as $ty:ty) => {
                assert!(
                    std::ptr::fn_addr_eq(super::$name as $ty, $module::$name as $ty),
                    concat!(stringify!($name), " is not the ", stringify!($module), " item")
                );
            };
        }

        type Jellium = fn(&Grid, &JelliumConfig) -> FermionOperator;
        type External = fn(&Grid, &[Nucleus], &JelliumConfig) -> Result<FermionOperator, Error>;
        type Transform = fn(&FermionOperator, &Grid, bool) -> FermionOperator;
        type Molecule = fn(Element, &str) -> Result<molecular_data::MolecularData, Error>;

        assert_eq!(
            TypeId::of::<super::MolecularData>(),
            TypeId::of::<molecular_data::MolecularData>()
        );
        assert_same_fn!(molecular_data::periodic_table as fn() -> &'static [Element]);

        assert_same_fn!(chemical_series::make_atom as Molecule);
        assert_same_fn!(chemical_series::make_atomic_ring as fn(usize, f64, &str, Element, i32) -> Result<molecular_data::MolecularData, Error>);
        assert_same_fn!(chemical_series::make_atomic_lattice as fn(usize, usize, usize, f64, &str, Element, i32) -> Result<molecular_data::MolecularData, Error>);
        assert_same_fn!(hubbard::fermi_hubbard as fn(usize, usize, f64, f64, &HubbardConfig) -> Result<FermionOperator, Error>);
        assert_same_fn!(mean_field_dwave::mean_field_dwave as fn(usize, usize, f64, f64, &DwaveConfig) -> Result<FermionOperator, Error>);

        assert_same_fn!(jellium::dual_basis_kinetic as fn(&Grid, bool) -> FermionOperator);
        assert_same_fn!(jellium::dual_basis_potential as Jellium);
        assert_same_fn!(jellium::dual_basis_jellium_model as Jellium);
        assert_same_fn!(jellium::jellium_model as Jellium);
        assert_same_fn!(jellium::plane_wave_potential as Jellium);
        assert_same_fn!(jellium::plane_wave_kinetic as fn(&Grid, bool, Option<f64>) -> FermionOperator);
        assert_same_fn!(jellium::jordan_wigner_dual_basis_jellium as fn(&Grid, bool, bool) -> QubitOperator);

        assert_same_fn!(plane_wave::dual_basis_external_potential as External);
        assert_same_fn!(plane_wave::plane_wave_external_potential as External);
        assert_same_fn!(plane_wave::fourier_transform as Transform);
        assert_same_fn!(plane_wave::inverse_fourier_transform as Transform);
        assert_same_fn!(plane_wave::plane_wave_hamiltonian as fn(&Grid, Option<&[Nucleus]>, &JelliumConfig) -> Result<FermionOperator, Error>);
        assert_same_fn!(plane_wave::jordan_wigner_dual_basis_hamiltonian as fn(&Grid, Option<&[Nucleus]>, bool, bool) -> Result<QubitOperator, Error>);
        assert_same_fn!(plane_wave::wigner_seitz_length_scale as fn(f64, usize, usize) -> Result<f64, Error>);

        assert_eq!(super::periodic_table().len(), 118);
    }
}
