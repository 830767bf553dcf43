//! Derived volume, mass, and activity adjustments for waste-stream tables.
//!
//! Every transform takes a streams [`DataFrame`](polars::prelude::DataFrame)
//! plus any reference tables it needs and returns a new table with one row
//! per input stream, in input order. Unmatched reference keys and
//! floating-point edge cases propagate as nulls, infinities, or NaN; only
//! absent columns and malformed stream ids are errors.
//!
//! - [`conditioning`]: conditioning material assignment and deltas
//! - [`packaging`]: package routes, packaged volumes, container counts
//! - [`material_mass`]: weight percentages to absolute masses
//! - [`routing`]: route factor adjustments and route number parsing
//! - [`activity_limits`]: normalised activity against radionuclide limits

pub mod activity_limits;
pub mod conditioning;
pub mod error;
mod frame;
pub mod material_mass;
pub mod packaging;
#[cfg(feature = "python")]
mod python;
pub mod routing;
pub mod schema;

pub use activity_limits::evaluate_activity_limits;
pub use conditioning::{
    additional_conditioning_volume, assign_conditioning_materials,
    assign_conditioning_materials_with, get_conditioning_deltas, material_density_table,
    total_conditioning_volume,
};
pub use error::StreamError;
pub use material_mass::{calculate_haz_material_mass, calculate_material_mass};
pub use packaging::{construct_package_routes, get_packaging_changes};
pub use routing::{
    get_route_factor_adjustments, get_route_number, parse_route_number, with_route_numbers,
};

#[cfg(feature = "python")]
#[pyo3::pymodule]
#[pyo3(name = "waste_streams")]
fn python_module(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    python::register_functions(m)?;
    python::add_schema_exports(m)?;
    Ok(())
}
