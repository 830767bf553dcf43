use std::collections::HashMap;

use pyo3::prelude::*;
use pyo3::types::PyModule;
use pyo3_polars::{PyDataFrame, PySeries};

use crate::schema;

// ── Conditioning ────────────────────────────────────────────────────────────

/// Assign conditioning materials and their densities.
///
/// Uses the built-in density table unless `densities` is given.
#[pyfunction]
#[pyo3(signature = (streams, densities=None))]
fn assign_conditioning_materials(
    streams: PyDataFrame,
    densities: Option<PyDataFrame>,
) -> PyResult<PyDataFrame> {
    let df = match densities {
        Some(densities) => {
            crate::conditioning::assign_conditioning_materials_with(&streams.0, &densities.0)?
        }
        None => crate::conditioning::assign_conditioning_materials(&streams.0)?,
    };
    Ok(PyDataFrame(df))
}

#[pyfunction]
fn material_density_table() -> PyResult<PyDataFrame> {
    Ok(PyDataFrame(crate::conditioning::material_density_table()?))
}

#[pyfunction]
fn additional_conditioning_volume(streams: PyDataFrame) -> PyResult<PySeries> {
    Ok(PySeries(crate::conditioning::additional_conditioning_volume(&streams.0)?))
}

#[pyfunction]
fn total_conditioning_volume(streams: PyDataFrame) -> PyResult<PySeries> {
    Ok(PySeries(crate::conditioning::total_conditioning_volume(&streams.0)?))
}

#[pyfunction]
fn get_conditioning_deltas(streams: PyDataFrame) -> PyResult<PyDataFrame> {
    Ok(PyDataFrame(crate::conditioning::get_conditioning_deltas(&streams.0)?))
}

// ── Packaging ───────────────────────────────────────────────────────────────

#[pyfunction]
fn construct_package_routes(
    package_routes: Vec<(String, String)>,
    package_definitions: PyDataFrame,
) -> PyResult<PyDataFrame> {
    let df = crate::packaging::construct_package_routes(&package_routes, &package_definitions.0)?;
    Ok(PyDataFrame(df))
}

#[pyfunction]
fn get_packaging_changes(
    streams: PyDataFrame,
    package_routes: PyDataFrame,
) -> PyResult<PyDataFrame> {
    let df = crate::packaging::get_packaging_changes(&streams.0, &package_routes.0)?;
    Ok(PyDataFrame(df))
}

// ── Material mass ───────────────────────────────────────────────────────────

#[pyfunction]
fn calculate_material_mass(streams: PyDataFrame, cols: Vec<String>) -> PyResult<PyDataFrame> {
    let df = crate::material_mass::calculate_material_mass(&streams.0, &cols)?;
    Ok(PyDataFrame(df))
}

#[pyfunction]
fn calculate_haz_material_mass(streams: PyDataFrame, cols: Vec<String>) -> PyResult<PyDataFrame> {
    let df = crate::material_mass::calculate_haz_material_mass(&streams.0, &cols)?;
    Ok(PyDataFrame(df))
}

// ── Routing / activity ──────────────────────────────────────────────────────

#[pyfunction]
fn get_route_factor_adjustments(
    streams: PyDataFrame,
    route_factors: PyDataFrame,
    radionucleide_cols: Vec<String>,
) -> PyResult<PyDataFrame> {
    let df = crate::routing::get_route_factor_adjustments(
        &streams.0,
        &route_factors.0,
        &radionucleide_cols,
    )?;
    Ok(PyDataFrame(df))
}

/// Parse route numbers from `<prefix>_<route>_<suffix>` stream ids.
///
/// Raises ValueError on the first malformed id.
#[pyfunction]
fn get_route_number(stream_id: PySeries) -> PyResult<PySeries> {
    Ok(PySeries(crate::routing::get_route_number(&stream_id.0)?))
}

#[pyfunction]
fn with_route_numbers(streams: PyDataFrame) -> PyResult<PyDataFrame> {
    Ok(PyDataFrame(crate::routing::with_route_numbers(&streams.0)?))
}

#[pyfunction]
fn evaluate_activity_limits(
    streams: PyDataFrame,
    radionucleide_cols: Vec<String>,
    activity_limits: HashMap<String, f64>,
) -> PyResult<PyDataFrame> {
    let df = crate::activity_limits::evaluate_activity_limits(
        &streams.0,
        &radionucleide_cols,
        &activity_limits,
    )?;
    Ok(PyDataFrame(df))
}

pub(crate) fn register_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(assign_conditioning_materials, m)?)?;
    m.add_function(wrap_pyfunction!(material_density_table, m)?)?;
    m.add_function(wrap_pyfunction!(additional_conditioning_volume, m)?)?;
    m.add_function(wrap_pyfunction!(total_conditioning_volume, m)?)?;
    m.add_function(wrap_pyfunction!(get_conditioning_deltas, m)?)?;
    m.add_function(wrap_pyfunction!(construct_package_routes, m)?)?;
    m.add_function(wrap_pyfunction!(get_packaging_changes, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_material_mass, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_haz_material_mass, m)?)?;
    m.add_function(wrap_pyfunction!(get_route_factor_adjustments, m)?)?;
    m.add_function(wrap_pyfunction!(get_route_number, m)?)?;
    m.add_function(wrap_pyfunction!(with_route_numbers, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_activity_limits, m)?)?;
    Ok(())
}

/// Export schema constants as Python submodules
pub(crate) fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Stream
    let stream = PyModule::new(m.py(), "stream")?;
    stream.add("STREAM_ID", schema::stream::STREAM_ID)?;
    stream.add("VOLUME", schema::stream::VOLUME)?;
    stream.add("MASS", schema::stream::MASS)?;
    stream.add("CONDITIONING_FACTOR", schema::stream::CONDITIONING_FACTOR)?;
    stream.add("CONDITIONING_MATERIAL", schema::stream::CONDITIONING_MATERIAL)?;
    stream.add("PACKAGE_TYPE", schema::stream::PACKAGE_TYPE)?;
    stream.add("PACKAGING_FACTOR", schema::stream::PACKAGING_FACTOR)?;
    stream.add("ROUTE_NUMBER", schema::stream::ROUTE_NUMBER)?;
    m.add_submodule(&stream)?;

    // Material
    let material = PyModule::new(m.py(), "material")?;
    material.add("DENSITY", schema::material::DENSITY)?;
    material.add("AIR", schema::material::AIR)?;
    material.add("GROUT", schema::material::GROUT)?;
    material.add(
        "NO_CONDITIONING_MATERIAL",
        schema::material::NO_CONDITIONING_MATERIAL,
    )?;
    m.add_submodule(&material)?;

    // Conditioning
    let conditioning = PyModule::new(m.py(), "conditioning")?;
    conditioning.add("VOLUME_DELTA", schema::conditioning::VOLUME_DELTA)?;
    conditioning.add("MASS_DELTA", schema::conditioning::MASS_DELTA)?;
    m.add_submodule(&conditioning)?;

    // Package definitions
    let package = PyModule::new(m.py(), "package")?;
    package.add("PACKAGE_TYPE", schema::package::PACKAGE_TYPE)?;
    package.add("EXTERNAL_VOLUME", schema::package::EXTERNAL_VOLUME)?;
    package.add("CONTAINER_WEIGHT", schema::package::CONTAINER_WEIGHT)?;
    package.add(
        "DEFAULT_PACKING_FACTOR",
        schema::package::DEFAULT_PACKING_FACTOR,
    )?;
    package.add("SECONDARY_PREFIX", schema::package::SECONDARY_PREFIX)?;
    m.add_submodule(&package)?;

    // Packaging changes
    let packaging = PyModule::new(m.py(), "packaging")?;
    packaging.add("PRIMARY_PACKAGE", schema::packaging::PRIMARY_PACKAGE)?;
    packaging.add(
        "PRIMARY_PACKAGED_VOLUME",
        schema::packaging::PRIMARY_PACKAGED_VOLUME,
    )?;
    packaging.add("PRIMARY_MASS_DELTA", schema::packaging::PRIMARY_MASS_DELTA)?;
    packaging.add("PRIMARY_CONTAINERS", schema::packaging::PRIMARY_CONTAINERS)?;
    packaging.add("SECONDARY_PACKAGE", schema::packaging::SECONDARY_PACKAGE)?;
    packaging.add(
        "SECONDARY_PACKAGED_VOLUME",
        schema::packaging::SECONDARY_PACKAGED_VOLUME,
    )?;
    packaging.add(
        "SECONDARY_MASS_DELTA",
        schema::packaging::SECONDARY_MASS_DELTA,
    )?;
    packaging.add(
        "SECONDARY_CONTAINERS",
        schema::packaging::SECONDARY_CONTAINERS,
    )?;
    m.add_submodule(&packaging)?;

    // Route factors
    let route = PyModule::new(m.py(), "route")?;
    route.add("ROUTE_NUMBER", schema::route::ROUTE_NUMBER)?;
    route.add("VOLUME_FACTOR", schema::route::VOLUME_FACTOR)?;
    route.add("MASS_FACTOR", schema::route::MASS_FACTOR)?;
    route.add("ACTIVITY", schema::route::ACTIVITY)?;
    m.add_submodule(&route)?;

    // Activity limits
    let activity = PyModule::new(m.py(), "activity")?;
    activity.add(
        "NORMALISED_ACTIVITY",
        schema::activity::NORMALISED_ACTIVITY,
    )?;
    activity.add("IS_WITHIN_LIMIT", schema::activity::IS_WITHIN_LIMIT)?;
    m.add_submodule(&activity)?;

    Ok(())
}
