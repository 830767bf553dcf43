//! Conditioning: which material a stream is conditioned with, and the
//! volume and mass that conditioning adds.

use polars::prelude::*;

use crate::error::StreamError;
use crate::frame::{float, left_join_in_order, require_columns, series};
use crate::schema::{conditioning, material, stream};

/// The fixed density reference table: `Conditioning material`, `Density`.
pub fn material_density_table() -> Result<DataFrame, StreamError> {
    let (names, densities): (Vec<&str>, Vec<f64>) = material::DENSITIES.iter().copied().unzip();
    let df = DataFrame::new(vec![
        Column::new(stream::CONDITIONING_MATERIAL.into(), names),
        Column::new(material::DENSITY.into(), densities),
    ])?;
    Ok(df)
}

/// Assign a conditioning material to every stream.
///
/// An override in `Conditioning material` is used verbatim. Without one,
/// streams with `Conditioning factor > 1` get grout and everything else gets
/// "No Conditioning Material".
///
/// Returns `Conditioning material` and `Density`, one row per stream. Materials
/// missing from the density table get a null density. The input is not modified.
pub fn assign_conditioning_materials(streams: &DataFrame) -> Result<DataFrame, StreamError> {
    assign_conditioning_materials_with(streams, &material_density_table()?)
}

/// Like [`assign_conditioning_materials`], against a caller-supplied density table.
pub fn assign_conditioning_materials_with(
    streams: &DataFrame,
    densities: &DataFrame,
) -> Result<DataFrame, StreamError> {
    require_columns(
        streams,
        &[stream::CONDITIONING_MATERIAL, stream::CONDITIONING_FACTOR],
    )?;
    require_columns(densities, &[stream::CONDITIONING_MATERIAL, material::DENSITY])?;

    let override_material = col(stream::CONDITIONING_MATERIAL).cast(DataType::String);
    let assigned = when(override_material.clone().is_not_null())
        .then(override_material)
        // A null factor is not > 1, so it falls through to no conditioning.
        .when(float(stream::CONDITIONING_FACTOR).gt(lit(1.0)))
        .then(lit(material::GROUT))
        .otherwise(lit(material::NO_CONDITIONING_MATERIAL))
        .alias(stream::CONDITIONING_MATERIAL);

    let density_lookup = densities.clone().lazy().select([
        col(stream::CONDITIONING_MATERIAL).cast(DataType::String),
        float(material::DENSITY),
    ]);

    let df = left_join_in_order(
        streams.clone().lazy().select([assigned]),
        density_lookup,
        stream::CONDITIONING_MATERIAL,
        stream::CONDITIONING_MATERIAL,
    )
    .select([col(stream::CONDITIONING_MATERIAL), col(material::DENSITY)])
    .collect()?;

    log::debug!("assigned conditioning materials for {} streams", df.height());
    Ok(df)
}

fn additional_volume_expr() -> Expr {
    (float(stream::CONDITIONING_FACTOR) - lit(1.0)) * float(stream::VOLUME)
}

/// `(Conditioning factor - 1) * Volume`; negative for factors below 1.
pub fn additional_conditioning_volume(streams: &DataFrame) -> Result<Series, StreamError> {
    require_columns(streams, &[stream::VOLUME, stream::CONDITIONING_FACTOR])?;
    let df = streams
        .clone()
        .lazy()
        .select([additional_volume_expr().alias(conditioning::VOLUME_DELTA)])
        .collect()?;
    series(&df, conditioning::VOLUME_DELTA)
}

/// `Volume + additional_conditioning_volume`, i.e. the post-conditioning volume.
pub fn total_conditioning_volume(streams: &DataFrame) -> Result<Series, StreamError> {
    require_columns(streams, &[stream::VOLUME, stream::CONDITIONING_FACTOR])?;
    let df = streams
        .clone()
        .lazy()
        .select([(float(stream::VOLUME) + additional_volume_expr()).alias(stream::VOLUME)])
        .collect()?;
    series(&df, stream::VOLUME)
}

/// Volume and mass added by conditioning each stream.
///
/// Output columns: `Volume Delta`, `Mass Delta`, `Conditioning material`.
pub fn get_conditioning_deltas(streams: &DataFrame) -> Result<DataFrame, StreamError> {
    let materials = assign_conditioning_materials(streams)?;
    let volume_delta = additional_conditioning_volume(streams)?;

    let df = DataFrame::new(vec![
        volume_delta.into(),
        materials.column(material::DENSITY)?.clone(),
        materials.column(stream::CONDITIONING_MATERIAL)?.clone(),
    ])?
    .lazy()
    .select([
        col(conditioning::VOLUME_DELTA),
        (col(material::DENSITY) * col(conditioning::VOLUME_DELTA)).alias(conditioning::MASS_DELTA),
        col(stream::CONDITIONING_MATERIAL),
    ])
    .collect()?;

    log::debug!("computed conditioning deltas for {} streams", df.height());
    Ok(df)
}
