use std::collections::HashSet;

use polars::prelude::*;

use crate::error::StreamError;
use crate::frame::{float, left_join_in_order, require_columns, zero_if_missing, ROW_INDEX};
use crate::schema::{package, packaging, stream};

/// Build the package route table from (primary, secondary) package type pairs.
///
/// Each pair contributes the definition rows matching its primary type and
/// the rows matching its secondary type. Primary and secondary slices are
/// concatenated separately and then joined by position, with the secondary
/// columns renamed `Secondary <column>`. A type with no definition row
/// shifts every later secondary row up by one.
pub fn construct_package_routes<S: AsRef<str>>(
    package_routes: &[(S, S)],
    package_definitions: &DataFrame,
) -> Result<DataFrame, StreamError> {
    require_columns(package_definitions, &[package::PACKAGE_TYPE])?;

    let known: HashSet<&str> = package_definitions
        .column(package::PACKAGE_TYPE)?
        .str()?
        .into_iter()
        .flatten()
        .collect();

    let definitions = package_definitions.clone().lazy();
    let slice_for = |package_type: &str| {
        if !known.contains(package_type) {
            log::warn!("package type '{package_type}' has no definition");
        }
        definitions
            .clone()
            .filter(col(package::PACKAGE_TYPE).eq(lit(package_type)))
    };

    let mut primary_slices = Vec::with_capacity(package_routes.len());
    let mut secondary_slices = Vec::with_capacity(package_routes.len());
    for (primary_step, secondary_step) in package_routes {
        primary_slices.push(slice_for(primary_step.as_ref()));
        secondary_slices.push(slice_for(secondary_step.as_ref()));
    }

    let stack = |slices: Vec<LazyFrame>| -> Result<LazyFrame, StreamError> {
        if slices.is_empty() {
            Ok(definitions.clone().limit(0))
        } else {
            Ok(concat(&slices, UnionArgs::default())?)
        }
    };

    let names: Vec<String> = package_definitions
        .get_column_names_str()
        .iter()
        .map(|c| c.to_string())
        .collect();
    let secondary_names: Vec<String> = names
        .iter()
        .map(|c| format!("{}{c}", package::SECONDARY_PREFIX))
        .collect();

    let primary = stack(primary_slices)?;
    let secondary = stack(secondary_slices)?.select(
        names
            .iter()
            .zip(&secondary_names)
            .map(|(name, renamed)| col(name.as_str()).alias(renamed.as_str()))
            .collect::<Vec<_>>(),
    );

    let output: Vec<Expr> = names
        .iter()
        .chain(&secondary_names)
        .map(|c| col(c.as_str()))
        .collect();

    let routes = left_join_in_order(
        primary,
        secondary.with_row_index(ROW_INDEX, None),
        ROW_INDEX,
        ROW_INDEX,
    )
    .select(output)
    .collect()?;

    log::debug!("constructed {} package routes", routes.height());
    Ok(routes)
}

/// Packaged volumes, container counts, and container mass per stream.
///
/// Streams are left-joined to the route table on `Package type`; the stream
/// must already carry its `Packaging factor`. Division follows floating-point
/// rules, so a zero `External volume` yields an infinite container count.
/// Missing primary mass deltas and container counts are reported as 0.
pub fn get_packaging_changes(
    streams: &DataFrame,
    package_routes: &DataFrame,
) -> Result<DataFrame, StreamError> {
    require_columns(
        streams,
        &[
            stream::PACKAGE_TYPE,
            stream::VOLUME,
            stream::PACKAGING_FACTOR,
            stream::CONDITIONING_FACTOR,
        ],
    )?;
    require_columns(
        package_routes,
        &[
            package::PACKAGE_TYPE,
            package::EXTERNAL_VOLUME,
            package::CONTAINER_WEIGHT,
            package::SECONDARY_PACKAGE_TYPE,
            package::SECONDARY_EXTERNAL_VOLUME,
            package::SECONDARY_CONTAINER_WEIGHT,
            package::SECONDARY_DEFAULT_PACKING_FACTOR,
        ],
    )?;

    let stream_data = streams.clone().lazy().select([
        col(stream::PACKAGE_TYPE).cast(DataType::String),
        float(stream::VOLUME),
        float(stream::PACKAGING_FACTOR),
        float(stream::CONDITIONING_FACTOR),
    ]);
    let routes = package_routes.clone().lazy().select([
        col(package::PACKAGE_TYPE).cast(DataType::String),
        float(package::EXTERNAL_VOLUME),
        float(package::CONTAINER_WEIGHT),
        col(package::SECONDARY_PACKAGE_TYPE).cast(DataType::String),
        float(package::SECONDARY_EXTERNAL_VOLUME),
        float(package::SECONDARY_CONTAINER_WEIGHT),
        float(package::SECONDARY_DEFAULT_PACKING_FACTOR),
    ]);

    let primary_volume = col(stream::VOLUME)
        * (col(stream::PACKAGING_FACTOR) / col(stream::CONDITIONING_FACTOR));
    let primary_containers = primary_volume.clone() / col(package::EXTERNAL_VOLUME);
    let secondary_volume =
        primary_volume.clone() * col(package::SECONDARY_DEFAULT_PACKING_FACTOR);
    let secondary_containers =
        zero_if_missing(secondary_volume.clone() / col(package::SECONDARY_EXTERNAL_VOLUME));

    let df = left_join_in_order(
        stream_data,
        routes,
        stream::PACKAGE_TYPE,
        package::PACKAGE_TYPE,
    )
    .select([
        col(stream::PACKAGE_TYPE).alias(packaging::PRIMARY_PACKAGE),
        primary_volume.alias(packaging::PRIMARY_PACKAGED_VOLUME),
        zero_if_missing(primary_containers.clone() * col(package::CONTAINER_WEIGHT))
            .alias(packaging::PRIMARY_MASS_DELTA),
        zero_if_missing(primary_containers).alias(packaging::PRIMARY_CONTAINERS),
        col(package::SECONDARY_PACKAGE_TYPE).alias(packaging::SECONDARY_PACKAGE),
        secondary_volume.alias(packaging::SECONDARY_PACKAGED_VOLUME),
        // Not zero-filled: an unmatched route keeps a null secondary mass.
        (secondary_containers.clone() * col(package::SECONDARY_CONTAINER_WEIGHT))
            .alias(packaging::SECONDARY_MASS_DELTA),
        secondary_containers.alias(packaging::SECONDARY_CONTAINERS),
    ])
    .collect()?;

    log::debug!("computed packaging changes for {} streams", df.height());
    Ok(df)
}
