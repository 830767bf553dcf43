use polars::prelude::*;

use crate::error::StreamError;
use crate::frame::{float, require_columns, zero_if_missing};
use crate::schema::stream;

/// Convert a group of weight-percentage columns into absolute masses.
///
/// The group is first renormalised so its percentages sum to 100, then each
/// share is applied to the row's `Mass`. Missing cells count as 0 towards
/// the row total. A row whose percentages sum to 0 divides by zero.
///
/// Returns one column per entry in `cols`, under the same names.
pub fn calculate_material_mass<S: AsRef<str>>(
    streams: &DataFrame,
    cols: &[S],
) -> Result<DataFrame, StreamError> {
    let names: Vec<&str> = cols.iter().map(AsRef::as_ref).collect();
    require_columns(streams, &[stream::MASS])?;
    require_columns(streams, &names)?;

    let divisor = names
        .iter()
        .map(|c| zero_if_missing(float(c)))
        .reduce(|a, b| a + b)
        .unwrap_or_else(|| lit(0.0))
        / lit(100.0);

    let masses: Vec<Expr> = names
        .iter()
        .map(|c| (float(c) / divisor.clone() * float(stream::MASS) / lit(100.0)).alias(*c))
        .collect();

    let df = streams.clone().lazy().select(masses).collect()?;
    log::debug!("computed {} material masses for {} streams", names.len(), df.height());
    Ok(df)
}

/// Hazardous material masses: each column is already a percentage of the
/// stream's total `Mass`, so no renormalisation is applied.
pub fn calculate_haz_material_mass<S: AsRef<str>>(
    streams: &DataFrame,
    cols: &[S],
) -> Result<DataFrame, StreamError> {
    let names: Vec<&str> = cols.iter().map(AsRef::as_ref).collect();
    require_columns(streams, &[stream::MASS])?;
    require_columns(streams, &names)?;

    let masses: Vec<Expr> = names
        .iter()
        .map(|c| (float(c) * float(stream::MASS) / lit(100.0)).alias(*c))
        .collect();

    Ok(streams.clone().lazy().select(masses).collect()?)
}
