use std::collections::HashMap;

use polars::prelude::*;

use crate::error::StreamError;
use crate::frame::{float, require_columns, zero_if_missing};
use crate::schema::activity;

/// Sum each stream's activities as fractions of their radionuclide limits.
///
/// `Normalised Activity` is the sum of `activity / limit` over the given
/// columns and `Is Within Limit` holds when that sum is strictly below 1.
/// A radionuclide with no entry in `activity_limits` is left out of the sum,
/// as are missing or NaN ratios.
pub fn evaluate_activity_limits<S: AsRef<str>>(
    streams: &DataFrame,
    radionucleide_cols: &[S],
    activity_limits: &HashMap<String, f64>,
) -> Result<DataFrame, StreamError> {
    let nuclides: Vec<&str> = radionucleide_cols.iter().map(AsRef::as_ref).collect();
    require_columns(streams, &nuclides)?;

    let ratios: Vec<Expr> = nuclides
        .iter()
        .filter_map(|&nuclide| match activity_limits.get(nuclide) {
            Some(&limit) => Some(zero_if_missing(float(nuclide) / lit(limit))),
            None => {
                log::warn!("no activity limit for radionuclide '{nuclide}'");
                None
            }
        })
        .collect();

    let normalised = ratios
        .into_iter()
        .reduce(|a, b| a + b)
        .unwrap_or_else(|| lit(0.0));

    // with_columns broadcasts the literal sum when no ratio applies.
    let df = streams
        .clone()
        .lazy()
        .with_columns([normalised.alias(activity::NORMALISED_ACTIVITY)])
        .select([
            col(activity::NORMALISED_ACTIVITY),
            col(activity::NORMALISED_ACTIVITY)
                .lt(lit(1.0))
                .alias(activity::IS_WITHIN_LIMIT),
        ])
        .collect()?;

    log::debug!("evaluated activity limits for {} streams", df.height());
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> HashMap<String, f64> {
        HashMap::from([("Cs137".to_string(), 1.0), ("Sr90".to_string(), 1.0)])
    }

    fn evaluate(streams: &DataFrame, limits: &HashMap<String, f64>) -> (Vec<f64>, Vec<bool>) {
        let df = evaluate_activity_limits(streams, &["Cs137", "Sr90"], limits).unwrap();
        let normalised = df
            .column(activity::NORMALISED_ACTIVITY)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect();
        let within = df
            .column(activity::IS_WITHIN_LIMIT)
            .unwrap()
            .bool()
            .unwrap()
            .into_iter()
            .map(|v| v.unwrap())
            .collect();
        (normalised, within)
    }

    #[test]
    fn sums_fractions_of_limits() {
        let streams = df!(
            "Cs137" => [0.5, 0.5, 0.5],
            "Sr90" => [0.3, 0.6, 0.5],
        )
        .unwrap();
        let (normalised, within) = evaluate(&streams, &limits());
        assert!((normalised[0] - 0.8).abs() < 1e-12);
        assert!((normalised[1] - 1.1).abs() < 1e-12);
        assert_eq!(normalised[2], 1.0);
        // Exactly at the limit fails.
        assert_eq!(within, vec![true, false, false]);
    }

    #[test]
    fn limits_scale_each_nuclide() {
        let streams = df!("Cs137" => [50.0], "Sr90" => [1.0]).unwrap();
        let limits = HashMap::from([("Cs137".to_string(), 100.0), ("Sr90".to_string(), 4.0)]);
        let (normalised, within) = evaluate(&streams, &limits);
        assert!((normalised[0] - 0.75).abs() < 1e-12);
        assert_eq!(within, vec![true]);
    }

    #[test]
    fn nuclide_without_limit_is_skipped() {
        let streams = df!("Cs137" => [0.4], "Sr90" => [5.0]).unwrap();
        let limits = HashMap::from([("Cs137".to_string(), 1.0)]);
        let (normalised, within) = evaluate(&streams, &limits);
        assert!((normalised[0] - 0.4).abs() < 1e-12);
        assert_eq!(within, vec![true]);
    }

    #[test]
    fn no_applicable_limits_keeps_row_count() {
        let streams = df!("Cs137" => [0.4, 9.0], "Sr90" => [5.0, 1.0]).unwrap();
        let (normalised, within) = evaluate(&streams, &HashMap::new());
        assert_eq!(normalised, vec![0.0, 0.0]);
        assert_eq!(within, vec![true, true]);
    }

    #[test]
    fn zero_limit_fails() {
        let streams = df!("Cs137" => [0.1], "Sr90" => [Some(0.0)]).unwrap();
        let limits = HashMap::from([("Cs137".to_string(), 0.0), ("Sr90".to_string(), 1.0)]);
        let (normalised, within) = evaluate(&streams, &limits);
        assert_eq!(normalised, vec![f64::INFINITY]);
        assert_eq!(within, vec![false]);
    }
}
