use polars::prelude::*;

use crate::error::StreamError;
use crate::frame::{float, left_join_in_order, require_columns};
use crate::schema::{route, stream};

/// Internal alias for the route's activity factor, kept apart from any
/// stream column that happens to be called `Activity`.
const ACTIVITY_FACTOR: &str = "__activity_factor";

/// Scale each stream's volume, mass, and radionuclide activities by the
/// factors of its route.
///
/// Streams are left-joined to `route_factors` on `Route Number == Route number`.
/// The single `Activity` factor applies to every radionuclide column. Streams
/// on a route with no factor row get null outputs.
///
/// The route table may carry its factors as `Volume Factor` / `Mass Factor`
/// or under the bare `Volume` / `Mass` names.
pub fn get_route_factor_adjustments<S: AsRef<str>>(
    streams: &DataFrame,
    route_factors: &DataFrame,
    radionucleide_cols: &[S],
) -> Result<DataFrame, StreamError> {
    let nuclides: Vec<&str> = radionucleide_cols.iter().map(AsRef::as_ref).collect();
    require_columns(streams, &[stream::ROUTE_NUMBER, stream::VOLUME, stream::MASS])?;
    require_columns(streams, &nuclides)?;
    require_columns(route_factors, &[route::ROUTE_NUMBER, route::ACTIVITY])?;

    let volume_factor = factor_column(route_factors, route::VOLUME_FACTOR, stream::VOLUME)?;
    let mass_factor = factor_column(route_factors, route::MASS_FACTOR, stream::MASS)?;

    let factors = route_factors.clone().lazy().select([
        // Float64 keys: an integer cast would truncate 12.5 into route 12.
        float(route::ROUTE_NUMBER),
        float(volume_factor).alias(route::VOLUME_FACTOR),
        float(mass_factor).alias(route::MASS_FACTOR),
        float(route::ACTIVITY).alias(ACTIVITY_FACTOR),
    ]);

    let mut stream_cols = vec![
        float(stream::ROUTE_NUMBER),
        float(stream::VOLUME),
        float(stream::MASS),
    ];
    stream_cols.extend(nuclides.iter().map(|c| float(c)));

    let mut adjusted = vec![
        (col(stream::VOLUME) * col(route::VOLUME_FACTOR)).alias(stream::VOLUME),
        (col(stream::MASS) * col(route::MASS_FACTOR)).alias(stream::MASS),
    ];
    adjusted.extend(
        nuclides
            .iter()
            .map(|c| (col(*c) * col(ACTIVITY_FACTOR)).alias(*c)),
    );

    let df = left_join_in_order(
        streams.clone().lazy().select(stream_cols),
        factors,
        stream::ROUTE_NUMBER,
        route::ROUTE_NUMBER,
    )
    .select(adjusted)
    .collect()?;

    log::debug!("applied route factors to {} streams", df.height());
    Ok(df)
}

fn factor_column<'a>(
    route_factors: &DataFrame,
    factor: &'a str,
    bare: &'a str,
) -> Result<&'a str, StreamError> {
    if route_factors.column(factor).is_ok() {
        Ok(factor)
    } else if route_factors.column(bare).is_ok() {
        Ok(bare)
    } else {
        Err(StreamError::MissingColumn(factor.to_string()))
    }
}

/// Extract the route number from a `<prefix>_<route>_<suffix>` stream id.
pub fn parse_route_number(stream_id: &str) -> Result<i64, StreamError> {
    let field = stream_id.split('_').nth(1).ok_or_else(|| {
        StreamError::InvalidStreamId(format!("'{stream_id}' has no route number field"))
    })?;
    field.trim().parse::<i64>().map_err(|e| {
        StreamError::InvalidStreamId(format!(
            "'{stream_id}': route number '{field}' is not an integer ({e})"
        ))
    })
}

/// Parse every id in `stream_id` with [`parse_route_number`].
///
/// Fails on the first null or malformed id; there is no partial result.
pub fn get_route_number(stream_id: &Series) -> Result<Series, StreamError> {
    let numbers = stream_id
        .str()?
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let id = id.ok_or_else(|| {
                StreamError::InvalidStreamId(format!("null stream id at row {i}"))
            })?;
            parse_route_number(id)
        })
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(Series::new(stream::ROUTE_NUMBER.into(), numbers))
}

/// The streams table with `Route Number` derived from `Stream ID`.
pub fn with_route_numbers(streams: &DataFrame) -> Result<DataFrame, StreamError> {
    require_columns(streams, &[stream::STREAM_ID])?;
    let numbers = get_route_number(streams.column(stream::STREAM_ID)?.as_materialized_series())?;
    let mut df = streams.clone();
    df.with_column(numbers)?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    fn streams() -> DataFrame {
        df!(
            stream::ROUTE_NUMBER => [12i64, 3, 99, 12],
            stream::VOLUME => [10.0, 4.0, 1.0, 5.0],
            stream::MASS => [20.0, 8.0, 2.0, 1.0],
            "Cs137" => [1.0, 2.0, 3.0, 4.0],
            "Sr90" => [0.5, 0.5, 0.5, 0.5],
        )
        .unwrap()
    }

    #[test]
    fn factors_scale_each_quantity() {
        let factors = df!(
            route::ROUTE_NUMBER => [3i64, 12],
            route::VOLUME_FACTOR => [0.5, 2.0],
            route::MASS_FACTOR => [1.0, 3.0],
            route::ACTIVITY => [0.1, 10.0],
        )
        .unwrap();
        let adjusted =
            get_route_factor_adjustments(&streams(), &factors, &["Cs137", "Sr90"]).unwrap();

        assert_eq!(
            adjusted.get_column_names_str(),
            vec!["Volume", "Mass", "Cs137", "Sr90"]
        );
        assert_eq!(
            floats(&adjusted, stream::VOLUME),
            vec![Some(20.0), Some(2.0), None, Some(10.0)]
        );
        assert_eq!(
            floats(&adjusted, stream::MASS),
            vec![Some(60.0), Some(8.0), None, Some(3.0)]
        );
        let cs = floats(&adjusted, "Cs137");
        assert_eq!(cs[0], Some(10.0));
        assert!((cs[1].unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(cs[2], None);
        assert_eq!(cs[3], Some(40.0));
        assert_eq!(floats(&adjusted, "Sr90")[0], Some(5.0));
    }

    #[test]
    fn bare_factor_names_are_accepted() {
        let factors = df!(
            route::ROUTE_NUMBER => [12i64],
            stream::VOLUME => [2.0],
            stream::MASS => [0.5],
            route::ACTIVITY => [1.0],
        )
        .unwrap();
        let adjusted = get_route_factor_adjustments::<&str>(&streams(), &factors, &[]).unwrap();
        assert_eq!(
            floats(&adjusted, stream::VOLUME),
            vec![Some(20.0), None, None, Some(10.0)]
        );
        assert_eq!(
            floats(&adjusted, stream::MASS),
            vec![Some(10.0), None, None, Some(0.5)]
        );
    }

    #[test]
    fn missing_factor_column_is_reported() {
        let factors = df!(
            route::ROUTE_NUMBER => [12i64],
            route::ACTIVITY => [1.0],
        )
        .unwrap();
        assert!(matches!(
            get_route_factor_adjustments::<&str>(&streams(), &factors, &[]),
            Err(StreamError::MissingColumn(name)) if name == route::VOLUME_FACTOR
        ));
    }

    #[test]
    fn fractional_route_number_is_unmatched() {
        let streams = df!(
            stream::ROUTE_NUMBER => [12.5, 12.0],
            stream::VOLUME => [10.0, 10.0],
            stream::MASS => [4.0, 4.0],
        )
        .unwrap();
        let factors = df!(
            route::ROUTE_NUMBER => [12i64],
            route::VOLUME_FACTOR => [2.0],
            route::MASS_FACTOR => [3.0],
            route::ACTIVITY => [1.0],
        )
        .unwrap();
        let adjusted = get_route_factor_adjustments::<&str>(&streams, &factors, &[]).unwrap();
        assert_eq!(floats(&adjusted, stream::VOLUME), vec![None, Some(20.0)]);
        assert_eq!(floats(&adjusted, stream::MASS), vec![None, Some(12.0)]);
    }

    #[test]
    fn route_numbers_parse_from_ids() {
        assert_eq!(parse_route_number("A_12_B").unwrap(), 12);
        assert_eq!(parse_route_number("LLW_007").unwrap(), 7);
        assert!(matches!(
            parse_route_number("A_B"),
            Err(StreamError::InvalidStreamId(_))
        ));
        assert!(matches!(
            parse_route_number("A12B"),
            Err(StreamError::InvalidStreamId(_))
        ));

        let ids = Series::new("Stream ID".into(), ["A_12_B", "X_3_Y"]);
        let numbers = get_route_number(&ids).unwrap();
        assert_eq!(numbers.name().as_str(), stream::ROUTE_NUMBER);
        let values: Vec<Option<i64>> = numbers.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(12), Some(3)]);
    }

    #[test]
    fn one_bad_id_fails_the_whole_series() {
        let ids = Series::new("Stream ID".into(), [Some("A_12_B"), Some("A_B"), None]);
        assert!(matches!(
            get_route_number(&ids),
            Err(StreamError::InvalidStreamId(_))
        ));
        let ids = Series::new("Stream ID".into(), [Some("A_12_B"), None]);
        assert!(get_route_number(&ids).is_err());
    }

    #[test]
    fn route_numbers_are_added_to_streams() {
        let streams = df!(
            stream::STREAM_ID => ["W_1_a", "W_2_b"],
            stream::VOLUME => [1.0, 2.0],
        )
        .unwrap();
        let df = with_route_numbers(&streams).unwrap();
        assert_eq!(df.width(), 3);
        let values: Vec<Option<i64>> = df
            .column(stream::ROUTE_NUMBER)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some(1), Some(2)]);
    }
}
