use polars::prelude::*;

use crate::error::StreamError;

/// Temporary column tagging input row positions across a join.
pub(crate) const ROW_INDEX: &str = "__row_index";

pub(crate) fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), StreamError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(StreamError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

pub(crate) fn float(name: &str) -> Expr {
    col(name).cast(DataType::Float64)
}

/// Zero out missing values, counting NaN as missing.
pub(crate) fn zero_if_missing(expr: Expr) -> Expr {
    expr.fill_nan(lit(0.0)).fill_null(lit(0.0))
}

/// Left join that keeps every left row exactly once, in its original order.
///
/// Polars does not guarantee left order for hash joins, so rows are tagged
/// with [`ROW_INDEX`] first and sorted back afterwards. The index column is
/// left in the output; callers select the columns they need.
pub(crate) fn left_join_in_order(
    left: LazyFrame,
    right: LazyFrame,
    left_on: &str,
    right_on: &str,
) -> LazyFrame {
    left.with_row_index(ROW_INDEX, None)
        .join(
            right,
            [col(left_on)],
            [col(right_on)],
            JoinArgs::new(JoinType::Left),
        )
        .sort([ROW_INDEX], SortMultipleOptions::default())
}

pub(crate) fn series(df: &DataFrame, name: &str) -> Result<Series, StreamError> {
    Ok(df.column(name)?.as_materialized_series().clone())
}
