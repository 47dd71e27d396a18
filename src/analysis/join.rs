use polars::prelude::*;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::table::Table;

/// Suffixes for non-key columns present on both sides.
const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

const JOIN_KEY: &str = "__join_key";
const LEFT_ROW: &str = "__left_row";
const RIGHT_ROW: &str = "__right_row";

fn output_name(name: &str, key: &str, other: &HashSet<&str>, suffix: &str) -> String {
    if name != key && other.contains(name) {
        format!("{}{}", name, suffix)
    } else {
        name.to_string()
    }
}

/// Inner join on `key`. For each left row in order, every matching right row
/// in order. Output holds the left columns, then the right columns except the
/// key; clashing names get `_x`/`_y`. Keys compare by their text form, so a
/// numeric id on one side still meets the same id as text on the other. Null
/// keys never match.
///
/// Returns `Ok(None)` when `key` is missing from either side.
pub fn inner_join(left: &Table, right: &Table, key: &str) -> PolarsResult<Option<Table>> {
    if !left.has_column(key) || !right.has_column(key) {
        warn!(
            left = %left.name,
            right = %right.name,
            "join key `{}` missing; join skipped",
            key
        );
        return Ok(None);
    }

    let left_names: HashSet<&str> = left.column_names().into_iter().collect();
    let right_names: HashSet<&str> = right.column_names().into_iter().collect();

    let mut left_exprs = vec![col(key).cast(DataType::String).alias(JOIN_KEY)];
    let mut output = Vec::with_capacity(left.num_columns() + right.num_columns());
    for name in left.column_names() {
        let renamed = output_name(name, key, &right_names, LEFT_SUFFIX);
        left_exprs.push(col(name).alias(renamed.as_str()));
        output.push(renamed);
    }
    let mut right_exprs = vec![col(key).cast(DataType::String).alias(JOIN_KEY)];
    for name in right.column_names().into_iter().filter(|n| *n != key) {
        let renamed = output_name(name, key, &left_names, RIGHT_SUFFIX);
        right_exprs.push(col(name).alias(renamed.as_str()));
        output.push(renamed);
    }

    let lhs = left
        .df
        .clone()
        .lazy()
        .select(left_exprs)
        .with_row_index(LEFT_ROW, None);
    let rhs = right
        .df
        .clone()
        .lazy()
        .select(right_exprs)
        .with_row_index(RIGHT_ROW, None);

    let df = lhs
        .join(
            rhs,
            [col(JOIN_KEY)],
            [col(JOIN_KEY)],
            JoinArgs::new(JoinType::Inner),
        )
        .sort([LEFT_ROW, RIGHT_ROW], SortMultipleOptions::default())
        .select(output.iter().map(|n| col(n.as_str())).collect::<Vec<_>>())
        .collect()?;

    let joined = Table::new(format!("{}_{}", left.name, right.name), df);
    debug!(
        table = %joined.name,
        rows = joined.num_rows(),
        left_rows = left.num_rows(),
        right_rows = right.num_rows(),
        "inner join"
    );
    Ok(Some(joined))
}
