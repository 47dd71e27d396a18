use polars::prelude::*;
use std::fmt;
use tracing::{debug, warn};

use crate::table::format::format_float;
use crate::table::Table;

/// Sum of one numeric column per distinct combination of group columns.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSum {
    pub group_by: Vec<String>,
    pub value: String,
    /// Rendered group key and its sum, ordered by key.
    pub groups: Vec<(Vec<String>, f64)>,
    integral: bool,
}

impl GroupedSum {
    pub fn get(&self, key: &[&str]) -> Option<f64> {
        self.groups
            .iter()
            .find(|(k, _)| k.iter().map(String::as_str).eq(key.iter().copied()))
            .map(|(_, v)| *v)
    }
}

/// Group `table` by `by` and sum `value`. Rows with a null in any group
/// column are dropped; null values add nothing. Groups come out in ascending
/// key order.
///
/// Returns `Ok(None)` if any named column is absent or `value` is not numeric.
pub fn grouped_sum(table: &Table, by: &[&str], value: &str) -> PolarsResult<Option<GroupedSum>> {
    if let Some(missing) = by.iter().chain([&value]).find(|c| !table.has_column(c)) {
        debug!(table = %table.name, column = *missing, "aggregation skipped");
        return Ok(None);
    }
    let Some(dtype) = table.dtype(value) else {
        return Ok(None);
    };
    if !dtype.is_primitive_numeric() {
        warn!(table = %table.name, column = value, %dtype, "cannot sum non-numeric column");
        return Ok(None);
    }
    let integral = dtype.is_integer();

    let mut lf = table.df.clone().lazy();
    if let Some(keys_present) = by
        .iter()
        .map(|c| col(*c).is_not_null())
        .reduce(|a, b| a.and(b))
    {
        lf = lf.filter(keys_present);
    }
    let df = lf
        .group_by(by.iter().map(|c| col(*c)).collect::<Vec<_>>())
        .agg([col(value).sum()])
        .sort(by.to_vec(), SortMultipleOptions::default())
        .collect()?;

    let keys: Vec<StringChunked> = by
        .iter()
        .map(|c| Ok(df.column(c)?.cast(&DataType::String)?.str()?.clone()))
        .collect::<PolarsResult<_>>()?;
    let sums = df.column(value)?.cast(&DataType::Float64)?;
    let sums = sums.f64()?;

    let groups = (0..df.height())
        .map(|i| {
            let rendered = keys
                .iter()
                .map(|k| k.get(i).unwrap_or_default().to_string())
                .collect();
            (rendered, sums.get(i).unwrap_or(0.0))
        })
        .collect();

    Ok(Some(GroupedSum {
        group_by: by.iter().map(|s| s.to_string()).collect(),
        value: value.to_string(),
        groups,
        integral,
    }))
}

impl fmt::Display for GroupedSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |v: f64| {
            if self.integral {
                format!("{}", v as i64)
            } else {
                format_float(v)
            }
        };
        let labels: Vec<String> = self.groups.iter().map(|(k, _)| k.join("  ")).collect();
        let width = labels
            .iter()
            .map(|l| l.chars().count())
            .chain([self.group_by.join("  ").chars().count()])
            .max()
            .unwrap_or(0);

        writeln!(f, "{}", self.group_by.join("  "))?;
        for (label, (_, v)) in labels.iter().zip(&self.groups) {
            writeln!(f, "{:<width$}  {}", label, render(*v), width = width)?;
        }
        writeln!(f, "Name: {}", self.value)
    }
}
