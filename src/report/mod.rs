// src/report/mod.rs

//! Observational summaries printed to stdout. Nothing here mutates a table.

use polars::prelude::*;
use std::fmt;

use crate::table::Table;

/// Per-column structure of a table: non-null count and dtype.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub table: String,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    pub non_null: usize,
    pub dtype: DataType,
}

/// Missing-value count per column, most missing first.
#[derive(Debug, Clone, PartialEq)]
pub struct NullCounts {
    pub counts: Vec<(String, usize)>,
}

/// Distinct non-null values per column.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueCounts {
    pub counts: Vec<(String, usize)>,
}

pub fn summarize(table: &Table, label: &str) -> TableSummary {
    TableSummary {
        table: label.to_string(),
        rows: table.num_rows(),
        columns: table
            .df
            .get_columns()
            .iter()
            .map(|c| ColumnSummary {
                name: c.name().to_string(),
                non_null: c.len() - c.null_count(),
                dtype: c.dtype().clone(),
            })
            .collect(),
    }
}

pub fn null_counts(table: &Table) -> NullCounts {
    let mut counts: Vec<(String, usize)> = table
        .df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect();
    // stable: ties keep column order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    NullCounts { counts }
}

pub fn unique_counts(table: &Table) -> PolarsResult<UniqueCounts> {
    let counts = table
        .df
        .get_columns()
        .iter()
        .map(|c| {
            // n_unique counts null as a value of its own
            let distinct = c.as_materialized_series().n_unique()?;
            let null_group = usize::from(c.null_count() > 0);
            Ok((c.name().to_string(), distinct - null_group))
        })
        .collect::<PolarsResult<_>>()?;
    Ok(UniqueCounts { counts })
}

/// Rows that repeat an earlier row exactly.
pub fn duplicate_count(table: &Table) -> PolarsResult<usize> {
    let distinct = table
        .df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(table.num_rows() - distinct.height())
}

fn write_pairs(f: &mut fmt::Formatter<'_>, pairs: &[(String, usize)]) -> fmt::Result {
    let width = pairs.iter().map(|(n, _)| n.chars().count()).max().unwrap_or(0);
    for (name, n) in pairs {
        writeln!(f, "{:<width$}  {}", name, n, width = width)?;
    }
    Ok(())
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: {} rows, {} columns",
            self.table,
            self.rows,
            self.columns.len()
        )?;
        let width = self
            .columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0);
        for (i, c) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "{:>3}  {:<width$}  {} non-null  {}",
                i,
                c.name,
                c.non_null,
                c.dtype,
                width = width
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for NullCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, &self.counts)
    }
}

impl fmt::Display for UniqueCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_pairs(f, &self.counts)
    }
}
