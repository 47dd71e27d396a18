// src/write.rs

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::{fs::File, io::Write, path::Path};
use tracing::info;

use crate::table::format::{format_datetime, DateTimeStyle};
use crate::table::Table;

/// Render date-time columns as text, each in the narrowest style that keeps
/// every value intact.
fn render_datetimes(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut out = df.clone();
    for c in df.get_columns() {
        if !matches!(c.dtype(), DataType::Datetime(_, _)) {
            continue;
        }
        let values: Vec<Option<NaiveDateTime>> = c
            .as_materialized_series()
            .datetime()?
            .as_datetime_iter()
            .collect();
        let style = DateTimeStyle::for_values(values.iter().flatten());
        let text: Vec<Option<String>> = values
            .iter()
            .map(|v| v.as_ref().map(|d| format_datetime(d, style)))
            .collect();
        out.with_column(Series::new(c.name().clone(), text))?;
    }
    Ok(out)
}

/// Serialize `table` as comma-delimited text with a header row and no index
/// column. Nulls become empty fields.
pub fn write_table<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut df = render_datetimes(&table.df)
        .with_context(|| format!("formatting dates of `{}`", table.name))?;
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)
        .with_context(|| format!("writing `{}`", table.name))?;
    Ok(())
}

/// Write `table` to `path`, replacing any existing file.
#[tracing::instrument(level = "info", skip(table, path), fields(table = %table.name, path = %path.as_ref().display()))]
pub fn write_table_file<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create output file: {:?}", path.as_ref()))?;
    write_table(table, file)?;
    info!(rows = table.num_rows(), "wrote {}", path.as_ref().display());
    Ok(())
}
