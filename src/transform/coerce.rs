use chrono::NaiveDateTime;
use polars::prelude::*;
use tracing::{debug, info};

use super::date_parser::parse_datetime;
use crate::columns::ID;
use crate::table::Table;

/// Cast the identifier column to text so keys compare equal across tables
/// regardless of how each file was typed. No-op when the column is absent.
pub fn id_to_text(table: &mut Table) -> PolarsResult<()> {
    let Some(id) = table.column(ID) else {
        debug!(table = %table.name, "no identifier column to cast");
        return Ok(());
    };
    if id.dtype() == &DataType::String {
        return Ok(());
    }
    let text = id.cast(&DataType::String)?;
    table.df.with_column(text)?;
    Ok(())
}

/// Parse `name` into date-times; cells that do not parse become null.
/// Returns the number of non-null cells that failed to parse, or `None`
/// when the column is absent.
pub fn parse_date_column(table: &mut Table, name: &str) -> PolarsResult<Option<usize>> {
    let Some(raw) = table.column(name) else {
        return Ok(None);
    };
    if matches!(raw.dtype(), DataType::Datetime(_, _)) {
        return Ok(Some(0));
    }

    // numbers (e.g. 20240210) go through their text form
    let raw = raw.cast(&DataType::String)?;
    let raw = raw.str()?;
    let parsed: Vec<Option<NaiveDateTime>> =
        raw.into_iter().map(|v| v.and_then(parse_datetime)).collect();
    let failed = raw
        .into_iter()
        .zip(&parsed)
        .filter(|(r, p)| r.is_some() && p.is_none())
        .count();

    if failed > 0 {
        info!(
            table = %table.name,
            column = name,
            failed,
            "unparseable dates set to null"
        );
    }
    let dates =
        DatetimeChunked::from_naive_datetime_options(name.into(), parsed, TimeUnit::Microseconds);
    table.df.with_column(dates.into_series())?;
    Ok(Some(failed))
}
