// src/transform/mod.rs

pub mod clean;
pub mod coerce;
pub mod date_parser;
pub mod normalize;
pub mod scale;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::columns::{DATE, END_DATE, INTERACTIVE, SCORE, SCORE_NORMALIZED, START_DATE, STATUS};
use crate::config::IdAliases;
use crate::dataset::Dataset;
use crate::table::Table;

/// Bring every identifier variant to the canonical name.
#[instrument(level = "info", skip_all)]
pub fn normalize_schema(mut ds: Dataset, aliases: &IdAliases) -> Dataset {
    normalize::normalize_id_column(&mut ds.alunos, &aliases.alunos);
    normalize::normalize_id_column(&mut ds.indicadores, &aliases.indicadores);
    normalize::normalize_id_column(&mut ds.roi, &aliases.roi);
    ds
}

/// Identifiers to text; known date columns parsed best-effort.
#[instrument(level = "info", skip_all)]
pub fn coerce_types(mut ds: Dataset) -> Result<Dataset> {
    for t in ds.tables_mut() {
        coerce::id_to_text(t).with_context(|| format!("casting identifier of `{}`", t.name))?;
    }
    parse_dates(&mut ds.alunos, &[START_DATE, END_DATE])?;
    parse_dates(&mut ds.indicadores, &[DATE])?;
    Ok(ds)
}

fn parse_dates(table: &mut Table, columns: &[&str]) -> Result<()> {
    for &column in columns {
        let parsed = coerce::parse_date_column(table, column)
            .with_context(|| format!("parsing `{}` in `{}`", column, table.name))?;
        if parsed.is_none() {
            debug!(table = %table.name, column, "date column absent");
        }
    }
    Ok(())
}

/// Fill missing score, status and interactive-flag values, then drop exact
/// duplicate rows from every table.
#[instrument(level = "info", skip_all)]
pub fn clean(mut ds: Dataset, missing_interactive: &str) -> Result<Dataset> {
    if let Some(n) = clean::fill_with_mean(&mut ds.alunos, SCORE)? {
        info!(filled = n, "`{}` filled with mean", SCORE);
    }
    if let Some(n) = clean::fill_with_mode(&mut ds.alunos, STATUS)? {
        info!(filled = n, "`{}` filled with mode", STATUS);
    }
    for t in [&mut ds.indicadores, &mut ds.roi] {
        if let Some(n) = clean::fill_with_text(t, INTERACTIVE, missing_interactive)? {
            info!(table = %t.name, filled = n, "`{}` filled with placeholder", INTERACTIVE);
        }
    }
    for t in ds.tables_mut() {
        clean::drop_duplicates(t).with_context(|| format!("deduplicating `{}`", t.name))?;
    }
    Ok(ds)
}

/// Add the min-max normalized score when a score column exists.
#[instrument(level = "info", skip_all)]
pub fn scale(mut ds: Dataset) -> Result<Dataset> {
    if scale::min_max_scale(&mut ds.alunos, SCORE, SCORE_NORMALIZED)? {
        info!("added `{}`", SCORE_NORMALIZED);
    }
    Ok(ds)
}
