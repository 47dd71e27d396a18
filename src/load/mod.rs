// src/load/mod.rs

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use polars::prelude::*;
use std::{fs::File, io::Cursor, io::Read, path::Path};
use tracing::{debug, info};

use crate::table::Table;

/// Cell spellings read as missing values, on top of empty fields.
static NA_TOKENS: Lazy<Vec<PlSmallStr>> = Lazy::new(|| {
    [
        "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .map(PlSmallStr::from)
    .collect()
});

/// Parse a comma-delimited stream with a header row into a typed table.
/// A record carrying more fields than the header is an error.
pub fn read_table<R: Read>(mut reader: R, name: &str) -> Result<Table> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .with_context(|| format!("reading `{}`", name))?;
    if data.iter().all(u8::is_ascii_whitespace) {
        bail!("`{}` has no header row", name);
    }

    let opts = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|p| {
            p.with_null_values(Some(NullValues::AllColumns(NA_TOKENS.clone())))
        });
    let mut cursor = Cursor::new(data.as_slice());
    let mut df: DataFrame = CsvReader::new(&mut cursor)
        .with_options(opts)
        .finish()
        .with_context(|| format!("CSV parse error in `{}`", name))?;

    widen_nullable_columns(&mut df)?;
    Ok(Table::new(name, df))
}

/// Integer columns with gaps become Float64, as do columns with no values at
/// all, so a missing number reads the same whatever the column held.
fn widen_nullable_columns(df: &mut DataFrame) -> PolarsResult<()> {
    let widen: Vec<PlSmallStr> = df
        .get_columns()
        .iter()
        .filter(|c| {
            let gaps = c.null_count() > 0;
            let all_null = c.len() > 0 && c.null_count() == c.len();
            (c.dtype().is_integer() && gaps) || (c.dtype() == &DataType::String && all_null)
        })
        .map(|c| c.name().clone())
        .collect();

    for name in widen {
        let widened = df.column(&name)?.cast(&DataType::Float64)?;
        df.with_column(widened)?;
        debug!(column = %name, "widened to f64");
    }
    Ok(())
}

/// Load `path` fully into memory. A missing or malformed file is an error.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P, name: &str) -> Result<Table> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open input file: {:?}", path.as_ref()))?;
    let table = read_table(file, name)
        .with_context(|| format!("Failed to load {:?}", path.as_ref()))?;
    info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded {}",
        name
    );
    Ok(table)
}
