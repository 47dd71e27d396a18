use polars::prelude::*;
use tracing::{debug, info};

use crate::table::Table;

fn nulls_in(table: &Table, name: &str) -> usize {
    table.column(name).map_or(0, Column::null_count)
}

/// Fill nulls in a numeric column with its mean. Returns the number of
/// cells filled; `None` if the column is absent, not numeric, or all null.
pub fn fill_with_mean(table: &mut Table, name: &str) -> PolarsResult<Option<usize>> {
    let Some(values) = table.column(name) else {
        return Ok(None);
    };
    if !values.dtype().is_primitive_numeric() {
        return Ok(None);
    }
    let Some(avg) = values.cast(&DataType::Float64)?.as_materialized_series().mean() else {
        return Ok(None);
    };
    let filled = values.null_count();
    if filled == 0 {
        return Ok(Some(0));
    }

    table.apply(|lf| lf.with_column(col(name).cast(DataType::Float64).fill_null(lit(avg))))?;
    debug!(column = name, mean = avg, filled, "filled with mean");
    Ok(Some(filled))
}

/// Most frequent non-null value, first of the tied values in sort order.
fn mode_expr(name: &str) -> Expr {
    col(name)
        .drop_nulls()
        .mode()
        .sort(SortOptions::default())
        .first()
}

/// Fill nulls with the column mode; ties resolve to the smallest value.
/// Returns the number of cells filled; `None` if the column is absent.
pub fn fill_with_mode(table: &mut Table, name: &str) -> PolarsResult<Option<usize>> {
    if !table.has_column(name) {
        return Ok(None);
    }
    let before = nulls_in(table, name);
    if before == 0 {
        return Ok(Some(0));
    }

    table.apply(|lf| lf.with_column(col(name).fill_null(mode_expr(name))))?;
    let filled = before - nulls_in(table, name);
    debug!(column = name, filled, "filled with mode");
    Ok(Some(filled))
}

/// Fill nulls with a fixed string. A non-text column is cast to text first.
/// Returns the number of cells filled; `None` if the column is absent.
pub fn fill_with_text(
    table: &mut Table,
    name: &str,
    placeholder: &str,
) -> PolarsResult<Option<usize>> {
    if !table.has_column(name) {
        return Ok(None);
    }
    let filled = nulls_in(table, name);
    if filled == 0 {
        return Ok(Some(0));
    }

    table.apply(|lf| {
        lf.with_column(
            col(name)
                .cast(DataType::String)
                .fill_null(lit(placeholder)),
        )
    })?;
    debug!(column = name, filled, placeholder, "filled with placeholder");
    Ok(Some(filled))
}

/// Remove exact full-row duplicates, keeping first occurrences in order.
/// Returns how many rows were removed.
pub fn drop_duplicates(table: &mut Table) -> PolarsResult<usize> {
    let before = table.num_rows();
    table.apply(|lf| lf.unique_stable(None, UniqueKeepStrategy::First))?;
    let removed = before - table.num_rows();
    if removed > 0 {
        info!(table = %table.name, removed, "dropped duplicate rows");
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floats(t: &Table, name: &str) -> Vec<Option<f64>> {
        t.df.column(name).unwrap().f64().unwrap().into_iter().collect()
    }

    fn texts(t: &Table, name: &str) -> Vec<Option<String>> {
        t.df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn mean_fill_uses_present_values() -> PolarsResult<()> {
        let mut t = Table::new("t", df!("nota" => &[Some(2.0), None, Some(4.0)])?);
        assert_eq!(fill_with_mean(&mut t, "nota")?, Some(1));
        assert_eq!(floats(&t, "nota"), vec![Some(2.0), Some(3.0), Some(4.0)]);
        Ok(())
    }

    #[test]
    fn mean_fill_on_all_null_leaves_nulls() -> PolarsResult<()> {
        let mut t = Table::new("t", df!("nota" => &[None::<f64>, None])?);
        assert_eq!(fill_with_mean(&mut t, "nota")?, None);
        assert_eq!(t.df.column("nota")?.null_count(), 2);
        Ok(())
    }

    #[test]
    fn mean_fill_skips_text_and_absent() -> PolarsResult<()> {
        let mut t = Table::new("t", df!("nota" => &[Some("A"), None])?);
        assert_eq!(fill_with_mean(&mut t, "nota")?, None);
        assert_eq!(fill_with_mean(&mut t, "ausente")?, None);
        Ok(())
    }

    #[test]
    fn mode_fill_picks_most_frequent() -> PolarsResult<()> {
        let mut t = Table::new(
            "t",
            df!("status" => &[Some("evadido"), Some("ativo"), None, Some("evadido")])?,
        );
        assert_eq!(fill_with_mode(&mut t, "status")?, Some(1));
        assert_eq!(texts(&t, "status")[2].as_deref(), Some("evadido"));
        Ok(())
    }

    #[test]
    fn mode_ties_resolve_to_smallest_value() -> PolarsResult<()> {
        let mut t = Table::new(
            "t",
            df!("status" => &[Some("trancado"), Some("ativo"), None, Some("trancado"), Some("ativo")])?,
        );
        assert_eq!(fill_with_mode(&mut t, "status")?, Some(1));
        assert_eq!(texts(&t, "status")[2].as_deref(), Some("ativo"));
        Ok(())
    }

    #[test]
    fn numeric_mode_ties_compare_by_value() -> PolarsResult<()> {
        let mut t = Table::new(
            "t",
            df!("x" => &[Some(1.0), Some(-2.0), None, Some(1.0), Some(-2.0)])?,
        );
        assert_eq!(fill_with_mode(&mut t, "x")?, Some(1));
        assert_eq!(floats(&t, "x")[2], Some(-2.0));
        Ok(())
    }

    #[test]
    fn mode_fill_on_all_null_fills_nothing() -> PolarsResult<()> {
        let mut t = Table::new("t", df!("status" => &[None::<&str>, None])?);
        assert_eq!(fill_with_mode(&mut t, "status")?, Some(0));
        assert_eq!(fill_with_mode(&mut t, "ausente")?, None);
        Ok(())
    }

    #[test]
    fn placeholder_fill_counts_cells() -> PolarsResult<()> {
        let mut t = Table::new("t", df!("interativo" => &[None, Some("sim"), None])?);
        assert_eq!(fill_with_text(&mut t, "interativo", "Não informado")?, Some(2));
        assert_eq!(t.df.column("interativo")?.null_count(), 0);
        Ok(())
    }

    #[test]
    fn placeholder_fill_casts_numeric_flags() -> PolarsResult<()> {
        let mut t = Table::new("t", df!("interativo" => &[Some(1.0), None])?);
        assert_eq!(fill_with_text(&mut t, "interativo", "Não informado")?, Some(1));
        assert_eq!(
            texts(&t, "interativo"),
            vec![Some("1.0".to_string()), Some("Não informado".to_string())]
        );
        Ok(())
    }

    #[test]
    fn duplicates_removed_in_order() -> PolarsResult<()> {
        let mut t = Table::new(
            "t",
            df!(
                "a" => &[1i64, 2, 1, 1],
                "b" => &["x", "y", "x", "z"]
            )?,
        );
        assert_eq!(drop_duplicates(&mut t)?, 1);
        let a: Vec<Option<i64>> = t.df.column("a")?.i64()?.into_iter().collect();
        assert_eq!(a, vec![Some(1), Some(2), Some(1)]);
        assert_eq!(
            texts(&t, "b"),
            vec![Some("x".to_string()), Some("y".to_string()), Some("z".to_string())]
        );
        Ok(())
    }

    #[test]
    fn signed_zeros_are_one_value() -> PolarsResult<()> {
        let mut t = Table::new(
            "t",
            df!(
                "a" => &[0.0f64, -0.0],
                "b" => &["x", "x"]
            )?,
        );
        assert_eq!(drop_duplicates(&mut t)?, 1);
        assert_eq!(t.num_rows(), 1);
        Ok(())
    }
}
