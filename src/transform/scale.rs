use polars::prelude::*;
use tracing::{debug, warn};

use crate::table::Table;

/// Append `target` holding `source` rescaled so its minimum maps to 0 and its
/// maximum to 1. A constant column maps every value to 0. Nulls stay null.
/// Returns false (and leaves the table untouched) when `source` is absent or
/// not numeric.
pub fn min_max_scale(table: &mut Table, source: &str, target: &str) -> PolarsResult<bool> {
    let Some(values) = table.column(source) else {
        debug!(table = %table.name, column = source, "nothing to scale");
        return Ok(false);
    };
    if !values.dtype().is_primitive_numeric() {
        warn!(table = %table.name, column = source, dtype = %values.dtype(), "cannot scale non-numeric column");
        return Ok(false);
    }

    let values = values.cast(&DataType::Float64)?;
    let series = values.as_materialized_series();
    let x = col(source).cast(DataType::Float64);
    let scaled = match (series.min::<f64>()?, series.max::<f64>()?) {
        (Some(lo), Some(hi)) if hi > lo => (x - lit(lo)) / lit(hi - lo),
        (Some(_), Some(_)) => x * lit(0.0),
        // all null
        _ => x,
    };
    table.apply(|lf| lf.with_column(scaled.alias(target)))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(t: &Table) -> Vec<Option<f64>> {
        t.df.column("nota_normalizada")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn scales_into_unit_interval() -> PolarsResult<()> {
        let mut t = Table::new("alunos", df!("nota" => &[2.0, 4.0, 3.0])?);
        assert!(min_max_scale(&mut t, "nota", "nota_normalizada")?);
        assert_eq!(normalized(&t), vec![Some(0.0), Some(1.0), Some(0.5)]);
        assert_eq!(t.column_names(), vec!["nota", "nota_normalizada"]);
        Ok(())
    }

    #[test]
    fn constant_column_maps_to_zero() -> PolarsResult<()> {
        let mut t = Table::new("alunos", df!("nota" => &[Some(7.0), Some(7.0), None])?);
        assert!(min_max_scale(&mut t, "nota", "nota_normalizada")?);
        assert_eq!(normalized(&t), vec![Some(0.0), Some(0.0), None]);
        Ok(())
    }

    #[test]
    fn int_scores_are_scaled_too() -> PolarsResult<()> {
        let mut t = Table::new("alunos", df!("nota" => &[0i64, 10, 5])?);
        assert!(min_max_scale(&mut t, "nota", "nota_normalizada")?);
        assert_eq!(normalized(&t), vec![Some(0.0), Some(1.0), Some(0.5)]);
        assert_eq!(t.dtype("nota"), Some(&DataType::Int64));
        Ok(())
    }

    #[test]
    fn absent_or_text_column_is_skipped() -> PolarsResult<()> {
        let mut t = Table::new("alunos", df!("nota" => &["A"])?);
        assert!(!min_max_scale(&mut t, "nota", "nota_normalizada")?);
        assert!(!min_max_scale(&mut t, "ausente", "x")?);
        assert_eq!(t.num_columns(), 1);
        Ok(())
    }
}
