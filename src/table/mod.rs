// src/table/mod.rs

pub mod format;

use polars::prelude::*;

/// A named `DataFrame`. The name labels the table in diagnostics
/// (e.g. "alunos").
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub df: DataFrame,
}

impl Table {
    pub fn new(name: impl Into<String>, df: DataFrame) -> Self {
        Self {
            name: name.into(),
            df,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.df.height()
    }

    pub fn num_columns(&self) -> usize {
        self.df.width()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|n| n.as_str())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.df.column(name).ok()
    }

    pub fn dtype(&self, name: &str) -> Option<&DataType> {
        self.column(name).map(Column::dtype)
    }

    /// Run `plan` over a lazy view of the frame and keep the result.
    pub fn apply<F>(&mut self, plan: F) -> PolarsResult<()>
    where
        F: FnOnce(LazyFrame) -> LazyFrame,
    {
        self.df = plan(self.df.clone().lazy()).collect()?;
        Ok(())
    }
}
