// src/dataset.rs

use anyhow::Result;

use crate::config::PipelineConfig;
use crate::load::load_table;
use crate::table::Table;

/// The three tables flowing through the pipeline.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub alunos: Table,
    pub indicadores: Table,
    pub roi: Table,
}

impl Dataset {
    /// Load all three inputs. Any unreadable or malformed file aborts.
    pub fn load(cfg: &PipelineConfig) -> Result<Self> {
        Ok(Self {
            alunos: load_table(cfg.input_path(&cfg.inputs.alunos), "alunos")?,
            indicadores: load_table(cfg.input_path(&cfg.inputs.indicadores), "indicadores")?,
            roi: load_table(cfg.input_path(&cfg.inputs.roi), "roi")?,
        })
    }

    pub fn tables(&self) -> [&Table; 3] {
        [&self.alunos, &self.indicadores, &self.roi]
    }

    pub fn tables_mut(&mut self) -> [&mut Table; 3] {
        [&mut self.alunos, &mut self.indicadores, &mut self.roi]
    }

    pub fn row_counts(&self) -> [usize; 3] {
        self.tables().map(Table::num_rows)
    }
}
