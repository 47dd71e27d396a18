// src/analysis/mod.rs

pub mod aggregate;
pub mod join;

use anyhow::{Context, Result};
use tracing::{info, instrument};

pub use aggregate::{grouped_sum, GroupedSum};
pub use join::inner_join;

use crate::columns::{ID, INTERACTIVE, MESSAGES_SENT, STATUS};
use crate::dataset::Dataset;
use crate::table::Table;

/// Join results. `None` marks a join that could not run.
#[derive(Debug, Clone)]
pub struct Joined {
    pub indicadores_alunos: Option<Table>,
    pub roi_indicadores: Option<Table>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates {
    pub messages_by_status: Option<GroupedSum>,
    pub messages_by_status_interactive: Option<GroupedSum>,
}

#[instrument(level = "info", skip_all)]
pub fn join_tables(ds: &Dataset) -> Result<Joined> {
    let indicadores_alunos =
        inner_join(&ds.indicadores, &ds.alunos, ID).context("joining indicadores with alunos")?;
    if indicadores_alunos.is_none() {
        println!("⚠️ Merge entre indicadores e alunos não pôde ser feito (faltando '{}').", ID);
    }
    let roi_indicadores =
        inner_join(&ds.roi, &ds.indicadores, ID).context("joining roi with indicadores")?;
    if roi_indicadores.is_none() {
        println!("⚠️ Merge entre ROI e indicadores não pôde ser feito (faltando '{}').", ID);
    }

    for t in [&indicadores_alunos, &roi_indicadores].into_iter().flatten() {
        info!(table = %t.name, rows = t.num_rows(), "joined");
    }
    Ok(Joined {
        indicadores_alunos,
        roi_indicadores,
    })
}

/// Grouped message totals over whichever joins exist.
#[instrument(level = "info", skip_all)]
pub fn aggregate(joined: &Joined) -> Result<Aggregates> {
    let messages_by_status = match &joined.indicadores_alunos {
        Some(t) => grouped_sum(t, &[STATUS], MESSAGES_SENT)
            .with_context(|| format!("summing `{}` in `{}`", MESSAGES_SENT, t.name))?,
        None => None,
    };
    let messages_by_status_interactive = match &joined.roi_indicadores {
        Some(t) => grouped_sum(t, &[STATUS, INTERACTIVE], MESSAGES_SENT)
            .with_context(|| format!("summing `{}` in `{}`", MESSAGES_SENT, t.name))?,
        None => None,
    };
    Ok(Aggregates {
        messages_by_status,
        messages_by_status_interactive,
    })
}
