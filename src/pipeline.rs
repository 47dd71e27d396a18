// src/pipeline.rs

use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::{info, instrument};

use crate::analysis::{self, Aggregates, Joined};
use crate::config::PipelineConfig;
use crate::dataset::Dataset;
use crate::report;
use crate::table::Table;
use crate::transform;
use crate::write::write_table_file;

/// What a run produced, for callers that want more than the printed report.
#[derive(Debug)]
pub struct RunOutcome {
    pub cleaned: Dataset,
    pub joined: Joined,
    pub aggregates: Aggregates,
    pub written: Vec<PathBuf>,
}

/// Load → report → normalize → coerce → clean → scale → report → join →
/// aggregate → write. Any I/O or parse failure aborts the run.
#[instrument(level = "info", skip_all, fields(input = %cfg.input_dir.display(), output = %cfg.output_dir.display()))]
pub fn run(cfg: &PipelineConfig) -> Result<RunOutcome> {
    let mut out = io::stdout().lock();

    let ds = Dataset::load(cfg)?;
    print_structure(&mut out, &ds, cfg)?;

    let ds = transform::normalize_schema(ds, &cfg.id_aliases);
    let ds = transform::coerce_types(ds)?;
    let ds = transform::clean(ds, &cfg.missing_interactive)?;
    let ds = transform::scale(ds)?;
    print_quality(&mut out, &ds, cfg)?;

    let joined = analysis::join_tables(&ds)?;
    let aggregates = analysis::aggregate(&joined)?;
    print_aggregates(&mut out, &aggregates)?;

    let written = write_outputs(&ds, cfg)?;
    print_saved(&mut out, cfg)?;
    info!(files = written.len(), "pipeline finished");

    Ok(RunOutcome {
        cleaned: ds,
        joined,
        aggregates,
        written,
    })
}

/// Write the three cleaned tables (never the joins).
pub fn write_outputs(ds: &Dataset, cfg: &PipelineConfig) -> Result<Vec<PathBuf>> {
    let targets = [
        (&ds.alunos, &cfg.outputs.alunos),
        (&ds.indicadores, &cfg.outputs.indicadores),
        (&ds.roi, &cfg.outputs.roi),
    ];
    let mut written = Vec::with_capacity(targets.len());
    for (table, file) in targets {
        let path = cfg.output_path(file);
        write_table_file(table, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Each table paired with the input file name it was read from.
fn labeled<'a>(ds: &'a Dataset, cfg: &'a PipelineConfig) -> [(&'a str, &'a Table); 3] {
    let [alunos, indicadores, roi] = cfg.inputs.all();
    [
        (alunos, &ds.alunos),
        (indicadores, &ds.indicadores),
        (roi, &ds.roi),
    ]
}

fn print_structure<W: Write>(out: &mut W, ds: &Dataset, cfg: &PipelineConfig) -> Result<()> {
    writeln!(out, "\n📊 Estrutura dos dados:")?;
    for (label, t) in labeled(ds, cfg) {
        writeln!(out, "\n🔎 {}:", label)?;
        write!(out, "{}", report::summarize(t, label))?;
    }

    writeln!(out, "\n🕳️ Verificação de dados faltantes:")?;
    for (label, t) in labeled(ds, cfg) {
        writeln!(out, "\n📂 {}:", label)?;
        write!(out, "{}", report::null_counts(t))?;
    }
    Ok(())
}

fn print_quality<W: Write>(out: &mut W, ds: &Dataset, cfg: &PipelineConfig) -> Result<()> {
    let [(alunos_label, alunos), rest @ ..] = labeled(ds, cfg);
    writeln!(out, "\n📋 Qualidade dos dados:")?;
    let duplicates = report::duplicate_count(alunos)
        .with_context(|| format!("counting duplicates in `{}`", alunos_label))?;
    writeln!(out, "Duplicatas em {}: {}", alunos_label, duplicates)?;
    for (label, t) in rest {
        let unique = report::unique_counts(t)
            .with_context(|| format!("counting unique values in `{}`", label))?;
        writeln!(out, "\nValores únicos em {}:", label)?;
        write!(out, "{}", unique)?;
    }
    Ok(())
}

fn print_aggregates<W: Write>(out: &mut W, agg: &Aggregates) -> Result<()> {
    if let Some(g) = &agg.messages_by_status {
        writeln!(out, "\n📨 Mensagens enviadas por status de aluno:")?;
        write!(out, "{}", g)?;
    }
    if let Some(g) = &agg.messages_by_status_interactive {
        writeln!(out, "\n🤖 Mensagens enviadas por status e interatividade:")?;
        write!(out, "{}", g)?;
    }
    Ok(())
}

fn print_saved<W: Write>(out: &mut W, cfg: &PipelineConfig) -> Result<()> {
    writeln!(
        out,
        "\n✅ Análise e tratamento finalizados com sucesso! Arquivos salvos:"
    )?;
    for file in cfg.outputs.all() {
        writeln!(out, "- {}", file)?;
    }
    Ok(())
}
