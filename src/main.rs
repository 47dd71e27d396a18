use alunos_etl::{
    config::{Args, PipelineConfig},
    pipeline,
};
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout carries the report, so logs go to stderr
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let args = Args::parse();
    let cfg = PipelineConfig::from_args(&args)?;
    info!(
        input = %cfg.input_dir.display(),
        output = %cfg.output_dir.display(),
        "configured"
    );

    // ─── 3) run ──────────────────────────────────────────────────────
    pipeline::run(&cfg)?;

    info!("all done");
    Ok(())
}
