// src/config.rs

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Cleans, joins and summarises student, indicator and ROI CSV exports"
)]
pub struct Args {
    /// Optional YAML file overriding the defaults below
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding the three input CSVs
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
    /// Directory receiving the cleaned CSVs
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// File names of the three tables, in and out.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileNames {
    pub alunos: String,
    pub indicadores: String,
    pub roi: String,
}

/// Alternate spellings of the identifier column, per table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct IdAliases {
    pub alunos: Vec<String>,
    pub indicadores: Vec<String>,
    pub roi: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub inputs: FileNames,
    pub outputs: FileNames,
    pub id_aliases: IdAliases,
    /// Written into missing `interativo` cells.
    pub missing_interactive: String,
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            alunos: "alunos.csv".into(),
            indicadores: "indicadores.csv".into(),
            roi: "roi.json.csv".into(),
        }
    }
}

impl FileNames {
    fn outputs() -> Self {
        Self {
            alunos: "alunos_limpo.csv".into(),
            indicadores: "indicadores_limpo.csv".into(),
            roi: "roi_limpo.csv".into(),
        }
    }

    pub fn all(&self) -> [&str; 3] {
        [
            self.alunos.as_str(),
            self.indicadores.as_str(),
            self.roi.as_str(),
        ]
    }
}

impl Default for IdAliases {
    fn default() -> Self {
        Self {
            alunos: vec!["identificadorUnico".into(), "idAluno".into()],
            indicadores: vec!["idAluno".into()],
            roi: vec!["idAluno".into()],
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            inputs: FileNames::default(),
            outputs: FileNames::outputs(),
            id_aliases: IdAliases::default(),
            missing_interactive: "Não informado".into(),
        }
    }
}

impl PipelineConfig {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        let cfg: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {:?}", path))?;
        Ok(cfg)
    }

    /// Defaults, then the YAML file if given, then explicit CLI flags.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        if let Some(dir) = &args.input_dir {
            cfg.input_dir = dir.clone();
        }
        if let Some(dir) = &args.output_dir {
            cfg.output_dir = dir.clone();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for out in self.outputs.all() {
            if out.trim().is_empty() {
                bail!("output file names must not be empty");
            }
            if self.input_dir == self.output_dir && self.inputs.all().contains(&out) {
                bail!("output `{}` would overwrite an input file", out);
            }
        }
        Ok(())
    }

    pub fn input_path(&self, file: &str) -> PathBuf {
        self.input_dir.join(file)
    }

    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_fixed_file_layout() -> Result<()> {
        let cfg = PipelineConfig::from_args(&Args::default())?;
        assert_eq!(cfg.input_path(&cfg.inputs.roi), PathBuf::from("./roi.json.csv"));
        assert_eq!(
            cfg.output_path(&cfg.outputs.alunos),
            PathBuf::from("./alunos_limpo.csv")
        );
        assert_eq!(cfg.missing_interactive, "Não informado");
        Ok(())
    }

    #[test]
    fn yaml_overrides_and_cli_wins() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "input_dir: /data/in")?;
        writeln!(tmp, "output_dir: /data/out")?;
        writeln!(tmp, "missing_interactive: n/d")?;
        let args = Args {
            config: Some(tmp.path().to_path_buf()),
            input_dir: None,
            output_dir: Some(PathBuf::from("/tmp/out")),
        };
        let cfg = PipelineConfig::from_args(&args)?;
        assert_eq!(cfg.input_dir, PathBuf::from("/data/in"));
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.missing_interactive, "n/d");
        assert_eq!(cfg.inputs, FileNames::default());
        Ok(())
    }

    #[test]
    fn refuses_to_overwrite_inputs() {
        let mut cfg = PipelineConfig::default();
        cfg.outputs.roi = "roi.json.csv".into();
        assert!(cfg.validate().is_err());
    }
}
