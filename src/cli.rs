use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::render::OutputFormat;
use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "gitlab-sprint-report",
    version,
    about = "Report how long each GitLab issue of a sprint spent in every tracked status",
    long_about = None
)]
pub struct Cli {
  /// Sprint label, e.g. "Sprint-5" (issues must carry it)
  #[arg(long)]
  pub sprint: Option<String>,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
  pub format: OutputFormat,

  /// Output file path, or "-" for stdout (default: <sprint>-report.<ext> in the current dir)
  #[arg(long)]
  pub out: Option<String>,

  /// Config file (default: ~/.gitlab-sprint-report/gitlab-sprint-config.yml)
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for open intervals (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
  Stdout,
  File(PathBuf),
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub sprint: String,
  pub format: OutputFormat,
  pub out: OutputTarget,
  pub config_path: Option<PathBuf>,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let sprint = match cli.sprint.as_deref().map(str::trim) {
    Some(s) if !s.is_empty() => s.to_string(),
    _ => bail!("Provide the sprint label with --sprint"),
  };

  let out = match cli.out.as_deref() {
    Some("-") => OutputTarget::Stdout,
    Some(p) => OutputTarget::File(util::absolute_path(p)),
    None => OutputTarget::File(util::absolute_path(util::report_file_name(&sprint, cli.format.extension()))),
  };

  Ok(EffectiveConfig {
    sprint,
    format: cli.format,
    out,
    config_path: cli.config.as_deref().map(util::absolute_path),
    now_override: cli.now_override,
  })
}
