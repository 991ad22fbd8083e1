use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod config;
mod model;
mod progress;
mod render;
mod report;
mod sprint_processor;
mod tracker;
mod util;
mod working_time;

use crate::cli::{normalize, Cli};

fn init_tracing() {
  let filter = EnvFilter::try_from_env("GSR_LOG").unwrap_or_else(|_| EnvFilter::new("gitlab_sprint_report=info,warn"));

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer().compact().with_writer(std::io::stderr))
    .try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: resolve now once for the whole run
  let now = util::effective_now(util::parse_now_override(cfg.now_override.as_deref())?);

  // Phase 3: fetch, reduce, render
  sprint_processor::process_sprint(&cfg, now)
}
