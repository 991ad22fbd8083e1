// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one run: load config, fetch sprint issues, build the report, render and write it
// role: processing/orchestrator
// inputs: EffectiveConfig, resolved now
// outputs: Rendered report on stdout or in a file; "File generated at: <path>" pointer on stdout for file targets
// side_effects: Reads/creates the config file; network calls through the tracker; writes the report file
// invariants:
// - now is resolved once by the caller and flows unchanged into every duration
// - stdout target prints the rendered report only (no pointer line)
// errors: Config, fetch and write errors propagate with context; nothing is retried
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{EffectiveConfig, OutputTarget};
use crate::config::{self, AppConfig};
use crate::model::{Instant, Report};
use crate::render::render;
use crate::report::aggregate;
use crate::tracker::{build_api, fetch_sprint_issues, TrackerApi};
use crate::util;

/// Fetch the sprint's issues and reduce them into a report.
pub fn generate_report(api: &dyn TrackerApi, app: &AppConfig, sprint_label: &str, now: Instant) -> Result<Report> {
  let issues = fetch_sprint_issues(api, &app.gitlab.track_labels, &app.gitlab.track_issue_types, sprint_label)
    .with_context(|| format!("fetching issues for sprint '{}'", sprint_label))?;
  info!(sprint = sprint_label, issues = issues.len(), "building report");

  Ok(aggregate(&issues, &app.progress_config(sprint_label), now))
}

/// Render `report` and send it to `target`; returns the pointer line for file targets.
pub fn save_report(cfg: &EffectiveConfig, report: &Report) -> Result<Option<String>> {
  let text = render(report, cfg.format)?;
  match &cfg.out {
    OutputTarget::Stdout => {
      print!("{}", text);
      Ok(None)
    }
    OutputTarget::File(path) => {
      util::write_output(path, &text)?;
      Ok(Some(format!("File generated at: {}", path.display())))
    }
  }
}

pub fn process_sprint(cfg: &EffectiveConfig, now: Instant) -> Result<()> {
  let config_path = match &cfg.config_path {
    Some(p) => p.clone(),
    None => config::default_config_path()?,
  };
  let app = config::load_config(&config_path)?;
  info!(url = app.gitlab.url.as_str(), project = app.gitlab.project_id, "loaded config");

  let api = build_api(&app.gitlab);
  let report = generate_report(api.as_ref(), &app, &cfg.sprint, now)?;

  if let Some(pointer) = save_report(cfg, &report)? {
    println!("{}", pointer);
  }

  Ok(())
}
