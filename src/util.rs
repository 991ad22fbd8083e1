// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, the injected "now", output writing, and man page rendering
// role: utilities/helpers
// inputs: Various primitives; DateTime strings; paths; clap CommandFactory
// outputs: Absolute paths, resolved instants, files written, man page text
// side_effects: write_output creates parent directories and writes files
// invariants:
// - effective_now is the only place that reads the system clock
// - report_file_name never contains a path separator
// errors: IO errors bubble with the target path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::CommandFactory;

use crate::model::Instant;

pub fn absolute_path<P: AsRef<Path>>(p: P) -> PathBuf {
  let p = p.as_ref();
  if p.is_absolute() {
    return p.to_path_buf();
  }
  match std::env::current_dir() {
    Ok(cwd) => cwd.join(p),
    Err(_) => p.to_path_buf(),
  }
}

/// Returns the effective "now" given an optional override.
///
/// Centralizes our handling of test determinism without sprinkling
/// `Local::now()` throughout the code.
pub fn effective_now(override_now: Option<Instant>) -> Instant {
  override_now.unwrap_or_else(|| Local::now().fixed_offset())
}

/// Parse a `--now-override` value (RFC3339, e.g. 2024-03-01T12:00:00Z).
pub fn parse_now_override(s: Option<&str>) -> Result<Option<Instant>> {
  s.map(|raw| chrono::DateTime::parse_from_rfc3339(raw.trim()).with_context(|| format!("invalid --now-override '{}'", raw)))
    .transpose()
}

/// `<sprint>-report.<ext>`, with path separators in the sprint label flattened.
pub fn report_file_name(sprint_label: &str, extension: &str) -> String {
  let safe = sprint_label.replace(['/', '\\'], "__");
  format!("{}-report.{}", safe, extension)
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
  }
  std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
