// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render a Report as an aligned table, a `;`-delimited sheet, or JSON
// role: rendering/output
// inputs: Report, OutputFormat
// outputs: UTF-8 text ready to be written to a file or stdout
// invariants:
// - table and delimited share one row model (assignee row, issue row, one row per status)
// - durations render as "<days> day(s) HH:MM:SS" with sub-seconds truncated
// - table columns align on char count; the last column is never padded
// errors: JSON serialization errors bubble up
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use chrono::Duration;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::model::{Progress, Report};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
  Table,
  Csv,
  Json,
}

impl OutputFormat {
  pub fn extension(self) -> &'static str {
    match self {
      OutputFormat::Table => "txt",
      OutputFormat::Csv => "csv",
      OutputFormat::Json => "json",
    }
  }
}

const HEADER: [&str; 6] = ["Assignee", "Issue ID", "Issue Title", "Status", "Duration", "Other Labels"];
const COLUMN_PADDING: usize = 3;
const DELIMITER: char = ';';

pub fn format_duration(d: Duration) -> String {
  let total = d.num_seconds();
  let days = total / 86_400;
  let hours = (total % 86_400) / 3_600;
  let minutes = (total % 3_600) / 60;
  let seconds = total % 60;
  format!("{} day(s) {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

fn progress_cell(p: &Progress) -> String {
  let mut cell = format_duration(p.duration);
  if p.is_still_going {
    cell.push_str(", Still going");
  }
  cell
}

fn report_rows(report: &Report) -> Vec<[String; 6]> {
  let mut rows: Vec<[String; 6]> = vec![HEADER.map(String::from)];

  for user in &report.users {
    rows.push([user.assignee.clone(), String::new(), String::new(), String::new(), String::new(), String::new()]);

    for issue in &user.issues {
      rows.push([
        String::new(),
        issue.id.to_string(),
        issue.title.clone(),
        String::new(),
        String::new(),
        issue.other_labels.join(", "),
      ]);

      for p in &issue.progress {
        rows.push([String::new(), String::new(), String::new(), p.status.clone(), progress_cell(p), String::new()]);
      }
    }
  }

  rows
}

/// Column-aligned table; every cell but the last is padded and closed with `|`.
pub fn render_table(report: &Report) -> String {
  let rows = report_rows(report);
  let aligned = HEADER.len() - 1;

  let widths: Vec<usize> = (0..aligned)
    .map(|i| rows.iter().map(|r| r[i].chars().count()).max().unwrap_or(0))
    .collect();

  let mut out = String::new();

  for row in &rows {
    for (i, cell) in row.iter().enumerate() {
      out.push_str(cell);
      if i < aligned {
        let pad = widths[i] + COLUMN_PADDING - cell.chars().count();
        out.extend(std::iter::repeat(' ').take(pad));
        out.push('|');
      }
    }
    out.push('\n');
  }

  out
}

/// Same rows as the table, joined with `;`. Cells are not quoted.
pub fn render_delimited(report: &Report) -> String {
  let mut out = String::new();

  for row in report_rows(report) {
    out.push_str(&row.join(&DELIMITER.to_string()));
    out.push('\n');
  }

  out
}

pub fn render_json(report: &Report) -> Result<String> {
  let mut s = serde_json::to_string_pretty(report)?;
  s.push('\n');
  Ok(s)
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
  match format {
    OutputFormat::Table => Ok(render_table(report)),
    OutputFormat::Csv => Ok(render_delimited(report)),
    OutputFormat::Json => render_json(report),
  }
}
