// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Reduce per-label event histories into working-time durations and build one issue's progress
// role: core/progress
// inputs: Issue with StatusHistory entries, ProgressConfig, injected `now`
// outputs: Progress per tracked status (in configured order) plus sorted "other" labels
// invariants:
// - events are sorted by timestamp before pairing; input order never changes the result
// - pairing is positional (2k, 2k+1); an odd trailing event is open until `now`
// - untracked labels never appear in progress; other labels are sorted and unique
// errors: None; every input produces a result
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeSet;

use chrono::Duration;

use crate::model::{Instant, Issue, IssueProgress, LabelEvent, Progress};
use crate::working_time::working_duration;

/// Which labels are measured, in which order, and which are never surfaced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressConfig {
  pub progress_labels: Vec<String>,
  pub done_label: String,
  pub excluded_labels: BTreeSet<String>,
}

impl ProgressConfig {
  pub fn new<P, E>(progress_labels: P, done_label: impl Into<String>, excluded_labels: E) -> Self
  where
    P: IntoIterator,
    P::Item: Into<String>,
    E: IntoIterator,
    E::Item: Into<String>,
  {
    Self {
      progress_labels: progress_labels.into_iter().map(Into::into).collect(),
      done_label: done_label.into(),
      excluded_labels: excluded_labels.into_iter().map(Into::into).collect(),
    }
  }

  fn position(&self, label: &str) -> Option<usize> {
    self.progress_labels.iter().position(|l| l == label)
  }

  fn is_tracked(&self, label: &str) -> bool {
    self.position(label).is_some()
  }

  fn is_other(&self, label: &str) -> bool {
    !self.is_tracked(label) && label != self.done_label && !self.excluded_labels.contains(label)
  }
}

/// Total working time a label was applied, from its add/remove history.
///
/// Events are paired by position after sorting, not by kind.
pub fn reduce_status(label: &str, events: &[LabelEvent], now: Instant) -> Progress {
  let mut sorted = events.to_vec();
  sorted.sort_by_key(|e| e.timestamp);

  let mut total = Duration::zero();
  let is_still_going = sorted.len() % 2 != 0;

  if is_still_going {
    if let Some(last) = sorted.last() {
      total = total + working_duration(last.timestamp, now);
    }
  }

  for pair in sorted.chunks_exact(2) {
    total = total + working_duration(pair[0].timestamp, pair[1].timestamp);
  }

  Progress { status: label.to_string(), duration: total, is_still_going }
}

pub fn build_issue_progress(issue: &Issue, config: &ProgressConfig, now: Instant) -> IssueProgress {
  let mut progress: Vec<Progress> = Vec::new();
  let mut other_labels: BTreeSet<String> = BTreeSet::new();

  for status in &issue.status_changes {
    if config.is_tracked(&status.label) {
      progress.push(reduce_status(&status.label, &status.events, now));
    } else if config.is_other(&status.label) && status.events.len() % 2 != 0 {
      other_labels.insert(status.label.clone());
    }
  }

  progress.sort_by_key(|p| config.position(&p.status).unwrap_or(usize::MAX));

  IssueProgress {
    id: issue.id,
    title: issue.title.clone(),
    progress,
    other_labels: other_labels.into_iter().collect(),
  }
}
