// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the issue/label-event input model and the derived progress report shared by fetch, core and rendering
// role: model/types
// outputs: Plain value types; report types serialize with stable field names
// invariants: Events keep the UTC offset they were fetched with; durations serialize as whole seconds
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize, Serializer};

/// Point in time carrying its own offset; weekdays are evaluated in that offset.
pub type Instant = DateTime<FixedOffset>;

/// Display name used for issues without an assignee.
pub const UNKNOWN_ASSIGNEE: &str = "Unknown";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  Add,
  Remove,
}

impl EventKind {
  /// GitLab reports `add` or `remove`; anything that is not an add closes the label.
  pub fn from_action(action: &str) -> Self {
    if action == "add" {
      EventKind::Add
    } else {
      EventKind::Remove
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEvent {
  pub timestamp: Instant,
  pub kind: EventKind,
}

/// All add/remove events of one label on one issue, in the order they were received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistory {
  pub label: String,
  pub events: Vec<LabelEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
  #[serde(default)]
  pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  #[serde(rename = "iid")]
  pub id: u64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub assignee: Option<Assignee>,
  #[serde(default, skip_deserializing)]
  pub status_changes: Vec<StatusHistory>,
}

impl Issue {
  pub fn assignee_name(&self) -> &str {
    self.assignee.as_ref().map(|a| a.name.as_str()).unwrap_or("")
  }
}

fn serialize_seconds<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_i64(d.num_seconds())
}

/// Working time one issue spent in one tracked status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Progress {
  pub status: String,
  #[serde(rename = "duration_seconds", serialize_with = "serialize_seconds")]
  pub duration: Duration,
  pub is_still_going: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IssueProgress {
  pub id: u64,
  pub title: String,
  pub progress: Vec<Progress>,
  pub other_labels: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserProgress {
  pub assignee: String,
  pub issues: Vec<IssueProgress>,
}

/// Per-assignee progress, assignees in the order they were first seen.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
  pub users: Vec<UserProgress>,
}
