use indexmap::IndexMap;

use crate::model::{Instant, Issue, IssueProgress, Report, UserProgress, UNKNOWN_ASSIGNEE};
use crate::progress::{build_issue_progress, ProgressConfig};

fn display_assignee(issue: &Issue) -> &str {
  let name = issue.assignee_name();
  if name.trim().is_empty() {
    UNKNOWN_ASSIGNEE
  } else {
    name
  }
}

/// Group issue progress by assignee, assignees and issues in arrival order.
pub fn aggregate(issues: &[Issue], config: &ProgressConfig, now: Instant) -> Report {
  let mut by_assignee: IndexMap<String, Vec<IssueProgress>> = IndexMap::new();

  for issue in issues {
    let progress = build_issue_progress(issue, config, now);
    by_assignee
      .entry(display_assignee(issue).to_string())
      .or_default()
      .push(progress);
  }

  Report {
    users: by_assignee
      .into_iter()
      .map(|(assignee, issues)| UserProgress { assignee, issues })
      .collect(),
  }
}
