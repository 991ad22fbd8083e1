use indexmap::IndexMap;
use tracing::{debug, info};

use super::gitlab_api::{FetchError, ResourceLabelEvent, TrackerApi};
use crate::model::{EventKind, Issue, LabelEvent, StatusHistory};

/// Walk every page of one issue query.
fn fetch_all_pages(api: &dyn TrackerApi, issue_type: &str, labels: &str) -> Result<Vec<Issue>, FetchError> {
  let first = api.list_issues_page(issue_type, labels, 1)?;
  let mut issues = first.issues;

  for page in 2..=first.total_pages {
    debug!(issue_type, labels, page, total = first.total_pages, "fetching issue page");
    issues.extend(api.list_issues_page(issue_type, labels, page)?.issues);
  }

  Ok(issues)
}

/// Group raw label events into one history per label, labels in first-seen order.
pub fn group_label_events(events: Vec<ResourceLabelEvent>) -> Vec<StatusHistory> {
  let mut by_label: IndexMap<String, Vec<LabelEvent>> = IndexMap::new();

  for e in events {
    let Some(label) = e.label else { continue };
    by_label.entry(label.name).or_default().push(LabelEvent {
      timestamp: e.created_at,
      kind: EventKind::from_action(&e.action),
    });
  }

  by_label
    .into_iter()
    .map(|(label, events)| StatusHistory { label, events })
    .collect()
}

/// Issues of the sprint carrying any tracked label, with their label histories.
///
/// One query per (tracked label, issue type) with labels `"<label>,<sprint>"`;
/// an issue returned by several queries is kept once, at its first position,
/// so its label events are requested once.
pub fn fetch_sprint_issues(
  api: &dyn TrackerApi,
  track_labels: &[String],
  track_issue_types: &[String],
  sprint_label: &str,
) -> Result<Vec<Issue>, FetchError> {
  let mut issues: IndexMap<u64, Issue> = IndexMap::new();

  for label in track_labels {
    let labels = format!("{},{}", label, sprint_label);
    for issue_type in track_issue_types {
      let found = fetch_all_pages(api, issue_type, &labels)?;
      info!(issue_type = issue_type.as_str(), labels = labels.as_str(), count = found.len(), "fetched issues");
      for issue in found {
        issues.entry(issue.id).or_insert(issue);
      }
    }
  }

  let mut out = Vec::with_capacity(issues.len());
  for (iid, mut issue) in issues {
    issue.status_changes = group_label_events(api.list_label_events(iid)?);
    out.push(issue);
  }

  Ok(out)
}
