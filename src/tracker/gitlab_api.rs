// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: GitLab REST v4 helpers behind a trait seam (issue pages, resource label events)
// role: tracker/gitlab-api
// inputs: GitLabConfig (url, token, project id); env GSR_TEST_* fixtures for offline runs
// outputs: IssuesPage and ResourceLabelEvent values decoded from JSON
// side_effects: Network calls to the configured GitLab instance
// invariants:
// - 401 => Unauthorized, 403 => Forbidden, any other status >= 400 => Http { status, body }
// - issue pages carry the total page count from X-Total-Pages; a missing header is an error
// errors: FetchError; nothing is retried
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::GitLabConfig;
use crate::model::{Instant, Issue};

pub const PER_PAGE: u64 = 50;

#[derive(Debug, Error)]
pub enum FetchError {
  #[error("Unauthorized error! Please check your Personal Token.")]
  Unauthorized,
  #[error("Forbidden error! Please check your Personal Token permissions. It needs to have read_api.")]
  Forbidden,
  #[error("Unknown error! Request code: {status}. Request body: {body}.")]
  Http { status: u16, body: String },
  #[error("request to GitLab failed: {0}")]
  Transport(String),
  #[error("GitLab response has no usable X-Total-Pages header")]
  MissingTotalPages,
  #[error("could not decode GitLab response: {0}")]
  Decode(String),
}

/// Map an HTTP error status to the error the user sees.
pub fn classify_status(status: u16, body: String) -> FetchError {
  match status {
    401 => FetchError::Unauthorized,
    403 => FetchError::Forbidden,
    _ => FetchError::Http { status, body },
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LabelRef {
  pub name: String,
}

/// One entry of `/issues/:iid/resource_label_events`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ResourceLabelEvent {
  pub created_at: Instant,
  // null when the label was deleted from the project
  #[serde(default)]
  pub label: Option<LabelRef>,
  pub action: String,
}

#[derive(Clone, Debug, Default)]
pub struct IssuesPage {
  pub issues: Vec<Issue>,
  pub total_pages: u64,
}

// --- Trait seam for the tracker ---
pub trait TrackerApi {
  fn list_issues_page(&self, issue_type: &str, labels: &str, page: u64) -> Result<IssuesPage, FetchError>;
  fn list_label_events(&self, iid: u64) -> Result<Vec<ResourceLabelEvent>, FetchError>;
}

struct GitLabHttpApi {
  agent: ureq::Agent,
  base_url: String,
  project_id: u64,
  token: String,
}

impl GitLabHttpApi {
  fn new(config: &GitLabConfig) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout(std::time::Duration::from_secs(30))
      .build();

    Self {
      agent,
      base_url: config.url.clone(),
      project_id: config.project_id,
      token: config.personal_token.clone(),
    }
  }

  fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<ureq::Response, FetchError> {
    let url = format!("{}/api/v4/{}", self.base_url, path);
    debug!(%url, ?query, "GET");

    let mut request = self
      .agent
      .get(&url)
      .set("Accept", "application/json")
      .set("User-Agent", "gitlab-sprint-report")
      .set("Authorization", &format!("Bearer {}", self.token));

    for (key, value) in query {
      request = request.query(key, value);
    }

    match request.call() {
      Ok(response) => Ok(response),
      Err(ureq::Error::Status(status, response)) => {
        let body = response.into_string().unwrap_or_default();
        Err(classify_status(status, body))
      }
      Err(ureq::Error::Transport(t)) => Err(FetchError::Transport(t.to_string())),
    }
  }
}

impl TrackerApi for GitLabHttpApi {
  fn list_issues_page(&self, issue_type: &str, labels: &str, page: u64) -> Result<IssuesPage, FetchError> {
    let path = format!("projects/{}/issues", self.project_id);
    let per_page = PER_PAGE.to_string();
    let page_s = page.to_string();
    let response = self.get(
      &path,
      &[("issue_type", issue_type), ("labels", labels), ("per_page", per_page.as_str()), ("page", page_s.as_str())],
    )?;

    let total_pages = response
      .header("X-Total-Pages")
      .and_then(|h| h.trim().parse::<u64>().ok())
      .ok_or(FetchError::MissingTotalPages)?;

    let issues: Vec<Issue> = response
      .into_json()
      .map_err(|e| FetchError::Decode(e.to_string()))?;

    Ok(IssuesPage { issues, total_pages })
  }

  fn list_label_events(&self, iid: u64) -> Result<Vec<ResourceLabelEvent>, FetchError> {
    let path = format!("projects/{}/issues/{}/resource_label_events", self.project_id, iid);
    self
      .get(&path, &[])?
      .into_json()
      .map_err(|e| FetchError::Decode(e.to_string()))
  }
}

// Offline fixtures: every issue query answers GSR_TEST_ISSUES_JSON (one page),
// label events come from GSR_TEST_LABEL_EVENTS_JSON keyed by iid.
struct EnvTrackerApi;

fn env_json(key: &str) -> Result<Option<serde_json::Value>, FetchError> {
  match std::env::var(key) {
    Ok(s) => serde_json::from_str(&s)
      .map(Some)
      .map_err(|e| FetchError::Decode(format!("{}: {}", key, e))),
    Err(_) => Ok(None),
  }
}

impl TrackerApi for EnvTrackerApi {
  fn list_issues_page(&self, _issue_type: &str, _labels: &str, page: u64) -> Result<IssuesPage, FetchError> {
    let Some(v) = env_json("GSR_TEST_ISSUES_JSON")? else {
      return Ok(IssuesPage { issues: Vec::new(), total_pages: 1 });
    };
    let issues: Vec<Issue> = if page == 1 {
      serde_json::from_value(v).map_err(|e| FetchError::Decode(e.to_string()))?
    } else {
      Vec::new()
    };

    Ok(IssuesPage { issues, total_pages: 1 })
  }

  fn list_label_events(&self, iid: u64) -> Result<Vec<ResourceLabelEvent>, FetchError> {
    let Some(v) = env_json("GSR_TEST_LABEL_EVENTS_JSON")? else {
      return Ok(Vec::new());
    };
    match v.get(iid.to_string()) {
      Some(events) => serde_json::from_value(events.clone()).map_err(|e| FetchError::Decode(e.to_string())),
      None => Ok(Vec::new()),
    }
  }
}

fn env_wants_mock() -> bool {
  std::env::var("GSR_TEST_ISSUES_JSON").is_ok() || std::env::var("GSR_TEST_LABEL_EVENTS_JSON").is_ok()
}

pub fn build_api(config: &GitLabConfig) -> Box<dyn TrackerApi> {
  if env_wants_mock() {
    debug!("using GSR_TEST_* fixtures instead of GitLab");
    Box::new(EnvTrackerApi)
  } else {
    Box::new(GitLabHttpApi::new(config))
  }
}
