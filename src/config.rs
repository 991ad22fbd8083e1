// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load, create and validate the YAML configuration (GitLab connection + report labels)
// role: configuration
// inputs: config file path (default ~/.gitlab-sprint-report/gitlab-sprint-config.yml); env GITLAB_TOKEN
// outputs: AppConfig; ProgressConfig for the report core
// side_effects: Creates the config directory and a default file when none exists
// invariants:
// - YAML keys stay compatible with existing files (Version, gitLab.URL, gitLab.PersonalToken, ...)
// - a loaded AppConfig has passed validate()
// - the sprint label is always excluded from "other labels"
// errors: ConfigError for missing/invalid files; IO and YAML errors bubble with path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::progress::ProgressConfig;

pub const CONFIG_VERSION: &str = "v1";
const CONFIG_DIR: &str = ".gitlab-sprint-report";
const CONFIG_FILE: &str = "gitlab-sprint-config.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error(
    "config file does not exist. Created a new config file at '{}'. Update that file with the correct configuration",
    .0.display()
  )]
  Created(PathBuf),
  #[error("{0}")]
  Invalid(String),
  #[error("could not determine the home directory")]
  NoHome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitLabConfig {
  #[serde(rename = "URL")]
  pub url: String,
  #[serde(rename = "PersonalToken")]
  pub personal_token: String,
  #[serde(rename = "ProjectId")]
  pub project_id: u64,
  #[serde(rename = "TrackLabels", default)]
  pub track_labels: Vec<String>,
  #[serde(rename = "TrackIssueTypes", default)]
  pub track_issue_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
  #[serde(rename = "ProgressLabels")]
  pub progress_labels: Vec<String>,
  #[serde(rename = "DoneLabel")]
  pub done_label: String,
  #[serde(rename = "ExcludedLabels")]
  pub excluded_labels: Vec<String>,
}

impl Default for ReportConfig {
  fn default() -> Self {
    Self {
      progress_labels: vec!["To do".into(), "In Progress".into(), "PR".into(), "QA".into()],
      done_label: "Done".into(),
      excluded_labels: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
  #[serde(rename = "Version")]
  pub version: String,
  #[serde(rename = "gitLab")]
  pub gitlab: GitLabConfig,
  #[serde(default)]
  pub report: ReportConfig,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      version: CONFIG_VERSION.into(),
      gitlab: GitLabConfig {
        url: "https://gitlab.com".into(),
        personal_token: "your-personal-token".into(),
        project_id: 0,
        track_labels: vec!["To do".into(), "In Progress".into(), "QA".into(), "Done".into()],
        track_issue_types: vec!["issue".into(), "incident".into()],
      },
      report: ReportConfig::default(),
    }
  }
}

impl AppConfig {
  /// Labels the report measures; the sprint label itself is never "other".
  pub fn progress_config(&self, sprint_label: &str) -> ProgressConfig {
    let excluded = self
      .report
      .excluded_labels
      .iter()
      .map(String::as_str)
      .chain(std::iter::once(sprint_label));
    ProgressConfig::new(self.report.progress_labels.iter().map(String::as_str), self.report.done_label.as_str(), excluded)
  }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
  let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
  Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
  static RE_URL: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^https?://[^\s/?#]+(?:/\S*)?$").expect("valid URL regex"));

  if config.version != CONFIG_VERSION {
    return Err(ConfigError::Invalid(
      "config file has the wrong version. Please, backup the content and delete it, so you can generate a new one".into(),
    ));
  }
  if !RE_URL.is_match(&config.gitlab.url) {
    return Err(ConfigError::Invalid("GitLabConfig.URL is not a valid URL".into()));
  }
  if config.gitlab.url.ends_with('/') {
    return Err(ConfigError::Invalid("GitLabConfig.URL can't end with a '/'".into()));
  }
  if config.gitlab.personal_token.is_empty() {
    return Err(ConfigError::Invalid("GitLabConfig.PersonalToken can't be empty".into()));
  }
  if config.gitlab.track_labels.is_empty() {
    return Err(ConfigError::Invalid(
      "GitLabConfig.TrackLabels shouldn't be empty because it is going to be used to filter issues".into(),
    ));
  }
  if config.gitlab.track_issue_types.is_empty() {
    return Err(ConfigError::Invalid(
      "GitLabConfig.TrackIssueTypes shouldn't be empty because it is going to be used to filter issues".into(),
    ));
  }
  Ok(())
}

/// A non-empty token from the environment wins over the file.
pub fn apply_token_override(config: &mut AppConfig, env_token: Option<String>) {
  if let Some(t) = env_token {
    if !t.trim().is_empty() {
      debug!("using GITLAB_TOKEN from the environment");
      config.gitlab.personal_token = t.trim().to_string();
    }
  }
}

fn write_default_config(path: &Path) -> Result<()> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }
  let content = serde_yaml::to_string(&AppConfig::default())?;
  std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
  Ok(())
}

pub fn parse_config(text: &str) -> Result<AppConfig> {
  Ok(serde_yaml::from_str(text)?)
}

/// Read and validate the config file, creating a template when it is missing.
pub fn load_config(path: &Path) -> Result<AppConfig> {
  if !path.exists() {
    write_default_config(path)?;
    info!(path = %path.display(), "created default config file");
    return Err(ConfigError::Created(path.to_path_buf()).into());
  }

  let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
  let mut config = parse_config(&text).with_context(|| format!("parsing {}", path.display()))?;
  apply_token_override(&mut config, std::env::var("GITLAB_TOKEN").ok());
  validate(&config)?;

  Ok(config)
}
