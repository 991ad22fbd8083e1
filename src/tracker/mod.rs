// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Namespace for issue-tracker access (GitLab REST client and sprint issue collection)
// role: tracker/namespace
// outputs: TrackerApi seam, FetchError, fetch_sprint_issues
// invariants: The core never sees raw HTTP; everything leaves this module as model::Issue
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod fetch;
pub mod gitlab_api;

pub use fetch::fetch_sprint_issues;
pub use gitlab_api::{build_api, FetchError, TrackerApi};
