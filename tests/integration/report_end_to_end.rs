use predicates::prelude::*;

const EXPECTED_CSV: &str = "\
Assignee;Issue ID;Issue Title;Status;Duration;Other Labels
Alice;;;;;
;359;Unit test totalizer;;;Backend, Dev MOD
;;;To do;2 day(s) 21:00:00;
;;;In Progress;3 day(s) 00:00:00;
;;;PR;1 day(s) 01:00:00;
;;;QA;2 day(s) 22:00:00, Still going;
;361;Refactor cache;;;
Unknown;;;;;
;360;Fix login redirect;;;bug
;;;In Progress;1 day(s) 03:00:00, Still going;
";

fn run_stdout(format: &str) -> String {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());
  let out = test_support::fixture_cmd(&config)
    .args(["--sprint", "Sprint-5", "--format", format, "--out", "-"])
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  String::from_utf8(out.stdout).unwrap()
}

#[test]
fn table_matches_csv_rows_aligned() {
  let line = |c: [&str; 6]| format!("{:<11}|{:<11}|{:<22}|{:<14}|{:<33}|{}\n", c[0], c[1], c[2], c[3], c[4], c[5]);
  let expected: String = EXPECTED_CSV
    .lines()
    .map(|row| {
      let cells: Vec<&str> = row.split(';').collect();
      line([cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]])
    })
    .collect();

  assert_eq!(run_stdout("table"), expected);
}

#[test]
fn json_reports_seconds_and_first_seen_assignees() {
  let v: serde_json::Value = serde_json::from_str(&run_stdout("json")).unwrap();
  let expected = serde_json::json!({
    "users": [
      {
        "assignee": "Alice",
        "issues": [
          {
            "id": 359,
            "title": "Unit test totalizer",
            "progress": [
              { "status": "To do", "duration_seconds": 248400, "is_still_going": false },
              { "status": "In Progress", "duration_seconds": 259200, "is_still_going": false },
              { "status": "PR", "duration_seconds": 90000, "is_still_going": false },
              { "status": "QA", "duration_seconds": 252000, "is_still_going": true }
            ],
            "other_labels": ["Backend", "Dev MOD"]
          },
          { "id": 361, "title": "Refactor cache", "progress": [], "other_labels": [] }
        ]
      },
      {
        "assignee": "Unknown",
        "issues": [
          {
            "id": 360,
            "title": "Fix login redirect",
            "progress": [
              { "status": "In Progress", "duration_seconds": 97200, "is_still_going": true }
            ],
            "other_labels": ["bug"]
          }
        ]
      }
    ]
  });
  assert_eq!(v, expected);
}

#[test]
fn csv_snapshot() {
  test_support::init_insta();
  insta::assert_snapshot!(run_stdout("csv"), @r"
  Assignee;Issue ID;Issue Title;Status;Duration;Other Labels
  Alice;;;;;
  ;359;Unit test totalizer;;;Backend, Dev MOD
  ;;;To do;2 day(s) 21:00:00;
  ;;;In Progress;3 day(s) 00:00:00;
  ;;;PR;1 day(s) 01:00:00;
  ;;;QA;2 day(s) 22:00:00, Still going;
  ;361;Refactor cache;;;
  Unknown;;;;;
  ;360;Fix login redirect;;;bug
  ;;;In Progress;1 day(s) 03:00:00, Still going;
  ");
}

#[test]
fn explicit_out_file_prints_pointer() {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());
  let target = td.path().join("reports").join("sprint.csv");

  test_support::fixture_cmd(&config)
    .args(["--sprint", "Sprint-5", "--format", "csv", "--out"])
    .arg(&target)
    .assert()
    .success()
    .stdout(format!("File generated at: {}\n", target.display()));

  assert_eq!(std::fs::read_to_string(&target).unwrap(), EXPECTED_CSV);
}

#[test]
fn default_out_file_lands_in_current_dir() {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());

  test_support::fixture_cmd(&config)
    .current_dir(td.path())
    .args(["--sprint", "Sprint-5"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("File generated at: "))
    .stdout(predicate::str::contains("Sprint-5-report.txt"));

  let written = std::fs::read_to_string(td.path().join("Sprint-5-report.txt")).unwrap();
  assert!(written.starts_with("Assignee   |Issue ID   |"));
  assert_eq!(written.lines().count(), EXPECTED_CSV.lines().count());
}

#[test]
fn missing_config_is_created_and_run_fails() {
  let td = test_support::tempdir();
  let config = td.path().join("fresh").join("gitlab-sprint-config.yml");

  test_support::fixture_cmd(&config)
    .args(["--sprint", "Sprint-5", "--out", "-"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Created a new config file"));

  let created = std::fs::read_to_string(&config).unwrap();
  assert!(created.contains("Version: v1"));
  assert!(created.contains("PersonalToken"));
}

#[test]
fn invalid_config_is_reported() {
  let td = test_support::tempdir();
  let config = td.path().join("gitlab-sprint-config.yml");
  let text = test_support::read_fixture_text("config.yml").replace("https://gitlab.example.com", "https://gitlab.example.com/");
  std::fs::write(&config, text).unwrap();

  test_support::fixture_cmd(&config)
    .args(["--sprint", "Sprint-5", "--out", "-"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("can't end with a '/'"));
}

#[test]
fn undecodable_tracker_payload_fails() {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());

  test_support::fixture_cmd(&config)
    .env("GSR_TEST_ISSUES_JSON", "not json")
    .args(["--sprint", "Sprint-5", "--out", "-"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("could not decode GitLab response"));
}

#[test]
fn sprint_without_issues_renders_header_only() {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());

  test_support::fixture_cmd(&config)
    .env("GSR_TEST_ISSUES_JSON", "[]")
    .args(["--sprint", "Sprint-9", "--format", "csv", "--out", "-"])
    .assert()
    .success()
    .stdout("Assignee;Issue ID;Issue Title;Status;Duration;Other Labels\n");
}
