use jsonschema::validator_for;

fn read_schema(name: &str) -> serde_json::Value {
  let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
  let path = manifest_dir.join("tests").join("schemas").join(name);
  let data = std::fs::read(&path).expect("schema file");
  serde_json::from_slice(&data).expect("valid schema JSON")
}

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

fn json_report(issues_env: Option<&str>) -> serde_json::Value {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());
  let mut cmd = test_support::fixture_cmd(&config);
  if let Some(issues) = issues_env {
    cmd.env("GSR_TEST_ISSUES_JSON", issues);
  }
  let out = cmd
    .args(["--sprint", "Sprint-5", "--format", "json", "--out", "-"])
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn json_report_conforms_to_schema() {
  let v = json_report(None);
  let compiled = compile_schema("report.schema.json");
  compiled.validate(&v).expect("schema validation failed for JSON report");
}

#[test]
fn empty_json_report_conforms_to_schema() {
  let v = json_report(Some("[]"));
  assert_eq!(v, serde_json::json!({ "users": [] }));
  let compiled = compile_schema("report.schema.json");
  compiled.validate(&v).expect("schema validation failed for empty report");
}

#[test]
fn schema_rejects_text_durations() {
  let compiled = compile_schema("report.schema.json");
  let bad = serde_json::json!({
    "users": [{
      "assignee": "Alice",
      "issues": [{
        "id": 1,
        "title": "t",
        "progress": [{ "status": "QA", "duration_seconds": "0 day(s) 01:00:00", "is_still_going": false }],
        "other_labels": []
      }]
    }]
  });
  assert!(!compiled.is_valid(&bad));
}
