use predicates::prelude::*;

#[test]
fn missing_sprint_fails() {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());
  test_support::fixture_cmd(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("--sprint"));
}

#[test]
fn unknown_format_is_rejected_by_clap() {
  test_support::cmd_bin(test_support::BIN)
    .args(["--sprint", "Sprint-5", "--format", "xlsx"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("xlsx"));
}

#[test]
fn invalid_now_override_fails() {
  let td = test_support::tempdir();
  let config = test_support::write_config(td.path());
  test_support::cmd_bin(test_support::BIN)
    .arg("--config")
    .arg(&config)
    .args(["--sprint", "Sprint-5", "--out", "-", "--now-override", "last tuesday"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("--now-override"));
}

#[test]
fn help_lists_public_flags_only() {
  test_support::cmd_bin(test_support::BIN)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("--sprint"))
    .stdout(predicate::str::contains("--format"))
    .stdout(predicate::str::contains("--now-override").not())
    .stdout(predicate::str::contains("--gen-man").not());
}
