//! Integration tests for `berrygen generate`.

use predicates::prelude::*;

use crate::common::TestEnv;

#[test]
fn no_sources_skips_and_creates_nothing() {
  let env = TestEnv::new();

  env
    .berrygen_cmd()
    .arg("generate")
    .assert()
    .success()
    .stderr(predicate::str::contains("skipping code generation"));

  assert!(!env.root().join("components").exists());
  assert!(!env.root().join(".pio").exists());
}

#[test]
fn marker_present_is_up_to_date() {
  let env = TestEnv::new();
  env.component_berry();
  env.write_file("components/berry_lang/berry-lang/generate/be_const_strtab.h", "");

  env
    .berrygen_cmd()
    .arg("generate")
    .assert()
    .success()
    .stdout(predicate::str::contains("up to date"));
}

#[test]
fn dry_run_prints_command_and_touches_nothing() {
  let env = TestEnv::new();
  let source = env.component_berry();

  env
    .berrygen_cmd()
    .args(["generate", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("would be generated"))
    .stdout(predicate::str::contains("generating constant tables").not())
    .stdout(predicate::str::contains(" -o "))
    .stdout(predicate::str::contains("berry_conf.h"));

  assert!(!source.join("generate").exists());
}

#[test]
fn flags_override_environment() {
  let env = TestEnv::new();
  let custom = env.mkdir("deps/other/berry");

  env
    .berrygen_cmd()
    .args(["generate", "--dry-run", "--env-name", "other", "--libdeps-dir"])
    .arg(env.root().join("deps"))
    .assert()
    .success()
    .stdout(predicate::str::contains(custom.join("tools").join("coc").join("coc").display().to_string()));
}

#[test]
fn missing_generator_fails_build() {
  let env = TestEnv::new();
  env.component_berry();

  env
    .berrygen_cmd()
    .arg("generate")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Berry code generation failed"));
}

#[cfg(unix)]
mod unix {
  use super::*;
  use crate::common::{COC_FAIL, COC_OK};
  use serial_test::serial;

  #[test]
  #[serial]
  fn generates_once_then_up_to_date() {
    let env = TestEnv::new();
    let source = env.component_berry();
    env.install_coc(&source, COC_OK);

    env
      .berrygen_cmd()
      .assert()
      .success()
      .stdout(predicate::str::contains("generating constant tables"))
      .stdout(predicate::str::contains("generation complete"));

    env
      .berrygen_cmd()
      .assert()
      .success()
      .stdout(predicate::str::contains("up to date"));

    let runs = std::fs::read_to_string(source.join("coc-runs.txt")).unwrap();
    assert_eq!(runs.lines().count(), 1);
    assert!(source.join("generate").join("be_const_strtab.h").is_file());
  }

  #[test]
  #[serial]
  fn libdeps_source_used_with_exact_arguments() {
    let env = TestEnv::new();
    let source = env.libdeps_berry();
    env.component_berry();
    env.install_coc(&source, COC_OK);

    env.berrygen_cmd().arg("generate").assert().success();

    let args = std::fs::read_to_string(source.join("coc-args.txt")).unwrap();
    let expected = vec![
      "-o".to_string(),
      source.join("generate").display().to_string(),
      source.join("src").display().to_string(),
      source.join("default").display().to_string(),
      "-c".to_string(),
      env.root().join("src").join("berry").join("berry_conf.h").display().to_string(),
    ];
    assert_eq!(args.lines().map(String::from).collect::<Vec<_>>(), expected);
  }

  #[test]
  #[serial]
  fn force_regenerates() {
    let env = TestEnv::new();
    let source = env.component_berry();
    env.install_coc(&source, COC_OK);

    env.berrygen_cmd().arg("generate").assert().success();
    env.berrygen_cmd().args(["generate", "--force"]).assert().success();

    let runs = std::fs::read_to_string(source.join("coc-runs.txt")).unwrap();
    assert_eq!(runs.lines().count(), 2);
  }

  #[test]
  #[serial]
  fn interpreter_runs_tool() {
    let env = TestEnv::new();
    let source = env.component_berry();
    env.install_coc(&source, COC_OK);

    env
      .berrygen_cmd()
      .args(["generate", "--interpreter", "/bin/sh"])
      .assert()
      .success();

    assert!(source.join("generate").join("be_const_strtab.h").is_file());
  }

  #[test]
  #[serial]
  fn relative_project_dir_generates() {
    let env = TestEnv::new();
    let source = env.mkdir("fw/components/berry_lang/berry-lang");
    env.install_coc(&source, COC_OK);

    env
      .berrygen_cmd()
      .current_dir(env.root())
      .env_remove("PROJECT_DIR")
      .env_remove("PROJECT_LIBDEPS_DIR")
      .env_remove("PROJECT_SRC_DIR")
      .args(["generate", "--project-dir", "fw"])
      .assert()
      .success()
      .stdout(predicate::str::contains("generation complete"));

    assert!(source.join("generate").join("be_const_strtab.h").is_file());
    let args = std::fs::read_to_string(source.join("coc-args.txt")).unwrap();
    assert!(
      args.lines().all(|a| a.starts_with('-') || std::path::Path::new(a).is_absolute()),
      "generator arguments should be absolute: {}",
      args
    );
  }

  #[test]
  #[serial]
  fn missing_generator_reports_cause_once() {
    let env = TestEnv::new();
    env.component_berry();

    let output = env.berrygen_cmd().arg("generate").output().unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to start"), "stderr: {}", stderr);
    assert_eq!(stderr.matches("os error").count(), 1, "stderr: {}", stderr);
  }

  #[test]
  #[serial]
  fn failing_generator_fails_build() {
    let env = TestEnv::new();
    let source = env.component_berry();
    env.install_coc(&source, COC_FAIL);

    env
      .berrygen_cmd()
      .arg("generate")
      .assert()
      .failure()
      .stderr(predicate::str::contains("coc: unknown symbol"))
      .stderr(predicate::str::contains("exit code Some(2)"));

    assert!(source.join("generate").is_dir());
    assert!(!source.join("generate").join("be_const_strtab.h").exists());
  }
}
