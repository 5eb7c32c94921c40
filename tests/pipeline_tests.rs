//! Tests for variant selection and the stage pipeline
//!
//! These tests verify:
//! - Each variant runs the expected commands in order
//! - The pipeline stops at the first failing stage
//! - The real command runner propagates statuses from a scratch source tree

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use gpbuild::config::BuildConfig;
use gpbuild::pipeline::Pipeline;
use gpbuild::runner::{CommandRunner, RecordingRunner, SystemRunner};
use gpbuild::steps;
use gpbuild::types::{BuildVariant, Stage};
use tempfile::TempDir;

fn pipeline_for(
    variant: BuildVariant,
    config: BuildConfig,
    runner: Arc<dyn CommandRunner>,
) -> Pipeline<Box<dyn steps::BuildStep>> {
    Pipeline::new(steps::for_variant(variant, Arc::new(config), runner))
}

fn programs(recorder: &RecordingRunner) -> Vec<String> {
    recorder
        .invocations()
        .into_iter()
        .map(|inv| inv.program)
        .collect()
}

#[test]
fn test_orca_through_configure() {
    let recorder = Arc::new(RecordingRunner::new());
    let pipeline = pipeline_for(BuildVariant::Orca, BuildConfig::default(), recorder.clone());

    pipeline.run_through(Stage::Configure).unwrap();
    assert_eq!(programs(&recorder), vec!["./configure"]);
    let args = &recorder.calls_to("./configure")[0];
    assert!(!args.iter().any(|a| a == "--enable-codegen"));
}

#[test]
fn test_codegen_full_build_order() {
    let recorder = Arc::new(RecordingRunner::new());
    let pipeline = pipeline_for(BuildVariant::Codegen, BuildConfig::default(), recorder.clone());

    pipeline.run_through(Stage::Install).unwrap();
    assert_eq!(
        programs(&recorder),
        vec!["curl", "rpm", "curl", "rpm", "./configure", "make", "make"]
    );
    assert!(recorder.calls_to("./configure")[0].iter().any(|a| a == "--enable-codegen"));
    assert_eq!(recorder.calls_to("make")[1], vec!["install"]);
}

#[test]
fn test_deps_failure_skips_configure() {
    let recorder = Arc::new(RecordingRunner::new().fail_program("curl", 1));
    let pipeline = pipeline_for(BuildVariant::Codegen, BuildConfig::default(), recorder.clone());

    let err = pipeline.run_through(Stage::Configure).unwrap_err();
    assert_eq!(err.status(), Some(1));
    assert!(recorder.calls_to("./configure").is_empty());
}

// =============================================================================
// Real processes
// =============================================================================

fn write_configure(dir: &Path, body: &str) {
    let script = dir.join("configure");
    fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
}

fn scratch_config(root: &TempDir) -> BuildConfig {
    BuildConfig {
        source_dir: root.path().join("gpdb_src"),
        ..Default::default()
    }
}

#[test]
fn test_system_runner_configure_success_and_args() {
    let root = TempDir::new().unwrap();
    let config = scratch_config(&root);
    fs::create_dir(&config.source_dir).unwrap();
    // Record our arguments and working directory for inspection
    write_configure(&config.source_dir, "echo \"$@\" > args.txt\npwd > cwd.txt");

    let pipeline = pipeline_for(BuildVariant::Codegen, config.clone(), Arc::new(SystemRunner));
    pipeline.run_stage(Stage::Configure).unwrap();

    let args = fs::read_to_string(config.source_dir.join("args.txt")).unwrap();
    assert_eq!(
        args.trim(),
        "--enable-orca --enable-codegen --enable-mapreduce --with-perl --with-libxml \
         --with-python --disable-gpfdist --prefix=/usr/local/gpdb"
    );
    assert!(config.source_dir.join("cwd.txt").exists());
}

#[test]
fn test_system_runner_configure_status_propagates() {
    let root = TempDir::new().unwrap();
    let config = scratch_config(&root);
    fs::create_dir(&config.source_dir).unwrap();
    write_configure(&config.source_dir, "exit 42");

    let pipeline = pipeline_for(BuildVariant::Orca, config, Arc::new(SystemRunner));
    let err = pipeline.run_stage(Stage::Configure).unwrap_err();
    assert_eq!(err.status(), Some(42));
    assert_eq!(err.exit_code(), 42);
}

#[test]
fn test_missing_source_dir_is_launch_error() {
    let root = TempDir::new().unwrap();
    let config = scratch_config(&root);

    let pipeline = pipeline_for(BuildVariant::Codegen, config, Arc::new(SystemRunner));
    let err = pipeline.run_stage(Stage::Configure).unwrap_err();
    assert!(matches!(err, gpbuild::BuildError::Spawn { .. }));
    assert_eq!(err.status(), None);
}
