//! Pre-flight checks for the build host
//!
//! Reports which tools a variant needs but cannot find, and whether we run
//! as root (package installs need it). Nothing here is fatal by itself: a
//! missing tool still shows up later as a launch failure.

use std::path::Path;
use std::process::Command;

use crate::config::BuildConfig;
use crate::process_guard::CommandProcessGroup;
use crate::types::BuildVariant;

#[derive(Debug)]
pub struct SanityCheckResult {
    pub missing_binaries: Vec<String>,
    pub configure_present: bool,
    pub is_root: bool,
}

impl SanityCheckResult {
    pub fn is_ok(&self) -> bool {
        self.missing_binaries.is_empty() && self.configure_present && self.is_root
    }
}

/// Tools on `PATH` every variant needs
const COMMON_BINARIES: &[&str] = &["make"];
/// Extra tools the codegen variant needs for its toolchain packages
const CODEGEN_BINARIES: &[&str] = &["curl", "rpm"];

pub fn required_binaries(variant: BuildVariant, config: &BuildConfig) -> Vec<&'static str> {
    let mut binaries = COMMON_BINARIES.to_vec();
    if !config.base_packages.is_empty() {
        binaries.push("yum");
    }
    if variant == BuildVariant::Codegen {
        binaries.extend_from_slice(CODEGEN_BINARIES);
    }
    binaries
}

fn binary_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .in_new_process_group()
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn is_running_as_root() -> bool {
    nix::unistd::geteuid().is_root()
}

pub fn verify_environment(variant: BuildVariant, config: &BuildConfig) -> SanityCheckResult {
    let missing_binaries = required_binaries(variant, config)
        .into_iter()
        .filter(|binary| !binary_exists(binary))
        .map(str::to_string)
        .collect();

    SanityCheckResult {
        missing_binaries,
        configure_present: Path::new(&config.source_dir).join("configure").is_file(),
        is_root: is_running_as_root(),
    }
}

/// Human-readable report, one line per problem
pub fn format_report(result: &SanityCheckResult, config: &BuildConfig) -> String {
    let mut lines = Vec::new();
    for binary in &result.missing_binaries {
        lines.push(format!("missing tool: {binary}"));
    }
    if !result.configure_present {
        lines.push(format!(
            "no configure script in {}",
            config.source_dir.display()
        ));
    }
    if !result.is_root {
        lines.push("not running as root: package installs will fail".to_string());
    }
    if lines.is_empty() {
        lines.push("build host looks ready".to_string());
    }
    lines.join("\n")
}
