//! Build configuration: locations, package sources and make settings.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! reproduces the stock CI build exactly. A config file only needs the
//! fields it changes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// LLVM 3.7.1 toolchain package for CentOS 6
pub const LLVM_RPM_URL: &str =
    "https://github.com/hardikar/rpm-specs/releases/download/centos6/llvm37-3.7.1-4.el6.x86_64.rpm";
/// Clang 3.7.1 package for CentOS 6
pub const CLANG_RPM_URL: &str =
    "https://github.com/hardikar/rpm-specs/releases/download/centos6/clang-3.7.1-4.el6.x86_64.rpm";

pub const DEFAULT_SOURCE_DIR: &str = "gpdb_src";
pub const DEFAULT_PREFIX: &str = "/usr/local/gpdb";
/// Scratch file every RPM download lands in; reused and never removed
pub const DEFAULT_DOWNLOAD_FILE: &str = "t.rpm";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Source tree holding `configure`, relative to the invocation directory
    pub source_dir: PathBuf,
    /// `--prefix` passed to configure
    pub prefix: PathBuf,
    pub download_file: PathBuf,
    pub llvm_rpm_url: String,
    pub clang_rpm_url: String,
    /// Packages the common step installs with yum; empty means nothing to do
    pub base_packages: Vec<String>,
    /// `make -j` value; unset lets make decide
    pub make_jobs: Option<u32>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            prefix: PathBuf::from(DEFAULT_PREFIX),
            download_file: PathBuf::from(DEFAULT_DOWNLOAD_FILE),
            llvm_rpm_url: LLVM_RPM_URL.to_string(),
            clang_rpm_url: CLANG_RPM_URL.to_string(),
            base_packages: Vec::new(),
            make_jobs: None,
        }
    }
}

impl BuildConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults. Validates either way.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            anyhow::bail!("source_dir must not be empty");
        }
        if !self.prefix.is_absolute() {
            anyhow::bail!("prefix must be an absolute path, got {:?}", self.prefix);
        }
        if self.download_file.as_os_str().is_empty() {
            anyhow::bail!("download_file must not be empty");
        }
        for (name, url) in [
            ("llvm_rpm_url", &self.llvm_rpm_url),
            ("clang_rpm_url", &self.clang_rpm_url),
        ] {
            if url.trim().is_empty() {
                anyhow::bail!("{name} must not be empty");
            }
        }
        if self.base_packages.iter().any(|p| p.trim().is_empty()) {
            anyhow::bail!("base_packages must not contain empty names");
        }
        if self.make_jobs == Some(0) {
            anyhow::bail!("make_jobs must be at least 1");
        }
        Ok(())
    }
}
