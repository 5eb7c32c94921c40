//! Code generation build: the common build plus an LLVM/Clang toolchain.
//!
//! The toolchain ships as two prebuilt RPMs. Both are fetched into the same
//! scratch file, so they are always installed strictly one after the other.
//! The scratch file is left in place afterwards.

use std::sync::Arc;

use tracing::info;

use crate::commands::build::{ConfigureArgs, ConfigureOption};
use crate::commands::package::{CurlDownloadArgs, RpmInstallArgs};
use crate::config::BuildConfig;
use crate::error::Result;
use crate::runner::{CommandRunner, run_checked};
use crate::steps::BuildStep;

/// Configure flags for the codegen build, in command-line order
pub const CODEGEN_OPTIONS: &[ConfigureOption] = &[
    ConfigureOption::EnableOrca,
    ConfigureOption::EnableCodegen,
    ConfigureOption::EnableMapreduce,
    ConfigureOption::WithPerl,
    ConfigureOption::WithLibxml,
    ConfigureOption::WithPython,
    ConfigureOption::DisableGpfdist,
];

/// Wraps a base step, installing the toolchain after the base dependencies
/// and replacing the configure flags. Compile and install are the base's.
pub struct CodegenBuild<B> {
    base: B,
    config: Arc<BuildConfig>,
    runner: Arc<dyn CommandRunner>,
}

impl<B: BuildStep> CodegenBuild<B> {
    pub fn new(base: B, config: Arc<BuildConfig>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            base,
            config,
            runner,
        }
    }

    /// Fetch `url` into the scratch file, then `rpm -i` it.
    ///
    /// A failed fetch returns immediately; the install is never attempted.
    pub fn download_and_install_rpm(&self, url: &str) -> Result<()> {
        let package = self.config.download_file.clone();
        info!(url, "installing package");

        run_checked(
            self.runner.as_ref(),
            &CurlDownloadArgs {
                url: url.to_string(),
                output: package.clone(),
            },
        )?;
        run_checked(self.runner.as_ref(), &RpmInstallArgs { package })
    }
}

impl<B: BuildStep> BuildStep for CodegenBuild<B> {
    fn install_system_deps(&self) -> Result<()> {
        self.base.install_system_deps()?;
        self.download_and_install_rpm(&self.config.llvm_rpm_url)?;
        self.download_and_install_rpm(&self.config.clang_rpm_url)?;
        Ok(())
    }

    fn configure(&self) -> Result<()> {
        run_checked(
            self.runner.as_ref(),
            &ConfigureArgs {
                source_dir: self.config.source_dir.clone(),
                options: CODEGEN_OPTIONS.to_vec(),
                prefix: self.config.prefix.clone(),
            },
        )
    }

    fn compile(&self) -> Result<()> {
        self.base.compile()
    }

    fn install(&self) -> Result<()> {
        self.base.install()
    }
}
