//! The ORCA build shared by every variant.

use std::sync::Arc;

use tracing::info;

use crate::commands::build::{ConfigureArgs, ConfigureOption, MakeArgs};
use crate::commands::package::YumInstallArgs;
use crate::config::BuildConfig;
use crate::error::Result;
use crate::runner::{CommandRunner, run_checked};
use crate::steps::BuildStep;

/// Configure flags for the plain ORCA build, in command-line order
pub const ORCA_OPTIONS: &[ConfigureOption] = &[
    ConfigureOption::EnableOrca,
    ConfigureOption::EnableMapreduce,
    ConfigureOption::WithPerl,
    ConfigureOption::WithLibxml,
    ConfigureOption::WithPython,
    ConfigureOption::DisableGpfdist,
];

pub struct CommonBuild {
    config: Arc<BuildConfig>,
    runner: Arc<dyn CommandRunner>,
}

impl CommonBuild {
    pub fn new(config: Arc<BuildConfig>, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    fn make(&self, target: Option<&str>) -> MakeArgs {
        MakeArgs {
            source_dir: self.config.source_dir.clone(),
            jobs: self.config.make_jobs,
            target: target.map(str::to_string),
        }
    }
}

impl BuildStep for CommonBuild {
    fn install_system_deps(&self) -> Result<()> {
        if self.config.base_packages.is_empty() {
            info!("no base packages configured");
            return Ok(());
        }
        run_checked(
            self.runner.as_ref(),
            &YumInstallArgs {
                packages: self.config.base_packages.clone(),
            },
        )
    }

    fn configure(&self) -> Result<()> {
        run_checked(
            self.runner.as_ref(),
            &ConfigureArgs {
                source_dir: self.config.source_dir.clone(),
                options: ORCA_OPTIONS.to_vec(),
                prefix: self.config.prefix.clone(),
            },
        )
    }

    fn compile(&self) -> Result<()> {
        run_checked(self.runner.as_ref(), &self.make(None))
    }

    fn install(&self) -> Result<()> {
        run_checked(self.runner.as_ref(), &self.make(Some("install")))
    }
}
