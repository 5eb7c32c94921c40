use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{BuildVariant, Stage};

/// gpbuild - CI build step driver for GPDB variants
#[derive(Parser, Debug)]
#[command(name = "gpbuild")]
#[command(about = "Install build dependencies and configure GPDB for a CI build variant")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: log every command instead of running it.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// JSON file overriding build locations, package URLs and make settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run stages in order, from dependency install up to a stage
    Run {
        /// Build variant
        #[arg(short, long, default_value_t = BuildVariant::Orca)]
        variant: BuildVariant,
        /// Last stage to run
        #[arg(short, long, default_value_t = Stage::Configure)]
        through: Stage,
    },
    /// Run a single stage
    Step {
        /// Stage to run (deps, configure, compile, install)
        stage: Stage,
        /// Build variant
        #[arg(short, long, default_value_t = BuildVariant::Orca)]
        variant: BuildVariant,
    },
    /// Print the commands a run would execute, without executing them
    Plan {
        /// Build variant
        #[arg(short, long, default_value_t = BuildVariant::Orca)]
        variant: BuildVariant,
        /// Last stage to include
        #[arg(short, long, default_value_t = Stage::Install)]
        through: Stage,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Check the build host for required tools and privileges
    Preflight {
        /// Build variant
        #[arg(short, long, default_value_t = BuildVariant::Orca)]
        variant: BuildVariant,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
