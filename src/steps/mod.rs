//! Build steps.
//!
//! A build step knows which commands prepare, configure, compile and install
//! one variant of the database. Variants extend each other by wrapping: the
//! codegen step holds a common step and calls it before adding its own work.

pub mod codegen;
pub mod common;

use std::sync::Arc;

use crate::config::BuildConfig;
use crate::error::Result;
use crate::runner::CommandRunner;
use crate::types::BuildVariant;

pub use codegen::CodegenBuild;
pub use common::CommonBuild;

/// One CI build variant.
///
/// Each operation runs its commands in order and stops at the first failure,
/// returning that command's status unchanged inside the error.
pub trait BuildStep {
    /// Install system packages the build depends on.
    fn install_system_deps(&self) -> Result<()>;

    /// Run the source tree's `configure` with this variant's flags.
    fn configure(&self) -> Result<()>;

    /// Build the source tree.
    fn compile(&self) -> Result<()>;

    /// Install the build under the configured prefix.
    fn install(&self) -> Result<()>;
}

impl<T: BuildStep + ?Sized> BuildStep for Box<T> {
    fn install_system_deps(&self) -> Result<()> {
        (**self).install_system_deps()
    }

    fn configure(&self) -> Result<()> {
        (**self).configure()
    }

    fn compile(&self) -> Result<()> {
        (**self).compile()
    }

    fn install(&self) -> Result<()> {
        (**self).install()
    }
}

/// Construct the build step for `variant`.
pub fn for_variant(
    variant: BuildVariant,
    config: Arc<BuildConfig>,
    runner: Arc<dyn CommandRunner>,
) -> Box<dyn BuildStep> {
    let common = CommonBuild::new(Arc::clone(&config), Arc::clone(&runner));
    match variant {
        BuildVariant::Orca => Box::new(common),
        BuildVariant::Codegen => Box::new(CodegenBuild::new(common, config, runner)),
    }
}
