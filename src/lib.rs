//! gpbuild library
//!
//! Build steps for the GPDB CI pipeline: install system dependencies, then
//! configure, compile and install the source tree for one build variant.

pub mod cli;
pub mod command_args;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod process_guard;
pub mod runner;
pub mod sanity;
pub mod steps;
pub mod types;

pub use command_args::{CommandArgs, Invocation};
pub use config::BuildConfig;
pub use error::BuildError;
pub use pipeline::Pipeline;
pub use process_guard::{ChildRegistry, CommandProcessGroup};
pub use runner::{CommandRunner, RecordingRunner, SystemRunner, run_checked};
pub use steps::{BuildStep, CodegenBuild, CommonBuild};
pub use types::{BuildVariant, Stage};
