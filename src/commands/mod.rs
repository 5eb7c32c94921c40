//! Typed argument structs for every external tool a build step runs.

pub mod build;
pub mod package;
