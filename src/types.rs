//! Build variant and stage enums shared by the CLI and the pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Which flavour of the CI build to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    /// ORCA-enabled build with the common dependency set
    #[default]
    Orca,
    /// ORCA plus the LLVM/Clang code generation toolchain
    Codegen,
}

/// Pipeline stages, declared in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Install system packages the build needs
    Deps,
    /// Run the source tree's configure script
    Configure,
    /// `make`
    Compile,
    /// `make install`
    Install,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_stage_order_matches_declaration() {
        let stages: Vec<Stage> = Stage::iter().collect();
        let mut sorted = stages.clone();
        sorted.sort();
        assert_eq!(stages, sorted);
        assert_eq!(stages.first(), Some(&Stage::Deps));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("codegen".parse::<BuildVariant>().unwrap(), BuildVariant::Codegen);
        assert_eq!("configure".parse::<Stage>().unwrap(), Stage::Configure);
        assert!("llvm".parse::<BuildVariant>().is_err());
        assert_eq!(Stage::Install.to_string(), "install");
    }
}
