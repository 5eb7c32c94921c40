//! Type-safe arguments for the native build tools.
//!
//! - `ConfigureArgs` for `./configure <options...> --prefix=<dir>` run inside the source tree
//! - `MakeArgs` for `make [-j N] [target]` run inside the source tree

use std::path::{Path, PathBuf};

use strum::{Display, EnumIter};

use crate::command_args::CommandArgs;

/// A single `configure` switch. `Display` yields the exact flag text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum ConfigureOption {
    #[strum(serialize = "--enable-orca")]
    EnableOrca,
    #[strum(serialize = "--enable-codegen")]
    EnableCodegen,
    #[strum(serialize = "--enable-mapreduce")]
    EnableMapreduce,
    #[strum(serialize = "--with-perl")]
    WithPerl,
    #[strum(serialize = "--with-libxml")]
    WithLibxml,
    #[strum(serialize = "--with-python")]
    WithPython,
    #[strum(serialize = "--disable-gpfdist")]
    DisableGpfdist,
}

// ============================================================================
// ./configure
// ============================================================================

/// Arguments for the source tree's `configure` script.
#[derive(Debug, Clone)]
pub struct ConfigureArgs {
    /// Directory holding the `configure` script; the child runs there.
    pub source_dir: PathBuf,
    /// Options, emitted in the given order.
    pub options: Vec<ConfigureOption>,
    /// Installation prefix, emitted last as `--prefix=<dir>`.
    pub prefix: PathBuf,
}

impl CommandArgs for ConfigureArgs {
    fn program(&self) -> &str {
        "./configure"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args: Vec<String> = self.options.iter().map(ToString::to_string).collect();
        args.push(format!("--prefix={}", self.prefix.display()));
        args
    }

    fn working_dir(&self) -> Option<&Path> {
        Some(&self.source_dir)
    }
}

// ============================================================================
// make
// ============================================================================

/// Arguments for `make` in the source tree.
#[derive(Debug, Clone)]
pub struct MakeArgs {
    pub source_dir: PathBuf,
    /// Parallel jobs (`-j N`); `None` lets make decide.
    pub jobs: Option<u32>,
    /// Target to build; `None` builds the default target.
    pub target: Option<String>,
}

impl CommandArgs for MakeArgs {
    fn program(&self) -> &str {
        "make"
    }

    fn to_cli_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(jobs) = self.jobs {
            args.push("-j".to_string());
            args.push(jobs.to_string());
        }
        if let Some(ref target) = self.target {
            args.push(target.clone());
        }
        args
    }

    fn working_dir(&self) -> Option<&Path> {
        Some(&self.source_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_prefix_comes_last() {
        let args = ConfigureArgs {
            source_dir: PathBuf::from("src"),
            options: vec![ConfigureOption::EnableOrca, ConfigureOption::WithPython],
            prefix: PathBuf::from("/opt/db"),
        };
        assert_eq!(
            args.to_cli_args(),
            vec!["--enable-orca", "--with-python", "--prefix=/opt/db"]
        );
        assert_eq!(args.working_dir(), Some(Path::new("src")));
    }

    #[test]
    fn test_configure_option_text() {
        use strum::IntoEnumIterator;

        for option in ConfigureOption::iter() {
            let flag = option.to_string();
            assert!(flag.starts_with("--"), "{flag} should look like a flag");
        }
        assert_eq!(ConfigureOption::DisableGpfdist.to_string(), "--disable-gpfdist");
    }

    #[test]
    fn test_make_args() {
        let plain = MakeArgs {
            source_dir: PathBuf::from("src"),
            jobs: None,
            target: None,
        };
        assert!(plain.to_cli_args().is_empty());

        let install = MakeArgs {
            source_dir: PathBuf::from("src"),
            jobs: Some(4),
            target: Some("install".to_string()),
        };
        assert_eq!(install.to_cli_args(), vec!["-j", "4", "install"]);
    }
}
