//! Type-safe command argument contracts.
//!
//! Every external tool a build step drives (`curl`, `rpm`, `yum`, `./configure`,
//! `make`) gets a struct implementing `CommandArgs`. The struct definition is the
//! contract: flag spelling and ordering live in exactly one place, and the runner
//! only ever sees a realized [`Invocation`].

use std::path::{Path, PathBuf};

/// Trait for typed command arguments.
///
/// # Contract
///
/// - `program()`: the executable, resolved via `PATH` or relative to `working_dir()`.
/// - `to_cli_args()`: arguments exactly as the tool expects them, in order.
/// - `get_env_vars()`: extra environment for the child (usually none).
/// - `working_dir()`: directory the child runs in; `None` inherits ours.
pub trait CommandArgs {
    /// Executable name or path (e.g. `"curl"`, `"./configure"`).
    fn program(&self) -> &str;

    /// Convert struct fields to CLI arguments.
    fn to_cli_args(&self) -> Vec<String>;

    /// Extra environment variables for the child.
    fn get_env_vars(&self) -> Vec<(String, String)> {
        vec![]
    }

    /// Working directory for the child process.
    fn working_dir(&self) -> Option<&Path> {
        None
    }

    /// Realize these arguments into a runnable invocation.
    fn invocation(&self) -> Invocation {
        Invocation {
            program: self.program().to_string(),
            args: self.to_cli_args(),
            cwd: self.working_dir().map(Path::to_path_buf),
            env: self.get_env_vars(),
        }
    }
}

/// A fully resolved command line, ready to hand to a runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    /// Shell-like rendering for logs and `plan` output.
    pub fn display_line(&self) -> String {
        let line = self.argv().join(" ");
        match &self.cwd {
            Some(dir) => format!("(cd {} && {})", dir.display(), line),
            None => line,
        }
    }
}
