//! Command execution
//!
//! Build steps never touch `std::process::Command` directly. They describe a
//! command with a [`CommandArgs`] struct and hand it to a [`CommandRunner`]:
//!
//! - [`SystemRunner`] spawns the real tool, blocks until it exits, and reports
//!   its status. The child inherits stdout/stderr so CI logs show the tool's
//!   own output.
//! - [`RecordingRunner`] records every invocation and answers with scripted
//!   statuses. It backs `--dry-run` and the test suites.

use std::process::Command;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::command_args::{CommandArgs, Invocation};
use crate::error::{BuildError, Result};
use crate::process_guard::{ChildGuard, CommandProcessGroup};

/// Something that can execute an [`Invocation`] and report its status.
pub trait CommandRunner {
    /// Run to completion and return the exit status verbatim.
    ///
    /// `Err` only when the command could not be started.
    fn run(&self, invocation: &Invocation) -> Result<i32>;
}

/// Run `args` and turn a non-zero status into [`BuildError::CommandFailed`].
pub fn run_checked<A: CommandArgs + ?Sized>(runner: &dyn CommandRunner, args: &A) -> Result<()> {
    let invocation = args.invocation();
    info!("running: {}", invocation.display_line());

    let status = runner.run(&invocation)?;
    if status == 0 {
        Ok(())
    } else {
        warn!(program = %invocation.program, status, "command failed");
        Err(BuildError::command_failed(&invocation.program, status))
    }
}

// ============================================================================
// SystemRunner
// ============================================================================

/// Runs commands on the host, one at a time, with no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args).in_new_process_group();
        if let Some(ref dir) = invocation.cwd {
            cmd.current_dir(dir);
        }
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        let spawn_error = |source| BuildError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let mut child = cmd.spawn().map_err(spawn_error)?;
        let _guard = ChildGuard::register(child.id());
        let status = child.wait().map_err(spawn_error)?;

        Ok(exit_status_code(status))
    }
}

/// Exit code of a finished child; `-signal` when it was killed by a signal.
fn exit_status_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match status.code() {
        Some(code) => code,
        None => status.signal().map_or(-1, |sig| -sig),
    }
}

// ============================================================================
// RecordingRunner
// ============================================================================

type Matcher = Box<dyn Fn(&Invocation) -> bool + Send + Sync>;

/// Records invocations instead of running them.
///
/// Every command succeeds unless a failure rule matches it; the first
/// matching rule supplies the status.
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Mutex<Vec<Invocation>>,
    failures: Vec<(Matcher, i32)>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every invocation of `program` with `status`.
    pub fn fail_program(self, program: &str, status: i32) -> Self {
        let program = program.to_string();
        self.fail_when(move |inv| inv.program == program, status)
    }

    /// Fail invocations matching `matcher` with `status`.
    pub fn fail_when<F>(mut self, matcher: F, status: i32) -> Self
    where
        F: Fn(&Invocation) -> bool + Send + Sync + 'static,
    {
        self.failures.push((Box::new(matcher), status));
        self
    }

    /// Everything run so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Argument vectors of every recorded invocation of `program`.
    pub fn calls_to(&self, program: &str) -> Vec<Vec<String>> {
        self.invocations()
            .into_iter()
            .filter(|inv| inv.program == program)
            .map(|inv| inv.args)
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        debug!("recorded: {}", invocation.display_line());
        if let Ok(mut guard) = self.invocations.lock() {
            guard.push(invocation.clone());
        }

        let status = self
            .failures
            .iter()
            .find(|(matcher, _)| matcher(invocation))
            .map_or(0, |(_, status)| *status);
        Ok(status)
    }
}

impl std::fmt::Debug for RecordingRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingRunner")
            .field("invocations", &self.invocations())
            .field("failure_rules", &self.failures.len())
            .finish()
    }
}
