//! Pipeline driver
//!
//! Runs the stages of a build step in their fixed order, stopping at the
//! first failure. The CI job normally runs through `configure`; later stages
//! are opt-in.

use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::error::Result;
use crate::steps::BuildStep;
use crate::types::Stage;

pub struct Pipeline<S> {
    step: S,
}

impl<S: BuildStep> Pipeline<S> {
    pub fn new(step: S) -> Self {
        Self { step }
    }

    /// Run a single stage.
    pub fn run_stage(&self, stage: Stage) -> Result<()> {
        info!(%stage, "stage started");
        let result = match stage {
            Stage::Deps => self.step.install_system_deps(),
            Stage::Configure => self.step.configure(),
            Stage::Compile => self.step.compile(),
            Stage::Install => self.step.install(),
        };
        match &result {
            Ok(()) => info!(%stage, "stage finished"),
            Err(e) => error!(%stage, "stage failed: {e}"),
        }
        result
    }

    /// Run every stage from the first up to and including `last`.
    pub fn run_through(&self, last: Stage) -> Result<()> {
        for stage in Stage::iter().take_while(|stage| *stage <= last) {
            self.run_stage(stage)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use std::cell::RefCell;

    /// Records stage calls and fails the configured one
    struct Scripted {
        fail_at: Option<Stage>,
        calls: RefCell<Vec<Stage>>,
    }

    impl Scripted {
        fn new(fail_at: Option<Stage>) -> Self {
            Self {
                fail_at,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn record(&self, stage: Stage) -> Result<()> {
            self.calls.borrow_mut().push(stage);
            if self.fail_at == Some(stage) {
                Err(BuildError::command_failed(stage.to_string(), 4))
            } else {
                Ok(())
            }
        }
    }

    impl BuildStep for Scripted {
        fn install_system_deps(&self) -> Result<()> {
            self.record(Stage::Deps)
        }

        fn configure(&self) -> Result<()> {
            self.record(Stage::Configure)
        }

        fn compile(&self) -> Result<()> {
            self.record(Stage::Compile)
        }

        fn install(&self) -> Result<()> {
            self.record(Stage::Install)
        }
    }

    #[test]
    fn test_run_through_configure_stops_there() {
        let pipeline = Pipeline::new(Scripted::new(None));
        pipeline.run_through(Stage::Configure).unwrap();
        assert_eq!(
            *pipeline.step.calls.borrow(),
            vec![Stage::Deps, Stage::Configure]
        );
    }

    #[test]
    fn test_run_through_all_stages() {
        let pipeline = Pipeline::new(Scripted::new(None));
        pipeline.run_through(Stage::Install).unwrap();
        assert_eq!(pipeline.step.calls.borrow().len(), 4);
    }

    #[test]
    fn test_failure_stops_pipeline() {
        let pipeline = Pipeline::new(Scripted::new(Some(Stage::Deps)));
        let err = pipeline.run_through(Stage::Install).unwrap_err();
        assert_eq!(err.status(), Some(4));
        assert_eq!(*pipeline.step.calls.borrow(), vec![Stage::Deps]);
    }

    #[test]
    fn test_run_stage_runs_only_that_stage() {
        let pipeline = Pipeline::new(Scripted::new(None));
        pipeline.run_stage(Stage::Compile).unwrap();
        assert_eq!(*pipeline.step.calls.borrow(), vec![Stage::Compile]);
    }
}
