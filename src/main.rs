//! gpbuild - CI build step driver
//!
//! Selects a build variant, then runs its stages in order with fail-fast
//! semantics. A failing command's status becomes gpbuild's exit code.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use gpbuild::cli::{Cli, Commands};
use gpbuild::config::BuildConfig;
use gpbuild::error::BuildError;
use gpbuild::pipeline::Pipeline;
use gpbuild::runner::{CommandRunner, RecordingRunner, SystemRunner};
use gpbuild::types::{BuildVariant, Stage};
use gpbuild::{process_guard, sanity, steps};

/// Log to stderr at `info` unless `RUST_LOG` says otherwise
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logger();

    if let Err(e) = process_guard::init_signal_handlers() {
        warn!("Failed to initialize signal handlers: {e}");
    }

    let cli = Cli::parse_args();
    debug!(?cli, "CLI arguments parsed");

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            let code = e
                .downcast_ref::<BuildError>()
                .map_or(1, BuildError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Run { variant, through } => {
            let config = BuildConfig::resolve(cli.config.as_deref())?;
            let runner = select_runner(cli.dry_run);
            info!(%variant, %through, "running build");
            run_pipeline(*variant, config, runner, |pipeline| pipeline.run_through(*through))
        }
        Commands::Step { stage, variant } => {
            let config = BuildConfig::resolve(cli.config.as_deref())?;
            let runner = select_runner(cli.dry_run);
            info!(%variant, %stage, "running single stage");
            run_pipeline(*variant, config, runner, |pipeline| pipeline.run_stage(*stage))
        }
        Commands::Plan { variant, through } => {
            let config = BuildConfig::resolve(cli.config.as_deref())?;
            for line in plan(*variant, config, *through)? {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Validate { config } => validate(config),
        Commands::Preflight { variant } => {
            let config = BuildConfig::resolve(cli.config.as_deref())?;
            let result = sanity::verify_environment(*variant, &config);
            println!("{}", sanity::format_report(&result, &config));
            if result.is_ok() {
                Ok(())
            } else {
                anyhow::bail!("preflight checks failed")
            }
        }
    }
}

fn select_runner(dry_run: bool) -> Arc<dyn CommandRunner> {
    if dry_run {
        info!("dry run: commands are logged, not executed");
        Arc::new(RecordingRunner::new())
    } else {
        Arc::new(SystemRunner)
    }
}

fn run_pipeline<F>(
    variant: BuildVariant,
    config: BuildConfig,
    runner: Arc<dyn CommandRunner>,
    run: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&Pipeline<Box<dyn steps::BuildStep>>) -> gpbuild::error::Result<()>,
{
    let step = steps::for_variant(variant, Arc::new(config), runner);
    run(&Pipeline::new(step))?;
    Ok(())
}

/// Command lines a run through `last` would execute, in order
fn plan(variant: BuildVariant, config: BuildConfig, last: Stage) -> anyhow::Result<Vec<String>> {
    let recorder = Arc::new(RecordingRunner::new());
    let runner: Arc<dyn CommandRunner> = recorder.clone();
    run_pipeline(variant, config, runner, |pipeline| pipeline.run_through(last))?;
    Ok(recorder
        .invocations()
        .iter()
        .map(|inv| inv.display_line())
        .collect())
}

fn validate(path: &Path) -> anyhow::Result<()> {
    info!("Validating configuration file: {:?}", path);
    let config = BuildConfig::load_from_file(path)?;
    config
        .validate()
        .with_context(|| format!("Configuration validation failed: {}", path.display()))?;
    println!("✓ Configuration file is valid: {}", path.display());
    Ok(())
}
