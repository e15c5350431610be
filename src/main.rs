//! eyebreak - enforced visual-rest breaks for Linux desktops
//!
//! Alternates a configurable work interval with a forced full-screen break
//! overlay shown across all connected monitors. Unlocking the screen
//! restarts the work timer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use eyebreak::cli::{Cli, Commands, Display, RunArgs};
use eyebreak::config::FileConfig;
use eyebreak::lock::{LockWatcher, LockWatcherHandle};
use eyebreak::monitor;
use eyebreak::overlay;
use eyebreak::types::{BreakSchedule, LockWatchSettings};

/// Main entry point
fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli) {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Executes the CLI command.
fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run(args),
        Some(Commands::Monitors) => {
            let monitors = monitor::detect_monitors()?;
            Display::show_monitors(&monitors);
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
            Ok(())
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Runs the work/break cycle until Ctrl+C.
fn run(args: RunArgs) -> Result<()> {
    // Resolve the schedule: CLI overrides > preset > config file > defaults.
    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::load_default()?,
    };
    let schedule = BreakSchedule::resolve(
        args.preset(),
        args.work_secs,
        args.break_secs,
        file_config.as_ref(),
    );
    schedule
        .validate()
        .map_err(|message| anyhow::anyhow!(message))
        .context("invalid schedule")?;

    let watch = LockWatchSettings::resolve(args.no_lock_watch, args.poll_secs, file_config.as_ref());
    watch
        .validate()
        .map_err(|message| anyhow::anyhow!(message))
        .context("invalid lock poll interval")?;

    let monitors = monitor::detect_monitors().context("monitor enumeration failed")?;

    Display::show_startup(&schedule, &monitors, watch.enabled);

    let watcher: Option<LockWatcherHandle> = if watch.enabled {
        Some(LockWatcher::new(Duration::from_secs(watch.poll_secs)).spawn())
    } else {
        None
    };
    let lock_events = watcher.as_ref().map(|handle| handle.events().clone());

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_flag.store(true, Ordering::Relaxed);
    })
    .context("failed to install Ctrl+C handler")?;

    // OverlayError wraps eframe::Error, which is not Send + Sync, so it
    // cannot convert into anyhow::Error via `?`; go through Display instead.
    overlay::run(schedule, monitors, lock_events, shutdown)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    if let Some(watcher) = watcher {
        watcher.stop();
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================
