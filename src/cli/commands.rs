//! Command definitions for the eyebreak CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::SchedulePreset;

// ============================================================================
// CLI Structure
// ============================================================================

/// eyebreak - enforced visual-rest breaks for Linux desktops
#[derive(Parser, Debug)]
#[command(
    name = "eyebreak",
    version,
    about = "Alternates work intervals with full-screen break overlays on every monitor",
    long_about = "A personal break reminder. During a break, every connected monitor is \
                  covered by an unclosable, semi-transparent overlay with a countdown, \
                  forcing your eyes off the screen. Unlocking the screen restarts the \
                  work timer, so you never get a break right after sitting down.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the work/break cycle
    Run(RunArgs),

    /// List detected monitors and their geometries
    Monitors,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Quick smoke mode: 5 seconds of work, 5 seconds of break
    #[arg(short, long, conflicts_with = "twenty")]
    pub test: bool,

    /// The 20-20-20 rule: 20 minutes of work, 20 seconds of break
    #[arg(long = "twenty", alias = "20-20-20", conflicts_with = "test")]
    pub twenty: bool,

    /// Work interval in seconds (overrides presets and config file)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u64).range(5..=14_400)
    )]
    pub work_secs: Option<u64>,

    /// Break interval in seconds (overrides presets and config file)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u64).range(5..=3_600)
    )]
    pub break_secs: Option<u64>,

    /// Disable screen-unlock detection
    #[arg(long)]
    pub no_lock_watch: bool,

    /// Lock poll interval in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub poll_secs: Option<u64>,

    /// Use an alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    /// Returns the preset selected by flags, if any.
    pub fn preset(&self) -> Option<SchedulePreset> {
        if self.test {
            Some(SchedulePreset::Test)
        } else if self.twenty {
            Some(SchedulePreset::TwentyTwentyTwenty)
        } else {
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
