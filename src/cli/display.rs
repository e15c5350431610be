//! Console output for the eyebreak CLI.
//!
//! This module provides formatted output for:
//! - The startup banner (durations, detected monitors)
//! - Timestamped per-cycle lines
//! - Error messages

use chrono::Local;

use crate::monitor::Monitor;
use crate::types::BreakSchedule;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the startup banner.
    pub fn show_startup(schedule: &BreakSchedule, monitors: &[Monitor], watch_lock: bool) {
        println!("============================================================");
        println!("eyebreak started");
        println!("  Work interval:  {}", Self::format_duration(schedule.work_secs));
        println!("  Break interval: {}", Self::format_duration(schedule.break_secs));
        println!(
            "  Unlock reset:   {}",
            if watch_lock { "enabled" } else { "disabled" }
        );
        println!("  Monitors detected: {}", monitors.len());
        for (index, monitor) in monitors.iter().enumerate() {
            let primary = if monitor.is_primary { " (primary)" } else { "" };
            println!(
                "    Monitor {}: {} {}{}",
                index + 1,
                monitor.name,
                monitor.geometry(),
                primary
            );
        }
        println!("============================================================");
        println!();
        println!("Press Ctrl+C to quit");
        println!();
    }

    /// Shows the monitor list (for the `monitors` subcommand).
    pub fn show_monitors(monitors: &[Monitor]) {
        println!("Monitors detected: {}", monitors.len());
        for (index, monitor) in monitors.iter().enumerate() {
            let primary = if monitor.is_primary { " (primary)" } else { "" };
            println!(
                "  Monitor {}: {} {}{}",
                index + 1,
                monitor.name,
                monitor.geometry(),
                primary
            );
        }
    }

    /// Shows the start of a work interval.
    pub fn show_cycle_start(cycle: u32) {
        println!("[{}] Cycle {}: working...", Self::timestamp(), cycle);
    }

    /// Shows the start of a mandatory break.
    pub fn show_break_start() {
        println!("[{}] MANDATORY BREAK", Self::timestamp());
    }

    /// Shows the end of a break.
    pub fn show_break_complete() {
        println!("[{}] Break complete", Self::timestamp());
        println!();
    }

    /// Shows that an unlock restarted the work timer.
    pub fn show_unlock_reset(work_secs: u64) {
        println!(
            "[{}] Screen unlocked, work timer restarted ({})",
            Self::timestamp(),
            Self::format_duration(work_secs)
        );
    }

    /// Shows the farewell message on shutdown.
    pub fn show_farewell() {
        println!();
        println!("eyebreak stopped. Take care of your eyes!");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Current local time as `HH:MM:SS`.
    fn timestamp() -> String {
        Local::now().format("%H:%M:%S").to_string()
    }

    /// Formats a duration in seconds as `Nm` / `Ns` / `NmMs`.
    fn format_duration(total_seconds: u64) -> String {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        match (minutes, seconds) {
            (0, s) => format!("{}s", s),
            (m, 0) => format!("{}m", m),
            (m, s) => format!("{}m{:02}s", m, s),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
