//! Core data types for eyebreak.
//!
//! This module defines the data structures shared across the program:
//! - Schedule presets (normal, 20-20-20 rule, test mode)
//! - The resolved work/break schedule with validation
//! - The resolved lock-watching settings with validation
//! - The session phase enum

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::FileConfig;
use crate::lock::DEFAULT_POLL_SECS;

// ============================================================================
// SchedulePreset
// ============================================================================

/// Built-in work/break duration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePreset {
    /// 10 minutes of work, 30 seconds of break
    Normal,
    /// The 20-20-20 rule: 20 minutes of work, 20 seconds of break
    TwentyTwentyTwenty,
    /// 5 seconds of work, 5 seconds of break (quick smoke mode)
    Test,
}

impl SchedulePreset {
    /// Returns the work duration of this preset in seconds.
    pub fn work_secs(&self) -> u64 {
        match self {
            SchedulePreset::Normal => 10 * 60,
            SchedulePreset::TwentyTwentyTwenty => 20 * 60,
            SchedulePreset::Test => 5,
        }
    }

    /// Returns the break duration of this preset in seconds.
    pub fn break_secs(&self) -> u64 {
        match self {
            SchedulePreset::Normal => 30,
            SchedulePreset::TwentyTwentyTwenty => 20,
            SchedulePreset::Test => 5,
        }
    }

    /// Returns the string representation of the preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulePreset::Normal => "normal",
            SchedulePreset::TwentyTwentyTwenty => "20-20-20",
            SchedulePreset::Test => "test",
        }
    }
}

impl Default for SchedulePreset {
    fn default() -> Self {
        SchedulePreset::Normal
    }
}

// ============================================================================
// BreakSchedule
// ============================================================================

/// Valid range for the work duration in seconds.
pub const WORK_SECS_RANGE: std::ops::RangeInclusive<u64> = 5..=14_400;

/// Valid range for the break duration in seconds.
pub const BREAK_SECS_RANGE: std::ops::RangeInclusive<u64> = 5..=3_600;

/// The resolved work/break schedule driving the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakSchedule {
    /// Work phase duration in seconds
    pub work_secs: u64,
    /// Break phase duration in seconds
    pub break_secs: u64,
}

impl Default for BreakSchedule {
    fn default() -> Self {
        Self::from_preset(SchedulePreset::Normal)
    }
}

impl BreakSchedule {
    /// Creates a schedule from a preset.
    pub fn from_preset(preset: SchedulePreset) -> Self {
        Self {
            work_secs: preset.work_secs(),
            break_secs: preset.break_secs(),
        }
    }

    /// Resolves the effective schedule from CLI inputs and the config file.
    ///
    /// Precedence, strongest first: explicit per-duration overrides, a preset
    /// flag, config file values, built-in defaults.
    pub fn resolve(
        preset: Option<SchedulePreset>,
        work_override: Option<u64>,
        break_override: Option<u64>,
        file: Option<&FileConfig>,
    ) -> Self {
        let base = match (preset, file) {
            (Some(p), _) => Self::from_preset(p),
            (None, Some(cfg)) => Self {
                work_secs: cfg.work_seconds.unwrap_or_else(|| SchedulePreset::Normal.work_secs()),
                break_secs: cfg
                    .break_seconds
                    .unwrap_or_else(|| SchedulePreset::Normal.break_secs()),
            },
            (None, None) => Self::default(),
        };

        Self {
            work_secs: work_override.unwrap_or(base.work_secs),
            break_secs: break_override.unwrap_or(base.break_secs),
        }
    }

    /// Validates the schedule.
    ///
    /// Returns an error message if a duration is out of range.
    pub fn validate(&self) -> Result<(), String> {
        if !WORK_SECS_RANGE.contains(&self.work_secs) {
            return Err(format!(
                "work duration must be {}-{} seconds, got {}",
                WORK_SECS_RANGE.start(),
                WORK_SECS_RANGE.end(),
                self.work_secs
            ));
        }
        if !BREAK_SECS_RANGE.contains(&self.break_secs) {
            return Err(format!(
                "break duration must be {}-{} seconds, got {}",
                BREAK_SECS_RANGE.start(),
                BREAK_SECS_RANGE.end(),
                self.break_secs
            ));
        }
        Ok(())
    }

    /// Returns the work duration.
    pub fn work_duration(&self) -> Duration {
        Duration::from_secs(self.work_secs)
    }

    /// Returns the break duration.
    pub fn break_duration(&self) -> Duration {
        Duration::from_secs(self.break_secs)
    }
}

// ============================================================================
// LockWatchSettings
// ============================================================================

/// Valid range for the lock poll interval in seconds.
pub const POLL_SECS_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

/// The resolved lock-watching settings for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockWatchSettings {
    /// Whether the unlock watcher runs at all
    pub enabled: bool,
    /// Poll interval in seconds
    pub poll_secs: u64,
}

impl LockWatchSettings {
    /// Resolves the effective settings from CLI inputs and the config file.
    ///
    /// `--no-lock-watch` always wins; otherwise the config file can turn
    /// watching off. The poll interval follows the same precedence as the
    /// schedule: explicit flag, then config file, then the default.
    pub fn resolve(
        no_lock_watch: bool,
        poll_override: Option<u64>,
        file: Option<&FileConfig>,
    ) -> Self {
        let enabled = !no_lock_watch && file.and_then(|cfg| cfg.watch_lock).unwrap_or(true);
        let poll_secs = poll_override
            .or_else(|| file.and_then(|cfg| cfg.lock_poll_seconds))
            .unwrap_or(DEFAULT_POLL_SECS);
        Self { enabled, poll_secs }
    }

    /// Validates the poll interval.
    ///
    /// The CLI flag is range-checked by clap; this catches out-of-range
    /// values coming from the config file. An interval of 0 would make the
    /// watcher loop without sleeping, spawning one query subprocess per
    /// iteration.
    pub fn validate(&self) -> Result<(), String> {
        if !POLL_SECS_RANGE.contains(&self.poll_secs) {
            return Err(format!(
                "lock poll interval must be {}-{} seconds, got {}",
                POLL_SECS_RANGE.start(),
                POLL_SECS_RANGE.end(),
                self.poll_secs
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SessionPhase
// ============================================================================

/// Represents the current phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Work interval: no overlay is shown
    Working,
    /// Break interval: the overlay covers every monitor
    Breaking,
}

impl SessionPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Working => "working",
            SessionPhase::Breaking => "breaking",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // SchedulePreset Tests
    // ------------------------------------------------------------------------

    mod preset_tests {
        use super::*;

        #[test]
        fn test_default_is_normal() {
            assert_eq!(SchedulePreset::default(), SchedulePreset::Normal);
        }

        #[test]
        fn test_normal_durations() {
            assert_eq!(SchedulePreset::Normal.work_secs(), 600);
            assert_eq!(SchedulePreset::Normal.break_secs(), 30);
        }

        #[test]
        fn test_twenty_durations() {
            assert_eq!(SchedulePreset::TwentyTwentyTwenty.work_secs(), 1200);
            assert_eq!(SchedulePreset::TwentyTwentyTwenty.break_secs(), 20);
        }

        #[test]
        fn test_test_durations() {
            assert_eq!(SchedulePreset::Test.work_secs(), 5);
            assert_eq!(SchedulePreset::Test.break_secs(), 5);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(SchedulePreset::Normal.as_str(), "normal");
            assert_eq!(SchedulePreset::TwentyTwentyTwenty.as_str(), "20-20-20");
            assert_eq!(SchedulePreset::Test.as_str(), "test");
        }

        #[test]
        fn test_all_presets_are_valid_schedules() {
            for preset in [
                SchedulePreset::Normal,
                SchedulePreset::TwentyTwentyTwenty,
                SchedulePreset::Test,
            ] {
                assert!(
                    BreakSchedule::from_preset(preset).validate().is_ok(),
                    "preset {} out of range",
                    preset.as_str()
                );
            }
        }
    }

    // ------------------------------------------------------------------------
    // BreakSchedule Tests
    // ------------------------------------------------------------------------

    mod schedule_tests {
        use super::*;

        #[test]
        fn test_default_matches_normal_preset() {
            let schedule = BreakSchedule::default();
            assert_eq!(schedule.work_secs, 600);
            assert_eq!(schedule.break_secs, 30);
        }

        #[test]
        fn test_durations() {
            let schedule = BreakSchedule {
                work_secs: 120,
                break_secs: 15,
            };
            assert_eq!(schedule.work_duration(), Duration::from_secs(120));
            assert_eq!(schedule.break_duration(), Duration::from_secs(15));
        }

        #[test]
        fn test_validate_ok() {
            let schedule = BreakSchedule {
                work_secs: 600,
                break_secs: 30,
            };
            assert!(schedule.validate().is_ok());
        }

        #[test]
        fn test_validate_boundaries() {
            assert!(BreakSchedule {
                work_secs: 5,
                break_secs: 5
            }
            .validate()
            .is_ok());
            assert!(BreakSchedule {
                work_secs: 14_400,
                break_secs: 3_600
            }
            .validate()
            .is_ok());
        }

        #[test]
        fn test_validate_work_too_low() {
            let schedule = BreakSchedule {
                work_secs: 4,
                break_secs: 30,
            };
            let err = schedule.validate().unwrap_err();
            assert!(err.contains("work duration"));
        }

        #[test]
        fn test_validate_work_too_high() {
            let schedule = BreakSchedule {
                work_secs: 14_401,
                break_secs: 30,
            };
            assert!(schedule.validate().is_err());
        }

        #[test]
        fn test_validate_break_too_low() {
            let schedule = BreakSchedule {
                work_secs: 600,
                break_secs: 4,
            };
            let err = schedule.validate().unwrap_err();
            assert!(err.contains("break duration"));
        }

        #[test]
        fn test_validate_break_too_high() {
            let schedule = BreakSchedule {
                work_secs: 600,
                break_secs: 3_601,
            };
            assert!(schedule.validate().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Resolution Tests
    // ------------------------------------------------------------------------

    mod resolve_tests {
        use super::*;

        fn file_config(work: Option<u64>, brk: Option<u64>) -> FileConfig {
            FileConfig {
                work_seconds: work,
                break_seconds: brk,
                ..FileConfig::default()
            }
        }

        #[test]
        fn test_resolve_defaults() {
            let schedule = BreakSchedule::resolve(None, None, None, None);
            assert_eq!(schedule, BreakSchedule::default());
        }

        #[test]
        fn test_resolve_preset() {
            let schedule =
                BreakSchedule::resolve(Some(SchedulePreset::Test), None, None, None);
            assert_eq!(schedule.work_secs, 5);
            assert_eq!(schedule.break_secs, 5);
        }

        #[test]
        fn test_resolve_file_overrides_defaults() {
            let cfg = file_config(Some(900), Some(45));
            let schedule = BreakSchedule::resolve(None, None, None, Some(&cfg));
            assert_eq!(schedule.work_secs, 900);
            assert_eq!(schedule.break_secs, 45);
        }

        #[test]
        fn test_resolve_partial_file_keeps_defaults() {
            let cfg = file_config(Some(900), None);
            let schedule = BreakSchedule::resolve(None, None, None, Some(&cfg));
            assert_eq!(schedule.work_secs, 900);
            assert_eq!(schedule.break_secs, 30);
        }

        #[test]
        fn test_resolve_preset_beats_file() {
            let cfg = file_config(Some(900), Some(45));
            let schedule = BreakSchedule::resolve(
                Some(SchedulePreset::TwentyTwentyTwenty),
                None,
                None,
                Some(&cfg),
            );
            assert_eq!(schedule.work_secs, 1200);
            assert_eq!(schedule.break_secs, 20);
        }

        #[test]
        fn test_resolve_explicit_beats_preset() {
            let schedule = BreakSchedule::resolve(
                Some(SchedulePreset::Normal),
                Some(300),
                None,
                None,
            );
            assert_eq!(schedule.work_secs, 300);
            assert_eq!(schedule.break_secs, 30);
        }

        #[test]
        fn test_resolve_explicit_beats_file() {
            let cfg = file_config(Some(900), Some(45));
            let schedule =
                BreakSchedule::resolve(None, Some(120), Some(10), Some(&cfg));
            assert_eq!(schedule.work_secs, 120);
            assert_eq!(schedule.break_secs, 10);
        }
    }

    // ------------------------------------------------------------------------
    // LockWatchSettings Tests
    // ------------------------------------------------------------------------

    mod lock_watch_tests {
        use super::*;

        fn file_config(
            poll: Option<u64>,
            watch: Option<bool>,
        ) -> FileConfig {
            FileConfig {
                lock_poll_seconds: poll,
                watch_lock: watch,
                ..FileConfig::default()
            }
        }

        #[test]
        fn test_resolve_defaults() {
            let settings = LockWatchSettings::resolve(false, None, None);
            assert!(settings.enabled);
            assert_eq!(settings.poll_secs, 5);
        }

        #[test]
        fn test_flag_disables_watching() {
            let settings = LockWatchSettings::resolve(true, None, None);
            assert!(!settings.enabled);
        }

        #[test]
        fn test_config_disables_watching() {
            let cfg = file_config(None, Some(false));
            let settings = LockWatchSettings::resolve(false, None, Some(&cfg));
            assert!(!settings.enabled);
        }

        #[test]
        fn test_flag_beats_config_enable() {
            let cfg = file_config(None, Some(true));
            let settings = LockWatchSettings::resolve(true, None, Some(&cfg));
            assert!(!settings.enabled);
        }

        #[test]
        fn test_config_poll_interval_used() {
            let cfg = file_config(Some(10), None);
            let settings = LockWatchSettings::resolve(false, None, Some(&cfg));
            assert_eq!(settings.poll_secs, 10);
        }

        #[test]
        fn test_explicit_poll_beats_config() {
            let cfg = file_config(Some(10), None);
            let settings = LockWatchSettings::resolve(false, Some(2), Some(&cfg));
            assert_eq!(settings.poll_secs, 2);
        }

        #[test]
        fn test_validate_ok() {
            let settings = LockWatchSettings {
                enabled: true,
                poll_secs: 5,
            };
            assert!(settings.validate().is_ok());
        }

        #[test]
        fn test_validate_boundaries() {
            for poll_secs in [1, 300] {
                let settings = LockWatchSettings {
                    enabled: true,
                    poll_secs,
                };
                assert!(settings.validate().is_ok(), "poll_secs {}", poll_secs);
            }
        }

        #[test]
        fn test_validate_rejects_zero() {
            let settings = LockWatchSettings {
                enabled: true,
                poll_secs: 0,
            };
            let err = settings.validate().unwrap_err();
            assert!(err.contains("lock poll interval"));
        }

        #[test]
        fn test_validate_rejects_too_high() {
            let settings = LockWatchSettings {
                enabled: true,
                poll_secs: 301,
            };
            assert!(settings.validate().is_err());
        }

        #[test]
        fn test_zero_poll_from_config_is_rejected() {
            // A config-sourced interval bypasses the CLI range check, so
            // validation has to catch it before the watcher spawns.
            let cfg = file_config(Some(0), None);
            let settings = LockWatchSettings::resolve(false, None, Some(&cfg));
            assert!(settings.validate().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // SessionPhase Tests
    // ------------------------------------------------------------------------

    mod phase_tests {
        use super::*;

        #[test]
        fn test_as_str() {
            assert_eq!(SessionPhase::Working.as_str(), "working");
            assert_eq!(SessionPhase::Breaking.as_str(), "breaking");
        }

        #[test]
        fn test_copy_and_eq() {
            let phase = SessionPhase::Breaking;
            let copied = phase;
            assert_eq!(phase, copied);
            assert_ne!(phase, SessionPhase::Working);
        }
    }
}
