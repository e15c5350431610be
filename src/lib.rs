//! eyebreak library
//!
//! This library provides the building blocks for the eyebreak CLI:
//! - Work/break session engine (pure state machine)
//! - Monitor enumeration via the OS display query
//! - Screen-lock polling with unlock-triggered work resets
//! - Full-screen break overlay on every monitor
//! - CLI command parsing and console output
//! - Optional TOML configuration file

pub mod cli;
pub mod config;
pub mod lock;
pub mod monitor;
pub mod overlay;
pub mod session;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, FileConfig};
pub use lock::{LockEvent, LockProbe, LockState, LockWatcher, LockWatcherHandle};
pub use monitor::{detect_monitors, Monitor, MonitorError};
pub use overlay::OverlayError;
pub use session::{SessionEngine, SessionEvent};
pub use types::{BreakSchedule, LockWatchSettings, SchedulePreset, SessionPhase};
