//! Screen-lock detection.
//!
//! A single background thread polls the session lock state every few
//! seconds and reports Locked → Unlocked transitions over a channel, so the
//! session loop can restart the work timer when the user comes back.
//!
//! - `probe`: the actual lock-state queries (GNOME ScreenSaver via `gdbus`,
//!   with a shell-based `loginctl` fallback)
//! - `watcher`: the polling thread and its channel handle

pub mod probe;
pub mod watcher;

pub use probe::{LockProbe, LockState, SessionLockProbe};
pub use watcher::{LockEvent, LockWatcher, LockWatcherHandle, DEFAULT_POLL_SECS};
