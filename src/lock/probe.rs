//! Session lock-state queries.
//!
//! The primary query asks the GNOME ScreenSaver D-Bus service through
//! `gdbus`. When that yields nothing (other desktops, no session bus) a
//! fragile shell pipeline over `loginctl` is tried. Every failure mode -
//! spawn error, timeout, non-zero exit, unparseable output - collapses to
//! [`LockState::Unknown`]: lock detection is best effort and must never
//! take the timer down.

use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::{debug, trace};
use wait_timeout::ChildExt;

/// Upper bound on a single lock-state query.
const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Shell pipeline for the loginctl fallback. Fragile by design: it assumes
/// the first listed session is ours.
const LOGINCTL_FALLBACK: &str = "loginctl show-session \
    $(loginctl list-sessions --no-legend | awk 'NR==1 {print $1}') \
    --property=LockedHint --value";

// ============================================================================
// LockState
// ============================================================================

/// Result of one lock-state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// The session is locked
    Locked,
    /// The session is unlocked
    Unlocked,
    /// The query failed or gave an unparseable answer
    Unknown,
}

// ============================================================================
// LockProbe
// ============================================================================

/// A source of lock-state samples.
///
/// The watcher thread is generic over this trait so tests can script a
/// sequence of states instead of shelling out.
pub trait LockProbe: Send + 'static {
    /// Samples the current lock state.
    fn probe(&mut self) -> LockState;
}

/// The real probe: `gdbus` first, `loginctl` fallback.
#[derive(Debug, Default)]
pub struct SessionLockProbe;

impl LockProbe for SessionLockProbe {
    fn probe(&mut self) -> LockState {
        let state = query_gnome_screensaver();
        if state != LockState::Unknown {
            return state;
        }
        query_loginctl()
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Asks org.gnome.ScreenSaver whether the screen saver is active.
fn query_gnome_screensaver() -> LockState {
    let mut cmd = Command::new("gdbus");
    cmd.args([
        "call",
        "--session",
        "--dest",
        "org.gnome.ScreenSaver",
        "--object-path",
        "/org/gnome/ScreenSaver",
        "--method",
        "org.gnome.ScreenSaver.GetActive",
    ]);

    match run_query(cmd) {
        Some(output) => parse_gdbus_output(&output),
        None => LockState::Unknown,
    }
}

/// Shell-based fallback over loginctl's LockedHint.
fn query_loginctl() -> LockState {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", LOGINCTL_FALLBACK]);

    match run_query(cmd) {
        Some(output) => parse_loginctl_output(&output),
        None => LockState::Unknown,
    }
}

/// Runs a query command with a bounded wait, returning its stdout on
/// success. All failures are swallowed into `None`.
fn run_query(mut cmd: Command) -> Option<String> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| debug!("lock query spawn failed: {}", e))
        .ok()?;

    match child.wait_timeout(QUERY_TIMEOUT) {
        Ok(Some(status)) if status.success() => {
            let mut output = String::new();
            child.stdout.take()?.read_to_string(&mut output).ok()?;
            trace!(output = output.trim(), "lock query output");
            Some(output)
        }
        Ok(Some(status)) => {
            debug!(?status, "lock query exited non-zero");
            None
        }
        Ok(None) => {
            debug!("lock query timed out, killing");
            let _ = child.kill();
            let _ = child.wait();
            None
        }
        Err(e) => {
            debug!("lock query wait failed: {}", e);
            None
        }
    }
}

/// Parses `gdbus call` output of the form `(true,)` / `(false,)`.
pub(crate) fn parse_gdbus_output(output: &str) -> LockState {
    match output.trim() {
        "(true,)" => LockState::Locked,
        "(false,)" => LockState::Unlocked,
        _ => LockState::Unknown,
    }
}

/// Parses a `LockedHint` value of `yes` / `no`.
pub(crate) fn parse_loginctl_output(output: &str) -> LockState {
    match output.trim() {
        "yes" => LockState::Locked,
        "no" => LockState::Unlocked,
        _ => LockState::Unknown,
    }
}

// ============================================================================
// Tests
// ============================================================================
