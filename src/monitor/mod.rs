//! Monitor enumeration.
//!
//! Queries the OS for attached display geometries through the
//! `display-info` crate and normalizes the result: the primary monitor is
//! always first, and an empty display list is an error.

use display_info::DisplayInfo;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// MonitorError
// ============================================================================

/// Errors that can occur while enumerating monitors.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The display query itself failed (no session, no compositor, ...).
    #[error("failed to query displays: {0}")]
    Query(String),

    /// The query succeeded but reported no displays.
    #[error("no displays detected")]
    NoDisplays,
}

// ============================================================================
// Monitor
// ============================================================================

/// Geometry of one attached monitor, in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    /// OS name of the display (e.g. "eDP-1")
    pub name: String,
    /// Left edge of the monitor rectangle
    pub x: i32,
    /// Top edge of the monitor rectangle
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Whether the OS reports this as the primary monitor
    pub is_primary: bool,
}

impl Monitor {
    /// Formats the geometry like the startup banner expects:
    /// `1920x1080 @ (0, 0)`.
    pub fn geometry(&self) -> String {
        format!("{}x{} @ ({}, {})", self.width, self.height, self.x, self.y)
    }
}

impl From<&DisplayInfo> for Monitor {
    fn from(info: &DisplayInfo) -> Self {
        Self {
            name: info.name.clone(),
            x: info.x,
            y: info.y,
            width: info.width,
            height: info.height,
            is_primary: info.is_primary,
        }
    }
}

// ============================================================================
// Enumeration
// ============================================================================

/// Enumerates all attached monitors, primary first.
///
/// The monitor set is sampled once at startup; hotplug during a session is
/// not tracked.
///
/// # Errors
///
/// Returns [`MonitorError::Query`] if the display query fails and
/// [`MonitorError::NoDisplays`] if it reports an empty list.
pub fn detect_monitors() -> Result<Vec<Monitor>, MonitorError> {
    let displays = DisplayInfo::all().map_err(|e| MonitorError::Query(e.to_string()))?;
    let monitors = displays.iter().map(Monitor::from).collect::<Vec<_>>();
    debug!(count = monitors.len(), "enumerated displays");
    normalize(monitors)
}

/// Orders the primary monitor first and guarantees exactly one primary.
///
/// If the OS flags no monitor as primary, the first one is promoted.
fn normalize(mut monitors: Vec<Monitor>) -> Result<Vec<Monitor>, MonitorError> {
    if monitors.is_empty() {
        return Err(MonitorError::NoDisplays);
    }

    if let Some(pos) = monitors.iter().position(|m| m.is_primary) {
        monitors.swap(0, pos);
    } else {
        monitors[0].is_primary = true;
    }

    Ok(monitors)
}

// ============================================================================
// Tests
// ============================================================================
