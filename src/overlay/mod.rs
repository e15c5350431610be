//! Full-screen break overlay.
//!
//! One egui event loop owns the main thread for the whole program lifetime
//! and doubles as the driver of the session engine. During work the root
//! viewport stays hidden; during a break every monitor is covered by a
//! borderless, top-most, semi-transparent panel, with a countdown on the
//! primary monitor only.

pub mod app;

use thiserror::Error;

pub use app::run;

// ============================================================================
// OverlayError
// ============================================================================

/// Errors that can occur while running the overlay event loop.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The windowing backend failed to start or crashed.
    #[error("overlay event loop failed: {0}")]
    EventLoop(#[from] eframe::Error),

    /// No monitors were passed in, so there is nothing to cover.
    #[error("no monitors to cover")]
    NoMonitors,
}

// ============================================================================
// Fixed overlay look (not configurable, see Non-goals)
// ============================================================================

/// Overlay background: #1a1a1a at 92% opacity. The constructor takes
/// premultiplied components, so the gray is scaled by the alpha here.
pub(crate) const PANEL_TINT: egui::Color32 =
    egui::Color32::from_rgba_premultiplied(24, 24, 24, 235);

/// Title text color.
pub(crate) const TITLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xcc, 0xcc, 0xcc);

/// Countdown text color.
pub(crate) const COUNTDOWN_COLOR: egui::Color32 = egui::Color32::from_rgb(0x88, 0x88, 0x88);

/// Title text shown above the countdown.
pub(crate) const TITLE_TEXT: &str = "Time to rest your eyes";

/// Title font size in points.
pub(crate) const TITLE_SIZE: f32 = 28.0;

/// Countdown font size in points.
pub(crate) const COUNTDOWN_SIZE: f32 = 72.0;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod tint_tests {
        use super::*;

        #[test]
        fn test_panel_tint_alpha() {
            assert_eq!(PANEL_TINT.a(), 235);
        }

        #[test]
        fn test_panel_tint_unmultiplies_to_dark_gray() {
            // 24 / (235/255) rounds back to 0x1a on every channel.
            let [r, g, b, a] = PANEL_TINT.to_srgba_unmultiplied();
            assert_eq!((r, g, b), (0x1a, 0x1a, 0x1a));
            assert_eq!(a, 235);
        }
    }
}
