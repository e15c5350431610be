//! The overlay event loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::cli::Display;
use crate::lock::LockEvent;
use crate::monitor::Monitor;
use crate::session::{SessionEngine, SessionEvent};
use crate::types::{BreakSchedule, SessionPhase};

use super::{
    OverlayError, COUNTDOWN_COLOR, COUNTDOWN_SIZE, PANEL_TINT, TITLE_COLOR, TITLE_SIZE,
    TITLE_TEXT,
};

/// How often the loop wakes to advance the engine while working.
const WORK_WAKE_INTERVAL: Duration = Duration::from_millis(250);

/// How often the loop repaints while the countdown is visible.
const BREAK_WAKE_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the overlay event loop until shutdown is requested.
///
/// Blocks the calling thread; the windowing backend requires the main
/// thread. `lock_events` is `None` when lock watching is disabled.
pub fn run(
    schedule: BreakSchedule,
    monitors: Vec<Monitor>,
    lock_events: Option<Receiver<LockEvent>>,
    shutdown: Arc<AtomicBool>,
) -> Result<(), OverlayError> {
    let primary = monitors.first().cloned().ok_or(OverlayError::NoMonitors)?;

    let engine = SessionEngine::new(schedule, Instant::now());
    Display::show_cycle_start(engine.cycle());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("eyebreak")
            .with_position(egui::pos2(primary.x as f32, primary.y as f32))
            .with_inner_size(egui::vec2(primary.width as f32, primary.height as f32))
            .with_decorations(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_visible(false),
        ..Default::default()
    };

    let app = BreakOverlay {
        engine,
        monitors,
        lock_events,
        shutdown,
        closing: false,
    };

    eframe::run_native("eyebreak", options, Box::new(|_cc| Ok(Box::new(app))))?;
    Ok(())
}

// ============================================================================
// BreakOverlay
// ============================================================================

/// The application driving both the session engine and the break panels.
struct BreakOverlay {
    engine: SessionEngine,
    /// Primary monitor first (see `monitor::detect_monitors`)
    monitors: Vec<Monitor>,
    lock_events: Option<Receiver<LockEvent>>,
    shutdown: Arc<AtomicBool>,
    closing: bool,
}

impl eframe::App for BreakOverlay {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        // Fully transparent backdrop; the panel frame supplies the tint.
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.shutdown.load(Ordering::Relaxed) {
            if !self.closing {
                self.closing = true;
                Display::show_farewell();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            return;
        }

        self.drain_lock_events();

        let now = Instant::now();
        if let Some(event) = self.engine.advance(now) {
            self.on_transition(ctx, event);
        }

        match self.engine.phase() {
            SessionPhase::Working => {
                // Root viewport stays hidden; just keep the clock moving.
                ctx.request_repaint_after(WORK_WAKE_INTERVAL);
            }
            SessionPhase::Breaking => {
                self.draw_primary_panel(ctx, now);
                self.draw_secondary_panels(ctx);

                if ctx.input(|i| i.viewport().close_requested()) {
                    // The break panel cannot be closed by the user.
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                }

                ctx.request_repaint_after(BREAK_WAKE_INTERVAL);
            }
        }
    }
}

impl BreakOverlay {
    /// Applies unlock events to the engine.
    fn drain_lock_events(&mut self) {
        let Some(events) = &self.lock_events else {
            return;
        };

        let mut unlocked = false;
        while let Ok(LockEvent::Unlocked) = events.try_recv() {
            unlocked = true;
        }

        if unlocked && self.engine.notify_unlocked(Instant::now()) {
            info!("screen unlocked, restarting work timer");
            Display::show_unlock_reset(self.engine.schedule().work_secs);
        }
    }

    /// Reacts to a phase transition: console output plus root viewport
    /// visibility.
    fn on_transition(&self, ctx: &egui::Context, event: SessionEvent) {
        match event {
            SessionEvent::BreakStarted { cycle } => {
                debug!(cycle, "work interval over, showing overlay");
                Display::show_break_start();

                let primary = &self.monitors[0];
                ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(
                    primary.x as f32,
                    primary.y as f32,
                )));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                    primary.width as f32,
                    primary.height as f32,
                )));
                ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            SessionEvent::BreakFinished { cycle } => {
                debug!(cycle, "break over, hiding overlay");
                ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
                Display::show_break_complete();
                Display::show_cycle_start(cycle);
            }
        }
    }

    /// Paints the primary panel: tinted background, title and countdown.
    fn draw_primary_panel(&self, ctx: &egui::Context, now: Instant) {
        let countdown = self.engine.countdown_secs(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(PANEL_TINT))
            .show(ctx, |ui| {
                let offset = ui.available_height() * 0.4;
                ui.vertical_centered(|ui| {
                    ui.add_space(offset);
                    ui.label(
                        egui::RichText::new(TITLE_TEXT)
                            .size(TITLE_SIZE)
                            .color(TITLE_COLOR),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(countdown.to_string())
                            .size(COUNTDOWN_SIZE)
                            .color(COUNTDOWN_COLOR),
                    );
                });
            });
    }

    /// Paints a bare tinted panel on every monitor except the primary.
    fn draw_secondary_panels(&self, ctx: &egui::Context) {
        for (index, monitor) in self.monitors.iter().enumerate().skip(1) {
            let id = egui::ViewportId::from_hash_of(("eyebreak-panel", index));
            let builder = egui::ViewportBuilder::default()
                .with_title("eyebreak")
                .with_position(egui::pos2(monitor.x as f32, monitor.y as f32))
                .with_inner_size(egui::vec2(monitor.width as f32, monitor.height as f32))
                .with_decorations(false)
                .with_transparent(true)
                .with_always_on_top();

            ctx.show_viewport_immediate(id, builder, |ctx, _class| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::new().fill(PANEL_TINT))
                    .show(ctx, |_ui| {});

                if ctx.input(|i| i.viewport().close_requested()) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                }
            });
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
