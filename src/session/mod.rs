//! The work/break phase loop.
//!
//! [`SessionEngine`] is a pure state machine over two phases. It holds no
//! threads and never reads the wall clock: the caller passes `Instant`s in,
//! which keeps every transition unit testable. The overlay event loop drives
//! it by calling [`SessionEngine::advance`] a few times per second.

use std::time::{Duration, Instant};

use crate::types::{BreakSchedule, SessionPhase};

// ============================================================================
// SessionEvent
// ============================================================================

/// Phase transitions reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A work interval ended; the break overlay should appear.
    BreakStarted {
        /// Cycle number of the work interval that just finished
        cycle: u32,
    },
    /// A break ended; the overlay should disappear and work resumes.
    BreakFinished {
        /// Cycle number of the work interval that is starting
        cycle: u32,
    },
}

// ============================================================================
// SessionEngine
// ============================================================================

/// Alternates work and break phases against a fixed schedule.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    schedule: BreakSchedule,
    phase: SessionPhase,
    /// 1-based count of work intervals, including the current one
    cycle: u32,
    phase_ends_at: Instant,
}

impl SessionEngine {
    /// Creates an engine starting its first work interval at `now`.
    pub fn new(schedule: BreakSchedule, now: Instant) -> Self {
        Self {
            schedule,
            phase: SessionPhase::Working,
            cycle: 1,
            phase_ends_at: now + schedule.work_duration(),
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the current cycle number.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Returns the schedule the engine runs on.
    pub fn schedule(&self) -> BreakSchedule {
        self.schedule
    }

    /// Returns the time left in the current phase.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.phase_ends_at.saturating_duration_since(now)
    }

    /// Returns the countdown value to display, in whole seconds.
    ///
    /// Rounds up so a fresh break shows the full duration and the label
    /// never reads 0 while the overlay is still up.
    pub fn countdown_secs(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Advances the engine to `now`, performing at most one transition.
    ///
    /// Returns the transition that happened, if any.
    pub fn advance(&mut self, now: Instant) -> Option<SessionEvent> {
        if now < self.phase_ends_at {
            return None;
        }

        match self.phase {
            SessionPhase::Working => {
                self.phase = SessionPhase::Breaking;
                self.phase_ends_at = now + self.schedule.break_duration();
                Some(SessionEvent::BreakStarted { cycle: self.cycle })
            }
            SessionPhase::Breaking => {
                self.phase = SessionPhase::Working;
                self.cycle += 1;
                self.phase_ends_at = now + self.schedule.work_duration();
                Some(SessionEvent::BreakFinished { cycle: self.cycle })
            }
        }
    }

    /// Restarts the work timer after a screen unlock.
    ///
    /// Only applies during a work interval: the user just came back, so the
    /// full work duration starts over. Unlocks during a break are ignored.
    /// Returns whether the timer was reset.
    pub fn notify_unlocked(&mut self, now: Instant) -> bool {
        match self.phase {
            SessionPhase::Working => {
                self.phase_ends_at = now + self.schedule.work_duration();
                true
            }
            SessionPhase::Breaking => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
