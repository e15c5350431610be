//! The lock polling thread.
//!
//! Spawns one background thread that samples a [`LockProbe`] at a fixed
//! interval and pushes a [`LockEvent::Unlocked`] over a crossbeam channel
//! whenever it observes a Locked → Unlocked edge. `Unknown` samples never
//! participate in edge detection, so flaky queries cannot fake an unlock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, info, warn};

use super::probe::{LockProbe, LockState, SessionLockProbe};

/// Default poll interval in seconds.
pub const DEFAULT_POLL_SECS: u64 = 5;

/// Granularity of the stop-flag check while sleeping between polls.
const SLEEP_STEP: Duration = Duration::from_millis(250);

// ============================================================================
// LockEvent
// ============================================================================

/// Events emitted by the watcher thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockEvent {
    /// The session transitioned from locked to unlocked
    Unlocked,
}

// ============================================================================
// LockWatcher
// ============================================================================

/// Configuration for the polling thread.
#[derive(Debug, Clone)]
pub struct LockWatcher {
    poll_interval: Duration,
}

impl Default for LockWatcher {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
        }
    }
}

impl LockWatcher {
    /// Creates a watcher with the given poll interval.
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Spawns the polling thread with the real session probe.
    pub fn spawn(self) -> LockWatcherHandle {
        self.spawn_with_probe(SessionLockProbe)
    }

    /// Spawns the polling thread with a custom probe (test seam).
    pub fn spawn_with_probe<P: LockProbe>(self, mut probe: P) -> LockWatcherHandle {
        // Capacity 1 is enough: consecutive unlock edges collapse into one
        // reset anyway.
        let (tx, rx): (Sender<LockEvent>, Receiver<LockEvent>) = bounded(1);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let poll_interval = self.poll_interval;

        let thread = std::thread::Builder::new()
            .name("lock-watcher".to_string())
            .spawn(move || {
                info!(
                    interval_secs = poll_interval.as_secs(),
                    "lock watcher started"
                );
                let mut previous = LockState::Unknown;

                while !stop_flag.load(Ordering::Relaxed) {
                    let current = probe.probe();

                    if previous == LockState::Locked && current == LockState::Unlocked {
                        debug!("observed unlock transition");
                        if tx.send(LockEvent::Unlocked).is_err() {
                            // Receiver gone, nothing left to report to.
                            break;
                        }
                    }

                    if current != LockState::Unknown {
                        previous = current;
                    }

                    interruptible_sleep(poll_interval, &stop_flag);
                }
                debug!("lock watcher stopped");
            });

        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("failed to spawn lock watcher thread: {}", e);
                None
            }
        };

        LockWatcherHandle { events: rx, stop, thread }
    }
}

/// Sleeps for `total` in small steps so a raised stop flag is noticed fast.
fn interruptible_sleep(total: Duration, stop: &AtomicBool) {
    let mut remaining = total;
    while !remaining.is_zero() && !stop.load(Ordering::Relaxed) {
        let step = remaining.min(SLEEP_STEP);
        std::thread::sleep(step);
        remaining = remaining.saturating_sub(step);
    }
}

// ============================================================================
// LockWatcherHandle
// ============================================================================

/// Handle to a running watcher thread.
///
/// Dropping the handle stops the thread.
pub struct LockWatcherHandle {
    events: Receiver<LockEvent>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl LockWatcherHandle {
    /// Returns the event channel receiver.
    pub fn events(&self) -> &Receiver<LockEvent> {
        &self.events
    }

    /// Signals the thread to stop and waits for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for LockWatcherHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// A probe that replays a scripted sequence, then repeats its last state.
    struct ScriptedProbe {
        states: Vec<LockState>,
        index: usize,
    }

    impl ScriptedProbe {
        fn new(states: Vec<LockState>) -> Self {
            Self { states, index: 0 }
        }
    }

    impl LockProbe for ScriptedProbe {
        fn probe(&mut self) -> LockState {
            let state = self.states[self.index.min(self.states.len() - 1)];
            self.index += 1;
            state
        }
    }

    fn fast_watcher() -> LockWatcher {
        LockWatcher::new(Duration::from_millis(1))
    }

    #[test]
    fn test_unlock_edge_fires_event() {
        let probe = ScriptedProbe::new(vec![LockState::Locked, LockState::Unlocked]);
        let handle = fast_watcher().spawn_with_probe(probe);

        let event = handle
            .events()
            .recv_timeout(Duration::from_secs(2))
            .expect("expected an unlock event");
        assert_eq!(event, LockEvent::Unlocked);

        handle.stop();
    }

    #[test]
    fn test_no_event_while_stable_unlocked() {
        let probe = ScriptedProbe::new(vec![LockState::Unlocked]);
        let handle = fast_watcher().spawn_with_probe(probe);

        let result = handle.events().recv_timeout(Duration::from_millis(100));
        assert!(result.is_err(), "stable unlocked must not fire events");

        handle.stop();
    }

    #[test]
    fn test_unknown_does_not_complete_edge() {
        // Locked → Unknown → Unlocked is still one edge; but
        // Unknown → Unlocked alone (at startup) must not fire.
        let probe = ScriptedProbe::new(vec![LockState::Unknown, LockState::Unlocked]);
        let handle = fast_watcher().spawn_with_probe(probe);

        let result = handle.events().recv_timeout(Duration::from_millis(100));
        assert!(result.is_err(), "startup unlock must not fire events");

        handle.stop();
    }

    #[test]
    fn test_unknown_gap_preserves_edge() {
        let probe = ScriptedProbe::new(vec![
            LockState::Locked,
            LockState::Unknown,
            LockState::Unlocked,
        ]);
        let handle = fast_watcher().spawn_with_probe(probe);

        let event = handle
            .events()
            .recv_timeout(Duration::from_secs(2))
            .expect("edge across an Unknown gap should still fire");
        assert_eq!(event, LockEvent::Unlocked);

        handle.stop();
    }

    #[test]
    fn test_stop_joins_thread() {
        let probe = ScriptedProbe::new(vec![LockState::Unlocked]);
        let handle = LockWatcher::new(Duration::from_secs(60)).spawn_with_probe(probe);

        // Must return promptly despite the long poll interval.
        let started = std::time::Instant::now();
        handle.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_drop_stops_thread() {
        let probe = ScriptedProbe::new(vec![LockState::Locked]);
        let handle = fast_watcher().spawn_with_probe(probe);
        drop(handle);
    }
}
