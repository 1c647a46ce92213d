//=========================================================================
// Frame Clock
//
// Fixed-rate pacing for the redraw loop.
//
// The window repaints at a configured frame rate rather than on demand:
// the clock hands out the deadline for the next frame (fed to the event
// loop's wait-until control flow) and measures the delta time between
// consecutive ticks for the scene's advance step.
//
// Delta times are clamped: a frame that took longer than two intervals
// (debugger pause, window drag, system stall) reports exactly one
// interval instead, so scene animation steps stay bounded.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== FrameClock ==========================================================

/// Paces redraws at a fixed frame rate and measures per-frame delta time.
///
/// Time is injected through the `*_at` methods so the arithmetic stays
/// testable; the platform layer calls the `Instant::now()` wrappers.
pub(crate) struct FrameClock {
    /// Duration of one frame at the target rate.
    interval: Duration,

    /// Moment of the previous tick (None before the first frame).
    last_tick: Option<Instant>,

    /// Scheduled moment of the next frame (None until first queried).
    deadline: Option<Instant>,
}

impl FrameClock {
    //--- Construction -----------------------------------------------------

    /// Creates a clock targeting `fps` frames per second.
    ///
    /// The builder validates the rate; zero here is a programming error.
    pub fn new(fps: u32) -> Self {
        debug_assert!(fps > 0, "frame rate must be positive");
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(fps)),
            last_tick: None,
            deadline: None,
        }
    }

    /// Duration of a single frame at the target rate.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    //--- Delta Measurement ------------------------------------------------

    /// Marks a frame boundary and returns the elapsed time in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Marks a frame boundary at `now`.
    ///
    /// The first tick reports exactly one interval. A delta above two
    /// intervals is replaced by one interval (the stall clamp).
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let interval_secs = self.interval.as_secs_f32();

        let delta = match self.last_tick {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => interval_secs,
        };
        self.last_tick = Some(now);

        if delta > 2.0 * interval_secs {
            interval_secs
        } else {
            delta
        }
    }

    //--- Deadline Scheduling ----------------------------------------------

    /// The moment the next frame should fire.
    pub fn deadline(&mut self) -> Instant {
        self.deadline_at(Instant::now())
    }

    /// The moment the next frame should fire, given the current time.
    ///
    /// Initialized lazily to one interval from now; afterwards it stays
    /// fixed until [`FrameClock::advance_deadline_at`] moves it.
    pub fn deadline_at(&mut self, now: Instant) -> Instant {
        *self.deadline.get_or_insert(now + self.interval)
    }

    /// Schedules the next frame after the current deadline fired.
    pub fn advance_deadline(&mut self) -> Instant {
        self.advance_deadline_at(Instant::now())
    }

    /// Advances the deadline by one interval.
    ///
    /// If the nominal next deadline already lies in the past (the loop
    /// stalled for more than a frame), scheduling restarts at
    /// `now + interval` instead of burning frames to catch up.
    pub fn advance_deadline_at(&mut self, now: Instant) -> Instant {
        let next = match self.deadline {
            Some(previous) => {
                let nominal = previous + self.interval;
                if nominal <= now {
                    now + self.interval
                } else {
                    nominal
                }
            }
            None => now + self.interval,
        };
        self.deadline = Some(next);
        next
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
