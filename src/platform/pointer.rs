//=========================================================================
// Pointer State
//
// Tracks the cursor for the two gestures the viewer knows about:
//
// - Dragging: while a button is held, the horizontal distance the cursor
//   traveled since the previous frame is handed to the scene's advance
//   step. The delta is measured per frame, not per move event, so a
//   burst of move events inside one frame collapses into a single value.
//
// - Double-clicking: two presses within a short time and small radius.
//   The second press is consumed by the detector and never reaches the
//   scene as an ordinary press.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== Constants ===========================================================

/// Maximum gap between two presses that still counts as a double-click.
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// Maximum distance in pixels between two presses of a double-click.
const DOUBLE_CLICK_RADIUS: f32 = 10.0;

//=== PointerTracker ======================================================

/// Cursor position and drag state, sampled once per frame.
pub(crate) struct PointerTracker {
    current: (f32, f32),
    previous: (f32, f32),
    pressed: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            current: (0.0, 0.0),
            previous: (0.0, 0.0),
            pressed: false,
        }
    }

    //--- Event Updates ----------------------------------------------------

    /// Records the latest cursor position from a move event.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.current = (x, y);
    }

    /// Begins a drag: both anchors snap to the press position so the
    /// first frame of the drag reports a zero delta.
    pub fn press(&mut self, x: f32, y: f32) {
        self.pressed = true;
        self.current = (x, y);
        self.previous = (x, y);
    }

    /// Ends the drag.
    pub fn release(&mut self) {
        self.pressed = false;
    }

    //--- Queries ----------------------------------------------------------

    /// Last known cursor position.
    pub fn position(&self) -> (f32, f32) {
        self.current
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Horizontal distance traveled since the previous frame.
    ///
    /// Returns zero while no button is held. Consuming the delta moves
    /// the frame anchor forward, so each frame sees only its own motion.
    pub fn frame_delta_x(&mut self) -> f32 {
        if !self.pressed {
            return 0.0;
        }
        let delta = self.current.0 - self.previous.0;
        self.previous = self.current;
        delta
    }
}

//=== ClickTracker ========================================================

/// Detects double-clicks from a stream of press positions.
pub(crate) struct ClickTracker {
    last_press: Option<(Instant, (f32, f32))>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self { last_press: None }
    }

    /// Registers a press and reports whether it completed a double-click.
    ///
    /// A completing press clears the stored state, so a triple-click
    /// yields one double-click and then starts over.
    pub fn register_press(&mut self, now: Instant, x: f32, y: f32) -> bool {
        if let Some((at, (px, py))) = self.last_press {
            let close_in_time = now.saturating_duration_since(at) < DOUBLE_CLICK_WINDOW;
            let dist = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
            if close_in_time && dist < DOUBLE_CLICK_RADIUS {
                self.last_press = None;
                return true;
            }
        }
        self.last_press = Some((now, (x, y)));
        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //=====================================================================
    // PointerTracker Tests
    //=====================================================================

    #[test]
    fn delta_is_zero_while_released() {
        let mut tracker = PointerTracker::new();
        tracker.set_position(100.0, 50.0);
        tracker.set_position(180.0, 50.0);
        assert_eq!(
            tracker.frame_delta_x(),
            0.0,
            "Motion without a held button must not produce a drag delta"
        );
    }

    #[test]
    fn press_anchors_both_positions() {
        let mut tracker = PointerTracker::new();
        tracker.set_position(500.0, 300.0);
        tracker.press(500.0, 300.0);
        assert_eq!(
            tracker.frame_delta_x(),
            0.0,
            "Press frame must report zero delta"
        );
        assert!(tracker.is_pressed());
    }

    #[test]
    fn drag_reports_per_frame_delta() {
        let mut tracker = PointerTracker::new();
        tracker.press(100.0, 100.0);

        tracker.set_position(130.0, 100.0);
        assert_eq!(tracker.frame_delta_x(), 30.0);

        // Next frame: only new motion counts
        tracker.set_position(125.0, 100.0);
        assert_eq!(tracker.frame_delta_x(), -5.0);
    }

    #[test]
    fn stationary_drag_frame_reports_zero() {
        let mut tracker = PointerTracker::new();
        tracker.press(100.0, 100.0);
        tracker.set_position(150.0, 100.0);
        assert_eq!(tracker.frame_delta_x(), 50.0);
        assert_eq!(
            tracker.frame_delta_x(),
            0.0,
            "Consuming the delta must advance the anchor"
        );
    }

    #[test]
    fn release_stops_delta() {
        let mut tracker = PointerTracker::new();
        tracker.press(100.0, 100.0);
        tracker.set_position(200.0, 100.0);
        tracker.release();
        assert_eq!(tracker.frame_delta_x(), 0.0);
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn vertical_motion_does_not_affect_delta() {
        let mut tracker = PointerTracker::new();
        tracker.press(100.0, 100.0);
        tracker.set_position(100.0, 400.0);
        assert_eq!(tracker.frame_delta_x(), 0.0);
    }

    #[test]
    fn position_tracks_latest_move() {
        let mut tracker = PointerTracker::new();
        tracker.set_position(12.0, 34.0);
        assert_eq!(tracker.position(), (12.0, 34.0));
    }

    //=====================================================================
    // ClickTracker Tests
    //=====================================================================

    #[test]
    fn single_press_is_not_a_double_click() {
        let mut clicks = ClickTracker::new();
        assert!(!clicks.register_press(Instant::now(), 10.0, 10.0));
    }

    #[test]
    fn quick_nearby_presses_form_a_double_click() {
        let mut clicks = ClickTracker::new();
        let start = Instant::now();
        assert!(!clicks.register_press(start, 10.0, 10.0));
        assert!(clicks.register_press(start + Duration::from_millis(150), 12.0, 11.0));
    }

    #[test]
    fn slow_second_press_is_rejected() {
        let mut clicks = ClickTracker::new();
        let start = Instant::now();
        clicks.register_press(start, 10.0, 10.0);
        assert!(
            !clicks.register_press(start + Duration::from_millis(400), 10.0, 10.0),
            "Press outside the time window must not complete a double-click"
        );
    }

    #[test]
    fn distant_second_press_is_rejected() {
        let mut clicks = ClickTracker::new();
        let start = Instant::now();
        clicks.register_press(start, 10.0, 10.0);
        assert!(
            !clicks.register_press(start + Duration::from_millis(100), 60.0, 10.0),
            "Press outside the radius must not complete a double-click"
        );
    }

    #[test]
    fn press_exactly_at_radius_is_rejected() {
        let mut clicks = ClickTracker::new();
        let start = Instant::now();
        clicks.register_press(start, 0.0, 0.0);
        assert!(!clicks.register_press(
            start + Duration::from_millis(100),
            DOUBLE_CLICK_RADIUS,
            0.0
        ));
    }

    #[test]
    fn triple_click_yields_one_double_click() {
        let mut clicks = ClickTracker::new();
        let start = Instant::now();
        assert!(!clicks.register_press(start, 10.0, 10.0));
        assert!(clicks.register_press(start + Duration::from_millis(100), 10.0, 10.0));
        assert!(
            !clicks.register_press(start + Duration::from_millis(200), 10.0, 10.0),
            "The completing press must consume the stored state"
        );
    }

    #[test]
    fn rejected_press_starts_a_new_sequence() {
        let mut clicks = ClickTracker::new();
        let start = Instant::now();
        clicks.register_press(start, 10.0, 10.0);
        // Too far away: rejected, but becomes the new anchor
        clicks.register_press(start + Duration::from_millis(100), 500.0, 10.0);
        assert!(
            clicks.register_press(start + Duration::from_millis(200), 502.0, 10.0),
            "A rejected press must anchor the next double-click"
        );
    }
}
