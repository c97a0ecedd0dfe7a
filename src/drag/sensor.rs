use std::time::Instant;

use tracing::debug;

use crate::model::{ActivationConstraint, KeyboardCodes, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

/// What produced a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressSource {
    Mouse(MouseButton),
    /// Number of touch points on the surface when the touch started
    Touch { touches: usize },
}

impl PressSource {
    /// Right clicks open context menus and pinches zoom; neither drags.
    fn can_drag(self) -> bool {
        match self {
            PressSource::Mouse(button) => button != MouseButton::Secondary,
            PressSource::Touch { touches } => touches <= 1,
        }
    }
}

/// Result of feeding an event to a `PointerActivation`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// No press is being tracked
    Idle,
    /// Press recorded, constraint not met yet
    Pending,
    /// The press has just become a drag
    Activated,
    /// Already dragging
    Dragging,
    /// The press moved too far before activating and was dropped
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Pending { origin: Point, pressed_at: Instant },
    Dragging,
}

/// Turns a mouse or touch press into a drag according to an
/// `ActivationConstraint`.
///
/// The host feeds it presses, moves and clock ticks. A pending press
/// activates once it moves further than `distance`, or once `delay` has
/// passed while it stayed within `tolerance`. Moving beyond `tolerance`
/// first aborts it.
#[derive(Debug, Clone)]
pub struct PointerActivation {
    constraint: ActivationConstraint,
    state: State,
}

impl PointerActivation {
    pub fn new(constraint: ActivationConstraint) -> Self {
        PointerActivation {
            constraint,
            state: State::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state == State::Dragging
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    /// Record a press. Returns false, leaving the sensor idle, when the
    /// press can never start a drag: a right click, a multi-touch, or a
    /// press inside an opt-out region.
    pub fn press(
        &mut self,
        source: PressSource,
        at: Point,
        in_no_dnd_region: bool,
        now: Instant,
    ) -> bool {
        if !source.can_drag() || in_no_dnd_region || !at.is_finite() {
            debug!(?source, in_no_dnd_region, "press ignored");
            self.state = State::Idle;
            return false;
        }
        self.state = State::Pending {
            origin: at,
            pressed_at: now,
        };
        true
    }

    pub fn moved(&mut self, to: Point, now: Instant) -> Activation {
        let State::Pending { origin, .. } = self.state else {
            return self.settled();
        };
        let delta = origin.distance_to(to);
        if delta > self.constraint.tolerance {
            self.state = State::Idle;
            return Activation::Aborted;
        }
        if delta > self.constraint.distance {
            return self.activate();
        }
        self.tick(now)
    }

    /// Advance the clock; activates a pending press whose delay has passed.
    pub fn tick(&mut self, now: Instant) -> Activation {
        let State::Pending { pressed_at, .. } = self.state else {
            return self.settled();
        };
        if now.saturating_duration_since(pressed_at) >= self.constraint.delay() {
            return self.activate();
        }
        Activation::Pending
    }

    /// Release the press. Returns true if a drag was in progress, which the
    /// host then ends.
    pub fn release(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.state = State::Idle;
        was_dragging
    }

    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    fn activate(&mut self) -> Activation {
        debug!("pointer drag activated");
        self.state = State::Dragging;
        Activation::Activated
    }

    fn settled(&self) -> Activation {
        match self.state {
            State::Dragging => Activation::Dragging,
            State::Pending { .. } => Activation::Pending,
            State::Idle => Activation::Idle,
        }
    }
}

/// What a key press means to a keyboard drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Start,
    End,
    Cancel,
}

/// Where a key press landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyTarget {
    /// The event targets the draggable's activator element itself rather
    /// than something nested inside it (a text field, a menu button)
    pub is_activator: bool,
    pub in_no_dnd_region: bool,
}

impl KeyboardCodes {
    /// Classify a key code given whether a keyboard drag is running.
    ///
    /// Idle, only start codes count. While dragging, end codes win over
    /// cancel codes when a code is configured as both.
    pub fn classify(&self, code: &str, dragging: bool) -> Option<KeyAction> {
        let has = |codes: &[String]| codes.iter().any(|c| c == code);
        if !dragging {
            return has(&self.start).then_some(KeyAction::Start);
        }
        if has(&self.end) {
            Some(KeyAction::End)
        } else if has(&self.cancel) {
            Some(KeyAction::Cancel)
        } else {
            None
        }
    }

    /// Full keyboard activation check: a start code only starts a drag when
    /// it targets the activator and is outside every opt-out region.
    pub fn key_down(&self, code: &str, dragging: bool, target: KeyTarget) -> Option<KeyAction> {
        let action = self.classify(code, dragging)?;
        if action == KeyAction::Start && (!target.is_activator || target.in_no_dnd_region) {
            return None;
        }
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sensor() -> PointerActivation {
        PointerActivation::new(ActivationConstraint::default())
    }

    fn primary() -> PressSource {
        PressSource::Mouse(MouseButton::Primary)
    }

    #[test]
    fn activates_after_delay() {
        let t0 = Instant::now();
        let mut s = sensor();
        assert!(s.press(primary(), Point::new(0.0, 0.0), false, t0));
        assert_eq!(s.tick(t0 + Duration::from_millis(100)), Activation::Pending);
        assert_eq!(s.tick(t0 + Duration::from_millis(250)), Activation::Activated);
        assert!(s.is_dragging());
        assert_eq!(s.tick(t0 + Duration::from_millis(300)), Activation::Dragging);
    }

    #[test]
    fn activates_on_distance() {
        let t0 = Instant::now();
        let mut s = sensor();
        s.press(primary(), Point::new(10.0, 10.0), false, t0);
        assert_eq!(s.moved(Point::new(12.0, 10.0), t0), Activation::Pending);
        assert_eq!(s.moved(Point::new(14.0, 10.0), t0), Activation::Activated);
    }

    #[test]
    fn moving_past_tolerance_aborts() {
        let t0 = Instant::now();
        let mut s = sensor();
        s.press(primary(), Point::new(0.0, 0.0), false, t0);
        assert_eq!(s.moved(Point::new(8.0, 8.0), t0), Activation::Aborted);
        assert!(!s.is_pending());
        assert_eq!(s.tick(t0 + Duration::from_secs(1)), Activation::Idle);
    }

    #[test]
    fn right_click_and_multi_touch_never_drag() {
        let t0 = Instant::now();
        let mut s = sensor();
        let origin = Point::new(0.0, 0.0);
        assert!(!s.press(PressSource::Mouse(MouseButton::Secondary), origin, false, t0));
        assert!(!s.press(PressSource::Touch { touches: 2 }, origin, false, t0));
        assert_eq!(s.tick(t0 + Duration::from_secs(1)), Activation::Idle);
        assert!(s.press(PressSource::Touch { touches: 1 }, origin, false, t0));
    }

    #[test]
    fn opt_out_region_never_drags() {
        let t0 = Instant::now();
        let mut s = sensor();
        assert!(!s.press(primary(), Point::new(0.0, 0.0), true, t0));
        assert_eq!(s.moved(Point::new(5.0, 0.0), t0), Activation::Idle);
    }

    #[test]
    fn release_reports_active_drag() {
        let t0 = Instant::now();
        let mut s = sensor();
        s.press(primary(), Point::new(0.0, 0.0), false, t0);
        assert!(!s.release());
        s.press(primary(), Point::new(0.0, 0.0), false, t0);
        s.tick(t0 + Duration::from_millis(250));
        assert!(s.release());
        assert!(!s.is_dragging());
    }

    #[test]
    fn keyboard_classification() {
        let codes = KeyboardCodes::default();
        assert_eq!(codes.classify("Space", false), Some(KeyAction::Start));
        assert_eq!(codes.classify("Escape", false), None);
        assert_eq!(codes.classify("Enter", true), Some(KeyAction::End));
        assert_eq!(codes.classify("Escape", true), Some(KeyAction::Cancel));
        assert_eq!(codes.classify("KeyA", true), None);
    }

    #[test]
    fn keyboard_start_requires_activator_target() {
        let codes = KeyboardCodes::default();
        let activator = KeyTarget {
            is_activator: true,
            in_no_dnd_region: false,
        };
        assert_eq!(codes.key_down("Enter", false, activator), Some(KeyAction::Start));
        assert_eq!(codes.key_down("Enter", false, KeyTarget::default()), None);
        let opted_out = KeyTarget {
            in_no_dnd_region: true,
            ..activator
        };
        assert_eq!(codes.key_down("Space", false, opted_out), None);
        // ending is not tied to the activator
        assert_eq!(codes.key_down("Space", true, KeyTarget::default()), Some(KeyAction::End));
    }
}
