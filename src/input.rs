//! Terminal key handling.
//!
//! The simulation wants a level signal ("is the control held right now?")
//! but terminals deliver edge events. [`ControlState`] bridges the two:
//! presses and key repeats mark the control held, a release event clears it
//! when the terminal reports releases, and otherwise the hold expires some
//! time after the last press or repeat.

use crate::core::constants::{CONTROL_HOLD_MS, CONTROL_INITIAL_HOLD_MS};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// What a key means to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerInput {
    /// Start / jump.
    Control,
    Quit,
    Other,
}

/// Map a key event to a runner action.
pub fn map_key(key: &KeyEvent) -> RunnerInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return RunnerInput::Quit;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => RunnerInput::Control,
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') => RunnerInput::Control,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => RunnerInput::Quit,
        _ => RunnerInput::Other,
    }
}

/// Level-triggered view of the control key.
#[derive(Debug, Clone)]
pub struct ControlState {
    /// Set once the terminal has delivered a release event; from then on
    /// only releases end a hold.
    reports_releases: bool,
    held: bool,
    /// End of the current hold when releases are not reported.
    held_until: Option<Instant>,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            reports_releases: false,
            held: false,
            held_until: None,
        }
    }

    /// For terminals known to report key releases up front.
    pub fn with_release_events() -> Self {
        Self {
            reports_releases: true,
            ..Self::new()
        }
    }

    /// Feed a control key event observed at `now`.
    ///
    /// A press holds long enough to bridge the gap before auto-repeat kicks
    /// in; each repeat then extends the hold by a shorter window. A repeat
    /// never shortens a hold that is already running.
    pub fn handle_event(&mut self, kind: KeyEventKind, now: Instant) {
        let window = match kind {
            KeyEventKind::Press => CONTROL_INITIAL_HOLD_MS,
            KeyEventKind::Repeat => CONTROL_HOLD_MS,
            KeyEventKind::Release => {
                self.reports_releases = true;
                self.clear();
                return;
            }
        };
        let until = now + Duration::from_millis(window);
        self.held = true;
        self.held_until = Some(match self.held_until {
            Some(current) if kind == KeyEventKind::Repeat => current.max(until),
            _ => until,
        });
    }

    /// Whether the control counts as pressed at `now`.
    pub fn is_pressed(&self, now: Instant) -> bool {
        if !self.held {
            return false;
        }
        if self.reports_releases {
            return true;
        }
        self.held_until.is_some_and(|until| now < until)
    }

    /// Forget any hold, e.g. when the terminal loses focus.
    pub fn clear(&mut self) {
        self.held = false;
        self.held_until = None;
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(&key(KeyCode::Char(' '))), RunnerInput::Control);
        assert_eq!(map_key(&key(KeyCode::Up)), RunnerInput::Control);
        assert_eq!(map_key(&key(KeyCode::Char('w'))), RunnerInput::Control);
        assert_eq!(map_key(&key(KeyCode::Char('q'))), RunnerInput::Quit);
        assert_eq!(map_key(&key(KeyCode::Esc)), RunnerInput::Quit);
        assert_eq!(map_key(&key(KeyCode::Char('x'))), RunnerInput::Other);
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            RunnerInput::Quit
        );
    }

    #[test]
    fn test_press_expires_without_release_events() {
        let start = Instant::now();
        let mut control = ControlState::new();
        assert!(!control.is_pressed(start));

        control.handle_event(KeyEventKind::Press, start);
        assert!(control.is_pressed(start));
        assert!(control.is_pressed(start + Duration::from_millis(CONTROL_INITIAL_HOLD_MS - 1)));
        assert!(!control.is_pressed(start + Duration::from_millis(CONTROL_INITIAL_HOLD_MS)));
    }

    #[test]
    fn test_press_outlasts_auto_repeat_delay() {
        let start = Instant::now();
        let mut control = ControlState::new();
        control.handle_event(KeyEventKind::Press, start);

        // Typical OS auto-repeat delays fall between 250 and 500ms
        for ms in (0..=500).step_by(10) {
            assert!(control.is_pressed(start + Duration::from_millis(ms)), "gap at {ms}ms");
        }
    }

    #[test]
    fn test_repeat_extends_hold() {
        let start = Instant::now();
        let mut control = ControlState::new();
        control.handle_event(KeyEventKind::Press, start);
        let later = start + Duration::from_millis(CONTROL_INITIAL_HOLD_MS - 10);
        control.handle_event(KeyEventKind::Repeat, later);

        assert!(control.is_pressed(later + Duration::from_millis(CONTROL_HOLD_MS - 1)));
        assert!(!control.is_pressed(later + Duration::from_millis(CONTROL_HOLD_MS)));
    }

    #[test]
    fn test_early_repeat_keeps_initial_hold() {
        let start = Instant::now();
        let mut control = ControlState::new();
        control.handle_event(KeyEventKind::Press, start);
        control.handle_event(KeyEventKind::Repeat, start + Duration::from_millis(50));

        assert!(control.is_pressed(start + Duration::from_millis(CONTROL_INITIAL_HOLD_MS - 1)));
    }

    #[test]
    fn test_release_event_ends_hold_and_switches_mode() {
        let start = Instant::now();
        let mut control = ControlState::new();
        control.handle_event(KeyEventKind::Press, start);
        control.handle_event(KeyEventKind::Release, start + Duration::from_millis(10));
        assert!(!control.is_pressed(start + Duration::from_millis(11)));

        // Now that releases are reported, a press holds indefinitely
        control.handle_event(KeyEventKind::Press, start + Duration::from_millis(20));
        assert!(control.is_pressed(start + Duration::from_secs(5)));
    }

    #[test]
    fn test_clear() {
        let now = Instant::now();
        let mut control = ControlState::with_release_events();
        control.handle_event(KeyEventKind::Press, now);
        assert!(control.is_pressed(now));

        control.clear();
        assert!(!control.is_pressed(now));
    }
}
