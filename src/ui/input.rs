/// Keyboard state tracker.
///
/// Drains all pending terminal events once per frame. Everything in
/// this game is edge-triggered (turns, menu moves, confirm), so only
/// fresh presses are tracked; repeats from the terminal's key-repeat
/// count as presses too, which is what menu scrolling wants.

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;

pub struct InputState {
    /// Keys pressed (or repeated) during the most recent drain.
    presses: Vec<KeyCode>,
    /// Raw key events from the drain, for modifier checks.
    raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            presses: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
        }
    }

    /// Drain all pending terminal events. Call once per frame, before
    /// the simulation tick.
    pub fn drain_events(&mut self) {
        self.presses.clear();
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Release {
                    self.presses.push(key.code);
                    self.raw_events.push(key);
                }
            }
        }
    }

    /// Was this key pressed this frame?
    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.presses.contains(&code)
    }

    /// Convenience: was any of these keys pressed?
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    /// Presses in arrival order, for handlers that care which came last.
    pub fn presses(&self) -> &[KeyCode] {
        &self.presses
    }

    /// Check if any raw event this frame has Ctrl+C
    pub fn ctrl_c_pressed(&self) -> bool {
        use crossterm::event::KeyModifiers;
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }
}
