//! Held-button tracking for terminal environments.
//!
//! Many terminals only report key presses (plus auto-repeat), never releases.
//! [`ButtonLatch`] treats a button as held until either a release event
//! arrives or no press/repeat for it has been seen for the release timeout.
//! Time is passed in by the caller in milliseconds so the latch is fully
//! deterministic.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::Buttons;

/// Long enough to bridge the gap before a terminal's key auto-repeat starts.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

const BUTTON_COUNT: usize = u16::BITS as usize;

#[derive(Debug, Clone)]
pub struct ButtonLatch {
    held: Buttons,
    last_press_ms: [u64; BUTTON_COUNT],
    release_timeout_ms: u64,
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonLatch {
    pub fn new() -> Self {
        Self {
            held: Buttons::empty(),
            last_press_ms: [0; BUTTON_COUNT],
            release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn release_timeout_ms(&self) -> u64 {
        self.release_timeout_ms
    }

    pub fn press(&mut self, buttons: Buttons, now_ms: u64) {
        for button in buttons.iter() {
            self.last_press_ms[button.bits().trailing_zeros() as usize] = now_ms;
        }
        self.held |= buttons;
    }

    pub fn release(&mut self, buttons: Buttons) {
        self.held &= !buttons;
    }

    /// Feed one terminal key event. Returns the buttons it mapped to.
    pub fn handle_key_event(&mut self, key: KeyEvent, now_ms: u64) -> Buttons {
        let buttons = map_key(key);
        if buttons.is_empty() {
            return buttons;
        }
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(buttons, now_ms),
            KeyEventKind::Release => self.release(buttons),
        }
        buttons
    }

    /// Buttons held at `now_ms`, after expiring any that timed out.
    pub fn held(&mut self, now_ms: u64) -> Buttons {
        let held = self.held;
        for button in held.iter() {
            let last = self.last_press_ms[button.bits().trailing_zeros() as usize];
            if now_ms.saturating_sub(last) > self.release_timeout_ms {
                self.held.remove(button);
            }
        }
        self.held
    }

    pub fn clear(&mut self) {
        self.held = Buttons::empty();
    }
}
