//! Input synthesis: typed text, key sequences, pointer motion and
//! buttons.

use crate::display::{Display, Keycode};

use super::keyseq::{self, KeySequence};
use super::{Session, XdoError};

/// Outcome of `Session::type_text`.
///
/// Typing succeeds even when some characters have no keycode; those are
/// skipped and show up as `attempted - resolved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeReport {
    pub attempted: usize,
    pub resolved: usize,
}

impl<D: Display> Session<D> {
    /// Type `text` one character at a time.
    ///
    /// For each character: press the modifier if one is needed, press and
    /// release the key, release the modifier, flush. The next character
    /// starts only after that unit completes.
    pub fn type_text(&self, text: &str) -> Result<TypeReport, XdoError> {
        let mut report = TypeReport::default();

        for ch in text.chars() {
            report.attempted += 1;

            let Some(code) = self.charcodes.keycode_for(ch) else {
                tracing::warn!(character = ?ch, "no keycode types this character, skipping");
                continue;
            };
            let modifier = self.charcodes.modifier_for(ch);

            if let Some(modifier) = modifier {
                self.display.fake_key(modifier, true)?;
            }
            self.display.fake_key(code, true)?;
            self.display.fake_key(code, false)?;
            if let Some(modifier) = modifier {
                self.display.fake_key(modifier, false)?;
            }
            self.flush()?;

            report.resolved += 1;
        }

        Ok(report)
    }

    /// Resolve a key sequence against the current keyboard mapping.
    pub fn resolve_key_sequence(&self, sequence: &str) -> Result<KeySequence, XdoError> {
        let keymap = self.display.keymap()?;
        keyseq::resolve(&keymap, sequence)
    }

    /// Press every key of `sequence`, in order.
    pub fn key_down(&self, sequence: &str) -> Result<KeySequence, XdoError> {
        let keys = self.resolve_key_sequence(sequence)?;
        self.send_keys(keys.codes(), true)?;
        Ok(keys)
    }

    /// Release every key of `sequence`, in order.
    pub fn key_up(&self, sequence: &str) -> Result<KeySequence, XdoError> {
        let keys = self.resolve_key_sequence(sequence)?;
        self.send_keys(keys.codes(), false)?;
        Ok(keys)
    }

    /// Press all keys of `sequence`, then release all of them.
    pub fn key(&self, sequence: &str) -> Result<KeySequence, XdoError> {
        let keys = self.resolve_key_sequence(sequence)?;
        self.send_keys(keys.codes(), true)?;
        self.send_keys(keys.codes(), false)?;
        Ok(keys)
    }

    fn send_keys(&self, codes: &[Keycode], pressed: bool) -> Result<(), XdoError> {
        for &code in codes {
            self.display.fake_key(code, pressed)?;
        }
        self.flush()
    }

    /// Move the pointer to `(x, y)` on the current screen.
    pub fn mouse_move(&self, x: i32, y: i32) -> Result<(), XdoError> {
        self.display.fake_motion(x, y)?;
        self.flush()
    }

    pub fn mouse_down(&self, button: u8) -> Result<(), XdoError> {
        self.display.fake_button(button, true)?;
        self.flush()
    }

    pub fn mouse_up(&self, button: u8) -> Result<(), XdoError> {
        self.display.fake_button(button, false)?;
        self.flush()
    }

    /// Button down immediately followed by button up.
    pub fn click(&self, button: u8) -> Result<(), XdoError> {
        self.mouse_down(button)?;
        self.mouse_up(button)
    }
}
