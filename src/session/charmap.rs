//! Charcode map: which keycode (and modifier) types each character.
//!
//! Built once per session from the keyboard mapping: two entries per
//! keycode, unmodified then shifted, in increasing keycode order.

use crate::display::keysym::{self, XK_SHIFT_L};
use crate::display::{Keycode, Keymap};

/// One `(keycode, modifier state)` slot of the keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharcodeEntry {
    /// Character typed by this slot, `None` when the keysym is not
    /// printable.
    pub key: Option<char>,
    pub code: Keycode,
    /// Modifier to hold while pressing `code`; `None` when unmodified.
    pub modifier: Option<Keycode>,
}

#[derive(Debug, Clone, Default)]
pub struct CharcodeMap {
    entries: Vec<CharcodeEntry>,
}

impl CharcodeMap {
    /// Build the map from a keymap snapshot.
    ///
    /// The shift keycode is resolved once and shared by every shifted
    /// entry. If the keymap has no `Shift_L`, shifted entries carry no
    /// modifier.
    pub fn build(keymap: &Keymap) -> Self {
        let shift = keymap.keycode(XK_SHIFT_L);
        let keycodes = keymap.keycodes();
        let slots = 2 * (usize::from(*keycodes.end()) - usize::from(*keycodes.start()) + 1);

        let mut entries = Vec::with_capacity(slots);
        for code in keycodes {
            for column in 0..=1 {
                let key = keysym::keysym_to_string(keymap.keysym(code, column))
                    .and_then(keysym::keysym_name_to_char);
                entries.push(CharcodeEntry {
                    key,
                    code,
                    modifier: if column == 1 { shift } else { None },
                });
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[CharcodeEntry] {
        &self.entries
    }

    /// Keycode of the first entry typing `ch`.
    pub fn keycode_for(&self, ch: char) -> Option<Keycode> {
        self.entries
            .iter()
            .find(|entry| entry.key == Some(ch))
            .map(|entry| entry.code)
    }

    /// Modifier of the first entry typing `ch`.
    ///
    /// Scans independently of `keycode_for`; both return the same entry's
    /// fields because both stop at the first match.
    pub fn modifier_for(&self, ch: char) -> Option<Keycode> {
        self.entries
            .iter()
            .find(|entry| entry.key == Some(ch))
            .and_then(|entry| entry.modifier)
    }
}
