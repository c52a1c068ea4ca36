//! Keyboard mapping snapshot: keycode range and keysyms per keycode.
//!
//! Mirrors the table returned by `GetKeyboardMapping` and answers the two
//! questions the rest of the crate asks of it: which keysym a keycode
//! produces in a given column, and which keycode produces a keysym.

use std::ops::RangeInclusive;

use x11rb::protocol::xproto::{Keycode, Keysym};

use super::keysym::{NO_SYMBOL, convert_case};

/// A snapshot of the server's keyboard mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    min_keycode: Keycode,
    max_keycode: Keycode,
    keysyms_per_keycode: usize,
    /// Row-major: `keysyms_per_keycode` entries per keycode, starting at
    /// `min_keycode`.
    keysyms: Vec<Keysym>,
}

impl Keymap {
    pub fn new(
        min_keycode: Keycode,
        max_keycode: Keycode,
        keysyms_per_keycode: usize,
        keysyms: Vec<Keysym>,
    ) -> Self {
        Self {
            min_keycode,
            max_keycode,
            keysyms_per_keycode,
            keysyms,
        }
    }

    /// The valid keycode range `[min, max]`.
    pub fn keycodes(&self) -> RangeInclusive<Keycode> {
        self.min_keycode..=self.max_keycode
    }

    /// Keysym for `keycode` at `column` (`XKeycodeToKeysym`).
    ///
    /// Column 0 is unmodified, column 1 is shifted. For the first group
    /// (columns 0–3), a keycode whose shifted slot is empty derives both
    /// columns from the case pair of its base keysym, so a key bound only
    /// to `a` still yields `A` when shifted.
    pub fn keysym(&self, keycode: Keycode, column: usize) -> Keysym {
        let mut per = self.keysyms_per_keycode;
        if per == 0 || !self.keycodes().contains(&keycode) || (column >= per && column > 3) {
            return NO_SYMBOL;
        }

        let start = usize::from(keycode - self.min_keycode) * per;
        let Some(syms) = self.keysyms.get(start..start + per) else {
            return NO_SYMBOL;
        };

        let mut column = column;
        if column < 4 {
            if column > 1 {
                while per > 2 && syms[per - 1] == NO_SYMBOL {
                    per -= 1;
                }
                if per < 3 {
                    column -= 2;
                }
            }

            if per <= (column | 1) || syms[column | 1] == NO_SYMBOL {
                let (lower, upper) = convert_case(syms[column & !1]);
                return if column & 1 == 0 {
                    lower
                } else if upper == lower {
                    NO_SYMBOL
                } else {
                    upper
                };
            }
        }

        syms.get(column).copied().unwrap_or(NO_SYMBOL)
    }

    /// First keycode producing `keysym` (`XKeysymToKeycode`).
    ///
    /// Searches column by column, so a keycode producing the keysym
    /// unmodified wins over one producing it shifted.
    pub fn keycode(&self, keysym: Keysym) -> Option<Keycode> {
        if keysym == NO_SYMBOL {
            return None;
        }

        (0..self.keysyms_per_keycode).find_map(|column| {
            self.keycodes()
                .find(|&keycode| self.keysym(keycode, column) == keysym)
        })
    }
}
