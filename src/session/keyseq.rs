//! Key-sequence resolver: "ctrl+alt+Delete" → ordered keycodes.
//!
//! Tokens are separated by `+`. Each token goes through the alias table,
//! then keysym name lookup, then the keymap. Tokens that do not resolve
//! are skipped with a warning; the rest of the sequence still resolves.

use crate::display::keysym;
use crate::display::{Keycode, Keymap};

use super::XdoError;
use super::growbuf::{GrowBuf, KEY_LIST_CAPACITY};

/// Characters that make a sequence string invalid.
const INVALID_CHARS: &[char] = &[' ', '\t', '\n', '.', '-', '[', ']', '{', '}', '\\', '|'];

/// A resolved key sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySequence {
    codes: GrowBuf<Keycode>,
    /// Number of non-empty tokens in the input.
    attempted: usize,
}

impl KeySequence {
    /// Resolved keycodes, in token order.
    pub fn codes(&self) -> &[Keycode] {
        self.codes.as_slice()
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Number of tokens that resolved to a keycode.
    pub fn resolved(&self) -> usize {
        self.codes.len()
    }
}

/// Resolve `sequence` against `keymap`.
///
/// Fails only when the string contains a forbidden delimiter; a sequence
/// in which nothing resolves is returned empty.
pub fn resolve(keymap: &Keymap, sequence: &str) -> Result<KeySequence, XdoError> {
    if sequence.contains(INVALID_CHARS) {
        return Err(XdoError::InvalidKeySequence(sequence.to_string()));
    }

    let mut codes = GrowBuf::with_capacity(KEY_LIST_CAPACITY);
    let mut attempted = 0;

    for token in sequence.split('+').filter(|t| !t.is_empty()) {
        attempted += 1;
        let name = keysym::resolve_alias(token);

        let Some(sym) = keysym::string_to_keysym(name) else {
            tracing::warn!(key = name, "no such key name, ignoring it");
            continue;
        };

        let Some(code) = keymap.keycode(sym) else {
            tracing::warn!(
                key = name,
                keysym = format_args!("0x{sym:04x}"),
                "key not in keyboard mapping, ignoring it"
            );
            continue;
        };

        codes.push(code);
    }

    Ok(KeySequence { codes, attempted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fake::{
        FakeDisplay, KC_A, KC_ALT_L, KC_CONTROL_L, KC_DELETE, KC_L, KC_RETURN, KC_SHIFT_L,
        KC_SUPER_L,
    };

    fn resolve_us(sequence: &str) -> Result<KeySequence, XdoError> {
        resolve(&FakeDisplay::us_keymap(), sequence)
    }

    #[test]
    fn modifier_combination_in_order() {
        let seq = resolve_us("ctrl+l").unwrap();
        assert_eq!(seq.codes(), &[KC_CONTROL_L, KC_L]);
        assert_eq!(seq.attempted(), 2);
        assert_eq!(seq.resolved(), 2);
    }

    #[test]
    fn aliases_and_named_keys() {
        let seq = resolve_us("ctrl+alt+Delete").unwrap();
        assert_eq!(seq.codes(), &[KC_CONTROL_L, KC_ALT_L, KC_DELETE]);

        let seq = resolve_us("SUPER+Shift+Return").unwrap();
        assert_eq!(seq.codes(), &[KC_SUPER_L, KC_SHIFT_L, KC_RETURN]);
    }

    #[test]
    fn canonical_names_need_no_alias() {
        let seq = resolve_us("Control_L+a").unwrap();
        assert_eq!(seq.codes(), &[KC_CONTROL_L, KC_A]);
    }

    #[test]
    fn unresolvable_token_is_skipped() {
        let seq = resolve_us("ctrl+bogus123").unwrap();
        assert_eq!(seq.codes(), &[KC_CONTROL_L]);
        assert_eq!(seq.attempted(), 2);
        assert_eq!(seq.resolved(), 1);
    }

    #[test]
    fn known_name_missing_from_keymap_is_skipped() {
        // F5 is a valid keysym name but not bound in the test keymap.
        let seq = resolve_us("F5+l").unwrap();
        assert_eq!(seq.codes(), &[KC_L]);
    }

    #[test]
    fn nothing_resolves_is_not_an_error() {
        let seq = resolve_us("bogus+alsobogus").unwrap();
        assert!(seq.codes().is_empty());
        assert_eq!(seq.attempted(), 2);
    }

    #[test]
    fn forbidden_delimiters_reject_the_sequence() {
        for bad in ["ctrl.l", "ctrl l", "ctrl-l", "a[b", "a]b", "a{b", "a}b", "a\\b", "a|b", "a\tb", "a\nb"] {
            assert!(
                matches!(resolve_us(bad), Err(XdoError::InvalidKeySequence(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_tokens_are_ignored() {
        let seq = resolve_us("+ctrl++l+").unwrap();
        assert_eq!(seq.codes(), &[KC_CONTROL_L, KC_L]);
        assert_eq!(seq.attempted(), 2);

        let seq = resolve_us("").unwrap();
        assert!(seq.codes().is_empty());
    }

    #[test]
    fn long_sequence_grows_past_initial_capacity() {
        let sequence = vec!["a"; 25].join("+");
        let seq = resolve_us(&sequence).unwrap();
        assert_eq!(seq.resolved(), 25);
        assert!(seq.codes().iter().all(|&c| c == KC_A));
    }
}
