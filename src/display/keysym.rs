//! Keysym tables: name ⇄ keysym conversion, symbolic aliases, and the
//! keysym-name → character table used by the charcode map.
//!
//! Xlib resolves keysym names client-side from a compiled-in table; this
//! module carries the subset an automation tool needs: printable Latin-1,
//! the TTY/cursor/keypad function keys, F1–F35, modifiers, and a handful of
//! XF86 media keys. Values come from X11/keysymdef.h and XF86keysym.h.

use x11rb::protocol::xproto::Keysym;

/// `NoSymbol`.
pub const NO_SYMBOL: Keysym = 0;

/// XK_Shift_L: the modifier held for the shifted column of the keymap.
pub const XK_SHIFT_L: Keysym = 0xffe1;

/// Offset of the Unicode keysym range (`U+XXXX` → `0x0100_0000 + XXXX`).
const UNICODE_OFFSET: Keysym = 0x0100_0000;

/// Single-character keysym names for letters and digits. Their keysym
/// value equals the ASCII code.
const ALNUM: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Named keysyms. When several names share a value the canonical one
/// comes first so reverse lookup returns it.
const NAMED_KEYSYMS: &[(&str, Keysym)] = &[
    // Latin-1 punctuation.
    ("space", 0x0020),
    ("exclam", 0x0021),
    ("quotedbl", 0x0022),
    ("numbersign", 0x0023),
    ("dollar", 0x0024),
    ("percent", 0x0025),
    ("ampersand", 0x0026),
    ("apostrophe", 0x0027),
    ("quoteright", 0x0027),
    ("parenleft", 0x0028),
    ("parenright", 0x0029),
    ("asterisk", 0x002a),
    ("plus", 0x002b),
    ("comma", 0x002c),
    ("minus", 0x002d),
    ("period", 0x002e),
    ("slash", 0x002f),
    ("colon", 0x003a),
    ("semicolon", 0x003b),
    ("less", 0x003c),
    ("equal", 0x003d),
    ("greater", 0x003e),
    ("question", 0x003f),
    ("at", 0x0040),
    ("bracketleft", 0x005b),
    ("backslash", 0x005c),
    ("bracketright", 0x005d),
    ("asciicircum", 0x005e),
    ("underscore", 0x005f),
    ("grave", 0x0060),
    ("quoteleft", 0x0060),
    ("braceleft", 0x007b),
    ("bar", 0x007c),
    ("braceright", 0x007d),
    ("asciitilde", 0x007e),
    ("nobreakspace", 0x00a0),
    ("exclamdown", 0x00a1),
    ("cent", 0x00a2),
    ("sterling", 0x00a3),
    ("currency", 0x00a4),
    ("yen", 0x00a5),
    ("brokenbar", 0x00a6),
    ("section", 0x00a7),
    ("diaeresis", 0x00a8),
    ("copyright", 0x00a9),
    ("ordfeminine", 0x00aa),
    ("guillemotleft", 0x00ab),
    ("notsign", 0x00ac),
    ("hyphen", 0x00ad),
    ("registered", 0x00ae),
    ("macron", 0x00af),
    ("degree", 0x00b0),
    ("plusminus", 0x00b1),
    ("twosuperior", 0x00b2),
    ("threesuperior", 0x00b3),
    ("acute", 0x00b4),
    ("mu", 0x00b5),
    ("paragraph", 0x00b6),
    ("periodcentered", 0x00b7),
    ("cedilla", 0x00b8),
    ("onesuperior", 0x00b9),
    ("masculine", 0x00ba),
    ("guillemotright", 0x00bb),
    ("onequarter", 0x00bc),
    ("onehalf", 0x00bd),
    ("threequarters", 0x00be),
    ("questiondown", 0x00bf),
    ("Agrave", 0x00c0),
    ("Aacute", 0x00c1),
    ("Acircumflex", 0x00c2),
    ("Atilde", 0x00c3),
    ("Adiaeresis", 0x00c4),
    ("Aring", 0x00c5),
    ("AE", 0x00c6),
    ("Ccedilla", 0x00c7),
    ("Egrave", 0x00c8),
    ("Eacute", 0x00c9),
    ("Ecircumflex", 0x00ca),
    ("Ediaeresis", 0x00cb),
    ("Igrave", 0x00cc),
    ("Iacute", 0x00cd),
    ("Icircumflex", 0x00ce),
    ("Idiaeresis", 0x00cf),
    ("ETH", 0x00d0),
    ("Ntilde", 0x00d1),
    ("Ograve", 0x00d2),
    ("Oacute", 0x00d3),
    ("Ocircumflex", 0x00d4),
    ("Otilde", 0x00d5),
    ("Odiaeresis", 0x00d6),
    ("multiply", 0x00d7),
    ("Oslash", 0x00d8),
    ("Ugrave", 0x00d9),
    ("Uacute", 0x00da),
    ("Ucircumflex", 0x00db),
    ("Udiaeresis", 0x00dc),
    ("Yacute", 0x00dd),
    ("THORN", 0x00de),
    ("ssharp", 0x00df),
    ("agrave", 0x00e0),
    ("aacute", 0x00e1),
    ("acircumflex", 0x00e2),
    ("atilde", 0x00e3),
    ("adiaeresis", 0x00e4),
    ("aring", 0x00e5),
    ("ae", 0x00e6),
    ("ccedilla", 0x00e7),
    ("egrave", 0x00e8),
    ("eacute", 0x00e9),
    ("ecircumflex", 0x00ea),
    ("ediaeresis", 0x00eb),
    ("igrave", 0x00ec),
    ("iacute", 0x00ed),
    ("icircumflex", 0x00ee),
    ("idiaeresis", 0x00ef),
    ("eth", 0x00f0),
    ("ntilde", 0x00f1),
    ("ograve", 0x00f2),
    ("oacute", 0x00f3),
    ("ocircumflex", 0x00f4),
    ("otilde", 0x00f5),
    ("odiaeresis", 0x00f6),
    ("division", 0x00f7),
    ("oslash", 0x00f8),
    ("ugrave", 0x00f9),
    ("uacute", 0x00fa),
    ("ucircumflex", 0x00fb),
    ("udiaeresis", 0x00fc),
    ("yacute", 0x00fd),
    ("thorn", 0x00fe),
    ("ydiaeresis", 0x00ff),
    // ISO 9995 keys.
    ("ISO_Level3_Shift", 0xfe03),
    ("ISO_Left_Tab", 0xfe20),
    // TTY function keys.
    ("BackSpace", 0xff08),
    ("Tab", 0xff09),
    ("Linefeed", 0xff0a),
    ("Clear", 0xff0b),
    ("Return", 0xff0d),
    ("Pause", 0xff13),
    ("Scroll_Lock", 0xff14),
    ("Sys_Req", 0xff15),
    ("Escape", 0xff1b),
    ("Multi_key", 0xff20),
    ("Delete", 0xffff),
    // Cursor control.
    ("Home", 0xff50),
    ("Left", 0xff51),
    ("Up", 0xff52),
    ("Right", 0xff53),
    ("Down", 0xff54),
    ("Prior", 0xff55),
    ("Page_Up", 0xff55),
    ("Next", 0xff56),
    ("Page_Down", 0xff56),
    ("End", 0xff57),
    ("Begin", 0xff58),
    // Misc functions.
    ("Select", 0xff60),
    ("Print", 0xff61),
    ("Execute", 0xff62),
    ("Insert", 0xff63),
    ("Undo", 0xff65),
    ("Redo", 0xff66),
    ("Menu", 0xff67),
    ("Find", 0xff68),
    ("Cancel", 0xff69),
    ("Help", 0xff6a),
    ("Break", 0xff6b),
    ("Mode_switch", 0xff7e),
    ("Num_Lock", 0xff7f),
    // Keypad.
    ("KP_Space", 0xff80),
    ("KP_Tab", 0xff89),
    ("KP_Enter", 0xff8d),
    ("KP_F1", 0xff91),
    ("KP_F2", 0xff92),
    ("KP_F3", 0xff93),
    ("KP_F4", 0xff94),
    ("KP_Home", 0xff95),
    ("KP_Left", 0xff96),
    ("KP_Up", 0xff97),
    ("KP_Right", 0xff98),
    ("KP_Down", 0xff99),
    ("KP_Prior", 0xff9a),
    ("KP_Page_Up", 0xff9a),
    ("KP_Next", 0xff9b),
    ("KP_Page_Down", 0xff9b),
    ("KP_End", 0xff9c),
    ("KP_Begin", 0xff9d),
    ("KP_Insert", 0xff9e),
    ("KP_Delete", 0xff9f),
    ("KP_Multiply", 0xffaa),
    ("KP_Add", 0xffab),
    ("KP_Separator", 0xffac),
    ("KP_Subtract", 0xffad),
    ("KP_Decimal", 0xffae),
    ("KP_Divide", 0xffaf),
    ("KP_0", 0xffb0),
    ("KP_1", 0xffb1),
    ("KP_2", 0xffb2),
    ("KP_3", 0xffb3),
    ("KP_4", 0xffb4),
    ("KP_5", 0xffb5),
    ("KP_6", 0xffb6),
    ("KP_7", 0xffb7),
    ("KP_8", 0xffb8),
    ("KP_9", 0xffb9),
    ("KP_Equal", 0xffbd),
    // Function keys F1..F35 are handled arithmetically in `function_key`.
    // Modifiers.
    ("Shift_L", 0xffe1),
    ("Shift_R", 0xffe2),
    ("Control_L", 0xffe3),
    ("Control_R", 0xffe4),
    ("Caps_Lock", 0xffe5),
    ("Shift_Lock", 0xffe6),
    ("Meta_L", 0xffe7),
    ("Meta_R", 0xffe8),
    ("Alt_L", 0xffe9),
    ("Alt_R", 0xffea),
    ("Super_L", 0xffeb),
    ("Super_R", 0xffec),
    ("Hyper_L", 0xffed),
    ("Hyper_R", 0xffee),
    // XF86 media keys.
    ("XF86MonBrightnessUp", 0x1008_ff02),
    ("XF86MonBrightnessDown", 0x1008_ff03),
    ("XF86AudioLowerVolume", 0x1008_ff11),
    ("XF86AudioMute", 0x1008_ff12),
    ("XF86AudioRaiseVolume", 0x1008_ff13),
    ("XF86AudioPlay", 0x1008_ff14),
    ("XF86AudioStop", 0x1008_ff15),
    ("XF86AudioPrev", 0x1008_ff16),
    ("XF86AudioNext", 0x1008_ff17),
    ("XF86HomePage", 0x1008_ff18),
    ("XF86Mail", 0x1008_ff19),
    ("XF86Search", 0x1008_ff1b),
    ("XF86Calculator", 0x1008_ff1d),
    ("XF86Back", 0x1008_ff26),
    ("XF86Forward", 0x1008_ff27),
    ("XF86Refresh", 0x1008_ff29),
];

/// XK_F1; F1..F35 are contiguous.
const XK_F1: Keysym = 0xffbe;
const FUNCTION_KEY_NAMES: [&str; 35] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "F13", "F14", "F15",
    "F16", "F17", "F18", "F19", "F20", "F21", "F22", "F23", "F24", "F25", "F26", "F27", "F28",
    "F29", "F30", "F31", "F32", "F33", "F34", "F35",
];

/// Short names accepted in key sequences, substituted case-insensitively
/// before keysym lookup (`ctrl+alt+Delete` → `Control_L+Alt_L+Delete`).
pub const SYMBOL_ALIASES: &[(&str, &str)] = &[
    ("alt", "Alt_L"),
    ("ctrl", "Control_L"),
    ("control", "Control_L"),
    ("meta", "Meta_L"),
    ("super", "Super_L"),
    ("shift", "Shift_L"),
];

/// Keysym names whose character is not the name itself.
const NAMED_CHARS: &[(&str, char)] = &[
    ("ampersand", '&'),
    ("apostrophe", '\''),
    ("asciicircum", '^'),
    ("asciitilde", '~'),
    ("asterisk", '*'),
    ("at", '@'),
    ("backslash", '\\'),
    ("bar", '|'),
    ("braceleft", '{'),
    ("braceright", '}'),
    ("bracketleft", '['),
    ("bracketright", ']'),
    ("colon", ':'),
    ("comma", ','),
    ("dollar", '$'),
    ("equal", '='),
    ("exclam", '!'),
    ("grave", '`'),
    ("greater", '>'),
    ("less", '<'),
    ("minus", '-'),
    ("numbersign", '#'),
    ("parenleft", '('),
    ("parenright", ')'),
    ("percent", '%'),
    ("period", '.'),
    ("plus", '+'),
    ("question", '?'),
    ("quotedbl", '"'),
    ("semicolon", ';'),
    ("slash", '/'),
    ("space", ' '),
    ("underscore", '_'),
    ("Return", '\n'),
    ("Tab", '\t'),
];

/// Map a keysym name to its keysym value (`XStringToKeysym`).
///
/// Names are case-sensitive, as in Xlib. Besides the table, accepts
/// `0x`-prefixed hex values and `U<hex>` Unicode names.
pub fn string_to_keysym(name: &str) -> Option<Keysym> {
    let mut chars = name.chars();
    if let (Some(ch), None) = (chars.next(), chars.next())
        && ch.is_ascii_alphanumeric()
    {
        return Some(ch as Keysym);
    }

    if let Some(&(_, keysym)) = NAMED_KEYSYMS.iter().find(|(n, _)| *n == name) {
        return Some(keysym);
    }

    if let Some(index) = FUNCTION_KEY_NAMES.iter().position(|n| *n == name) {
        return Some(XK_F1 + index as Keysym);
    }

    if let Some(hex) = name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
        return Keysym::from_str_radix(hex, 16)
            .ok()
            .filter(|&k| k != NO_SYMBOL);
    }

    if let Some(hex) = name.strip_prefix('U')
        && !hex.is_empty()
        && hex.chars().all(|c| c.is_ascii_hexdigit())
    {
        let codepoint = Keysym::from_str_radix(hex, 16).ok()?;
        return match codepoint {
            // Latin-1 keysyms coincide with their code points.
            0x20..=0x7e | 0xa0..=0xff => Some(codepoint),
            0x100..=0x10_ffff => Some(UNICODE_OFFSET + codepoint),
            _ => None,
        };
    }

    None
}

/// Map a keysym value to its canonical name (`XKeysymToString`).
///
/// Returns `None` for `NoSymbol` and for keysyms outside the table.
pub fn keysym_to_string(keysym: Keysym) -> Option<&'static str> {
    if keysym == NO_SYMBOL {
        return None;
    }

    if let Ok(byte) = u8::try_from(keysym)
        && byte.is_ascii_alphanumeric()
    {
        let index = ALNUM.find(byte as char)?;
        return Some(&ALNUM[index..index + 1]);
    }

    if (XK_F1..XK_F1 + FUNCTION_KEY_NAMES.len() as Keysym).contains(&keysym) {
        return Some(FUNCTION_KEY_NAMES[(keysym - XK_F1) as usize]);
    }

    NAMED_KEYSYMS
        .iter()
        .find(|(_, k)| *k == keysym)
        .map(|(name, _)| *name)
}

/// Substitute a key-sequence alias (case-insensitive).
///
/// Substitution runs over the whole table in order, so an alias that
/// expands to another alias is followed.
pub fn resolve_alias(token: &str) -> &str {
    let mut resolved = token;
    for &(alias, target) in SYMBOL_ALIASES {
        if resolved.eq_ignore_ascii_case(alias) {
            resolved = target;
        }
    }
    resolved
}

/// Convert a keysym name to the character it types.
///
/// Named symbols go through the table; any other name that is exactly one
/// character long is that character. Everything else has no printable
/// interpretation.
pub fn keysym_name_to_char(name: &str) -> Option<char> {
    if let Some(&(_, ch)) = NAMED_CHARS.iter().find(|(n, _)| *n == name) {
        return Some(ch);
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Lower/upper case pair for a keysym (`XConvertCase`), restricted to the
/// Latin-1 range. Keysyms without case map to themselves.
pub fn convert_case(keysym: Keysym) -> (Keysym, Keysym) {
    match keysym {
        0x41..=0x5a | 0xc0..=0xd6 | 0xd8..=0xde => (keysym + 0x20, keysym),
        0x61..=0x7a | 0xe0..=0xf6 | 0xf8..=0xfe => (keysym, keysym - 0x20),
        _ => (keysym, keysym),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters_and_digits() {
        assert_eq!(string_to_keysym("a"), Some(0x61));
        assert_eq!(string_to_keysym("Z"), Some(0x5a));
        assert_eq!(string_to_keysym("7"), Some(0x37));
    }

    #[test]
    fn named_keys() {
        assert_eq!(string_to_keysym("Return"), Some(0xff0d));
        assert_eq!(string_to_keysym("Control_L"), Some(0xffe3));
        assert_eq!(string_to_keysym("Page_Up"), Some(0xff55));
        assert_eq!(string_to_keysym("XF86AudioMute"), Some(0x1008_ff12));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(string_to_keysym("return"), None);
        assert_eq!(string_to_keysym("control_l"), None);
    }

    #[test]
    fn function_keys() {
        assert_eq!(string_to_keysym("F1"), Some(0xffbe));
        assert_eq!(string_to_keysym("F12"), Some(0xffc9));
        assert_eq!(string_to_keysym("F35"), Some(0xffe0));
        assert_eq!(string_to_keysym("F36"), None);
        assert_eq!(keysym_to_string(0xffc9), Some("F12"));
    }

    #[test]
    fn hex_and_unicode_names() {
        assert_eq!(string_to_keysym("0xff0d"), Some(0xff0d));
        assert_eq!(string_to_keysym("0x0"), None);
        assert_eq!(string_to_keysym("U20AC"), Some(0x0100_20ac));
        assert_eq!(string_to_keysym("U41"), Some(0x41));
        assert_eq!(string_to_keysym("Ugly"), None);
    }

    #[test]
    fn unknown_names() {
        assert_eq!(string_to_keysym(""), None);
        assert_eq!(string_to_keysym("bogus123"), None);
    }

    #[test]
    fn reverse_lookup_prefers_canonical_name() {
        assert_eq!(keysym_to_string(0xff55), Some("Prior"));
        assert_eq!(keysym_to_string(0x0027), Some("apostrophe"));
        assert_eq!(keysym_to_string(0x61), Some("a"));
        assert_eq!(keysym_to_string(0x30), Some("0"));
        assert_eq!(keysym_to_string(NO_SYMBOL), None);
        assert_eq!(keysym_to_string(0x0100_20ac), None);
    }

    #[test]
    fn aliases_are_case_insensitive() {
        assert_eq!(resolve_alias("ctrl"), "Control_L");
        assert_eq!(resolve_alias("CTRL"), "Control_L");
        assert_eq!(resolve_alias("Alt"), "Alt_L");
        assert_eq!(resolve_alias("l"), "l");
        assert_eq!(resolve_alias("Delete"), "Delete");
    }

    #[test]
    fn name_to_char() {
        assert_eq!(keysym_name_to_char("ampersand"), Some('&'));
        assert_eq!(keysym_name_to_char("Return"), Some('\n'));
        assert_eq!(keysym_name_to_char("a"), Some('a'));
        assert_eq!(keysym_name_to_char("Shift_L"), None);
        assert_eq!(keysym_name_to_char("adiaeresis"), None);
    }

    #[test]
    fn case_conversion() {
        assert_eq!(convert_case(0x61), (0x61, 0x41));
        assert_eq!(convert_case(0x41), (0x61, 0x41));
        assert_eq!(convert_case(0xe4), (0xe4, 0xc4));
        assert_eq!(convert_case(0xd7), (0xd7, 0xd7));
        assert_eq!(convert_case(0xff0d), (0xff0d, 0xff0d));
    }
}
