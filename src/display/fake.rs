//! In-memory display for unit tests.
//!
//! Holds a window tree, per-window properties and a keymap, and records
//! every synthetic event, command, and flush in one ordered log so tests
//! can assert exact sequencing.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::keysym::NO_SYMBOL;
use super::{ClassHint, Display, DisplayError, Keycode, Keymap, SizeHints, Window, WindowChanges};

pub const ROOT: Window = 1;

/// Keycodes of the test keymap built by `FakeDisplay::us_keymap`.
pub const KC_A: Keycode = 10;
pub const KC_L: Keycode = KC_A + 11;
pub const KC_ZERO: Keycode = 36;
pub const KC_SPACE: Keycode = 46;
pub const KC_RETURN: Keycode = 47;
pub const KC_SHIFT_L: Keycode = 48;
pub const KC_CONTROL_L: Keycode = 49;
pub const KC_ALT_L: Keycode = 50;
pub const KC_MINUS: Keycode = 51;
pub const KC_DELETE: Keycode = 54;
pub const KC_SUPER_L: Keycode = 55;

/// One entry in the recorded log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Key(Keycode, bool),
    Button(u8, bool),
    Motion(i32, i32),
    Configure(Window, WindowChanges),
    Focus(Window),
    Map(Window),
    Unmap(Window),
    Flush,
}

#[derive(Debug, Clone, Default)]
pub struct FakeWindow {
    pub children: Vec<Window>,
    pub viewable: bool,
    pub title: Vec<String>,
    pub class: Option<ClassHint>,
    pub size_hints: Option<SizeHints>,
}

impl FakeWindow {
    pub fn titled(title: &str) -> Self {
        Self {
            viewable: true,
            title: vec![title.to_string()],
            ..Self::default()
        }
    }

    pub fn with_class(mut self, instance: &str, class: &str) -> Self {
        self.class = Some(ClassHint {
            instance: Some(instance.to_string()),
            class: Some(class.to_string()),
        });
        self
    }

    pub fn hidden(mut self) -> Self {
        self.viewable = false;
        self
    }
}

pub struct FakeDisplay {
    pub xtest: bool,
    pub keymap: Keymap,
    pub windows: HashMap<Window, FakeWindow>,
    /// Windows whose tree query fails, as if destroyed mid-walk.
    pub vanished: HashSet<Window>,
    pub focus: Window,
    pub log: RefCell<Vec<Recorded>>,
    /// Set by `close`; shared so tests can observe it after the session
    /// (and the display it owns) is dropped.
    pub closed: Rc<Cell<bool>>,
}

impl FakeDisplay {
    /// A display with XTEST, the test keymap, and an empty root window.
    pub fn new() -> Self {
        let mut windows = HashMap::new();
        windows.insert(
            ROOT,
            FakeWindow {
                viewable: true,
                ..FakeWindow::default()
            },
        );

        Self {
            xtest: true,
            keymap: Self::us_keymap(),
            windows,
            vanished: HashSet::new(),
            focus: ROOT,
            log: RefCell::new(Vec::new()),
            closed: Rc::new(Cell::new(false)),
        }
    }

    /// Small two-column keymap, keycodes 8..=55:
    /// a–z at 10..=35 (lower, upper), 0–9 at 36..=45 (digit, shifted
    /// symbol), then space, Return, Shift_L, Control_L, Alt_L/Meta_L,
    /// minus/underscore, period/greater, Tab/ISO_Left_Tab, Delete, Super_L.
    pub fn us_keymap() -> Keymap {
        let mut keysyms = vec![NO_SYMBOL; 4];
        for letter in b'a'..=b'z' {
            keysyms.extend([u32::from(letter), u32::from(letter.to_ascii_uppercase())]);
        }
        for (digit, shifted) in (b'0'..=b'9').zip(b")!@#$%^&*(".iter()) {
            keysyms.extend([u32::from(digit), u32::from(*shifted)]);
        }
        keysyms.extend([
            0x0020, NO_SYMBOL, // space
            0xff0d, NO_SYMBOL, // Return
            0xffe1, NO_SYMBOL, // Shift_L
            0xffe3, NO_SYMBOL, // Control_L
            0xffe9, 0xffe7, // Alt_L Meta_L
            0x002d, 0x005f, // minus underscore
            0x002e, 0x003e, // period greater
            0xff09, 0xfe20, // Tab ISO_Left_Tab
            0xffff, NO_SYMBOL, // Delete
            0xffeb, NO_SYMBOL, // Super_L
        ]);
        Keymap::new(8, 55, 2, keysyms)
    }

    /// Add `window` as the last child of `parent`.
    pub fn add_window(&mut self, parent: Window, window: Window, data: FakeWindow) {
        self.windows.entry(parent).or_default().children.push(window);
        self.windows.insert(window, data);
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.log.borrow().clone()
    }

    fn record(&self, event: Recorded) {
        self.log.borrow_mut().push(event);
    }

    fn window(&self, window: Window) -> Result<&FakeWindow, DisplayError> {
        self.windows.get(&window).ok_or(DisplayError::Rejected {
            request: "fake",
            reason: "got bad window".into(),
        })
    }
}

impl Display for FakeDisplay {
    fn root_window(&self) -> Window {
        ROOT
    }

    fn has_xtest(&self) -> bool {
        self.xtest
    }

    fn keymap(&self) -> Result<Keymap, DisplayError> {
        Ok(self.keymap.clone())
    }

    fn children(&self, window: Window) -> Result<Vec<Window>, DisplayError> {
        if self.vanished.contains(&window) {
            return Err(DisplayError::Rejected {
                request: "XQueryTree",
                reason: "got bad window".into(),
            });
        }
        Ok(self.window(window)?.children.clone())
    }

    fn is_viewable(&self, window: Window) -> Result<bool, DisplayError> {
        Ok(self.window(window)?.viewable)
    }

    fn title_segments(&self, window: Window) -> Result<Vec<String>, DisplayError> {
        Ok(self.window(window)?.title.clone())
    }

    fn class_hint(&self, window: Window) -> Result<Option<ClassHint>, DisplayError> {
        Ok(self.window(window)?.class.clone())
    }

    fn size_hints(&self, window: Window) -> Result<Option<SizeHints>, DisplayError> {
        Ok(self.window(window)?.size_hints)
    }

    fn input_focus(&self) -> Result<Window, DisplayError> {
        Ok(self.focus)
    }

    fn fake_key(&self, keycode: Keycode, pressed: bool) -> Result<(), DisplayError> {
        self.record(Recorded::Key(keycode, pressed));
        Ok(())
    }

    fn fake_button(&self, button: u8, pressed: bool) -> Result<(), DisplayError> {
        self.record(Recorded::Button(button, pressed));
        Ok(())
    }

    fn fake_motion(&self, x: i32, y: i32) -> Result<(), DisplayError> {
        self.record(Recorded::Motion(x, y));
        Ok(())
    }

    fn configure(&self, window: Window, changes: &WindowChanges) -> Result<(), DisplayError> {
        self.window(window)?;
        self.record(Recorded::Configure(window, *changes));
        Ok(())
    }

    fn set_input_focus(&self, window: Window) -> Result<(), DisplayError> {
        self.window(window)?;
        self.record(Recorded::Focus(window));
        Ok(())
    }

    fn map_window(&self, window: Window) -> Result<(), DisplayError> {
        self.window(window)?;
        self.record(Recorded::Map(window));
        Ok(())
    }

    fn unmap_window(&self, window: Window) -> Result<(), DisplayError> {
        self.window(window)?;
        self.record(Recorded::Unmap(window));
        Ok(())
    }

    fn flush(&self) -> Result<(), DisplayError> {
        self.record(Recorded::Flush);
        Ok(())
    }

    fn close(&mut self) {
        self.closed.set(true);
    }
}
