//! Display abstraction: the windowing-server primitives the automation
//! layer is built on.
//!
//! Everything that talks to the server goes through the `Display` trait:
//! connection housekeeping, the XTEST capability check, the keyboard
//! mapping, per-window property queries, and synthetic input. The X11
//! adapter lives in `x11`; tests run against the in-memory `fake`.

#[cfg(test)]
pub mod fake;
pub mod keymap;
pub mod keysym;
pub mod x11;

pub use keymap::Keymap;
pub use x11::X11Display;
pub use x11rb::protocol::xproto::{Keycode, Window};

/// Errors returned by display adapters.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    /// Opening the connection failed.
    #[error("can't open display: {0}")]
    Connect(String),

    /// The connection broke while sending a request or reading a reply.
    #[error("connection: {0}")]
    Connection(String),

    /// The server answered a request with an error (`BadWindow`,
    /// `BadMatch`, `BadValue`, ...).
    #[error("{request} failed: {reason}")]
    Rejected {
        request: &'static str,
        reason: String,
    },
}

/// `WM_CLASS` contents: instance name first, then class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassHint {
    pub instance: Option<String>,
    pub class: Option<String>,
}

/// The `WM_NORMAL_HINTS` fields that affect resizing in hint units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeHints {
    /// `(width_inc, height_inc)` when `PResizeInc` is set.
    pub resize_increment: Option<(i32, i32)>,
    /// `(base_width, base_height)` when `PBaseSize` is set.
    pub base_size: Option<(i32, i32)>,
}

impl SizeHints {
    const P_RESIZE_INC: u32 = 1 << 6;
    const P_BASE_SIZE: u32 = 1 << 8;

    /// Decode the 32-bit words of a `WM_SIZE_HINTS` property.
    ///
    /// Layout: flags, x, y, width, height, min (2), max (2), increment
    /// (2), min aspect (2), max aspect (2), base size (2), gravity.
    /// Fields whose words are missing are treated as unset.
    pub fn from_words(words: &[u32]) -> Self {
        let Some(&flags) = words.first() else {
            return Self::default();
        };
        let pair = |at: usize| match (words.get(at), words.get(at + 1)) {
            (Some(&a), Some(&b)) => Some((a as i32, b as i32)),
            _ => None,
        };

        Self {
            resize_increment: if flags & Self::P_RESIZE_INC != 0 {
                pair(9)
            } else {
                None
            },
            base_size: if flags & Self::P_BASE_SIZE != 0 {
                pair(15)
            } else {
                None
            },
        }
    }
}

/// Geometry and stacking changes for `Display::configure`.
///
/// `None` leaves the corresponding attribute untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowChanges {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Restack the window above its siblings.
    pub raise: bool,
}

/// Windowing-server primitives consumed by the session.
///
/// Methods take `&self`; every call is a blocking round-trip (or a
/// buffered request, for the `fake_*` and command methods) on a single
/// connection. Callers serialize their own use.
pub trait Display {
    /// Root window of the default screen.
    fn root_window(&self) -> Window;

    /// Whether the XTEST input-synthesis extension is available.
    fn has_xtest(&self) -> bool;

    /// Fetch the current keyboard mapping.
    fn keymap(&self) -> Result<Keymap, DisplayError>;

    /// Direct children of `window`, bottom-most first.
    fn children(&self, window: Window) -> Result<Vec<Window>, DisplayError>;

    /// Whether `window` is mapped and all of its ancestors are mapped.
    fn is_viewable(&self, window: Window) -> Result<bool, DisplayError>;

    /// Decoded `WM_NAME` text segments. Empty when the property is unset.
    fn title_segments(&self, window: Window) -> Result<Vec<String>, DisplayError>;

    /// `WM_CLASS`, or `None` when the property is unset.
    fn class_hint(&self, window: Window) -> Result<Option<ClassHint>, DisplayError>;

    /// `WM_NORMAL_HINTS`, or `None` when the property is unset.
    fn size_hints(&self, window: Window) -> Result<Option<SizeHints>, DisplayError>;

    /// The window holding the input focus.
    fn input_focus(&self) -> Result<Window, DisplayError>;

    /// Synthesize a key press or release.
    fn fake_key(&self, keycode: Keycode, pressed: bool) -> Result<(), DisplayError>;

    /// Synthesize a pointer button press or release.
    fn fake_button(&self, button: u8, pressed: bool) -> Result<(), DisplayError>;

    /// Synthesize absolute pointer motion on the current screen.
    fn fake_motion(&self, x: i32, y: i32) -> Result<(), DisplayError>;

    /// Apply geometry/stacking changes to `window`.
    fn configure(&self, window: Window, changes: &WindowChanges) -> Result<(), DisplayError>;

    /// Give `window` the input focus, reverting to its parent.
    fn set_input_focus(&self, window: Window) -> Result<(), DisplayError>;

    fn map_window(&self, window: Window) -> Result<(), DisplayError>;

    fn unmap_window(&self, window: Window) -> Result<(), DisplayError>;

    /// Send all buffered requests to the server.
    fn flush(&self) -> Result<(), DisplayError>;

    /// Teardown hook, called once when a session that owns the display is
    /// dropped. Implementations flush here; releasing the underlying
    /// connection is left to its own `Drop`.
    fn close(&mut self);
}
