//! Automation session: keyboard and pointer synthesis, window search,
//! and window commands on top of a `Display`.
//!
//! A `Session` is constructed once: it confirms the XTEST extension and
//! builds the charcode map. Every other operation borrows the session and
//! is independent of the others.

pub mod charmap;
pub mod growbuf;
pub mod input;
pub mod keyseq;
pub mod search;
pub mod tree;
pub mod window;

use std::ops::RangeInclusive;

use crate::display::{Display, DisplayError, Keycode, X11Display};

use charmap::CharcodeMap;

pub use growbuf::GrowBuf;
pub use input::TypeReport;
pub use keyseq::KeySequence;
pub use search::SearchFlags;
pub use tree::WindowList;
pub use window::SizeUnits;

/// Session-level errors.
#[derive(Debug, thiserror::Error)]
pub enum XdoError {
    #[error(transparent)]
    Display(#[from] DisplayError),

    /// Construction refused: the server cannot synthesize input.
    #[error("XTEST extension unavailable on '{0}'")]
    NoXTest(String),

    #[error("invalid key sequence {0:?}")]
    InvalidKeySequence(String),

    #[error("failed to compile regex {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// An automation session over one display connection.
pub struct Session<D: Display> {
    display: D,
    display_name: String,
    keycode_low: Keycode,
    keycode_high: Keycode,
    charcodes: CharcodeMap,
    close_when_dropped: bool,
}

impl Session<X11Display> {
    /// Open `display_name` (or `$DISPLAY`) and build a session that owns
    /// the connection.
    pub fn open(display_name: Option<&str>) -> Result<Self, XdoError> {
        let display = X11Display::connect(display_name)?;
        Self::with_display(display, display_name, true)
    }
}

impl<D: Display> Session<D> {
    /// Build a session over an already-open display.
    ///
    /// Fails if XTEST is missing; the charcode map is then never built.
    /// `close_when_dropped` decides whether teardown calls
    /// `Display::close`. For `X11Display` that is a final flush; the
    /// socket itself closes when the last `Arc<RustConnection>` clone is
    /// dropped, so a caller sharing the connection keeps it open either
    /// way.
    pub fn with_display(
        display: D,
        display_name: Option<&str>,
        close_when_dropped: bool,
    ) -> Result<Self, XdoError> {
        let display_name = display_name.unwrap_or("unknown").to_string();

        if !display.has_xtest() {
            return Err(XdoError::NoXTest(display_name));
        }

        let keymap = display.keymap()?;
        let charcodes = CharcodeMap::build(&keymap);
        let keycodes = keymap.keycodes();

        tracing::debug!(
            display = %display_name,
            keycode_low = *keycodes.start(),
            keycode_high = *keycodes.end(),
            entries = charcodes.entries().len(),
            "session ready"
        );

        Ok(Self {
            display,
            display_name,
            keycode_low: *keycodes.start(),
            keycode_high: *keycodes.end(),
            charcodes,
            close_when_dropped,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Keycode range reported by the server at construction.
    pub fn keycode_range(&self) -> RangeInclusive<Keycode> {
        self.keycode_low..=self.keycode_high
    }

    pub fn charcodes(&self) -> &CharcodeMap {
        &self.charcodes
    }

    /// Flush after a state-changing operation.
    fn flush(&self) -> Result<(), XdoError> {
        Ok(self.display.flush()?)
    }
}

impl<D: Display> Drop for Session<D> {
    fn drop(&mut self) {
        if self.close_when_dropped {
            self.display.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::fake::FakeDisplay;

    #[test]
    fn construction_builds_charcode_map() {
        let session = Session::with_display(FakeDisplay::new(), Some(":9"), true).unwrap();
        assert_eq!(session.display_name(), ":9");
        assert_eq!(session.keycode_range(), 8..=55);
        assert_eq!(session.charcodes().entries().len(), 96);
    }

    #[test]
    fn missing_xtest_refuses_construction() {
        let mut display = FakeDisplay::new();
        display.xtest = false;
        let err = Session::with_display(display, None, true).err().unwrap();
        assert!(matches!(err, XdoError::NoXTest(ref name) if name == "unknown"));
    }

    #[test]
    fn owned_display_is_closed_on_drop() {
        let display = FakeDisplay::new();
        let closed = display.closed.clone();
        drop(Session::with_display(display, None, true).unwrap());
        assert!(closed.get());
    }

    #[test]
    fn borrowed_display_is_left_open() {
        let display = FakeDisplay::new();
        let closed = display.closed.clone();
        drop(Session::with_display(display, None, false).unwrap());
        assert!(!closed.get());
    }
}
