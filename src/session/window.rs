//! Window commands: move, resize, focus, raise, map, unmap.
//!
//! Each command is a single request followed by a flush. Server errors
//! (`BadWindow`, `BadMatch`, `BadValue`) come back as
//! `XdoError::Display` and are not retried.

use crate::display::{Display, SizeHints, Window, WindowChanges};

use super::{Session, XdoError};

/// Units for `Session::set_window_size`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizeUnits {
    /// Width and height are pixels.
    #[default]
    Pixels,
    /// Width and height count the window's resize increments (e.g.
    /// terminal cells), on top of its base size.
    Hints,
}

/// Pixel size for a size requested in resize increments.
///
/// Without a resize increment the requested numbers are taken as pixels;
/// the base size is added whenever the window declares one. Results
/// saturate at the `i32` bounds.
fn hinted_size(width: i32, height: i32, hints: Option<SizeHints>) -> (i32, i32) {
    let hints = hints.unwrap_or_default();
    let (width, height) = match hints.resize_increment {
        Some((width_inc, height_inc)) => {
            (width.saturating_mul(width_inc), height.saturating_mul(height_inc))
        }
        None => (width, height),
    };
    match hints.base_size {
        Some((base_width, base_height)) => (
            width.saturating_add(base_width),
            height.saturating_add(base_height),
        ),
        None => (width, height),
    }
}

impl<D: Display> Session<D> {
    pub fn move_window(&self, window: Window, x: i32, y: i32) -> Result<(), XdoError> {
        let changes = WindowChanges {
            x: Some(x),
            y: Some(y),
            ..WindowChanges::default()
        };
        self.display.configure(window, &changes)?;
        self.flush()
    }

    /// Resize `window`. A width or height ≤ 0 leaves that dimension as it
    /// is.
    pub fn set_window_size(
        &self,
        window: Window,
        width: i32,
        height: i32,
        units: SizeUnits,
    ) -> Result<(), XdoError> {
        let (pixel_width, pixel_height) = match units {
            SizeUnits::Pixels => (width, height),
            SizeUnits::Hints => {
                let hints = self.display.size_hints(window)?;
                if hints.is_none_or(|h| h.resize_increment.is_none()) {
                    tracing::warn!(window, "no size hints found for this window");
                }
                hinted_size(width, height, hints)
            }
        };

        let dimension = |requested: i32, pixels: i32| {
            (requested > 0).then(|| u32::try_from(pixels).unwrap_or(0))
        };
        let changes = WindowChanges {
            width: dimension(width, pixel_width),
            height: dimension(height, pixel_height),
            ..WindowChanges::default()
        };
        self.display.configure(window, &changes)?;
        self.flush()
    }

    /// Give `window` the input focus.
    pub fn focus_window(&self, window: Window) -> Result<(), XdoError> {
        self.display.set_input_focus(window)?;
        self.flush()
    }

    /// Restack `window` above its siblings. Some window managers ignore
    /// this.
    pub fn raise_window(&self, window: Window) -> Result<(), XdoError> {
        let changes = WindowChanges {
            raise: true,
            ..WindowChanges::default()
        };
        self.display.configure(window, &changes)?;
        self.flush()
    }

    pub fn map_window(&self, window: Window) -> Result<(), XdoError> {
        self.display.map_window(window)?;
        self.flush()
    }

    pub fn unmap_window(&self, window: Window) -> Result<(), XdoError> {
        self.display.unmap_window(window)?;
        self.flush()
    }

    /// The window that currently holds the input focus.
    pub fn focused_window(&self) -> Result<Window, XdoError> {
        Ok(self.display.input_focus()?)
    }
}
