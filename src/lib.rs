//! X11 desktop automation: synthesize keyboard and pointer input, and
//! find and manipulate windows.
//!
//! - `display`: the windowing-server primitives (`Display` trait), the
//!   `x11rb` adapter, keymap snapshots, and keysym tables.
//! - `session`: the automation session: charcode map, key-sequence
//!   resolution, input synthesis, window tree walk, search, and window
//!   commands.

pub mod display;
pub mod session;

pub use display::{Display, DisplayError, Window, X11Display};
pub use session::{KeySequence, SearchFlags, Session, SizeUnits, TypeReport, WindowList, XdoError};
