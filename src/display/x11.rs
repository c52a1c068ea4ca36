//! X11 display adapter: `x11rb` connection plus the XTEST extension.
//!
//! Property decoding (`WM_NAME`, `WM_CLASS`, `WM_NORMAL_HINTS`) is done
//! here from raw `GetProperty` replies; the helpers are free functions so
//! they can be tested without a server.

use std::sync::Arc;

use x11rb::connection::{Connection, RequestConnection};
use x11rb::cookie::VoidCookie;
use x11rb::errors::{ConnectionError, ReplyError};
use x11rb::protocol::ErrorKind;
use x11rb::protocol::xproto::{
    self, Atom, AtomEnum, ConfigureWindowAux, InputFocus, Keycode, MapState, StackMode, Window,
};
use x11rb::protocol::xtest;
use x11rb::rust_connection::RustConnection;

use super::{ClassHint, Display, DisplayError, Keymap, SizeHints, WindowChanges};

/// Length (in 32-bit units) requested per round trip for text properties.
const TEXT_PROPERTY_LENGTH: u32 = 1024;

/// `WM_SIZE_HINTS` is 18 words long.
const SIZE_HINTS_LENGTH: u32 = 18;

/// X11 implementation of `Display`.
pub struct X11Display {
    conn: Arc<RustConnection>,
    screen_num: usize,
    root: Window,
    /// `UTF8_STRING` atom (for decoding `WM_NAME`).
    utf8_string: Atom,
}

impl X11Display {
    /// Connect to `display_name`, or `$DISPLAY` when `None`.
    pub fn connect(display_name: Option<&str>) -> Result<Self, DisplayError> {
        let (conn, screen_num) = RustConnection::connect(display_name).map_err(|e| {
            DisplayError::Connect(format!("{}: {e}", display_name.unwrap_or("$DISPLAY")))
        })?;

        Self::from_connection(Arc::new(conn), screen_num)
    }

    /// Wrap an already-open connection.
    ///
    /// The connection closes when the last `Arc` clone is dropped, so a
    /// caller that keeps its own clone keeps the connection alive past
    /// the display's teardown.
    pub fn from_connection(
        conn: Arc<RustConnection>,
        screen_num: usize,
    ) -> Result<Self, DisplayError> {
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .ok_or_else(|| DisplayError::Connect(format!("no screen {screen_num}")))?;

        let utf8_string = xproto::intern_atom(&*conn, false, b"UTF8_STRING")
            .map_err(|e| DisplayError::Connection(format!("intern_atom: {e}")))?
            .reply()
            .map_err(|e| DisplayError::Connection(format!("intern_atom reply: {e}")))?
            .atom;

        tracing::debug!(screen = screen_num, root, "connected to X11 display");

        Ok(Self {
            conn,
            screen_num,
            root,
            utf8_string,
        })
    }

    /// Send a void request and wait for the server's verdict.
    fn checked(
        &self,
        request: &'static str,
        cookie: Result<VoidCookie<'_, RustConnection>, ConnectionError>,
    ) -> Result<(), DisplayError> {
        cookie
            .map_err(|e| DisplayError::Connection(format!("{request} send: {e}")))?
            .check()
            .map_err(|e| rejected(request, e))
    }

    /// Send an XTEST fake-input request. XTEST never replies; errors
    /// surface only on a broken connection.
    fn fake_input(
        &self,
        request: &'static str,
        event_type: u8,
        detail: u8,
        x: i16,
        y: i16,
    ) -> Result<(), DisplayError> {
        xtest::fake_input(
            &*self.conn,
            event_type,
            detail,
            x11rb::CURRENT_TIME,
            x11rb::NONE,
            x,
            y,
            0,
        )
        .map_err(|e| DisplayError::Connection(format!("{request}: {e}")))?;
        Ok(())
    }

    fn get_property(
        &self,
        window: Window,
        property: AtomEnum,
        property_type: Atom,
        offset: u32,
        length: u32,
    ) -> Result<xproto::GetPropertyReply, DisplayError> {
        xproto::get_property(&*self.conn, false, window, property, property_type, offset, length)
            .map_err(|e| DisplayError::Connection(format!("get_property: {e}")))?
            .reply()
            .map_err(|e| rejected("XGetWindowProperty", e))
    }

    /// Fetch a whole 8-bit text property, however long.
    fn get_text_property(
        &self,
        window: Window,
        property: AtomEnum,
        property_type: Atom,
    ) -> Result<PropertyChunk, DisplayError> {
        read_whole_property(|offset| {
            self.get_property(window, property, property_type, offset, TEXT_PROPERTY_LENGTH)
                .map(PropertyChunk::from)
        })
    }
}

impl Display for X11Display {
    fn root_window(&self) -> Window {
        self.root
    }

    fn has_xtest(&self) -> bool {
        match self.conn.extension_information(xtest::X11_EXTENSION_NAME) {
            Ok(info) => info.is_some(),
            Err(e) => {
                tracing::debug!(error = %e, "XTEST extension query failed");
                false
            }
        }
    }

    fn keymap(&self) -> Result<Keymap, DisplayError> {
        let setup = self.conn.setup();
        let min_keycode = setup.min_keycode;
        let max_keycode = setup.max_keycode;
        let count = max_keycode - min_keycode + 1;

        let reply = xproto::get_keyboard_mapping(&*self.conn, min_keycode, count)
            .map_err(|e| DisplayError::Connection(format!("get_keyboard_mapping: {e}")))?
            .reply()
            .map_err(|e| rejected("XGetKeyboardMapping", e))?;

        Ok(Keymap::new(
            min_keycode,
            max_keycode,
            usize::from(reply.keysyms_per_keycode),
            reply.keysyms,
        ))
    }

    fn children(&self, window: Window) -> Result<Vec<Window>, DisplayError> {
        let reply = xproto::query_tree(&*self.conn, window)
            .map_err(|e| DisplayError::Connection(format!("query_tree: {e}")))?
            .reply()
            .map_err(|e| rejected("XQueryTree", e))?;
        Ok(reply.children)
    }

    fn is_viewable(&self, window: Window) -> Result<bool, DisplayError> {
        let reply = xproto::get_window_attributes(&*self.conn, window)
            .map_err(|e| DisplayError::Connection(format!("get_window_attributes: {e}")))?
            .reply()
            .map_err(|e| rejected("XGetWindowAttributes", e))?;
        Ok(reply.map_state == MapState::VIEWABLE)
    }

    fn title_segments(&self, window: Window) -> Result<Vec<String>, DisplayError> {
        let reply = self.get_text_property(window, AtomEnum::WM_NAME, AtomEnum::ANY.into())?;
        if reply.format != 8 {
            return Ok(Vec::new());
        }

        let latin1 = reply.type_ == Atom::from(AtomEnum::STRING);
        if !latin1 && reply.type_ != self.utf8_string {
            tracing::trace!(window, type_ = reply.type_, "decoding WM_NAME as UTF-8");
        }
        Ok(decode_text_property(&reply.value, latin1))
    }

    fn class_hint(&self, window: Window) -> Result<Option<ClassHint>, DisplayError> {
        let reply =
            self.get_text_property(window, AtomEnum::WM_CLASS, AtomEnum::STRING.into())?;
        if reply.format != 8 {
            return Ok(None);
        }
        Ok(parse_class_hint(&reply.value))
    }

    fn size_hints(&self, window: Window) -> Result<Option<SizeHints>, DisplayError> {
        let reply = self.get_property(
            window,
            AtomEnum::WM_NORMAL_HINTS,
            AtomEnum::WM_SIZE_HINTS.into(),
            0,
            SIZE_HINTS_LENGTH,
        )?;
        Ok(reply
            .value32()
            .map(|words| SizeHints::from_words(&words.collect::<Vec<u32>>())))
    }

    fn input_focus(&self) -> Result<Window, DisplayError> {
        let reply = xproto::get_input_focus(&*self.conn)
            .map_err(|e| DisplayError::Connection(format!("get_input_focus: {e}")))?
            .reply()
            .map_err(|e| rejected("XGetInputFocus", e))?;
        Ok(reply.focus)
    }

    fn fake_key(&self, keycode: Keycode, pressed: bool) -> Result<(), DisplayError> {
        let event_type = if pressed {
            xproto::KEY_PRESS_EVENT
        } else {
            xproto::KEY_RELEASE_EVENT
        };
        self.fake_input("XTestFakeKeyEvent", event_type, keycode, 0, 0)
    }

    fn fake_button(&self, button: u8, pressed: bool) -> Result<(), DisplayError> {
        let event_type = if pressed {
            xproto::BUTTON_PRESS_EVENT
        } else {
            xproto::BUTTON_RELEASE_EVENT
        };
        self.fake_input("XTestFakeButtonEvent", event_type, button, 0, 0)
    }

    fn fake_motion(&self, x: i32, y: i32) -> Result<(), DisplayError> {
        let coordinate = |v: i32| {
            i16::try_from(v).map_err(|_| DisplayError::Rejected {
                request: "XTestFakeMotionEvent",
                reason: format!("coordinate {v} out of range"),
            })
        };
        // detail 0 = absolute motion.
        self.fake_input(
            "XTestFakeMotionEvent",
            xproto::MOTION_NOTIFY_EVENT,
            0,
            coordinate(x)?,
            coordinate(y)?,
        )
    }

    fn configure(&self, window: Window, changes: &WindowChanges) -> Result<(), DisplayError> {
        let mut aux = ConfigureWindowAux::new()
            .x(changes.x)
            .y(changes.y)
            .width(changes.width)
            .height(changes.height);
        if changes.raise {
            aux = aux.stack_mode(StackMode::ABOVE);
        }
        let request = if changes.raise {
            "XRaiseWindow"
        } else {
            "XConfigureWindow"
        };
        self.checked(request, xproto::configure_window(&*self.conn, window, &aux))
    }

    fn set_input_focus(&self, window: Window) -> Result<(), DisplayError> {
        self.checked(
            "XSetInputFocus",
            xproto::set_input_focus(&*self.conn, InputFocus::PARENT, window, x11rb::CURRENT_TIME),
        )
    }

    fn map_window(&self, window: Window) -> Result<(), DisplayError> {
        self.checked("XMapWindow", xproto::map_window(&*self.conn, window))
    }

    fn unmap_window(&self, window: Window) -> Result<(), DisplayError> {
        self.checked("XUnmapWindow", xproto::unmap_window(&*self.conn, window))
    }

    fn flush(&self) -> Result<(), DisplayError> {
        self.conn
            .flush()
            .map_err(|e| DisplayError::Connection(format!("flush: {e}")))
    }

    fn close(&mut self) {
        if let Err(e) = self.conn.flush() {
            tracing::debug!(error = %e, "flush before close failed");
        }
        tracing::debug!(
            screen = self.screen_num,
            shared = Arc::strong_count(&self.conn) > 1,
            "closing X11 display"
        );
    }
}

/// One `GetProperty` reply, reduced to what text decoding needs.
#[derive(Debug)]
struct PropertyChunk {
    type_: Atom,
    format: u8,
    value: Vec<u8>,
    bytes_after: u32,
}

impl From<xproto::GetPropertyReply> for PropertyChunk {
    fn from(reply: xproto::GetPropertyReply) -> Self {
        Self {
            type_: reply.type_,
            format: reply.format,
            value: reply.value,
            bytes_after: reply.bytes_after,
        }
    }
}

/// Keep fetching at increasing offsets (in 32-bit units) until the server
/// reports nothing left, concatenating the values.
fn read_whole_property<F>(mut fetch: F) -> Result<PropertyChunk, DisplayError>
where
    F: FnMut(u32) -> Result<PropertyChunk, DisplayError>,
{
    let mut whole = fetch(0)?;
    let mut offset = 0u32;
    let mut chunk_len = whole.value.len();

    while whole.bytes_after > 0 {
        // A partial reply is always a whole number of 32-bit units.
        if chunk_len == 0 || chunk_len % 4 != 0 {
            tracing::trace!(
                bytes_after = whole.bytes_after,
                "property read stopped early"
            );
            break;
        }
        offset = offset.saturating_add(u32::try_from(chunk_len / 4).unwrap_or(u32::MAX));
        let next = fetch(offset)?;
        chunk_len = next.value.len();
        whole.value.extend_from_slice(&next.value);
        whole.bytes_after = next.bytes_after;
    }

    Ok(whole)
}

/// Translate a request error into a `DisplayError`, naming the protocol
/// error the server reported.
fn rejected(request: &'static str, err: ReplyError) -> DisplayError {
    match err {
        ReplyError::X11Error(e) => {
            let reason = match e.error_kind {
                ErrorKind::Match => "got bad match".to_string(),
                ErrorKind::Value => "got bad value".to_string(),
                ErrorKind::Window => "got bad window".to_string(),
                other => format!("got {other:?}"),
            };
            DisplayError::Rejected { request, reason }
        }
        ReplyError::ConnectionError(e) => DisplayError::Connection(format!("{request}: {e}")),
    }
}

/// Split a text property into its NUL-separated segments.
///
/// `STRING` properties are Latin-1; everything else is decoded as UTF-8
/// with replacement characters for invalid sequences. A trailing NUL
/// terminates the last segment rather than starting an empty one.
fn decode_text_property(value: &[u8], latin1: bool) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    let value = value.strip_suffix(&[0]).unwrap_or(value);

    value
        .split(|&b| b == 0)
        .map(|segment| {
            if latin1 {
                segment.iter().map(|&b| char::from(b)).collect()
            } else {
                String::from_utf8_lossy(segment).into_owned()
            }
        })
        .collect()
}

/// Parse `WM_CLASS`: two NUL-terminated strings, instance then class.
fn parse_class_hint(value: &[u8]) -> Option<ClassHint> {
    if value.is_empty() {
        return None;
    }

    let mut parts = value.split(|&b| b == 0);
    let mut next = || parts.next().map(|s| String::from_utf8_lossy(s).into_owned());
    let instance = next();
    let class = next().filter(|s| !s.is_empty());

    Some(ClassHint { instance, class })
}
