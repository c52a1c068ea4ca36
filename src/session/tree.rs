//! Window tree walk: every descendant of a window, depth-first.

use crate::display::{Display, Window};

use super::Session;
use super::growbuf::{GrowBuf, WINDOW_LIST_CAPACITY};

/// Window ids in traversal order.
pub type WindowList = GrowBuf<Window>;

impl<D: Display> Session<D> {
    /// Collect every descendant of `window`.
    ///
    /// Each child is appended before its own subtree is visited, children
    /// in the server's stacking order. A subtree whose query fails (the
    /// window was destroyed mid-walk) contributes nothing further.
    pub fn child_windows(&self, window: Window) -> WindowList {
        let mut windows = WindowList::with_capacity(WINDOW_LIST_CAPACITY);
        collect_children(&self.display, window, &mut windows);
        windows
    }
}

fn collect_children<D: Display>(display: &D, window: Window, windows: &mut WindowList) {
    let children = match display.children(window) {
        Ok(children) => children,
        Err(e) => {
            tracing::debug!(window, error = %e, "child query failed, skipping subtree");
            return;
        }
    };

    for child in children {
        windows.push(child);
        collect_children(display, child, windows);
    }
}
