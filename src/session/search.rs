//! Window search: regex match against title, instance name, and class.

use regex::{Regex, RegexBuilder};

use crate::display::{Display, Window};

use super::growbuf::WINDOW_LIST_CAPACITY;
use super::tree::WindowList;
use super::{Session, XdoError};

/// Which fields a search matches against, and whether hidden windows are
/// considered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFlags {
    /// `WM_NAME`.
    pub title: bool,
    /// `WM_CLASS` class part.
    pub class: bool,
    /// `WM_CLASS` instance-name part.
    pub name: bool,
    /// Skip windows that are not viewable.
    pub only_visible: bool,
}

impl SearchFlags {
    pub fn has_fields(&self) -> bool {
        self.title || self.class || self.name
    }

    /// Enable all three text fields, keeping `only_visible`.
    pub fn with_all_fields(self) -> Self {
        Self {
            title: true,
            class: true,
            name: true,
            ..self
        }
    }
}

/// Compile a case-insensitive search pattern.
pub fn compile(pattern: &str) -> Result<Regex, XdoError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| XdoError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Whether `window` matches `re` in any enabled field.
///
/// Fields are checked title, then instance name, then class, stopping at
/// the first match. A title with several segments matches if any segment
/// does. Missing or unreadable properties never match.
pub fn window_matches<D: Display>(
    display: &D,
    window: Window,
    flags: &SearchFlags,
    re: &Regex,
) -> bool {
    if flags.title {
        match display.title_segments(window) {
            Ok(segments) if segments.iter().any(|s| re.is_match(s)) => return true,
            Ok(_) => {}
            Err(e) => tracing::debug!(window, error = %e, "title query failed"),
        }
    }

    if !flags.name && !flags.class {
        return false;
    }

    let hint = match display.class_hint(window) {
        Ok(Some(hint)) => hint,
        Ok(None) => return false,
        Err(e) => {
            tracing::debug!(window, error = %e, "class hint query failed");
            return false;
        }
    };

    let field_matches = |field: &Option<String>| field.as_deref().is_some_and(|v| re.is_match(v));
    (flags.name && field_matches(&hint.instance)) || (flags.class && field_matches(&hint.class))
}

impl<D: Display> Session<D> {
    /// Find all windows under the root whose fields match `pattern`.
    ///
    /// An invalid pattern fails the whole search. With no field selected,
    /// all three fields are searched.
    pub fn search_windows(&self, pattern: &str, flags: SearchFlags) -> Result<WindowList, XdoError> {
        let re = compile(pattern)?;

        let flags = if flags.has_fields() {
            flags
        } else {
            tracing::warn!(
                "no text fields specified for regex search, defaulting to window title, class, and name"
            );
            flags.with_all_fields()
        };

        let candidates = self.child_windows(self.display.root_window());
        let mut matches = WindowList::with_capacity(WINDOW_LIST_CAPACITY);

        for &window in &candidates {
            if flags.only_visible && !self.is_visible(window) {
                continue;
            }
            if window_matches(&self.display, window, &flags, &re) {
                matches.push(window);
            }
        }

        tracing::debug!(
            pattern,
            scanned = candidates.len(),
            matched = matches.len(),
            "window search complete"
        );
        Ok(matches)
    }

    fn is_visible(&self, window: Window) -> bool {
        self.display.is_viewable(window).unwrap_or_else(|e| {
            tracing::debug!(window, error = %e, "attribute query failed");
            false
        })
    }
}
