//! Fixed-width display tokens for hierarchical logger names

use std::borrow::Cow;
use std::fmt::{self, Write};

/// Width of the name column in the default line template
pub const DEFAULT_NAME_WIDTH: usize = 9;

/// Character used for padding and for the truncation marker
pub const FILLER: char = '_';

/// Number of fillers appended after a truncated name
pub const TRUNCATION_MARKER_LEN: usize = 2;

/// Widest name column a configuration may request
pub const MAX_NAME_WIDTH: usize = 256;

/// Maps a logger name onto a column of exactly `width` characters
///
/// Short names are right-padded with [`FILLER`]; long names keep their first
/// `width - 2` characters followed by two fillers. Widths are counted in
/// `char`s, never bytes, so multi-byte names are never split.
///
/// Distinct names may produce the same token (`"abcdefghij"` and
/// `"abcdefghik"` both become `"abcdefg__"`); the token only aligns columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameFormatter {
    width: usize,
}

impl Default for NameFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_WIDTH)
    }
}

impl NameFormatter {
    /// Create a formatter producing tokens of `width` characters
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    /// Column width in characters
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Format `name` into a new string
    pub fn format(&self, name: &str) -> String {
        let mut out = String::with_capacity(self.width.max(name.len()));
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, name);
        out
    }

    /// Write the token for `name` into `out` without allocating
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W, name: &str) -> fmt::Result {
        let len = name.chars().count();
        let (kept, fill) = if len <= self.width {
            (len, self.width - len)
        } else {
            let kept = self.width.saturating_sub(TRUNCATION_MARKER_LEN);
            (kept, self.width - kept)
        };

        match name.char_indices().nth(kept) {
            Some((end, _)) => out.write_str(&name[..end])?,
            None => out.write_str(name)?,
        }
        for _ in 0..fill {
            out.write_char(FILLER)?;
        }
        Ok(())
    }
}

/// Format `name` with [`DEFAULT_NAME_WIDTH`]
pub fn format_name(name: &str) -> String {
    NameFormatter::default().format(name)
}

/// Logger name of a `tracing` target
///
/// Module paths use `::` where logger names use `.`; both address the same
/// hierarchy.
pub fn logger_name(target: &str) -> Cow<'_, str> {
    if target.contains("::") {
        Cow::Owned(target.replace("::", "."))
    } else {
        Cow::Borrowed(target)
    }
}
