//! Row source: the lines shown by the viewer

use std::cell::RefCell;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Tab stop width used when expanding tabs.
pub const TAB_WIDTH: usize = 4;

/// Line store shared between the render surface and the application.
pub type SharedLines = Rc<RefCell<LineStore>>;

/// Append-only list of display lines.
///
/// Lines are normalized on insert: tabs expand to spaces up to the next
/// display-column tab stop and other control characters are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    lines: Vec<String>,
}

impl LineStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `lines`.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        store.extend(lines);
        store
    }

    /// Wrap into a shared handle.
    pub fn into_shared(self) -> SharedLines {
        Rc::new(RefCell::new(self))
    }

    /// Append one line.
    pub fn push(&mut self, line: &str) {
        self.lines.push(normalize(line));
    }

    /// Append several lines.
    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.push(line.as_ref());
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no line was loaded.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Character count of the longest line.
    pub fn max_width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
    }
}

fn normalize(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\t' => {
                let col = out.width();
                let pad = TAB_WIDTH - col % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', pad));
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_expand_to_next_stop() {
        let store = LineStore::from_lines(["a\tb", "\tc"]);
        assert_eq!(store.get(0), Some("a   b"));
        assert_eq!(store.get(1), Some("    c"));
    }

    #[test]
    fn tab_stops_use_display_width() {
        let store = LineStore::from_lines(["界\tb"]);
        assert_eq!(store.get(0), Some("界  b"));
    }

    #[test]
    fn control_characters_are_dropped() {
        let store = LineStore::from_lines(["one\r", "\u{1b}[31mred"]);
        assert_eq!(store.get(0), Some("one"));
        assert_eq!(store.get(1), Some("[31mred"));
    }

    #[test]
    fn max_width_counts_characters() {
        let store = LineStore::from_lines(["ab", "äöüß x", ""]);
        assert_eq!(store.max_width(), 6);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }
}
