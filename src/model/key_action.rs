//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll up by one row. Default: k/↑
    ScrollUp,
    /// Scroll down by one row. Default: j/↓
    ScrollDown,
    /// Scroll left by one column. Default: h/←
    ScrollLeft,
    /// Scroll right by one column. Default: l/→
    ScrollRight,
    /// Scroll up by one page. Default: Page Up
    PageUp,
    /// Scroll down by one page. Default: Page Down
    PageDown,
    /// Jump to the first row. Default: g/Home
    ScrollToTop,
    /// Jump to the last row. Default: G/End
    ScrollToBottom,

    // Selection
    /// Select every row. Default: Ctrl+a
    SelectAll,
    /// Drop the selection. Default: Esc
    ClearSelection,
    /// Copy the selected text. Default: y
    CopySelection,
    /// Re-apply the logical selection to the rendered rows. Default: r
    RefreshSelection,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// True for actions that move the viewport.
    pub fn is_scroll(&self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::ScrollLeft
                | KeyAction::ScrollRight
                | KeyAction::PageUp
                | KeyAction::PageDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}
