//! Keyboard shortcut interception.

/// A `keydown` as the page reports it. `key` is the DOM `KeyboardEvent.key`
/// value and is matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// `KeyboardEvent.key`
    pub key: String,
    /// Control held
    pub ctrl: bool,
    /// Shift held
    pub shift: bool,
}

impl KeyPress {
    /// Press of `key` with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            shift: false,
        }
    }

    /// With Control held.
    #[must_use]
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// With Shift held.
    #[must_use]
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Outcome of intercepting a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    /// Let the browser handle it.
    Allow,

    /// Suppress the default action, optionally telling the user why.
    Block {
        /// Message for the user; `None` blocks silently.
        warning: Option<&'static str>,
    },
}

impl KeyDecision {
    /// Whether the default action is suppressed.
    pub fn is_blocked(self) -> bool {
        matches!(self, Self::Block { .. })
    }

    /// Message to show the user, if any.
    pub fn warning(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Block { warning } => warning,
        }
    }
}

/// Warning for devtools shortcuts.
pub const DEVTOOLS_DISABLED: &str = "Developer tools are disabled.";

/// Warning for the view-source shortcut.
pub const VIEW_SOURCE_DISABLED: &str = "View source is disabled.";

/// Decide what to do with a key press.
pub fn intercept(press: &KeyPress) -> KeyDecision {
    let key = press.key.as_str();
    let ctrl_shift = press.ctrl && press.shift;

    if key == "F12" || (ctrl_shift && key == "I") {
        return KeyDecision::Block {
            warning: Some(DEVTOOLS_DISABLED),
        };
    }

    if ctrl_shift && matches!(key, "J" | "C" | "K") {
        return KeyDecision::Block { warning: None };
    }

    if press.ctrl && key == "u" {
        return KeyDecision::Block {
            warning: Some(VIEW_SOURCE_DISABLED),
        };
    }

    if press.ctrl && key == "s" {
        return KeyDecision::Block { warning: None };
    }

    KeyDecision::Allow
}
