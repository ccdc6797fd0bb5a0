//! Scroll-driven navbar and scroll-to-top state.

/// Scroll offset past which the navbar switches to its compact style.
pub const NAVBAR_SCROLLED_OFFSET: f64 = 50.0;

/// Scroll offset past which the scroll-to-top button appears.
pub const SCROLL_TOP_VISIBLE_OFFSET: f64 = 500.0;

/// Classes derived from the window scroll offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Navbar carries the `scrolled` class.
    pub navbar_scrolled: bool,

    /// Scroll-to-top button carries the `visible` class.
    pub scroll_top_visible: bool,
}

impl ScrollState {
    /// State for `window.scrollY`.
    pub fn from_offset(scroll_y: f64) -> Self {
        Self {
            navbar_scrolled: scroll_y > NAVBAR_SCROLLED_OFFSET,
            scroll_top_visible: scroll_y > SCROLL_TOP_VISIBLE_OFFSET,
        }
    }

    /// Class list for the navbar.
    pub fn navbar_class(self) -> &'static str {
        if self.navbar_scrolled {
            "navbar scrolled"
        } else {
            "navbar"
        }
    }

    /// Class list for the scroll-to-top button.
    pub fn scroll_top_class(self) -> &'static str {
        if self.scroll_top_visible {
            "scroll-top visible"
        } else {
            "scroll-top"
        }
    }
}
