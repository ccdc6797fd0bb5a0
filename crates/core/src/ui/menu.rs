//! Mobile navigation menu.

/// Collapsed navigation on narrow screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Whether the links are shown
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Menu button clicked.
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// An in-page link was followed.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Class list for the link container.
    pub fn links_class(self) -> &'static str {
        if self.open {
            "nav-links active"
        } else {
            "nav-links"
        }
    }

    /// Font Awesome icon on the menu button.
    pub fn icon_class(self) -> &'static str {
        if self.open {
            "fas fa-times"
        } else {
            "fas fa-bars"
        }
    }
}
