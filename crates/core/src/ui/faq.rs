//! FAQ accordion: at most one answer open at a time.

/// Which FAQ item, if any, is expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaqAccordion {
    active: Option<usize>,
}

impl FaqAccordion {
    /// Index of the open item
    pub fn active(self) -> Option<usize> {
        self.active
    }

    /// Whether item `index` is open
    pub fn is_open(self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// A question was clicked: close everything, then open it unless it was
    /// the one already open.
    pub fn click(&mut self, index: usize) {
        self.active = if self.is_open(index) { None } else { Some(index) };
    }

    /// Class list for item `index`.
    pub fn item_class(self, index: usize) -> &'static str {
        if self.is_open(index) {
            "faq-item active"
        } else {
            "faq-item"
        }
    }
}
