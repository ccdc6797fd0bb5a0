//! Toast notifications.

use jiff::{SignedDuration, Timestamp};

/// How long a toast stays fully visible.
pub const TOAST_DISPLAY: SignedDuration = SignedDuration::from_secs(3);

/// Length of the exit animation before the toast is removed.
pub const TOAST_EXIT: SignedDuration = SignedDuration::from_millis(300);

/// Toast severity; picks the colour and icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastKind {
    /// Completed action
    #[default]
    Success,
    /// Failed action
    Error,
    /// Blocked or risky action
    Warning,
    /// Neutral notice
    Info,
}

impl ToastKind {
    /// CSS class for the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Font Awesome icon class.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "fa-check-circle",
            Self::Error => "fa-exclamation-circle",
            Self::Warning | Self::Info => "fa-info-circle",
        }
    }
}

/// Animation phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Fully shown
    Visible,
    /// Playing the exit animation
    Leaving,
}

/// One notification on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Queue-unique id
    pub id: u64,
    /// Severity
    pub kind: ToastKind,
    /// Text shown to the user
    pub message: String,
    /// When it appeared
    pub shown_at: Timestamp,
}

impl Toast {
    /// Phase at `now`.
    pub fn phase(&self, now: Timestamp) -> ToastPhase {
        if now.duration_since(self.shown_at) < TOAST_DISPLAY {
            ToastPhase::Visible
        } else {
            ToastPhase::Leaving
        }
    }

    fn is_expired(&self, now: Timestamp) -> bool {
        now.duration_since(self.shown_at) >= TOAST_DISPLAY + TOAST_EXIT
    }

    /// Container class, e.g. `toast warning`.
    pub fn class(&self) -> String {
        format!("toast {}", self.kind.as_str())
    }
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Show a toast and return its id.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind, now: Timestamp) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            shown_at: now,
        });

        id
    }

    /// Drop toasts whose exit animation has finished. Returns how many went.
    pub fn expire(&mut self, now: Timestamp) -> usize {
        let before = self.toasts.len();

        self.toasts.retain(|toast| !toast.is_expired(now));

        before - self.toasts.len()
    }

    /// Toasts on screen, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Whether nothing is on screen.
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_leaves_after_display_then_expires_after_exit() {
        let start = Timestamp::UNIX_EPOCH;
        let mut queue = ToastQueue::default();
        queue.show("Saved", ToastKind::Success, start);

        let toast = queue.toasts().first().cloned();
        let phase_at = |ms: i64| {
            toast
                .as_ref()
                .map(|toast| toast.phase(start + SignedDuration::from_millis(ms)))
        };

        assert_eq!(phase_at(2_999), Some(ToastPhase::Visible));
        assert_eq!(phase_at(3_000), Some(ToastPhase::Leaving));

        assert_eq!(queue.expire(start + SignedDuration::from_millis(3_299)), 0);
        assert_eq!(queue.expire(start + SignedDuration::from_millis(3_300)), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn ids_are_unique_and_kinds_pick_icons() {
        let mut queue = ToastQueue::default();

        let first = queue.show("a", ToastKind::Error, Timestamp::UNIX_EPOCH);
        let second = queue.show("b", ToastKind::Warning, Timestamp::UNIX_EPOCH);

        assert_ne!(first, second);
        assert_eq!(ToastKind::Error.icon(), "fa-exclamation-circle");
        assert_eq!(ToastKind::Warning.icon(), "fa-info-circle");
        assert_eq!(
            queue.toasts().last().map(Toast::class),
            Some("toast warning".to_string())
        );
    }
}
