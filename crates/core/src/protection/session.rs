//! Idle session timeout.

use jiff::{SignedDuration, Timestamp};

/// Idle minutes before the session expires.
pub const DEFAULT_SESSION_MINUTES: i64 = 30;

/// Warning shown when the session expires.
pub const SESSION_EXPIRED: &str = "Session expired. Please refresh the page.";

/// Delay between the expiry warning and the redirect.
pub const LOGIN_REDIRECT_DELAY: SignedDuration = SignedDuration::from_secs(3);

/// Redirect target after expiry.
pub const LOGIN_PAGE: &str = "/login.html";

/// User activity that keeps the session alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityEvent {
    /// `mousedown`
    PointerDown,
    /// `mousemove`
    PointerMove,
    /// `keypress`
    KeyPress,
    /// `scroll`
    Scroll,
    /// `touchstart`
    TouchStart,
}

impl ActivityEvent {
    /// Every event that counts as activity.
    pub const ALL: [Self; 5] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::KeyPress,
        Self::Scroll,
        Self::TouchStart,
    ];

    /// DOM event name to listen for.
    pub const fn dom_event(self) -> &'static str {
        match self {
            Self::PointerDown => "mousedown",
            Self::PointerMove => "mousemove",
            Self::KeyPress => "keypress",
            Self::Scroll => "scroll",
            Self::TouchStart => "touchstart",
        }
    }
}

/// Step the page takes when the session runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    /// Show the expiry warning.
    Warn(&'static str),

    /// Navigate to the given page.
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active { deadline: Timestamp },
    Expired { redirect_at: Timestamp },
    Done,
}

/// Warns after a period without activity, then redirects to the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTimeout {
    timeout: SignedDuration,
    phase: Phase,
}

impl SessionTimeout {
    /// Countdown of `timeout` starting at `now`.
    pub fn new(timeout: SignedDuration, now: Timestamp) -> Self {
        Self {
            timeout,
            phase: Phase::Active {
                deadline: after(now, timeout),
            },
        }
    }

    /// Countdown of whole minutes.
    pub fn with_minutes(minutes: i64, now: Timestamp) -> Self {
        Self::new(SignedDuration::from_mins(minutes), now)
    }

    /// Idle time allowed
    pub fn timeout(&self) -> SignedDuration {
        self.timeout
    }

    /// Restart the countdown. Ignored once the session has expired.
    pub fn record_activity(&mut self, now: Timestamp) {
        if let Phase::Active { .. } = self.phase {
            self.phase = Phase::Active {
                deadline: after(now, self.timeout),
            };
        }
    }

    /// Whether the warning has fired
    pub fn is_expired(&self) -> bool {
        !matches!(self.phase, Phase::Active { .. })
    }

    /// Advance to `now` and return the action that just became due, if any.
    pub fn poll(&mut self, now: Timestamp) -> Option<SessionAction> {
        match self.phase {
            Phase::Active { deadline } if now >= deadline => {
                self.phase = Phase::Expired {
                    redirect_at: after(now, LOGIN_REDIRECT_DELAY),
                };

                Some(SessionAction::Warn(SESSION_EXPIRED))
            }
            Phase::Expired { redirect_at } if now >= redirect_at => {
                self.phase = Phase::Done;

                Some(SessionAction::Redirect(LOGIN_PAGE))
            }
            _ => None,
        }
    }
}

fn after(now: Timestamp, timeout: SignedDuration) -> Timestamp {
    now.checked_add(timeout).unwrap_or(Timestamp::MAX)
}
