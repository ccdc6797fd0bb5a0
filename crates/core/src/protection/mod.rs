//! Client-side content protection.
//!
//! Every heuristic here is advisory: a determined viewer can bypass all of
//! them. Each one is a plain state machine fed by the page and polled with an
//! explicit timestamp, so the browser layer only has to forward events and
//! act on the decisions.

use jiff::{SignedDuration, Timestamp};
use tracing::warn;

mod config;
mod devtools;
mod interval;
mod session;
mod shortcuts;
mod watermark;

pub use config::ProtectionConfig;
pub use devtools::{
    DEVTOOLS_POLL_PERIOD, DEVTOOLS_THRESHOLD, DevtoolsDetector, DevtoolsMonitor, WindowMetrics,
};
pub use interval::Interval;
pub use session::{
    ActivityEvent, DEFAULT_SESSION_MINUTES, LOGIN_PAGE, LOGIN_REDIRECT_DELAY, SESSION_EXPIRED,
    SessionAction, SessionTimeout,
};
pub use shortcuts::{DEVTOOLS_DISABLED, KeyDecision, KeyPress, VIEW_SOURCE_DISABLED, intercept};
pub use watermark::{
    WATERMARK_FALLBACK, WATERMARK_POSITIONS, Watermark, WatermarkPosition, render_watermarks,
    watermarks,
};

/// Body class marking a page as protected.
pub const PROTECTED_CONTENT_CLASS: &str = "protected-content";

/// Warning shown when the context menu is suppressed.
pub const RIGHT_CLICK_DISABLED: &str = "Right-click is disabled on this page.";

/// Redirect target after devtools detection.
pub const SECURITY_WARNING_PAGE: &str = "/security-warning.html";

/// How often protected pages clear the console.
pub const CONSOLE_CLEAR_PERIOD: SignedDuration = SignedDuration::from_secs(2);

/// Console banner printed at startup, as `(text, css)` pairs.
pub const STARTUP_BANNER: [(&str, &str); 2] = [
    (
        "%c⚠️ Warning!",
        "color: red; font-size: 40px; font-weight: bold;",
    ),
    (
        "%cThis is a protected area. Unauthorized access is prohibited.",
        "color: red; font-size: 16px;",
    ),
];

/// Banner re-printed after each console clear.
pub const CONSOLE_BANNER: (&str, &str) = ("%c⚠️ Protected Content", "color: red; font-size: 20px;");

/// Inline style that disables text selection.
pub const SELECTION_NONE_STYLE: &str = "user-select: none; -webkit-user-select: none;";

/// `controlsList` value for protected videos.
pub const VIDEO_CONTROLS_LIST: &str = "nodownload";

/// Overlay content shown when devtools are detected.
pub const SECURITY_OVERLAY_HTML: &str = r#"<div style="text-align: center;">
    <i class="fas fa-shield-alt" style="font-size: 64px; color: #FF6B6B; margin-bottom: 20px;"></i>
    <h2>Security Alert</h2>
    <p style="color: #B4B4C7; margin-bottom: 20px;">
        Developer tools have been detected.<br>
        Please close them to continue viewing.
    </p>
    <button onclick="location.reload()" class="btn btn-primary">
        Refresh Page
    </button>
</div>"#;

/// What the page should do after devtools were detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionResponse {
    /// Cover the page with the security overlay.
    pub show_overlay: bool,
    /// Page to leave for, if any.
    pub redirect_to: Option<&'static str>,
}

/// Protection policy for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Protection {
    config: ProtectionConfig,
    protected: bool,
}

impl Protection {
    /// `protected` is whether the page carries [`PROTECTED_CONTENT_CLASS`].
    pub fn new(config: ProtectionConfig, protected: bool) -> Self {
        Self { config, protected }
    }

    /// Active settings
    pub fn config(&self) -> &ProtectionConfig {
        &self.config
    }

    /// Whether the page is marked protected
    pub fn is_protected(&self) -> bool {
        self.protected
    }

    /// Warning to show if the context menu should be suppressed.
    pub fn on_context_menu(&self) -> Option<&'static str> {
        (self.config.disable_right_click && self.protected).then_some(RIGHT_CLICK_DISABLED)
    }

    /// Decide what to do with a key press.
    pub fn on_key(&self, press: &KeyPress) -> KeyDecision {
        if self.config.disable_key_shortcuts {
            intercept(press)
        } else {
            KeyDecision::Allow
        }
    }

    /// Devtools monitor, if detection is enabled.
    pub fn devtools_monitor(&self, start: Timestamp) -> Option<DevtoolsMonitor> {
        self.config
            .detect_dev_tools
            .then(|| DevtoolsMonitor::new(start))
    }

    /// React to a devtools detection.
    pub fn on_devtools_detected(&self) -> DetectionResponse {
        warn!(protected = self.protected, "devtools access detected");

        DetectionResponse {
            show_overlay: self.config.show_warning_on_detect && self.protected,
            redirect_to: self
                .config
                .redirect_on_detect
                .then_some(SECURITY_WARNING_PAGE),
        }
    }

    /// Console clearing timer; only protected pages get one.
    pub fn console_guard(&self, start: Timestamp) -> Option<Interval> {
        self.protected
            .then(|| Interval::new(CONSOLE_CLEAR_PERIOD, start))
    }

    /// Watermarks for the viewer; none when disabled.
    pub fn watermarks(&self, email: Option<&str>) -> Vec<Watermark> {
        if self.config.watermark_enabled {
            watermarks(email)
        } else {
            Vec::new()
        }
    }

    /// Body style to apply when text selection is disabled.
    pub fn selection_style(&self) -> Option<&'static str> {
        self.config
            .prevent_text_selection
            .then_some(SELECTION_NONE_STYLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_menu_only_blocked_on_protected_pages() {
        let open = Protection::new(ProtectionConfig::default(), false);
        let locked = Protection::new(ProtectionConfig::default(), true);

        assert_eq!(open.on_context_menu(), None);
        assert_eq!(locked.on_context_menu(), Some(RIGHT_CLICK_DISABLED));
    }

    #[test]
    fn shortcuts_pass_when_disabled() {
        let protection = Protection::new(
            ProtectionConfig {
                disable_key_shortcuts: false,
                ..ProtectionConfig::default()
            },
            true,
        );

        assert_eq!(protection.on_key(&KeyPress::new("F12")), KeyDecision::Allow);
    }

    #[test]
    fn detection_response_follows_config() {
        let default = Protection::new(ProtectionConfig::default(), true);
        assert_eq!(
            default.on_devtools_detected(),
            DetectionResponse {
                show_overlay: true,
                redirect_to: None,
            }
        );

        let strict = Protection::new(
            ProtectionConfig {
                redirect_on_detect: true,
                ..ProtectionConfig::default()
            },
            false,
        );
        assert_eq!(
            strict.on_devtools_detected(),
            DetectionResponse {
                show_overlay: false,
                redirect_to: Some(SECURITY_WARNING_PAGE),
            }
        );
    }

    #[test]
    fn console_guard_runs_every_two_seconds_on_protected_pages() {
        let start = Timestamp::UNIX_EPOCH;

        assert!(
            Protection::new(ProtectionConfig::default(), false)
                .console_guard(start)
                .is_none()
        );

        let guard = Protection::new(ProtectionConfig::default(), true).console_guard(start);
        assert_eq!(guard.map(|interval| interval.period()), Some(CONSOLE_CLEAR_PERIOD));
    }

    #[test]
    fn watermarks_and_selection_respect_config() {
        let off = Protection::new(
            ProtectionConfig {
                watermark_enabled: false,
                prevent_text_selection: true,
                ..ProtectionConfig::default()
            },
            true,
        );

        assert!(off.watermarks(Some("a@b.c")).is_empty());
        assert_eq!(off.selection_style(), Some(SELECTION_NONE_STYLE));
        assert_eq!(Protection::default().selection_style(), None);
        assert_eq!(Protection::default().watermarks(None).len(), 5);
    }
}
