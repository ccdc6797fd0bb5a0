//! Protection settings.

use serde::Deserialize;

/// Which deterrents are active. Deserializing a partial object fills the
/// remaining fields from the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one switch per deterrent, mirroring the config object"
)]
pub struct ProtectionConfig {
    /// Suppress the context menu on protected pages.
    pub disable_right_click: bool,
    /// Block devtools, view-source and save shortcuts.
    pub disable_key_shortcuts: bool,
    /// Poll the window size for docked devtools.
    pub detect_dev_tools: bool,
    /// Apply `user-select: none`.
    pub prevent_text_selection: bool,
    /// Show the security overlay when devtools are detected.
    pub show_warning_on_detect: bool,
    /// Leave for the security warning page when devtools are detected.
    pub redirect_on_detect: bool,
    /// Overlay watermarks with the viewer's email.
    pub watermark_enabled: bool,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            disable_right_click: true,
            disable_key_shortcuts: true,
            detect_dev_tools: true,
            prevent_text_selection: false,
            show_warning_on_detect: true,
            redirect_on_detect: false,
            watermark_enabled: true,
        }
    }
}
