//! Viewer watermark overlay.

use crate::render::escape_html;

/// Label used when the viewer has no email.
pub const WATERMARK_FALLBACK: &str = "SkillOrbit User";

/// Anchor of one label, as CSS inset declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkPosition {
    /// Vertical inset property and value.
    pub vertical: (&'static str, &'static str),
    /// Horizontal inset property and value.
    pub horizontal: (&'static str, &'static str),
}

/// Where the labels go, in render order.
pub const WATERMARK_POSITIONS: [WatermarkPosition; 5] = [
    WatermarkPosition {
        vertical: ("top", "20%"),
        horizontal: ("left", "20%"),
    },
    WatermarkPosition {
        vertical: ("top", "20%"),
        horizontal: ("right", "20%"),
    },
    WatermarkPosition {
        vertical: ("top", "50%"),
        horizontal: ("left", "50%"),
    },
    WatermarkPosition {
        vertical: ("bottom", "20%"),
        horizontal: ("left", "20%"),
    },
    WatermarkPosition {
        vertical: ("bottom", "20%"),
        horizontal: ("right", "20%"),
    },
];

/// One rotated overlay label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watermark {
    /// Label text
    pub text: String,
    /// Placement
    pub position: WatermarkPosition,
}

impl Watermark {
    /// Inline style for the label.
    pub fn style(&self) -> String {
        let (v_prop, v_val) = self.position.vertical;
        let (h_prop, h_val) = self.position.horizontal;

        format!("{v_prop}: {v_val}; {h_prop}: {h_val}; transform: rotate(-30deg) translate(-50%, -50%);")
    }

    /// Label as escaped HTML.
    pub fn render(&self) -> String {
        format!(
            r#"<div class="watermark" style="{}">{}</div>"#,
            self.style(),
            escape_html(&self.text)
        )
    }
}

/// One label per fixed position, showing the viewer's email when known.
pub fn watermarks(email: Option<&str>) -> Vec<Watermark> {
    let text = email
        .filter(|email| !email.is_empty())
        .unwrap_or(WATERMARK_FALLBACK);

    WATERMARK_POSITIONS
        .iter()
        .map(|&position| Watermark {
            text: text.to_string(),
            position,
        })
        .collect()
}

/// Concatenated markup for `marks`.
pub fn render_watermarks(marks: &[Watermark]) -> String {
    marks.iter().map(Watermark::render).collect()
}
