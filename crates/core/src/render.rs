//! Course card rendering
//!
//! Cards are plain HTML fragments. The class names are the contract with the
//! storefront stylesheet.

use std::borrow::Cow;

use crate::{
    courses::Course,
    format::{format_card_price, format_count},
};

/// Render one course card.
pub fn render_course_card(course: &Course) -> String {
    let title = escape_html(&course.title);

    let badge = course.badge_label().map_or_else(String::new, |badge| {
        format!(r#"<span class="course-badge">{}</span>"#, escape_html(badge))
    });

    format!(
        r#"<div class="course-card" data-course-id="{id}">
    <div class="course-image">
        <img src="{image}" alt="{title}">
        {badge}
    </div>
    <div class="course-content">
        <span class="course-category">{category}</span>
        <h3>{title}</h3>
        <div class="course-meta">
            <span><i class="fas fa-clock"></i> {duration}</span>
            <span><i class="fas fa-users"></i> {students}</span>
        </div>
        <div class="course-footer">
            <div class="course-price">
                {price}
                <span class="original">{original_price}</span>
            </div>
            <div class="course-rating">
                <i class="fas fa-star"></i>
                {rating}
            </div>
        </div>
    </div>
</div>"#,
        id = escape_html(course.id.as_str()),
        image = escape_html(&course.image_url),
        category = escape_html(&course.category),
        duration = escape_html(&course.duration),
        students = format_count(course.student_count),
        price = format_card_price(course.price),
        original_price = format_card_price(course.original_price),
        rating = course.rating.normalize(),
    )
}

/// Render one card per course, preserving order.
pub fn render_course_cards<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Vec<String> {
    courses.into_iter().map(render_course_card).collect()
}

/// Render the full catalog grid contents.
pub fn render_course_grid<'a>(courses: impl IntoIterator<Item = &'a Course>) -> String {
    render_course_cards(courses).concat()
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);

    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    Cow::Owned(escaped)
}
