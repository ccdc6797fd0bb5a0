//! In-page anchor links.

/// Element id an in-page link points at. `None` for a bare `#` or a link to
/// another page.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("#courses", Some("courses"))]
    #[case("#faq", Some("faq"))]
    #[case("#", None)]
    #[case("/login.html", None)]
    #[case("", None)]
    fn resolves_in_page_targets(#[case] href: &str, #[case] expected: Option<&str>) {
        assert_eq!(anchor_target(href), expected);
    }
}
