//! Courses

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Course ID
pub type CourseId = TypedId<Course>;

/// A course listed in the storefront catalog.
///
/// Prices are whole rupees. Records are immutable once loaded for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Document key.
    pub id: CourseId,

    /// Display title.
    pub title: String,

    /// Category label shown above the title.
    pub category: String,

    /// Cover image URL.
    #[serde(alias = "image")]
    pub image_url: String,

    /// Current price.
    pub price: u64,

    /// List price shown struck through next to the current price.
    pub original_price: u64,

    /// Average rating, 0 to 5.
    pub rating: Decimal,

    /// Number of enrolled students.
    #[serde(alias = "students")]
    pub student_count: u64,

    /// Free-text duration, e.g. "45 hours".
    pub duration: String,

    /// Optional promotional label; empty labels are treated as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    /// Creation time, used for newest-first ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Course {
    /// Badge text when there is something to show.
    pub fn badge_label(&self) -> Option<&str> {
        self.badge.as_deref().filter(|badge| !badge.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn accepts_sample_field_names() -> TestResult {
        let course: Course = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Python Programming for Beginners",
            "category": "Programming",
            "image": "https://example.test/python.jpg",
            "price": 1499,
            "originalPrice": 4999,
            "rating": 4.9,
            "students": 8750,
            "duration": "28 hours",
            "badge": "Hot"
        }))?;

        assert_eq!(course.id.as_str(), "3");
        assert_eq!(course.image_url, "https://example.test/python.jpg");
        assert_eq!(course.student_count, 8750);
        assert_eq!(course.badge_label(), Some("Hot"));
        assert!(course.created_at.is_none());

        Ok(())
    }

    #[test]
    fn empty_badge_has_no_label() -> TestResult {
        let course: Course = serde_json::from_value(serde_json::json!({
            "id": "ux",
            "title": "UI/UX Design Fundamentals",
            "category": "Design",
            "imageUrl": "https://example.test/ux.jpg",
            "price": 2499,
            "originalPrice": 7999,
            "rating": 4.6,
            "studentCount": 2890,
            "duration": "38 hours",
            "badge": ""
        }))?;

        assert_eq!(course.badge_label(), None);

        Ok(())
    }
}
