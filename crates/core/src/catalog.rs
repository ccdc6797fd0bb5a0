//! Catalog Store

use std::cmp::Reverse;

use crate::{
    courses::{Course, CourseId},
    fixtures::{CoursesFixture, FixtureError},
};

/// Ordered in-memory course list for the current page session.
///
/// Contents are replaced wholesale on each fetch; the latest fetch wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStore {
    courses: Vec<Course>,
}

impl CatalogStore {
    /// Catalog holding `courses` in the given order.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Catalog built from the bundled sample fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture fails to parse.
    pub fn sample() -> Result<Self, FixtureError> {
        CoursesFixture::sample().map(|fixture| Self::from_courses(fixture.courses))
    }

    /// Course by key
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| &course.id == id)
    }

    /// Courses in display order
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Courses as a slice
    pub fn as_slice(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Swap in a freshly fetched list.
    pub fn replace(&mut self, courses: Vec<Course>) {
        self.courses = courses;
    }

    /// Reorder newest first. Courses without a creation time keep their
    /// relative order after the dated ones.
    pub fn sort_newest_first(&mut self) {
        self.courses
            .sort_by_key(|course| (course.created_at.is_none(), Reverse(course.created_at)));
    }
}

impl<'a> IntoIterator for &'a CatalogStore {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}
