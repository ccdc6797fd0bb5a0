//! Fixtures

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::courses::Course;

/// Bundled sample catalog shown before (or instead of) a remote fetch.
pub const SAMPLE_COURSES_YAML: &str = include_str!("../fixtures/courses/sample.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two courses share a key
    #[error("Duplicate course id: {0}")]
    DuplicateCourse(String),
}

/// Wrapper for courses in YAML
#[derive(Debug, Deserialize)]
pub struct CoursesFixture {
    /// Courses in display order
    pub courses: Vec<Course>,
}

impl CoursesFixture {
    /// Parse a courses fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error when the YAML is malformed or two courses share an id.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: Self = serde_norway::from_str(yaml)?;

        let mut seen = rustc_hash::FxHashSet::default();

        for course in &fixture.courses {
            if !seen.insert(course.id.as_str()) {
                return Err(FixtureError::DuplicateCourse(course.id.to_string()));
            }
        }

        Ok(fixture)
    }

    /// Read and parse a courses fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    /// The bundled sample catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture fails to parse.
    pub fn sample() -> Result<Self, FixtureError> {
        Self::from_yaml(SAMPLE_COURSES_YAML)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn sample_fixture_has_six_courses_in_order() -> TestResult {
        let fixture = CoursesFixture::sample()?;

        let ids: Vec<&str> = fixture.courses.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);

        Ok(())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let yaml = r"
courses:
  - { id: a, title: A, category: C, image: i, price: 1, originalPrice: 2, rating: 4, students: 1, duration: 1h }
  - { id: a, title: B, category: C, image: i, price: 1, originalPrice: 2, rating: 4, students: 1, duration: 1h }
";

        let result = CoursesFixture::from_yaml(yaml);

        assert!(
            matches!(result, Err(FixtureError::DuplicateCourse(ref id)) if id == "a"),
            "expected DuplicateCourse, got {result:?}"
        );
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let result = CoursesFixture::from_yaml("courses: [");

        assert!(matches!(result, Err(FixtureError::Yaml(_))));
    }

    #[test]
    fn reads_fixture_from_disk() -> TestResult {
        let dir = std::env::temp_dir().join(format!("skillorbit-fixture-{}", std::process::id()));
        fs::create_dir_all(&dir)?;
        let path = dir.join("courses.yml");

        fs::File::create(&path)?.write_all(SAMPLE_COURSES_YAML.as_bytes())?;

        let fixture = CoursesFixture::from_path(&path)?;

        assert_eq!(fixture.courses.len(), 6);

        fs::remove_dir_all(dir)?;

        Ok(())
    }
}
