//! Terminal catalog tables

use std::io;

use skillorbit::{
    courses::Course,
    format::{format_count, format_currency},
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

const HEADER: [&str; 9] = [
    "ID", "Title", "Category", "Price", "Original", "Rating", "Students", "Duration", "Badge",
];

/// Render courses as a table, one row per course in the given order.
pub fn catalog_table(courses: &[Course]) -> String {
    let mut builder = Builder::default();

    builder.push_record(HEADER);

    for course in courses {
        builder.push_record([
            course.id.to_string(),
            course.title.clone(),
            course.category.clone(),
            format_currency(course.price),
            format_currency(course.original_price),
            course.rating.normalize().to_string(),
            format_count(course.student_count),
            course.duration.clone(),
            course.badge_label().unwrap_or_default().to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Alignment::center());
    table.modify(Columns::new(3..7), Alignment::right());

    table.to_string()
}

/// Write the catalog table followed by a newline.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub fn write_catalog_table(mut out: impl io::Write, courses: &[Course]) -> io::Result<()> {
    writeln!(out, "{}", catalog_table(courses))
}

#[cfg(test)]
mod tests {
    use skillorbit::fixtures::CoursesFixture;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn lists_every_course_with_rupee_prices() -> TestResult {
        let courses = CoursesFixture::sample()?.courses;
        let table = catalog_table(&courses);

        assert!(table.contains("Python Programming for Beginners"));
        assert!(table.contains("₹1,499"));
        assert!(table.contains("₹4,999"));
        assert!(table.contains("Hot"));

        let python = table.find("Python Programming");
        let mobile = table.find("Mobile App Development");
        assert!(python.is_some() && python < mobile);

        Ok(())
    }

    #[test]
    fn writes_table_with_trailing_newline() -> TestResult {
        let mut out = Vec::new();

        write_catalog_table(&mut out, &[])?;

        let text = String::from_utf8(out)?;
        assert!(text.contains("Title"));
        assert!(text.ends_with('\n'));

        Ok(())
    }
}
