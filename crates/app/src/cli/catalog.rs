use std::{io, path::PathBuf};

use clap::{Args, Subcommand};
use skillorbit::{
    catalog::CatalogStore, courses::Course, fixtures::CoursesFixture, render::render_course_grid,
};
use skillorbit_app::{context::AppContext, listing::write_catalog_table};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Print the course grid markup
    Render(FixtureArgs),

    /// Print the catalog as a table
    List(FixtureArgs),
}

#[derive(Debug, Args)]
pub(crate) struct FixtureArgs {
    /// Courses YAML file; the bundled sample catalog when omitted
    #[arg(long)]
    fixture: Option<PathBuf>,
}

impl FixtureArgs {
    fn load(&self) -> Result<CatalogStore, String> {
        let fixture = match &self.fixture {
            Some(path) => CoursesFixture::from_path(path),
            None => CoursesFixture::sample(),
        }
        .map_err(|error| format!("failed to load catalog: {error}"))?;

        Ok(CatalogStore::from_courses(fixture.courses))
    }
}

pub(crate) fn run(command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Render(args) => {
            let catalog = args.load()?;

            println!("{}", render_course_grid(&catalog));
        }
        CatalogSubcommand::List(args) => {
            let catalog = args.load()?;

            print_table(catalog.as_slice())?;
        }
    }

    Ok(())
}

#[derive(Debug, Args)]
pub(crate) struct CoursesArgs {
    /// Print card markup instead of a table
    #[arg(long)]
    html: bool,
}

pub(crate) async fn courses(context: &AppContext, args: CoursesArgs) -> Result<(), String> {
    let courses = context.storefront.get_courses().await;

    if courses.is_empty() {
        println!("no courses found");
        return Ok(());
    }

    if args.html {
        println!("{}", render_course_grid(&courses));
    } else {
        print_table(&courses)?;
    }

    Ok(())
}

fn print_table(courses: &[Course]) -> Result<(), String> {
    write_catalog_table(io::stdout().lock(), courses)
        .map_err(|error| format!("failed to write catalog table: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_bundled_catalog() {
        let command = CatalogCommand {
            command: CatalogSubcommand::List(FixtureArgs { fixture: None }),
        };

        assert_eq!(run(command), Ok(()));
    }

    #[test]
    fn missing_fixture_is_reported() {
        let command = CatalogCommand {
            command: CatalogSubcommand::List(FixtureArgs {
                fixture: Some(PathBuf::from("does/not/exist.yml")),
            }),
        };

        let error = run(command).err().unwrap_or_default();

        assert!(error.starts_with("failed to load catalog"), "{error}");
    }
}
