use clap::{Parser, Subcommand};
use skillorbit_app::{config::AppConfig, context::AppContext};

mod account;
mod catalog;
mod enroll;

#[derive(Debug, Parser)]
#[command(name = "skillorbit", about = "SkillOrbit storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Work with a local catalog fixture
    Catalog(catalog::CatalogCommand),

    #[command(flatten)]
    Backend(BackendCommand),
}

/// Commands that talk to the storefront backend.
#[derive(Debug, Subcommand)]
enum BackendCommand {
    /// List the remote catalog, newest first
    Courses(catalog::CoursesArgs),

    /// Create an account and its profile
    SignUp(account::SignUpArgs),

    /// Sign in with email and password
    SignIn(account::SignInArgs),

    /// Send a password reset email
    ResetPassword(account::ResetPasswordArgs),

    /// Enroll the signed-in account in a course
    Enroll(enroll::EnrollArgs),

    /// Check whether a user has the admin role
    IsAdmin(account::IsAdminArgs),
}

impl BackendCommand {
    async fn run(self, context: &AppContext) -> Result<(), String> {
        match self {
            Self::Courses(args) => catalog::courses(context, args).await,
            Self::SignUp(args) => account::sign_up(context, args).await,
            Self::SignIn(args) => account::sign_in(context, args).await,
            Self::ResetPassword(args) => account::reset_password(context, args).await,
            Self::Enroll(args) => enroll::run(context, args).await,
            Self::IsAdmin(args) => account::is_admin(context, args).await,
        }
    }
}

impl Cli {
    /// Parse arguments after loading `.env`, if present.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Catalog(command) => catalog::run(command),
            Commands::Backend(command) => {
                let context = AppContext::from_config(&self.config)
                    .map_err(|error| format!("failed to initialize app context: {error}"))?;

                command.run(&context).await
            }
        }
    }
}
