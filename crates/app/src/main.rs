//! SkillOrbit CLI

use std::process;

use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level)),
        )
        .init();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
