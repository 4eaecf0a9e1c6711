//! The `descent` command-line tool.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use tracing_subscriber::EnvFilter;

mod cli;

fn main() {
    better_panic::install();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli: cli::Cli = argh::from_env();
    if let Err(error) = cli.handle() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
