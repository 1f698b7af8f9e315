//! Copies `<source>` to `<destination>` after acquiring administrator rights.

use clap::Parser;
use install_tool::{PrivilegedCommand, SystemAuthority, cli::Args};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Filter directives for the internal trace, e.g. `INSTALL_TOOL_LOG=debug`.
const LOG_ENV: &str = "INSTALL_TOOL_LOG";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::OFF.into())
                .with_env_var(LOG_ENV)
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let args = Args::parse();

    let result = PrivilegedCommand::copy(&args.source, &args.destination)
        .and_then(|command| install_tool::run(&SystemAuthority::default(), &command));

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}
