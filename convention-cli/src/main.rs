//! `convention` - aggregate resource definitions by convention.

use std::io::{self, Write};

use clap::Parser;
use convention_cli::{run, Cli};
use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str =
    "convention_cli=debug,convention_config=debug,convention_resources=debug,convention_directory=debug";

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();

    let exit_code = match run(&cli).and_then(|document| print(&document)) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

fn print(document: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(document.as_bytes())?;
    if !document.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
