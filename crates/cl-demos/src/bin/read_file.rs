//! Prints a text file to stdout, line by line.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cl_demos::assets::{RootArgs, TEST_TEXT};
use cl_demos::lines::copy_lines;
use cl_engine::logging::{init_logging, LoggingConfig};

#[derive(Parser)]
#[command(version, about = "Print a text file to stdout")]
struct Cli {
    #[command(flatten)]
    root: RootArgs,

    /// File to print, relative to the root.
    #[arg(value_name = "FILE", default_value = TEST_TEXT)]
    file: PathBuf,
}

fn main() -> Result<()> {
    init_logging(LoggingConfig {
        default_level: log::LevelFilter::Warn,
        ..LoggingConfig::default()
    });

    let cli = Cli::parse();
    let path = cli.root.asset_root().resolve(&cli.file);

    let file = File::open(&path).with_context(|| format!("failed to open {}", path.display()))?;
    let stdout = io::stdout().lock();

    let count = copy_lines(BufReader::new(file), BufWriter::new(stdout))
        .with_context(|| format!("failed to print {}", path.display()))?;

    log::debug!("printed {count} lines from {}", path.display());
    Ok(())
}
