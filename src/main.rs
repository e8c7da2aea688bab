//! CLI entry point for the photomosaic builder

use clap::Parser;
use photomosaic::io::cli::{Cli, FileProcessor};
use photomosaic::io::logging::{init_logging, level_for};

fn main() -> photomosaic::Result<()> {
    let cli = Cli::parse();
    init_logging(level_for(cli.quiet, cli.verbose))?;
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
