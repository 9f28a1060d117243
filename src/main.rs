//! CLI entry point for browsing coloring pages and playing jigsaw puzzles

use clap::Parser;
use playcorner::io::cli::{Cli, CommandRunner};
use playcorner::io::logging::{Logger, StderrSink};

fn main() -> playcorner::Result<()> {
    let cli = Cli::parse();
    let logger = Logger::new(StderrSink, cli.log_level);
    let runner = CommandRunner::new(cli, logger);
    runner.run(&mut std::io::stdout().lock())
}
