use anyhow::Result;
use clap::Parser;
use support_bank::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
