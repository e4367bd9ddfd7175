use clap::Parser;

mod commands;

use commands::bits::{self, BitsCommands};

#[derive(Parser)]
#[command(name = "bitio-cli")]
#[command(about = "Inspect and build files bit by bit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: BitsCommands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bits::handle(cli.command)
}
