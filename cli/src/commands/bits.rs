use anyhow::Result;
use bitio::process::{bits_dump, bits_pack, bits_unpack};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum BitsCommands {
    /// Print the bits of a binary file, MSB first
    Dump {
        /// Input file
        input: PathBuf,
        /// Only print the first N bits
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Pack a text file of 0/1 digits into bytes
    Pack {
        /// Input text file (whitespace and '_' are ignored)
        input: PathBuf,
        /// Output file (optional, defaults to input with .bin extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pad the trailing partial byte with ones instead of zeros
        #[arg(long)]
        ones: bool,
    },
    /// Write the bits of a binary file as 0/1 text
    Unpack {
        /// Input file
        input: PathBuf,
        /// Output file (optional, defaults to input with .bits extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn handle(cmd: BitsCommands) -> Result<()> {
    match cmd {
        BitsCommands::Dump { input, limit } => {
            println!("{}", bits_dump(&input, limit)?);
            Ok(())
        }
        BitsCommands::Pack {
            input,
            output,
            ones,
        } => Ok(bits_pack(&input, &output, ones)?),
        BitsCommands::Unpack { input, output } => Ok(bits_unpack(&input, &output)?),
    }
}
