mod commands;
mod input_output;
mod logging;
mod model_dir;

use clap::Parser;
use commands::Commands;

/// bpair: train and run byte-level BPE tokenizers.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
