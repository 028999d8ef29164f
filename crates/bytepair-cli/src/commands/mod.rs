use crate::commands::{
    decode::DecodeArgs,
    encode::EncodeArgs,
    inspect::InspectArgs,
    train::TrainArgs,
};

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod train;

/// Subcommands for bpair.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train a tokenizer on text files.
    Train(TrainArgs),

    /// Encode text lines into token id lines.
    Encode(EncodeArgs),

    /// Decode token id lines into text.
    Decode(DecodeArgs),

    /// Print vocab and merge statistics.
    Inspect(InspectArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
        }
    }
}
