use std::path::PathBuf;

use bytepair::{tokenizer::train_tokenizer_dir, training::BpeTrainerOptions};

use crate::logging::LogArgs;

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Input text files.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[clap(flatten)]
    logging: LogArgs,

    /// Target vocab size; specials and byte tokens included.
    #[arg(long, default_value = "8000")]
    vocab_size: usize,

    /// Read at most this many lines from each file; 0 reads everything.
    #[arg(long)]
    max_lines: Option<usize>,

    /// Chunk segmentation regex; defaults to the built-in pattern.
    #[arg(long)]
    regex: Option<String>,

    /// Disable parallel pair counting.
    #[arg(long)]
    serial: bool,

    /// Directory to write the tokenizer artifacts to.
    #[arg(long)]
    output_dir: PathBuf,
}

impl TrainArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let mut options = BpeTrainerOptions::new(self.vocab_size).with_parallel(!self.serial);
        if let Some(regex) = &self.regex {
            options = options.with_pattern(regex.as_str());
        }

        log::info!("Training on {} file(s)", self.files.len());
        let results = train_tokenizer_dir::<u32, _, _>(
            self.files.as_slice(),
            &self.output_dir,
            options,
            self.max_lines,
        )?;

        if results.stopped_early() {
            log::warn!(
                "Ran out of pairs: vocab_size {} < requested {}",
                results.vocab_size(),
                results.requested_vocab_size
            );
        }
        log::info!(
            "Saved vocab_size={} num_merges={} to {}",
            results.vocab_size(),
            results.num_merges(),
            self.output_dir.display()
        );

        Ok(())
    }
}
