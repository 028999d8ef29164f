use std::path::PathBuf;

use bytepair::Tokenizer;

/// Model directory arg group.
#[derive(clap::Args, Debug)]
pub struct ModelDirArgs {
    /// Directory holding ``vocab.json``, ``merges.txt`` and ``config.json``.
    #[arg(long)]
    pub model_dir: PathBuf,
}

impl ModelDirArgs {
    /// Load the tokenizer.
    pub fn load_tokenizer(&self) -> Result<Tokenizer<u32>, Box<dyn std::error::Error>> {
        log::info!("Loading tokenizer from {}", self.model_dir.display());
        Ok(Tokenizer::load(&self.model_dir)?)
    }
}
