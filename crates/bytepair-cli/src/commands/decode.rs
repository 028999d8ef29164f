use std::io::{BufRead, Write};

use bytepair::Tokenizer;

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    model_dir::ModelDirArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    model: ModelDirArgs,

    /// Render special tokens by name instead of dropping them.
    #[arg(long)]
    keep_special_tokens: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl DecodeArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.model.load_tokenizer()?;
        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_decode(
            &mut reader,
            &mut writer,
            &tokenizer,
            !self.keep_special_tokens,
        )
    }
}

/// Decodes one line of space-separated ids at a time.
///
/// Fields that are not ids decode as `<UNK>`.
fn run_decode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &Tokenizer<u32>,
    skip_special_tokens: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let unk = tokenizer.specials().unk();
    for (idx, line) in reader.lines().enumerate() {
        let tokens = line?
            .split_whitespace()
            .map(|field| {
                field.parse().unwrap_or_else(|_| {
                    log::warn!("line {}: bad token {field:?}", idx + 1);
                    unk
                })
            })
            .collect::<Vec<u32>>();

        write!(writer, "{}", tokenizer.decode(&tokens, skip_special_tokens))?;
    }
    writer.flush()?;
    Ok(())
}
