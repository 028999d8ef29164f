use std::io::{BufRead, Write};

use bytepair::Tokenizer;

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    model_dir::ModelDirArgs,
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    model: ModelDirArgs,

    /// Wrap each line in `<BOS>` / `<EOS>`.
    #[arg(long)]
    add_special_tokens: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl EncodeArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.model.load_tokenizer()?;
        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_encode(&mut reader, &mut writer, &tokenizer, self.add_special_tokens)
    }
}

/// Writes one line of space-separated ids per input line.
///
/// Line terminators are part of the encoded text.
fn run_encode(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    tokenizer: &Tokenizer<u32>,
    add_special_tokens: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut line = String::new();
    while reader.read_line(&mut line)? > 0 {
        let tokens = tokenizer.encode(&line, add_special_tokens);

        for (idx, token) in tokens.iter().enumerate() {
            write!(writer, "{}{}", if idx == 0 { "" } else { " " }, token)?;
        }
        writeln!(writer)?;
        line.clear();
    }
    writer.flush()?;
    Ok(())
}
