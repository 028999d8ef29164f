use std::io::Write;

use bytepair::support::strings::string_from_utf8_lossy;

use crate::{input_output::OutputArgs, logging::LogArgs, model_dir::ModelDirArgs};

/// Args for the inspect command.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    model: ModelDirArgs,

    /// Number of merge rules to list.
    #[arg(long, default_value = "20")]
    rules: usize,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl InspectArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.model.load_tokenizer()?;
        let vocab = tokenizer.vocab();
        let mut writer = self.output.open_writer()?;

        writeln!(writer, "vocab_size: {}", vocab.vocab_size())?;
        writeln!(writer, "base_vocab_size: {}", vocab.base_vocab_size())?;
        writeln!(writer, "num_merges: {}", vocab.num_merges())?;
        writeln!(writer, "pattern: {}", vocab.segmentation().pattern().as_str())?;

        writeln!(writer, "special_tokens:")?;
        for (name, token) in vocab.specials().iter() {
            writeln!(writer, "  {token}: {name}")?;
        }

        let longest = vocab
            .merges()
            .rules()
            .iter()
            .filter_map(|rule| vocab.id_to_bytes(rule.token))
            .map(<[u8]>::len)
            .max()
            .unwrap_or(1);
        writeln!(writer, "longest_token_bytes: {longest}")?;

        let show = |token| {
            vocab
                .id_to_bytes(token)
                .map(|span| string_from_utf8_lossy(span.to_vec()))
                .unwrap_or_default()
        };

        writeln!(writer, "merges:")?;
        for (rank, rule) in vocab.merges().rules().iter().take(self.rules).enumerate() {
            let (a, b) = rule.pair;
            writeln!(
                writer,
                "  {rank}: {a} {b} -> {} {:?} + {:?} = {:?}",
                rule.token,
                show(a),
                show(b),
                show(rule.token)
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
