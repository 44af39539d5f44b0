use std::{
    borrow::Cow,
    io::{self, Read, Write},
};

use abc_dfa_lib::{
    automaton::dfa::AbcDfa,
    config::{GeneralConfig, OutputFormat, RecognizerConfig},
    logger::Logger,
    recognizer::{Recognizer, SerializableRecognitionResult},
    trace::WriterTrace,
};
use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "abc-dfa")]
#[command(version = "0.1")]
#[command(about = "Recognize words of (a + bc)* read from stdin", long_about = None)]
struct Args {
    /// Print every transition before the verdict.
    #[arg(long)]
    log: bool,

    /// TOML file with a recognizer config.
    #[arg(short, long)]
    config: Option<String>,

    /// Print the result as JSON instead of `true` / `false`.
    #[arg(long)]
    json: bool,

    /// End the verdict with a newline.
    #[arg(long)]
    newline: bool,

    /// Print the automaton in graphviz format and exit.
    #[arg(long)]
    graphviz: bool,
}

impl Args {
    /// Loads the config file, if any, and lets the flags override it.
    fn to_config(&self) -> anyhow::Result<RecognizerConfig> {
        let mut config = RecognizerConfig::from_optional_file(self.config.as_ref())?;

        if self.log {
            config.set_trace(true);
        }
        if self.json {
            config.set_output(OutputFormat::Json);
        }
        if self.newline {
            config.set_trailing_newline(true);
        }

        Ok(config)
    }
}

/// The first whitespace separated token of `input`, or the empty string.
///
/// Stdin is not required to be UTF-8. Malformed sequences turn into
/// U+FFFD, which is outside of the alphabet and rejects the input.
fn first_token(input: &[u8]) -> Cow<'_, str> {
    let token = input
        .split(|b| b.is_ascii_whitespace())
        .find(|token| !token.is_empty())
        .unwrap_or_default();
    String::from_utf8_lossy(token)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args = Args::parse();
    let dfa = AbcDfa::new();

    if args.graphviz {
        print!("{}", dfa.to_graphviz());
        return Ok(());
    }

    let config = args.to_config()?;
    let logger = Logger::from_config(config.logger(), "Recognizer".into())?;

    let mut stdin = Vec::new();
    io::stdin()
        .read_to_end(&mut stdin)
        .context("failed to read stdin")?;
    let token = first_token(&stdin);
    let input = token.as_ref();
    tracing::debug!(input, "read input token");

    let output = *config.get_output();
    let trailing_newline = *config.get_trailing_newline();
    let recognizer = Recognizer::new(&dfa, config, logger.as_ref());

    let mut stdout = io::stdout().lock();

    match output {
        OutputFormat::Plain => {
            let mut trace = WriterTrace::new(&mut stdout);
            let res = recognizer.recognize_into(input, &mut trace);
            trace.finish().context("failed to write trace")?;

            write!(stdout, "{}", res.is_accepted())?;
        }
        OutputFormat::Json => {
            let res = recognizer.recognize(input);
            let json = SerializableRecognitionResult::new(input, res).to_json()?;

            write!(stdout, "{}", json)?;
        }
    }

    if trailing_newline {
        writeln!(stdout)?;
    }
    stdout.flush()?;

    Ok(())
}
