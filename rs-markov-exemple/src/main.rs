use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rs_markov_core::io::DEFAULT_SEPARATORS;
use rs_markov_core::{ChainConfig, MarkovChain, OutputMode, StreamingWordSource};

/// Learn a word-level Markov chain from text and print generated words.
#[derive(Parser)]
#[command(name = "rs-markov-exemple", version)]
struct Args {
    /// Text files to learn from. Reads stdin when none are given.
    files: Vec<PathBuf>,

    /// Number of trailing words used as context.
    #[arg(short, long, default_value_t = 1)]
    order: usize,

    /// Number of words to generate.
    #[arg(short = 'n', long, default_value_t = 50)]
    count: usize,

    /// Fixed seed, for reproducible output.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output mode: 'random' or 'probable'.
    #[arg(short, long, default_value = "random")]
    mode: OutputMode,

    /// Word separator sequence (repeatable). Defaults to whitespace.
    #[arg(long = "separator")]
    separators: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Verbosity is controlled with RUST_LOG (ex. RUST_LOG=debug)
    env_logger::init();
    let args = Args::parse();

    // The order is validated here: 0 or more than 255 is an error
    let mut config = ChainConfig::new(args.order)?.with_mode(args.mode);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let mut chain = MarkovChain::from_config(&config)?;

    let separators: Vec<String> = if args.separators.is_empty() {
        DEFAULT_SEPARATORS.iter().map(|s| (*s).to_owned()).collect()
    } else {
        args.separators
    };

    // Each input is fed separately: every file starts from an empty context
    if args.files.is_empty() {
        let source = StreamingWordSource::with_separators(io::stdin().lock(), &separators);
        let processed = chain.feed(source)?;
        info!("Learned {} words from stdin", processed);
    }
    for path in &args.files {
        let reader = BufReader::new(File::open(path)?);
        let processed = chain.feed(StreamingWordSource::with_separators(reader, &separators))?;
        info!("Learned {} words from {}", processed, path.display());
    }

    info!(
        "Model has {} unique words and {} states",
        chain.unique_word_count(),
        chain.state_count()
    );

    // A reset means the chain hit a dead end and jumped elsewhere:
    // start a new line so the output reads as separate passages
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut line_started = false;
    for _ in 0..args.count {
        let generated = chain.generate()?;
        let Some(word) = generated.word else {
            continue;
        };
        if line_started {
            write!(out, " ")?;
        }
        write!(out, "{}", word)?;
        line_started = true;
        if generated.reset {
            writeln!(out)?;
            line_started = false;
        }
    }
    if line_started {
        writeln!(out)?;
    }

    Ok(())
}
