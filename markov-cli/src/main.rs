use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use markov_core::config::{DEFAULT_BUCKETS, DEFAULT_MAX_WORDS, DEFAULT_ORDER};
use markov_core::output::write_emissions;
use markov_core::{Chain, ChainConfig, GenerateConfig, Generator};

/// Markov chain text generator.
///
/// Reads whitespace-separated words, builds an order-N chain, then walks it
/// to print pseudo-random text.
#[derive(Parser, Debug)]
#[command(name = "markov")]
#[command(version, about, long_about = None)]
struct Args {
    /// Corpus file (default: standard input)
    input: Option<PathBuf>,

    /// Print one "(prefix) -> word" record per line
    #[arg(short = 'd', long)]
    debug: bool,

    /// Maximum number of generated words
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_WORDS)]
    words: usize,

    /// Number of words in a prefix
    #[arg(long, default_value_t = DEFAULT_ORDER)]
    order: usize,

    /// Bucket count of the state table
    #[arg(long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Fixed random seed (default: current time)
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn chain_config(&self) -> markov_core::Result<ChainConfig> {
        let mut config = ChainConfig::new(self.order)?;
        config.set_buckets(self.buckets)?;
        Ok(config)
    }

    fn generate_config(&self) -> GenerateConfig {
        GenerateConfig { max_words: self.words, debug: self.debug }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let chain = Chain::from_path(args.chain_config()?, args.input.as_ref())
        .context("failed to build the chain")?;

    let run = args.generate_config();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = match args.seed {
        Some(seed) => write_emissions(&mut out, Generator::seeded(&chain, run.max_words, seed), run.debug),
        None => write_emissions(&mut out, Generator::new(&chain, run.max_words), run.debug),
    };
    out.flush()?;

    let written = written.context("generation aborted")?;
    info!("{written} words generated");
    Ok(())
}
