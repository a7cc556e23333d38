//! dawgc - compile sorted word lists into bit-packed DAWG binaries
//!
//! Usage: dawgc [--alphabet <LETTERS>] [--word-limit <N>] <command> < input > output
//!
//! All commands read stdin and write stdout. Diagnostics go to stderr and
//! are filtered with `RUST_LOG`.

use std::io::{self, BufReader, Read, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use dawgc::config::DEFAULT_LETTERS;
use dawgc::dawg::codec;
use dawgc::dawg::enumerate::write_words;
use dawgc::dawg::graphviz::write_graphviz;
use dawgc::wordlist::build_dawg_from_reader;
use dawgc::{Alphabet, Dawg, DawgConfig, WORD_LIMIT};

#[derive(Parser)]
#[command(name = "dawgc")]
#[command(about = "Minimal DAWG compiler and bit-packed codec")]
#[command(version)]
struct Cli {
    /// Letters of the alphabet, in sort order
    #[arg(long, global = true, default_value = DEFAULT_LETTERS)]
    alphabet: String,

    /// Longest word accepted, in letters
    #[arg(long, global = true, default_value_t = WORD_LIMIT)]
    word_limit: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a sorted word list into a binary DAWG
    Compile,

    /// Compile a sorted word list into hex literals for embedding in source
    Embed,

    /// Turn a binary DAWG back into a word list
    Decompile,

    /// Print the graph in Graphviz dot format
    Graphviz {
        /// Read a binary DAWG instead of a word list
        #[arg(long)]
        binary: bool,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(log_filter())
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dawgc: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `info` unless `RUST_LOG` says otherwise.
fn log_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}

fn run(cli: Cli) -> Result<()> {
    let alphabet = Alphabet::new(&cli.alphabet).context("Invalid --alphabet")?;
    let config = DawgConfig::new(alphabet).with_word_limit(cli.word_limit);

    // Output is assembled in memory and written only once it is complete.
    let mut output = Vec::new();
    match cli.command {
        Command::Compile => {
            let dawg = compile(&config)?;
            codec::write_binary(&dawg, &mut output).context("Failed to encode DAWG")?;
        }
        Command::Embed => {
            let dawg = compile(&config)?;
            codec::write_embedded(&dawg, &mut output).context("Failed to encode DAWG")?;
        }
        Command::Decompile => {
            let dawg = decompile(&config)?;
            write_words(&dawg, &mut output)?;
        }
        Command::Graphviz { binary } => {
            let dawg = if binary {
                decompile(&config)?
            } else {
                compile(&config)?
            };
            write_graphviz(&dawg, &mut output)?;
        }
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output).context("Failed to write stdout")?;
    stdout.flush().context("Failed to write stdout")?;
    Ok(())
}

fn compile(config: &DawgConfig) -> Result<Dawg> {
    let stdin = io::stdin().lock();
    let dawg = build_dawg_from_reader(BufReader::new(stdin), config)
        .context("Failed to compile word list")?;
    info!(
        vertices = dawg.vertex_count(),
        edges = dawg.edge_count(),
        bytes = dawg.edge_count() * codec::RECORD_SIZE,
        "compiled DAWG"
    );
    Ok(dawg)
}

fn decompile(config: &DawgConfig) -> Result<Dawg> {
    let mut bytes = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("Failed to read stdin")?;
    let dawg = codec::decode(&bytes, &config.alphabet).context("Failed to decode DAWG binary")?;
    info!(
        vertices = dawg.vertex_count(),
        edges = dawg.edge_count(),
        "decoded DAWG"
    );
    Ok(dawg)
}
