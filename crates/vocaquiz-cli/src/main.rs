//! vocaquiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vocaquiz", version, about = "Terminal vocabulary quiz trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that touch the progress store.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Directory holding history and review progress
    #[arg(long)]
    store_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play quiz sets interactively
    Play {
        #[command(flatten)]
        store: StoreArgs,

        /// Word list (.tsv text or .toml); defaults to the bundled list
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Questions per set
        #[arg(long)]
        questions: Option<usize>,

        /// Seed for reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many completed sets
        #[arg(long)]
        sets: Option<usize>,

        /// Keep progress in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Show completed-set history, newest first
    History {
        #[command(flatten)]
        store: StoreArgs,

        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List words currently owed a correct answer
    Review {
        #[command(flatten)]
        store: StoreArgs,

        /// Word list the review ids refer to
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Clear review progress (history is kept)
    Reset {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Validate a word list file
    Validate {
        /// Path to the word list
        #[arg(long)]
        catalog: PathBuf,

        /// Options per question to check the list against
        #[arg(long, default_value = "4")]
        options: usize,
    },

    /// Create a starter config and word list
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vocaquiz=info,warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            store,
            catalog,
            questions,
            seed,
            sets,
            ephemeral,
        } => commands::play::execute(store, catalog, questions, seed, sets, ephemeral),
        Commands::History {
            store,
            limit,
            format,
        } => commands::history::execute(store, limit, format),
        Commands::Review { store, catalog } => commands::review::execute(store, catalog),
        Commands::Reset { store } => commands::reset::execute(store),
        Commands::Validate { catalog, options } => commands::validate::execute(catalog, options),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
