//! Command-line front end for Crossgrid.
//!
//! ```sh
//! crossgrid build candidate.json > puzzle.json
//! crossgrid number grid.txt
//! crossgrid validate puzzle.json
//! crossgrid play puzzle.json --progress progress.json CAT '<tab>' BOW '<check>'
//! ```
//!
//! `-` reads from stdin. Logging follows `RUST_LOG`; `-v` raises the default level.

use std::{path::PathBuf, process::ExitCode};

use clap::{ArgAction, Args, Parser, Subcommand};
use crossgrid_builder::{BuildPolicy, ConflictPolicy};
use crossgrid_core::ValidationPolicy;
use log::LevelFilter;

use crate::error::CliError;

mod commands;
mod error;
mod keys;
mod store;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Raise log verbosity (repeatable).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    policy: PolicyArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Repair an untrusted candidate into a validated crossword and print it as JSON.
    Build {
        /// Candidate JSON file, or `-` for stdin.
        input: PathBuf,
        /// Print the reconstruction report to stderr.
        #[arg(long)]
        report: bool,
    },
    /// Number a text grid (one row per line, `#` for blocks) and list its entries.
    Number {
        /// Grid text file, or `-` for stdin.
        input: PathBuf,
        /// Language tag selecting the alphabet.
        #[arg(long, default_value = "en")]
        language: String,
    },
    /// Check a crossword JSON file against the validation policy.
    Validate {
        /// Crossword JSON file, or `-` for stdin.
        input: PathBuf,
    },
    /// Apply scripted keys to a solving session and print the board.
    Play {
        /// Crossword JSON file, or `-` for stdin.
        input: PathBuf,
        /// File holding resumable progress.
        #[arg(long, value_name = "FILE")]
        progress: Option<PathBuf>,
        /// Letters to type, `@ROW,COL`, `<N-across>`/`<N-down>`, or a named key such
        /// as `<bs>`, `<tab>`, `<check>` or `<reveal-word>`.
        keys: Vec<String>,
    },
}

#[derive(Debug, Args)]
struct PolicyArgs {
    /// Shortest answer kept (never below 2).
    #[arg(long, global = true, value_name = "LEN")]
    min_answer_len: Option<usize>,

    /// Entries required at the reference size of 9.
    #[arg(long, global = true, value_name = "COUNT")]
    min_entries: Option<usize>,

    /// Largest allowed across/down imbalance, in percent.
    #[arg(long, global = true, value_name = "PERCENT")]
    max_imbalance: Option<usize>,

    /// Keep the first letter written when candidates disagree on a cell.
    #[arg(long, global = true)]
    first_wins: bool,
}

impl PolicyArgs {
    fn validation_policy(&self) -> ValidationPolicy {
        let mut policy = ValidationPolicy::default();
        if let Some(count) = self.min_entries {
            policy = policy.min_entries(count);
        }
        if let Some(percent) = self.max_imbalance {
            policy = policy.max_imbalance_percent(percent);
        }
        if let Some(len) = self.min_answer_len {
            policy = policy.min_answer_len(len);
        }
        policy
    }

    fn build_policy(&self) -> BuildPolicy {
        let conflict = if self.first_wins {
            ConflictPolicy::FirstWins
        } else {
            ConflictPolicy::LastWins
        };
        BuildPolicy::default()
            .validation(self.validation_policy())
            .conflict_policy(conflict)
    }
}

fn main() -> ExitCode {
    better_panic::install();
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Build { input, report } => {
            commands::build(input, &cli.policy.build_policy(), *report)
        }
        Command::Number { input, language } => {
            commands::number(input, language, &cli.policy.build_policy())
        }
        Command::Validate { input } => commands::validate(input, &cli.policy.validation_policy()),
        Command::Play {
            input,
            progress,
            keys,
        } => commands::play(
            input,
            progress.as_deref(),
            keys,
            &cli.policy.validation_policy(),
        ),
    }
}
