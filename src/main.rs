use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use termcolor::{ColorChoice, StandardStream};

use triesearch::index::stats::show_stats;
use triesearch::output::{print_response, write_response};
use triesearch::session::{run_repl, Command, Response, Session};
use triesearch::utils::AppConfig;

#[derive(Parser)]
#[command(name = "triesearch")]
#[command(about = "Trie-backed full-text search with a boolean query language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Snapshot file (overrides the configured path)
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a document, replacing any tokens it had before
    Index {
        /// Document id (non-negative integer)
        doc_id: String,

        /// Document text; split into tokens on non-alphanumeric characters
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Run a boolean query, e.g. `query '(butter' '|' 'potato)' '&' salt`
    Query {
        #[arg(required = true)]
        chunks: Vec<String>,
    },
    /// Reset the snapshot to an empty index
    Clear,
    /// Show index statistics
    Stats,
    /// Start the interactive shell (default when no subcommand is given)
    Shell,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when a one-shot command printed a failure response
fn run(cli: Cli) -> Result<bool> {
    let config = load_config().with_snapshot_override(cli.snapshot);
    let color = !cli.no_color;

    match cli.command {
        None | Some(Commands::Shell) => {
            let (mut session, loaded) = Session::open(config);
            let choice = if color {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            };
            let mut stdout = StandardStream::stdout(choice);
            if let Some(response) = loaded {
                write_response(&mut stdout, &response)?;
            }
            let stdin = io::stdin();
            run_repl(&mut session, stdin.lock(), &mut stdout)?;
            Ok(true)
        }
        Some(Commands::Index { doc_id, text }) => {
            let mut args = vec![doc_id.as_str()];
            args.extend(text.iter().map(String::as_str));
            run_one_shot(config, "index", &args, color)
        }
        Some(Commands::Query { chunks }) => {
            let args: Vec<&str> = chunks.iter().map(String::as_str).collect();
            run_one_shot(config, "query", &args, color)
        }
        Some(Commands::Clear) => run_one_shot(config, "clear", &[], color),
        Some(Commands::Stats) => {
            let session = Session::from_snapshot(config)?;
            show_stats(session.index(), &session.config().snapshot_path)?;
            Ok(true)
        }
    }
}

/// Load the snapshot, run one command, and persist it if the index changed
fn run_one_shot(config: AppConfig, name: &str, args: &[&str], color: bool) -> Result<bool> {
    let mut session = Session::from_snapshot(config).context("Failed to open snapshot")?;

    let response = match Command::from_parts(name, args) {
        Ok(cmd) => {
            let mutates = cmd.mutates_index();
            let response = session.execute(cmd);
            if mutates && !response.is_failure() {
                session.save().context("Failed to save snapshot")?;
            }
            response
        }
        Err(err) => Response::from(err),
    };

    print_response(&response, color)?;
    Ok(!response.is_failure())
}

fn load_config() -> AppConfig {
    AppConfig::load().unwrap_or_else(|e| {
        log::warn!("using default config: {e:#}");
        AppConfig::default()
    })
}
