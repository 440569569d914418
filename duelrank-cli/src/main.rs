mod config;
mod judge;
mod output;
mod parse;
mod prompt;
mod simulate;

use clap::Parser;
use duelrank_core::{RankingSession, theoretical_total_comparisons};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::judge::{Outcome, TerminalJudge, run_session};
use crate::parse::{DEFAULT_LEFT_KEY, DEFAULT_QUIT_KEY, DEFAULT_RIGHT_KEY, Keybinds};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "duelrank", version, about = "Rank items by answering which-do-you-prefer questions")]
struct Cli {
    /// Show debug logs (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank a list of items interactively
    Rank(RankArgs),
    /// Rank synthetic items with an automatic judge and report comparison counts
    Simulate(SimulateArgs),
    /// Create a default config file at ~/.config/duelrank/config.toml
    Init {
        /// Write the config here instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser)]
struct RankArgs {
    /// File with one item per line, or a JSON array of strings
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Read answers from this file instead of the terminal (one per line)
    #[arg(long)]
    answers: Option<PathBuf>,

    /// Shuffle items before ranking
    #[arg(long)]
    shuffle: bool,

    /// Seed for --shuffle, for a reproducible question order
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Write the result to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Key for "left item is better" (default: j)
    #[arg(long)]
    left_key: Option<String>,

    /// Key for "right item is better" (default: k)
    #[arg(long)]
    right_key: Option<String>,

    /// Key for quitting without a result (default: q)
    #[arg(long)]
    quit_key: Option<String>,

    /// Hide the progress bar, keep the counter
    #[arg(long)]
    no_progress_bar: bool,

    /// Path to config file (default: ~/.config/duelrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct SimulateArgs {
    /// Number of synthetic items (ignored when items are given)
    #[arg(long, default_value_t = 20)]
    count: usize,

    /// File with one item per line, or a JSON array of strings
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Number of independent rankings to run
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Fraction of answers the oracle gets wrong, 0.0 to 1.0
    #[arg(long, default_value_t = 0.0)]
    error_rate: f64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON instead of a report
    #[arg(long)]
    json: bool,
}

/// Parse a string as either a JSON array of strings or plain text (one item per line).
fn parse_items_from_str(content: &str) -> Result<Vec<String>, String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        // Try JSON array
        let items: Vec<String> = serde_json::from_str(trimmed)
            .map_err(|e| format!("File looks like JSON but failed to parse: {e}"))?;
        Ok(items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    } else {
        // Plain text, one item per line
        Ok(trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}

/// Load items from --items file and --item flags. Returns `None` when neither was given.
fn load_listed_items(file: Option<&PathBuf>, inline: &[String]) -> Option<Vec<String>> {
    let mut items = Vec::new();

    // From file (auto-detects JSON array vs one-per-line)
    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        items = parse_items_from_str(&content).unwrap_or_else(|e| bail(e));
    }

    // From inline --item flags
    items.extend(inline.iter().map(|s| s.trim().to_string()).filter(|s| !s.is_empty()));

    if file.is_none() && inline.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn read_stdin_items() -> Vec<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail("No items provided. Use --items <file>, --item <name>, or pipe items via stdin.");
    }
    let content: String = stdin
        .lock()
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}")))
        .join("\n");
    parse_items_from_str(&content).unwrap_or_else(|e| bail(e))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Simulate(args) => {
            let names = load_listed_items(args.items.as_ref(), &args.inline_items)
                .unwrap_or_else(|| simulate::synthetic_names(args.count));
            if names.is_empty() {
                bail("Need at least 1 item to simulate");
            }
            simulate::run_simulate(names, args.runs.max(1), args.error_rate, args.seed, args.json);
        }
        Commands::Init { config: config_override } => {
            let path = config_override.unwrap_or_else(config::config_path);
            config::create_default_config(&path).unwrap_or_else(|e| bail(e));
            println!("Created config at {}", path.display());
            println!("Edit it to set your keybinds and defaults.");
        }
    }
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let keys = Keybinds::new(
        args.left_key.as_deref().or(cfg.left_key.as_deref()).unwrap_or(DEFAULT_LEFT_KEY),
        args.right_key.as_deref().or(cfg.right_key.as_deref()).unwrap_or(DEFAULT_RIGHT_KEY),
        args.quit_key.as_deref().or(cfg.quit_key.as_deref()).unwrap_or(DEFAULT_QUIT_KEY),
    )
    .unwrap_or_else(|e| bail(e));

    let json = args.json || cfg.json.unwrap_or(false);
    let shuffle = args.shuffle || cfg.shuffle.unwrap_or(false);
    let show_bar = !args.no_progress_bar && cfg.show_progress_bar.unwrap_or(true);

    // Items may come from stdin only when answers come from a file.
    let mut items = match load_listed_items(args.items.as_ref(), &args.inline_items) {
        Some(items) => items,
        None if args.answers.is_some() => read_stdin_items(),
        None => bail("No items provided. Use --items <file> or --item <name> (stdin is needed for answers)."),
    };

    if items.is_empty() {
        bail("Need at least 1 item to rank, got 0");
    }

    let mut unique = items.clone();
    unique.sort();
    unique.dedup();
    if unique.len() != items.len() {
        tracing::warn!(duplicates = items.len() - unique.len(), "duplicate items will be ranked separately");
    }

    if shuffle {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        items.shuffle(&mut rng);
    } else if args.seed.is_some() {
        eprintln!("Warning: --seed has no effect without --shuffle.");
    }

    let total = items.len();
    let max_comparisons = theoretical_total_comparisons(total);
    eprintln!("Ranking {total} items (at most {max_comparisons} questions)");

    let mut session = RankingSession::start_with_callback(items, |ranked: &[String]| {
        eprintln!("\nDone! {} items ranked.", ranked.len());
    })
    .unwrap_or_else(|e| bail(e));

    let input: Box<dyn BufRead> = match args.answers {
        Some(ref path) => {
            let file = std::fs::File::open(path)
                .unwrap_or_else(|e| bail(format!("Failed to open answers file {}: {e}", path.display())));
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };
    let mut judge = TerminalJudge::new(input, io::stderr(), keys, show_bar);

    let ranked = match run_session(&mut session, &mut judge).unwrap_or_else(|e| bail(e)) {
        Outcome::Completed(ranked) => ranked,
        Outcome::Abandoned { ranked, total } => {
            bail(format!("Ranking abandoned after placing {} of {} items", ranked.len(), total))
        }
    };

    let comparisons = session.total_comparisons();
    eprintln!("Answered {comparisons} of at most {max_comparisons} questions.");

    let rendered = if json {
        output::format_json(&ranked, comparisons, max_comparisons).unwrap_or_else(|e| bail(e))
    } else {
        output::format_table(&ranked, comparisons, max_comparisons)
    };

    match args.out {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .unwrap_or_else(|e| bail(format!("Failed to write {}: {e}", path.display())));
            eprintln!("Wrote ranking to {}", path.display());
        }
        None => print!("{rendered}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_plain_text() {
        let items = parse_items_from_str("  Pizza\n\nSushi  \r\nRamen\n").unwrap();
        assert_eq!(items, vec!["Pizza", "Sushi", "Ramen"]);
    }

    #[test]
    fn test_parse_items_json_array() {
        let items = parse_items_from_str(r#"["Pizza", " ", "Sushi"]"#).unwrap();
        assert_eq!(items, vec!["Pizza", "Sushi"]);
    }

    #[test]
    fn test_parse_items_bad_json() {
        assert!(parse_items_from_str("[\"unterminated").is_err());
    }

    #[test]
    fn test_load_listed_items_combines_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        let items = load_listed_items(Some(&path), &["three".to_string()]).unwrap();
        assert_eq!(items, vec!["one", "two", "three"]);

        assert_eq!(load_listed_items(None, &[]), None);
    }

    #[test]
    fn test_cli_parses_rank_flags() {
        let cli = Cli::try_parse_from([
            "duelrank", "rank", "--item", "a", "--item", "b", "--json", "--left-key", "a",
        ])
        .unwrap();
        match cli.command {
            Commands::Rank(args) => {
                assert_eq!(args.inline_items, vec!["a", "b"]);
                assert!(args.json);
                assert_eq!(args.left_key.as_deref(), Some("a"));
            }
            _ => panic!("expected rank"),
        }
    }

    #[test]
    fn test_cli_parses_simulate_defaults() {
        let cli = Cli::try_parse_from(["duelrank", "-v", "simulate", "--seed", "3"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.count, 20);
                assert_eq!(args.runs, 1);
                assert_eq!(args.seed, Some(3));
                assert_eq!(args.error_rate, 0.0);
            }
            _ => panic!("expected simulate"),
        }
    }
}
