mod config;
mod interact;
mod output;
mod store;

use clap::Parser;
use pairsort_core::{max_comparisons_full, max_comparisons_partial, RankingSession, SessionStart};
use std::collections::HashSet;
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};

use crate::interact::JudgeVerdict;
use crate::store::SavedSession;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

const DEFAULT_CRITERION: &str = "Which do you prefer?";
const DEFAULT_SESSION_FILE: &str = "pairsort-session.json";

#[derive(Parser)]
#[command(name = "pairsort", version, about = "Rank a list by answering one question at a time")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank a fresh list of items from scratch
    Rank(RankArgs),
    /// Insert new items into an existing ranking without re-comparing it
    Merge(MergeArgs),
    /// Continue a saved session to completion
    Resume(ResumeArgs),
    /// Create a default config file at ~/.config/pairsort/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// File with items to rank (JSON string array or one per line)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// The comparison question shown above every pair
    #[arg(long)]
    criterion: Option<String>,

    /// Shuffle items before ranking starts
    #[arg(long)]
    shuffle: bool,

    /// Where to save the session if you quit early
    #[arg(long)]
    session: Option<PathBuf>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Write the final ranking to a file, one item per line
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show progress notes on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/pairsort/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct MergeArgs {
    /// File with the existing ranking, best first (JSON string array or one per line)
    #[arg(long)]
    ranked: PathBuf,

    /// File with the new items to insert (JSON string array or one per line)
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline new item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// The comparison question shown above every pair
    #[arg(long)]
    criterion: Option<String>,

    /// Shuffle the new items before merging starts
    #[arg(long)]
    shuffle: bool,

    /// Where to save the session if you quit early
    #[arg(long)]
    session: Option<PathBuf>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Write the final ranking to a file, one item per line
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show progress notes on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/pairsort/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct ResumeArgs {
    /// Session file written by an interrupted run
    session_file: PathBuf,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Write the final ranking to a file, one item per line
    #[arg(long)]
    output: Option<PathBuf>,

    /// Show progress notes on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Parse a string as either a JSON array of strings or plain text (one item per line).
pub fn parse_items_from_str(content: &str) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        // Try JSON array
        let items: Vec<String> = serde_json::from_str(trimmed)
            .unwrap_or_else(|e| bail(format!("File looks like JSON but failed to parse: {e}")));
        items.into_iter().filter(|s| !s.trim().is_empty()).collect()
    } else {
        // Plain text, one item per line
        trimmed
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Load items from all sources: --items file, --item inline args, or stdin.
fn load_items(items_file: &Option<PathBuf>, inline_items: &[String]) -> Vec<String> {
    let mut items = Vec::new();

    // From file (auto-detects JSON array vs one-per-line)
    if let Some(path) = items_file {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        items = parse_items_from_str(&content);
    }

    // From inline --item flags
    items.extend(inline_items.iter().cloned());

    // From stdin (only if no file and no inline items)
    if items.is_empty() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            bail("No items provided. Use --items <file>, --item <name>, or pipe items via stdin.");
        }
        let content: String = stdin.lock().lines()
            .map(|l| l.expect("Failed to read from stdin"))
            .collect::<Vec<_>>()
            .join("\n");
        items = parse_items_from_str(&content);
    }

    items
}

/// IDs are indices into the name table, so a duplicate name would be two IDs
/// for one thing. Refuse it up front.
fn reject_duplicate_names(names: &[String]) {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            bail(format!("Duplicate item \"{name}\": each item can appear only once"));
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Merge(args) => run_merge(args),
        Commands::Resume(args) => run_resume(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default criterion, session file, etc.");
        }
    }
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let criterion = args.criterion.clone()
        .or(cfg.criterion)
        .unwrap_or_else(|| DEFAULT_CRITERION.to_string());
    let shuffle = args.shuffle || cfg.shuffle.unwrap_or(false);
    let session_path = args.session.clone()
        .or_else(|| cfg.session.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

    let mut names = load_items(&args.items, &args.inline_items);
    reject_duplicate_names(&names);

    if shuffle {
        use rand::seq::SliceRandom;
        names.shuffle(&mut rand::rng());
    }

    let item_ids: Vec<i64> = (0..names.len() as i64).collect();

    if args.verbose {
        eprintln!(
            "Ranking {} items (at most {} questions)",
            names.len(),
            max_comparisons_full(names.len()),
        );
        eprintln!("Criterion: \"{criterion}\"");
    }

    let session = match RankingSession::begin_full(&item_ids) {
        SessionStart::Started(session) => session,
        SessionStart::NotEnoughItems => {
            bail(format!("Need at least 2 items to rank, got {}", names.len()))
        }
    };

    let saved = SavedSession { names, criterion, answered: 0, session };
    drive(saved, &session_path, args.json, args.output.as_deref(), args.verbose);
}

fn run_merge(args: MergeArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let criterion = args.criterion.clone()
        .or(cfg.criterion)
        .unwrap_or_else(|| DEFAULT_CRITERION.to_string());
    let shuffle = args.shuffle || cfg.shuffle.unwrap_or(false);
    let session_path = args.session.clone()
        .or_else(|| cfg.session.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

    let existing = store::load_ranked(&args.ranked);
    let mut new_names = load_items(&args.items, &args.inline_items);
    reject_duplicate_names(&new_names);

    for name in &new_names {
        if existing.contains(name) {
            bail(format!(
                "\"{name}\" is already in the ranking at {}",
                args.ranked.display()
            ));
        }
    }

    if shuffle {
        use rand::seq::SliceRandom;
        new_names.shuffle(&mut rand::rng());
    }

    // Existing items keep the low IDs; new items continue from there.
    let names: Vec<String> = existing.iter().chain(new_names.iter()).cloned().collect();
    let existing_ids: Vec<i64> = (0..existing.len() as i64).collect();
    let new_ids: Vec<i64> = (existing.len() as i64..names.len() as i64).collect();

    if args.verbose {
        eprintln!(
            "Merging {} new items into {} ranked (at most {} questions)",
            new_names.len(),
            existing.len(),
            max_comparisons_partial(existing.len(), new_names.len()),
        );
        eprintln!("Criterion: \"{criterion}\"");
    }

    let session = match RankingSession::begin_partial(&existing_ids, &new_ids) {
        SessionStart::Started(session) => session,
        SessionStart::NotEnoughItems => bail(format!(
            "Nothing to compare: {} ranked + {} new items",
            existing.len(),
            new_names.len()
        )),
    };

    let saved = SavedSession { names, criterion, answered: 0, session };
    drive(saved, &session_path, args.json, args.output.as_deref(), args.verbose);
}

fn run_resume(args: ResumeArgs) {
    let saved = store::load_session(&args.session_file);

    let held = saved.session.ordered().len() + 1 + saved.session.pending_len();
    if held != saved.names.len() {
        bail(format!(
            "Session file {} is corrupt: session holds {} items but there are {} names",
            args.session_file.display(),
            held,
            saved.names.len()
        ));
    }

    if args.verbose {
        eprintln!(
            "Resuming {} items, {} answered so far",
            saved.names.len(),
            saved.answered,
        );
        eprintln!("Criterion: \"{}\"", saved.criterion);
    }

    drive(saved, &args.session_file, args.json, args.output.as_deref(), args.verbose);
}

/// Run the judge loop, then either report the ranking or save the session.
///
/// Takes the session bundled as a `SavedSession` because that is exactly
/// what has to go to disk if the user quits partway.
fn drive(
    saved: SavedSession,
    session_path: &Path,
    json: bool,
    output_path: Option<&Path>,
    verbose: bool,
) {
    let SavedSession { names, criterion, answered, session } = saved;
    let mode = session.mode();

    match interact::run_session(session, &names, &criterion, answered) {
        JudgeVerdict::Finished { ranking, answered } => {
            if verbose {
                eprintln!("Done: {} items ranked in {} answers", ranking.len(), answered);
            }

            if let Some(path) = output_path {
                output::write_ranking(path, &ranking, &names);
                if verbose {
                    eprintln!("Wrote ranking to {}", path.display());
                }
            }

            if json {
                output::print_json(&ranking, &names, answered, mode);
            } else {
                output::print_table(&ranking, &names, answered);
            }
        }
        JudgeVerdict::Suspended { session, answered } => {
            let saved = SavedSession { names, criterion, answered, session };
            store::save_session(session_path, &saved);
            eprintln!();
            eprintln!(
                "Session saved. Pick it up with: pairsort resume {}",
                session_path.display()
            );
        }
    }
}
