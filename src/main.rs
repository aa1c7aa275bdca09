use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{after, never, select};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use hashcracker::io_utils::{config_read_error, crack_cli_error, CliError};
use hashcracker::{
    init_logging, Alphabet, Charset, CrackError, Engine, EngineConfig, ProgressSnapshot,
    SearchEvent, SearchParameters, SearchResult,
};

const EXIT_FOUND: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;
const EXIT_CANCELLED: i32 = 3;

/// Recover a password from its salted SHA-256 digest by brute force.
#[derive(Parser, Debug)]
#[command(name = "hashcracker", version)]
struct Args {
    /// Target digest, 64 hex characters
    #[arg(long = "hash")]
    hash: String,

    /// Salt appended to the hex inner digest. Surrounding whitespace is
    /// stripped.
    #[arg(long, allow_hyphen_values = true)]
    salt: String,

    /// Candidate length
    #[arg(short, long, default_value_t = 6)]
    length: usize,

    /// Preset character sets, comma separated (lower, upper, digits, all, letters, alnum)
    #[arg(short, long, value_delimiter = ',', conflicts_with = "alphabet")]
    charset: Vec<Charset>,

    /// Custom alphabet: ordered, distinct characters
    #[arg(short, long)]
    alphabet: Option<String>,

    /// Engine configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'j', long)]
    workers: Option<usize>,

    /// Candidates claimed per work unit
    #[arg(long)]
    chunk_size: Option<u64>,

    /// Minimum milliseconds between progress updates
    #[arg(long)]
    progress_ms: Option<u64>,

    /// Cancel the search after this many seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Disable progress bar
    #[arg(long)]
    no_progress: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{e}");
            process::exit(EXIT_ERROR);
        }
    }
}

fn run() -> Result<i32, Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let alphabet = match &args.alphabet {
        Some(chars) => Alphabet::new(chars).map_err(|e| crack_cli_error("invalid alphabet", e))?,
        None => Charset::compose(&args.charset),
    };
    let params = SearchParameters::new(&args.hash, args.salt.trim(), args.length, alphabet)
        .map_err(|e| crack_cli_error("invalid input", e))?;

    let engine = Engine::new(config);
    let space = engine
        .prepare(&params)
        .map_err(|e| crack_cli_error("invalid input", e))?;

    let bar = (!args.no_progress).then(|| progress_bar(space.size()));
    let handle = engine
        .start(params)
        .map_err(|e| crack_cli_error("failed to start search", e))?;

    let deadline = match args.timeout {
        Some(secs) if secs.is_finite() && secs >= 0.0 => after(Duration::from_secs_f64(secs)),
        Some(_) => return Err(CliError::new("--timeout must be a non-negative number").into()),
        None => never(),
    };

    let events = handle.events().clone();
    let outcome = loop {
        select! {
            recv(events) -> event => match event {
                Ok(SearchEvent::Progress(snapshot)) => {
                    if let Some(bar) = &bar {
                        render_progress(bar, &snapshot);
                    }
                }
                Ok(SearchEvent::Finished(result)) => break result,
                Err(_) => break Err(CrackError::Internal("search ended without a result".into())),
            },
            recv(deadline) -> _ => {
                warn!("timeout reached, cancelling search");
                handle.cancel();
            }
        }
    };
    drop(handle);

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let result = outcome.map_err(|e| crack_cli_error("search failed", e))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result_json(&result, space.size()))?);
    } else {
        print_result(&result);
    }

    Ok(match result {
        SearchResult::Found { .. } => EXIT_FOUND,
        SearchResult::NotFound => EXIT_NOT_FOUND,
        SearchResult::Cancelled => EXIT_CANCELLED,
    })
}

fn load_config(args: &Args) -> Result<EngineConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path).map_err(|e| match e {
            CrackError::Io(io) => config_read_error(path, io),
            other => crack_cli_error("loading config", other),
        })?,
        None => EngineConfig::default(),
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(chunk_size) = args.chunk_size {
        config.chunk_size = chunk_size;
    }
    if let Some(ms) = args.progress_ms {
        config.progress_interval_ms = ms;
    }
    config
        .validate()
        .map_err(|e| crack_cli_error("invalid configuration", e))?;
    Ok(config)
}

fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

fn render_progress(bar: &ProgressBar, snapshot: &ProgressSnapshot) {
    bar.set_position(snapshot.attempts);
    bar.set_message(format!(
        "Attempt: {} | Speed: {} hash/s | Current: {}",
        snapshot.attempts, snapshot.rate as u64, snapshot.current_candidate
    ));
}

fn print_result(result: &SearchResult) {
    match result {
        SearchResult::Found {
            candidate,
            attempts,
            elapsed,
        } => {
            println!("FOUND!");
            println!("Password: {candidate}");
            println!("Attempts: {attempts}");
            println!("Time: {:.2}s", elapsed.as_secs_f64());
        }
        SearchResult::NotFound => println!("NOT FOUND"),
        SearchResult::Cancelled => println!("CANCELLED"),
    }
}

fn result_json(result: &SearchResult, space: u64) -> serde_json::Value {
    match result {
        SearchResult::Found {
            candidate,
            attempts,
            elapsed,
        } => serde_json::json!({
            "status": "found",
            "password": candidate,
            "attempts": attempts,
            "elapsed_ms": elapsed.as_millis() as u64,
            "space": space,
        }),
        SearchResult::NotFound => serde_json::json!({ "status": "not_found", "space": space }),
        SearchResult::Cancelled => serde_json::json!({ "status": "cancelled", "space": space }),
    }
}
