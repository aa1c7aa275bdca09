use clap::Parser;
use hashcracker::{transform, Alphabet, SearchSpace};

/// Print the salted digest of a candidate, or of every candidate in a small
/// space, for producing search targets.
#[derive(Parser)]
struct Args {
    /// Candidate password
    candidate: Option<String>,

    /// Salt appended to the hex inner digest
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    salt: String,

    /// Dump digests of every candidate of this length over --alphabet
    #[arg(long, requires = "alphabet", conflicts_with = "candidate")]
    length: Option<usize>,

    /// Alphabet used with --length
    #[arg(long)]
    alphabet: Option<String>,

    /// Refuse to dump more than this many lines
    #[arg(long, default_value_t = 100_000)]
    limit: u64,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(candidate) = &args.candidate {
        println!("{}", transform(candidate, &args.salt));
        return Ok(());
    }

    let (Some(length), Some(chars)) = (args.length, args.alphabet.as_deref()) else {
        return Err("expected a candidate or --length with --alphabet".into());
    };
    let alphabet = Alphabet::new(chars)?;
    let space = SearchSpace::new(&alphabet, length, args.limit)?;
    let mut cursor = space.cursor(0)?;
    loop {
        println!(
            "{},{},{}",
            cursor.index(),
            cursor.as_str(),
            transform(cursor.as_str(), &args.salt)
        );
        if !cursor.advance() {
            break;
        }
    }
    Ok(())
}
