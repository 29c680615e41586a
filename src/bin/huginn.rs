//! huginn — command-line front end for the analysis pipeline.
//!
//! Analyzes one text (argument or stdin) or compares two, printing the
//! structured result as JSON for downstream rendering or export.

use std::io::{self, IsTerminal, Read};
use std::time::Duration;

use clap::Parser;

use huginn::{Huginn, RetryPolicy, ScoreDomain};

/// Structured text analysis over a generative model API.
#[derive(Parser)]
#[command(name = "huginn")]
#[command(version)]
#[command(about = "Structured text analysis over a generative model API")]
struct Args {
    /// Text to analyze (or omit to read from stdin)
    text: Option<String>,

    /// Second text; when present, runs a comparison
    #[arg(short, long)]
    compare: Option<String>,

    /// API key for the hosted model
    #[arg(long, env = "HUGINN_API_KEY")]
    api_key: String,

    /// Model identifier
    #[arg(short, long, default_value = "gemini-1.5-flash")]
    model: String,

    /// Endpoint base URL override
    #[arg(long, env = "HUGINN_BASE_URL")]
    base_url: Option<String>,

    /// Use the 0–1 domain instead of the default 0–10
    #[arg(long)]
    unit_domain: bool,

    /// Gateway timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Retry transport failures up to N attempts
    #[arg(long, default_value_t = 1)]
    attempts: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let text = match args.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    let mut builder = Huginn::builder()
        .api_key(args.api_key)
        .model(args.model)
        .timeout(Duration::from_secs(args.timeout));
    if let Some(url) = args.base_url {
        builder = builder.base_url(url);
    }
    if args.unit_domain {
        builder = builder.domain(ScoreDomain::Unit);
    }
    if args.attempts > 1 {
        builder = builder.retry(RetryPolicy::new().max_attempts(args.attempts));
    }
    let analyzer = builder.build()?;

    match args.compare {
        Some(other) => {
            let comparison = analyzer.submit_pair(&text, &other).await?;
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        None => {
            let result = analyzer.submit(&text).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn read_stdin() -> io::Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("reading text from stdin (end with Ctrl-D)...");
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}
