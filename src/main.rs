//! ddgs CLI - DuckDuckGo text search from the command line.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ddgs::{Backend, ClientOptions, Ddgs, SafeSearch, SearchQuery, TimeLimit};

/// ddgs - DuckDuckGo text search CLI
#[derive(Parser)]
#[command(name = "ddgs")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a text search
    Text(TextArgs),

    /// List available backends
    Backends,
}

#[derive(Parser)]
struct TextArgs {
    /// Search keywords
    keywords: String,

    /// Region code (e.g. us-en, uk-en)
    #[arg(short, long, default_value = ddgs::DEFAULT_REGION)]
    region: String,

    /// Safe search level
    #[arg(long, default_value = "moderate")]
    safesearch: SafeSearchArg,

    /// Time window
    #[arg(short, long)]
    timelimit: Option<TimeLimitArg>,

    /// Backend to query
    #[arg(short, long, default_value = "auto")]
    backend: BackendArg,

    /// Maximum number of results (enables pagination)
    #[arg(short, long)]
    max_results: Option<usize>,

    /// Proxy URL (e.g., http://127.0.0.1:8080 or socks5://127.0.0.1:1080)
    #[arg(short, long)]
    proxy: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, default_value = "10000")]
    timeout: u64,

    /// Skip TLS certificate validation
    #[arg(long)]
    insecure: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum SafeSearchArg {
    On,
    Moderate,
    Off,
}

impl From<SafeSearchArg> for SafeSearch {
    fn from(arg: SafeSearchArg) -> Self {
        match arg {
            SafeSearchArg::On => SafeSearch::On,
            SafeSearchArg::Moderate => SafeSearch::Moderate,
            SafeSearchArg::Off => SafeSearch::Off,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeLimitArg {
    Day,
    Week,
    Month,
    Year,
}

impl From<TimeLimitArg> for TimeLimit {
    fn from(arg: TimeLimitArg) -> Self {
        match arg {
            TimeLimitArg::Day => TimeLimit::Day,
            TimeLimitArg::Week => TimeLimit::Week,
            TimeLimitArg::Month => TimeLimit::Month,
            TimeLimitArg::Year => TimeLimit::Year,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Auto,
    Html,
    Lite,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Backend::Auto,
            BackendArg::Html => Backend::Html,
            BackendArg::Lite => Backend::Lite,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Text(args) => run_text(args).await,
        Commands::Backends => list_backends(),
    }
}

fn list_backends() -> Result<()> {
    println!("Available backends:\n");
    println!("    auto  - try html and lite in random order (default)");
    println!("    html  - html.duckduckgo.com");
    println!("    lite  - lite.duckduckgo.com");
    println!();
    println!("Usage: ddgs text \"query\" -b lite -m 20");
    Ok(())
}

async fn run_text(args: TextArgs) -> Result<()> {
    let mut options = ClientOptions::new()
        .with_timeout_ms(args.timeout)
        .with_verify(!args.insecure);
    if let Some(proxy) = &args.proxy {
        options = options.with_proxy(proxy);
        if matches!(args.format, OutputFormat::Text) {
            eprintln!("Using proxy: {}", proxy);
        }
    }
    let ddgs = Ddgs::with_options(options)?;

    let mut query = SearchQuery::new(&args.keywords)
        .with_region(&args.region)
        .with_safesearch(args.safesearch.into())
        .with_backend(args.backend.into());
    if let Some(limit) = args.timelimit {
        query = query.with_time_limit(limit.into());
    }
    if let Some(max) = args.max_results {
        query = query.with_max_results(max);
    }

    let results = ddgs.text(query).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nSearch results for \"{}\" ({} results):\n",
                args.keywords,
                results.len()
            );

            for (i, result) in results.iter().enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   URL: {}", result.href);
                if !result.body.is_empty() {
                    let body = if result.body.chars().count() > 150 {
                        format!("{}...", result.body.chars().take(150).collect::<String>())
                    } else {
                        result.body.clone()
                    };
                    println!("   {}", body);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Compact => {
            for result in &results {
                println!("{}\t{}", result.title, result.href);
            }
        }
    }

    Ok(())
}
