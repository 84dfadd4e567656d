//! Typosquat Check CLI Application
//!
//! A command-line interface for finding registered typo-squatting variants
//! of domains. Reads source domains from an input file, drives the detection
//! pipeline sequentially, and writes findings to an output file.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use console::Style;
use std::process;
use std::time::Duration;
use typosquat_check_lib::{
    config_from_env, CheckConfig, RecordSelector, ScanObserver, TypoCheckError, TypoSquatChecker,
};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for typosquat-check
#[derive(Parser, Debug)]
#[command(name = "typosquat-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find registered typo-squatting variants of your domains")]
#[command(
    long_about = "Find registered typo-squatting variants of your domains.\n\nGenerates plausible misspellings via an OpenAI-compatible API, checks which variants resolve in DNS, and optionally cross-references WHOIS registrant data to flag same-owner variants."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// Input file with source domains (one per line)
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: String,

    /// Output file for findings
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: String,

    /// Typo variants to request per domain (overrides TYPO_COUNT)
    #[arg(short = 'n', long = "count", value_name = "N", help_heading = "Generation")]
    pub count: Option<usize>,

    /// Model identifier for the completions call (overrides OPENAI_MODEL)
    #[arg(long = "model", value_name = "MODEL", help_heading = "Generation")]
    pub model: Option<String>,

    /// Generation call timeout in seconds (overrides OPENAI_TIMEOUT)
    #[arg(long = "timeout", value_name = "SECS", help_heading = "Generation")]
    pub timeout: Option<u64>,

    /// DNS record type to probe, or ALL (overrides DNS_TYPE)
    #[arg(short = 't', long = "dns-type", value_name = "TYPE", help_heading = "Resolution")]
    pub dns_type: Option<String>,

    /// Skip the WHOIS registrant cross-reference stage
    #[arg(long = "no-whois", help_heading = "Resolution")]
    pub no_whois: bool,

    /// Delay between WHOIS lookups in seconds (overrides WHOIS_DELAY)
    #[arg(long = "whois-delay", value_name = "SECS", help_heading = "Resolution")]
    pub whois_delay: Option<f64>,

    /// Verbose logging (also honors RUST_LOG)
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    // Pick up OPENAI_API_KEY and friends from a .env file if present
    dotenv::dotenv().ok();

    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Set up tracing output: RUST_LOG wins, otherwise --verbose selects debug.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the pipeline configuration: environment values first, then CLI
/// flag overrides.
fn build_config(args: &Args) -> Result<CheckConfig, Box<dyn std::error::Error>> {
    let mut config = config_from_env()?;

    if let Some(count) = args.count {
        config = config.with_typo_count(count);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(secs) = args.timeout {
        config = config.with_generation_timeout(Duration::from_secs(secs));
    }
    if let Some(dns_type) = &args.dns_type {
        config = config.with_record_selector(RecordSelector::parse(dns_type)?);
    }
    if args.no_whois {
        config = config.with_whois_enabled(false);
    }
    if let Some(secs) = args.whois_delay {
        config = config.with_whois_delay(Duration::from_secs_f64(secs));
    }

    Ok(config)
}

/// Per-domain and per-candidate progress rendering for the terminal.
struct ConsoleReporter {
    header: Style,
    registered: Style,
    unregistered: Style,
    warn: Style,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            registered: Style::new().red().bold(),
            unregistered: Style::new().dim(),
            warn: Style::new().yellow(),
        }
    }
}

impl ScanObserver for ConsoleReporter {
    fn domain_started(&mut self, domain: &str) {
        println!(
            "{}",
            self.header.apply_to(format!("Generating typos for: {}", domain))
        );
    }

    fn candidate_checked(&mut self, _domain: &str, candidate: &str, registered: bool) {
        if registered {
            println!("  {} ... {}", candidate, self.registered.apply_to("REGISTERED"));
        } else {
            println!("  {} ... {}", candidate, self.unregistered.apply_to("not registered"));
        }
    }

    fn domain_skipped(&mut self, domain: &str, error: &TypoCheckError) {
        eprintln!(
            "{}",
            self.warn.apply_to(format!("Skipping {}: {}", domain, error))
        );
    }
}

/// Main detection logic: the library orchestrator does the scanning; the
/// CLI only renders progress and the final summary.
async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&args)?;
    let checker = TypoSquatChecker::new(config)?;

    let mut reporter = ConsoleReporter::new();
    let findings = checker
        .run_with(&args.input_file, &args.output_file, &mut reporter)
        .await?;

    println!(
        "Detection complete. Found {} registered typos.",
        findings.len()
    );

    Ok(())
}
