//! Command line entrypoint: quote a loan against a CSV market file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use loan_quote_rs::config::{LoanAmountLimits, QuoteConfig};
use loan_quote_rs::{load_market, parse_loan_amount, render_error, render_json, render_text, QuoteCalculator};

/// Quote a 36 month loan from the cheapest lenders in a market
#[derive(Parser)]
#[command(name = "loan-quote", version)]
struct Cli {
    /// CSV file with Lender, Rate and Available columns
    market_file: PathBuf,

    /// Amount to borrow, any 100 increment between 1000 and 15000
    loan_amount: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Repayment term in months
    #[arg(long)]
    term_months: Option<u32>,

    /// Iteration budget for the rate estimate
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Verbose logging on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", render_error(&e));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> loan_quote_rs::Result<String> {
    let mut config = QuoteConfig::standard();
    if let Some(term) = cli.term_months {
        config = config.with_term_months(term);
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.solver = config.solver.with_max_iterations(max_iterations);
    }

    let lenders = load_market(&cli.market_file)?;
    info!(lenders = lenders.len(), file = %cli.market_file.display(), "market loaded");

    let amount = parse_loan_amount(&cli.loan_amount, &LoanAmountLimits::standard())?;

    let calculator = QuoteCalculator::with_config(lenders, config)?;
    for lender in calculator.lenders() {
        debug!(lender = %lender.name, rate = %lender.rate, available = lender.available, "ranked lender");
    }

    let quote = calculator.quote(amount)?;

    match cli.format {
        OutputFormat::Text => Ok(render_text(&quote)),
        OutputFormat::Json => render_json(&quote),
    }
}
