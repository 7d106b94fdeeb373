/// market file - load lenders from CSV and print the quote as JSON
use loan_quote_rs::config::{QuoteConfig, SolverConfig};
use loan_quote_rs::{load_market, render_json, render_text, QuoteCalculator, QuoteError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/market.csv");
    let lenders = load_market(path)?;

    // a shorter term with a tighter solver
    let config = QuoteConfig::standard()
        .with_term_months(24)
        .with_solver(SolverConfig::default().with_tolerance(1e-10).with_max_iterations(50));
    let calculator = QuoteCalculator::with_config(lenders, config)?;

    for lender in calculator.lenders() {
        println!("{:<8} {:>6} {:>5}", lender.name, lender.rate, lender.available);
    }

    let quote = calculator.quote(1_500)?;
    println!("{}", render_text(&quote));
    println!("{}", render_json(&quote)?);

    // more than the whole market offers
    match calculator.quote(15_000) {
        Err(QuoteError::InsufficientLenders { requested, available }) => {
            println!("cannot lend {}: market only has {}", requested, available)
        }
        other => println!("unexpected: {:?}", other),
    }

    Ok(())
}
