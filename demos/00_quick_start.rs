/// quick start - quote a loan against an in-memory market
use loan_quote_rs::{LenderOffer, QuoteCalculator, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lenders = vec![
        LenderOffer::new("Jane", Rate::from_str_exact("0.069")?, 480),
        LenderOffer::new("Fred", Rate::from_str_exact("0.071")?, 520),
        LenderOffer::new("Bob", Rate::from_str_exact("0.075")?, 640),
    ];

    let calculator = QuoteCalculator::new(lenders);
    let quote = calculator.quote(1_000)?;

    println!("rate: {}%", quote.rate);
    println!("monthly: {}", quote.monthly_repayment);
    println!("total: {}", quote.total_repayment);

    Ok(())
}
