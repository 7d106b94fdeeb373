pub mod amortization;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod market;
pub mod quote;
pub mod report;
pub mod request;
pub mod types;

// re-export key types
pub use amortization::{approximate_annual_rate, monthly_repayment, AnnuityModel, RepaymentModel};
pub use config::{LoanAmountLimits, QuoteConfig, SolverConfig};
pub use decimal::{Money, Rate};
pub use errors::{QuoteError, Result};
pub use market::{load_market, read_market};
pub use quote::{allocate, rank_lenders, LenderBook, QuoteCalculator};
pub use report::{render_error, render_json, render_text};
pub use request::parse_loan_amount;
pub use types::{Allocation, AllocationPlan, LenderOffer, LoanQuote};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
