pub mod allocator;
pub mod calculator;

pub use allocator::{allocate, rank_lenders, LenderBook};
pub use calculator::QuoteCalculator;
