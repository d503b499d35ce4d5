//! Single-debt amortization calculator

mod calc;

pub use calc::{months_to_payoff, payoff_date, project, total_interest, Months, PayoffProjection};
