//! Repayment strategy ordering and rollover simulation

mod engine;
mod state;
mod timeline;

pub use engine::{Strategy, StrategyEngine};
pub use state::DebtState;
pub use timeline::{
    DebtOutcome, MonthRow, PaymentPlan, PlannedPayment, SimulationResult, SimulationSummary,
};
