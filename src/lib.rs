//! Payoff Engine - Debt payoff simulation and ordering
//!
//! This library provides:
//! - Single-debt amortization (months to payoff, total interest, payoff date)
//! - Portfolio aggregates (total debt, DTI, blended credit utilization)
//! - Avalanche and snowball repayment orderings
//! - Multi-debt payoff simulation with payment rollover

pub mod aggregate;
pub mod amortization;
pub mod config;
pub mod debt;
pub mod error;
pub mod planner;
pub mod strategy;

// Re-export commonly used types
pub use aggregate::{PortfolioSummary, Ratio};
pub use amortization::{Months, PayoffProjection};
pub use config::{EngineConfig, DEFAULT_HORIZON_MONTHS};
pub use debt::{Debt, DebtKind, LoanType};
pub use error::EngineError;
pub use planner::{PlanRunner, StrategyComparison};
pub use strategy::{SimulationResult, SimulationSummary, Strategy, StrategyEngine};
