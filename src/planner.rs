//! Plan runner for batch projections and strategy comparisons
//!
//! Holds one configuration and lets callers run per-debt projections and
//! both competing strategies over the same debt snapshot without rebuilding
//! engines. Each call takes an immutable snapshot; there is no shared state
//! between invocations, so callers may parallelize across independent runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amortization::{self, PayoffProjection};
use crate::config::EngineConfig;
use crate::debt::Debt;
use crate::error::EngineError;
use crate::strategy::{SimulationResult, Strategy, StrategyEngine};

/// Results of running both ordering policies over one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: SimulationResult,
    pub snowball: SimulationResult,
}

impl StrategyComparison {
    /// The policy with the lower total interest cost; avalanche on a tie.
    /// A non-convergent run never beats a convergent one.
    pub fn cheaper(&self) -> Strategy {
        let a = self.avalanche.summary();
        let s = self.snowball.summary();
        match (self.avalanche.converged, self.snowball.converged) {
            (true, false) => Strategy::Avalanche,
            (false, true) => Strategy::Snowball,
            _ => {
                if s.total_interest_paid < a.total_interest_paid {
                    Strategy::Snowball
                } else {
                    Strategy::Avalanche
                }
            }
        }
    }
}

/// Pre-configured runner for projections and simulations
#[derive(Debug, Clone)]
pub struct PlanRunner {
    config: EngineConfig,
}

impl PlanRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Independent per-debt payoff projections, no rollover. `from` is the
    /// caller's "today", anchoring payoff dates.
    pub fn project_all(&self, debts: &[Debt], from: NaiveDate) -> Vec<PayoffProjection> {
        debts.iter().map(|d| amortization::project(d, from)).collect()
    }

    /// Simulate one strategy over the snapshot
    pub fn simulate(
        &self,
        debts: &[Debt],
        strategy: Strategy,
    ) -> Result<SimulationResult, EngineError> {
        StrategyEngine::new(self.config.clone()).simulate(debts, strategy)
    }

    /// Simulate with the configured default strategy
    pub fn simulate_default(&self, debts: &[Debt]) -> Result<SimulationResult, EngineError> {
        self.simulate(debts, self.config.default_strategy)
    }

    /// Run both competing strategies over the same snapshot
    pub fn compare(&self, debts: &[Debt]) -> Result<StrategyComparison, EngineError> {
        Ok(StrategyComparison {
            avalanche: self.simulate(debts, Strategy::Avalanche)?,
            snowball: self.simulate(debts, Strategy::Snowball)?,
        })
    }
}

impl Default for PlanRunner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::Months;

    fn test_debts() -> Vec<Debt> {
        vec![
            Debt::credit_card("cc-1", "Visa", 1000.0, 24.0, 50.0, 0.0, Some(3000.0)),
            Debt::credit_card("cc-2", "Mastercard", 5000.0, 12.0, 150.0, 0.0, Some(8000.0)),
        ]
    }

    #[test]
    fn test_project_all_covers_every_debt() {
        let runner = PlanRunner::default();
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let projections = runner.project_all(&test_debts(), today);

        assert_eq!(projections.len(), 2);
        assert!(projections.iter().all(|p| p.months.is_finite()));
    }

    #[test]
    fn test_compare_runs_both_policies() {
        let runner = PlanRunner::default();
        let comparison = runner.compare(&test_debts()).unwrap();

        assert_eq!(comparison.avalanche.strategy, Strategy::Avalanche);
        assert_eq!(comparison.snowball.strategy, Strategy::Snowball);
        assert!(comparison.avalanche.converged);
        assert!(comparison.snowball.converged);

        // Same capacity under either ordering
        let a_total = comparison.avalanche.plan.total_allocated();
        let s_total = comparison.snowball.plan.total_allocated();
        assert_eq!(a_total, s_total);
    }

    #[test]
    fn test_cheaper_prefers_lower_interest() {
        // Both orderings pick cc-1 first here (highest rate and lowest
        // balance), so costs tie and avalanche wins the tie-break
        let comparison = PlanRunner::default().compare(&test_debts()).unwrap();
        assert_eq!(comparison.cheaper(), Strategy::Avalanche);
    }

    #[test]
    fn test_simulate_default_uses_configured_strategy() {
        let config = EngineConfig {
            default_strategy: Strategy::Snowball,
            ..EngineConfig::default()
        };
        let result = PlanRunner::new(config).simulate_default(&test_debts()).unwrap();
        assert_eq!(result.strategy, Strategy::Snowball);
        assert!(result.summary().total_months > Months::Finite(0));
    }
}
