//! Repayment ordering policies and the multi-debt rollover simulation

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::amortization::Months;
use crate::config::EngineConfig;
use crate::debt::Debt;
use crate::error::EngineError;
use super::state::DebtState;
use super::timeline::{DebtOutcome, MonthRow, PaymentPlan, PlannedPayment, SimulationResult};

/// Repayment ordering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first
    Avalanche,
    /// Lowest balance first
    Snowball,
}

impl Strategy {
    /// Order the active (balance > 0) debts by this policy. Both policies
    /// are deterministic total orders: ties fall through to the secondary
    /// key and finally to the record id.
    pub fn order<'a>(&self, debts: &'a [Debt]) -> Vec<&'a Debt> {
        let mut active: Vec<&Debt> = debts.iter().filter(|d| d.is_active()).collect();
        match self {
            Strategy::Avalanche => active.sort_by(|a, b| {
                b.annual_rate_pct
                    .total_cmp(&a.annual_rate_pct)
                    .then(b.balance.total_cmp(&a.balance))
                    .then_with(|| a.id.cmp(&b.id))
            }),
            Strategy::Snowball => active.sort_by(|a, b| {
                a.balance
                    .total_cmp(&b.balance)
                    .then(b.annual_rate_pct.total_cmp(&a.annual_rate_pct))
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }
        active
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Avalanche => write!(f, "avalanche"),
            Strategy::Snowball => write!(f, "snowball"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

/// Multi-debt payoff simulator with payment rollover
pub struct StrategyEngine {
    config: EngineConfig,
}

impl StrategyEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simulate paying down `debts` under the given ordering policy.
    ///
    /// Month by month, each active debt accrues interest and then receives
    /// its contracted payment; the frontmost active debt additionally
    /// receives the full payment capacity freed by every already-retired
    /// debt, and any overshoot in a retiring month cascades to the next
    /// active debt the same month.
    ///
    /// A debt that would never amortize on its own does not abort the run;
    /// rollover from retired peers may still rescue it. Only the configured
    /// horizon stops a run short, and that outcome is reported as
    /// `converged = false` with the outstanding remainder, not as an error.
    pub fn simulate(
        &self,
        debts: &[Debt],
        strategy: Strategy,
    ) -> Result<SimulationResult, EngineError> {
        if debts.is_empty() {
            return Err(EngineError::EmptyPortfolio);
        }
        for debt in debts {
            debt.validate()?;
        }

        let ordered = strategy.order(debts);
        let plan = PaymentPlan {
            strategy,
            payments: ordered
                .iter()
                .map(|d| PlannedPayment {
                    debt_id: d.id.clone(),
                    monthly_payment: d.total_payment(),
                })
                .collect(),
        };
        let mut arena: Vec<DebtState> = ordered.iter().map(|d| DebtState::from_debt(d)).collect();

        info!(
            "simulating {} strategy over {} active debts (horizon {} months)",
            strategy,
            arena.len(),
            self.config.horizon_months
        );

        let mut rows: Vec<MonthRow> = Vec::new();
        let mut month = 0u32;

        while arena.iter().any(DebtState::is_active) && month < self.config.horizon_months {
            month += 1;

            // Capacity freed by debts retired in earlier months; handed to
            // the frontmost active debt, with overshoot cascading onward
            let mut carry: f64 = arena
                .iter()
                .filter(|s| !s.is_active())
                .map(|s| s.payment)
                .sum();

            let mut interest_accrued = 0.0;
            let mut amount_paid = 0.0;
            let mut retired: Vec<String> = Vec::new();

            for state in arena.iter_mut() {
                if !state.is_active() {
                    continue;
                }
                interest_accrued += state.accrue();

                let payment = state.payment + carry;
                let remainder = state.apply_payment(payment, month);
                amount_paid += payment - remainder;
                carry = remainder;

                if !state.is_active() {
                    debug!("debt '{}' retired in month {}", state.debt_id, month);
                    retired.push(state.debt_id.clone());
                }
            }

            rows.push(MonthRow {
                month,
                balances: arena.iter().map(|s| s.balance).collect(),
                interest_accrued,
                amount_paid,
                retired,
            });
        }

        let converged = arena.iter().all(|s| !s.is_active());
        let remaining_balance: f64 = arena.iter().map(|s| s.balance).sum();
        if !converged {
            warn!(
                "{} strategy did not converge within {} months; {:.2} outstanding",
                strategy, self.config.horizon_months, remaining_balance
            );
        }

        let per_debt = arena
            .iter()
            .map(|s| DebtOutcome {
                debt_id: s.debt_id.clone(),
                months_to_payoff: match s.retired_month {
                    Some(m) => Months::Finite(m),
                    None => Months::Never,
                },
                interest_paid: s.interest_accrued,
                remaining_balance: s.balance,
            })
            .collect();

        Ok(SimulationResult {
            strategy,
            plan,
            rows,
            per_debt,
            converged,
            remaining_balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::months_to_payoff;
    use approx::assert_relative_eq;

    fn card(id: &str, balance: f64, rate: f64, payment: f64) -> Debt {
        Debt::credit_card(id, id, balance, rate, payment, 0.0, None)
    }

    fn engine() -> StrategyEngine {
        StrategyEngine::new(EngineConfig::default())
    }

    #[test]
    fn test_avalanche_orders_by_rate_desc() {
        let debts = vec![
            card("a", 9000.0, 12.0, 100.0),
            card("b", 100.0, 24.0, 100.0),
            card("c", 4000.0, 18.0, 100.0),
        ];
        let order: Vec<&str> = Strategy::Avalanche
            .order(&debts)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn test_avalanche_ignores_balance_when_rates_distinct() {
        // Same rates, shuffled balances: order must not change
        let debts_small_first = vec![
            card("a", 100.0, 24.0, 50.0),
            card("b", 9000.0, 18.0, 50.0),
        ];
        let debts_large_first = vec![
            card("a", 9000.0, 24.0, 50.0),
            card("b", 100.0, 18.0, 50.0),
        ];
        let order1: Vec<&str> = Strategy::Avalanche
            .order(&debts_small_first)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        let order2: Vec<&str> = Strategy::Avalanche
            .order(&debts_large_first)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(order1, order2);
    }

    #[test]
    fn test_snowball_orders_by_balance_asc() {
        let debts = vec![
            card("a", 9000.0, 24.0, 100.0),
            card("b", 100.0, 6.0, 100.0),
            card("c", 4000.0, 18.0, 100.0),
        ];
        let order: Vec<&str> = Strategy::Snowball
            .order(&debts)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn test_snowball_ignores_rate_when_balances_distinct() {
        let low_rate_small = vec![
            card("a", 100.0, 6.0, 50.0),
            card("b", 9000.0, 24.0, 50.0),
        ];
        let high_rate_small = vec![
            card("a", 100.0, 24.0, 50.0),
            card("b", 9000.0, 6.0, 50.0),
        ];
        let order1: Vec<&str> = Strategy::Snowball
            .order(&low_rate_small)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        let order2: Vec<&str> = Strategy::Snowball
            .order(&high_rate_small)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(order1, order2);
    }

    #[test]
    fn test_ties_break_deterministically_by_id() {
        let debts = vec![
            card("z", 1000.0, 18.0, 50.0),
            card("a", 1000.0, 18.0, 50.0),
        ];
        let avalanche: Vec<&str> = Strategy::Avalanche
            .order(&debts)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        let snowball: Vec<&str> = Strategy::Snowball
            .order(&debts)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(avalanche, ["a", "z"]);
        assert_eq!(snowball, ["a", "z"]);
    }

    #[test]
    fn test_strategies_diverge_on_first_pick() {
        // Small balance at a low rate vs large balance at a high rate
        let debts = vec![
            card("small-low", 500.0, 8.0, 25.0),
            card("large-high", 1000.0, 24.0, 50.0),
        ];
        let avalanche_first = Strategy::Avalanche.order(&debts)[0].id.clone();
        let snowball_first = Strategy::Snowball.order(&debts)[0].id.clone();
        assert_eq!(avalanche_first, "large-high");
        assert_eq!(snowball_first, "small-low");
        assert_ne!(avalanche_first, snowball_first);
    }

    #[test]
    fn test_retired_debts_excluded_from_order() {
        let debts = vec![card("paid", 0.0, 24.0, 50.0), card("open", 500.0, 12.0, 50.0)];
        let order = Strategy::Avalanche.order(&debts);
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].id, "open");
    }

    #[test]
    fn test_two_card_rollover_scenario() {
        // Card A: 1000 @ 24%, 50/mo. Card B: 5000 @ 12%, 150/mo.
        // Avalanche pays A first; its 50/mo rolls into B from month 27.
        let debts = vec![
            card("card-a", 1000.0, 24.0, 50.0),
            card("card-b", 5000.0, 12.0, 150.0),
        ];
        let result = engine().simulate(&debts, Strategy::Avalanche).unwrap();

        assert!(result.converged);
        assert_eq!(result.plan.payments[0].debt_id, "card-a");

        let a = &result.per_debt[0];
        let b = &result.per_debt[1];
        assert_eq!(a.months_to_payoff, Months::Finite(26));
        assert_eq!(b.months_to_payoff, Months::Finite(37));
        assert_eq!(result.summary().total_months, Months::Finite(37));

        // B alone at 150/mo would take 41 months; rollover shortens it
        assert_eq!(months_to_payoff(5000.0, 12.0, 150.0), Months::Finite(41));

        // From month 27, B receives A's freed 50/mo on top of its own 150
        let row27 = &result.rows[26];
        assert_relative_eq!(row27.amount_paid, 200.0, max_relative = 1e-9);
    }

    #[test]
    fn test_rollover_never_slower_or_costlier_than_independent() {
        let debts = vec![
            card("a", 1000.0, 24.0, 50.0),
            card("b", 5000.0, 12.0, 150.0),
            card("c", 2500.0, 19.9, 80.0),
        ];
        let independent: Vec<u32> = debts
            .iter()
            .map(|d| {
                months_to_payoff(d.balance, d.annual_rate_pct, d.total_payment())
                    .finite()
                    .unwrap()
            })
            .collect();
        let worst_independent = *independent.iter().max().unwrap();
        let independent_interest: f64 = debts
            .iter()
            .zip(&independent)
            .map(|(d, &m)| crate::amortization::total_interest(d.balance, d.total_payment(), m))
            .sum();

        for strategy in [Strategy::Avalanche, Strategy::Snowball] {
            let result = engine().simulate(&debts, strategy).unwrap();
            let summary = result.summary();
            assert!(summary.total_months <= Months::Finite(worst_independent));
            assert!(summary.total_interest_paid <= independent_interest);
        }
    }

    #[test]
    fn test_plan_allocates_exactly_contracted_capacity() {
        let debts = vec![
            Debt::credit_card("a", "a", 1000.0, 24.0, 50.0, 25.0, None),
            Debt::credit_card("b", "b", 5000.0, 12.0, 150.0, 0.0, None),
        ];
        let result = engine().simulate(&debts, Strategy::Snowball).unwrap();
        assert_relative_eq!(result.plan.total_allocated(), 225.0);
    }

    #[test]
    fn test_non_convergent_member_rescued_by_rollover() {
        // Alone, "stuck" accrues exactly its payment in interest and never
        // amortizes. The zero-rate loan retires in month 5 and its 100/mo
        // rolls over, rescuing it.
        let debts = vec![
            card("stuck", 1000.0, 24.0, 20.0),
            card("loan", 500.0, 0.0, 100.0),
        ];
        assert_eq!(months_to_payoff(1000.0, 24.0, 20.0), Months::Never);

        let result = engine().simulate(&debts, Strategy::Avalanche).unwrap();
        assert!(result.converged);
        let stuck = result
            .per_debt
            .iter()
            .find(|d| d.debt_id == "stuck")
            .unwrap();
        assert!(stuck.months_to_payoff.is_finite());
        assert!(stuck.months_to_payoff > Months::Finite(5));
    }

    #[test]
    fn test_horizon_reached_reports_remainder() {
        let debts = vec![card("a", 10_000.0, 36.0, 10.0)];
        let config = EngineConfig {
            horizon_months: 120,
            ..EngineConfig::default()
        };
        let result = StrategyEngine::new(config)
            .simulate(&debts, Strategy::Avalanche)
            .unwrap();

        assert!(!result.converged);
        assert_eq!(result.rows.len(), 120);
        assert!(result.remaining_balance > 10_000.0);
        assert_eq!(result.summary().total_months, Months::Never);
        assert_eq!(result.per_debt[0].months_to_payoff, Months::Never);
    }

    #[test]
    fn test_zero_payment_portfolio_stops_at_horizon() {
        let debts = vec![card("a", 1000.0, 18.0, 0.0)];
        let config = EngineConfig {
            horizon_months: 60,
            ..EngineConfig::default()
        };
        let result = StrategyEngine::new(config)
            .simulate(&debts, Strategy::Snowball)
            .unwrap();
        assert!(!result.converged);
        assert_eq!(result.rows.len(), 60);
    }

    #[test]
    fn test_empty_portfolio_rejected() {
        let err = engine().simulate(&[], Strategy::Avalanche).unwrap_err();
        assert!(matches!(err, EngineError::EmptyPortfolio));
    }

    #[test]
    fn test_invalid_debt_rejected_before_simulation() {
        let debts = vec![card("ok", 100.0, 12.0, 50.0), card("bad", -5.0, 12.0, 50.0)];
        let err = engine().simulate(&debts, Strategy::Avalanche).unwrap_err();
        assert!(matches!(err, EngineError::NegativeBalance { .. }));
    }

    #[test]
    fn test_timeline_balances_monotone_per_debt_once_converging() {
        let debts = vec![card("a", 500.0, 0.0, 100.0)];
        let result = engine().simulate(&debts, Strategy::Avalanche).unwrap();
        assert_eq!(result.rows.len(), 5);
        for pair in result.rows.windows(2) {
            assert!(pair[1].balances[0] <= pair[0].balances[0]);
        }
        assert_eq!(result.rows.last().unwrap().balances[0], 0.0);
        assert_eq!(result.rows.last().unwrap().retired, vec!["a".to_string()]);
    }
}
