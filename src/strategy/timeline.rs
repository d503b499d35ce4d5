//! Simulation output structures

use serde::{Deserialize, Serialize};

use crate::amortization::Months;
use super::Strategy;

/// Round-1 payment allocation for one debt, before any rollover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedPayment {
    pub debt_id: String,
    pub monthly_payment: f64,
}

/// An ordered payment plan produced by a strategy. The order is the
/// strategy's priority order; amounts are each debt's contracted
/// (minimum + extra) payment at round 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub strategy: Strategy,
    pub payments: Vec<PlannedPayment>,
}

impl PaymentPlan {
    /// Total monthly capacity allocated across the plan
    pub fn total_allocated(&self) -> f64 {
        self.payments.iter().map(|p| p.monthly_payment).sum()
    }
}

/// One month of the simulation timeline: the balances of debts still
/// active at the end of the month, in plan order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRow {
    /// Month index, 1-based
    pub month: u32,

    /// End-of-month balance per debt, in plan order (0.0 once retired)
    pub balances: Vec<f64>,

    /// Interest accrued across all debts this month
    pub interest_accrued: f64,

    /// Total paid across all debts this month
    pub amount_paid: f64,

    /// Ids of debts retired this month
    pub retired: Vec<String>,
}

/// Per-debt outcome under a specific strategy's rollover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtOutcome {
    pub debt_id: String,

    /// Months until this debt retired under the strategy; generally shorter
    /// than its independent payoff because of rollover
    pub months_to_payoff: Months,

    /// Interest this debt accrued over the simulation
    pub interest_paid: f64,

    /// Balance left on this debt when the simulation stopped
    pub remaining_balance: f64,
}

/// Full output of one strategy simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub strategy: Strategy,
    pub plan: PaymentPlan,

    /// Month-by-month timeline, up to retirement of the last debt or the
    /// configured horizon
    pub rows: Vec<MonthRow>,

    /// Outcome per debt, in plan order
    pub per_debt: Vec<DebtOutcome>,

    /// False when the horizon was reached with balance still outstanding
    pub converged: bool,

    /// Balance left across all debts when the simulation stopped
    pub remaining_balance: f64,
}

impl SimulationResult {
    /// Aggregate totals across all debts and months
    pub fn summary(&self) -> SimulationSummary {
        let total_months = if self.converged {
            Months::Finite(self.rows.len() as u32)
        } else {
            Months::Never
        };
        let total_interest_paid = self.per_debt.iter().map(|d| d.interest_paid).sum();
        let per_debt_months = self
            .per_debt
            .iter()
            .map(|d| (d.debt_id.clone(), d.months_to_payoff))
            .collect();

        SimulationSummary {
            strategy: self.strategy,
            total_months,
            total_interest_paid,
            per_debt_months,
            remaining_balance: self.remaining_balance,
        }
    }
}

/// Aggregate view of one simulation: how long to debt-free, at what cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub strategy: Strategy,

    /// Month in which the last debt retired; `Never` when the run hit the
    /// horizon without full payoff
    pub total_months: Months,

    /// Interest accrued across all debts across all months
    pub total_interest_paid: f64,

    /// (debt id, months to payoff) in plan order
    pub per_debt_months: Vec<(String, Months)>,

    pub remaining_balance: f64,
}
