//! Working state for one debt during a rollover simulation

use crate::debt::Debt;

/// Mutable per-debt state, held in an ordered arena and referenced by
/// position throughout the month loop. The source `Debt` record itself is
/// never mutated.
#[derive(Debug, Clone)]
pub struct DebtState {
    /// Record identifier, for reporting
    pub debt_id: String,

    /// Remaining balance at the current point in the simulation
    pub balance: f64,

    /// Contracted monthly payment (minimum + extra), fixed for the run
    pub payment: f64,

    /// Monthly periodic rate as a fraction
    pub monthly_rate: f64,

    /// Interest accrued on this debt so far, summed month by month
    pub interest_accrued: f64,

    /// Month index (1-based) in which the balance reached zero
    pub retired_month: Option<u32>,
}

impl DebtState {
    /// Initialize working state from a debt record at simulation start
    pub fn from_debt(debt: &Debt) -> Self {
        Self {
            debt_id: debt.id.clone(),
            balance: debt.balance,
            payment: debt.total_payment(),
            monthly_rate: debt.monthly_rate(),
            interest_accrued: 0.0,
            retired_month: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.retired_month.is_none()
    }

    /// Accrue one month's interest on the working balance and return the
    /// amount accrued
    pub fn accrue(&mut self) -> f64 {
        let interest = self.balance * self.monthly_rate;
        self.balance += interest;
        self.interest_accrued += interest;
        interest
    }

    /// Apply a payment; returns the unused remainder when the payment
    /// retires the debt this month
    pub fn apply_payment(&mut self, amount: f64, month: u32) -> f64 {
        if amount >= self.balance {
            let remainder = amount - self.balance;
            self.balance = 0.0;
            self.retired_month = Some(month);
            remainder
        } else {
            self.balance -= amount;
            0.0
        }
    }
}
