//! Single-debt amortization math
//!
//! Pure closed-form functions; the multi-debt rollover simulation lives in
//! `strategy::engine` and calls into nothing here except `Months`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::debt::Debt;

/// A whole-month payoff horizon. `Never` marks a non-convergent debt: the
/// payment never outruns interest accrual, so no finite horizon exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Months {
    Finite(u32),
    Never,
}

impl Months {
    pub fn is_finite(&self) -> bool {
        matches!(self, Months::Finite(_))
    }

    /// Finite month count, if any
    pub fn finite(&self) -> Option<u32> {
        match self {
            Months::Finite(m) => Some(*m),
            Months::Never => None,
        }
    }
}

impl PartialOrd for Months {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Never compares greater than any finite count, so "months to debt-free =
// max over debts" extends to non-convergent sets.
impl Ord for Months {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Months::Finite(a), Months::Finite(b)) => a.cmp(b),
            (Months::Finite(_), Months::Never) => Ordering::Less,
            (Months::Never, Months::Finite(_)) => Ordering::Greater,
            (Months::Never, Months::Never) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Months {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Months::Finite(m) => write!(f, "{} months", m),
            Months::Never => write!(f, "never"),
        }
    }
}

/// Number of whole months to pay off a single debt under a constant monthly
/// payment, interest compounding monthly.
///
/// Closed form when the monthly rate is positive:
/// `ceil(-ln(1 - balance*i/payment) / ln(1 + i))`. A partial final month
/// counts as a full month since a payment is due in it.
///
/// Returns `Never` when the payment is zero/negative or does not exceed one
/// month's interest on the balance; callers must not loop on this result.
pub fn months_to_payoff(balance: f64, annual_rate_pct: f64, monthly_payment: f64) -> Months {
    if balance <= 0.0 {
        return Months::Finite(0);
    }
    if monthly_payment <= 0.0 {
        return Months::Never;
    }

    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if monthly_rate <= 0.0 {
        return Months::Finite((balance / monthly_payment).ceil() as u32);
    }
    if monthly_payment <= balance * monthly_rate {
        return Months::Never;
    }

    let months = -(1.0 - balance * monthly_rate / monthly_payment).ln() / (1.0 + monthly_rate).ln();
    Months::Finite(months.ceil() as u32)
}

/// Total interest paid over a known finite payoff, as
/// `payment * months - balance`, clamped at zero.
///
/// This deliberately treats the final month as a full nominal payment, which
/// slightly overstates interest. It is the engine's contract: it stays
/// round-trip consistent with `months_to_payoff` and avoids a full iterative
/// ledger for a single debt.
pub fn total_interest(balance: f64, monthly_payment: f64, months: u32) -> f64 {
    (monthly_payment * months as f64 - balance).max(0.0)
}

/// Date `months` whole calendar months after `from`; `None` for `Never`.
pub fn payoff_date(from: NaiveDate, months: Months) -> Option<NaiveDate> {
    match months {
        Months::Finite(m) => Some(from + chrono::Months::new(m)),
        Months::Never => None,
    }
}

/// Payoff projection for a single debt in isolation (no rollover)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffProjection {
    pub debt_id: String,
    pub months: Months,

    /// None when the debt never pays off
    pub total_interest: Option<f64>,

    /// Original balance plus total interest; None when the debt never pays off
    pub total_paid: Option<f64>,

    /// None when the debt never pays off
    pub payoff_date: Option<NaiveDate>,
}

/// Project a single debt's payoff under its contracted payment, independent
/// of any strategy ordering. `from` is the caller's "today".
pub fn project(debt: &Debt, from: NaiveDate) -> PayoffProjection {
    let months = months_to_payoff(debt.balance, debt.annual_rate_pct, debt.total_payment());
    let (interest, paid) = match months {
        Months::Finite(m) => {
            let interest = total_interest(debt.balance, debt.total_payment(), m);
            (Some(interest), Some(debt.balance + interest))
        }
        Months::Never => (None, None),
    };

    PayoffProjection {
        debt_id: debt.id.clone(),
        months,
        total_interest: interest,
        total_paid: paid,
        payoff_date: payoff_date(from, months),
    }
}
