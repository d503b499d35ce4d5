//! Portfolio-level sums and ratios over a debt collection
//!
//! Pure mapping and folding only; the iterative timeline logic lives in
//! `strategy`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::debt::Debt;

/// A ratio that may have no defined denominator. `Unavailable` is an
/// explicit marker the caller renders as such; it never leaks into
/// arithmetic as a zero or an infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Ratio {
    Available(f64),
    Unavailable,
}

impl Ratio {
    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Available(v) => Some(*v),
            Ratio::Unavailable => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Available(v) => write!(f, "{:.2}%", v),
            Ratio::Unavailable => write!(f, "n/a"),
        }
    }
}

/// Summary statistics across one owner's debt collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Sum of balances across all debt kinds
    pub total_debt: f64,

    /// Sum of (minimum + extra) payments plus recurring bill obligations
    pub total_monthly_payment: f64,

    /// Total monthly obligation / monthly income, in percent;
    /// unavailable when income is zero or unknown
    pub debt_to_income: Ratio,

    /// Card balances / card limits in percent, restricted to cards with a
    /// positive limit; 0 when no card qualifies
    pub blended_utilization: f64,

    /// Per-card utilization in percent by debt id; 0 when the limit is
    /// zero or unset
    pub per_card_utilization: BTreeMap<String, f64>,
}

impl PortfolioSummary {
    /// Compute summary statistics from a debt snapshot.
    ///
    /// `monthly_income` and `recurring_bills` are supplied by the caller;
    /// this engine does not own income or bill records.
    pub fn compute(debts: &[Debt], monthly_income: Option<f64>, recurring_bills: f64) -> Self {
        let total_debt: f64 = debts.iter().map(|d| d.balance).sum();
        let total_monthly_payment: f64 =
            debts.iter().map(|d| d.total_payment()).sum::<f64>() + recurring_bills;

        let debt_to_income = match monthly_income {
            Some(income) if income > 0.0 => {
                Ratio::Available(total_monthly_payment / income * 100.0)
            }
            _ => Ratio::Unavailable,
        };

        // Cards without a positive limit are excluded from both sides of the
        // blended ratio
        let (card_balances, card_limits) = debts
            .iter()
            .filter_map(|d| match d.credit_limit() {
                Some(limit) if limit > 0.0 => Some((d.balance, limit)),
                _ => None,
            })
            .fold((0.0, 0.0), |(b, l), (balance, limit)| {
                (b + balance, l + limit)
            });
        let blended_utilization = if card_limits > 0.0 {
            card_balances / card_limits * 100.0
        } else {
            0.0
        };

        let per_card_utilization = debts
            .iter()
            .filter(|d| d.kind.is_credit_card())
            .map(|d| (d.id.clone(), d.utilization_pct()))
            .collect();

        Self {
            total_debt,
            total_monthly_payment,
            debt_to_income,
            blended_utilization,
            per_card_utilization,
        }
    }
}
