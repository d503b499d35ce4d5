//! Debt record structures matching the external record-store snapshot format

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Type of an installment loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanType {
    Auto,
    Student,
    Personal,
    Other,
}

impl LoanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanType::Auto => "auto",
            LoanType::Student => "student",
            LoanType::Personal => "personal",
            LoanType::Other => "other",
        }
    }
}

/// Kind-specific payload of a debt, selected by an explicit discriminant
/// rather than optional-field presence checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DebtKind {
    /// Revolving credit; the limit drives utilization metrics
    CreditCard { credit_limit: Option<f64> },
    /// Fixed-term loan (auto, student, personal)
    InstallmentLoan {
        term_months: Option<u32>,
        loan_type: Option<LoanType>,
    },
    /// Mortgage; property value is carried for caller-side equity displays
    Mortgage { property_value: Option<f64> },
}

impl DebtKind {
    /// Discriminant name matching the record store's `kind` field
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtKind::CreditCard { .. } => "credit-card",
            DebtKind::InstallmentLoan { .. } => "installment-loan",
            DebtKind::Mortgage { .. } => "mortgage",
        }
    }

    pub fn is_credit_card(&self) -> bool {
        matches!(self, DebtKind::CreditCard { .. })
    }
}

/// A single debt record from the owner's snapshot
///
/// Immutable for the duration of one simulation call; the engine returns
/// projections and never writes back to stored records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Record-store identifier, also the deterministic ordering tie-break
    pub id: String,

    /// Display label ("Visa ...1234")
    pub name: String,

    /// Current balance, non-negative; a zero balance means the debt is
    /// retired and excluded from active simulation
    pub balance: f64,

    /// Nominal annual interest rate in percent (18.0 means 18%)
    pub annual_rate_pct: f64,

    /// Required minimum monthly payment
    pub minimum_payment: f64,

    /// User-directed surplus applied on top of the minimum each month
    pub extra_payment: f64,

    /// Kind discriminant plus kind-specific payload
    #[serde(flatten)]
    pub kind: DebtKind,
}

impl Debt {
    /// Create a credit card debt
    pub fn credit_card(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: f64,
        annual_rate_pct: f64,
        minimum_payment: f64,
        extra_payment: f64,
        credit_limit: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            annual_rate_pct,
            minimum_payment,
            extra_payment,
            kind: DebtKind::CreditCard { credit_limit },
        }
    }

    /// Create an installment loan debt
    pub fn installment_loan(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: f64,
        annual_rate_pct: f64,
        minimum_payment: f64,
        extra_payment: f64,
        term_months: Option<u32>,
        loan_type: Option<LoanType>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            annual_rate_pct,
            minimum_payment,
            extra_payment,
            kind: DebtKind::InstallmentLoan {
                term_months,
                loan_type,
            },
        }
    }

    /// Create a mortgage debt
    pub fn mortgage(
        id: impl Into<String>,
        name: impl Into<String>,
        balance: f64,
        annual_rate_pct: f64,
        minimum_payment: f64,
        extra_payment: f64,
        property_value: Option<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
            annual_rate_pct,
            minimum_payment,
            extra_payment,
            kind: DebtKind::Mortgage { property_value },
        }
    }

    /// Monthly periodic rate as a fraction (18.0% annual -> 0.015)
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct / 100.0 / 12.0
    }

    /// Contracted monthly payment before any rollover: minimum + extra
    pub fn total_payment(&self) -> f64 {
        self.minimum_payment + self.extra_payment
    }

    /// Whether the debt still participates in simulation
    pub fn is_active(&self) -> bool {
        self.balance > 0.0
    }

    /// Credit limit, for credit cards that carry one
    pub fn credit_limit(&self) -> Option<f64> {
        match self.kind {
            DebtKind::CreditCard { credit_limit } => credit_limit,
            _ => None,
        }
    }

    /// Per-card utilization in percent; 0 when the limit is zero or unset
    pub fn utilization_pct(&self) -> f64 {
        match self.credit_limit() {
            Some(limit) if limit > 0.0 => self.balance / limit * 100.0,
            _ => 0.0,
        }
    }

    /// Validate the record. Surfaced immediately with no partial
    /// computation; every engine entry point validates its inputs first.
    pub fn validate(&self) -> Result<(), EngineError> {
        for (field, value) in [
            ("balance", self.balance),
            ("annual_rate_pct", self.annual_rate_pct),
            ("minimum_payment", self.minimum_payment),
            ("extra_payment", self.extra_payment),
        ] {
            if !value.is_finite() {
                return Err(EngineError::NonFiniteAmount {
                    id: self.id.clone(),
                    field,
                });
            }
        }
        if self.balance < 0.0 {
            return Err(EngineError::NegativeBalance {
                id: self.id.clone(),
                balance: self.balance,
            });
        }
        if self.annual_rate_pct < 0.0 {
            return Err(EngineError::NegativeRate {
                id: self.id.clone(),
                rate: self.annual_rate_pct,
            });
        }
        if self.minimum_payment < 0.0 {
            return Err(EngineError::NegativePayment {
                id: self.id.clone(),
                field: "minimum_payment",
                amount: self.minimum_payment,
            });
        }
        if self.extra_payment < 0.0 {
            return Err(EngineError::NegativePayment {
                id: self.id.clone(),
                field: "extra_payment",
                amount: self.extra_payment,
            });
        }
        Ok(())
    }
}
