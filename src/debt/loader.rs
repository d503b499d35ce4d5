//! Load debt snapshots from CSV exports of the record store

use super::{Debt, DebtKind, LoanType};
use crate::config::EngineConfig;
use crate::error::EngineError;
use csv::Reader;
use log::info;
use std::path::Path;

/// Raw CSV row matching the debt snapshot columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "AnnualRatePct")]
    annual_rate_pct: Option<f64>,
    #[serde(rename = "MinimumPayment")]
    minimum_payment: f64,
    #[serde(rename = "ExtraPayment")]
    extra_payment: Option<f64>,
    #[serde(rename = "CreditLimit")]
    credit_limit: Option<f64>,
    #[serde(rename = "TermMonths")]
    term_months: Option<u32>,
    #[serde(rename = "LoanType")]
    loan_type: Option<String>,
    #[serde(rename = "PropertyValue")]
    property_value: Option<f64>,
}

impl CsvRow {
    fn to_debt(self, config: &EngineConfig) -> Result<Debt, EngineError> {
        if self.id.trim().is_empty() {
            return Err(EngineError::MissingField {
                id: self.name,
                field: "Id",
            });
        }
        let kind = match self.kind.as_str() {
            "credit-card" => DebtKind::CreditCard {
                credit_limit: self.credit_limit,
            },
            "installment-loan" => {
                let loan_type = match self.loan_type.as_deref() {
                    None => None,
                    Some("auto") => Some(LoanType::Auto),
                    Some("student") => Some(LoanType::Student),
                    Some("personal") => Some(LoanType::Personal),
                    Some("other") => Some(LoanType::Other),
                    Some(other) => {
                        return Err(EngineError::UnknownKind {
                            id: self.id,
                            kind: other.to_string(),
                        })
                    }
                };
                DebtKind::InstallmentLoan {
                    term_months: self.term_months,
                    loan_type,
                }
            }
            "mortgage" => DebtKind::Mortgage {
                property_value: self.property_value,
            },
            other => {
                return Err(EngineError::UnknownKind {
                    id: self.id,
                    kind: other.to_string(),
                })
            }
        };

        let debt = Debt {
            id: self.id,
            name: self.name,
            balance: self.balance,
            // Records with no rate fall back to the configured default
            annual_rate_pct: self.annual_rate_pct.unwrap_or(config.default_annual_rate_pct),
            minimum_payment: self.minimum_payment,
            extra_payment: self.extra_payment.unwrap_or(0.0),
            kind,
        };
        debt.validate()?;
        Ok(debt)
    }
}

/// Load all debts from a CSV snapshot file
pub fn load_debts<P: AsRef<Path>>(path: P, config: &EngineConfig) -> Result<Vec<Debt>, EngineError> {
    let mut reader = Reader::from_path(path.as_ref())?;
    let mut debts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        debts.push(row.to_debt(config)?);
    }

    info!(
        "loaded {} debts from {}",
        debts.len(),
        path.as_ref().display()
    );
    Ok(debts)
}

/// Load debts from any reader (e.g., string buffer, export stream)
pub fn load_debts_from_reader<R: std::io::Read>(
    reader: R,
    config: &EngineConfig,
) -> Result<Vec<Debt>, EngineError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut debts = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        debts.push(row.to_debt(config)?);
    }

    Ok(debts)
}
