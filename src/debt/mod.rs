//! Debt data structures and snapshot loading

mod data;
pub mod loader;

pub use data::{Debt, DebtKind, LoanType};
pub use loader::{load_debts, load_debts_from_reader};
