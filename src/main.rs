//! Payoff Engine CLI
//!
//! Loads a debt snapshot, prints portfolio aggregates and per-debt payoff
//! projections, then simulates the chosen repayment strategy month by month.

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use payoff_engine::{
    debt::load_debts, Debt, EngineConfig, Months, PlanRunner, PortfolioSummary, Strategy,
    DEFAULT_HORIZON_MONTHS,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "payoff_engine", about = "Debt payoff simulation and ordering")]
struct Args {
    /// Path to a debt snapshot CSV; a built-in demo portfolio is used when
    /// omitted
    #[arg(long)]
    debts: Option<PathBuf>,

    /// Monthly income, for the debt-to-income ratio
    #[arg(long)]
    income: Option<f64>,

    /// Recurring monthly bill obligations outside the debt set
    #[arg(long, default_value_t = 0.0)]
    bills: f64,

    /// Repayment strategy: avalanche or snowball
    #[arg(long, default_value = "avalanche")]
    strategy: Strategy,

    /// Maximum months to simulate before flagging non-convergence
    #[arg(long, default_value_t = DEFAULT_HORIZON_MONTHS)]
    horizon: u32,
}

fn demo_portfolio() -> Vec<Debt> {
    vec![
        Debt::credit_card("cc-1", "Visa ...4821", 5000.0, 19.9, 150.0, 50.0, Some(12_000.0)),
        Debt::credit_card("cc-2", "Store card", 1200.0, 26.9, 40.0, 0.0, Some(2000.0)),
        Debt::installment_loan(
            "ln-1",
            "Auto loan",
            14_500.0,
            6.4,
            315.0,
            0.0,
            Some(60),
            Some(payoff_engine::LoanType::Auto),
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Payoff Engine v0.1.0");
    println!("====================\n");

    let config = EngineConfig {
        horizon_months: args.horizon,
        default_strategy: args.strategy,
        ..EngineConfig::default()
    };

    let debts = match &args.debts {
        Some(path) => load_debts(path, &config)
            .with_context(|| format!("loading debts from {}", path.display()))?,
        None => demo_portfolio(),
    };
    let today: NaiveDate = Local::now().date_naive();

    // Portfolio aggregates
    let summary = PortfolioSummary::compute(&debts, args.income, args.bills);
    println!("Portfolio:");
    println!("  Total Debt: ${:.2}", summary.total_debt);
    println!("  Total Monthly Obligation: ${:.2}", summary.total_monthly_payment);
    println!("  Debt-to-Income: {}", summary.debt_to_income);
    println!("  Blended Utilization: {:.2}%", summary.blended_utilization);
    println!();

    // Independent per-debt projections
    let runner = PlanRunner::new(config);
    println!("{:<8} {:<16} {:>12} {:>8} {:>12} {:>12} {:>12}",
        "Id", "Name", "Balance", "Rate", "Payment", "Months", "Interest");
    println!("{}", "-".repeat(86));
    for (debt, projection) in debts.iter().zip(runner.project_all(&debts, today)) {
        let (months, interest) = match projection.months {
            Months::Finite(m) => (m.to_string(), format!("{:.2}", projection.total_interest.unwrap_or(0.0))),
            Months::Never => ("never".to_string(), "-".to_string()),
        };
        println!("{:<8} {:<16} {:>12.2} {:>7.2}% {:>12.2} {:>12} {:>12}",
            debt.id,
            debt.name,
            debt.balance,
            debt.annual_rate_pct,
            debt.total_payment(),
            months,
            interest,
        );
    }
    println!();

    // Strategy simulation
    let result = runner.simulate(&debts, args.strategy)?;
    println!("Simulation ({} strategy, {} months):", result.strategy, result.rows.len());
    println!("{:>5} {:>14} {:>12} {:>12}  {}",
        "Month", "Remaining", "Interest", "Paid", "Retired");
    println!("{}", "-".repeat(60));
    for row in result.rows.iter().take(24) {
        let remaining: f64 = row.balances.iter().sum();
        println!("{:>5} {:>14.2} {:>12.2} {:>12.2}  {}",
            row.month,
            remaining,
            row.interest_accrued,
            row.amount_paid,
            row.retired.join(", "),
        );
    }
    if result.rows.len() > 24 {
        println!("... ({} more months)", result.rows.len() - 24);
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Strategy: {}", summary.strategy);
    println!("  Months to Debt-Free: {}", summary.total_months);
    println!("  Total Interest Paid: ${:.2}", summary.total_interest_paid);
    if !result.converged {
        println!("  WARNING: did not converge; ${:.2} outstanding at horizon",
            summary.remaining_balance);
    }
    println!("\nPer-Debt Payoff (with rollover):");
    for (id, months) in &summary.per_debt_months {
        println!("  {:<8} {}", id, months);
    }

    Ok(())
}
