//! Run avalanche and snowball side by side over a debt snapshot
//!
//! Usage: cargo run --bin compare_strategies -- --debts debts.csv

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use payoff_engine::{amortization, debt::load_debts, EngineConfig, Months, PlanRunner};
use rayon::prelude::*;
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "compare_strategies")]
struct Args {
    /// Path to a debt snapshot CSV
    #[arg(long)]
    debts: PathBuf,

    /// Where to write the full comparison as JSON
    #[arg(long, default_value = "comparison_output.json")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let config = EngineConfig::default();
    let debts = load_debts(&args.debts, &config)
        .with_context(|| format!("loading debts from {}", args.debts.display()))?;
    println!("Loaded {} debts in {:?}", debts.len(), start.elapsed());

    // Independent projections first, in parallel across debts
    let today = Local::now().date_naive();
    let projections: Vec<_> = debts
        .par_iter()
        .map(|d| amortization::project(d, today))
        .collect();

    println!("\nIndependent payoff (no rollover):");
    for p in &projections {
        match p.months {
            Months::Finite(m) => println!(
                "  {:<10} {:>4} months, ${:.2} interest",
                p.debt_id,
                m,
                p.total_interest.unwrap_or(0.0)
            ),
            Months::Never => println!("  {:<10} never pays off at the contracted payment", p.debt_id),
        }
    }

    let runner = PlanRunner::new(config);
    let comparison = runner.compare(&debts)?;

    println!("\n{}", "=".repeat(60));
    println!("{:<22} {:>16} {:>16}", "", "Avalanche", "Snowball");
    println!("{}", "=".repeat(60));
    let a = comparison.avalanche.summary();
    let s = comparison.snowball.summary();
    println!(
        "{:<22} {:>16} {:>16}",
        "Months to debt-free",
        a.total_months.to_string(),
        s.total_months.to_string()
    );
    println!(
        "{:<22} {:>16.2} {:>16.2}",
        "Total interest", a.total_interest_paid, s.total_interest_paid
    );
    println!(
        "{:<22} {:>16.2} {:>16.2}",
        "Outstanding at stop", a.remaining_balance, s.remaining_balance
    );
    println!("\nCheaper strategy: {}", comparison.cheaper());

    println!("\nPer-debt payoff order:");
    for ((a_id, a_months), (s_id, s_months)) in a.per_debt_months.iter().zip(&s.per_debt_months) {
        println!(
            "  avalanche {:<10} {:<12} | snowball {:<10} {}",
            a_id, a_months.to_string(), s_id, s_months
        );
    }

    let file = File::create(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    serde_json::to_writer_pretty(file, &comparison)?;
    println!("\nFull comparison written to: {}", args.out.display());

    Ok(())
}
