//! pulse-runner: headless report runner for the loan servicing dashboard.
//!
//! Usage:
//!   pulse-runner report --data-dir ./data --seed 42 --out report.json
//!   pulse-runner report --config pulse.json
//!   pulse-runner generate --out-dir ./data --seed 42 --loans 7000

use anyhow::{Context, Result};
use loanpulse_core::{
    config::ReportConfig,
    engine::{load_dashboard, DashboardReport},
    generator::{GeneratorConfig, SyntheticData},
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = args
        .get(1)
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("report");
    let seed = parse_arg(&args, "--seed", 42u64);
    log::info!("pulse-runner: mode '{mode}', seed {seed}");

    match mode {
        "generate" => run_generate(&args, seed),
        "report" => run_report(&args, seed),
        other => {
            eprintln!("unknown mode '{other}' (expected 'report' or 'generate')");
            std::process::exit(2);
        }
    }
}

fn run_report(args: &[String], seed: u64) -> Result<()> {
    let mut config = match string_arg(args, "--config") {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    if let Some(dir) = string_arg(args, "--data-dir") {
        config.data_dir = dir.into();
    }

    println!("LoanPulse: pulse-runner");
    println!("  seed:      {seed}");
    println!("  data_dir:  {}", config.data_dir.display());
    println!();

    let Some(dashboard) = load_dashboard(&config, seed) else {
        eprintln!("No report produced (see log for details).");
        std::process::exit(1);
    };
    print_summary(&dashboard.report);

    let json = serde_json::to_string_pretty(&dashboard.report)?;
    match string_arg(args, "--out") {
        Some(out) => {
            std::fs::write(out, json).with_context(|| format!("Cannot write {out}"))?;
            println!();
            println!("Report written to {out}");
        }
        None => {
            println!();
            println!("{json}");
        }
    }
    Ok(())
}

fn run_generate(args: &[String], seed: u64) -> Result<()> {
    let defaults = GeneratorConfig::default();
    let config = GeneratorConfig {
        associates: parse_arg(args, "--associates", defaults.associates),
        accounts: parse_arg(args, "--accounts", defaults.accounts),
        loans: parse_arg(args, "--loans", defaults.loans),
        assistance: parse_arg(args, "--assistance", defaults.assistance),
        ..defaults
    };
    let out_dir = string_arg(args, "--out-dir").unwrap_or("./data");

    SyntheticData::generate(&config, seed).write_to(Path::new(out_dir))?;
    println!("Generated synthetic portfolio (seed {seed}) in {out_dir}");
    println!("  associates:  {}", config.associates);
    println!("  accounts:    {}", config.accounts);
    println!("  loans:       {}", config.loans);
    println!("  assistance:  {}", config.assistance);
    Ok(())
}

fn print_summary(report: &DashboardReport) {
    let meta = &report.meta;
    println!("=== Report {} ===", meta.report_id);
    println!(
        "  tables:  {} associates, {} accounts, {} loans{}",
        meta.associates,
        meta.accounts,
        meta.loans,
        if meta.assistance_loaded { ", assistance history" } else { "" }
    );
    println!();
    println!("{:<28} {:>14} {:>10}", "KPI", "Value", "Trend");
    println!("{}", "-".repeat(54));
    for kpi in report.overview.kpis.iter().chain(&report.performance.kpis) {
        println!("{:<28} {:>14} {:>10}", kpi.label, kpi.value, kpi.trend);
    }
    if let Some(last) = report.forecasting.delinquency_forecast.last() {
        println!();
        println!("Forecast through {}: {:.1}%", last.month, last.rate);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}
