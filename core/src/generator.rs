//! Synthetic portfolio generation.
//!
//! Produces the five CSV tables the loader reads, with the same column
//! layout and value distributions as the servicing exports. All generation
//! is deterministic (same seed = same tables).

use crate::{
    config::TableFiles,
    error::{PulseError, PulseResult},
    loader::Portfolio,
    records::{Account, Associate, AssistanceProgram, AssistanceRecord, Loan},
    rng::{RngBank, StreamRng, StreamSlot},
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::path::Path;

pub const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

const ACCOUNT_DELINQUENCY_DAYS: [i64; 6] = [0, 15, 30, 60, 90, 120];
const ACCOUNT_DELINQUENCY_WEIGHTS: [f64; 6] = [0.55, 0.15, 0.12, 0.10, 0.06, 0.02];
const LOAN_DELINQUENCY_DAYS: [i64; 5] = [0, 30, 60, 90, 120];
const LOAN_DELINQUENCY_WEIGHTS: [f64; 5] = [0.70, 0.12, 0.08, 0.07, 0.03];

const PROGRAMS: [(i64, &str, i64); 4] = [
    (1, "Forbearance", 2),
    (2, "Re-amortization", 1),
    (3, "Payment Deferral", 3),
    (4, "Hardship Modification", 1),
];

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub associates: usize,
    pub accounts: usize,
    pub loans: usize,
    pub assistance: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            associates: 25,
            accounts: 5000,
            loans: 7000,
            assistance: 3000,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap_or_default(),
        }
    }
}

/// Credit score band used by the servicing system: (0,600] High,
/// (600,680] Medium, (680,750] Low, above that Very Low.
pub fn risk_segment_for(score: i64) -> &'static str {
    match score {
        s if s <= 600 => "High Risk",
        s if s <= 680 => "Medium Risk",
        s if s <= 750 => "Low Risk",
        _ => "Very Low Risk",
    }
}

/// Account delinquency status label as exported by the servicing system.
pub fn delinquency_status_for(days: i64) -> &'static str {
    match days {
        d if d <= 0 => "Current",
        d if d <= 30 => "Early",
        d if d <= 60 => "30-60",
        d if d <= 90 => "60-90",
        _ => "90+",
    }
}

#[derive(Debug, Clone, Serialize)]
struct AssociateRow {
    associate_id: i64,
    associate_name: String,
    region: &'static str,
    experience_years: i64,
}

#[derive(Debug, Clone, Serialize)]
struct AccountRow {
    account_id: i64,
    associate_id: i64,
    origination_date: NaiveDate,
    account_balance: i64,
    is_migrated: i64,
    days_delinquent: i64,
    cured_flag: i64,
    last_payment_date: NaiveDate,
    delinquency_status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct LoanRow {
    loan_id: i64,
    customer_id: i64,
    region: &'static str,
    loan_amount: i64,
    credit_score: i64,
    origination_date: NaiveDate,
    loan_age_months: i64,
    days_delinquent: i64,
    risk_segment: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ProgramRow {
    program_id: i64,
    program_name: &'static str,
    max_allowed: i64,
}

#[derive(Debug, Clone, Serialize)]
struct AssistanceRow {
    assistance_id: i64,
    loan_id: i64,
    program_id: i64,
    assistance_start_date: NaiveDate,
    duration_months: i64,
    assistance_count_for_customer: i64,
    successful_cure: i64,
    redefaulted: i64,
}

/// One generated data set, held in memory until written.
#[derive(Debug, Clone)]
pub struct SyntheticData {
    associates: Vec<AssociateRow>,
    accounts: Vec<AccountRow>,
    loans: Vec<LoanRow>,
    programs: Vec<ProgramRow>,
    assistance: Vec<AssistanceRow>,
}

fn random_date(rng: &mut StreamRng, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days().max(0);
    start + Duration::days(rng.next_in_range(0, span + 1))
}

fn pick_weighted(rng: &mut StreamRng, values: &[i64], weights: &[f64]) -> i64 {
    values[rng.weighted_index(weights)]
}

impl SyntheticData {
    pub fn generate(config: &GeneratorConfig, seed: u64) -> Self {
        let bank = RngBank::new(seed);
        let (start, end) = (config.start_date, config.end_date);

        let mut rng = bank.for_slot(StreamSlot::GenAssociates);
        let associates: Vec<AssociateRow> = (1..=config.associates as i64)
            .map(|i| AssociateRow {
                associate_id: i,
                associate_name: format!("Associate_{i}"),
                region: *rng.choose(&REGIONS),
                experience_years: rng.next_in_range(1, 15),
            })
            .collect();

        let mut rng = bank.for_slot(StreamSlot::GenAccounts);
        let associate_count = config.associates.max(1) as i64;
        let accounts = (1..=config.accounts as i64)
            .map(|i| {
                let associate_id = rng.next_in_range(1, associate_count + 1);
                let origination_date = random_date(&mut rng, start, end);
                let account_balance = rng.next_in_range(50_000, 500_000);
                let is_migrated = i64::from(rng.chance(0.25));
                let days = pick_weighted(&mut rng, &ACCOUNT_DELINQUENCY_DAYS, &ACCOUNT_DELINQUENCY_WEIGHTS);
                let cured_flag = i64::from(rng.chance(0.3));
                let last_payment_date = random_date(&mut rng, start, end);
                AccountRow {
                    account_id: i,
                    associate_id,
                    origination_date,
                    account_balance,
                    is_migrated,
                    days_delinquent: days,
                    cured_flag,
                    last_payment_date,
                    delinquency_status: delinquency_status_for(days),
                }
            })
            .collect();

        let mut rng = bank.for_slot(StreamSlot::GenLoans);
        let loans = (1..=config.loans as i64)
            .map(|i| {
                let customer_id = rng.next_in_range(10_000, 99_999);
                let region = *rng.choose(&REGIONS);
                let loan_amount = rng.next_in_range(100_000, 2_000_000);
                let credit_score = rng.next_in_range(500, 850);
                let origination_date = random_date(&mut rng, start, end);
                let loan_age_months = rng.next_in_range(1, 120);
                let days = pick_weighted(&mut rng, &LOAN_DELINQUENCY_DAYS, &LOAN_DELINQUENCY_WEIGHTS);
                LoanRow {
                    loan_id: i,
                    customer_id,
                    region,
                    loan_amount,
                    credit_score,
                    origination_date,
                    loan_age_months,
                    days_delinquent: days,
                    risk_segment: risk_segment_for(credit_score),
                }
            })
            .collect();

        let programs: Vec<ProgramRow> = PROGRAMS
            .iter()
            .map(|&(program_id, program_name, max_allowed)| ProgramRow {
                program_id,
                program_name,
                max_allowed,
            })
            .collect();

        let mut rng = bank.for_slot(StreamSlot::GenAssistance);
        let loan_count = config.loans.max(1) as i64;
        let assistance = (1..=config.assistance as i64)
            .map(|i| {
                let loan_id = rng.next_in_range(1, loan_count + 1);
                let program_id = rng.choose(&programs).program_id;
                AssistanceRow {
                    assistance_id: i,
                    loan_id,
                    program_id,
                    assistance_start_date: random_date(&mut rng, start, end),
                    duration_months: rng.next_in_range(1, 12),
                    assistance_count_for_customer: rng.next_in_range(1, 5),
                    successful_cure: i64::from(rng.chance(0.6)),
                    redefaulted: i64::from(rng.chance(0.3)),
                }
            })
            .collect();

        Self {
            associates,
            accounts,
            loans,
            programs,
            assistance,
        }
    }

    /// Write all five tables into `dir`, creating it if needed.
    pub fn write_to(&self, dir: &Path) -> PulseResult<()> {
        let files = TableFiles::default();
        std::fs::create_dir_all(dir)?;
        write_csv(&dir.join(&files.associates), &self.associates)?;
        write_csv(&dir.join(&files.accounts), &self.accounts)?;
        write_csv(&dir.join(&files.loans), &self.loans)?;
        write_csv(&dir.join(&files.assistance_programs), &self.programs)?;
        write_csv(&dir.join(&files.customer_assistance), &self.assistance)?;
        log::info!(
            "generator: wrote {} associates, {} accounts, {} loans, {} assistance records to {}",
            self.associates.len(),
            self.accounts.len(),
            self.loans.len(),
            self.assistance.len(),
            dir.display()
        );
        Ok(())
    }

    /// The same data as the loader would return after `write_to`.
    pub fn to_portfolio(&self) -> Portfolio {
        Portfolio {
            associates: self
                .associates
                .iter()
                .map(|a| Associate {
                    associate_id: a.associate_id,
                    associate_name: a.associate_name.clone(),
                    region: a.region.into(),
                    experience_years: Some(a.experience_years),
                })
                .collect(),
            accounts: self
                .accounts
                .iter()
                .map(|a| Account {
                    account_id: a.account_id,
                    associate_id: Some(a.associate_id),
                    days_delinquent: Some(a.days_delinquent),
                    cured_flag: Some(a.cured_flag),
                    is_migrated: Some(a.is_migrated),
                    account_balance: Some(a.account_balance as f64),
                })
                .collect(),
            loans: self
                .loans
                .iter()
                .map(|l| Loan {
                    loan_id: l.loan_id,
                    loan_amount: Some(l.loan_amount as f64),
                    credit_score: Some(l.credit_score as f64),
                    days_delinquent: Some(l.days_delinquent),
                    risk_segment: l.risk_segment.into(),
                    region: l.region.into(),
                    origination_date: Some(l.origination_date),
                    loan_age_months: Some(l.loan_age_months),
                })
                .collect(),
            programs: Some(
                self.programs
                    .iter()
                    .map(|p| AssistanceProgram {
                        program_id: p.program_id,
                        program_name: p.program_name.into(),
                        max_allowed: Some(p.max_allowed),
                    })
                    .collect(),
            ),
            assistance: Some(
                self.assistance
                    .iter()
                    .map(|r| AssistanceRecord {
                        assistance_id: r.assistance_id,
                        loan_id: Some(r.loan_id),
                        program_id: Some(r.program_id),
                        assistance_start_date: Some(r.assistance_start_date),
                        duration_months: Some(r.duration_months),
                        assistance_count_for_customer: Some(r.assistance_count_for_customer),
                        successful_cure: Some(r.successful_cure),
                        redefaulted: Some(r.redefaulted),
                    })
                    .collect(),
            ),
        }
    }
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> PulseResult<()> {
    let csv_err = |source: csv::Error| PulseError::Csv {
        file: path.display().to_string(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    for row in rows {
        wtr.serialize(row).map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_bands() {
        assert_eq!(risk_segment_for(500), "High Risk");
        assert_eq!(risk_segment_for(600), "High Risk");
        assert_eq!(risk_segment_for(601), "Medium Risk");
        assert_eq!(risk_segment_for(750), "Low Risk");
        assert_eq!(risk_segment_for(751), "Very Low Risk");
    }

    #[test]
    fn status_labels() {
        assert_eq!(delinquency_status_for(0), "Current");
        assert_eq!(delinquency_status_for(15), "Early");
        assert_eq!(delinquency_status_for(30), "Early");
        assert_eq!(delinquency_status_for(60), "30-60");
        assert_eq!(delinquency_status_for(120), "90+");
    }

    #[test]
    fn generation_is_deterministic() {
        let cfg = GeneratorConfig {
            associates: 5,
            accounts: 50,
            loans: 80,
            assistance: 20,
            ..GeneratorConfig::default()
        };
        let a = SyntheticData::generate(&cfg, 42).to_portfolio();
        let b = SyntheticData::generate(&cfg, 42).to_portfolio();
        assert_eq!(a, b);
        assert_eq!(a.loans.len(), 80);
        assert!(a.loans.iter().all(|l| {
            let d = l.origination_date.unwrap();
            d >= cfg.start_date && d <= cfg.end_date
        }));
    }
}
