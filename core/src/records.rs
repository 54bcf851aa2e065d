//! Flat record types for the five portfolio tables.
//!
//! Cells are loosely typed on input: a value that does not parse as the
//! declared type is treated as missing instead of rejecting the row.

use crate::types::{AccountId, AssociateId, LoanId, ProgramId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Associate {
    pub associate_id: AssociateId,
    #[serde(default)]
    pub associate_name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub experience_years: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: AccountId,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub associate_id: Option<AssociateId>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub days_delinquent: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub cured_flag: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub is_migrated: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub account_balance: Option<f64>,
}

impl Account {
    pub fn is_delinquent(&self) -> bool {
        self.days_delinquent.is_some_and(|d| d > 0)
    }

    pub fn is_cured(&self) -> bool {
        self.cured_flag == Some(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub loan_id: LoanId,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub loan_amount: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub credit_score: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub days_delinquent: Option<i64>,
    #[serde(default)]
    pub risk_segment: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub origination_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub loan_age_months: Option<i64>,
}

impl Loan {
    /// Amount used in sums; a missing amount contributes nothing.
    pub fn amount(&self) -> f64 {
        self.loan_amount.unwrap_or(0.0)
    }

    pub fn days_past_due(&self) -> i64 {
        self.days_delinquent.unwrap_or(0)
    }

    pub fn is_delinquent(&self) -> bool {
        self.days_past_due() > 0
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_segment == HIGH_RISK
    }
}

pub const HIGH_RISK: &str = "High Risk";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistanceProgram {
    pub program_id: ProgramId,
    #[serde(default)]
    pub program_name: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub max_allowed: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistanceRecord {
    pub assistance_id: i64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub loan_id: Option<LoanId>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub program_id: Option<ProgramId>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub assistance_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub duration_months: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub assistance_count_for_customer: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub successful_cure: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub redefaulted: Option<i64>,
}

impl AssistanceRecord {
    pub fn cured(&self) -> bool {
        self.successful_cure == Some(1)
    }

    pub fn redefaulted(&self) -> bool {
        self.redefaulted == Some(1)
    }
}

/// Parse the date layouts produced by spreadsheet and dataframe exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}
