//! CSV loading for the portfolio tables.
//!
//! RULE: Only loader.rs reads table files.
//! Sections receive an already-loaded Portfolio and never touch the disk.

use crate::{
    config::ReportConfig,
    error::{PulseError, PulseResult},
    records::{Account, Associate, AssistanceProgram, AssistanceRecord, Loan},
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Everything loaded from one data directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Portfolio {
    pub associates: Vec<Associate>,
    pub accounts: Vec<Account>,
    pub loans: Vec<Loan>,
    /// Present only when the optional assistance tables exist.
    pub programs: Option<Vec<AssistanceProgram>>,
    pub assistance: Option<Vec<AssistanceRecord>>,
}

impl Portfolio {
    pub fn has_assistance(&self) -> bool {
        self.assistance.is_some()
    }
}

/// Load all tables named by `config` from `config.data_dir`.
pub fn load_portfolio(config: &ReportConfig) -> PulseResult<Portfolio> {
    let files = &config.files;
    let associates = read_table_file(&config.table_path(&files.associates))?;
    let accounts = read_table_file(&config.table_path(&files.accounts))?;
    let loans = read_table_file(&config.table_path(&files.loans))?;
    let programs = read_optional_table(&config.table_path(&files.assistance_programs))?;
    let assistance = read_optional_table(&config.table_path(&files.customer_assistance))?;

    let portfolio = Portfolio {
        associates,
        accounts,
        loans,
        programs,
        assistance,
    };
    log::info!(
        "loader: {} associates, {} accounts, {} loans, assistance={}",
        portfolio.associates.len(),
        portfolio.accounts.len(),
        portfolio.loans.len(),
        portfolio.assistance.as_ref().map_or(0, Vec::len),
    );
    Ok(portfolio)
}

pub fn read_table_file<T: DeserializeOwned>(path: &Path) -> PulseResult<Vec<T>> {
    let file = std::fs::File::open(path).map_err(|e| {
        PulseError::Other(anyhow::anyhow!("Cannot read {}: {e}", path.display()))
    })?;
    read_table(file, &path.display().to_string())
}

fn read_optional_table<T: DeserializeOwned>(path: &Path) -> PulseResult<Option<Vec<T>>> {
    if !path.exists() {
        log::info!("loader: optional table {} not found, skipping", path.display());
        return Ok(None);
    }
    read_table_file(path).map(Some)
}

/// Parse a CSV table with a header row from any reader.
///
/// Rows whose cells are all blank are dropped. `label` names the source
/// in error messages.
pub fn read_table<T: DeserializeOwned, R: Read>(reader: R, label: &str) -> PulseResult<Vec<T>> {
    let csv_err = |source: csv::Error| PulseError::Csv {
        file: label.to_string(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();

    let mut rows = Vec::new();
    let mut blank = 0usize;
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        if record.iter().all(|cell| cell.is_empty()) {
            blank += 1;
            continue;
        }
        rows.push(record.deserialize(Some(&headers)).map_err(csv_err)?);
    }
    if blank > 0 {
        log::debug!("loader: {label}: dropped {blank} blank rows");
    }
    Ok(rows)
}
