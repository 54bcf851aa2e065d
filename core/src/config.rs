use crate::error::{PulseError, PulseResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names of the five portfolio tables inside `data_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFiles {
    pub associates: String,
    pub accounts: String,
    pub loans: String,
    pub assistance_programs: String,
    pub customer_assistance: String,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            associates: "associates.csv".into(),
            accounts: "accounts.csv".into(),
            loans: "loans.csv".into(),
            assistance_programs: "assistance_programs.csv".into(),
            customer_assistance: "customer_assistance.csv".into(),
        }
    }
}

/// How accounts are classified as migrated between servicing queues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationRule {
    /// Every account whose id is a multiple of the modulus.
    IdModulus(i64),
    /// The `is_migrated` column of the accounts table.
    Flag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub files: TableFiles,
    /// Accounts at or past this many days count as seriously delinquent.
    pub serious_delinquency_days: i64,
    /// Months kept in the delinquency trend (most recent).
    pub trend_window_months: usize,
    /// Every n-th loan goes into the score/delinquency scatter.
    pub scatter_sample_stride: usize,
    /// Share of portfolio value held as projected loss reserve.
    pub loss_reserve_rate: f64,
    pub leaderboard_size: usize,
    pub heatmap_associates: usize,
    pub stabilization_sample: usize,
    /// Added to the last observed monthly rate, one projected month each.
    pub forecast_offsets: Vec<f64>,
    pub migration_rule: MigrationRule,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            files: TableFiles::default(),
            serious_delinquency_days: 90,
            trend_window_months: 12,
            scatter_sample_stride: 10,
            loss_reserve_rate: 0.012,
            leaderboard_size: 10,
            heatmap_associates: 10,
            stabilization_sample: 50,
            forecast_offsets: vec![0.2, 0.5, 0.3],
            migration_rule: MigrationRule::IdModulus(5),
        }
    }
}

impl ReportConfig {
    /// Load a JSON config. Omitted keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults pointed at a specific data directory.
    pub fn for_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> PulseResult<()> {
        let invalid = |reason: &str| {
            Err(PulseError::ConfigInvalid {
                reason: reason.to_string(),
            })
        };
        if self.scatter_sample_stride == 0 {
            return invalid("scatter_sample_stride must be > 0");
        }
        if self.trend_window_months == 0 {
            return invalid("trend_window_months must be > 0");
        }
        if let MigrationRule::IdModulus(m) = self.migration_rule {
            if m <= 0 {
                return invalid("migration id_modulus must be > 0");
            }
        }
        if !(0.0..=1.0).contains(&self.loss_reserve_rate) {
            return invalid("loss_reserve_rate must be within [0, 1]");
        }
        Ok(())
    }

    pub fn table_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ReportConfig =
            serde_json::from_str(r#"{ "trend_window_months": 6, "migration_rule": "flag" }"#)
                .unwrap();
        assert_eq!(cfg.trend_window_months, 6);
        assert_eq!(cfg.migration_rule, MigrationRule::Flag);
        assert_eq!(cfg.scatter_sample_stride, 10);
        assert_eq!(cfg.files.loans, "loans.csv");
    }

    #[test]
    fn modulus_rule_parses() {
        let cfg: ReportConfig =
            serde_json::from_str(r#"{ "migration_rule": { "id_modulus": 3 } }"#).unwrap();
        assert_eq!(cfg.migration_rule, MigrationRule::IdModulus(3));
    }

    #[test]
    fn zero_stride_rejected() {
        let cfg = ReportConfig {
            scatter_sample_stride: 0,
            ..ReportConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(PulseError::ConfigInvalid { .. })));
    }
}
