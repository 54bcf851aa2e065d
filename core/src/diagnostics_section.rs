//! Operational diagnostics (page 1B) — queue migration and workload.
//!
//! Compares delinquency between migrated and non-migrated accounts and
//! plots associate workload against delinquency.

use crate::{
    buckets::DelinquencyStatus,
    chart::{BubblePoint, FlowLink, ScatterPoint},
    config::MigrationRule,
    error::PulseResult,
    metrics::{fixed, pct_of, round1, thousands, Kpi},
    records::Account,
    rng::{StreamRng, StreamSlot},
    section::{ReportSection, SectionContext},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthVolume {
    pub month: String,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationComparison {
    pub status: String,
    #[serde(rename = "Migrated")]
    pub migrated: f64,
    #[serde(rename = "Non-Migrated")]
    pub non_migrated: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSlice {
    pub outcome: String,
    pub value: u64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsReport {
    pub migrated_count: usize,
    pub migrated_rate: f64,
    pub migrated_delinq_rate: f64,
    pub non_migrated_delinq_rate: f64,
    pub scatter_data: Vec<ScatterPoint>,
    pub kpis: Vec<Kpi>,
    pub volume_trend: Vec<MonthVolume>,
    pub grouped_comparison: Vec<MigrationComparison>,
    pub outcome_breakdown: Vec<OutcomeSlice>,
    pub stabilization_matrix: Vec<BubblePoint>,
    pub deterioration_flow: Vec<FlowLink>,
}

pub struct DiagnosticsSection;

impl DiagnosticsSection {
    pub fn is_migrated(rule: MigrationRule, account: &Account) -> bool {
        match rule {
            MigrationRule::IdModulus(m) => account.account_id.rem_euclid(m) == 0,
            MigrationRule::Flag => account.is_migrated == Some(1),
        }
    }

    fn status_shares(accounts: &[&Account]) -> [f64; 4] {
        let mut counts = [0usize; 4];
        for account in accounts {
            if let Some(status) = DelinquencyStatus::classify(account.days_delinquent) {
                counts[status as usize] += 1;
            }
        }
        counts.map(|c| round1(pct_of(c, accounts.len())))
    }
}

impl ReportSection for DiagnosticsSection {
    type Output = DiagnosticsReport;

    fn name(&self) -> &'static str {
        "diagnostics"
    }

    fn slot(&self) -> StreamSlot {
        StreamSlot::Diagnostics
    }

    fn compute(&self, ctx: &SectionContext<'_>, rng: &mut StreamRng) -> PulseResult<DiagnosticsReport> {
        let rule = ctx.config.migration_rule;
        let (migrated, non_migrated): (Vec<&Account>, Vec<&Account>) = ctx
            .portfolio
            .accounts
            .iter()
            .partition(|a| Self::is_migrated(rule, a));

        let delinquent = |set: &[&Account]| set.iter().filter(|a| a.is_delinquent()).count();

        let migrated_rate = round1(pct_of(migrated.len(), ctx.portfolio.accounts.len()));
        let migrated_delinq_rate = round1(pct_of(delinquent(&migrated), migrated.len()));
        let non_migrated_delinq_rate = round1(pct_of(delinquent(&non_migrated), non_migrated.len()));
        let variance = migrated_delinq_rate - non_migrated_delinq_rate;

        let scatter_data = ctx
            .index
            .all_stats(&ctx.portfolio.associates)
            .into_iter()
            .map(|(assoc, stats)| ScatterPoint {
                x: stats.workload as f64,
                y: stats.delinquency_rate,
                name: assoc.associate_name.clone(),
            })
            .collect();

        let kpis = vec![
            Kpi::new("Total Migrated", thousands(migrated.len() as i64), "+5.4%", Some(false)),
            Kpi::new("Migration Rate", format!("{}%", fixed(migrated_rate, 1)), "+1.5%", Some(false)),
            Kpi::new("Delinq (Migrated)", format!("{}%", fixed(migrated_delinq_rate, 1)), "+2.1%", Some(false)),
            Kpi::new("Delinq (Non-Mig.)", format!("{}%", fixed(non_migrated_delinq_rate, 1)), "-0.4%", Some(true)),
            Kpi::new("Avg Stabilization", "18 Days", "-2 Days", Some(true)),
            Kpi::new("Re-migration Risk", "4.2%", "+0.5%", Some(false)),
            Kpi::new("Efficiency Variance", format!("{}%", fixed(variance, 1)), "Alert", Some(false)),
        ];

        let migrated_shares = Self::status_shares(&migrated);
        let other_shares = Self::status_shares(&non_migrated);
        let grouped_comparison = DelinquencyStatus::ALL
            .iter()
            .map(|status| MigrationComparison {
                status: status.label().into(),
                migrated: migrated_shares[*status as usize],
                non_migrated: other_shares[*status as usize],
            })
            .collect();

        // Days since migration and balance are not in the exports; both axes
        // are drawn from the section stream.
        let stabilization_matrix = migrated
            .iter()
            .take(ctx.config.stabilization_sample)
            .map(|a| {
                let days_since = rng.next_in_range(0, 60) as f64;
                let balance_proxy = rng.next_in_range(0, 100) as f64;
                BubblePoint {
                    x: days_since,
                    y: a.days_delinquent.unwrap_or(0) as f64,
                    z: balance_proxy,
                    name: format!("Acc-{}", a.account_id),
                }
            })
            .collect();

        log::debug!(
            "diagnostics: {} migrated ({migrated_rate}%), delinquency {migrated_delinq_rate}% vs {non_migrated_delinq_rate}%",
            migrated.len()
        );

        Ok(DiagnosticsReport {
            migrated_count: migrated.len(),
            migrated_rate,
            migrated_delinq_rate,
            non_migrated_delinq_rate,
            scatter_data,
            kpis,
            volume_trend: reference_volume_trend(),
            grouped_comparison,
            outcome_breakdown: reference_outcomes(),
            stabilization_matrix,
            deterioration_flow: vec![
                FlowLink::new("Current", "30-60", 450.0),
                FlowLink::new("30-60", "60-90", 180.0),
                FlowLink::new("60-90", "90+", 85.0),
                FlowLink::new("90+", "Legal", 42.0),
            ],
        })
    }
}

fn reference_volume_trend() -> Vec<MonthVolume> {
    [("Jul", 420), ("Aug", 380), ("Sep", 510), ("Oct", 460), ("Nov", 620), ("Dec", 580)]
        .into_iter()
        .map(|(month, volume)| MonthVolume { month: month.into(), volume })
        .collect()
}

fn reference_outcomes() -> Vec<OutcomeSlice> {
    [
        ("Cured", 450, "var(--success)"),
        ("Stayed Delinquent", 320, "var(--warning)"),
        ("Deteriorated", 180, "var(--danger)"),
        ("Other/Closed", 50, "var(--text-muted)"),
    ]
    .into_iter()
    .map(|(outcome, value, fill)| OutcomeSlice {
        outcome: outcome.into(),
        value,
        fill: fill.into(),
    })
    .collect()
}
